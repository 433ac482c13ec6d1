use serde::Serialize;

use crate::RecordField;

/// Exact-match (case-insensitive) clauses over the categorical record fields.
///
/// A filter never scores. It either keeps or drops a record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
	pub species: Option<String>,
	pub class: Option<String>,
	pub mutation_status: Option<String>,
}
impl Filters {
	/// Fields that can carry a filter, which are also the faceted fields.
	pub const FIELDS: [RecordField; 3] =
		[RecordField::Species, RecordField::Class, RecordField::MutationStatus];

	/// Builds filters from raw request values. Blank values mean "no filter".
	pub fn from_raw(
		species: Option<&str>,
		class: Option<&str>,
		mutation_status: Option<&str>,
	) -> Self {
		Self {
			species: clean(species),
			class: clean(class),
			mutation_status: clean(mutation_status),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.species.is_none() && self.class.is_none() && self.mutation_status.is_none()
	}

	/// Active clauses as `(field, expected value)` pairs.
	pub fn clauses(&self) -> impl Iterator<Item = (RecordField, &str)> {
		[
			(RecordField::Species, self.species.as_deref()),
			(RecordField::Class, self.class.as_deref()),
			(RecordField::MutationStatus, self.mutation_status.as_deref()),
		]
		.into_iter()
		.filter_map(|(field, value)| value.map(|value| (field, value)))
	}

	/// Evaluates every clause against a field accessor.
	pub fn matches<'a, F>(&self, value_of: F) -> bool
	where
		F: Fn(RecordField) -> &'a str,
	{
		self.clauses().all(|(field, expected)| value_matches(value_of(field), expected))
	}
}

/// Case-insensitive equality, the same rule the store applies natively.
pub fn value_matches(actual: &str, expected: &str) -> bool {
	actual == expected || actual.to_lowercase() == expected.to_lowercase()
}

fn clean(raw: Option<&str>) -> Option<String> {
	raw.map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lookup(field: RecordField) -> &'static str {
		match field {
			RecordField::Species => "Human",
			RecordField::Class => "Class A",
			RecordField::MutationStatus => "",
			_ => "other",
		}
	}

	#[test]
	fn blank_values_are_dropped() {
		let filters = Filters::from_raw(Some("  "), None, Some(""));

		assert!(filters.is_empty());
		assert!(filters.matches(lookup));
	}

	#[test]
	fn matching_ignores_case() {
		let filters = Filters::from_raw(Some("human"), Some("CLASS A"), None);

		assert!(filters.matches(lookup));
	}

	#[test]
	fn any_failing_clause_excludes() {
		let filters = Filters::from_raw(Some("Human"), None, Some("Mutant"));

		assert!(!filters.matches(lookup));
	}

	#[test]
	fn clauses_follow_field_order() {
		let filters = Filters::from_raw(Some("Mouse"), None, Some("Wild-type"));
		let clauses = filters.clauses().collect::<Vec<_>>();

		assert_eq!(
			clauses,
			vec![(RecordField::Species, "Mouse"), (RecordField::MutationStatus, "Wild-type")]
		);
	}
}

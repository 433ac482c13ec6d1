use std::collections::BTreeSet;

use serde::Serialize;

use evolf_domain::RecordField;
use evolf_storage::models::Record;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
	pub total_rows: u64,
	pub unique_classes: Vec<String>,
	pub unique_species: Vec<String>,
	pub unique_mutation_types: Vec<String>,
}

/// Choices that still narrow the current result set. Keys match the statistics block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
	pub unique_classes: Vec<String>,
	pub unique_species: Vec<String>,
	pub unique_mutation_types: Vec<String>,
}
impl From<&Statistics> for FilterOptions {
	fn from(stats: &Statistics) -> Self {
		Self {
			unique_classes: stats.unique_classes.clone(),
			unique_species: stats.unique_species.clone(),
			unique_mutation_types: stats.unique_mutation_types.clone(),
		}
	}
}

/// Distinct non-empty values of the faceted fields, sorted ascending, plus the row count.
///
/// Call with the filtered working set before pagination.
pub fn summarize(records: &[Record]) -> Statistics {
	Statistics {
		total_rows: records.len() as u64,
		unique_classes: distinct(records, RecordField::Class),
		unique_species: distinct(records, RecordField::Species),
		unique_mutation_types: distinct(records, RecordField::MutationStatus),
	}
}

/// Distinct non-empty values of `field` within `records`.
pub fn distinct(records: &[Record], field: RecordField) -> Vec<String> {
	records
		.iter()
		.map(|record| record.field(field).trim())
		.filter(|value| !value.is_empty())
		.collect::<BTreeSet<_>>()
		.into_iter()
		.map(str::to_string)
		.collect()
}

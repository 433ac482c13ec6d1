use serde::Serialize;

use crate::RecordField;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
	Asc,
	#[default]
	Desc,
}
impl SortOrder {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"asc" => Some(Self::Asc),
			"desc" => Some(Self::Desc),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}
}

/// Requested field order. `field` is `None` when the requested key is not a record field, which
/// keeps the incoming order untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SortSpec {
	pub field: Option<RecordField>,
	pub order: SortOrder,
}
impl SortSpec {
	pub fn new(field: Option<RecordField>, order: SortOrder) -> Self {
		Self { field, order }
	}

	pub fn resolve(key: &str, order: SortOrder) -> Self {
		Self { field: RecordField::from_key(key), order }
	}
}
impl Default for SortSpec {
	fn default() -> Self {
		Self { field: Some(RecordField::EvolfId), order: SortOrder::Desc }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_order_case_insensitively() {
		assert_eq!(SortOrder::parse("ASC"), Some(SortOrder::Asc));
		assert_eq!(SortOrder::parse(" desc "), Some(SortOrder::Desc));
		assert_eq!(SortOrder::parse("up"), None);
	}

	#[test]
	fn unknown_keys_resolve_to_no_field() {
		let spec = SortSpec::resolve("relevance", SortOrder::Asc);

		assert_eq!(spec.field, None);
		assert_eq!(spec.order, SortOrder::Asc);
	}

	#[test]
	fn serializes_order_in_lowercase() {
		let json = serde_json::to_value(SortSpec::default()).expect("Failed to serialize.");

		assert_eq!(json["order"], "desc");
		assert_eq!(json["field"], "evolf_id");
	}
}

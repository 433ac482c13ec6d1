//! Boundary validation for catalog queries.

use serde::{Deserialize, Serialize};

use evolf_config::Pagination;
use evolf_domain::{Filters, RecordField, SortOrder, SortSpec, term};

use crate::{Error, Result};

/// Raw query parameters of a dataset request. Numbers arrive as text so that malformed values
/// produce a descriptive error instead of a generic rejection.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DatasetRequest {
	pub search: Option<String>,
	#[serde(rename = "sortBy")]
	pub sort_by: Option<String>,
	#[serde(rename = "sortOrder")]
	pub sort_order: Option<String>,
	pub species: Option<String>,
	pub class: Option<String>,
	#[serde(rename = "classFilter")]
	pub class_filter: Option<String>,
	#[serde(rename = "mutationType")]
	pub mutation_type: Option<String>,
	pub page: Option<String>,
	pub limit: Option<String>,
}

/// A dataset request that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetQuery {
	/// Normalized search term. Empty means "no text search".
	pub term: String,
	pub filters: Filters,
	pub sort: SortSpec,
	pub page: u32,
	/// Already clamped to the configured maximum.
	pub page_size: u32,
}
impl DatasetQuery {
	pub fn from_request(req: &DatasetRequest, cfg: &Pagination) -> Result<Self> {
		let term = req.search.as_deref().map(term::normalize_term).unwrap_or_default();
		let class = req
			.class
			.as_deref()
			.filter(|value| !value.trim().is_empty())
			.or(req.class_filter.as_deref());
		let filters =
			Filters::from_raw(req.species.as_deref(), class, req.mutation_type.as_deref());
		let order = match req.sort_order.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
			Some(raw) => SortOrder::parse(raw).ok_or_else(|| Error::InvalidRequest {
				message: "sortOrder must be one of asc or desc.".to_string(),
			})?,
			None => SortOrder::default(),
		};
		let sort = match req.sort_by.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
			Some(raw) => SortSpec::resolve(raw, order),
			None => SortSpec::new(Some(RecordField::EvolfId), order),
		};
		let page = parse_positive("page", req.page.as_deref())?.unwrap_or(1);
		let page_size = parse_positive("limit", req.limit.as_deref())?
			.unwrap_or(cfg.default_page_size)
			.min(cfg.max_page_size);

		Ok(Self { term, filters, sort, page, page_size })
	}
}

/// Parses an optional positive integer parameter. Blank means "use the default". Values above
/// `u32::MAX` saturate, which the pager treats as "past the end".
pub(crate) fn parse_positive(name: &str, raw: Option<&str>) -> Result<Option<u32>> {
	let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
		return Ok(None);
	};
	let value: i64 = raw.parse().map_err(|_| Error::InvalidRequest {
		message: format!("{name} must be an integer."),
	})?;

	if value <= 0 {
		return Err(Error::InvalidRequest { message: format!("{name} must be greater than zero.") });
	}

	Ok(Some(u32::try_from(value).unwrap_or(u32::MAX)))
}

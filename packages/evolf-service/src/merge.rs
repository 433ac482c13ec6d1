//! Reconciles a planned id order with the record store.
//!
//! Both paths end in the same shape, an ordered `Vec<Record>`, so nothing downstream needs to
//! know whether the order came from a search backend or from a field sort.

use ahash::AHashMap;

use evolf_domain::{Filters, SortOrder, SortSpec};
use evolf_storage::models::Record;

use crate::{CatalogService, Result};

impl CatalogService {
	/// With ranked ids, rank order wins over `sort`. Without them, `sort` orders the filtered
	/// collection.
	pub async fn merge(
		&self,
		ordered_ids: Option<&[String]>,
		filters: &Filters,
		sort: SortSpec,
	) -> Result<Vec<Record>> {
		let store = self.backends.store.as_ref();

		match ordered_ids {
			Some([]) => Ok(Vec::new()),
			Some(ids) => {
				let records =
					crate::within_deadline(self.store_deadline(), store.find_by_ids(ids)).await?;
				let kept = records
					.into_iter()
					.filter(|record| filters.matches(|field| record.field(field)))
					.collect();

				Ok(order_by_rank(kept, ids))
			},
			None => {
				let mut records =
					crate::within_deadline(self.store_deadline(), store.query_filtered(filters))
						.await?;

				sort_records(&mut records, sort);

				Ok(records)
			},
		}
	}
}

/// Reorders `records` to follow `ids`. Records whose id is absent from `ids` go last, keeping
/// their relative order.
pub fn order_by_rank(mut records: Vec<Record>, ids: &[String]) -> Vec<Record> {
	let mut rank = AHashMap::with_capacity(ids.len());

	for (position, id) in ids.iter().enumerate() {
		rank.entry(id.as_str()).or_insert(position);
	}

	records.sort_by_key(|record| rank.get(record.evolf_id.as_str()).copied().unwrap_or(usize::MAX));

	records
}

/// Stable ordinal sort by one field. Equal values keep their incoming order in both directions,
/// and an unresolved field leaves the slice untouched.
pub fn sort_records(records: &mut [Record], sort: SortSpec) {
	let Some(field) = sort.field else {
		return;
	};

	match sort.order {
		SortOrder::Asc => records.sort_by(|a, b| a.field(field).cmp(b.field(field))),
		SortOrder::Desc => records.sort_by(|a, b| b.field(field).cmp(a.field(field))),
	}
}

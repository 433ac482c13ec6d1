use serde::Serialize;

use evolf_storage::models::Record;

use crate::{
	CatalogService, DatasetQuery, DatasetRequest, Engine, FilterOptions, Pagination, Result,
	Statistics, facets, pager,
};

/// Summary row of the dataset table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetItem {
	pub evolf_id: String,
	pub receptor: String,
	pub species: String,
	pub class: String,
	pub ligand: String,
	pub mutation_status: String,
	pub mutation: String,
	pub chembl_id: String,
	pub uniprot_id: String,
	pub cid: String,
}
impl From<Record> for DatasetItem {
	fn from(record: Record) -> Self {
		Self {
			evolf_id: record.evolf_id,
			receptor: record.receptor,
			species: record.species,
			class: record.class,
			ligand: record.ligand,
			mutation_status: record.mutation_status,
			mutation: record.mutation,
			chembl_id: record.chembl_id,
			uniprot_id: record.uniprot_id,
			cid: record.cid,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetResponse {
	pub data: Vec<DatasetItem>,
	pub pagination: Pagination,
	pub statistics: Statistics,
	pub filter_options: FilterOptions,
	pub suggestions: Vec<String>,
	/// Every id of the ordered working set, across all pages.
	#[serde(rename = "all_ids")]
	pub all_ids: Vec<String>,
	pub engine: Engine,
}

impl CatalogService {
	pub async fn dataset(&self, req: DatasetRequest) -> Result<DatasetResponse> {
		let query = DatasetQuery::from_request(&req, &self.cfg.pagination)?;

		self.run_dataset(&query).await
	}

	/// Plan, merge, summarize, then page.
	pub async fn run_dataset(&self, query: &DatasetQuery) -> Result<DatasetResponse> {
		let plan = self.plan(&query.term, &query.filters).await?;
		let records = self.merge(plan.ordered_ids.as_deref(), &query.filters, query.sort).await?;
		let statistics = facets::summarize(&records);
		let filter_options = FilterOptions::from(&statistics);
		let all_ids = records.iter().map(|record| record.evolf_id.clone()).collect();
		let (page, pagination) = pager::paginate(records, query.page, query.page_size);

		tracing::debug!(
			engine = ?plan.engine,
			total_items = pagination.total_items,
			page = pagination.current_page,
			total_pages = pagination.total_pages,
			"Dataset request served."
		);

		Ok(DatasetResponse {
			data: page.into_iter().map(DatasetItem::from).collect(),
			pagination,
			statistics,
			filter_options,
			suggestions: plan.suggestions,
			all_ids,
			engine: plan.engine,
		})
	}
}

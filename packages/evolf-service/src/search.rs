//! Quick search: the ranked hits for one term, without filters or paging.

use serde::{Deserialize, Serialize};

use evolf_domain::{Filters, SortSpec, term};
use evolf_storage::models::Record;

use crate::{CatalogService, Engine, Error, Result};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TextSearchRequest {
	pub q: Option<String>,
}

/// One quick-search result. Keys use the catalog's column headers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextSearchHit {
	#[serde(rename = "EvOlf_ID")]
	pub evolf_id: String,
	#[serde(rename = "Receptor")]
	pub receptor: String,
	#[serde(rename = "Ligand")]
	pub ligand: String,
	#[serde(rename = "Species")]
	pub species: String,
	#[serde(rename = "UniProt_ID")]
	pub uniprot_id: String,
	#[serde(rename = "ChEMBL_ID")]
	pub chembl_id: String,
	#[serde(rename = "CID")]
	pub cid: String,
	#[serde(rename = "Sequence")]
	pub sequence: String,
}
impl From<Record> for TextSearchHit {
	fn from(record: Record) -> Self {
		Self {
			evolf_id: record.evolf_id,
			receptor: record.receptor,
			ligand: record.ligand,
			species: record.species,
			uniprot_id: record.uniprot_id,
			chembl_id: record.chembl_id,
			cid: record.cid,
			sequence: record.sequence,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextSearchResponse {
	pub query: String,
	pub total: u64,
	pub results: Vec<TextSearchHit>,
	pub suggestions: Vec<String>,
	pub engine: Engine,
}

impl CatalogService {
	pub async fn search(&self, req: TextSearchRequest) -> Result<TextSearchResponse> {
		let query = req.q.as_deref().map(term::normalize_term).unwrap_or_default();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "q is required.".to_string() });
		}

		let filters = Filters::default();
		let plan = self.plan(&query, &filters).await?;
		let records =
			self.merge(plan.ordered_ids.as_deref(), &filters, SortSpec::default()).await?;
		let total = records.len() as u64;
		let results = records
			.into_iter()
			.take(self.cfg.pagination.max_page_size as usize)
			.map(TextSearchHit::from)
			.collect();

		Ok(TextSearchResponse {
			query,
			total,
			results,
			suggestions: plan.suggestions,
			engine: plan.engine,
		})
	}
}

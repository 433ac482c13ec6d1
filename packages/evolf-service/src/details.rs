use serde::Serialize;

use evolf_storage::models::Record;

use crate::{CatalogService, Error, Result};

/// Every attribute of one record, grouped the way the detail page shows them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDetail {
	pub evolf_id: String,
	pub receptor: ReceptorDetail,
	pub ligand: LigandDetail,
	pub interaction: InteractionDetail,
	pub links: LinkDetail,
	pub comments: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceptorDetail {
	pub receptor_id: String,
	pub name: String,
	pub class: String,
	pub subtype: String,
	pub species: String,
	pub uniprot_id: String,
	pub mutation_status: String,
	pub mutation: String,
	pub mutation_impact: String,
	pub sequence: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LigandDetail {
	pub ligand_id: String,
	pub name: String,
	pub smiles: String,
	pub cid: String,
	pub chembl_id: String,
	pub inchikey: String,
	pub inchi: String,
	pub iupac_name: String,
	pub image: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionDetail {
	pub method: String,
	pub expression_system: String,
	pub parameter: String,
	pub value: String,
	pub unit: String,
	pub source: String,
	pub model: String,
	pub structure_3d: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDetail {
	pub pubchem: String,
	pub uniprot: String,
	/// Source references exactly as stored; may hold several separated links.
	pub sources: String,
}

impl From<Record> for RecordDetail {
	fn from(record: Record) -> Self {
		Self {
			evolf_id: record.evolf_id,
			receptor: ReceptorDetail {
				receptor_id: record.receptor_id,
				name: record.receptor,
				class: record.class,
				subtype: record.receptor_subtype,
				species: record.species,
				uniprot_id: record.uniprot_id,
				mutation_status: record.mutation_status,
				mutation: record.mutation,
				mutation_impact: record.mutation_impact,
				sequence: record.sequence,
			},
			ligand: LigandDetail {
				ligand_id: record.ligand_id,
				name: record.ligand,
				smiles: record.smiles,
				cid: record.cid,
				chembl_id: record.chembl_id,
				inchikey: record.inchikey,
				inchi: record.inchi,
				iupac_name: record.iupac_name,
				image: record.image,
			},
			interaction: InteractionDetail {
				method: record.method,
				expression_system: record.expression_system,
				parameter: record.parameter,
				value: record.value,
				unit: record.unit,
				source: record.source,
				model: record.model,
				structure_3d: record.structure_3d,
			},
			links: LinkDetail {
				pubchem: record.pubchem_link,
				uniprot: record.uniprot_link,
				sources: record.source_links,
			},
			comments: record.comments,
		}
	}
}

impl CatalogService {
	pub async fn record(&self, evolf_id: &str) -> Result<RecordDetail> {
		let evolf_id = evolf_id.trim();

		if evolf_id.is_empty() {
			return Err(Error::InvalidRequest { message: "evolf_id is required.".to_string() });
		}

		let record = crate::within_deadline(
			self.store_deadline(),
			self.backends.store.find_by_id(evolf_id),
		)
		.await?
		.ok_or_else(|| Error::NotFound { message: format!("No record with id {evolf_id}.") })?;

		Ok(RecordDetail::from(record))
	}
}

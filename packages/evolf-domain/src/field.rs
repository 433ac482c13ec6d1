use serde::Serialize;

/// Every attribute of a catalog record, in import column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
	EvolfId,
	Class,
	Species,
	ReceptorId,
	Receptor,
	UniprotId,
	MutationStatus,
	Mutation,
	MutationImpact,
	Sequence,
	ReceptorSubtype,
	LigandId,
	Ligand,
	Smiles,
	Cid,
	ChemblId,
	InchiKey,
	Inchi,
	IupacName,
	Method,
	ExpressionSystem,
	Parameter,
	Value,
	Unit,
	Source,
	Model,
	Image,
	Structure3d,
	PubchemLink,
	SourceLinks,
	UniprotLink,
	Comments,
}
impl RecordField {
	pub const ALL: [Self; 32] = [
		Self::EvolfId,
		Self::Class,
		Self::Species,
		Self::ReceptorId,
		Self::Receptor,
		Self::UniprotId,
		Self::MutationStatus,
		Self::Mutation,
		Self::MutationImpact,
		Self::Sequence,
		Self::ReceptorSubtype,
		Self::LigandId,
		Self::Ligand,
		Self::Smiles,
		Self::Cid,
		Self::ChemblId,
		Self::InchiKey,
		Self::Inchi,
		Self::IupacName,
		Self::Method,
		Self::ExpressionSystem,
		Self::Parameter,
		Self::Value,
		Self::Unit,
		Self::Source,
		Self::Model,
		Self::Image,
		Self::Structure3d,
		Self::PubchemLink,
		Self::SourceLinks,
		Self::UniprotLink,
		Self::Comments,
	];

	/// Resolves a loosely written attribute key ("EvOlf_ID", "evolfId", "Mutation Status").
	///
	/// Matching ignores ASCII case as well as spaces, underscores, and dashes. Callers resolve keys
	/// once at the request boundary and carry the typed field from then on.
	pub fn from_key(raw: &str) -> Option<Self> {
		let key = normalize_key(raw);

		if key.is_empty() {
			return None;
		}

		// "3d Structure" is the import header for the structure column.
		if key == "3dstructure" {
			return Some(Self::Structure3d);
		}

		Self::ALL.into_iter().find(|field| normalize_key(field.column()) == key)
	}

	/// Column name in the `evolf_records` table.
	pub fn column(self) -> &'static str {
		match self {
			Self::EvolfId => "evolf_id",
			Self::Class => "class",
			Self::Species => "species",
			Self::ReceptorId => "receptor_id",
			Self::Receptor => "receptor",
			Self::UniprotId => "uniprot_id",
			Self::MutationStatus => "mutation_status",
			Self::Mutation => "mutation",
			Self::MutationImpact => "mutation_impact",
			Self::Sequence => "sequence",
			Self::ReceptorSubtype => "receptor_subtype",
			Self::LigandId => "ligand_id",
			Self::Ligand => "ligand",
			Self::Smiles => "smiles",
			Self::Cid => "cid",
			Self::ChemblId => "chembl_id",
			Self::InchiKey => "inchikey",
			Self::Inchi => "inchi",
			Self::IupacName => "iupac_name",
			Self::Method => "method",
			Self::ExpressionSystem => "expression_system",
			Self::Parameter => "parameter",
			Self::Value => "value",
			Self::Unit => "unit",
			Self::Source => "source",
			Self::Model => "model",
			Self::Image => "image",
			Self::Structure3d => "structure_3d",
			Self::PubchemLink => "pubchem_link",
			Self::SourceLinks => "source_links",
			Self::UniprotLink => "uniprot_link",
			Self::Comments => "comments",
		}
	}

	/// Document field name in the text index, as written by the bulk indexer.
	pub fn index_name(self) -> &'static str {
		match self {
			Self::EvolfId => "EvOlf_ID",
			Self::Class => "Class",
			Self::Species => "Species",
			Self::ReceptorId => "Receptor_ID",
			Self::Receptor => "Receptor",
			Self::UniprotId => "UniProt_ID",
			Self::MutationStatus => "Mutation_Status",
			Self::Mutation => "Mutation",
			Self::MutationImpact => "Mutation_Impact",
			Self::Sequence => "Sequence",
			Self::ReceptorSubtype => "Receptor_SubType",
			Self::LigandId => "Ligand_ID",
			Self::Ligand => "Ligand",
			Self::Smiles => "SMILES",
			Self::Cid => "CID",
			Self::ChemblId => "ChEMBL_ID",
			Self::InchiKey => "InChiKey",
			Self::Inchi => "InChi",
			Self::IupacName => "IUPAC_Name",
			Self::Method => "Method",
			Self::ExpressionSystem => "Expression_System",
			Self::Parameter => "Parameter",
			Self::Value => "Value",
			Self::Unit => "Unit",
			Self::Source => "Source",
			Self::Model => "Model",
			Self::Image => "Image",
			Self::Structure3d => "Structure_3D",
			Self::PubchemLink => "PubChem_Link",
			Self::SourceLinks => "Source_Links",
			Self::UniprotLink => "UniProt_Link",
			Self::Comments => "Comments",
		}
	}
}

fn normalize_key(raw: &str) -> String {
	raw.chars()
		.filter(|ch| !matches!(ch, ' ' | '_' | '-'))
		.map(|ch| ch.to_ascii_lowercase())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_loose_keys() {
		for key in ["EvOlf_ID", "evolfId", "evolf id", "EVOLF-ID"] {
			assert_eq!(RecordField::from_key(key), Some(RecordField::EvolfId), "key {key:?}");
		}

		assert_eq!(RecordField::from_key("Mutation Status"), Some(RecordField::MutationStatus));
		assert_eq!(RecordField::from_key("ChEMBL ID"), Some(RecordField::ChemblId));
		assert_eq!(RecordField::from_key("3d Structure"), Some(RecordField::Structure3d));
		assert_eq!(RecordField::from_key("Structure_3D"), Some(RecordField::Structure3d));
	}

	#[test]
	fn rejects_unknown_and_blank_keys() {
		assert_eq!(RecordField::from_key("popularity"), None);
		assert_eq!(RecordField::from_key(" _ "), None);
	}

	#[test]
	fn index_names_resolve_back_to_the_same_field() {
		for field in RecordField::ALL {
			assert_eq!(RecordField::from_key(field.index_name()), Some(field));
		}
	}
}

use evolf_domain::RecordField;

/// One receptor/ligand/species observation. Absent attributes are stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct Record {
	pub row_id: i64,
	pub evolf_id: String,
	pub class: String,
	pub species: String,
	pub receptor_id: String,
	pub receptor: String,
	pub uniprot_id: String,
	pub mutation_status: String,
	pub mutation: String,
	pub mutation_impact: String,
	pub sequence: String,
	pub receptor_subtype: String,
	pub ligand_id: String,
	pub ligand: String,
	pub smiles: String,
	pub cid: String,
	pub chembl_id: String,
	pub inchikey: String,
	pub inchi: String,
	pub iupac_name: String,
	pub method: String,
	pub expression_system: String,
	pub parameter: String,
	pub value: String,
	pub unit: String,
	pub source: String,
	pub model: String,
	pub image: String,
	pub structure_3d: String,
	pub pubchem_link: String,
	pub source_links: String,
	pub uniprot_link: String,
	pub comments: String,
}
impl Record {
	pub fn field(&self, field: RecordField) -> &str {
		match field {
			RecordField::EvolfId => &self.evolf_id,
			RecordField::Class => &self.class,
			RecordField::Species => &self.species,
			RecordField::ReceptorId => &self.receptor_id,
			RecordField::Receptor => &self.receptor,
			RecordField::UniprotId => &self.uniprot_id,
			RecordField::MutationStatus => &self.mutation_status,
			RecordField::Mutation => &self.mutation,
			RecordField::MutationImpact => &self.mutation_impact,
			RecordField::Sequence => &self.sequence,
			RecordField::ReceptorSubtype => &self.receptor_subtype,
			RecordField::LigandId => &self.ligand_id,
			RecordField::Ligand => &self.ligand,
			RecordField::Smiles => &self.smiles,
			RecordField::Cid => &self.cid,
			RecordField::ChemblId => &self.chembl_id,
			RecordField::InchiKey => &self.inchikey,
			RecordField::Inchi => &self.inchi,
			RecordField::IupacName => &self.iupac_name,
			RecordField::Method => &self.method,
			RecordField::ExpressionSystem => &self.expression_system,
			RecordField::Parameter => &self.parameter,
			RecordField::Value => &self.value,
			RecordField::Unit => &self.unit,
			RecordField::Source => &self.source,
			RecordField::Model => &self.model,
			RecordField::Image => &self.image,
			RecordField::Structure3d => &self.structure_3d,
			RecordField::PubchemLink => &self.pubchem_link,
			RecordField::SourceLinks => &self.source_links,
			RecordField::UniprotLink => &self.uniprot_link,
			RecordField::Comments => &self.comments,
		}
	}
}

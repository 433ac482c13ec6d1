use sqlx::{Postgres, QueryBuilder};

use evolf_domain::{Filters, RecordField};

use crate::{Result, db::Db, models::Record};

/// Columns scanned by the substring fallback, OR'ed together.
pub const SUBSTRING_FIELDS: [RecordField; 9] = [
	RecordField::Receptor,
	RecordField::Ligand,
	RecordField::Species,
	RecordField::EvolfId,
	RecordField::ReceptorId,
	RecordField::LigandId,
	RecordField::UniprotId,
	RecordField::ChemblId,
	RecordField::Cid,
];

const RECORD_COLUMNS: &str = "\
row_id, evolf_id, class, species, receptor_id, receptor, uniprot_id, mutation_status, mutation, \
mutation_impact, sequence, receptor_subtype, ligand_id, ligand, smiles, cid, chembl_id, inchikey, \
inchi, iupac_name, method, expression_system, parameter, value, unit, source, model, image, \
structure_3d, pubchem_link, source_links, uniprot_link, comments";

pub async fn fetch_by_ids(db: &Db, ids: &[String]) -> Result<Vec<Record>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let sql = format!(
		"SELECT {RECORD_COLUMNS} FROM evolf_records WHERE evolf_id = ANY($1) ORDER BY row_id"
	);
	let records = sqlx::query_as::<_, Record>(&sql).bind(ids).fetch_all(&db.pool).await?;

	Ok(records)
}

pub async fn fetch_by_id(db: &Db, evolf_id: &str) -> Result<Option<Record>> {
	let sql = format!("SELECT {RECORD_COLUMNS} FROM evolf_records WHERE evolf_id = $1");
	let record =
		sqlx::query_as::<_, Record>(&sql).bind(evolf_id).fetch_optional(&db.pool).await?;

	Ok(record)
}

/// All records passing `filters`, in store order. Unknown filter values match nothing.
pub async fn fetch_filtered(db: &Db, filters: &Filters) -> Result<Vec<Record>> {
	let mut builder = QueryBuilder::<Postgres>::new(format!(
		"SELECT {RECORD_COLUMNS} FROM evolf_records WHERE TRUE"
	));

	push_filter_predicates(&mut builder, filters);
	builder.push(" ORDER BY row_id");

	let records = builder.build_query_as::<Record>().fetch_all(&db.pool).await?;

	Ok(records)
}

/// Identifiers of records containing `term` (case-insensitive) in any substring field and passing
/// `filters`. The limit applies after filtering.
pub async fn substring_ids(
	db: &Db,
	term: &str,
	filters: &Filters,
	limit: u32,
) -> Result<Vec<String>> {
	let pattern = format!("%{}%", escape_like(term));
	let mut builder =
		QueryBuilder::<Postgres>::new("SELECT evolf_id FROM evolf_records WHERE (FALSE");

	push_substring_predicates(&mut builder, &pattern);
	builder.push(")");
	push_filter_predicates(&mut builder, filters);
	builder.push(" ORDER BY row_id LIMIT ");
	builder.push_bind(i64::from(limit));

	let ids = builder.build_query_scalar::<String>().fetch_all(&db.pool).await?;

	Ok(ids)
}

/// Substring matches plus receptor names whose trigram similarity to `term` exceeds
/// `min_similarity`, restricted to `filters` and ordered by descending receptor similarity and
/// then store order.
pub async fn similarity_ids(
	db: &Db,
	term: &str,
	filters: &Filters,
	min_similarity: f32,
	limit: u32,
) -> Result<Vec<String>> {
	let pattern = format!("%{}%", escape_like(term));
	let mut builder = QueryBuilder::<Postgres>::new(
		"SELECT evolf_id FROM evolf_records WHERE (similarity(receptor, ",
	);

	builder.push_bind(term.to_string());
	builder.push(") > ");
	builder.push_bind(min_similarity);
	push_substring_predicates(&mut builder, &pattern);
	builder.push(")");
	push_filter_predicates(&mut builder, filters);
	builder.push(" ORDER BY similarity(receptor, ");
	builder.push_bind(term.to_string());
	builder.push(") DESC, row_id LIMIT ");
	builder.push_bind(i64::from(limit));

	let ids = builder.build_query_scalar::<String>().fetch_all(&db.pool).await?;

	Ok(ids)
}

pub async fn trigram_available(db: &Db) -> Result<bool> {
	let available = sqlx::query_scalar::<_, bool>(
		"SELECT EXISTS (SELECT 1 FROM pg_extension WHERE extname = 'pg_trgm')",
	)
	.fetch_one(&db.pool)
	.await?;

	Ok(available)
}

fn push_filter_predicates(builder: &mut QueryBuilder<'_, Postgres>, filters: &Filters) {
	for (field, value) in filters.clauses() {
		builder.push(format!(" AND lower({}) = lower(", field.column()));
		builder.push_bind(value.to_string());
		builder.push(")");
	}
}

fn push_substring_predicates(builder: &mut QueryBuilder<'_, Postgres>, pattern: &str) {
	for field in SUBSTRING_FIELDS {
		builder.push(format!(" OR {} ILIKE ", field.column()));
		builder.push_bind(pattern.to_string());
		builder.push(" ESCAPE '\\'");
	}
}

pub fn escape_like(term: &str) -> String {
	let mut out = String::with_capacity(term.len());

	for ch in term.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}

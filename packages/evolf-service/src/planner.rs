//! Chooses between the text index and the record store for a search term, and turns either answer
//! into one ranked id list.

use std::time::Duration;

use serde::Serialize;

use evolf_config::{FallbackMode, Search};
use evolf_domain::{
	Filters, MatchClause, MatchKind, RecordField, TextQuery, WeightedField, term,
};

use crate::{CatalogService, Result, TextSearchOutcome};

const IDENTIFIER_WEIGHT: f32 = 5.0;
const NAME_WEIGHT: f32 = 4.0;
const CROSS_REFERENCE_WEIGHT: f32 = 3.0;
const DESCRIPTIVE_WEIGHT: f32 = 2.0;
const SEQUENCE_WEIGHT: f32 = 1.0;

const PHRASE_BOOST: f32 = 3.0;
const FUZZY_BOOST: f32 = 1.0;
const WILDCARD_BOOST: f32 = 0.25;
const CHEMICAL_BOOST: f32 = 4.0;

const WEIGHTED_FIELDS: [(RecordField, f32); 15] = [
	(RecordField::EvolfId, IDENTIFIER_WEIGHT),
	(RecordField::ReceptorId, IDENTIFIER_WEIGHT),
	(RecordField::LigandId, IDENTIFIER_WEIGHT),
	(RecordField::Receptor, NAME_WEIGHT),
	(RecordField::Ligand, NAME_WEIGHT),
	(RecordField::UniprotId, CROSS_REFERENCE_WEIGHT),
	(RecordField::ChemblId, CROSS_REFERENCE_WEIGHT),
	(RecordField::Cid, CROSS_REFERENCE_WEIGHT),
	(RecordField::InchiKey, CROSS_REFERENCE_WEIGHT),
	(RecordField::Species, DESCRIPTIVE_WEIGHT),
	(RecordField::ReceptorSubtype, DESCRIPTIVE_WEIGHT),
	(RecordField::IupacName, DESCRIPTIVE_WEIGHT),
	(RecordField::Sequence, SEQUENCE_WEIGHT),
	(RecordField::Smiles, SEQUENCE_WEIGHT),
	(RecordField::Inchi, SEQUENCE_WEIGHT),
];
const WILDCARD_FIELDS: [RecordField; 3] =
	[RecordField::Receptor, RecordField::Ligand, RecordField::Species];
const CHEMICAL_FIELDS: [RecordField; 4] =
	[RecordField::Smiles, RecordField::Inchi, RecordField::InchiKey, RecordField::IupacName];

/// Which backend produced the id order of a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
	/// Ranked ids from the text index.
	Primary,
	/// Ids from the record store's substring or similarity query.
	Fallback,
	/// No search term. The full filtered collection is used.
	None,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
	/// `None` means "use the full filtered collection".
	pub ordered_ids: Option<Vec<String>>,
	pub engine: Engine,
	pub suggestions: Vec<String>,
}
impl Plan {
	pub fn full_collection() -> Self {
		Self { ordered_ids: None, engine: Engine::None, suggestions: Vec::new() }
	}
}

impl CatalogService {
	/// Resolves `term` into an ordered id list.
	///
	/// Text-search trouble of any kind degrades to the store fallback and is only logged. The
	/// only error this returns is a failing record store.
	pub async fn plan(&self, term: &str, filters: &Filters) -> Result<Plan> {
		if term.is_empty() {
			return Ok(Plan::full_collection());
		}

		let mut suggestions = Vec::new();

		if let Some(text_search) = self.backends.text_search.as_ref() {
			let query = build_text_query(term, filters, &self.cfg.search);
			let deadline = Duration::from_millis(self.cfg.search.timeout_ms);

			match tokio::time::timeout(deadline, text_search.search(&query)).await {
				Ok(TextSearchOutcome::Hits(hits)) if !hits.ids.is_empty() => {
					tracing::debug!(
						term,
						hits = hits.ids.len(),
						total_hits = hits.total_hits,
						"Text search answered."
					);

					return Ok(Plan {
						ordered_ids: Some(hits.ids),
						engine: Engine::Primary,
						suggestions: hits.suggestions,
					});
				},
				Ok(TextSearchOutcome::Hits(hits)) => {
					tracing::info!(term, "Text search found nothing. Falling back.");

					suggestions = hits.suggestions;
				},
				Ok(TextSearchOutcome::Unavailable { reason }) => {
					tracing::warn!(term, %reason, "Text search is unavailable. Falling back.");
				},
				Ok(TextSearchOutcome::Failed { reason }) => {
					tracing::warn!(term, %reason, "Text search failed. Falling back.");
				},
				Err(_) => {
					tracing::warn!(
						term,
						timeout_ms = self.cfg.search.timeout_ms,
						"Text search timed out. Falling back."
					);
				},
			}
		}

		let ids = self.fallback_ids(term, filters).await?;

		tracing::debug!(term, hits = ids.len(), "Record store fallback answered.");

		Ok(Plan { ordered_ids: Some(ids), engine: Engine::Fallback, suggestions })
	}

	/// Filters run inside the store query so `max_rows` caps matching records only.
	async fn fallback_ids(&self, term: &str, filters: &Filters) -> Result<Vec<String>> {
		let fallback = &self.cfg.search.fallback;
		let store = self.backends.store.as_ref();

		match fallback.mode {
			FallbackMode::Similarity => {
				let ranked = crate::within_deadline(
					self.store_deadline(),
					store.similarity_ids(term, filters, fallback.min_similarity, fallback.max_rows),
				)
				.await?;

				if let Some(ids) = ranked {
					return Ok(ids);
				}
			},
			FallbackMode::Substring => {},
		}

		crate::within_deadline(
			self.store_deadline(),
			store.substring_ids(term, filters, fallback.max_rows),
		)
		.await
	}
}

/// Builds the weighted query for the text index.
///
/// Phrase matches on identifiers outrank fuzzy matches on every weighted field, which outrank
/// wildcard containment on names. Identifier-safe terms double the identifier phrase boost, and
/// terms with chemical notation add a phrase clause over the chemical fields.
pub fn build_text_query(term: &str, filters: &Filters, cfg: &Search) -> TextQuery {
	let identifier_boost =
		if term::is_identifier_safe(term) { PHRASE_BOOST * 2.0 } else { PHRASE_BOOST };
	let mut clauses = vec![
		MatchClause {
			kind: MatchKind::Phrase,
			fields: weighted(|weight| weight >= IDENTIFIER_WEIGHT),
			boost: identifier_boost,
		},
		MatchClause { kind: MatchKind::Fuzzy, fields: weighted(|_| true), boost: FUZZY_BOOST },
		MatchClause {
			kind: MatchKind::Wildcard,
			fields: pick(&WILDCARD_FIELDS),
			boost: WILDCARD_BOOST,
		},
	];

	if term::has_chemical_notation(term) {
		clauses.push(MatchClause {
			kind: MatchKind::Phrase,
			fields: pick(&CHEMICAL_FIELDS),
			boost: CHEMICAL_BOOST,
		});
	}

	TextQuery {
		term: term.to_string(),
		clauses,
		filters: filters.clone(),
		size: cfg.max_hits,
		suggest: cfg.max_suggestions > 0,
	}
}

fn weighted(keep: impl Fn(f32) -> bool) -> Vec<WeightedField> {
	WEIGHTED_FIELDS
		.iter()
		.filter(|(_, weight)| keep(*weight))
		.map(|(field, weight)| WeightedField { field: *field, weight: *weight })
		.collect()
}

fn pick(fields: &[RecordField]) -> Vec<WeightedField> {
	fields
		.iter()
		.filter_map(|field| {
			WEIGHTED_FIELDS
				.iter()
				.find(|(candidate, _)| candidate == field)
				.map(|(field, weight)| WeightedField { field: *field, weight: *weight })
		})
		.collect()
}

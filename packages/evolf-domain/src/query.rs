//! Backend-neutral description of a ranked free-text query.
//!
//! The planner decides which fields and match kinds carry weight; a text-search backend only
//! renders this description into its own query language.

use serde::Serialize;

use crate::{Filters, RecordField};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
	/// Exact phrase match.
	Phrase,
	/// Edit-distance tolerant term match.
	Fuzzy,
	/// Case-insensitive `*term*` containment.
	Wildcard,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WeightedField {
	pub field: RecordField,
	pub weight: f32,
}

/// One scored alternative. Clauses are OR'ed; at least one must match.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchClause {
	pub kind: MatchKind,
	pub fields: Vec<WeightedField>,
	pub boost: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextQuery {
	pub term: String,
	pub clauses: Vec<MatchClause>,
	/// Hard, unscored clauses.
	pub filters: Filters,
	pub size: u32,
	/// Ask the backend for prefix completions of `term`.
	pub suggest: bool,
}
impl TextQuery {
	pub fn clause(&self, kind: MatchKind) -> impl Iterator<Item = &MatchClause> {
		self.clauses.iter().filter(move |clause| clause.kind == kind)
	}
}

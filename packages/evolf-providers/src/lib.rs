pub mod elasticsearch;

mod error;

pub use error::{Error, Result};

/// Ranked identifiers and completions returned by a text index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextHits {
	/// Record identifiers in rank order, without duplicates.
	pub ids: Vec<String>,
	pub suggestions: Vec<String>,
	pub total_hits: u64,
}

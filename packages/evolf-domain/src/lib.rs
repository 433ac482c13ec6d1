pub mod field;
pub mod filter;
pub mod query;
pub mod sort;
pub mod term;

pub use field::RecordField;
pub use filter::Filters;
pub use query::{MatchClause, MatchKind, TextQuery, WeightedField};
pub use sort::{SortOrder, SortSpec};

pub mod backends;
pub mod dataset;
pub mod details;
pub mod facets;
pub mod merge;
pub mod pager;
pub mod planner;
pub mod request;
pub mod search;

mod error;

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

pub use backends::{ElasticsearchSearch, PgRecordStore};
pub use dataset::{DatasetItem, DatasetResponse};
pub use details::RecordDetail;
pub use error::{Error, Result};
use evolf_config::Config;
use evolf_domain::{Filters, TextQuery};
use evolf_providers::TextHits;
use evolf_storage::{db::Db, models::Record};
pub use facets::{FilterOptions, Statistics};
pub use pager::Pagination;
pub use planner::{Engine, Plan};
pub use request::{DatasetQuery, DatasetRequest};
pub use search::{TextSearchHit, TextSearchRequest, TextSearchResponse};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only access to persisted records.
///
/// Every method returns records in the store's natural order unless documented otherwise. Unknown
/// filter values match nothing; they are never an error.
pub trait RecordStore
where
	Self: Send + Sync,
{
	fn find_by_ids<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, Result<Vec<Record>>>;

	fn query_filtered<'a>(&'a self, filters: &'a Filters) -> BoxFuture<'a, Result<Vec<Record>>>;

	fn find_by_id<'a>(&'a self, evolf_id: &'a str) -> BoxFuture<'a, Result<Option<Record>>>;

	/// Ids of records containing `term` in any searchable field, case-insensitively, that also
	/// pass `filters`. `limit` caps the filtered matches.
	fn substring_ids<'a>(
		&'a self,
		term: &'a str,
		filters: &'a Filters,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<String>>>;

	/// Ranked fallback over records passing `filters`.
	///
	/// Returns every substring match regardless of its similarity, plus any other record whose
	/// receptor name is more similar to `term` than `min_similarity`. The threshold therefore
	/// only excludes records that are not substring matches. Order is descending receptor
	/// similarity, then store order. `None` when the store has no similarity function.
	fn similarity_ids<'a>(
		&'a self,
		term: &'a str,
		filters: &'a Filters,
		min_similarity: f32,
		limit: u32,
	) -> BoxFuture<'a, Result<Option<Vec<String>>>>;
}

pub trait TextSearch
where
	Self: Send + Sync,
{
	fn search<'a>(&'a self, query: &'a TextQuery) -> BoxFuture<'a, TextSearchOutcome>;
}

/// What a text-search call produced. Zero hits is `Hits` with empty ids, never `Unavailable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSearchOutcome {
	Hits(TextHits),
	/// The backend could not be reached or is not serving.
	Unavailable { reason: String },
	/// The backend answered with something unusable.
	Failed { reason: String },
}

#[derive(Clone)]
pub struct Backends {
	pub store: Arc<dyn RecordStore>,
	pub text_search: Option<Arc<dyn TextSearch>>,
}
impl Backends {
	pub fn new(store: Arc<dyn RecordStore>, text_search: Option<Arc<dyn TextSearch>>) -> Self {
		Self { store, text_search }
	}

	/// Postgres for records, plus Elasticsearch when configured.
	pub async fn connect(cfg: &Config, db: Db) -> Result<Self> {
		let store = PgRecordStore::new(db).await?;
		let text_search = match cfg.search.elasticsearch.as_ref() {
			Some(es) => {
				let adapter = ElasticsearchSearch::connect(es, &cfg.search).await?;

				Some(Arc::new(adapter) as Arc<dyn TextSearch>)
			},
			None => {
				tracing::info!("No text index configured. Search terms use the record store.");

				None
			},
		};

		Ok(Self { store: Arc::new(store), text_search })
	}
}

pub struct CatalogService {
	pub cfg: Config,
	pub backends: Backends,
}
impl CatalogService {
	pub async fn new(cfg: Config, db: Db) -> Result<Self> {
		let backends = Backends::connect(&cfg, db).await?;

		Ok(Self { cfg, backends })
	}

	pub fn with_backends(cfg: Config, backends: Backends) -> Self {
		Self { cfg, backends }
	}

	pub(crate) fn store_deadline(&self) -> Duration {
		Duration::from_millis(self.cfg.search.store_timeout_ms)
	}
}

/// Bounds one record-store call. Running out of time fails the request.
pub(crate) async fn within_deadline<T, F>(deadline: Duration, fut: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	tokio::time::timeout(deadline, fut).await.map_err(|_| Error::Storage {
		message: format!("Record store did not answer within {} ms.", deadline.as_millis()),
	})?
}

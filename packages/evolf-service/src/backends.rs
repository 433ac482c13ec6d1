//! Production adapters: Postgres for records and Elasticsearch for ranked text search.

use evolf_config::{Elasticsearch, Search};
use evolf_domain::{Filters, TextQuery};
use evolf_providers::elasticsearch::ElasticsearchClient;
use evolf_storage::{db::Db, models::Record, queries};

use crate::{BoxFuture, Error, RecordStore, Result, TextSearch, TextSearchOutcome};

pub struct PgRecordStore {
	db: Db,
	trigram: bool,
}
impl PgRecordStore {
	pub async fn new(db: Db) -> Result<Self> {
		let trigram = queries::trigram_available(&db).await?;

		if !trigram {
			tracing::warn!("pg_trgm is missing. Similarity fallback uses substring matching.");
		}

		Ok(Self { db, trigram })
	}
}
impl RecordStore for PgRecordStore {
	fn find_by_ids<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, Result<Vec<Record>>> {
		Box::pin(async move { queries::fetch_by_ids(&self.db, ids).await.map_err(Error::from) })
	}

	fn query_filtered<'a>(&'a self, filters: &'a Filters) -> BoxFuture<'a, Result<Vec<Record>>> {
		Box::pin(
			async move { queries::fetch_filtered(&self.db, filters).await.map_err(Error::from) },
		)
	}

	fn find_by_id<'a>(&'a self, evolf_id: &'a str) -> BoxFuture<'a, Result<Option<Record>>> {
		Box::pin(async move { queries::fetch_by_id(&self.db, evolf_id).await.map_err(Error::from) })
	}

	fn substring_ids<'a>(
		&'a self,
		term: &'a str,
		filters: &'a Filters,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(async move {
			queries::substring_ids(&self.db, term, filters, limit).await.map_err(Error::from)
		})
	}

	fn similarity_ids<'a>(
		&'a self,
		term: &'a str,
		filters: &'a Filters,
		min_similarity: f32,
		limit: u32,
	) -> BoxFuture<'a, Result<Option<Vec<String>>>> {
		Box::pin(async move {
			if !self.trigram {
				return Ok(None);
			}

			queries::similarity_ids(&self.db, term, filters, min_similarity, limit)
				.await
				.map(Some)
				.map_err(Error::from)
		})
	}
}

pub struct ElasticsearchSearch {
	client: ElasticsearchClient,
}
impl ElasticsearchSearch {
	pub fn new(cfg: &Elasticsearch, search: &Search) -> Result<Self> {
		let client = ElasticsearchClient::new(cfg, search.timeout_ms, search.max_suggestions)?;

		Ok(Self { client })
	}

	/// Builds the client and probes the cluster once. An unreachable cluster is logged, not fatal.
	pub async fn connect(cfg: &Elasticsearch, search: &Search) -> Result<Self> {
		let adapter = Self::new(cfg, search)?;

		match adapter.client.ping().await {
			Ok(()) => tracing::info!(index = adapter.client.index(), "Text index is reachable."),
			Err(err) => tracing::warn!(
				index = adapter.client.index(),
				error = %err,
				"Text index is unreachable. Searches will fall back to the record store."
			),
		}

		Ok(adapter)
	}
}
impl TextSearch for ElasticsearchSearch {
	fn search<'a>(&'a self, query: &'a TextQuery) -> BoxFuture<'a, TextSearchOutcome> {
		Box::pin(async move {
			match self.client.search(query).await {
				Ok(hits) => TextSearchOutcome::Hits(hits),
				Err(err) if err.is_unavailable() =>
					TextSearchOutcome::Unavailable { reason: err.to_string() },
				Err(err) => TextSearchOutcome::Failed { reason: err.to_string() },
			}
		})
	}
}

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub search: Search,
	pub pagination: Pagination,
	#[serde(default)]
	pub security: Security,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	/// Deadline for one text-search call, in milliseconds.
	pub timeout_ms: u64,
	/// Deadline for one record-store call, in milliseconds.
	pub store_timeout_ms: u64,
	/// Upper bound on identifiers requested from the text index.
	pub max_hits: u32,
	#[serde(default = "default_max_suggestions")]
	pub max_suggestions: u32,
	/// Optional. Without it every search term goes straight to the store fallback.
	pub elasticsearch: Option<Elasticsearch>,
	#[serde(default)]
	pub fallback: SearchFallback,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Elasticsearch {
	pub url: String,
	pub index: String,
	pub username: Option<String>,
	pub password: Option<String>,
	#[serde(default)]
	pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchFallback {
	pub mode: FallbackMode,
	pub min_similarity: f32,
	pub max_rows: u32,
}
impl Default for SearchFallback {
	fn default() -> Self {
		Self { mode: FallbackMode::Similarity, min_similarity: 0.2, max_rows: 1_000 }
	}
}

/// How the record store answers a search term when the text index does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
	/// Substring matches plus trigram-similar receptor names, most similar first.
	Similarity,
	/// Substring matches in store order.
	Substring,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
	pub default_page_size: u32,
	pub max_page_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Security {
	pub bind_localhost_only: bool,
}
impl Default for Security {
	fn default() -> Self {
		Self { bind_localhost_only: true }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_max_suggestions() -> u32 {
	10
}

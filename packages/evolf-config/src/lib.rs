mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Elasticsearch, FallbackMode, Pagination, Postgres, Search, SearchFallback, Security,
	Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		Error::ParseConfig { source, .. } =>
			Error::ParseConfig { path: path.to_path_buf(), source },
		other => other,
	})
}

/// Parses, normalizes, and validates a config document.
pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.search.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.store_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.store_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_hits == 0 {
		return Err(Error::Validation {
			message: "search.max_hits must be greater than zero.".to_string(),
		});
	}

	if let Some(es) = cfg.search.elasticsearch.as_ref() {
		for (label, value) in
			[("search.elasticsearch.url", &es.url), ("search.elasticsearch.index", &es.index)]
		{
			if value.trim().is_empty() {
				return Err(Error::Validation { message: format!("{label} must be non-empty.") });
			}
		}

		if es.password.is_some() && es.username.is_none() {
			return Err(Error::Validation {
				message: "search.elasticsearch.password requires search.elasticsearch.username."
					.to_string(),
			});
		}
	}

	let fallback = &cfg.search.fallback;

	if !fallback.min_similarity.is_finite() {
		return Err(Error::Validation {
			message: "search.fallback.min_similarity must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&fallback.min_similarity) {
		return Err(Error::Validation {
			message: "search.fallback.min_similarity must be in the range 0.0-1.0.".to_string(),
		});
	}
	if fallback.max_rows == 0 {
		return Err(Error::Validation {
			message: "search.fallback.max_rows must be greater than zero.".to_string(),
		});
	}
	if cfg.pagination.default_page_size == 0 {
		return Err(Error::Validation {
			message: "pagination.default_page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.pagination.max_page_size == 0 {
		return Err(Error::Validation {
			message: "pagination.max_page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.pagination.default_page_size > cfg.pagination.max_page_size {
		return Err(Error::Validation {
			message: "pagination.default_page_size must not exceed pagination.max_page_size."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if let Some(es) = cfg.search.elasticsearch.as_mut() {
		let trimmed = es.url.trim().trim_end_matches('/').to_string();

		es.url = trimmed;

		if es.username.as_deref().map(|value| value.trim().is_empty()).unwrap_or(false) {
			es.username = None;
		}
		if es.password.as_deref().map(|value| value.is_empty()).unwrap_or(false) {
			es.password = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const MINIMAL: &str = r#"
[service]
http_bind = "127.0.0.1:8080"

[storage.postgres]
dsn = "postgres://localhost/evolf"
pool_max_conns = 4

[search]
timeout_ms = 500
store_timeout_ms = 5000
max_hits = 1000

[search.elasticsearch]
url = "http://localhost:9200/"
index = "evolf"
username = "  "
password = ""

[pagination]
default_page_size = 20
max_page_size = 1000
"#;

	#[test]
	fn normalizes_blank_credentials_and_trailing_slash() {
		let cfg = parse(MINIMAL).expect("Config should parse.");
		let es = cfg.search.elasticsearch.expect("Elasticsearch section should be present.");

		assert_eq!(es.url, "http://localhost:9200");
		assert!(es.username.is_none());
		assert!(es.password.is_none());
	}

	#[test]
	fn fills_defaults() {
		let cfg = parse(MINIMAL).expect("Config should parse.");

		assert_eq!(cfg.service.log_level, "info");
		assert_eq!(cfg.search.max_suggestions, 10);
		assert_eq!(cfg.search.fallback.mode, FallbackMode::Similarity);
		assert!(cfg.security.bind_localhost_only);
	}
}

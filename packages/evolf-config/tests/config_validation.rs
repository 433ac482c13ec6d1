use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use evolf_config::{Config, Error, FallbackMode};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &[&str], key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let mut table = root.as_table_mut().expect("Template config must be a table.");

	for name in section {
		table = table
			.get_mut(*name)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Template config must include [{name}]."));
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn sample_toml_without(section: &str) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let search = root
		.get_mut("search")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [search].");

	search.remove(section);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("evolf_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_err(payload: String) -> Error {
	let path = write_temp_config(payload);
	let result = evolf_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result.expect_err("Expected a validation error.")
}

fn base_config() -> Config {
	evolf_config::parse(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn sample_config_loads() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML.to_string());
	let result = evolf_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Sample config should load.");

	assert_eq!(cfg.pagination.default_page_size, 20);
	assert_eq!(cfg.search.elasticsearch.as_ref().map(|es| es.index.as_str()), Some("evolf"));
}

#[test]
fn missing_file_reports_path() {
	let path = env::temp_dir().join("evolf_config_test_missing.toml");
	let err = evolf_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn elasticsearch_section_is_optional() {
	let path = write_temp_config(sample_toml_without("elasticsearch"));
	let result = evolf_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Config without elasticsearch should load.");

	assert!(cfg.search.elasticsearch.is_none());
}

#[test]
fn fallback_section_defaults_when_absent() {
	let path = write_temp_config(sample_toml_without("fallback"));
	let result = evolf_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Config without fallback should load.");

	assert_eq!(cfg.search.fallback.mode, FallbackMode::Similarity);
	assert_eq!(cfg.search.fallback.max_rows, 1_000);
}

#[test]
fn search_timeout_must_be_positive() {
	let err = load_err(sample_toml_with(&["search"], "timeout_ms", Value::Integer(0)));

	assert!(
		err.to_string().contains("search.timeout_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn fallback_mode_must_be_known() {
	let err = load_err(sample_toml_with(
		&["search", "fallback"],
		"mode",
		Value::String("fuzzy".to_string()),
	));

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error: {err}");
	assert!(err.to_string().contains("unknown variant `fuzzy`"), "Unexpected error: {err}");
}

#[test]
fn fallback_mode_selects_substring_matching() {
	let path = write_temp_config(sample_toml_with(
		&["search", "fallback"],
		"mode",
		Value::String("substring".to_string()),
	));
	let result = evolf_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	assert_eq!(result.expect("Config should load.").search.fallback.mode, FallbackMode::Substring);
}

#[test]
fn min_similarity_must_be_in_unit_range() {
	let err = load_err(sample_toml_with(
		&["search", "fallback"],
		"min_similarity",
		Value::Float(1.5),
	));

	assert!(
		err.to_string().contains("search.fallback.min_similarity must be in the range 0.0-1.0."),
		"Unexpected error: {err}"
	);
}

#[test]
fn default_page_size_cannot_exceed_max() {
	let err =
		load_err(sample_toml_with(&["pagination"], "default_page_size", Value::Integer(5_000)));

	assert!(
		err.to_string()
			.contains("pagination.default_page_size must not exceed pagination.max_page_size."),
		"Unexpected error: {err}"
	);
}

#[test]
fn elasticsearch_index_must_be_non_empty() {
	let err = load_err(sample_toml_with(
		&["search", "elasticsearch"],
		"index",
		Value::String("  ".to_string()),
	));

	assert!(
		err.to_string().contains("search.elasticsearch.index must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn validate_rejects_zero_pool_size() {
	let mut cfg = base_config();

	cfg.storage.postgres.pool_max_conns = 0;

	let err = evolf_config::validate(&cfg).expect_err("Expected pool size validation error.");

	assert!(
		err.to_string().contains("storage.postgres.pool_max_conns must be greater than zero."),
		"Unexpected error: {err}"
	);
}

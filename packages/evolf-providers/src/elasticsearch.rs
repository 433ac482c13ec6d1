use std::{collections::HashSet, time::Duration};

use reqwest::Client;
use serde_json::{Map, Value};

use evolf_domain::{MatchClause, MatchKind, RecordField, TextQuery};

use crate::{Error, Result, TextHits};

pub const SUGGEST_NAME: &str = "autocomplete_suggest";
pub const SUGGEST_FIELD: &str = "suggest";

pub struct ElasticsearchClient {
	client: Client,
	url: String,
	index: String,
	username: Option<String>,
	password: Option<String>,
	max_suggestions: u32,
}
impl ElasticsearchClient {
	pub fn new(
		cfg: &evolf_config::Elasticsearch,
		timeout_ms: u64,
		max_suggestions: u32,
	) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(timeout_ms))
			.danger_accept_invalid_certs(cfg.accept_invalid_certs)
			.build()?;

		Ok(Self {
			client,
			url: cfg.url.clone(),
			index: cfg.index.clone(),
			username: cfg.username.clone(),
			password: cfg.password.clone(),
			max_suggestions,
		})
	}

	pub fn index(&self) -> &str {
		&self.index
	}

	/// Cheap reachability probe against the cluster root.
	pub async fn ping(&self) -> Result<()> {
		let res = self.authorize(self.client.head(&self.url)).send().await?;

		if !res.status().is_success() {
			return Err(Error::Status { status: res.status().as_u16() });
		}

		Ok(())
	}

	pub async fn search(&self, query: &TextQuery) -> Result<TextHits> {
		let url = format!("{}/{}/_search", self.url, self.index);
		let body = render_query(query, self.max_suggestions);
		let res = self.authorize(self.client.post(url)).json(&body).send().await?;
		let status = res.status();

		if !status.is_success() {
			return Err(Error::Status { status: status.as_u16() });
		}

		let json: Value = res.json().await?;

		parse_search_response(&json, self.max_suggestions as usize)
	}

	fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
		match self.username.as_deref() {
			Some(username) => builder.basic_auth(username, self.password.as_deref()),
			None => builder,
		}
	}
}

/// Renders a typed query into Elasticsearch query DSL.
pub fn render_query(query: &TextQuery, max_suggestions: u32) -> Value {
	let mut should = Vec::new();

	for clause in &query.clauses {
		render_clause(&query.term, clause, &mut should);
	}

	let filter = query
		.filters
		.clauses()
		.map(|(field, value)| {
			serde_json::json!({
				"term": { field.index_name(): { "value": value, "case_insensitive": true } }
			})
		})
		.collect::<Vec<_>>();
	let mut body = serde_json::json!({
		"query": {
			"bool": {
				"should": should,
				"minimum_should_match": 1,
				"filter": filter,
			}
		},
		"_source": [RecordField::EvolfId.index_name()],
		"size": query.size,
		"track_total_hits": true,
	});

	if query.suggest
		&& let Some(obj) = body.as_object_mut()
	{
		obj.insert(
			"suggest".to_string(),
			serde_json::json!({
				SUGGEST_NAME: {
					"prefix": query.term,
					"completion": {
						"field": SUGGEST_FIELD,
						"size": max_suggestions,
						"skip_duplicates": true,
					}
				}
			}),
		);
	}

	body
}

fn render_clause(term: &str, clause: &MatchClause, out: &mut Vec<Value>) {
	match clause.kind {
		MatchKind::Phrase => out.push(serde_json::json!({
			"multi_match": {
				"query": term,
				"type": "phrase",
				"fields": weighted_fields(clause),
				"boost": clause.boost,
			}
		})),
		MatchKind::Fuzzy => out.push(serde_json::json!({
			"multi_match": {
				"query": term,
				"type": "best_fields",
				"fuzziness": "AUTO",
				"fields": weighted_fields(clause),
				"boost": clause.boost,
			}
		})),
		MatchKind::Wildcard => {
			let pattern = format!("*{}*", escape_wildcard(term));

			for weighted in &clause.fields {
				let mut inner = Map::new();

				inner.insert("value".to_string(), Value::from(pattern.clone()));
				inner.insert("case_insensitive".to_string(), Value::Bool(true));
				inner.insert("boost".to_string(), Value::from(clause.boost * weighted.weight));

				let mut wildcard = Map::new();

				wildcard.insert(weighted.field.index_name().to_string(), Value::Object(inner));
				out.push(serde_json::json!({ "wildcard": wildcard }));
			}
		},
	}
}

fn weighted_fields(clause: &MatchClause) -> Vec<String> {
	clause
		.fields
		.iter()
		.map(|weighted| format!("{}^{}", weighted.field.index_name(), weighted.weight))
		.collect()
}

fn escape_wildcard(term: &str) -> String {
	let mut out = String::with_capacity(term.len());

	for ch in term.chars() {
		if matches!(ch, '*' | '?' | '\\') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}

pub fn parse_search_response(json: &Value, max_suggestions: usize) -> Result<TextHits> {
	let hits = json.get("hits").ok_or_else(|| Error::InvalidResponse {
		message: "Search response is missing hits.".to_string(),
	})?;
	let entries = hits.get("hits").and_then(Value::as_array).ok_or_else(|| {
		Error::InvalidResponse { message: "Search response is missing hits array.".to_string() }
	})?;
	let mut seen = HashSet::new();
	let mut ids = Vec::with_capacity(entries.len());

	for entry in entries {
		let Some(id) = entry
			.get("_source")
			.and_then(|source| source.get(RecordField::EvolfId.index_name()))
			.and_then(Value::as_str)
			.map(str::trim)
			.filter(|id| !id.is_empty())
		else {
			continue;
		};

		if seen.insert(id.to_string()) {
			ids.push(id.to_string());
		}
	}

	let total_hits = match hits.get("total") {
		Some(Value::Object(total)) => total.get("value").and_then(Value::as_u64),
		Some(total) => total.as_u64(),
		None => None,
	}
	.unwrap_or(ids.len() as u64);
	let mut suggestions = Vec::new();
	let mut seen = HashSet::new();
	let options = json
		.get("suggest")
		.and_then(|suggest| suggest.get(SUGGEST_NAME))
		.and_then(Value::as_array)
		.into_iter()
		.flatten()
		.filter_map(|entry| entry.get("options").and_then(Value::as_array))
		.flatten();

	for option in options {
		if suggestions.len() >= max_suggestions {
			break;
		}

		let Some(text) = option.get("text").and_then(Value::as_str).map(str::trim) else {
			continue;
		};

		if !text.is_empty() && seen.insert(text.to_string()) {
			suggestions.push(text.to_string());
		}
	}

	Ok(TextHits { ids, suggestions, total_hits })
}

#[cfg(test)]
mod tests {
	use evolf_domain::{Filters, WeightedField};

	use super::*;

	fn sample_query() -> TextQuery {
		TextQuery {
			term: "OR1*A1".to_string(),
			clauses: vec![
				MatchClause {
					kind: MatchKind::Phrase,
					fields: vec![WeightedField { field: RecordField::EvolfId, weight: 5.0 }],
					boost: 3.0,
				},
				MatchClause {
					kind: MatchKind::Fuzzy,
					fields: vec![
						WeightedField { field: RecordField::Receptor, weight: 4.0 },
						WeightedField { field: RecordField::Sequence, weight: 1.0 },
					],
					boost: 1.0,
				},
				MatchClause {
					kind: MatchKind::Wildcard,
					fields: vec![
						WeightedField { field: RecordField::Receptor, weight: 4.0 },
						WeightedField { field: RecordField::Ligand, weight: 4.0 },
					],
					boost: 0.25,
				},
			],
			filters: Filters::from_raw(Some("Human"), None, Some("Wild-type")),
			size: 50,
			suggest: true,
		}
	}

	#[test]
	fn renders_weighted_clauses_and_hard_filters() {
		let body = render_query(&sample_query(), 5);
		let should = body["query"]["bool"]["should"].as_array().expect("should must be an array");

		assert_eq!(should.len(), 4);
		assert_eq!(should[0]["multi_match"]["type"], "phrase");
		assert_eq!(should[0]["multi_match"]["fields"][0], "EvOlf_ID^5");
		assert_eq!(should[1]["multi_match"]["fuzziness"], "AUTO");
		assert_eq!(should[1]["multi_match"]["fields"][1], "Sequence^1");
		assert_eq!(should[2]["wildcard"]["Receptor"]["value"], "*OR1\\*A1*");
		assert_eq!(should[3]["wildcard"]["Ligand"]["boost"], 1.0);

		let filter = body["query"]["bool"]["filter"].as_array().expect("filter must be an array");

		assert_eq!(filter.len(), 2);
		assert_eq!(filter[0]["term"]["Species"]["value"], "Human");
		assert_eq!(filter[1]["term"]["Mutation_Status"]["case_insensitive"], true);
		assert_eq!(body["size"], 50);
		assert_eq!(body["suggest"][SUGGEST_NAME]["prefix"], "OR1*A1");
		assert_eq!(body["suggest"][SUGGEST_NAME]["completion"]["size"], 5);
	}

	#[test]
	fn omits_suggest_when_not_requested() {
		let mut query = sample_query();

		query.suggest = false;

		let body = render_query(&query, 5);

		assert!(body.get("suggest").is_none());
	}

	#[test]
	fn parses_ids_in_rank_order_without_duplicates() {
		let json = serde_json::json!({
			"hits": {
				"total": { "value": 4, "relation": "eq" },
				"hits": [
					{ "_source": { "EvOlf_ID": "E5" } },
					{ "_source": { "EvOlf_ID": "E2" } },
					{ "_source": {} },
					{ "_source": { "EvOlf_ID": "E5" } },
					{ "_source": { "EvOlf_ID": "E9" } }
				]
			},
			"suggest": {
				"autocomplete_suggest": [{
					"options": [
						{ "text": "OR1A1" },
						{ "text": "OR1A1" },
						{ "text": "OR1A2" },
						{ "text": "OR1A3" }
					]
				}]
			}
		});
		let hits = parse_search_response(&json, 2).expect("parse failed");

		assert_eq!(hits.ids, vec!["E5", "E2", "E9"]);
		assert_eq!(hits.total_hits, 4);
		assert_eq!(hits.suggestions, vec!["OR1A1", "OR1A2"]);
	}

	#[test]
	fn rejects_responses_without_hits() {
		let json = serde_json::json!({ "error": "index_not_found_exception" });
		let err = parse_search_response(&json, 5).expect_err("Expected invalid response.");

		assert!(!err.is_unavailable());
	}
}

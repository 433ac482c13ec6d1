use axum::{
	Json, Router,
	http::StatusCode,
	response::IntoResponse,
	routing,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::oneshot};

use evolf_domain::{Filters, MatchClause, MatchKind, RecordField, TextQuery, WeightedField};
use evolf_providers::elasticsearch::ElasticsearchClient;

fn es_config(url: String) -> evolf_config::Elasticsearch {
	evolf_config::Elasticsearch {
		url,
		index: "evolf".to_string(),
		username: Some("elastic".to_string()),
		password: Some("secret".to_string()),
		accept_invalid_certs: false,
	}
}

fn query() -> TextQuery {
	TextQuery {
		term: "vanillin".to_string(),
		clauses: vec![MatchClause {
			kind: MatchKind::Fuzzy,
			fields: vec![WeightedField { field: RecordField::Ligand, weight: 4.0 }],
			boost: 1.0,
		}],
		filters: Filters::default(),
		size: 10,
		suggest: true,
	}
}

async fn start_server(app: Router) -> (String, oneshot::Sender<()>) {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind mock server.");
	let addr = listener.local_addr().expect("Failed to read mock server address.");
	let (tx, rx) = oneshot::channel();
	let server = axum::serve(listener, app).with_graceful_shutdown(async move {
		let _ = rx.await;
	});

	tokio::spawn(async move {
		let _ = server.into_future().await;
	});

	(format!("http://{addr}"), tx)
}

async fn search_handler(Json(payload): Json<Value>) -> impl IntoResponse {
	if payload["query"]["bool"]["should"].as_array().map(Vec::is_empty).unwrap_or(true) {
		return StatusCode::BAD_REQUEST.into_response();
	}

	Json(serde_json::json!({
		"hits": {
			"total": { "value": 2, "relation": "eq" },
			"hits": [
				{ "_source": { "EvOlf_ID": "E7" } },
				{ "_source": { "EvOlf_ID": "E3" } }
			]
		},
		"suggest": {
			"autocomplete_suggest": [{ "options": [{ "text": "vanillin" }] }]
		}
	}))
	.into_response()
}

#[tokio::test]
async fn search_returns_ranked_ids_and_suggestions() {
	let app = Router::new()
		.route("/evolf/_search", routing::post(search_handler))
		.route("/", routing::head(|| async { StatusCode::OK }));
	let (url, shutdown) = start_server(app).await;
	let client =
		ElasticsearchClient::new(&es_config(url), 2_000, 5).expect("Failed to build client.");

	client.ping().await.expect("Ping should succeed.");

	let hits = client.search(&query()).await.expect("Search should succeed.");

	assert_eq!(hits.ids, vec!["E7", "E3"]);
	assert_eq!(hits.total_hits, 2);
	assert_eq!(hits.suggestions, vec!["vanillin"]);

	let _ = shutdown.send(());
}

#[tokio::test]
async fn server_errors_count_as_unavailable() {
	let app = Router::new().route(
		"/evolf/_search",
		routing::post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
	);
	let (url, shutdown) = start_server(app).await;
	let client =
		ElasticsearchClient::new(&es_config(url), 2_000, 5).expect("Failed to build client.");
	let err = client.search(&query()).await.expect_err("Expected a status error.");

	assert!(err.is_unavailable(), "Unexpected error: {err}");

	let _ = shutdown.send(());
}

#[tokio::test]
async fn client_errors_are_not_unavailability() {
	let app =
		Router::new().route("/evolf/_search", routing::post(|| async { StatusCode::BAD_REQUEST }));
	let (url, shutdown) = start_server(app).await;
	let client =
		ElasticsearchClient::new(&es_config(url), 2_000, 5).expect("Failed to build client.");
	let err = client.search(&query()).await.expect_err("Expected a status error.");

	assert!(!err.is_unavailable(), "Unexpected error: {err}");

	let _ = shutdown.send(());
}

#[tokio::test]
async fn refused_connections_count_as_unavailable() {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind port.");
	let addr = listener.local_addr().expect("Failed to read address.");

	drop(listener);

	let client = ElasticsearchClient::new(&es_config(format!("http://{addr}")), 2_000, 5)
		.expect("Failed to build client.");
	let err = client.search(&query()).await.expect_err("Expected a connection error.");

	assert!(err.is_unavailable(), "Unexpected error: {err}");
}

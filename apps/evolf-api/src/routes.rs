use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;

use evolf_service::{
	DatasetRequest, DatasetResponse, Error, RecordDetail, TextSearchRequest, TextSearchResponse,
};

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, None),
			Error::NotFound { message } =>
				Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			Error::Provider { message } => {
				tracing::error!(error = %message, "Text search provider error.");

				Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"PROVIDER_ERROR",
					"Search provider failure.",
					None,
				)
			},
			Error::Storage { message } => {
				tracing::error!(error = %message, "Record store error.");

				Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"STORAGE_ERROR",
					"Record store failure.",
					None,
				)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/dataset", get(dataset))
		.route("/dataset/details/{evolf_id}", get(dataset_details))
		.route("/search", get(search))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn dataset(
	State(state): State<AppState>,
	Query(query): Query<DatasetRequest>,
) -> Result<Json<DatasetResponse>, ApiError> {
	let response = state.service.dataset(query).await?;

	Ok(Json(response))
}

async fn dataset_details(
	State(state): State<AppState>,
	Path(evolf_id): Path<String>,
) -> Result<Json<RecordDetail>, ApiError> {
	let response = state.service.record(&evolf_id).await?;

	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	Query(query): Query<TextSearchRequest>,
) -> Result<Json<TextSearchResponse>, ApiError> {
	let response = state.service.search(query).await?;

	Ok(Json(response))
}

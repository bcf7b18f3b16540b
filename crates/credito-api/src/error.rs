//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has the same shape: `{"message": "..."}`. That includes
//! malformed requests: handlers take [`JsonBody`], [`QueryParams`] and
//! [`PathParam`] instead of the bare axum extractors so a rejection comes
//! back as an [`ApiError::BadRequest`].

use axum::{
  Json,
  extract::{
    FromRequest, FromRequestParts,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::{IntoResponse, Response},
};
use credito_core::store::StoreError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error; anything outside the core taxonomy is an
  /// internal failure.
  pub fn from_store<E: StoreError>(e: E) -> Self {
    match e.as_core() {
      Some(credito_core::Error::ClientNotFound(_)) => {
        ApiError::NotFound(CLIENT_NOT_FOUND.to_owned())
      }
      Some(dup @ credito_core::Error::DuplicateCpf(_)) => {
        ApiError::Conflict(dup.to_string())
      }
      Some(range @ credito_core::Error::AmountOutOfRange { .. }) => {
        ApiError::BadRequest(range.to_string())
      }
      None => ApiError::Store(Box::new(e)),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

// ─── Extractors ───────────────────────────────────────────────────────────────

/// [`axum::Json`] with an [`ApiError`] rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// [`axum::extract::Query`] with an [`ApiError`] rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

/// [`axum::extract::Path`] with an [`ApiError`] rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);

// ─── Bodies ───────────────────────────────────────────────────────────────────

/// Body message for any client lookup that comes back empty.
pub const CLIENT_NOT_FOUND: &str = "Cliente não encontrado!";

/// `{"message": ...}`, used for confirmations as well as errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct Message {
  #[schema(example = "Cliente não encontrado!")]
  pub message: String,
}

pub fn message(text: impl Into<String>) -> Json<Message> {
  Json(Message { message: text.into() })
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, text) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, message(text)).into_response()
  }
}

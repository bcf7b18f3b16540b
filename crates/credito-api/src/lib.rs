//! JSON REST API for the client and card directories.
//!
//! Exposes one axum [`Router`] per directory, each backed by any
//! implementation of the matching store trait. TLS, auth, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = credito_api::clients_router(Arc::new(store));
//! ```

pub mod cards;
pub mod clients;
pub mod error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  http::header,
  response::IntoResponse,
  routing::get,
};
use credito_core::{
  card::{Card, CardBrand, ClientCard, NewCard},
  client::{Client, NewClient},
  store::{CardStore, ClientStore},
};
use serde::Deserialize;
use utoipa::OpenApi;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration for one directory service.
#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

// ─── OpenAPI ──────────────────────────────────────────────────────────────────

/// OpenAPI document for the Client Directory, served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
  info(title = "Client Directory", description = "Cadastro de clientes"),
  paths(
    clients::list,
    clients::create,
    clients::get_one,
    clients::update,
    clients::delete
  ),
  components(schemas(Client, NewClient, error::Message))
)]
pub struct ClientsDoc;

/// OpenAPI document for the Card Directory, served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
  info(title = "Card Directory", description = "Cadastro de cartões"),
  paths(cards::query, cards::create),
  components(schemas(Card, CardBrand, ClientCard, NewCard, error::Message))
)]
pub struct CardsDoc;

/// A `GET /openapi.json` route serving `doc`, built once.
fn openapi_route<S>(doc: utoipa::openapi::OpenApi) -> axum::routing::MethodRouter<S>
where
  S: Clone + Send + Sync + 'static,
{
  let doc = Arc::new(doc);
  get(move || {
    let doc = doc.clone();
    async move {
      ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref().clone()))
        .into_response()
    }
  })
}

// ─── Routers ──────────────────────────────────────────────────────────────────

/// Build the Client Directory router (`/clientes`).
pub fn clients_router<S>(store: Arc<S>) -> Router<()>
where
  S: ClientStore + 'static,
{
  Router::new()
    .route(
      "/clientes",
      get(clients::list::<S>).post(clients::create::<S>),
    )
    .route(
      "/clientes/{id}",
      get(clients::get_one::<S>)
        .put(clients::update::<S>)
        .delete(clients::delete::<S>),
    )
    .route("/openapi.json", openapi_route(ClientsDoc::openapi()))
    .with_state(store)
}

/// Build the Card Directory router (`/cartoes`).
pub fn cards_router<S>(store: Arc<S>) -> Router<()>
where
  S: CardStore + 'static,
{
  Router::new()
    .route("/cartoes", get(cards::query::<S>).post(cards::create::<S>))
    .route("/openapi.json", openapi_route(CardsDoc::openapi()))
    .with_state(store)
}

// ─── Router tests ─────────────────────────────────────────────────────────────

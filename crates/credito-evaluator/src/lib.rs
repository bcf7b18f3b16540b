//! Credit evaluator: composes the Client and Card directories into a
//! client's credit situation.
//!
//! [`CreditEvaluator`] holds the aggregation logic; [`PeerClient`] talks to
//! the directories over HTTP; [`evaluator_router`] exposes it as JSON.

pub mod api;
pub mod evaluator;
pub mod peer;

use std::sync::Arc;

use axum::{Router, routing::get};
use serde::Deserialize;

pub use evaluator::{CreditEvaluator, EvaluatorError};
pub use peer::{Peer, PeerClient, PeerError};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration for the evaluator service.
#[derive(Debug, Deserialize, Clone)]
pub struct EvaluatorConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  pub port:         u16,
  /// Base URL of the Client Directory.
  pub clientes_url: String,
  /// Base URL of the Card Directory.
  pub cartoes_url:  String,
  /// Upper bound on each peer call, connect included.
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms:   u64,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_timeout_ms() -> u64 { 5_000 }

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the evaluator router (`/avaliacoes-credito`).
pub fn evaluator_router(evaluator: Arc<CreditEvaluator>) -> Router<()> {
  Router::new()
    .route("/avaliacoes-credito", get(api::status))
    .route(
      "/avaliacoes-credito/situacao-cliente",
      get(api::credit_situation),
    )
    .route("/openapi.json", get(api::openapi))
    .with_state(evaluator)
}

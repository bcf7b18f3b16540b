//! Process-level wiring shared by the `credito-server` binary: settings
//! loading, path expansion, and the HTTP serve loop.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use axum::{Router, extract::Request};
use credito_api::DirectoryConfig;
use credito_evaluator::EvaluatorConfig;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::Span;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Every service's configuration. Each run of the binary uses one section.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
  pub clientes:  DirectoryConfig,
  pub cartoes:   DirectoryConfig,
  pub avaliador: EvaluatorConfig,
}

/// Layer defaults, the optional TOML file at `path`, and `CREDITO__*`
/// environment variables, in that order of precedence (last wins).
pub fn load_settings(path: &Path) -> Result<Settings, config::ConfigError> {
  config::Config::builder()
    .set_default("clientes.port", 8080)?
    .set_default("clientes.store_path", "clientes.db")?
    .set_default("cartoes.port", 8081)?
    .set_default("cartoes.store_path", "cartoes.db")?
    .set_default("avaliador.port", 8082)?
    .set_default("avaliador.clientes_url", "http://127.0.0.1:8080")?
    .set_default("avaliador.cartoes_url", "http://127.0.0.1:8081")?
    .add_source(config::File::from(path).required(false))
    .add_source(
      config::Environment::with_prefix("CREDITO")
        .separator("__")
        .try_parsing(true),
    )
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Serve ────────────────────────────────────────────────────────────────────

/// Query strings carry CPFs, so request spans record the path only.
fn request_span(request: &Request) -> Span {
  tracing::debug_span!(
    "request",
    method = %request.method(),
    path = %request.uri().path(),
  )
}

/// Wrap `app` in the HTTP trace layer.
pub fn with_request_tracing(app: Router) -> Router {
  app.layer(TraceLayer::new_for_http().make_span_with(request_span))
}

/// Bind `host:port` and serve `app` with request tracing until the process
/// exits.
pub async fn serve(app: Router, host: &str, port: u16) -> anyhow::Result<()> {
  let address = format!("{host}:{port}");
  let app = with_request_tracing(app);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}

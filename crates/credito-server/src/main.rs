//! credito-server binary.
//!
//! Reads `credito.toml` (or the path specified with `--config`) and runs one
//! of the three services:
//!
//! ```text
//! credito-server clientes    # Client Directory
//! credito-server cartoes     # Card Directory
//! credito-server avaliador   # Credit Evaluator
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use credito_api::DirectoryConfig;
use credito_evaluator::{CreditEvaluator, PeerClient};
use credito_server::{expand_tilde, load_settings, serve};
use credito_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Credit evaluation services")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "credito.toml")]
  config: PathBuf,

  #[command(subcommand)]
  service: Service,
}

#[derive(Subcommand)]
enum Service {
  /// Serve the Client Directory (`/clientes`).
  Clientes,
  /// Serve the Card Directory (`/cartoes`).
  Cartoes,
  /// Serve the Credit Evaluator (`/avaliacoes-credito`).
  Avaliador,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = load_settings(&cli.config)
    .with_context(|| format!("failed to load settings from {:?}", cli.config))?;

  match cli.service {
    Service::Clientes => {
      let cfg = settings.clientes;
      let store = open_store(&cfg).await?;
      serve(credito_api::clients_router(store), &cfg.host, cfg.port).await
    }
    Service::Cartoes => {
      let cfg = settings.cartoes;
      let store = open_store(&cfg).await?;
      serve(credito_api::cards_router(store), &cfg.host, cfg.port).await
    }
    Service::Avaliador => {
      let cfg = settings.avaliador;
      let peers = PeerClient::new(&cfg).context("failed to build HTTP client")?;
      tracing::info!(
        clientes = %cfg.clientes_url,
        cartoes = %cfg.cartoes_url,
        timeout_ms = cfg.timeout_ms,
        "evaluator peers configured"
      );
      let evaluator = Arc::new(CreditEvaluator::new(peers));
      serve(credito_evaluator::evaluator_router(evaluator), &cfg.host, cfg.port).await
    }
  }
}

async fn open_store(cfg: &DirectoryConfig) -> anyhow::Result<Arc<SqliteStore>> {
  let store_path = expand_tilde(&cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  Ok(Arc::new(store))
}

//! Async HTTP client for the two directory services.

use std::{fmt, time::Duration};

use credito_core::{card::ClientCard, client::Client};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::EvaluatorConfig;

/// Which directory a call went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Peer {
  Clientes,
  Cartoes,
}

impl fmt::Display for Peer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Peer::Clientes => "clientes",
      Peer::Cartoes => "cartoes",
    })
  }
}

/// A failed call to a peer, as seen on the wire.
#[derive(Debug, Error)]
pub enum PeerError {
  #[error("{peer} returned 404 Not Found")]
  NotFound { peer: Peer },

  #[error("{peer} returned {status}: {body}")]
  Status {
    peer:   Peer,
    status: StatusCode,
    body:   String,
  },

  /// Connection failures, timeouts, and undecodable bodies.
  #[error("request to {peer} failed: {source}")]
  Transport {
    peer:   Peer,
    #[source]
    source: reqwest::Error,
  },
}

impl PeerError {
  pub fn peer(&self) -> Peer {
    match self {
      PeerError::NotFound { peer }
      | PeerError::Status { peer, .. }
      | PeerError::Transport { peer, .. } => *peer,
    }
  }

  /// The HTTP status the peer answered with, if it answered at all.
  pub fn status(&self) -> Option<u16> {
    match self {
      PeerError::NotFound { .. } => Some(StatusCode::NOT_FOUND.as_u16()),
      PeerError::Status { status, .. } => Some(status.as_u16()),
      PeerError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
    }
  }
}

/// HTTP client for the Client and Card directories.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. Every call
/// is bounded by the configured timeout.
#[derive(Clone)]
pub struct PeerClient {
  http:        HttpClient,
  clients_url: String,
  cards_url:   String,
}

impl PeerClient {
  pub fn new(config: &EvaluatorConfig) -> reqwest::Result<Self> {
    let timeout = Duration::from_millis(config.timeout_ms);
    let http = HttpClient::builder()
      .timeout(timeout)
      .connect_timeout(timeout)
      .build()?;
    Ok(Self {
      http,
      clients_url: config.clientes_url.trim_end_matches('/').to_owned(),
      cards_url: config.cartoes_url.trim_end_matches('/').to_owned(),
    })
  }

  /// `GET {clientes_url}/clientes?cpf=<cpf>`
  pub async fn fetch_client(&self, cpf: &str) -> Result<Client, PeerError> {
    self
      .get_json(Peer::Clientes, format!("{}/clientes", self.clients_url), cpf)
      .await
  }

  /// `GET {cartoes_url}/cartoes?cpf=<cpf>`
  pub async fn fetch_cards(&self, cpf: &str) -> Result<Vec<ClientCard>, PeerError> {
    self
      .get_json(Peer::Cartoes, format!("{}/cartoes", self.cards_url), cpf)
      .await
  }

  async fn get_json<T: DeserializeOwned>(
    &self,
    peer: Peer,
    url: String,
    cpf: &str,
  ) -> Result<T, PeerError> {
    let transport = |source| PeerError::Transport { peer, source };

    let resp = self
      .http
      .get(url)
      .query(&[("cpf", cpf)])
      .send()
      .await
      .map_err(transport)?;

    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
      return Err(PeerError::NotFound { peer });
    }
    if !status.is_success() {
      let body = resp
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
      return Err(PeerError::Status { peer, status, body });
    }

    resp.json().await.map_err(transport)
  }
}

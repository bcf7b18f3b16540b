//! Credit situation aggregation.
//!
//! One operation: look up a client and its cards in the two directories and
//! merge them. The outcome is all-or-nothing: either a complete
//! [`CreditSituation`] or one of the two [`EvaluatorError`] kinds.

use credito_core::{cpf::mask_cpf, situation::CreditSituation};
use thiserror::Error;

use crate::peer::{Peer, PeerClient, PeerError};

/// Why a credit situation could not be produced.
#[derive(Debug, Error)]
pub enum EvaluatorError {
  /// A directory reported that the client does not exist.
  #[error("client data not found for cpf {cpf}")]
  ClientNotFound {
    /// Masked CPF.
    cpf: String,
  },

  /// A directory could not be reached or answered with something other than
  /// success or 404. `status` is `None` when no HTTP response arrived.
  #[error("error communicating with {peer}: {message}")]
  PeerCommunication {
    peer:    Peer,
    status:  Option<u16>,
    message: String,
  },
}

impl EvaluatorError {
  fn from_peer(cpf: &str, e: PeerError) -> Self {
    match e {
      PeerError::NotFound { .. } => EvaluatorError::ClientNotFound {
        cpf: mask_cpf(cpf),
      },
      other => EvaluatorError::PeerCommunication {
        peer:    other.peer(),
        status:  other.status(),
        message: other.to_string(),
      },
    }
  }
}

/// Composes the Client and Card directories into credit situations.
#[derive(Clone)]
pub struct CreditEvaluator {
  peers: PeerClient,
}

impl CreditEvaluator {
  pub fn new(peers: PeerClient) -> Self { Self { peers } }

  /// Fetch the client and its cards for `cpf` and merge them.
  ///
  /// Both calls are issued concurrently and both are awaited. The client
  /// result is classified first, so a missing client is reported as
  /// [`EvaluatorError::ClientNotFound`] whatever happened to the card call.
  /// No retries.
  pub async fn credit_situation(
    &self,
    cpf: &str,
  ) -> Result<CreditSituation, EvaluatorError> {
    let (client, cards) = tokio::join!(
      self.peers.fetch_client(cpf),
      self.peers.fetch_cards(cpf),
    );

    let outcome = client
      .and_then(|client| cards.map(|cards| CreditSituation { client, cards }))
      .map_err(|e| EvaluatorError::from_peer(cpf, e));

    match &outcome {
      Ok(situation) => tracing::info!(
        cpf = %mask_cpf(cpf),
        client_id = situation.client.id,
        cards = situation.cards.len(),
        "credit situation assembled"
      ),
      Err(e) => tracing::warn!(cpf = %mask_cpf(cpf), error = %e, "credit situation failed"),
    }

    outcome
  }
}

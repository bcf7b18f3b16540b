//! The evaluator's read model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{card::ClientCard, client::Client};

/// A client snapshot together with the cards registered to its CPF.
///
/// Built per request and never stored. The client is always present; `cards`
/// may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreditSituation {
  #[serde(rename = "cliente")]
  pub client: Client,
  #[serde(rename = "cartoes")]
  pub cards:  Vec<ClientCard>,
}

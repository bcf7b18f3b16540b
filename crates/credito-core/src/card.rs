//! Card records owned by the Card Directory.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Card network; serialised in upper case (`"VISA"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardBrand {
  Mastercard,
  Visa,
}

/// A card offer tied to a client's CPF.
///
/// The CPF is a foreign key into the Client Directory but is not checked;
/// the two directories never talk to each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Card {
  pub id:         i64,
  pub cpf:        String,
  #[serde(rename = "nome")]
  pub name:       String,
  #[serde(rename = "bandeira")]
  pub brand:      Option<CardBrand>,
  /// Minimum income a holder needs for this card.
  #[serde(rename = "renda")]
  pub income:     u64,
  #[serde(rename = "limiteBasico")]
  pub base_limit: u64,
}

/// Input to [`crate::store::CardStore::create_card`].
///
/// Only `cpf` and `renda` are required on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewCard {
  #[schema(example = "12345678901")]
  pub cpf:        String,
  #[serde(rename = "renda")]
  #[schema(example = 3000)]
  pub income:     u64,
  #[serde(rename = "nome", default)]
  #[schema(example = "Basic")]
  pub name:       String,
  #[serde(rename = "bandeira", default)]
  pub brand:      Option<CardBrand>,
  #[serde(rename = "limiteBasico", default)]
  pub base_limit: u64,
}

impl NewCard {
  /// Convenience constructor with the optional attributes left empty.
  pub fn new(cpf: impl Into<String>, income: u64) -> Self {
    Self {
      cpf: cpf.into(),
      income,
      name: String::new(),
      brand: None,
      base_limit: 0,
    }
  }

  pub fn into_card(self, id: i64) -> Card {
    Card {
      id,
      cpf: self.cpf,
      name: self.name,
      brand: self.brand,
      income: self.income,
      base_limit: self.base_limit,
    }
  }
}

/// What a client holds: the projection served by `GET /cartoes?cpf=` and
/// embedded in a credit situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClientCard {
  #[serde(rename = "nome")]
  pub name:           String,
  #[serde(rename = "bandeira")]
  pub brand:          Option<CardBrand>,
  #[serde(rename = "renda")]
  pub income:         u64,
  #[serde(rename = "limiteLiberado")]
  pub approved_limit: u64,
}

impl From<Card> for ClientCard {
  fn from(card: Card) -> Self {
    Self {
      name:           card.name,
      brand:          card.brand,
      income:         card.income,
      approved_limit: card.base_limit,
    }
  }
}

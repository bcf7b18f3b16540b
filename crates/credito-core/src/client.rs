//! Client records owned by the Client Directory.
//!
//! Wire names follow the directory's public JSON contract (`nome`, `idade`);
//! Rust field names stay in English.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered client. `id` is the store-assigned surrogate key; `cpf` is
/// the natural key and is unique across the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Client {
  #[schema(example = 1)]
  pub id:   i64,
  #[schema(example = "12345678901")]
  pub cpf:  String,
  #[serde(rename = "nome")]
  pub name: String,
  #[serde(rename = "idade")]
  pub age:  u32,
}

/// Input to [`crate::store::ClientStore::create_client`] and
/// [`crate::store::ClientStore::update_client`].
/// The `id` is always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewClient {
  #[schema(example = "12345678901")]
  pub cpf:  String,
  #[serde(rename = "nome")]
  #[schema(example = "Marcos da Silva")]
  pub name: String,
  #[serde(rename = "idade")]
  #[schema(example = 30)]
  pub age:  u32,
}

impl NewClient {
  pub fn new(cpf: impl Into<String>, name: impl Into<String>, age: u32) -> Self {
    Self { cpf: cpf.into(), name: name.into(), age }
  }

  /// Attach a store-assigned id.
  pub fn into_client(self, id: i64) -> Client {
    Client { id, cpf: self.cpf, name: self.name, age: self.age }
  }
}

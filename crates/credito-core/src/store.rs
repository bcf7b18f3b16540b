//! The `ClientStore` and `CardStore` traits.
//!
//! The traits are implemented by storage backends (e.g.
//! `credito-store-sqlite`). The HTTP layer depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{
  card::{Card, NewCard},
  client::{Client, NewClient},
};

// ─── Error classification ────────────────────────────────────────────────────

/// Backend errors that can be classified into the core taxonomy.
///
/// Lets callers tell "no such record" and "duplicate CPF" apart from
/// infrastructure failures without knowing the backend's error type.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The core error this backend error represents, if any.
  fn as_core(&self) -> Option<&crate::Error>;
}

// ─── Clients ─────────────────────────────────────────────────────────────────

/// Persistence for the Client Directory.
///
/// Each call is atomic on its own; no multi-record transactions are offered.
pub trait ClientStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new client and return it with its assigned id.
  ///
  /// Fails with [`crate::Error::DuplicateCpf`] if the CPF is already taken.
  fn create_client(
    &self,
    input: NewClient,
  ) -> impl Future<Output = Result<Client, Self::Error>> + Send + '_;

  /// Retrieve a client by id. Returns `None` if not found.
  fn get_client(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + '_;

  /// Retrieve a client by CPF. Returns `None` if not found.
  fn get_client_by_cpf<'a>(
    &'a self,
    cpf: &'a str,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + 'a;

  /// List every client. Order is unspecified.
  fn list_clients(
    &self,
  ) -> impl Future<Output = Result<Vec<Client>, Self::Error>> + Send + '_;

  /// Overwrite CPF, name, and age of an existing client.
  ///
  /// Fails with [`crate::Error::ClientNotFound`] if `id` is absent, or with
  /// [`crate::Error::DuplicateCpf`] if the new CPF belongs to another client.
  fn update_client(
    &self,
    id: i64,
    input: NewClient,
  ) -> impl Future<Output = Result<Client, Self::Error>> + Send + '_;

  /// Remove a client. Fails with [`crate::Error::ClientNotFound`] if absent.
  fn delete_client(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── Cards ───────────────────────────────────────────────────────────────────

/// Persistence for the Card Directory.
pub trait CardStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new card and return it with its assigned id.
  fn create_card(
    &self,
    input: NewCard,
  ) -> impl Future<Output = Result<Card, Self::Error>> + Send + '_;

  /// All cards whose income requirement is at most `max_income`.
  fn list_cards_by_max_income(
    &self,
    max_income: u64,
  ) -> impl Future<Output = Result<Vec<Card>, Self::Error>> + Send + '_;

  /// All cards registered to `cpf`.
  fn list_cards_by_cpf<'a>(
    &'a self,
    cpf: &'a str,
  ) -> impl Future<Output = Result<Vec<Card>, Self::Error>> + Send + 'a;
}

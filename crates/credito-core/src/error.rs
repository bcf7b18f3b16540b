//! Error types for `credito-core`.

use thiserror::Error;

/// Failures every directory backend must be able to report, independent of
/// how it stores records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("client not found: {0}")]
  ClientNotFound(i64),

  /// Carries the masked CPF; the raw value never leaves the store.
  #[error("cpf already registered: {0}")]
  DuplicateCpf(String),

  /// An amount the caller submitted is larger than the backend can hold.
  /// `field` is the wire name.
  #[error("{field} is too large: {value}")]
  AmountOutOfRange { field: &'static str, value: u64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Error type for `credito-store-sqlite`.

use credito_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] credito_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A numeric column holds (or would receive) a value outside the domain
  /// type's range.
  #[error("value out of range for {column}: {value}")]
  OutOfRange { column: &'static str, value: String },

  #[error("unknown card brand: {0:?}")]
  UnknownBrand(String),
}

impl StoreError for Error {
  fn as_core(&self) -> Option<&credito_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

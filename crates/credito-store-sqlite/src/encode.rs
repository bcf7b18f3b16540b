//! Encoding and decoding helpers between Rust domain types and the values
//! stored in SQLite columns.
//!
//! SQLite integers are signed 64-bit; domain amounts are unsigned, so every
//! crossing is range-checked.

use credito_core::{
  card::{Card, CardBrand},
  client::Client,
};

use crate::{Error, Result};

// ─── Integers ────────────────────────────────────────────────────────────────

/// Caller-supplied amounts above `i64::MAX` are the caller's fault, so they
/// are reported in the core taxonomy. `field` is the wire name.
pub fn encode_amount(field: &'static str, value: u64) -> Result<i64> {
  i64::try_from(value)
    .map_err(|_| credito_core::Error::AmountOutOfRange { field, value }.into())
}

pub fn decode_amount(column: &'static str, value: i64) -> Result<u64> {
  u64::try_from(value).map_err(|_| Error::OutOfRange {
    column,
    value: value.to_string(),
  })
}

pub fn decode_age(value: i64) -> Result<u32> {
  u32::try_from(value).map_err(|_| Error::OutOfRange {
    column: "age",
    value:  value.to_string(),
  })
}

/// Whether `e` is a `UNIQUE` constraint violation.
pub fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _)
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── CardBrand ───────────────────────────────────────────────────────────────

pub fn encode_brand(b: CardBrand) -> &'static str {
  match b {
    CardBrand::Mastercard => "MASTERCARD",
    CardBrand::Visa => "VISA",
  }
}

pub fn decode_brand(s: &str) -> Result<CardBrand> {
  match s {
    "MASTERCARD" => Ok(CardBrand::Mastercard),
    "VISA" => Ok(CardBrand::Visa),
    other => Err(Error::UnknownBrand(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `clients` row.
pub struct RawClient {
  pub id:   i64,
  pub cpf:  String,
  pub name: String,
  pub age:  i64,
}

impl RawClient {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:   row.get(0)?,
      cpf:  row.get(1)?,
      name: row.get(2)?,
      age:  row.get(3)?,
    })
  }

  pub fn into_client(self) -> Result<Client> {
    Ok(Client {
      id:   self.id,
      cpf:  self.cpf,
      name: self.name,
      age:  decode_age(self.age)?,
    })
  }
}

/// Raw values read directly from a `cards` row.
pub struct RawCard {
  pub id:         i64,
  pub cpf:        String,
  pub name:       String,
  pub brand:      Option<String>,
  pub income:     i64,
  pub base_limit: i64,
}

impl RawCard {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      cpf:        row.get(1)?,
      name:       row.get(2)?,
      brand:      row.get(3)?,
      income:     row.get(4)?,
      base_limit: row.get(5)?,
    })
  }

  pub fn into_card(self) -> Result<Card> {
    Ok(Card {
      id:         self.id,
      cpf:        self.cpf,
      name:       self.name,
      brand:      self.brand.as_deref().map(decode_brand).transpose()?,
      income:     decode_amount("income", self.income)?,
      base_limit: decode_amount("base_limit", self.base_limit)?,
    })
  }
}

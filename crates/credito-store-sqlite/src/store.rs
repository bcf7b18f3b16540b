//! [`SqliteStore`] — the SQLite implementation of [`ClientStore`] and
//! [`CardStore`].

use std::path::Path;

use credito_core::{
  card::{Card, NewCard},
  client::{Client, NewClient},
  cpf::mask_cpf,
  store::{CardStore, ClientStore},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawCard, RawClient, encode_amount, encode_brand, is_unique_violation},
  schema::SCHEMA,
};

const CLIENT_COLUMNS: &str = "id, cpf, name, age";
const CARD_COLUMNS: &str = "id, cpf, name, brand, income, base_limit";

/// Outcome of a guarded update. The checks and the write run inside one
/// connection call, so no other request on this store can interleave.
/// Another process sharing the file can, in which case the `UNIQUE`
/// constraint decides.
enum Update {
  Done,
  Missing,
  CpfTaken,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A directory store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn query_cards(
    &self,
    filter: &'static str,
    param: rusqlite::types::Value,
  ) -> Result<Vec<Card>> {
    let raws: Vec<RawCard> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CARD_COLUMNS} FROM cards WHERE {filter} ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![param], RawCard::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCard::into_card).collect()
  }
}

// ─── ClientStore impl ────────────────────────────────────────────────────────

impl ClientStore for SqliteStore {
  type Error = Error;

  async fn create_client(&self, input: NewClient) -> Result<Client> {
    let cpf  = input.cpf.clone();
    let name = input.name.clone();
    let age  = i64::from(input.age);

    // `None` means the CPF is already registered.
    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        let taken = conn
          .query_row(
            "SELECT 1 FROM clients WHERE cpf = ?1",
            rusqlite::params![cpf],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if taken {
          return Ok(None);
        }

        match conn.execute(
          "INSERT INTO clients (cpf, name, age) VALUES (?1, ?2, ?3)",
          rusqlite::params![cpf, name, age],
        ) {
          Ok(_) => Ok(Some(conn.last_insert_rowid())),
          Err(e) if is_unique_violation(&e) => Ok(None),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match id {
      Some(id) => Ok(input.into_client(id)),
      None => Err(credito_core::Error::DuplicateCpf(mask_cpf(&input.cpf)).into()),
    }
  }

  async fn get_client(&self, id: i64) -> Result<Option<Client>> {
    let raw: Option<RawClient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1"),
              rusqlite::params![id],
              RawClient::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawClient::into_client).transpose()
  }

  async fn get_client_by_cpf(&self, cpf: &str) -> Result<Option<Client>> {
    let cpf = cpf.to_owned();

    let raw: Option<RawClient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE cpf = ?1"),
              rusqlite::params![cpf],
              RawClient::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawClient::into_client).transpose()
  }

  async fn list_clients(&self) -> Result<Vec<Client>> {
    let raws: Vec<RawClient> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {CLIENT_COLUMNS} FROM clients ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawClient::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawClient::into_client).collect()
  }

  async fn update_client(&self, id: i64, input: NewClient) -> Result<Client> {
    let cpf  = input.cpf.clone();
    let name = input.name.clone();
    let age  = i64::from(input.age);

    let outcome = self
      .conn
      .call(move |conn| {
        let exists = conn
          .query_row(
            "SELECT 1 FROM clients WHERE id = ?1",
            rusqlite::params![id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !exists {
          return Ok(Update::Missing);
        }

        let taken = conn
          .query_row(
            "SELECT 1 FROM clients WHERE cpf = ?1 AND id != ?2",
            rusqlite::params![cpf, id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if taken {
          return Ok(Update::CpfTaken);
        }

        match conn.execute(
          "UPDATE clients SET cpf = ?1, name = ?2, age = ?3 WHERE id = ?4",
          rusqlite::params![cpf, name, age, id],
        ) {
          Ok(_) => Ok(Update::Done),
          Err(e) if is_unique_violation(&e) => Ok(Update::CpfTaken),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match outcome {
      Update::Done => Ok(input.into_client(id)),
      Update::Missing => Err(credito_core::Error::ClientNotFound(id).into()),
      Update::CpfTaken => {
        Err(credito_core::Error::DuplicateCpf(mask_cpf(&input.cpf)).into())
      }
    }
  }

  async fn delete_client(&self, id: i64) -> Result<()> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM clients WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if removed == 0 {
      return Err(credito_core::Error::ClientNotFound(id).into());
    }
    Ok(())
  }
}

// ─── CardStore impl ──────────────────────────────────────────────────────────

impl CardStore for SqliteStore {
  type Error = Error;

  async fn create_card(&self, input: NewCard) -> Result<Card> {
    let cpf        = input.cpf.clone();
    let name       = input.name.clone();
    let brand      = input.brand.map(encode_brand);
    let income     = encode_amount("renda", input.income)?;
    let base_limit = encode_amount("limiteBasico", input.base_limit)?;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cards (cpf, name, brand, income, base_limit)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![cpf, name, brand, income, base_limit],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(input.into_card(id))
  }

  async fn list_cards_by_max_income(&self, max_income: u64) -> Result<Vec<Card>> {
    // Anything above i64::MAX admits every storable card.
    let bound = i64::try_from(max_income).unwrap_or(i64::MAX);
    self
      .query_cards("income <= ?1", rusqlite::types::Value::Integer(bound))
      .await
  }

  async fn list_cards_by_cpf(&self, cpf: &str) -> Result<Vec<Card>> {
    self
      .query_cards("cpf = ?1", rusqlite::types::Value::Text(cpf.to_owned()))
      .await
  }
}

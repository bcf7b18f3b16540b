//! SQL schema for the directory store.
//!
//! Executed once at connection startup. Both directories share the DDL; each
//! service only ever touches its own table.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS clients (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    cpf   TEXT    NOT NULL UNIQUE,   -- natural key
    name  TEXT    NOT NULL,
    age   INTEGER NOT NULL
);

-- `cpf` references clients(cpf) in a different service; not enforced here.
CREATE TABLE IF NOT EXISTS cards (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    cpf         TEXT    NOT NULL,
    name        TEXT    NOT NULL DEFAULT '',
    brand       TEXT,              -- 'MASTERCARD' | 'VISA' | NULL
    income      INTEGER NOT NULL,
    base_limit  INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS cards_cpf_idx    ON cards(cpf);
CREATE INDEX IF NOT EXISTS cards_income_idx ON cards(income);

PRAGMA user_version = 1;
";

//! Core types and trait definitions for the credit-evaluation services.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The directory, evaluator, and storage crates all depend on it.

pub mod card;
pub mod client;
pub mod cpf;
pub mod error;
pub mod situation;
pub mod store;

pub use error::{Error, Result};

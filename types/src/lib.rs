//! Shared type definitions for squall
//!
//! - [`Dialect`] - SQL dialect enum (SQLite, PostgreSQL, MySQL)
//! - [`SqlType`] - the scalar SQL types an expression or column can carry
//!
//! # Features
//!
//! - `serde` - Enable serde serialization/deserialization

mod dialect;
mod sql_type;

pub use dialect::{Dialect, DialectParseError};
pub use sql_type::SqlType;

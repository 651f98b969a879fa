//! Backend abstraction.
//!
//! A [`Session`] runs rendered SQL with bound [`Value`] parameters and
//! returns rows of [`Value`]s. Implementations exist for
//! `rusqlite::Connection` / `rusqlite::Transaction` (feature `rusqlite`) and
//! `postgres::Client` (feature `postgres-sync`).

#[cfg(feature = "postgres-sync")]
mod postgres;
#[cfg(feature = "rusqlite")]
mod rusqlite;

use squall_types::Dialect;

use crate::error::BackendError;
use crate::value::Value;

/// One result row.
pub type Row = Vec<Value>;

pub trait Session {
    /// Dialect the backend speaks.
    fn dialect(&self) -> Dialect;

    /// Run a statement returning rows.
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>, BackendError>;

    /// Run a statement and return the number of affected rows.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, BackendError>;
}

impl<S: Session + ?Sized> Session for &mut S {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>, BackendError> {
        (**self).query(sql, params)
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, BackendError> {
        (**self).execute(sql, params)
    }
}

impl<S: Session + ?Sized> Session for Box<S> {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>, BackendError> {
        (**self).query(sql, params)
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, BackendError> {
        (**self).execute(sql, params)
    }
}

//! [`Session`] for [`rusqlite`].

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, ToSql, Transaction, params_from_iter};
use squall_types::Dialect;

use crate::error::BackendError;
use crate::value::Value;

use super::{Row, Session};

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Integer(v) => ToSqlOutput::from(*v),
            Value::Real(v) => ToSqlOutput::from(*v),
            Value::Text(v) => ToSqlOutput::from(v.as_str()),
            Value::Bool(v) => ToSqlOutput::from(*v),
            Value::Blob(v) => ToSqlOutput::from(v.as_slice()),
        })
    }
}

/// Fails on TEXT that is not valid UTF-8.
impl TryFrom<ValueRef<'_>> for Value {
    type Error = rusqlite::Error;

    fn try_from(value: ValueRef<'_>) -> rusqlite::Result<Self> {
        Ok(match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            ValueRef::Text(v) => Value::Text(std::str::from_utf8(v)?.to_owned()),
            ValueRef::Blob(v) => Value::Blob(v.to_vec()),
        })
    }
}

fn query_rows(conn: &Connection, sql: &str, params: &[Value]) -> rusqlite::Result<Vec<Row>> {
    let mut stmt = conn.prepare(sql)?;
    let width = stmt.column_count();
    let mut rows = stmt.query(params_from_iter(params))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            values.push(Value::try_from(row.get_ref(i)?)?);
        }
        out.push(values);
    }
    Ok(out)
}

fn execute(conn: &Connection, sql: &str, params: &[Value]) -> rusqlite::Result<u64> {
    let affected = conn.execute(sql, params_from_iter(params))?;
    Ok(affected as u64)
}

impl Session for Connection {
    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>, BackendError> {
        Ok(query_rows(self, sql, params)?)
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, BackendError> {
        Ok(execute(self, sql, params)?)
    }
}

impl Session for Transaction<'_> {
    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>, BackendError> {
        Ok(query_rows(self, sql, params)?)
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, BackendError> {
        Ok(execute(self, sql, params)?)
    }
}

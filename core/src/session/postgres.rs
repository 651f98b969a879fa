//! [`Session`] for the synchronous [`postgres`] client.

use bytes::BytesMut;
use postgres::types::{IsNull, ToSql, Type};
use postgres::Client;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use smallvec::SmallVec;
use squall_types::Dialect;

use crate::error::BackendError;
use crate::value::Value;

use super::{Row, Session};

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Integer(v) => match *ty {
                Type::INT2 => i16::try_from(*v)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*v)?.to_sql(ty, out),
                Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                Type::FLOAT8 => (*v as f64).to_sql(ty, out),
                Type::NUMERIC => Decimal::from(*v).to_sql(ty, out),
                _ => v.to_sql(ty, out),
            },
            Value::Real(v) => match *ty {
                Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                Type::NUMERIC => Decimal::try_from(*v)?.to_sql(ty, out),
                _ => v.to_sql(ty, out),
            },
            Value::Text(v) => v.as_str().to_sql(ty, out),
            Value::Bool(v) => v.to_sql(ty, out),
            Value::Blob(v) => v.as_slice().to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    postgres::types::to_sql_checked!();
}

/// Integral NUMERIC (e.g. `SUM(bigint)`) decodes as an integer, the rest as
/// a double.
fn decode_numeric(v: Decimal) -> Result<Value, BackendError> {
    let v = v.normalize();
    match (v.scale(), v.to_i64()) {
        (0, Some(i)) => Ok(Value::Integer(i)),
        _ => v
            .to_f64()
            .map(Value::Real)
            .ok_or_else(|| format!("NUMERIC value {v} does not fit a double").into()),
    }
}

fn decode_row(row: &postgres::Row) -> Result<Row, BackendError> {
    let mut values = Vec::with_capacity(row.len());
    for (i, column) in row.columns().iter().enumerate() {
        let value = match *column.type_() {
            Type::BOOL => row.try_get::<_, Option<bool>>(i)?.map(Value::Bool),
            Type::INT2 => row
                .try_get::<_, Option<i16>>(i)?
                .map(|v| Value::Integer(v.into())),
            Type::INT4 => row
                .try_get::<_, Option<i32>>(i)?
                .map(|v| Value::Integer(v.into())),
            Type::INT8 => row.try_get::<_, Option<i64>>(i)?.map(Value::Integer),
            Type::FLOAT4 => row
                .try_get::<_, Option<f32>>(i)?
                .map(|v| Value::Real(v.into())),
            Type::FLOAT8 => row.try_get::<_, Option<f64>>(i)?.map(Value::Real),
            Type::NUMERIC => row
                .try_get::<_, Option<Decimal>>(i)?
                .map(decode_numeric)
                .transpose()?,
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                row.try_get::<_, Option<String>>(i)?.map(Value::Text)
            }
            Type::BYTEA => row.try_get::<_, Option<Vec<u8>>>(i)?.map(Value::Blob),
            ref other => {
                return Err(format!(
                    "unsupported column type `{other}` for `{}`",
                    column.name()
                )
                .into());
            }
        };
        values.push(value.unwrap_or(Value::Null));
    }
    Ok(values)
}

fn params(values: &[Value]) -> SmallVec<[&(dyn ToSql + Sync); 8]> {
    values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}

impl Session for Client {
    fn dialect(&self) -> Dialect {
        Dialect::PostgreSQL
    }

    fn query(&mut self, sql: &str, values: &[Value]) -> Result<Vec<Row>, BackendError> {
        let rows = Client::query(self, sql, &params(values)[..])?;
        rows.iter().map(decode_row).collect()
    }

    fn execute(&mut self, sql: &str, values: &[Value]) -> Result<u64, BackendError> {
        Ok(Client::execute(self, sql, &params(values)[..])?)
    }
}

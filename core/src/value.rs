//! Owned SQL values and their conversion to Rust types.
//!
//! Every backend decodes result cells into [`Value`] and binds [`Value`]
//! parameters, so projections and entities only ever deal with one
//! representation regardless of the driver underneath.

use compact_str::CompactString;
use squall_types::SqlType;

use crate::error::{Result, SquallError};
use crate::types::{BigInt, Bool, DataType, Double, Int, Text};

/// A single SQL value, either bound as a parameter or read from a result row.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Blob(Vec<u8>),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the stored variant, used in mapping errors.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Bool(_) => "boolean",
            Value::Blob(_) => "blob",
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<CompactString> for Value {
    fn from(value: CompactString) -> Self {
        Value::Text(value.into_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Conversion from a result [`Value`] into a Rust type.
///
/// Conversions are strict: text never parses into numbers and numbers never
/// format into text. NULL is only accepted by `Option<T>`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be read from a SQL value",
    label = "supported types are i32, i64, f64, bool, String, Vec<u8> and Option of those"
)]
pub trait FromValue: Sized {
    /// SQL type this Rust type maps to.
    const TYPE: SqlType;
    /// Whether NULL is representable.
    const NULLABLE: bool = false;

    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch(expected: SqlType, found: &Value) -> SquallError {
    if found.is_null() {
        SquallError::UnexpectedNull { expected }
    } else {
        SquallError::Mapping {
            expected,
            found: found.kind_name().to_owned(),
        }
    }
}

impl FromValue for i64 {
    const TYPE: SqlType = SqlType::BigInt;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(v) => Ok(v),
            Value::Bool(v) => Ok(v.into()),
            other => Err(mismatch(Self::TYPE, &other)),
        }
    }
}

impl FromValue for i32 {
    const TYPE: SqlType = SqlType::Integer;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Integer(v) => i32::try_from(v).map_err(|_| SquallError::Mapping {
                expected: Self::TYPE,
                found: format!("out of range integer {v}"),
            }),
            other => Err(mismatch(Self::TYPE, &other)),
        }
    }
}

impl FromValue for f64 {
    const TYPE: SqlType = SqlType::Double;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Real(v) => Ok(v),
            Value::Integer(v) => Ok(v as f64),
            other => Err(mismatch(Self::TYPE, &other)),
        }
    }
}

impl FromValue for bool {
    const TYPE: SqlType = SqlType::Boolean;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::Integer(0) => Ok(false),
            Value::Integer(1) => Ok(true),
            other => Err(mismatch(Self::TYPE, &other)),
        }
    }
}

impl FromValue for String {
    const TYPE: SqlType = SqlType::Text;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v),
            other => Err(mismatch(Self::TYPE, &other)),
        }
    }
}

impl FromValue for Vec<u8> {
    const TYPE: SqlType = SqlType::Blob;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(v) => Ok(v),
            other => Err(mismatch(Self::TYPE, &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const TYPE: SqlType = T::TYPE;
    const NULLABLE: bool = true;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Maps a Rust field type onto the SQL type marker its column carries.
///
/// Used by generated entity paths and DTO projections to type their columns
/// and constructor arguments.
pub trait FieldType: FromValue {
    type Kind: DataType;
}

impl FieldType for i32 {
    type Kind = Int;
}

impl FieldType for i64 {
    type Kind = BigInt;
}

impl FieldType for f64 {
    type Kind = Double;
}

impl FieldType for bool {
    type Kind = Bool;
}

impl FieldType for String {
    type Kind = Text;
}

impl<T: FieldType> FieldType for Option<T> {
    type Kind = T::Kind;
}

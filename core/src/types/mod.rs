//! SQL data type markers for compile-time type safety.
//!
//! Zero-sized markers represent SQL types at the Rust type level so that
//! comparisons between incompatible expressions fail to compile.
//!
//! ```text
//! DataType (base trait)
//! ├── Numeric (arithmetic, SUM/AVG)
//! │   ├── Int (INTEGER)
//! │   ├── BigInt (BIGINT)
//! │   └── Double (DOUBLE PRECISION)
//! ├── Textual (TEXT)
//! └── Bool
//! ```

mod coerce;

pub use coerce::Compatible;

use squall_types::SqlType;

use crate::value::FromValue;

mod private {
    pub trait Sealed {}
}

/// Represents a SQL data type at the type level.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a recognized SQL data type",
    label = "use a squall SQL type marker (Int, BigInt, Double, Text, Bool)"
)]
pub trait DataType: private::Sealed + Copy + Default + core::fmt::Debug + 'static {
    /// Rust type a non-null value of this SQL type decodes into.
    type Native: FromValue;
    const TYPE: SqlType;
}

/// Numeric SQL types that support arithmetic and SUM/AVG.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a numeric SQL type",
    label = "arithmetic operations require Int, BigInt or Double"
)]
pub trait Numeric: DataType {
    /// Result type of `SUM` over this type.
    type Sum: Numeric;
}

/// String SQL types.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a text SQL type",
    label = "expected Text"
)]
pub trait Textual: DataType {}

/// SQL INTEGER type marker (32-bit signed integer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Int;

/// SQL BIGINT type marker (64-bit signed integer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BigInt;

/// SQL DOUBLE PRECISION type marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Double;

/// SQL TEXT type marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Text;

/// SQL BOOLEAN type marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bool;

macro_rules! data_type {
    ($($marker:ident => $native:ty, $sql:ident;)*) => {
        $(
            impl private::Sealed for $marker {}

            impl DataType for $marker {
                type Native = $native;
                const TYPE: SqlType = SqlType::$sql;
            }
        )*
    };
}

data_type! {
    Int => i32, Integer;
    BigInt => i64, BigInt;
    Double => f64, Double;
    Text => String, Text;
    Bool => bool, Boolean;
}

impl Numeric for Int {
    type Sum = BigInt;
}

impl Numeric for BigInt {
    type Sum = BigInt;
}

impl Numeric for Double {
    type Sum = Double;
}

impl Textual for Text {}

//! Type compatibility rules for SQL types.

use super::{BigInt, DataType, Double, Int};

/// `Self` may appear opposite `Rhs` in comparisons and arithmetic.
///
/// Every type pairs with itself, and the numeric types pair with each other.
///
/// ```compile_fail
/// use squall_core::types::{Compatible, Int, Text};
///
/// fn requires_compatible<L: Compatible<R>, R: squall_core::types::DataType>() {}
/// requires_compatible::<Int, Text>();
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` expressions cannot be combined with `{Rhs}` expressions",
    label = "mismatched SQL types",
    note = "integers are compatible with integers and doubles; every type is compatible with itself"
)]
pub trait Compatible<Rhs: DataType = Self>: DataType {}

impl<T: DataType> Compatible<T> for T {}

impl Compatible<BigInt> for Int {}
impl Compatible<Int> for BigInt {}

impl Compatible<Double> for Int {}
impl Compatible<Double> for BigInt {}
impl Compatible<Int> for Double {}
impl Compatible<BigInt> for Double {}

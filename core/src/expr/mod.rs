//! Typed expression tree.
//!
//! Every expression is an [`ExprNode`] tagged at the type level with the SQL
//! type marker it evaluates to. [`Expr<K>`] owns a node; [`Column<K>`] is the
//! `Copy` leaf exposed on generated entity paths. Both carry the same
//! operator methods (see `ops.rs`).
//!
//! Predicates are simply `Expr<Bool>`; see [`Predicate`].

mod case;
mod node;
mod ops;
mod order;

pub use case::{CaseBuilder, CaseInit, SimpleCase, SimpleCaseBuilder, case};
pub use node::{BinaryOp, ColumnRef, ExprNode, FunctionCall};
pub use order::{IntoOrderBy, NullOrdering, OrderBy, OrderSpec};

use core::marker::PhantomData;

use compact_str::CompactString;

use crate::types::{BigInt, Bool, Compatible, DataType, Double, Int, Text};
use crate::value::Value;

/// A boolean expression usable in WHERE, ON and HAVING.
pub type Predicate = Expr<Bool>;

/// An owned expression of SQL type `K`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr<K> {
    node: ExprNode,
    _kind: PhantomData<K>,
}

impl<K: DataType> Expr<K> {
    pub fn new(node: ExprNode) -> Self {
        Self {
            node,
            _kind: PhantomData,
        }
    }

    pub fn node(&self) -> &ExprNode {
        &self.node
    }

    pub fn into_node(self) -> ExprNode {
        self.node
    }

    pub(crate) fn to_node(&self) -> ExprNode {
        self.node.clone()
    }
}

impl Expr<BigInt> {
    pub(crate) fn count_of(column: ColumnRef) -> Self {
        Expr::new(ExprNode::Function(FunctionCall::new(
            "count",
            vec![ExprNode::Column(column)],
        )))
    }
}

/// A typed reference to a mapped column under a query alias.
///
/// `K` is the column's SQL type, not its nullability: selecting a column
/// decodes `K::Native` and fails with `UnexpectedNull` on a NULL cell.
/// Select [`nullable`](Column::nullable) for columns that may hold NULL.
#[derive(Debug, Clone, Copy)]
pub struct Column<K> {
    column: ColumnRef,
    _kind: PhantomData<K>,
}

impl<K: DataType> Column<K> {
    pub const fn new(qualifier: &'static str, column: &'static str, field: &'static str) -> Self {
        Self {
            column: ColumnRef {
                qualifier,
                column,
                field,
            },
            _kind: PhantomData,
        }
    }

    pub const fn column_ref(&self) -> ColumnRef {
        self.column
    }

    pub fn expr(&self) -> Expr<K> {
        Expr::new(self.to_node())
    }

    pub(crate) fn to_node(&self) -> ExprNode {
        ExprNode::Column(self.column)
    }
}

/// Anything that can stand as an operand of SQL type `Self::Kind`:
/// expressions, columns, scalar subqueries and Rust literals.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a SQL operand",
    label = "expected an expression, a column, a subquery or a literal"
)]
pub trait Operand {
    type Kind: DataType;

    fn into_node(self) -> ExprNode;
}

/// An operand whose SQL type is compatible with `K`.
pub trait IntoExpr<K: DataType>: Operand {}

impl<K: DataType, T> IntoExpr<K> for T
where
    T: Operand,
    T::Kind: Compatible<K>,
{
}

impl<K: DataType> Operand for Expr<K> {
    type Kind = K;

    fn into_node(self) -> ExprNode {
        self.node
    }
}

impl<K: DataType> Operand for &Expr<K> {
    type Kind = K;

    fn into_node(self) -> ExprNode {
        self.node.clone()
    }
}

impl<K: DataType> Operand for Column<K> {
    type Kind = K;

    fn into_node(self) -> ExprNode {
        ExprNode::Column(self.column)
    }
}

impl<K: DataType> Operand for &Column<K> {
    type Kind = K;

    fn into_node(self) -> ExprNode {
        ExprNode::Column(self.column)
    }
}

macro_rules! literal_operand {
    ($($ty:ty => $kind:ty),* $(,)?) => {
        $(
            impl Operand for $ty {
                type Kind = $kind;

                fn into_node(self) -> ExprNode {
                    ExprNode::Literal(Value::from(self))
                }
            }
        )*
    };
}

literal_operand! {
    i32 => Int,
    i64 => BigInt,
    f64 => Double,
    bool => Bool,
    String => Text,
    &str => Text,
    CompactString => Text,
}

impl Operand for &String {
    type Kind = Text;

    fn into_node(self) -> ExprNode {
        ExprNode::Literal(Value::Text(self.clone()))
    }
}

/// A list of untyped operands: function arguments, GROUP BY keys, tuple
/// projections.
pub trait IntoNodes {
    fn into_nodes(self) -> Vec<ExprNode>;
}

macro_rules! single_node {
    ($($ty:ty),*) => {
        $(
            impl<K: DataType> IntoNodes for $ty {
                fn into_nodes(self) -> Vec<ExprNode> {
                    vec![Operand::into_node(self)]
                }
            }
        )*
    };
}

single_node!(Expr<K>, &Expr<K>, Column<K>, &Column<K>);

impl<T: Operand, const N: usize> IntoNodes for [T; N] {
    fn into_nodes(self) -> Vec<ExprNode> {
        self.into_iter().map(Operand::into_node).collect()
    }
}

impl<T: Operand> IntoNodes for Vec<T> {
    fn into_nodes(self) -> Vec<ExprNode> {
        self.into_iter().map(Operand::into_node).collect()
    }
}

macro_rules! tuple_nodes {
    ($($T:ident),+) => {
        impl<$($T: Operand),+> IntoNodes for ($($T,)+) {
            #[allow(non_snake_case)]
            fn into_nodes(self) -> Vec<ExprNode> {
                let ($($T,)+) = self;
                vec![$($T.into_node()),+]
            }
        }
    };
}

tuple_nodes!(A);
tuple_nodes!(A, B);
tuple_nodes!(A, B, C);
tuple_nodes!(A, B, C, D);
tuple_nodes!(A, B, C, D, E);
tuple_nodes!(A, B, C, D, E, F);
tuple_nodes!(A, B, C, D, E, F, G);
tuple_nodes!(A, B, C, D, E, F, G, H);

/// A constant projected as-is, e.g. `select((member.username, constant("A")))`.
pub fn constant<T: Operand>(value: T) -> Expr<T::Kind> {
    Expr::new(value.into_node())
}

/// `COUNT(*)`
pub fn count_all() -> Expr<BigInt> {
    Expr::new(ExprNode::CountAll)
}

/// A call to an arbitrary SQL function returning `K`.
///
/// The name is looked up by the dialect renderer, which may spell it
/// differently per backend. Unknown names render as `NAME(args...)`.
///
/// ```ignore
/// function::<Text>("replace", (member.username, "member", "M"))
/// ```
pub fn function<K: DataType>(name: &str, args: impl IntoNodes) -> Expr<K> {
    Expr::new(ExprNode::Function(FunctionCall::new(name, args.into_nodes())))
}

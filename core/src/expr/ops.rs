//! Operator methods shared by [`Expr`] and [`Column`].
//!
//! The methods are inherent rather than trait-provided so that
//! `member.age.eq(10)` never competes with `PartialEq::eq`.

use compact_str::CompactString;

use super::{
    BinaryOp, Column, Expr, ExprNode, IntoExpr, Operand, OrderBy, OrderSpec, Predicate,
    SimpleCase,
};
use crate::projection::Nullable;
use crate::query::Query;
use crate::types::{BigInt, Bool, Compatible, DataType, Double, Int, Numeric, Text, Textual};

fn compare<K: DataType, R: IntoExpr<K>>(left: ExprNode, op: BinaryOp, right: R) -> Predicate {
    Expr::new(ExprNode::binary(op, left, right.into_node()))
}

fn call<K: DataType>(name: &str, args: Vec<ExprNode>) -> Expr<K> {
    Expr::new(ExprNode::call(name, args))
}

/// Escape LIKE wildcards with a backslash, the escape character of [`BinaryOp::LikeEscaped`].
fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

macro_rules! expr_methods {
    ($ty:ident) => {
        #[allow(clippy::should_implement_trait)]
        impl<K: DataType> $ty<K> {
            /// `self = rhs`
            pub fn eq<R: IntoExpr<K>>(&self, rhs: R) -> Predicate {
                compare(self.to_node(), BinaryOp::Eq, rhs)
            }

            /// `self <> rhs`
            pub fn ne<R: IntoExpr<K>>(&self, rhs: R) -> Predicate {
                compare(self.to_node(), BinaryOp::NotEq, rhs)
            }

            /// `self > rhs`
            pub fn gt<R: IntoExpr<K>>(&self, rhs: R) -> Predicate {
                compare(self.to_node(), BinaryOp::Gt, rhs)
            }

            /// `self >= rhs`
            pub fn goe<R: IntoExpr<K>>(&self, rhs: R) -> Predicate {
                compare(self.to_node(), BinaryOp::GtEq, rhs)
            }

            /// `self < rhs`
            pub fn lt<R: IntoExpr<K>>(&self, rhs: R) -> Predicate {
                compare(self.to_node(), BinaryOp::Lt, rhs)
            }

            /// `self <= rhs`
            pub fn loe<R: IntoExpr<K>>(&self, rhs: R) -> Predicate {
                compare(self.to_node(), BinaryOp::LtEq, rhs)
            }

            /// `self BETWEEN low AND high`, inclusive on both ends.
            pub fn between<L: IntoExpr<K>, H: IntoExpr<K>>(&self, low: L, high: H) -> Predicate {
                Expr::new(ExprNode::Between {
                    expr: Box::new(self.to_node()),
                    low: Box::new(low.into_node()),
                    high: Box::new(high.into_node()),
                })
            }

            pub fn in_list<R: IntoExpr<K>>(&self, values: impl IntoIterator<Item = R>) -> Predicate {
                self.membership(values, false)
            }

            pub fn not_in_list<R: IntoExpr<K>>(
                &self,
                values: impl IntoIterator<Item = R>,
            ) -> Predicate {
                self.membership(values, true)
            }

            fn membership<R: IntoExpr<K>>(
                &self,
                values: impl IntoIterator<Item = R>,
                negated: bool,
            ) -> Predicate {
                Expr::new(ExprNode::InList {
                    expr: Box::new(self.to_node()),
                    list: values.into_iter().map(Operand::into_node).collect(),
                    negated,
                })
            }

            /// `self IN (subquery)`
            pub fn in_query<S: Compatible<K>>(&self, query: Query<Expr<S>>) -> Predicate {
                Expr::new(ExprNode::InSubquery {
                    expr: Box::new(self.to_node()),
                    query: Box::new(query.into_spec()),
                    negated: false,
                })
            }

            /// `self NOT IN (subquery)`
            pub fn not_in_query<S: Compatible<K>>(&self, query: Query<Expr<S>>) -> Predicate {
                Expr::new(ExprNode::InSubquery {
                    expr: Box::new(self.to_node()),
                    query: Box::new(query.into_spec()),
                    negated: true,
                })
            }

            pub fn is_null(&self) -> Predicate {
                Expr::new(ExprNode::IsNull {
                    expr: Box::new(self.to_node()),
                    negated: false,
                })
            }

            pub fn is_not_null(&self) -> Predicate {
                Expr::new(ExprNode::IsNull {
                    expr: Box::new(self.to_node()),
                    negated: true,
                })
            }

            /// Name this expression in the select list.
            pub fn as_(&self, alias: &str) -> Expr<K> {
                Expr::new(ExprNode::Alias {
                    expr: Box::new(self.to_node()),
                    name: CompactString::from(alias),
                })
            }

            pub fn asc(&self) -> OrderSpec {
                OrderSpec::new(self.to_node(), OrderBy::Asc)
            }

            pub fn desc(&self) -> OrderSpec {
                OrderSpec::new(self.to_node(), OrderBy::Desc)
            }

            pub fn count(&self) -> Expr<BigInt> {
                call("count", vec![self.to_node()])
            }

            pub fn count_distinct(&self) -> Expr<BigInt> {
                Expr::new(ExprNode::Function(
                    super::FunctionCall::new("count", vec![self.to_node()]).distinct(),
                ))
            }

            pub fn max(&self) -> Expr<K> {
                call("max", vec![self.to_node()])
            }

            pub fn min(&self) -> Expr<K> {
                call("min", vec![self.to_node()])
            }

            /// Start a simple `CASE self WHEN ...` expression.
            pub fn case(&self) -> SimpleCase<K> {
                SimpleCase::new(self.to_node())
            }

            /// The value rendered as text (`CAST(... AS TEXT)` or the dialect's equivalent).
            pub fn string_value(&self) -> Expr<Text> {
                call("to_text", vec![self.to_node()])
            }

            /// Project this expression as `Option`, for values that may be NULL.
            pub fn nullable(&self) -> Nullable<K> {
                Nullable::new(self.to_node())
            }
        }

        #[allow(clippy::should_implement_trait)]
        impl<K: Numeric> $ty<K> {
            pub fn add<R: IntoExpr<K>>(&self, rhs: R) -> Expr<K> {
                Expr::new(ExprNode::binary(BinaryOp::Add, self.to_node(), rhs.into_node()))
            }

            pub fn sub<R: IntoExpr<K>>(&self, rhs: R) -> Expr<K> {
                Expr::new(ExprNode::binary(BinaryOp::Sub, self.to_node(), rhs.into_node()))
            }

            pub fn mul<R: IntoExpr<K>>(&self, rhs: R) -> Expr<K> {
                Expr::new(ExprNode::binary(BinaryOp::Mul, self.to_node(), rhs.into_node()))
            }

            pub fn div<R: IntoExpr<K>>(&self, rhs: R) -> Expr<K> {
                Expr::new(ExprNode::binary(BinaryOp::Div, self.to_node(), rhs.into_node()))
            }

            pub fn sum(&self) -> Expr<K::Sum> {
                call("sum", vec![self.to_node()])
            }

            pub fn avg(&self) -> Expr<Double> {
                call("avg", vec![self.to_node()])
            }
        }

        impl<K: Textual> $ty<K> {
            /// String concatenation.
            pub fn concat<R: IntoExpr<Text>>(&self, rhs: R) -> Expr<K> {
                call("concat", vec![self.to_node(), rhs.into_node()])
            }

            pub fn lower(&self) -> Expr<K> {
                call("lower", vec![self.to_node()])
            }

            pub fn upper(&self) -> Expr<K> {
                call("upper", vec![self.to_node()])
            }

            pub fn length(&self) -> Expr<Int> {
                call("length", vec![self.to_node()])
            }

            /// `self LIKE pattern`; `%` and `_` in `pattern` are wildcards.
            pub fn like<R: IntoExpr<Text>>(&self, pattern: R) -> Predicate {
                compare::<Text, R>(self.to_node(), BinaryOp::Like, pattern)
            }

            /// `self LIKE 'value%'`, matching `value` literally.
            pub fn starts_with(&self, value: &str) -> Predicate {
                let pattern = format!("{}%", escape_like(value));
                compare::<Text, String>(self.to_node(), BinaryOp::LikeEscaped, pattern)
            }

            /// `self LIKE '%value%'`, matching `value` literally.
            pub fn contains(&self, value: &str) -> Predicate {
                let pattern = format!("%{}%", escape_like(value));
                compare::<Text, String>(self.to_node(), BinaryOp::LikeEscaped, pattern)
            }
        }

        #[allow(clippy::should_implement_trait)]
        impl $ty<Bool> {
            /// `self AND rhs`; a `None` operand is dropped.
            pub fn and(&self, rhs: impl Into<Option<Predicate>>) -> Predicate {
                match rhs.into() {
                    Some(rhs) => Expr::new(self.to_node().combine(rhs.into_node(), true)),
                    None => Expr::new(self.to_node()),
                }
            }

            /// `self OR rhs`; a `None` operand is dropped.
            pub fn or(&self, rhs: impl Into<Option<Predicate>>) -> Predicate {
                match rhs.into() {
                    Some(rhs) => Expr::new(self.to_node().combine(rhs.into_node(), false)),
                    None => Expr::new(self.to_node()),
                }
            }

            pub fn not(&self) -> Predicate {
                Expr::new(ExprNode::Not(Box::new(self.to_node())))
            }
        }
    };
}

expr_methods!(Expr);
expr_methods!(Column);

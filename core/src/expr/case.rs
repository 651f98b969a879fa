//! CASE expressions.
//!
//! Both forms are typestate builders that require at least one WHEN branch
//! and a mandatory default, so the resulting expression is never implicitly
//! NULL.
//!
//! ```ignore
//! // Searched CASE
//! case()
//!     .when(member.age.between(0, 20), "0-20")
//!     .when(member.age.between(21, 30), "21-30")
//!     .otherwise("other")
//!
//! // Simple CASE
//! member.age.case().when(10, "ten").when(20, "twenty").otherwise("other")
//! ```

use core::marker::PhantomData;

use super::{Expr, ExprNode, IntoExpr, Operand};
use crate::types::{Bool, DataType};

/// Start building a searched CASE expression.
pub fn case() -> CaseInit {
    CaseInit
}

/// Searched CASE before the first WHEN branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInit;

impl CaseInit {
    /// First branch; its result fixes the type of the whole expression.
    pub fn when<C: IntoExpr<Bool>, R: Operand>(self, condition: C, result: R) -> CaseBuilder<R::Kind> {
        CaseBuilder {
            operand: None,
            branches: vec![(condition.into_node(), result.into_node())],
            _kind: PhantomData,
        }
    }
}

/// Searched CASE with at least one branch, producing `K`.
#[derive(Debug, Clone)]
pub struct CaseBuilder<K> {
    operand: Option<Box<ExprNode>>,
    branches: Vec<(ExprNode, ExprNode)>,
    _kind: PhantomData<K>,
}

impl<K: DataType> CaseBuilder<K> {
    pub fn when<C: IntoExpr<Bool>, R: IntoExpr<K>>(mut self, condition: C, result: R) -> Self {
        self.branches.push((condition.into_node(), result.into_node()));
        self
    }

    /// Finish with the ELSE branch.
    pub fn otherwise<R: IntoExpr<K>>(self, default: R) -> Expr<K> {
        Expr::new(ExprNode::Case {
            operand: self.operand,
            branches: self.branches,
            default: Box::new(default.into_node()),
        })
    }
}

/// Simple `CASE operand WHEN value ...` before the first branch.
#[derive(Debug, Clone)]
pub struct SimpleCase<V> {
    operand: ExprNode,
    _kind: PhantomData<V>,
}

impl<V: DataType> SimpleCase<V> {
    pub(crate) fn new(operand: ExprNode) -> Self {
        Self {
            operand,
            _kind: PhantomData,
        }
    }

    pub fn when<W: IntoExpr<V>, R: Operand>(self, value: W, result: R) -> SimpleCaseBuilder<V, R::Kind> {
        SimpleCaseBuilder {
            inner: CaseBuilder {
                operand: Some(Box::new(self.operand)),
                branches: vec![(value.into_node(), result.into_node())],
                _kind: PhantomData,
            },
            _value: PhantomData,
        }
    }
}

/// Simple CASE over values of `V` producing `K`.
#[derive(Debug, Clone)]
pub struct SimpleCaseBuilder<V, K> {
    inner: CaseBuilder<K>,
    _value: PhantomData<V>,
}

impl<V: DataType, K: DataType> SimpleCaseBuilder<V, K> {
    pub fn when<W: IntoExpr<V>, R: IntoExpr<K>>(mut self, value: W, result: R) -> Self {
        self.inner
            .branches
            .push((value.into_node(), result.into_node()));
        self
    }

    pub fn otherwise<R: IntoExpr<K>>(self, default: R) -> Expr<K> {
        self.inner.otherwise(default)
    }
}

//! Null-omitting predicate composition.
//!
//! Dynamic filters are written as `Option<Predicate>`: an absent filter is
//! `None`, and every combinator here drops `None` operands. `and(None, p)`
//! is `p`, and a query filtered only by `None` has no WHERE clause.
//!
//! ```ignore
//! let username = Some("member1");
//! let age: Option<i32> = None;
//!
//! let mut builder = PredicateBuilder::new();
//! builder
//!     .and(username.map(|u| member.username.eq(u)))
//!     .and(age.map(|a| member.age.eq(a)));
//!
//! // Same SQL as the builder above
//! select_from(member).r#where((
//!     username.map(|u| member.username.eq(u)),
//!     age.map(|a| member.age.eq(a)),
//! ));
//! ```

use crate::expr::{Expr, ExprNode, Predicate};

/// `l AND r`, dropping absent operands.
pub fn and(l: impl Into<Option<Predicate>>, r: impl Into<Option<Predicate>>) -> Option<Predicate> {
    combine(l.into(), r.into(), true)
}

/// `l OR r`, dropping absent operands.
pub fn or(l: impl Into<Option<Predicate>>, r: impl Into<Option<Predicate>>) -> Option<Predicate> {
    combine(l.into(), r.into(), false)
}

/// `NOT p`; an absent predicate stays absent.
pub fn not(p: impl Into<Option<Predicate>>) -> Option<Predicate> {
    p.into().map(|p| p.not())
}

/// AND of every present predicate.
pub fn all(predicates: impl IntoPredicates) -> Option<Predicate> {
    ExprNode::conjunction(predicates.into_predicates()).map(Expr::new)
}

/// OR of every present predicate.
pub fn any(predicates: impl IntoPredicates) -> Option<Predicate> {
    ExprNode::disjunction(predicates.into_predicates()).map(Expr::new)
}

fn combine(l: Option<Predicate>, r: Option<Predicate>, and: bool) -> Option<Predicate> {
    match (l, r) {
        (Some(l), Some(r)) => Some(Expr::new(l.into_node().combine(r.into_node(), and))),
        (l, None) => l,
        (None, r) => r,
    }
}

/// Accumulates predicates, ignoring absent ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateBuilder {
    current: Option<Predicate>,
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(&mut self, predicate: impl Into<Option<Predicate>>) -> &mut Self {
        self.current = and(self.current.take(), predicate);
        self
    }

    pub fn or(&mut self, predicate: impl Into<Option<Predicate>>) -> &mut Self {
        self.current = or(self.current.take(), predicate);
        self
    }

    /// AND the negation of `predicate`.
    pub fn and_not(&mut self, predicate: impl Into<Option<Predicate>>) -> &mut Self {
        self.current = and(self.current.take(), not(predicate));
        self
    }

    pub fn has_value(&self) -> bool {
        self.current.is_some()
    }

    pub fn build(&self) -> Option<Predicate> {
        self.current.clone()
    }
}

impl From<PredicateBuilder> for Option<Predicate> {
    fn from(builder: PredicateBuilder) -> Self {
        builder.current
    }
}

/// Zero or more predicates, as accepted by `where`, `having` and `on`.
///
/// Absent predicates contribute nothing.
pub trait IntoPredicates {
    fn into_predicates(self) -> Vec<ExprNode>;
}

impl IntoPredicates for Predicate {
    fn into_predicates(self) -> Vec<ExprNode> {
        vec![self.into_node()]
    }
}

impl IntoPredicates for &Predicate {
    fn into_predicates(self) -> Vec<ExprNode> {
        vec![self.node().clone()]
    }
}

impl IntoPredicates for Option<Predicate> {
    fn into_predicates(self) -> Vec<ExprNode> {
        self.map(Expr::into_node).into_iter().collect()
    }
}

impl IntoPredicates for PredicateBuilder {
    fn into_predicates(self) -> Vec<ExprNode> {
        self.current.into_predicates()
    }
}

impl IntoPredicates for &PredicateBuilder {
    fn into_predicates(self) -> Vec<ExprNode> {
        self.build().into_predicates()
    }
}

impl IntoPredicates for &mut PredicateBuilder {
    fn into_predicates(self) -> Vec<ExprNode> {
        self.build().into_predicates()
    }
}

impl<T: IntoPredicates, const N: usize> IntoPredicates for [T; N] {
    fn into_predicates(self) -> Vec<ExprNode> {
        self.into_iter().flat_map(IntoPredicates::into_predicates).collect()
    }
}

impl<T: IntoPredicates> IntoPredicates for Vec<T> {
    fn into_predicates(self) -> Vec<ExprNode> {
        self.into_iter().flat_map(IntoPredicates::into_predicates).collect()
    }
}

macro_rules! tuple_predicates {
    ($($T:ident),+) => {
        impl<$($T: IntoPredicates),+> IntoPredicates for ($($T,)+) {
            #[allow(non_snake_case)]
            fn into_predicates(self) -> Vec<ExprNode> {
                let ($($T,)+) = self;
                let mut out = Vec::new();
                $(out.extend($T.into_predicates());)+
                out
            }
        }
    };
}

tuple_predicates!(A);
tuple_predicates!(A, B);
tuple_predicates!(A, B, C);
tuple_predicates!(A, B, C, D);
tuple_predicates!(A, B, C, D, E);
tuple_predicates!(A, B, C, D, E, F);
tuple_predicates!(A, B, C, D, E, F, G);
tuple_predicates!(A, B, C, D, E, F, G, H);

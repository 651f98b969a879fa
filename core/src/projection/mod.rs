//! Mapping result rows onto Rust values.
//!
//! A [`Projection`] supplies the select list of a query and decodes each
//! result row into its `Output`. Projections compose: a tuple of projections
//! decodes left to right from one row.
//!
//! | Select | Output |
//! |---|---|
//! | `member.age` | `i32` |
//! | `member.username.nullable()` | `Option<String>` |
//! | `member` (an entity path) | `Member` |
//! | `team.optional()` | `Option<Team>` |
//! | `(member.username, member.age)` | `(String, i32)` |
//! | `Projections::tuple(..)` | [`Tuple`] |
//! | `Projections::fields::<D>(..)` / `bean` / `constructor` | `D` |

mod bean;
mod entity;
mod tuple;

pub use bean::{
    ConstructorBinding, ConstructorProjection, FieldBinding, FieldProjection, Projections,
    SetterBinding, SetterProjection, bind_arg,
};
pub use entity::{EntityProjection, FetchJoin, OptionalEntity};
pub use tuple::{Tuple, TupleKey, TupleProjection};

use core::marker::PhantomData;

use crate::error::{Result, SquallError};
use crate::expr::{Column, Expr, ExprNode};
use crate::query::Query;
use crate::types::DataType;
use crate::value::{FromValue, Value};

/// Sequential reader over one result row.
#[derive(Debug)]
pub struct RowCursor<'r> {
    values: &'r mut [Value],
    pos: usize,
}

impl<'r> RowCursor<'r> {
    pub fn new(values: &'r mut [Value]) -> Self {
        Self { values, pos: 0 }
    }

    /// Decode the next value as `T`.
    pub fn read<T: FromValue>(&mut self) -> Result<T> {
        T::from_value(self.read_value()?)
    }

    /// Take the next raw value.
    pub fn read_value(&mut self) -> Result<Value> {
        let found = self.values.len();
        let value = self
            .values
            .get_mut(self.pos)
            .ok_or(SquallError::ColumnCount {
                expected: self.pos + 1,
                found,
            })?;
        self.pos += 1;
        Ok(core::mem::take(value))
    }

    /// Up to `n` upcoming values, without consuming them.
    pub fn peek(&self, n: usize) -> &[Value] {
        let end = (self.pos + n).min(self.values.len());
        &self.values[self.pos..end]
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(SquallError::ColumnCount {
                expected: self.pos + n,
                found: self.values.len(),
            });
        }
        self.pos += n;
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.values.len() - self.pos
    }
}

/// Select list plus row decoder.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a query projection",
    label = "select expressions, entity paths, tuples of those, or a `Projections::*` binding"
)]
pub trait Projection {
    type Output;

    fn columns(&self) -> Vec<ExprNode>;

    fn decode(&self, row: &mut RowCursor<'_>) -> Result<Self::Output>;

    /// Checks that can run before the query is sent.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Take part in a fetch join; returns `true` if this projection owns
    /// the joined relation.
    fn fetch(&mut self, join: &FetchJoin) -> bool {
        let _ = join;
        false
    }
}

/// Conversion into a [`Projection`], as accepted by `select`.
pub trait IntoProjection {
    type Projection: Projection;

    fn into_projection(self) -> Self::Projection;
}

impl<K: DataType> Projection for Expr<K> {
    type Output = K::Native;

    fn columns(&self) -> Vec<ExprNode> {
        vec![self.node().clone()]
    }

    fn decode(&self, row: &mut RowCursor<'_>) -> Result<Self::Output> {
        row.read()
    }
}

/// A single expression decoded as `Option`.
#[derive(Debug, Clone, PartialEq)]
pub struct Nullable<K> {
    node: ExprNode,
    _kind: PhantomData<K>,
}

impl<K: DataType> Nullable<K> {
    pub fn new(node: ExprNode) -> Self {
        Self {
            node,
            _kind: PhantomData,
        }
    }
}

impl<K: DataType> Projection for Nullable<K> {
    type Output = Option<K::Native>;

    fn columns(&self) -> Vec<ExprNode> {
        vec![self.node.clone()]
    }

    fn decode(&self, row: &mut RowCursor<'_>) -> Result<Self::Output> {
        row.read()
    }
}

macro_rules! identity_projection {
    ($($ty:ident<$param:ident: $bound:path>),*) => {
        $(
            impl<$param: $bound> IntoProjection for $ty<$param> {
                type Projection = Self;

                fn into_projection(self) -> Self {
                    self
                }
            }
        )*
    };
}

identity_projection!(
    Expr<K: DataType>,
    Nullable<K: DataType>,
    EntityProjection<E: crate::schema::Entity>,
    OptionalEntity<E: crate::schema::Entity>,
    FieldProjection<D: FieldBinding>,
    SetterProjection<D: SetterBinding>,
    ConstructorProjection<D: ConstructorBinding>
);

impl IntoProjection for TupleProjection {
    type Projection = Self;

    fn into_projection(self) -> Self {
        self
    }
}

impl<K: DataType> IntoProjection for &Expr<K> {
    type Projection = Expr<K>;

    fn into_projection(self) -> Expr<K> {
        self.clone()
    }
}

impl<K: DataType> IntoProjection for Column<K> {
    type Projection = Expr<K>;

    fn into_projection(self) -> Expr<K> {
        self.expr()
    }
}

/// A scalar subquery in the select list.
impl<K: DataType> IntoProjection for Query<Expr<K>> {
    type Projection = Expr<K>;

    fn into_projection(self) -> Expr<K> {
        Expr::new(ExprNode::Subquery(Box::new(self.into_spec())))
    }
}

macro_rules! tuple_projection {
    ($($T:ident),+) => {
        impl<$($T: Projection),+> Projection for ($($T,)+) {
            type Output = ($($T::Output,)+);

            #[allow(non_snake_case)]
            fn columns(&self) -> Vec<ExprNode> {
                let ($($T,)+) = self;
                let mut out = Vec::new();
                $(out.extend($T.columns());)+
                out
            }

            #[allow(non_snake_case)]
            fn decode(&self, row: &mut RowCursor<'_>) -> Result<Self::Output> {
                let ($($T,)+) = self;
                Ok(($($T.decode(row)?,)+))
            }

            #[allow(non_snake_case)]
            fn validate(&self) -> Result<()> {
                let ($($T,)+) = self;
                $($T.validate()?;)+
                Ok(())
            }

            #[allow(non_snake_case)]
            fn fetch(&mut self, join: &FetchJoin) -> bool {
                let ($($T,)+) = self;
                let mut owned = false;
                $(owned |= $T.fetch(join);)+
                owned
            }
        }

        impl<$($T: IntoProjection),+> IntoProjection for ($($T,)+) {
            type Projection = ($($T::Projection,)+);

            #[allow(non_snake_case)]
            fn into_projection(self) -> Self::Projection {
                let ($($T,)+) = self;
                ($($T.into_projection(),)+)
            }
        }
    };
}

tuple_projection!(A);
tuple_projection!(A, B);
tuple_projection!(A, B, C);
tuple_projection!(A, B, C, D);
tuple_projection!(A, B, C, D, E);
tuple_projection!(A, B, C, D, E, F);
tuple_projection!(A, B, C, D, E, F, G);
tuple_projection!(A, B, C, D, E, F, G, H);

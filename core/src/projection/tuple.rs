use std::sync::Arc;

use crate::error::{Result, SquallError};
use crate::expr::{Column, Expr, ExprNode, IntoNodes};
use crate::types::DataType;
use crate::value::{FromValue, Value};

use super::{Projection, RowCursor};

/// Heterogeneous projection read back by expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleProjection {
    keys: Arc<[ExprNode]>,
}

impl TupleProjection {
    pub fn new(exprs: impl IntoNodes) -> Self {
        Self {
            keys: exprs.into_nodes().into(),
        }
    }
}

impl Projection for TupleProjection {
    type Output = Tuple;

    fn columns(&self) -> Vec<ExprNode> {
        self.keys.to_vec()
    }

    fn decode(&self, row: &mut RowCursor<'_>) -> Result<Tuple> {
        let values = (0..self.keys.len())
            .map(|_| row.read_value())
            .collect::<Result<Vec<_>>>()?;
        Ok(Tuple {
            keys: Arc::clone(&self.keys),
            values,
        })
    }
}

/// An expression that can look up a value in a [`Tuple`].
pub trait TupleKey {
    type Kind: DataType;

    fn key_node(&self) -> ExprNode;
}

impl<K: DataType> TupleKey for Expr<K> {
    type Kind = K;

    fn key_node(&self) -> ExprNode {
        self.node().clone()
    }
}

impl<K: DataType> TupleKey for Column<K> {
    type Kind = K;

    fn key_node(&self) -> ExprNode {
        ExprNode::Column(self.column_ref())
    }
}

/// One row of a tuple projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    keys: Arc<[ExprNode]>,
    values: Vec<Value>,
}

impl Tuple {
    fn position(&self, key: &ExprNode) -> Option<usize> {
        self.keys
            .iter()
            .position(|k| k == key || k.unaliased() == key)
    }

    /// Value of `key`; `Ok(None)` when it is NULL.
    ///
    /// Fails if `key` was not part of the projection or its value does not
    /// decode as the key's type.
    pub fn try_get<Q: TupleKey>(
        &self,
        key: &Q,
    ) -> Result<Option<<Q::Kind as DataType>::Native>> {
        let node = key.key_node();
        let index = self.position(&node).ok_or_else(|| {
            SquallError::InvalidQuery(format!("{node:?} is not part of this tuple"))
        })?;
        Option::from_value(self.values[index].clone())
    }

    /// Value of `key`, or `None` if it is NULL, missing or mistyped.
    pub fn get<Q: TupleKey>(&self, key: &Q) -> Option<<Q::Kind as DataType>::Native> {
        self.try_get(key).ok().flatten()
    }

    /// Raw value at `index`.
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

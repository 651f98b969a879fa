//! Bulk UPDATE and DELETE statements.
//!
//! Bulk mutations run directly against the database. Entities fetched
//! earlier are plain values and are not refreshed; fetch again to observe
//! the new state.

use crate::error::{Result, SquallError};
use crate::expr::{Column, ColumnRef, ExprNode, IntoExpr};
use crate::predicate::IntoPredicates;
use crate::render::Renderer;
use crate::schema::EntityPath;
use crate::types::DataType;
use crate::value::Value;

use super::Source;

/// A statement executed for its affected row count.
pub trait Statement {
    fn render(&self, renderer: &mut Renderer<'_>) -> Result<()>;
}

/// `UPDATE target SET ... WHERE ...`
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    target: Source,
    assignments: Vec<(ColumnRef, ExprNode)>,
    filter: Vec<ExprNode>,
    problem: Option<String>,
}

pub fn update<P: EntityPath>(target: P) -> Update {
    Update {
        target: target.source(),
        assignments: Vec::new(),
        filter: Vec::new(),
        problem: None,
    }
}

impl Update {
    /// Assign `value` to `column`, which must belong to the updated entity.
    pub fn set<K: DataType, V: IntoExpr<K>>(self, column: Column<K>, value: V) -> Self {
        self.assign(column.column_ref(), value.into_node())
    }

    /// Assign NULL to `column`.
    pub fn set_null<K: DataType>(self, column: Column<K>) -> Self {
        self.assign(column.column_ref(), ExprNode::Literal(Value::Null))
    }

    fn assign(mut self, column: ColumnRef, value: ExprNode) -> Self {
        if column.qualifier != self.target.alias && self.problem.is_none() {
            self.problem = Some(format!(
                "cannot set `{}.{}` in an update of `{}`",
                column.qualifier, column.column, self.target.alias
            ));
        }
        self.assignments.push((column, value));
        self
    }

    pub fn r#where(mut self, predicates: impl IntoPredicates) -> Self {
        self.filter.extend(predicates.into_predicates());
        self
    }
}

impl Statement for Update {
    fn render(&self, r: &mut Renderer<'_>) -> Result<()> {
        if let Some(problem) = &self.problem {
            return Err(SquallError::InvalidQuery(problem.clone()));
        }
        if self.assignments.is_empty() {
            return Err(SquallError::InvalidQuery(format!(
                "update of `{}` has no assignments",
                self.target.entity.table
            )));
        }
        r.unqualify(self.target.alias);
        r.push_str("UPDATE ");
        r.push_ident(self.target.entity.table);
        r.push_str(" SET ");
        for (i, (column, value)) in self.assignments.iter().enumerate() {
            if i > 0 {
                r.push_str(", ");
            }
            r.push_ident(column.column);
            r.push_str(" = ");
            r.render_expr(value)?;
        }
        r.render_where(&self.filter)
    }
}

/// `DELETE FROM target WHERE ...`
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    target: Source,
    filter: Vec<ExprNode>,
}

pub fn delete<P: EntityPath>(target: P) -> Delete {
    Delete {
        target: target.source(),
        filter: Vec::new(),
    }
}

impl Delete {
    pub fn r#where(mut self, predicates: impl IntoPredicates) -> Self {
        self.filter.extend(predicates.into_predicates());
        self
    }
}

impl Statement for Delete {
    fn render(&self, r: &mut Renderer<'_>) -> Result<()> {
        r.unqualify(self.target.alias);
        r.push_str("DELETE FROM ");
        r.push_ident(self.target.entity.table);
        r.render_where(&self.filter)
    }
}

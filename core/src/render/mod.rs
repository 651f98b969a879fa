//! Single-pass SQL rendering.
//!
//! [`Renderer`] turns a [`SelectSpec`] or a [`Statement`] into SQL text and
//! an ordered parameter list. Literals are always bound as parameters;
//! LIMIT and OFFSET are written inline.
//!
//! [`Statement`]: crate::query::Statement

use smallvec::SmallVec;

use crate::dialect::SqlDialect;
use crate::error::{Result, SquallError};
use crate::expr::{BinaryOp, ColumnRef, ExprNode, FunctionCall};
use crate::query::{Join, SelectSpec, Source};
use crate::schema::{RelationKind, Schema};
use crate::value::Value;

/// Rendered SQL with its bound parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rendered {
    pub sql: String,
    pub params: SmallVec<[Value; 8]>,
}

pub struct Renderer<'a> {
    dialect: &'a dyn SqlDialect,
    schema: &'a Schema,
    sql: String,
    params: SmallVec<[Value; 8]>,
    /// Alias whose columns render without a qualifier (mutation targets)
    unqualified: Option<&'static str>,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn SqlDialect, schema: &'a Schema) -> Self {
        Self {
            dialect,
            schema,
            sql: String::with_capacity(128),
            params: SmallVec::new(),
            unqualified: None,
        }
    }

    pub fn dialect(&self) -> &'a dyn SqlDialect {
        self.dialect
    }

    pub fn finish(self) -> Rendered {
        Rendered {
            sql: self.sql,
            params: self.params,
        }
    }

    pub fn push_str(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    pub fn push_ident(&mut self, ident: &str) {
        self.dialect.quote_identifier(ident, &mut self.sql);
    }

    pub fn push_param(&mut self, value: Value) {
        self.params.push(value);
        self.dialect.placeholder(self.params.len(), &mut self.sql);
    }

    /// Render columns of `alias` without their qualifier.
    pub fn unqualify(&mut self, alias: &'static str) {
        self.unqualified = Some(alias);
    }

    pub fn render_select(&mut self, spec: &SelectSpec) -> Result<()> {
        self.render_select_body(spec, false)
    }

    /// `SELECT COUNT(*)` over the query with ordering and pagination removed.
    ///
    /// The select list collapses to `1` unless DISTINCT or HAVING depends on it.
    pub fn render_count(&mut self, spec: &SelectSpec) -> Result<()> {
        let inner = SelectSpec {
            order_by: Vec::new(),
            limit: None,
            offset: None,
            ..spec.clone()
        };
        let constant_columns = !inner.distinct && inner.having.is_empty();
        self.push_str("SELECT COUNT(*) FROM (");
        self.render_select_body(&inner, constant_columns)?;
        self.push_str(") AS ");
        self.push_ident("counted");
        Ok(())
    }

    fn render_select_body(&mut self, spec: &SelectSpec, constant_columns: bool) -> Result<()> {
        if spec.from.is_empty() {
            return Err(SquallError::InvalidQuery("query has no FROM source".into()));
        }
        self.push_str("SELECT ");
        if spec.distinct {
            self.push_str("DISTINCT ");
        }
        if constant_columns {
            self.push_str("1");
        } else {
            if spec.columns.is_empty() {
                return Err(SquallError::InvalidQuery("select list is empty".into()));
            }
            for (i, column) in spec.columns.iter().enumerate() {
                if i > 0 {
                    self.push_str(", ");
                }
                self.render_select_item(column)?;
            }
        }

        self.push_str(" FROM ");
        for (i, source) in spec.from.iter().enumerate() {
            if i > 0 {
                self.push_str(", ");
            }
            self.render_source(source);
        }
        for join in &spec.joins {
            self.render_join(join)?;
        }

        self.render_where(&spec.filter)?;
        if !spec.group_by.is_empty() {
            self.push_str(" GROUP BY ");
            self.render_list(&spec.group_by)?;
        }
        if let Some(having) = ExprNode::conjunction(spec.having.iter().cloned()) {
            self.push_str(" HAVING ");
            self.render_clause(&having)?;
        }
        if !spec.order_by.is_empty() {
            self.push_str(" ORDER BY ");
            let dialect = self.dialect;
            for (i, order) in spec.order_by.iter().enumerate() {
                if i > 0 {
                    self.push_str(", ");
                }
                dialect.render_order(order, self)?;
            }
        }
        self.dialect
            .render_pagination(spec.limit, spec.offset, &mut self.sql);
        Ok(())
    }

    fn render_select_item(&mut self, node: &ExprNode) -> Result<()> {
        match node {
            ExprNode::Alias { expr, name } => {
                self.render_expr(expr)?;
                self.push_str(" AS ");
                self.push_ident(name);
                Ok(())
            }
            other => self.render_expr(other),
        }
    }

    fn render_source(&mut self, source: &Source) {
        self.push_ident(source.entity.table);
        if source.alias != source.entity.table {
            self.push_str(" AS ");
            self.push_ident(source.alias);
        }
    }

    fn render_join(&mut self, join: &Join) -> Result<()> {
        self.push_str(" ");
        self.push_str(join.kind.as_sql());
        self.push_str(" ");
        self.render_source(&join.target);

        let mut conditions = Vec::with_capacity(join.on.len() + 1);
        if let Some(relation) = &join.relation {
            let (rel, target) = self
                .schema
                .resolve_relation(relation.source_entity, relation.name)?;
            if target.name != join.target.entity.name {
                return Err(SquallError::InvalidQuery(format!(
                    "relation `{}.{}` leads to `{}`, not `{}`",
                    relation.source_entity, relation.name, target.name, join.target.entity.name
                )));
            }
            let source_column = key(relation.source_alias, rel.source_column);
            let target_column = key(join.target.alias, rel.target_column);
            conditions.push(match rel.kind {
                RelationKind::ManyToOne => {
                    ExprNode::binary(BinaryOp::Eq, source_column, target_column)
                }
                RelationKind::OneToMany => {
                    ExprNode::binary(BinaryOp::Eq, target_column, source_column)
                }
            });
        }
        conditions.extend(join.on.iter().cloned());

        let Some(on) = ExprNode::conjunction(conditions) else {
            return Err(SquallError::InvalidQuery(format!(
                "join of `{}` has no ON condition",
                join.target.alias
            )));
        };
        self.push_str(" ON ");
        self.render_clause(&on)
    }

    /// ` WHERE ...` for the AND of `filter`; nothing when it is empty.
    pub fn render_where(&mut self, filter: &[ExprNode]) -> Result<()> {
        if let Some(filter) = ExprNode::conjunction(filter.iter().cloned()) {
            self.push_str(" WHERE ");
            self.render_clause(&filter)?;
        }
        Ok(())
    }

    /// A top-level condition: a conjunction is written without parentheses.
    fn render_clause(&mut self, node: &ExprNode) -> Result<()> {
        match node {
            ExprNode::And(parts) if !parts.is_empty() => self.render_separated(" AND ", parts),
            other => self.render_expr(other),
        }
    }

    pub fn render_list(&mut self, nodes: &[ExprNode]) -> Result<()> {
        self.render_separated(", ", nodes)
    }

    fn render_separated(&mut self, separator: &str, nodes: &[ExprNode]) -> Result<()> {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.push_str(separator);
            }
            self.render_expr(node)?;
        }
        Ok(())
    }

    /// `open a sep b sep c close`
    pub fn render_joined(
        &mut self,
        open: &str,
        separator: &str,
        close: &str,
        nodes: &[ExprNode],
    ) -> Result<()> {
        self.push_str(open);
        self.render_separated(separator, nodes)?;
        self.push_str(close);
        Ok(())
    }

    /// `NAME([DISTINCT] args...)`
    pub fn render_call(&mut self, name: &str, call: &FunctionCall) -> Result<()> {
        self.push_str(name);
        self.push_str("(");
        if call.distinct {
            self.push_str("DISTINCT ");
        }
        self.render_list(&call.args)?;
        self.push_str(")");
        Ok(())
    }

    /// `CAST(arg AS ty)` for a single-argument call.
    pub fn render_cast(&mut self, args: &[ExprNode], ty: &str) -> Result<()> {
        let [arg] = args else {
            return Err(SquallError::InvalidQuery(format!(
                "cast expects one argument, got {}",
                args.len()
            )));
        };
        self.push_str("CAST(");
        self.render_expr(arg)?;
        self.push_str(" AS ");
        self.push_str(ty);
        self.push_str(")");
        Ok(())
    }

    fn render_column(&mut self, column: &ColumnRef) {
        if self.unqualified != Some(column.qualifier) {
            self.push_ident(column.qualifier);
            self.push_str(".");
        }
        self.push_ident(column.column);
    }

    pub fn render_expr(&mut self, node: &ExprNode) -> Result<()> {
        match node {
            ExprNode::Column(column) => self.render_column(column),
            ExprNode::Literal(Value::Null) => self.push_str("NULL"),
            ExprNode::Literal(value) => self.push_param(value.clone()),
            ExprNode::Binary { op, left, right } => {
                if op.is_arithmetic() {
                    self.push_str("(");
                }
                self.render_expr(left)?;
                self.push_str(" ");
                self.push_str(op.as_sql());
                self.push_str(" ");
                self.render_expr(right)?;
                if *op == BinaryOp::LikeEscaped {
                    self.dialect.like_escape(&mut self.sql);
                }
                if op.is_arithmetic() {
                    self.push_str(")");
                }
            }
            ExprNode::And(parts) if parts.is_empty() => self.push_str("1 = 1"),
            ExprNode::Or(parts) if parts.is_empty() => self.push_str("1 = 0"),
            ExprNode::And(parts) => self.render_joined("(", " AND ", ")", parts)?,
            ExprNode::Or(parts) => self.render_joined("(", " OR ", ")", parts)?,
            ExprNode::Not(inner) => {
                self.push_str("NOT (");
                self.render_expr(inner)?;
                self.push_str(")");
            }
            ExprNode::IsNull { expr, negated } => {
                self.render_expr(expr)?;
                self.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            ExprNode::Between { expr, low, high } => {
                self.render_expr(expr)?;
                self.push_str(" BETWEEN ");
                self.render_expr(low)?;
                self.push_str(" AND ");
                self.render_expr(high)?;
            }
            ExprNode::InList {
                list, negated: false, ..
            } if list.is_empty() => self.push_str("1 = 0"),
            ExprNode::InList {
                list, negated: true, ..
            } if list.is_empty() => self.push_str("1 = 1"),
            ExprNode::InList {
                expr,
                list,
                negated,
            } => {
                self.render_expr(expr)?;
                self.push_str(if *negated { " NOT IN " } else { " IN " });
                self.render_joined("(", ", ", ")", list)?;
            }
            ExprNode::InSubquery {
                expr,
                query,
                negated,
            } => {
                self.render_expr(expr)?;
                self.push_str(if *negated { " NOT IN (" } else { " IN (" });
                self.render_select(query)?;
                self.push_str(")");
            }
            ExprNode::Function(call) => {
                let dialect = self.dialect;
                dialect.render_function(call, self)?;
            }
            ExprNode::CountAll => self.push_str("COUNT(*)"),
            ExprNode::Case {
                operand,
                branches,
                default,
            } => {
                self.push_str("CASE");
                if let Some(operand) = operand {
                    self.push_str(" ");
                    self.render_expr(operand)?;
                }
                for (when, then) in branches {
                    self.push_str(" WHEN ");
                    self.render_expr(when)?;
                    self.push_str(" THEN ");
                    self.render_expr(then)?;
                }
                self.push_str(" ELSE ");
                self.render_expr(default)?;
                self.push_str(" END");
            }
            ExprNode::Subquery(query) => {
                self.push_str("(");
                self.render_select(query)?;
                self.push_str(")");
            }
            ExprNode::Alias { expr, .. } => self.render_expr(expr)?,
        }
        Ok(())
    }
}

fn key(qualifier: &'static str, column: &'static str) -> ExprNode {
    ExprNode::Column(ColumnRef {
        qualifier,
        column,
        field: column,
    })
}

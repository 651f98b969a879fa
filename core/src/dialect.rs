//! Pluggable per-dialect SQL spelling.
//!
//! The renderer walks the expression tree once and defers to a
//! [`SqlDialect`] for everything that differs between backends: identifier
//! quoting, placeholders, function names, NULL ordering and pagination.
//! Implement the trait to support another backend or to override a built-in.

use squall_types::Dialect;

use crate::error::Result;
use crate::expr::{FunctionCall, NullOrdering, OrderSpec};
use crate::render::Renderer;

pub trait SqlDialect: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Write `ident` quoted. Defaults to ANSI double quotes.
    fn quote_identifier(&self, ident: &str, out: &mut String) {
        out.push('"');
        for c in ident.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
    }

    /// Write the placeholder for the 1-based parameter `index`.
    fn placeholder(&self, index: usize, out: &mut String) {
        let _ = index;
        out.push('?');
    }

    /// Write a function call. Canonical names with dialect-specific
    /// spellings are `concat` and `to_text`; anything else renders as
    /// `NAME(args...)`.
    fn render_function(&self, call: &FunctionCall, r: &mut Renderer<'_>) -> Result<()> {
        match call.name.as_str() {
            "concat" => r.render_joined("(", " || ", ")", &call.args),
            "to_text" => r.render_cast(&call.args, "TEXT"),
            _ => r.render_call(&call.name.to_uppercase(), call),
        }
    }

    /// Write one ORDER BY key.
    fn render_order(&self, order: &OrderSpec, r: &mut Renderer<'_>) -> Result<()> {
        r.render_expr(order.expr.unaliased())?;
        r.push_str(" ");
        r.push_str(order.direction.as_sql());
        match order.nulls {
            NullOrdering::Unspecified => {}
            NullOrdering::First => r.push_str(" NULLS FIRST"),
            NullOrdering::Last => r.push_str(" NULLS LAST"),
        }
        Ok(())
    }

    /// Write the ESCAPE clause of a literal-match LIKE, including the
    /// leading space.
    fn like_escape(&self, out: &mut String) {
        out.push_str(r" ESCAPE '\'");
    }

    /// Write the LIMIT/OFFSET tail, including the leading space.
    fn render_pagination(&self, limit: Option<u64>, offset: Option<u64>, out: &mut String) {
        if let Some(limit) = limit {
            out.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = offset {
            out.push_str(&format!(" OFFSET {offset}"));
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    fn render_pagination(&self, limit: Option<u64>, offset: Option<u64>, out: &mut String) {
        match (limit, offset) {
            (None, None) => {}
            (Some(limit), None) => out.push_str(&format!(" LIMIT {limit}")),
            (limit, Some(offset)) => match limit {
                Some(limit) => out.push_str(&format!(" LIMIT {limit} OFFSET {offset}")),
                None => out.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn dialect(&self) -> Dialect {
        Dialect::PostgreSQL
    }

    fn placeholder(&self, index: usize, out: &mut String) {
        out.push_str(&format!("${index}"));
    }

    fn render_function(&self, call: &FunctionCall, r: &mut Renderer<'_>) -> Result<()> {
        match call.name.as_str() {
            "concat" => r.render_joined("(", " || ", ")", &call.args),
            "to_text" => r.render_cast(&call.args, "TEXT"),
            "length" => r.render_call("CHAR_LENGTH", call),
            _ => r.render_call(&call.name.to_uppercase(), call),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl SqlDialect for MySqlDialect {
    fn dialect(&self) -> Dialect {
        Dialect::MySQL
    }

    fn quote_identifier(&self, ident: &str, out: &mut String) {
        out.push('`');
        for c in ident.chars() {
            if c == '`' {
                out.push('`');
            }
            out.push(c);
        }
        out.push('`');
    }

    fn render_function(&self, call: &FunctionCall, r: &mut Renderer<'_>) -> Result<()> {
        match call.name.as_str() {
            "concat" => r.render_call("CONCAT", call),
            "to_text" => r.render_cast(&call.args, "CHAR"),
            "length" => r.render_call("CHAR_LENGTH", call),
            _ => r.render_call(&call.name.to_uppercase(), call),
        }
    }

    /// Backslash is itself an escape inside MySQL string literals.
    fn like_escape(&self, out: &mut String) {
        out.push_str(r" ESCAPE '\\'");
    }

    /// MySQL has no NULLS FIRST/LAST; sort on `expr IS NULL` first.
    fn render_order(&self, order: &OrderSpec, r: &mut Renderer<'_>) -> Result<()> {
        let expr = order.expr.unaliased();
        match order.nulls {
            NullOrdering::Unspecified => {}
            NullOrdering::First => {
                r.render_expr(expr)?;
                r.push_str(" IS NULL DESC, ");
            }
            NullOrdering::Last => {
                r.render_expr(expr)?;
                r.push_str(" IS NULL ASC, ");
            }
        }
        r.render_expr(expr)?;
        r.push_str(" ");
        r.push_str(order.direction.as_sql());
        Ok(())
    }

    fn render_pagination(&self, limit: Option<u64>, offset: Option<u64>, out: &mut String) {
        match (limit, offset) {
            (None, None) => {}
            (Some(limit), None) => out.push_str(&format!(" LIMIT {limit}")),
            (limit, Some(offset)) => {
                let limit = limit.unwrap_or(u64::MAX);
                out.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
            }
        }
    }
}

static SQLITE: SqliteDialect = SqliteDialect;
static POSTGRES: PostgresDialect = PostgresDialect;
static MYSQL: MySqlDialect = MySqlDialect;

/// The built-in renderer for `dialect`.
pub fn builtin(dialect: Dialect) -> &'static dyn SqlDialect {
    match dialect {
        Dialect::SQLite => &SQLITE,
        Dialect::PostgreSQL => &POSTGRES,
        Dialect::MySQL => &MYSQL,
    }
}

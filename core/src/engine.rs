//! Query execution.
//!
//! [`Squall`] owns a [`Session`] and a [`Schema`], renders queries for the
//! session's dialect and maps the returned rows through the query's
//! projection. Each call renders and runs exactly one statement; nothing is
//! cached between calls.

use std::sync::Arc;

use squall_types::{Dialect, SqlType};

use crate::config::EngineConfig;
use crate::dialect::{self, SqlDialect};
use crate::error::{Result, SquallError};
use crate::projection::{Projection, RowCursor};
use crate::query::{Query, SelectSpec, Statement};
use crate::render::{Rendered, Renderer};
use crate::schema::Schema;
use crate::session::{Row, Session};
use crate::trace::{squall_trace_mutation, squall_trace_query, squall_warn_unordered};

/// Execution engine over a backend session.
///
/// ```ignore
/// let mut db = Squall::new(conn, Schema::builder().entity::<Member>().entity::<Team>().build());
/// let member = MemberPath::default();
/// let adults = db.fetch(&select_from(member).r#where(member.age.goe(18)))?;
/// ```
pub struct Squall<S> {
    session: S,
    schema: Schema,
    config: EngineConfig,
    renderer: Option<Arc<dyn SqlDialect>>,
}

impl<S: Session> Squall<S> {
    pub fn new(session: S, schema: Schema) -> Self {
        Self {
            session,
            schema,
            config: EngineConfig::default(),
            renderer: None,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Render with a custom [`SqlDialect`] instead of a built-in one.
    pub fn with_renderer(mut self, renderer: impl SqlDialect + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Dialect queries are rendered for.
    pub fn dialect(&self) -> Dialect {
        match &self.renderer {
            Some(renderer) => renderer.dialect(),
            None => self.config.dialect.unwrap_or_else(|| self.session.dialect()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    fn sql_dialect(&self) -> &dyn SqlDialect {
        match &self.renderer {
            Some(renderer) => renderer.as_ref(),
            None => dialect::builtin(self.dialect()),
        }
    }

    /// Validate `query` and produce its select description.
    fn prepare<P: Projection>(&self, query: &Query<P>) -> Result<SelectSpec> {
        if let Some(problem) = query.problem() {
            return Err(SquallError::InvalidQuery(problem.to_string()));
        }
        query.projection().validate()?;
        Ok(query.spec())
    }

    fn render_spec(&self, spec: &SelectSpec) -> Result<Rendered> {
        let mut renderer = Renderer::new(self.sql_dialect(), &self.schema);
        renderer.render_select(spec)?;
        Ok(renderer.finish())
    }

    fn check_pagination(&self, spec: &SelectSpec, rendered: &Rendered) -> Result<()> {
        if spec.is_reproducible() {
            return Ok(());
        }
        if self.config.strict_pagination {
            return Err(SquallError::NonReproduciblePagination {
                sql: rendered.sql.clone(),
            });
        }
        squall_warn_unordered!(rendered.sql);
        Ok(())
    }

    /// Render `query` exactly as [`fetch`](Self::fetch) would send it.
    pub fn render<P: Projection>(&self, query: &Query<P>) -> Result<Rendered> {
        let spec = self.prepare(query)?;
        let rendered = self.render_spec(&spec)?;
        self.check_pagination(&spec, &rendered)?;
        Ok(rendered)
    }

    /// Render the row-count statement for `query`.
    pub fn render_count<P: Projection>(&self, query: &Query<P>) -> Result<Rendered> {
        let spec = self.prepare(query)?;
        let mut renderer = Renderer::new(self.sql_dialect(), &self.schema);
        renderer.render_count(&spec)?;
        Ok(renderer.finish())
    }

    /// Render a bulk mutation.
    pub fn render_statement<M: Statement>(&self, statement: &M) -> Result<Rendered> {
        let mut renderer = Renderer::new(self.sql_dialect(), &self.schema);
        statement.render(&mut renderer)?;
        Ok(renderer.finish())
    }

    fn run_query(&mut self, rendered: &Rendered) -> Result<Vec<Row>> {
        squall_trace_query!(rendered.sql, rendered.params.len());
        self.session
            .query(&rendered.sql, &rendered.params)
            .map_err(|source| SquallError::Backend {
                sql: rendered.sql.clone(),
                source,
            })
    }

    /// Every row matching `query`.
    pub fn fetch<P: Projection>(&mut self, query: &Query<P>) -> Result<Vec<P::Output>> {
        let spec = self.prepare(query)?;
        let rendered = self.render_spec(&spec)?;
        self.check_pagination(&spec, &rendered)?;
        let rows = self.run_query(&rendered)?;
        decode_rows(query.projection(), spec.columns.len(), rows)
    }

    /// The single row matching `query`, `None` when nothing matches.
    ///
    /// More than one match is a [`SquallError::NonUniqueResult`]. With
    /// [`EngineConfig::fetch_one_probe`] the statement is limited to two rows,
    /// so `rows` in the error is at most 2.
    pub fn fetch_one<P: Projection>(&mut self, query: &Query<P>) -> Result<Option<P::Output>> {
        let spec = self.prepare(query)?;
        let mut probe = spec.clone();
        if self.config.fetch_one_probe {
            probe.limit = Some(probe.limit.map_or(2, |limit| limit.min(2)));
        }
        let rendered = self.render_spec(&probe)?;
        self.check_pagination(&spec, &rendered)?;
        let rows = self.run_query(&rendered)?;
        if rows.len() > 1 {
            return Err(SquallError::NonUniqueResult {
                rows: rows.len(),
                sql: rendered.sql,
            });
        }
        Ok(decode_rows(query.projection(), spec.columns.len(), rows)?.pop())
    }

    /// The first row of `query`, limited to one row.
    pub fn fetch_first<P: Projection>(&mut self, query: &Query<P>) -> Result<Option<P::Output>> {
        let spec = self.prepare(query)?;
        let mut first = spec.clone();
        first.limit = Some(first.limit.map_or(1, |limit| limit.min(1)));
        let rendered = self.render_spec(&first)?;
        self.check_pagination(&spec, &rendered)?;
        let rows = self.run_query(&rendered)?;
        Ok(decode_rows(query.projection(), spec.columns.len(), rows)?
            .into_iter()
            .next())
    }

    /// Number of rows `query` matches, ignoring its ordering and pagination.
    ///
    /// Runs its own statement; a concurrent writer can make it disagree with
    /// a separate [`fetch`](Self::fetch) of the same query.
    pub fn fetch_count<P: Projection>(&mut self, query: &Query<P>) -> Result<u64> {
        let rendered = self.render_count(query)?;
        let rows = self.run_query(&rendered)?;
        let Some(mut row) = rows.into_iter().next() else {
            return Err(SquallError::Mapping {
                expected: SqlType::BigInt,
                found: "no rows".into(),
            });
        };
        let count: i64 = RowCursor::new(&mut row).read()?;
        u64::try_from(count).map_err(|_| SquallError::Mapping {
            expected: SqlType::BigInt,
            found: count.to_string(),
        })
    }

    /// Run a bulk update or delete and return the number of affected rows.
    ///
    /// The statement goes straight to the database. Values fetched earlier
    /// keep their old state; fetch again to see the change.
    pub fn execute<M: Statement>(&mut self, statement: &M) -> Result<u64> {
        let rendered = self.render_statement(statement)?;
        squall_trace_query!(rendered.sql, rendered.params.len());
        let affected = self
            .session
            .execute(&rendered.sql, &rendered.params)
            .map_err(|source| SquallError::Backend {
                sql: rendered.sql.clone(),
                source,
            })?;
        squall_trace_mutation!(rendered.sql, affected);
        Ok(affected)
    }
}

fn decode_rows<P: Projection>(
    projection: &P,
    width: usize,
    rows: Vec<Row>,
) -> Result<Vec<P::Output>> {
    rows.into_iter()
        .map(|mut row| {
            if row.len() != width {
                return Err(SquallError::ColumnCount {
                    expected: width,
                    found: row.len(),
                });
            }
            projection.decode(&mut RowCursor::new(&mut row))
        })
        .collect()
}

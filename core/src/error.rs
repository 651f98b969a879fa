use squall_types::SqlType;
use thiserror::Error;

/// Boxed error returned by a [`Session`](crate::session::Session) backend.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SquallError {
    /// A unique fetch matched more than one row
    #[error("expected at most one row, query returned {rows}: {sql}")]
    NonUniqueResult { rows: usize, sql: String },

    /// Result columns could not be bound to a constructor or setter target
    #[error("cannot bind projection to `{target}`: {reason}")]
    ConstructorBinding { target: &'static str, reason: String },

    /// A join named a relation the schema does not describe
    #[error("unresolved relation `{entity}.{relation}`")]
    UnresolvedRelation { entity: String, relation: String },

    /// The backend rejected or failed to run a statement
    #[error("backend error while executing `{sql}`: {source}")]
    Backend {
        sql: String,
        #[source]
        source: BackendError,
    },

    /// The query cannot be rendered as written
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Paginated query without an ORDER BY while strict pagination is on
    #[error("offset/limit without ORDER BY is not reproducible: {sql}")]
    NonReproduciblePagination { sql: String },

    /// A result value did not have the expected SQL type
    #[error("mapping error: expected {expected}, found {found}")]
    Mapping { expected: SqlType, found: String },

    /// A NULL arrived where the projection requires a value
    #[error("unexpected NULL for non-nullable {expected} value")]
    UnexpectedNull { expected: SqlType },

    /// A result row had a different width than the projection expects
    #[error("projection expects {expected} columns, row has {found}")]
    ColumnCount { expected: usize, found: usize },
}

impl SquallError {
    /// SQL text of the failing statement, when the error carries one.
    pub fn sql(&self) -> Option<&str> {
        match self {
            SquallError::NonUniqueResult { sql, .. }
            | SquallError::Backend { sql, .. }
            | SquallError::NonReproduciblePagination { sql } => Some(sql),
            _ => None,
        }
    }
}

/// Result type for query construction and execution
pub type Result<T> = std::result::Result<T, SquallError>;

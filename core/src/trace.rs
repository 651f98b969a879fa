//! Tracing helpers for query and mutation observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! The macros expand to nothing when the feature is disabled.

/// Emit a debug-level event with the SQL text and parameter count.
macro_rules! squall_trace_query {
    ($sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(sql = %$sql, params = $param_count, "squall.query");
    };
}

/// Emit a debug-level event for a bulk mutation and its affected row count.
///
/// Entities fetched before the mutation are plain values and keep their old
/// state; the event says so to make stale reads easy to spot in logs.
macro_rules! squall_trace_mutation {
    ($sql:expr, $affected:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(
            sql = %$sql,
            affected = $affected,
            "squall.mutation: previously fetched values are not refreshed"
        );
    };
}

/// Emit a warn-level event for offset/limit pagination without ordering.
macro_rules! squall_warn_unordered {
    ($sql:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(sql = %$sql, "squall.pagination: offset/limit without ORDER BY");
    };
}

pub(crate) use squall_trace_mutation;
pub(crate) use squall_trace_query;
pub(crate) use squall_warn_unordered;

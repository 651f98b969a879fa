//! Core of `squall`: schema descriptors, the typed expression tree, query
//! builders, SQL rendering, projections and the execution engine.
//!
//! Most users depend on the `squall` facade crate, which adds the
//! `#[derive(Entity)]` and `#[derive(Dto)]` macros and re-exports this crate
//! as `squall::core`.

mod trace;

pub mod config;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod expr;
pub mod predicate;
pub mod projection;
pub mod query;
pub mod render;
pub mod schema;
pub mod session;
pub mod types;
pub mod value;

#[cfg(test)]
mod fixtures;

pub use squall_types::{Dialect, SqlType};

pub use config::EngineConfig;
pub use engine::Squall;
pub use error::{Result, SquallError};
pub use expr::{Column, Expr, Predicate};
pub use predicate::PredicateBuilder;
pub use query::{Query, delete, select, select_from, update};
pub use schema::{Entity, EntityPath, Related, Schema};
pub use session::Session;
pub use value::Value;

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::Squall;
    pub use crate::error::SquallError;
    pub use crate::expr::{Column, Expr, Predicate, case, constant, count_all, function};
    pub use crate::predicate::{PredicateBuilder, all, and, any, not, or};
    pub use crate::projection::{IntoProjection, Projection, Projections, Tuple};
    pub use crate::query::{Query, delete, select, select_from, update};
    pub use crate::schema::{Entity, EntityPath, Related, Schema};
    pub use crate::session::Session;
    pub use crate::value::Value;
    pub use squall_types::Dialect;
}

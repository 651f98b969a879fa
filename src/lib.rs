//! # Squall
//!
//! Typed query construction and execution over relational backends, in the
//! style of QueryDSL.
//!
//! ## Quick Start
//!
//! ```rust
//! use squall::prelude::*;
//!
//! #[derive(Entity, Debug, Clone, PartialEq)]
//! struct Team {
//!     #[entity(id)]
//!     id: i64,
//!     name: String,
//! }
//!
//! #[derive(Entity, Debug, Clone, PartialEq)]
//! struct Member {
//!     #[entity(id)]
//!     id: i64,
//!     username: Option<String>,
//!     age: i32,
//!     #[entity(many_to_one(column = "team_id"))]
//!     team: Related<Team>,
//! }
//!
//! # fn main() -> squall::Result<()> {
//! let conn = rusqlite::Connection::open_in_memory().unwrap();
//! conn.execute_batch(
//!     "CREATE TABLE team (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
//!      CREATE TABLE member (id INTEGER PRIMARY KEY, username TEXT, age INTEGER NOT NULL,
//!                           team_id INTEGER REFERENCES team(id));
//!      INSERT INTO team VALUES (1, 'teamA');
//!      INSERT INTO member VALUES (1, 'member1', 10, 1), (2, 'member2', 20, 1);",
//! )
//! .unwrap();
//!
//! let schema = Schema::builder().entity::<Member>().entity::<Team>().build();
//! let mut db = Squall::new(conn, schema);
//!
//! let member = MemberPath::default();
//! let team = TeamPath::default();
//!
//! let found = db.fetch_one(&select_from(member).r#where(member.username.eq("member1")))?;
//! assert_eq!(found.map(|m| m.age), Some(10));
//!
//! let names = db.fetch(
//!     &select(member.username.nullable())
//!         .from(member)
//!         .join(member.team, team)
//!         .r#where(team.name.eq("teamA"))
//!         .order_by(member.age.desc()),
//! )?;
//! assert_eq!(names, vec![Some("member2".to_string()), Some("member1".to_string())]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Database Support
//!
//! | Database   | Driver    | Feature Flag    |
//! |------------|-----------|-----------------|
//! | SQLite     | rusqlite  | `rusqlite`      |
//! | PostgreSQL | postgres  | `postgres-sync` |
//!
//! Other backends implement [`Session`]; MySQL is supported at the rendering
//! level through [`core::dialect::MySqlDialect`].

pub use squall_core as core;
pub use squall_macros::{Dto, Entity};

pub use squall_core::{
    Column, Dialect, EngineConfig, Entity, EntityPath, Expr, Predicate, PredicateBuilder, Query,
    Related, Result, Schema, Session, SqlType, Squall, SquallError, Value, delete, select,
    select_from, update,
};

pub mod prelude {
    pub use squall_core::prelude::*;
    pub use squall_core::types::{BigInt, Bool, Double, Int, Text};
    pub use squall_macros::{Dto, Entity};
}

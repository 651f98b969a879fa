use ::rusqlite::Connection;
use squall::prelude::*;

use super::schema::{CREATE_TABLES, SEED, schema};

/// Seeded in-memory database wrapped in an engine.
pub fn setup_db() -> Squall<Connection> {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    conn.execute_batch(CREATE_TABLES)
        .expect("Failed to create tables");
    conn.execute_batch(SEED).expect("Failed to seed tables");
    Squall::new(conn, schema())
}

/// Database with the tables but no rows.
pub fn setup_empty_db() -> Squall<Connection> {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    conn.execute_batch(CREATE_TABLES)
        .expect("Failed to create tables");
    Squall::new(conn, schema())
}

/// Insert a raw member row outside of any query builder.
pub fn insert_member(db: &Squall<Connection>, username: Option<&str>, age: i32, team_id: Option<i64>) {
    db.session()
        .execute(
            "INSERT INTO member (username, age, team_id) VALUES (?1, ?2, ?3)",
            ::rusqlite::params![username, age, team_id],
        )
        .expect("Failed to insert member");
}

#[macro_export]
macro_rules! squall_test {
    ($name:ident, |$db:ident| $body:block) => {
        #[test]
        fn $name() -> ::squall::Result<()> {
            #[allow(unused_mut)]
            let mut $db = $crate::common::setup_db();
            $body
            Ok(())
        }
    };
}

use squall::prelude::*;

#[derive(Entity, Debug, Clone, PartialEq)]
#[entity(
    table = "team",
    one_to_many(name = "members", target = Member, column = "team_id")
)]
pub struct Team {
    #[entity(id)]
    pub id: i64,
    pub name: String,
}

#[derive(Entity, Debug, Clone, PartialEq)]
#[entity(table = "member")]
pub struct Member {
    #[entity(id)]
    pub id: i64,
    pub username: Option<String>,
    pub age: i32,
    #[entity(many_to_one(column = "team_id"))]
    pub team: Related<Team>,
}

#[derive(Dto, Debug, Default, Clone, PartialEq)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i32,
}

/// Same shape as [`MemberDto`] under different field names, bound through
/// aliases.
#[derive(Dto, Debug, Default, Clone, PartialEq)]
pub struct UserDto {
    pub name: Option<String>,
    pub age: i32,
}

pub fn schema() -> Schema {
    Schema::builder().entity::<Member>().entity::<Team>().build()
}

pub const CREATE_TABLES: &str = "
    CREATE TABLE team (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );
    CREATE TABLE member (
        id INTEGER PRIMARY KEY,
        username TEXT,
        age INTEGER NOT NULL,
        team_id INTEGER REFERENCES team(id)
    );
";

/// teamA: member1 (10), member2 (20); teamB: member3 (30), member4 (40)
pub const SEED: &str = "
    INSERT INTO team (id, name) VALUES (1, 'teamA'), (2, 'teamB');
    INSERT INTO member (id, username, age, team_id) VALUES
        (1, 'member1', 10, 1),
        (2, 'member2', 20, 1),
        (3, 'member3', 30, 2),
        (4, 'member4', 40, 2);
";

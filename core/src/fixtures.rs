//! Hand-written entities mirroring what `#[derive(Entity)]` generates,
//! for unit tests inside this crate.

use squall_types::SqlType;

use crate::error::{Result, SquallError};
use crate::expr::Column;
use crate::projection::{EntityProjection, IntoProjection, RowCursor};
use crate::query::{IntoSources, RelationPath, Source};
use crate::schema::{
    ColumnDef, Entity, EntityDef, EntityPath, Related, RelationDef, RelationKind,
};
use crate::types::{BigInt, Int, Text};

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team: Related<Team>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

impl Entity for Member {
    const DEF: &'static EntityDef = &EntityDef {
        name: "Member",
        table: "member",
        columns: &[
            ColumnDef {
                field: "id",
                column: "id",
                ty: SqlType::BigInt,
                nullable: false,
                primary_key: true,
            },
            ColumnDef {
                field: "username",
                column: "username",
                ty: SqlType::Text,
                nullable: true,
                primary_key: false,
            },
            ColumnDef {
                field: "age",
                column: "age",
                ty: SqlType::Integer,
                nullable: false,
                primary_key: false,
            },
            ColumnDef {
                field: "team",
                column: "team_id",
                ty: SqlType::BigInt,
                nullable: true,
                primary_key: false,
            },
        ],
        relations: &[RelationDef {
            name: "team",
            target: "Team",
            kind: RelationKind::ManyToOne,
            source_column: "team_id",
            target_column: "id",
        }],
    };

    type Path = MemberPath;

    fn from_row(row: &mut RowCursor<'_>) -> Result<Self> {
        Ok(Self {
            id: row.read()?,
            username: row.read()?,
            age: row.read()?,
            team: Related::unloaded(row.read_value()?),
        })
    }

    fn attach(&mut self, relation: &str, row: &mut RowCursor<'_>) -> Result<()> {
        match relation {
            "team" => {
                self.team = Related::loaded(Team::from_row_optional(row)?);
                Ok(())
            }
            _ => Err(SquallError::UnresolvedRelation {
                entity: "Member".into(),
                relation: relation.into(),
            }),
        }
    }
}

impl Entity for Team {
    const DEF: &'static EntityDef = &EntityDef {
        name: "Team",
        table: "team",
        columns: &[
            ColumnDef {
                field: "id",
                column: "id",
                ty: SqlType::BigInt,
                nullable: false,
                primary_key: true,
            },
            ColumnDef {
                field: "name",
                column: "name",
                ty: SqlType::Text,
                nullable: false,
                primary_key: false,
            },
        ],
        relations: &[RelationDef {
            name: "members",
            target: "Member",
            kind: RelationKind::OneToMany,
            source_column: "id",
            target_column: "team_id",
        }],
    };

    type Path = TeamPath;

    fn from_row(row: &mut RowCursor<'_>) -> Result<Self> {
        Ok(Self {
            id: row.read()?,
            name: row.read()?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MemberPath {
    alias: &'static str,
    pub id: Column<BigInt>,
    pub username: Column<Text>,
    pub age: Column<Int>,
    pub team: RelationPath<Team>,
}

impl MemberPath {
    pub const fn new(alias: &'static str) -> Self {
        Self {
            alias,
            id: Column::new(alias, "id", "id"),
            username: Column::new(alias, "username", "username"),
            age: Column::new(alias, "age", "age"),
            team: RelationPath::new(alias, "Member", "team", RelationKind::ManyToOne),
        }
    }
}

impl Default for MemberPath {
    fn default() -> Self {
        Self::new("member")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TeamPath {
    alias: &'static str,
    pub id: Column<BigInt>,
    pub name: Column<Text>,
    pub members: RelationPath<Member>,
}

impl TeamPath {
    pub const fn new(alias: &'static str) -> Self {
        Self {
            alias,
            id: Column::new(alias, "id", "id"),
            name: Column::new(alias, "name", "name"),
            members: RelationPath::new(alias, "Team", "members", RelationKind::OneToMany),
        }
    }
}

impl Default for TeamPath {
    fn default() -> Self {
        Self::new("team")
    }
}

macro_rules! path_impls {
    ($($path:ident => $entity:ident),*) => {
        $(
            impl EntityPath for $path {
                type Entity = $entity;

                fn alias(&self) -> &'static str {
                    self.alias
                }
            }

            impl IntoSources for $path {
                fn into_sources(self) -> Vec<Source> {
                    vec![self.source()]
                }
            }

            impl IntoProjection for $path {
                type Projection = EntityProjection<$entity>;

                fn into_projection(self) -> Self::Projection {
                    self.entity()
                }
            }
        )*
    };
}

path_impls!(MemberPath => Member, TeamPath => Team);

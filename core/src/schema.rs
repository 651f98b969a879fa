//! Entity metadata and the schema registry used to resolve joins.

use hashbrown::HashMap;
use squall_types::SqlType;

use crate::error::{Result, SquallError};
use crate::expr::{ColumnRef, Expr};
use crate::projection::{EntityProjection, OptionalEntity, RowCursor};
use crate::query::Source;
use crate::types::BigInt;
use crate::value::Value;

/// A mapped column of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Rust field name
    pub field: &'static str,
    /// SQL column name
    pub column: &'static str,
    pub ty: SqlType,
    pub nullable: bool,
    pub primary_key: bool,
}

/// Cardinality of a relation, seen from the entity that declares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Foreign key lives on the declaring entity
    ManyToOne,
    /// Foreign key lives on the target entity
    OneToMany,
}

/// A named relation between two entities.
///
/// For [`RelationKind::ManyToOne`] `source_column` is the foreign key on the
/// declaring entity and `target_column` the referenced key on the target.
/// For [`RelationKind::OneToMany`] `source_column` is the declaring entity's
/// key and `target_column` the foreign key on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationDef {
    pub name: &'static str,
    /// Entity name of the target
    pub target: &'static str,
    pub kind: RelationKind,
    pub source_column: &'static str,
    pub target_column: &'static str,
}

/// Static description of an entity: its table, columns and relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDef {
    pub name: &'static str,
    pub table: &'static str,
    /// Columns in row order; this is the order entities are selected and decoded in.
    pub columns: &'static [ColumnDef],
    pub relations: &'static [RelationDef],
}

impl EntityDef {
    pub fn column(&self, field: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.field == field)
    }

    pub fn primary_key(&self) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.primary_key)
    }

    pub fn relation(&self, name: &str) -> Option<&'static RelationDef> {
        self.relations.iter().find(|r| r.name == name)
    }
}

/// A mapped entity type.
///
/// Usually implemented with `#[derive(Entity)]`.
pub trait Entity: Sized + 'static {
    const DEF: &'static EntityDef;

    /// Generated path type exposing typed columns and relations.
    type Path: EntityPath<Entity = Self>;

    /// Decode one entity from the next `DEF.columns.len()` values.
    fn from_row(row: &mut RowCursor<'_>) -> Result<Self>;

    /// Decode an entity that may be absent, as produced by an outer join.
    ///
    /// Returns `None` when every column is NULL.
    fn from_row_optional(row: &mut RowCursor<'_>) -> Result<Option<Self>> {
        let width = Self::DEF.columns.len();
        if row.peek(width).iter().all(Value::is_null) {
            row.skip(width)?;
            return Ok(None);
        }
        Self::from_row(row).map(Some)
    }

    /// Populate the fetch-joined `relation` from the next values of `row`.
    fn attach(&mut self, relation: &str, row: &mut RowCursor<'_>) -> Result<()> {
        let _ = row;
        Err(SquallError::UnresolvedRelation {
            entity: Self::DEF.name.to_owned(),
            relation: relation.to_owned(),
        })
    }
}

/// An aliased reference to an entity inside a query.
///
/// The alias is a `'static` name so paths and their columns stay `Copy`.
pub trait EntityPath: Copy {
    type Entity: Entity;

    fn alias(&self) -> &'static str;

    fn source(&self) -> Source {
        Source {
            entity: <Self::Entity as Entity>::DEF,
            alias: self.alias(),
        }
    }

    /// `COUNT` over the primary key, or `COUNT(*)` for entities without one.
    fn count(&self) -> Expr<BigInt> {
        match <Self::Entity as Entity>::DEF.primary_key() {
            Some(pk) => Expr::<BigInt>::count_of(ColumnRef {
                qualifier: self.alias(),
                column: pk.column,
                field: pk.field,
            }),
            None => crate::expr::count_all(),
        }
    }

    /// Project the whole entity.
    fn entity(&self) -> EntityProjection<Self::Entity> {
        EntityProjection::new(self.alias())
    }

    /// Project the entity as `Option`, for the nullable side of an outer join.
    fn optional(&self) -> OptionalEntity<Self::Entity> {
        OptionalEntity::new(self.alias())
    }
}

/// Lazily loaded relation field of an entity.
///
/// A plain fetch leaves the relation [`Related::Unloaded`] holding the raw
/// foreign key. A fetch join fills it with the joined entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Related<T> {
    Unloaded(Value),
    Loaded(Option<Box<T>>),
}

impl<T> Related<T> {
    pub fn unloaded(key: Value) -> Self {
        Related::Unloaded(key)
    }

    pub fn loaded(value: Option<T>) -> Self {
        Related::Loaded(value.map(Box::new))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Related::Loaded(_))
    }

    /// The loaded entity, if the relation was fetched and is present.
    pub fn get(&self) -> Option<&T> {
        match self {
            Related::Loaded(value) => value.as_deref(),
            Related::Unloaded(_) => None,
        }
    }

    /// The foreign key of an unloaded relation.
    pub fn key(&self) -> Option<&Value> {
        match self {
            Related::Unloaded(key) => Some(key),
            Related::Loaded(_) => None,
        }
    }
}

impl<T> Default for Related<T> {
    fn default() -> Self {
        Related::Unloaded(Value::Null)
    }
}

/// Registry of entity definitions, keyed by entity name.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entities: HashMap<&'static str, &'static EntityDef>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn entity(&self, name: &str) -> Option<&'static EntityDef> {
        self.entities.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn entities(&self) -> impl Iterator<Item = &'static EntityDef> + '_ {
        self.entities.values().copied()
    }

    /// Look up `relation` on `entity` and the definition of its target.
    pub fn resolve_relation(
        &self,
        entity: &str,
        relation: &str,
    ) -> Result<(&'static RelationDef, &'static EntityDef)> {
        let unresolved = || SquallError::UnresolvedRelation {
            entity: entity.to_owned(),
            relation: relation.to_owned(),
        };
        let def = self.entity(entity).ok_or_else(unresolved)?;
        let rel = def.relation(relation).ok_or_else(unresolved)?;
        let target = self.entity(rel.target).ok_or_else(unresolved)?;
        Ok((rel, target))
    }

    /// Check that every relation points at a registered entity and at
    /// columns that exist on both sides.
    pub fn validate(&self) -> Result<()> {
        for def in self.entities() {
            for rel in def.relations {
                let (_, target) = self.resolve_relation(def.name, rel.name)?;
                let (local, remote) = match rel.kind {
                    RelationKind::ManyToOne => (def, target),
                    RelationKind::OneToMany => (target, def),
                };
                let (fk, key) = match rel.kind {
                    RelationKind::ManyToOne => (rel.source_column, rel.target_column),
                    RelationKind::OneToMany => (rel.target_column, rel.source_column),
                };
                if !local.columns.iter().any(|c| c.column == fk) {
                    return Err(SquallError::InvalidQuery(format!(
                        "relation `{}.{}` uses unknown column `{}.{fk}`",
                        def.name, rel.name, local.table
                    )));
                }
                if !remote.columns.iter().any(|c| c.column == key) {
                    return Err(SquallError::InvalidQuery(format!(
                        "relation `{}.{}` references unknown column `{}.{key}`",
                        def.name, rel.name, remote.table
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    entities: HashMap<&'static str, &'static EntityDef>,
}

impl SchemaBuilder {
    pub fn entity<E: Entity>(self) -> Self {
        self.def(E::DEF)
    }

    pub fn def(mut self, def: &'static EntityDef) -> Self {
        self.entities.insert(def.name, def);
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            entities: self.entities,
        }
    }
}

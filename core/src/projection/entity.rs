use core::marker::PhantomData;

use crate::error::Result;
use crate::expr::{ColumnRef, ExprNode};
use crate::query::Source;
use crate::schema::{Entity, EntityDef};

use super::{Projection, RowCursor};

/// A fetch join the owning entity projection loads into its relation field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchJoin {
    /// Alias of the entity that owns the relation
    pub source_alias: &'static str,
    pub relation: &'static str,
    pub target: Source,
}

fn entity_columns(def: &'static EntityDef, alias: &'static str) -> impl Iterator<Item = ExprNode> {
    def.columns.iter().map(move |column| {
        ExprNode::Column(ColumnRef {
            qualifier: alias,
            column: column.column,
            field: column.field,
        })
    })
}

fn fetch_columns(fetches: &[FetchJoin]) -> impl Iterator<Item = ExprNode> + '_ {
    fetches
        .iter()
        .flat_map(|fetch| entity_columns(fetch.target.entity, fetch.target.alias))
}

/// Selects every mapped column of `E` under one alias.
pub struct EntityProjection<E> {
    alias: &'static str,
    fetches: Vec<FetchJoin>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityProjection<E> {
    fn clone(&self) -> Self {
        Self {
            alias: self.alias,
            fetches: self.fetches.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> core::fmt::Debug for EntityProjection<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EntityProjection")
            .field("entity", &E::DEF.name)
            .field("alias", &self.alias)
            .field("fetches", &self.fetches)
            .finish()
    }
}

impl<E: Entity> EntityProjection<E> {
    pub fn new(alias: &'static str) -> Self {
        Self {
            alias,
            fetches: Vec::new(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Projection for EntityProjection<E> {
    type Output = E;

    fn columns(&self) -> Vec<ExprNode> {
        entity_columns(E::DEF, self.alias)
            .chain(fetch_columns(&self.fetches))
            .collect()
    }

    fn decode(&self, row: &mut RowCursor<'_>) -> Result<E> {
        let mut entity = E::from_row(row)?;
        for fetch in &self.fetches {
            entity.attach(fetch.relation, row)?;
        }
        Ok(entity)
    }

    fn fetch(&mut self, join: &FetchJoin) -> bool {
        if join.source_alias != self.alias {
            return false;
        }
        self.fetches.push(*join);
        true
    }
}

/// Like [`EntityProjection`], but an all-NULL row decodes to `None`.
pub struct OptionalEntity<E> {
    inner: EntityProjection<E>,
}

impl<E> Clone for OptionalEntity<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E: Entity> core::fmt::Debug for OptionalEntity<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("OptionalEntity").field(&self.inner).finish()
    }
}

impl<E: Entity> OptionalEntity<E> {
    pub fn new(alias: &'static str) -> Self {
        Self {
            inner: EntityProjection::new(alias),
        }
    }
}

impl<E: Entity> Projection for OptionalEntity<E> {
    type Output = Option<E>;

    fn columns(&self) -> Vec<ExprNode> {
        self.inner.columns()
    }

    fn decode(&self, row: &mut RowCursor<'_>) -> Result<Option<E>> {
        match E::from_row_optional(row)? {
            Some(mut entity) => {
                for fetch in &self.inner.fetches {
                    entity.attach(fetch.relation, row)?;
                }
                Ok(Some(entity))
            }
            None => {
                let width = self
                    .inner
                    .fetches
                    .iter()
                    .map(|fetch| fetch.target.entity.columns.len())
                    .sum();
                row.skip(width)?;
                Ok(None)
            }
        }
    }

    fn fetch(&mut self, join: &FetchJoin) -> bool {
        self.inner.fetch(join)
    }
}

//! Immutable query values and their builders.
//!
//! A [`Query`] pairs a projection with a [`SelectSpec`]. Every builder method
//! consumes the query and returns the extended one, so a query is a plain
//! value: clone it to branch, pass it around, reuse it for `fetch` and
//! `fetch_count`.
//!
//! Mistakes that cannot be caught by the type system (an `on` without a
//! join, a fetch join whose owner is not selected) are recorded and reported
//! as [`SquallError::InvalidQuery`](crate::error::SquallError::InvalidQuery)
//! when the query is rendered.

mod mutation;

pub use mutation::{Delete, Statement, Update, delete, update};

use core::marker::PhantomData;

use compact_str::CompactString;

use crate::expr::{Expr, ExprNode, IntoNodes, IntoOrderBy, Operand, OrderSpec};
use crate::predicate::IntoPredicates;
use crate::projection::{FetchJoin, IntoProjection, Projection};
use crate::schema::{Entity, EntityDef, EntityPath, RelationKind};
use crate::types::DataType;

/// An aliased entity in FROM or JOIN position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Source {
    pub entity: &'static EntityDef,
    pub alias: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

impl JoinKind {
    pub const fn as_sql(&self) -> &'static str {
        match self {
            JoinKind::Inner => "JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        }
    }
}

/// The relation a join follows, as named on the source entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationRef {
    pub source_alias: &'static str,
    pub source_entity: &'static str,
    pub name: &'static str,
    pub kind: RelationKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub target: Source,
    /// `None` for joins on an arbitrary condition
    pub relation: Option<RelationRef>,
    /// Extra ON conditions, ANDed with the relation's key condition
    pub on: Vec<ExprNode>,
    pub fetch: bool,
}

/// Dialect-neutral description of a SELECT.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectSpec {
    pub columns: Vec<ExprNode>,
    pub distinct: bool,
    pub from: Vec<Source>,
    pub joins: Vec<Join>,
    pub filter: Vec<ExprNode>,
    pub group_by: Vec<ExprNode>,
    pub having: Vec<ExprNode>,
    pub order_by: Vec<OrderSpec>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SelectSpec {
    /// Whether pagination, if any, yields a deterministic page.
    pub fn is_reproducible(&self) -> bool {
        (self.limit.is_none() && self.offset.is_none()) || !self.order_by.is_empty()
    }
}

/// A relation field on a generated entity path, leading to `T`.
pub struct RelationPath<T> {
    relation: RelationRef,
    _target: PhantomData<fn() -> T>,
}

impl<T: Entity> RelationPath<T> {
    pub const fn new(
        source_alias: &'static str,
        source_entity: &'static str,
        name: &'static str,
        kind: RelationKind,
    ) -> Self {
        Self {
            relation: RelationRef {
                source_alias,
                source_entity,
                name,
                kind,
            },
            _target: PhantomData,
        }
    }

    pub const fn relation(&self) -> RelationRef {
        self.relation
    }
}

impl<T> Clone for RelationPath<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RelationPath<T> {}

impl<T> core::fmt::Debug for RelationPath<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("RelationPath").field(&self.relation).finish()
    }
}

/// One or more FROM sources.
pub trait IntoSources {
    fn into_sources(self) -> Vec<Source>;
}

impl IntoSources for Source {
    fn into_sources(self) -> Vec<Source> {
        vec![self]
    }
}

macro_rules! tuple_sources {
    ($($T:ident),+) => {
        impl<$($T: IntoSources),+> IntoSources for ($($T,)+) {
            #[allow(non_snake_case)]
            fn into_sources(self) -> Vec<Source> {
                let ($($T,)+) = self;
                let mut out = Vec::new();
                $(out.extend($T.into_sources());)+
                out
            }
        }
    };
}

tuple_sources!(A);
tuple_sources!(A, B);
tuple_sources!(A, B, C);
tuple_sources!(A, B, C, D);

/// A SELECT query with projection `P`.
#[derive(Debug, Clone)]
pub struct Query<P> {
    projection: P,
    spec: SelectSpec,
    problem: Option<String>,
}

/// Start a query selecting `projection`.
pub fn select<I: IntoProjection>(projection: I) -> Query<I::Projection> {
    Query {
        projection: projection.into_projection(),
        spec: SelectSpec::default(),
        problem: None,
    }
}

/// `select(path).from(path)`: select whole entities from one source.
pub fn select_from<P: EntityPath>(
    path: P,
) -> Query<crate::projection::EntityProjection<P::Entity>> {
    select(path.entity()).from(path.source())
}

impl<P: Projection> Query<P> {
    pub fn from(mut self, sources: impl IntoSources) -> Self {
        self.spec.from.extend(sources.into_sources());
        self
    }

    /// Inner join following `relation` to `target`.
    pub fn join<T: Entity, J: EntityPath<Entity = T>>(self, relation: RelationPath<T>, target: J) -> Self {
        self.push_relation_join(JoinKind::Inner, relation, target)
    }

    pub fn left_join<T: Entity, J: EntityPath<Entity = T>>(self, relation: RelationPath<T>, target: J) -> Self {
        self.push_relation_join(JoinKind::Left, relation, target)
    }

    pub fn right_join<T: Entity, J: EntityPath<Entity = T>>(self, relation: RelationPath<T>, target: J) -> Self {
        self.push_relation_join(JoinKind::Right, relation, target)
    }

    /// Inner join on an arbitrary condition, without a mapped relation.
    pub fn join_on<J: EntityPath>(self, target: J, on: impl IntoPredicates) -> Self {
        self.push_join(JoinKind::Inner, target.source(), None, on.into_predicates())
    }

    pub fn left_join_on<J: EntityPath>(self, target: J, on: impl IntoPredicates) -> Self {
        self.push_join(JoinKind::Left, target.source(), None, on.into_predicates())
    }

    pub fn right_join_on<J: EntityPath>(self, target: J, on: impl IntoPredicates) -> Self {
        self.push_join(JoinKind::Right, target.source(), None, on.into_predicates())
    }

    fn push_relation_join<T: Entity, J: EntityPath<Entity = T>>(
        self,
        kind: JoinKind,
        relation: RelationPath<T>,
        target: J,
    ) -> Self {
        self.push_join(kind, target.source(), Some(relation.relation()), Vec::new())
    }

    fn push_join(
        mut self,
        kind: JoinKind,
        target: Source,
        relation: Option<RelationRef>,
        on: Vec<ExprNode>,
    ) -> Self {
        self.spec.joins.push(Join {
            kind,
            target,
            relation,
            on,
            fetch: false,
        });
        self
    }

    /// Add conditions to the most recent join's ON clause.
    pub fn on(mut self, predicates: impl IntoPredicates) -> Self {
        match self.spec.joins.last_mut() {
            Some(join) => join.on.extend(predicates.into_predicates()),
            None => self.record("`on` requires a preceding join"),
        }
        self
    }

    /// Load the most recent join's entity into the owning entity's relation field.
    pub fn fetch_join(mut self) -> Self {
        let Some(join) = self.spec.joins.last_mut() else {
            self.record("`fetch_join` requires a preceding join");
            return self;
        };
        let Some(relation) = join.relation else {
            self.record("`fetch_join` requires a join that follows a relation");
            return self;
        };
        if relation.kind == RelationKind::OneToMany {
            self.record(format!(
                "cannot fetch join collection relation `{}.{}`",
                relation.source_entity, relation.name
            ));
            return self;
        }
        join.fetch = true;
        let fetch = FetchJoin {
            source_alias: relation.source_alias,
            relation: relation.name,
            target: join.target,
        };
        if !self.projection.fetch(&fetch) {
            self.record(format!(
                "fetch join of `{}.{}` but `{}` is not selected",
                relation.source_entity, relation.name, relation.source_alias
            ));
        }
        self
    }

    /// Add WHERE conditions; absent predicates are ignored.
    pub fn r#where(mut self, predicates: impl IntoPredicates) -> Self {
        self.spec.filter.extend(predicates.into_predicates());
        self
    }

    pub fn group_by(mut self, keys: impl IntoNodes) -> Self {
        self.spec.group_by.extend(keys.into_nodes());
        self
    }

    pub fn having(mut self, predicates: impl IntoPredicates) -> Self {
        self.spec.having.extend(predicates.into_predicates());
        self
    }

    pub fn order_by(mut self, order: impl IntoOrderBy) -> Self {
        self.spec.order_by.extend(order.into_order_by());
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.spec.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.spec.limit = Some(limit);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.spec.distinct = true;
        self
    }

    pub fn is_reproducible(&self) -> bool {
        self.spec.is_reproducible()
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }

    /// The first construction error recorded on this query, if any.
    pub fn problem(&self) -> Option<&str> {
        self.problem.as_deref()
    }

    /// The complete SELECT description, select list included.
    pub fn spec(&self) -> SelectSpec {
        let mut spec = self.spec.clone();
        spec.columns = self.projection.columns();
        spec
    }

    pub fn into_spec(self) -> SelectSpec {
        let mut spec = self.spec;
        spec.columns = self.projection.columns();
        spec
    }

    fn record(&mut self, problem: impl Into<String>) {
        if self.problem.is_none() {
            self.problem = Some(problem.into());
        }
    }
}

impl<K: DataType> Query<Expr<K>> {
    /// Use this single-column query as an aliased scalar subquery.
    pub fn as_(self, alias: &str) -> Expr<K> {
        Expr::new(ExprNode::Alias {
            expr: Box::new(ExprNode::Subquery(Box::new(self.into_spec()))),
            name: CompactString::from(alias),
        })
    }
}

/// A single-column query is a scalar subquery operand.
impl<K: DataType> Operand for Query<Expr<K>> {
    type Kind = K;

    fn into_node(self) -> ExprNode {
        ExprNode::Subquery(Box::new(self.into_spec()))
    }
}

impl<K: DataType> IntoNodes for Query<Expr<K>> {
    fn into_nodes(self) -> Vec<ExprNode> {
        vec![Operand::into_node(self)]
    }
}

use super::ExprNode;

/// Sort direction for ORDER BY clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderBy {
    Asc,
    Desc,
}

impl OrderBy {
    pub const fn as_sql(&self) -> &'static str {
        match self {
            OrderBy::Asc => "ASC",
            OrderBy::Desc => "DESC",
        }
    }
}

/// Placement of NULLs in an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NullOrdering {
    /// Whatever the backend does by default
    #[default]
    Unspecified,
    First,
    Last,
}

/// One ORDER BY key.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpec {
    pub expr: ExprNode,
    pub direction: OrderBy,
    pub nulls: NullOrdering,
}

impl OrderSpec {
    pub fn new(expr: ExprNode, direction: OrderBy) -> Self {
        Self {
            expr,
            direction,
            nulls: NullOrdering::Unspecified,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullOrdering::First;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullOrdering::Last;
        self
    }
}

/// One or more ORDER BY keys.
pub trait IntoOrderBy {
    fn into_order_by(self) -> Vec<OrderSpec>;
}

impl IntoOrderBy for OrderSpec {
    fn into_order_by(self) -> Vec<OrderSpec> {
        vec![self]
    }
}

impl<const N: usize> IntoOrderBy for [OrderSpec; N] {
    fn into_order_by(self) -> Vec<OrderSpec> {
        self.into()
    }
}

impl IntoOrderBy for Vec<OrderSpec> {
    fn into_order_by(self) -> Vec<OrderSpec> {
        self
    }
}

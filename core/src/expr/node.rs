use compact_str::CompactString;

use crate::query::SelectSpec;
use crate::value::Value;

/// A column under a query alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Alias of the source the column belongs to
    pub qualifier: &'static str,
    /// SQL column name
    pub column: &'static str,
    /// Rust field name, used for binding projections by name
    pub field: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    /// `LIKE` with `\` escaping the wildcards in the pattern.
    LikeEscaped,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub const fn as_sql(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Like | BinaryOp::LikeEscaped => "LIKE",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div
        )
    }
}

/// A SQL function call kept in dialect-neutral form.
///
/// Names are stored lowercase; the dialect decides the final spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: CompactString,
    pub args: Vec<ExprNode>,
    pub distinct: bool,
}

impl FunctionCall {
    pub fn new(name: &str, args: Vec<ExprNode>) -> Self {
        Self {
            name: CompactString::from(name.to_lowercase()),
            args,
            distinct: false,
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

/// Untyped expression tree shared by all typed wrappers.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    Column(ColumnRef),
    /// Bound as a parameter, or written as `NULL`
    Literal(Value),
    Binary {
        op: BinaryOp,
        left: Box<ExprNode>,
        right: Box<ExprNode>,
    },
    And(Vec<ExprNode>),
    Or(Vec<ExprNode>),
    Not(Box<ExprNode>),
    IsNull {
        expr: Box<ExprNode>,
        negated: bool,
    },
    Between {
        expr: Box<ExprNode>,
        low: Box<ExprNode>,
        high: Box<ExprNode>,
    },
    InList {
        expr: Box<ExprNode>,
        list: Vec<ExprNode>,
        negated: bool,
    },
    InSubquery {
        expr: Box<ExprNode>,
        query: Box<SelectSpec>,
        negated: bool,
    },
    Function(FunctionCall),
    CountAll,
    Case {
        operand: Option<Box<ExprNode>>,
        branches: Vec<(ExprNode, ExprNode)>,
        default: Box<ExprNode>,
    },
    Subquery(Box<SelectSpec>),
    Alias {
        expr: Box<ExprNode>,
        name: CompactString,
    },
}

impl ExprNode {
    pub(crate) fn binary(op: BinaryOp, left: ExprNode, right: ExprNode) -> Self {
        ExprNode::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub(crate) fn call(name: &str, args: Vec<ExprNode>) -> Self {
        ExprNode::Function(FunctionCall::new(name, args))
    }

    /// AND of `nodes`, flattening nested conjunctions.
    ///
    /// Returns `None` for an empty input and the node itself for one element.
    pub fn conjunction(nodes: impl IntoIterator<Item = ExprNode>) -> Option<ExprNode> {
        Self::flatten(nodes, true)
    }

    /// OR of `nodes`, flattening nested disjunctions.
    pub fn disjunction(nodes: impl IntoIterator<Item = ExprNode>) -> Option<ExprNode> {
        Self::flatten(nodes, false)
    }

    /// `self AND rhs` (or `self OR rhs`), flattening nested nodes of the same kind.
    pub(crate) fn combine(self, rhs: ExprNode, and: bool) -> ExprNode {
        let mut flat = Vec::new();
        Self::push_flat(&mut flat, self, and);
        Self::push_flat(&mut flat, rhs, and);
        if and {
            ExprNode::And(flat)
        } else {
            ExprNode::Or(flat)
        }
    }

    fn push_flat(flat: &mut Vec<ExprNode>, node: ExprNode, and: bool) {
        match node {
            ExprNode::And(inner) if and => flat.extend(inner),
            ExprNode::Or(inner) if !and => flat.extend(inner),
            other => flat.push(other),
        }
    }

    fn flatten(nodes: impl IntoIterator<Item = ExprNode>, and: bool) -> Option<ExprNode> {
        let mut flat = Vec::new();
        for node in nodes {
            Self::push_flat(&mut flat, node, and);
        }
        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ if and => Some(ExprNode::And(flat)),
            _ => Some(ExprNode::Or(flat)),
        }
    }

    /// Name a projected value binds to: its alias, or the field of a bare column.
    pub fn binding_name(&self) -> Option<&str> {
        match self {
            ExprNode::Alias { name, .. } => Some(name.as_str()),
            ExprNode::Column(column) => Some(column.field),
            _ => None,
        }
    }

    /// The expression without any alias wrapper.
    pub fn unaliased(&self) -> &ExprNode {
        match self {
            ExprNode::Alias { expr, .. } => expr.unaliased(),
            other => other,
        }
    }
}

//! DTO projections: by field name, by setter, or by constructor position.
//!
//! The binding traits are implemented by `#[derive(Dto)]`.

use core::marker::PhantomData;

use compact_str::CompactString;

use crate::error::{Result, SquallError};
use crate::expr::{ExprNode, IntoNodes};
use crate::value::{FromValue, Value};

use super::{Projection, RowCursor, TupleProjection};

/// Assign a value to the field called `name`.
pub trait FieldBinding: Default {
    const TARGET: &'static str;

    /// Returns `Ok(false)` when the type has no such field.
    fn bind_field(&mut self, name: &str, value: Value) -> Result<bool>;
}

/// Pass a value to the setter for `name`.
pub trait SetterBinding: Default {
    const TARGET: &'static str;

    /// Returns `Ok(false)` when the type has no setter for `name`.
    fn call_setter(&mut self, name: &str, value: Value) -> Result<bool>;
}

/// Build the type from positional arguments.
pub trait ConstructorBinding: Sized {
    const TARGET: &'static str;
    const ARITY: usize;

    fn construct(args: Vec<Value>) -> Result<Self>;
}

/// Decode the argument `name` of a constructor or setter call on `target`.
///
/// Conversion failures become [`SquallError::ConstructorBinding`].
pub fn bind_arg<T: FromValue>(target: &'static str, name: &str, value: Option<Value>) -> Result<T> {
    let value = value.ok_or_else(|| SquallError::ConstructorBinding {
        target,
        reason: format!("missing argument `{name}`"),
    })?;
    T::from_value(value).map_err(|err| SquallError::ConstructorBinding {
        target,
        reason: format!("argument `{name}`: {err}"),
    })
}

/// Namespace for the explicit projection constructors.
pub struct Projections;

impl Projections {
    /// Read back values by expression, see [`Tuple`](super::Tuple).
    pub fn tuple(exprs: impl IntoNodes) -> TupleProjection {
        TupleProjection::new(exprs)
    }

    /// Assign each value to the field named like the expression's alias
    /// or column. Unknown names are ignored.
    pub fn fields<D: FieldBinding>(exprs: impl IntoNodes) -> FieldProjection<D> {
        FieldProjection {
            named: NamedColumns::new(exprs),
            _target: PhantomData,
        }
    }

    /// Like [`fields`](Self::fields), through the generated setters.
    pub fn bean<D: SetterBinding>(exprs: impl IntoNodes) -> SetterProjection<D> {
        SetterProjection {
            named: NamedColumns::new(exprs),
            _target: PhantomData,
        }
    }

    /// Pass the values positionally to the constructor.
    ///
    /// Arity is checked before the query runs; argument types when rows
    /// are decoded. Derived DTOs also offer a typed `project` function that
    /// checks both at compile time.
    pub fn constructor<D: ConstructorBinding>(exprs: impl IntoNodes) -> ConstructorProjection<D> {
        ConstructorProjection::new(exprs.into_nodes())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NamedColumns {
    nodes: Vec<ExprNode>,
    names: Vec<Option<CompactString>>,
}

impl NamedColumns {
    fn new(exprs: impl IntoNodes) -> Self {
        let nodes = exprs.into_nodes();
        let names = nodes
            .iter()
            .map(|node| node.binding_name().map(CompactString::from))
            .collect();
        Self { nodes, names }
    }

    fn validate(&self, target: &'static str) -> Result<()> {
        match self.names.iter().position(Option::is_none) {
            Some(index) => Err(SquallError::ConstructorBinding {
                target,
                reason: format!("expression #{index} has no name to bind; alias it with `as_`"),
            }),
            None => Ok(()),
        }
    }

    fn bind(
        &self,
        row: &mut RowCursor<'_>,
        mut assign: impl FnMut(&str, Value) -> Result<bool>,
    ) -> Result<()> {
        for name in &self.names {
            let value = row.read_value()?;
            if let Some(name) = name {
                assign(name, value)?;
            }
        }
        Ok(())
    }
}

/// Binds values to fields by name.
pub struct FieldProjection<D> {
    named: NamedColumns,
    _target: PhantomData<fn() -> D>,
}

impl<D: FieldBinding> Projection for FieldProjection<D> {
    type Output = D;

    fn columns(&self) -> Vec<ExprNode> {
        self.named.nodes.clone()
    }

    fn decode(&self, row: &mut RowCursor<'_>) -> Result<D> {
        let mut target = D::default();
        self.named
            .bind(row, |name, value| target.bind_field(name, value))?;
        Ok(target)
    }

    fn validate(&self) -> Result<()> {
        self.named.validate(D::TARGET)
    }
}

/// Binds values through setters by name.
pub struct SetterProjection<D> {
    named: NamedColumns,
    _target: PhantomData<fn() -> D>,
}

impl<D: SetterBinding> Projection for SetterProjection<D> {
    type Output = D;

    fn columns(&self) -> Vec<ExprNode> {
        self.named.nodes.clone()
    }

    fn decode(&self, row: &mut RowCursor<'_>) -> Result<D> {
        let mut target = D::default();
        self.named
            .bind(row, |name, value| target.call_setter(name, value))?;
        Ok(target)
    }

    fn validate(&self) -> Result<()> {
        self.named.validate(D::TARGET)
    }
}

/// Passes values positionally to a constructor.
pub struct ConstructorProjection<D> {
    nodes: Vec<ExprNode>,
    _target: PhantomData<fn() -> D>,
}

impl<D: ConstructorBinding> ConstructorProjection<D> {
    pub fn new(nodes: Vec<ExprNode>) -> Self {
        Self {
            nodes,
            _target: PhantomData,
        }
    }
}

impl<D: ConstructorBinding> Projection for ConstructorProjection<D> {
    type Output = D;

    fn columns(&self) -> Vec<ExprNode> {
        self.nodes.clone()
    }

    fn decode(&self, row: &mut RowCursor<'_>) -> Result<D> {
        let args = (0..self.nodes.len())
            .map(|_| row.read_value())
            .collect::<Result<Vec<_>>>()?;
        D::construct(args)
    }

    fn validate(&self) -> Result<()> {
        if self.nodes.len() != D::ARITY {
            return Err(SquallError::ConstructorBinding {
                target: D::TARGET,
                reason: format!(
                    "constructor takes {} arguments, projection has {}",
                    D::ARITY,
                    self.nodes.len()
                ),
            });
        }
        Ok(())
    }
}

macro_rules! projection_boilerplate {
    ($($ty:ident: $field:ident),*) => {
        $(
            impl<D> Clone for $ty<D> {
                fn clone(&self) -> Self {
                    Self {
                        $field: self.$field.clone(),
                        _target: PhantomData,
                    }
                }
            }

            impl<D> core::fmt::Debug for $ty<D> {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    f.debug_struct(stringify!($ty))
                        .field("target", &core::any::type_name::<D>())
                        .field(stringify!($field), &self.$field)
                        .finish()
                }
            }
        )*
    };
}

projection_boilerplate!(
    FieldProjection: named,
    SetterProjection: named,
    ConstructorProjection: nodes
);

//! Fully-qualified paths for generated code.
//!
//! Paths start with `squall::` (no leading `::`) so crates that depend on
//! `squall-core` directly can provide a `mod squall { pub use squall_core as core; }`
//! shim.

use proc_macro2::TokenStream;
use quote::quote;

pub mod std {
    use super::*;

    pub fn result() -> TokenStream {
        quote!(::std::result::Result)
    }

    pub fn vec() -> TokenStream {
        quote!(::std::vec::Vec)
    }
}

pub mod core {
    use super::*;

    pub fn result() -> TokenStream {
        quote!(squall::core::error::Result)
    }

    pub fn error() -> TokenStream {
        quote!(squall::core::error::SquallError)
    }

    pub fn value() -> TokenStream {
        quote!(squall::core::value::Value)
    }

    pub fn from_value() -> TokenStream {
        quote!(squall::core::value::FromValue)
    }

    pub fn field_type() -> TokenStream {
        quote!(squall::core::value::FieldType)
    }

    pub fn sql_type() -> TokenStream {
        quote!(squall::core::SqlType)
    }

    pub fn column() -> TokenStream {
        quote!(squall::core::expr::Column)
    }

    pub fn into_expr() -> TokenStream {
        quote!(squall::core::expr::IntoExpr)
    }

    pub fn operand() -> TokenStream {
        quote!(squall::core::expr::Operand)
    }

    pub fn entity() -> TokenStream {
        quote!(squall::core::schema::Entity)
    }

    pub fn entity_path() -> TokenStream {
        quote!(squall::core::schema::EntityPath)
    }

    pub fn entity_def() -> TokenStream {
        quote!(squall::core::schema::EntityDef)
    }

    pub fn column_def() -> TokenStream {
        quote!(squall::core::schema::ColumnDef)
    }

    pub fn relation_def() -> TokenStream {
        quote!(squall::core::schema::RelationDef)
    }

    pub fn relation_kind() -> TokenStream {
        quote!(squall::core::schema::RelationKind)
    }

    pub fn related() -> TokenStream {
        quote!(squall::core::schema::Related)
    }

    pub fn relation_path() -> TokenStream {
        quote!(squall::core::query::RelationPath)
    }

    pub fn source() -> TokenStream {
        quote!(squall::core::query::Source)
    }

    pub fn into_sources() -> TokenStream {
        quote!(squall::core::query::IntoSources)
    }

    pub fn row_cursor() -> TokenStream {
        quote!(squall::core::projection::RowCursor)
    }

    pub fn into_projection() -> TokenStream {
        quote!(squall::core::projection::IntoProjection)
    }

    pub fn entity_projection() -> TokenStream {
        quote!(squall::core::projection::EntityProjection)
    }

    pub fn field_binding() -> TokenStream {
        quote!(squall::core::projection::FieldBinding)
    }

    pub fn setter_binding() -> TokenStream {
        quote!(squall::core::projection::SetterBinding)
    }

    pub fn constructor_binding() -> TokenStream {
        quote!(squall::core::projection::ConstructorBinding)
    }

    pub fn constructor_projection() -> TokenStream {
        quote!(squall::core::projection::ConstructorProjection)
    }

    pub fn bind_arg() -> TokenStream {
        quote!(squall::core::projection::bind_arg)
    }
}

//! Parsing of `#[entity(...)]` attributes.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, Field, Ident, LitStr, Type};

use crate::common::related_target;

/// Struct-level `#[entity(...)]`.
#[derive(Default)]
pub(crate) struct EntityAttrs {
    pub table: Option<String>,
    pub alias: Option<String>,
    pub one_to_many: Vec<OneToMany>,
}

/// `one_to_many(name = "members", target = Member, column = "team_id", references = "id")`
pub(crate) struct OneToMany {
    pub name: Ident,
    pub target: Type,
    /// Foreign key column on the target table
    pub column: String,
    /// Key column on this table
    pub references: String,
}

pub(crate) enum FieldKind {
    Column {
        column: String,
        id: bool,
    },
    ManyToOne {
        target: Type,
        /// Foreign key column on this table
        column: String,
        /// Key column on the target table
        references: String,
    },
}

fn string_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<String> {
    Ok(meta.value()?.parse::<LitStr>()?.value())
}

impl EntityAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("entity")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("table") {
                    parsed.table = Some(string_value(&meta)?);
                } else if meta.path.is_ident("alias") {
                    parsed.alias = Some(string_value(&meta)?);
                } else if meta.path.is_ident("one_to_many") {
                    parsed.one_to_many.push(parse_one_to_many(&meta)?);
                } else {
                    return Err(meta.error(
                        "unknown entity attribute; expected `table`, `alias` or `one_to_many`",
                    ));
                }
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}

fn parse_one_to_many(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<OneToMany> {
    let mut name = None;
    let mut target = None;
    let mut column = None;
    let mut references = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("name") {
            let lit = inner.value()?.parse::<LitStr>()?;
            name = Some(lit.parse::<Ident>()?);
        } else if inner.path.is_ident("target") {
            target = Some(inner.value()?.parse::<Type>()?);
        } else if inner.path.is_ident("column") {
            column = Some(string_value(&inner)?);
        } else if inner.path.is_ident("references") {
            references = Some(string_value(&inner)?);
        } else {
            return Err(inner.error(
                "unknown one_to_many argument; expected `name`, `target`, `column` or `references`",
            ));
        }
        Ok(())
    })?;

    let missing = |what: &str| meta.error(format!("one_to_many requires `{what}`"));
    Ok(OneToMany {
        name: name.ok_or_else(|| missing("name"))?,
        target: target.ok_or_else(|| missing("target"))?,
        column: column.ok_or_else(|| missing("column"))?,
        references: references.unwrap_or_else(|| "id".to_string()),
    })
}

impl FieldKind {
    pub fn parse(field: &Field, ident: &Ident) -> syn::Result<Self> {
        let mut id = false;
        let mut column = None;
        let mut many_to_one: Option<(Option<String>, Option<String>, Span)> = None;

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("entity")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    id = true;
                } else if meta.path.is_ident("column") {
                    column = Some(string_value(&meta)?);
                } else if meta.path.is_ident("many_to_one") {
                    let mut fk = None;
                    let mut references = None;
                    if meta.input.peek(syn::token::Paren) {
                        meta.parse_nested_meta(|inner| {
                            if inner.path.is_ident("column") {
                                fk = Some(string_value(&inner)?);
                            } else if inner.path.is_ident("references") {
                                references = Some(string_value(&inner)?);
                            } else {
                                return Err(inner.error(
                                    "unknown many_to_one argument; expected `column` or `references`",
                                ));
                            }
                            Ok(())
                        })?;
                    }
                    many_to_one = Some((fk, references, meta.path.span()));
                } else {
                    return Err(meta.error(
                        "unknown field attribute; expected `id`, `column` or `many_to_one`",
                    ));
                }
                Ok(())
            })?;
        }

        let Some((fk, references, span)) = many_to_one else {
            return Ok(FieldKind::Column {
                column: column.unwrap_or_else(|| ident.to_string()),
                id,
            });
        };
        if id || column.is_some() {
            return Err(syn::Error::new(
                span,
                "many_to_one fields take their column from `many_to_one(column = ...)`",
            ));
        }
        let target = related_target(&field.ty).ok_or_else(|| {
            syn::Error::new_spanned(&field.ty, "many_to_one fields must have type `Related<T>`")
        })?;
        Ok(FieldKind::ManyToOne {
            target: target.clone(),
            column: fk.unwrap_or_else(|| format!("{ident}_id")),
            references: references.unwrap_or_else(|| "id".to_string()),
        })
    }
}

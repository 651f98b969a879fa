//! Derive macros for `squall`.
//!
//! Generated code refers to `squall::core::...`; use these through the
//! `squall` facade crate.

extern crate proc_macro;

mod common;
mod dto;
mod entity;
mod paths;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Describe a struct as a mapped entity.
///
/// Generates the `Entity` impl (schema descriptor, row decoding, fetch-join
/// attachment) and a `<Name>Path` struct with one typed column per field and
/// one relation handle per declared relation.
///
/// # Attributes
///
/// Struct level:
/// - `table = "..."`: table name, defaults to the snake-cased struct name
/// - `alias = "..."`: default query alias of `<Name>Path`, same default
/// - `one_to_many(name = "...", target = T, column = "...", references = "id")`:
///   a collection relation; `column` is the foreign key on `T`'s table
///
/// Field level:
/// - `id`: primary key
/// - `column = "..."`: column name, defaults to the field name
/// - `many_to_one(column = "...", references = "id")`: on a `Related<T>`
///   field; `column` defaults to `<field>_id`
///
/// ```ignore
/// #[derive(Entity, Debug, Clone, PartialEq)]
/// #[entity(table = "member")]
/// pub struct Member {
///     #[entity(id)]
///     pub id: i64,
///     pub username: Option<String>,
///     pub age: i32,
///     #[entity(many_to_one(column = "team_id"))]
///     pub team: Related<Team>,
/// }
///
/// let member = MemberPath::default();
/// let sub = MemberPath::new("member_sub");
/// ```
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match entity::generate(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Make a struct a projection target.
///
/// Implements field binding, setter binding and constructor binding, adds a
/// `set_<field>` method per field (skip one with `#[dto(no_setter)]`) and a
/// `project(..)` function taking one expression per field, in field order.
/// The struct must implement `Default`.
///
/// ```ignore
/// #[derive(Dto, Debug, Default, PartialEq)]
/// pub struct MemberDto {
///     pub username: Option<String>,
///     pub age: i32,
/// }
///
/// db.fetch(&select(MemberDto::project(member.username, member.age)).from(member))?;
/// ```
#[proc_macro_derive(Dto, attributes(dto))]
pub fn derive_dto(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match dto::generate(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

//! `#[derive(Entity)]`: schema descriptor, row decoding and the typed path.

mod attributes;

use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::DeriveInput;

use crate::common::{is_option, named_fields, type_name};
use crate::paths::{core as core_paths, std as std_paths};

use attributes::{EntityAttrs, FieldKind};

pub(crate) fn generate(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let vis = &input.vis;
    let fields = named_fields(input, "Entity")?;
    let attrs = EntityAttrs::parse(&input.attrs)?;

    let entity_name = name.to_string();
    let snake = entity_name.to_snake_case();
    let table = attrs.table.clone().unwrap_or_else(|| snake.clone());
    let alias = attrs.alias.clone().unwrap_or(snake);
    let path_name = format_ident!("{}Path", name);

    let result = core_paths::result();
    let error = core_paths::error();
    let from_value = core_paths::from_value();
    let field_type = core_paths::field_type();
    let sql_type = core_paths::sql_type();
    let column = core_paths::column();
    let entity = core_paths::entity();
    let entity_path = core_paths::entity_path();
    let entity_def = core_paths::entity_def();
    let column_def = core_paths::column_def();
    let relation_def = core_paths::relation_def();
    let relation_kind = core_paths::relation_kind();
    let related = core_paths::related();
    let relation_path = core_paths::relation_path();
    let source = core_paths::source();
    let into_sources = core_paths::into_sources();
    let row_cursor = core_paths::row_cursor();
    let into_projection = core_paths::into_projection();
    let entity_projection = core_paths::entity_projection();
    let std_result = std_paths::result();
    let std_vec = std_paths::vec();

    let mut column_defs = Vec::new();
    let mut relation_defs = Vec::new();
    let mut path_fields = Vec::new();
    let mut path_inits = Vec::new();
    let mut row_reads = Vec::new();
    let mut attach_arms = Vec::new();
    let mut id_seen = false;

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;
        let field_name = ident.to_string();

        match FieldKind::parse(field, ident)? {
            FieldKind::Column { column: col, id } => {
                if id {
                    if id_seen {
                        return Err(syn::Error::new_spanned(
                            ident,
                            "an entity has at most one `#[entity(id)]` field",
                        ));
                    }
                    id_seen = true;
                }
                column_defs.push(quote! {
                    #column_def {
                        field: #field_name,
                        column: #col,
                        ty: <#ty as #from_value>::TYPE,
                        nullable: <#ty as #from_value>::NULLABLE,
                        primary_key: #id,
                    }
                });
                let column_doc = if is_option(ty) {
                    format!(
                        "Column `{col}`. Nullable: select it through `.nullable()` to read NULL as `None`."
                    )
                } else {
                    format!("Column `{col}`.")
                };
                path_fields.push(quote! {
                    #[doc = #column_doc]
                    pub #ident: #column<<#ty as #field_type>::Kind>
                });
                path_inits.push(quote! {
                    #ident: #column::new(alias, #col, #field_name)
                });
                row_reads.push(quote! { #ident: row.read()?, });
            }
            FieldKind::ManyToOne {
                target,
                column: fk,
                references,
            } => {
                let target_name = type_name(&target)?;
                column_defs.push(quote! {
                    #column_def {
                        field: #field_name,
                        column: #fk,
                        ty: #sql_type::BigInt,
                        nullable: true,
                        primary_key: false,
                    }
                });
                relation_defs.push(quote! {
                    #relation_def {
                        name: #field_name,
                        target: #target_name,
                        kind: #relation_kind::ManyToOne,
                        source_column: #fk,
                        target_column: #references,
                    }
                });
                path_fields.push(quote! {
                    pub #ident: #relation_path<#target>
                });
                path_inits.push(quote! {
                    #ident: #relation_path::new(alias, #entity_name, #field_name, #relation_kind::ManyToOne)
                });
                row_reads.push(quote! { #ident: #related::unloaded(row.read_value()?), });
                attach_arms.push(quote! {
                    #field_name => {
                        self.#ident = #related::loaded(<#target as #entity>::from_row_optional(row)?);
                        #std_result::Ok(())
                    }
                });
            }
        }
    }

    for otm in &attrs.one_to_many {
        let ident = &otm.name;
        let relation_name = ident.to_string();
        let target = &otm.target;
        let target_name = type_name(target)?;
        let fk = &otm.column;
        let references = &otm.references;
        relation_defs.push(quote! {
            #relation_def {
                name: #relation_name,
                target: #target_name,
                kind: #relation_kind::OneToMany,
                source_column: #references,
                target_column: #fk,
            }
        });
        path_fields.push(quote! {
            pub #ident: #relation_path<#target>
        });
        path_inits.push(quote! {
            #ident: #relation_path::new(alias, #entity_name, #relation_name, #relation_kind::OneToMany)
        });
    }

    let attach = if attach_arms.is_empty() {
        quote! {}
    } else {
        quote! {
            fn attach(&mut self, relation: &str, row: &mut #row_cursor<'_>) -> #result<()> {
                match relation {
                    #(#attach_arms)*
                    _ => #std_result::Err(#error::UnresolvedRelation {
                        entity: #entity_name.into(),
                        relation: relation.into(),
                    }),
                }
            }
        }
    };

    let path_doc = format!(
        "Typed columns and relations of [`{entity_name}`] under a query alias (default `{alias}`)."
    );

    Ok(quote! {
        impl #entity for #name {
            const DEF: &'static #entity_def = &#entity_def {
                name: #entity_name,
                table: #table,
                columns: &[#(#column_defs),*],
                relations: &[#(#relation_defs),*],
            };

            type Path = #path_name;

            fn from_row(row: &mut #row_cursor<'_>) -> #result<Self> {
                #std_result::Ok(Self {
                    #(#row_reads)*
                })
            }

            #attach
        }

        #[doc = #path_doc]
        #[derive(Debug, Clone, Copy)]
        #vis struct #path_name {
            alias: &'static str,
            #(#path_fields,)*
        }

        impl #path_name {
            pub const fn new(alias: &'static str) -> Self {
                Self {
                    alias,
                    #(#path_inits,)*
                }
            }
        }

        impl ::std::default::Default for #path_name {
            fn default() -> Self {
                Self::new(#alias)
            }
        }

        impl #entity_path for #path_name {
            type Entity = #name;

            fn alias(&self) -> &'static str {
                self.alias
            }
        }

        impl #into_sources for #path_name {
            fn into_sources(self) -> #std_vec<#source> {
                ::std::vec![#entity_path::source(&self)]
            }
        }

        impl #into_projection for #path_name {
            type Projection = #entity_projection<#name>;

            fn into_projection(self) -> Self::Projection {
                #entity_path::entity(&self)
            }
        }
    })
}

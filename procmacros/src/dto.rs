//! `#[derive(Dto)]`: field, setter and constructor bindings plus a typed
//! `project` constructor.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::DeriveInput;

use crate::common::named_fields;
use crate::paths::{core as core_paths, std as std_paths};

struct DtoField<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    setter: bool,
}

fn parse_field(field: &syn::Field) -> syn::Result<DtoField<'_>> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    let mut setter = true;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("dto")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("no_setter") {
                setter = false;
                Ok(())
            } else {
                Err(meta.error("unknown dto attribute; expected `no_setter`"))
            }
        })?;
    }
    Ok(DtoField {
        ident,
        ty: &field.ty,
        setter,
    })
}

pub(crate) fn generate(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let target = name.to_string();
    let fields = named_fields(input, "Dto")?
        .iter()
        .map(parse_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let result = core_paths::result();
    let error = core_paths::error();
    let value = core_paths::value();
    let from_value = core_paths::from_value();
    let field_type = core_paths::field_type();
    let into_expr = core_paths::into_expr();
    let operand = core_paths::operand();
    let field_binding = core_paths::field_binding();
    let setter_binding = core_paths::setter_binding();
    let constructor_binding = core_paths::constructor_binding();
    let constructor_projection = core_paths::constructor_projection();
    let bind_arg = core_paths::bind_arg();
    let std_result = std_paths::result();
    let std_vec = std_paths::vec();

    let arity = fields.len();
    let idents: Vec<_> = fields.iter().map(|f| f.ident).collect();
    let names: Vec<_> = fields.iter().map(|f| f.ident.to_string()).collect();
    let types: Vec<_> = fields.iter().map(|f| f.ty).collect();

    let setters = fields.iter().filter(|f| f.setter).map(|f| {
        let ident = f.ident;
        let ty = f.ty;
        let setter = format_ident!("set_{}", ident);
        quote! {
            pub fn #setter(&mut self, #ident: #ty) {
                self.#ident = #ident;
            }
        }
    });

    let setter_arms = fields.iter().filter(|f| f.setter).map(|f| {
        let field_name = f.ident.to_string();
        let ty = f.ty;
        let setter = format_ident!("set_{}", f.ident);
        quote! {
            #field_name => {
                self.#setter(<#ty as #from_value>::from_value(value)?);
                #std_result::Ok(true)
            }
        }
    });

    let project_doc = format!(
        "Project query results into `{target}` by position, with argument types checked at compile time."
    );

    Ok(quote! {
        impl #name {
            #(#setters)*

            #[doc = #project_doc]
            #[allow(clippy::too_many_arguments)]
            pub fn project(
                #(#idents: impl #into_expr<<#types as #field_type>::Kind>),*
            ) -> #constructor_projection<Self> {
                #constructor_projection::new(::std::vec![
                    #(#operand::into_node(#idents)),*
                ])
            }
        }

        impl #field_binding for #name {
            const TARGET: &'static str = #target;

            fn bind_field(&mut self, name: &str, value: #value) -> #result<bool> {
                match name {
                    #(
                        #names => {
                            self.#idents = <#types as #from_value>::from_value(value)?;
                            #std_result::Ok(true)
                        }
                    )*
                    _ => #std_result::Ok(false),
                }
            }
        }

        impl #setter_binding for #name {
            const TARGET: &'static str = #target;

            fn call_setter(&mut self, name: &str, value: #value) -> #result<bool> {
                match name {
                    #(#setter_arms)*
                    _ => {
                        let _ = value;
                        #std_result::Ok(false)
                    }
                }
            }
        }

        impl #constructor_binding for #name {
            const TARGET: &'static str = #target;
            const ARITY: usize = #arity;

            fn construct(args: #std_vec<#value>) -> #result<Self> {
                if args.len() != #arity {
                    return #std_result::Err(#error::ConstructorBinding {
                        target: #target,
                        reason: ::std::format!(
                            "constructor takes {} arguments, got {}",
                            #arity,
                            args.len()
                        ),
                    });
                }
                let mut args = args.into_iter();
                #std_result::Ok(Self {
                    #(#idents: #bind_arg(#target, #names, args.next())?,)*
                })
            }
        }
    })
}

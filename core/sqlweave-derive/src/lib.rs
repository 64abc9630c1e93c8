//! sqlweave Derive — procedural macros for sqlweave.
//!
//! Provides `#[derive(Entity)]`, which emits the static metadata table of a
//! struct and its `sqlweave_core::schema::Entity` implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive macro for entity metadata.
///
/// # Example
///
/// ```ignore
/// #[derive(Entity)]
/// #[weave(table = "users")]
/// pub struct User {
///     #[weave(column = "name")]
///     pub name: String,
///     #[weave(column = "othersRefered", one_to_many = "refered_by")]
///     pub others_refered: Vec<User>,
///     #[weave(column = "worksFor", many_to_many = "boss-workers")]
///     pub works_for: Vec<User>,
/// }
/// ```
///
/// Generates:
/// - `EntityMeta` static (table name defaults to the struct name)
/// - `Entity` trait implementation
///
/// A field without `column` still compiles; persisting it fails with a
/// configuration error.
#[proc_macro_derive(Entity, attributes(weave))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Parsed `#[weave(..)]` of one field.
#[derive(Default)]
struct FieldAttrs {
    column: Option<LitStr>,
    one_to_many: Option<LitStr>,
    many_to_many: Option<LitStr>,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Entity cannot be derived for generic structs",
        ));
    }

    let type_name = name.to_string();
    let table_name = extract_table_name(input)?.unwrap_or_else(|| type_name.clone());

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Entity can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Entity can only be derived for structs",
            ));
        }
    };

    let mut field_metas = Vec::with_capacity(fields.len());
    let mut value_arms = Vec::with_capacity(fields.len());

    for (idx, field) in fields.iter().enumerate() {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let ident_str = ident.to_string();
        let ty = &field.ty;
        let attrs = parse_field_attrs(field)?;

        let column = match &attrs.column {
            Some(lit) => quote! { ::core::option::Option::Some(#lit) },
            None => quote! { ::core::option::Option::None },
        };

        let relation = match (&attrs.one_to_many, &attrs.many_to_many) {
            (Some(_), Some(_)) => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "a field cannot be both one_to_many and many_to_many",
                ));
            }
            (Some(fk), None) => Some(quote! {
                ::sqlweave_core::schema::Relation::OneToMany { foreign_key: #fk }
            }),
            (None, Some(tag)) => Some(quote! {
                ::sqlweave_core::schema::Relation::ManyToMany { tag: #tag }
            }),
            (None, None) => None,
        };

        let (relation, target, value) = match relation {
            Some(relation) => (
                quote! { ::core::option::Option::Some(#relation) },
                quote! {
                    ::core::option::Option::Some(
                        <<#ty as ::sqlweave_core::schema::Related>::Item
                            as ::sqlweave_core::schema::Entity>::entity_meta
                    )
                },
                quote! {
                    ::sqlweave_core::schema::FieldValue::Related(
                        ::sqlweave_core::schema::Related::related(&self.#ident)
                    )
                },
            ),
            None => (
                quote! { ::core::option::Option::None },
                quote! { ::core::option::Option::None },
                quote! {
                    ::sqlweave_core::schema::FieldValue::Scalar(
                        ::sqlweave_core::value::IntoArg::into_arg(
                            ::core::clone::Clone::clone(&self.#ident)
                        )
                    )
                },
            ),
        };

        field_metas.push(quote! {
            ::sqlweave_core::schema::FieldMeta {
                ident: #ident_str,
                column: #column,
                relation: #relation,
                target: #target,
            }
        });
        value_arms.push(quote! {
            #idx => ::core::option::Option::Some(#value),
        });
    }

    Ok(quote! {
        impl ::sqlweave_core::schema::Entity for #name {
            fn entity_meta() -> &'static ::sqlweave_core::schema::EntityMeta {
                static META: ::sqlweave_core::schema::EntityMeta =
                    ::sqlweave_core::schema::EntityMeta {
                        type_name: #type_name,
                        table_name: #table_name,
                        fields: &[
                            #(#field_metas),*
                        ],
                    };
                &META
            }

            fn meta(&self) -> &'static ::sqlweave_core::schema::EntityMeta {
                <Self as ::sqlweave_core::schema::Entity>::entity_meta()
            }

            fn field_value(
                &self,
                index: usize,
            ) -> ::core::option::Option<::sqlweave_core::schema::FieldValue<'_>> {
                match index {
                    #(#value_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("weave") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident("column") {
                &mut attrs.column
            } else if meta.path.is_ident("one_to_many") {
                &mut attrs.one_to_many
            } else if meta.path.is_ident("many_to_many") {
                &mut attrs.many_to_many
            } else {
                return Err(meta.error("expected `column`, `one_to_many` or `many_to_many`"));
            };
            *slot = Some(meta.value()?.parse()?);
            Ok(())
        })?;
    }
    Ok(attrs)
}

fn extract_table_name(input: &DeriveInput) -> syn::Result<Option<String>> {
    let mut table_name = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("weave") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let lit: LitStr = meta.value()?.parse()?;
                table_name = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `table`"))
            }
        })?;
    }
    Ok(table_name)
}

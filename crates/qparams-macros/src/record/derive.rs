//! Implementation of the `#[derive(QueryRecord)]` macro.
//!
//! This macro generates the static field table and index-based dispatch
//! that `qparams` uses instead of runtime reflection.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_field_attrs;

/// Main implementation of the QueryRecord derive macro.
pub fn query_record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "QueryRecord can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "QueryRecord can only be derived for structs",
            ))
        }
    };

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "QueryRecord cannot be derived for generic structs",
        ));
    }

    let mut descriptors: Vec<TokenStream> = Vec::new();
    let mut assign_arms: Vec<TokenStream> = Vec::new();
    let mut initialize_arms: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let index = descriptors.len();
        let ident = field_name.unraw().to_string();
        let tag = attrs.tag;
        let ty = &field.ty;

        descriptors.push(quote! {
            ::qparams::RawField::new(
                #ident,
                <#ty as ::qparams::FieldValue>::KIND,
                #tag,
            )
        });

        assign_arms.push(quote! {
            #index => ::qparams::FieldValue::assign(&mut self.#field_name, value),
        });

        initialize_arms.push(quote! {
            #index => ::qparams::FieldValue::initialize(&mut self.#field_name),
        });
    }

    let expanded = quote! {
        impl ::qparams::QueryRecord for #struct_name {
            fn fields() -> &'static [::qparams::RawField] {
                const FIELDS: &[::qparams::RawField] = &[
                    #(#descriptors),*
                ];
                FIELDS
            }

            #[allow(unused_variables)]
            fn assign(&mut self, index: usize, value: ::qparams::Decoded) {
                match index {
                    #(#assign_arms)*
                    _ => {}
                }
            }

            fn initialize(&mut self, index: usize) {
                match index {
                    #(#initialize_arms)*
                    _ => {}
                }
            }
        }
    };

    Ok(expanded)
}

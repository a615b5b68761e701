//! Pack derive macro implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input, parse_quote};

use crate::attrs::{FieldCodec, field_codec};

/// Derive the `Pack` trait for a struct.
pub fn derive_pack(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let body = match &input.data {
        Data::Struct(data) => generate_struct(&data.fields)?,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Pack derive is not supported for enums; implement `IntEnum` and pack with \
                 `vpack::primitives::int_enum`, or write the traversal by hand.",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Pack derive is not supported for unions.",
            ));
        }
    };

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::vpack::Pack));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::vpack::Pack for #name #ty_generics #where_clause {
            fn pack(&mut self, buf: &mut ::vpack::Buffer<'_>) {
                #body
            }
        }
    })
}

// Fields are packed in declaration order. Reordering fields changes the
// wire format.
fn generate_struct(fields: &Fields) -> syn::Result<TokenStream2> {
    let accessors: Vec<(TokenStream2, &syn::Field)> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|f| {
                let name = &f.ident;
                (quote! { self.#name }, f)
            })
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let index = syn::Index::from(i);
                (quote! { self.#index }, f)
            })
            .collect(),
        Fields::Unit => Vec::new(),
    };

    let mut calls = Vec::with_capacity(accessors.len());
    for (access, field) in accessors {
        match field_codec(field)? {
            FieldCodec::Default => calls.push(quote! {
                ::vpack::Pack::pack(&mut #access, buf);
            }),
            FieldCodec::With(path) => calls.push(quote! {
                #path(&mut #access, buf);
            }),
            FieldCodec::Skip => {}
        }
    }

    if calls.is_empty() {
        return Ok(quote! { let _ = buf; });
    }
    Ok(quote! { #(#calls)* })
}

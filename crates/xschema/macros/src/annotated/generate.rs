//! Code generation for the Annotated derive

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use super::parse::{FieldAnnotations, FieldKind, unraw};

/// Generates the `Annotated` implementation.
pub(super) fn generate_annotated(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Annotated can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Annotated can only be derived for structs",
            ));
        }
    };

    let mut descriptors = Vec::with_capacity(fields.len());

    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = unraw(&ident.to_string());
        let annotations = FieldAnnotations::from_attributes(&field.attrs)?;

        let kind = match FieldKind::of(&field.ty) {
            FieldKind::Text => quote!(::xschema::ScalarKind::Text),
            FieldKind::Number => quote!(::xschema::ScalarKind::Number),
        };
        let tags = annotations.tags.iter().map(|(tag, text)| quote!((#tag, #text)));

        descriptors.push(quote! {
            ::xschema::FieldDescriptor::new(#field_name, #kind, &[#(#tags),*])
        });
    }

    Ok(quote! {
        impl #impl_generics ::xschema::Annotated for #name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::xschema::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}

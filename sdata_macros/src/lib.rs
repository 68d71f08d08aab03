use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Index, Member, parse_macro_input};

use sdata_codegen::PrimaryKeyError;
use sdata_codegen::parse::struct_from_fields;
use sdata_codegen::primary_key;

/// Derives `sdata::Record` for a struct with a `String` primary key.
///
/// The key is the one field tagged `#[data(primary_key)]`; the derive also
/// registers `data` as a helper attribute so the tag compiles. Keys are
/// resolved with the same rules the `sdata-gen` generator applies:
///
/// - exactly one field must be tagged;
/// - that field must be a `String`.
///
/// Violations are reported as compile errors on the struct or the offending
/// field.
///
/// # Examples
///
/// ```ignore
/// #[derive(sdata::Record, serde::Serialize, serde::Deserialize)]
/// pub struct User {
///     #[data(primary_key)]
///     pub id: String,
///     pub name: String,
/// }
///
/// // Tuple structs are keyed by position.
/// #[derive(sdata::Record)]
/// pub struct Tag(#[data(primary_key)] pub String, pub u32);
/// ```
#[proc_macro_derive(Record, attributes(data))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_record(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "`Record` can only be derived for structs",
        ));
    };

    let def = struct_from_fields(input.ident.to_string(), &data.fields);
    let fields: Vec<&Field> = data.fields.iter().collect();

    let index = primary_key::resolve_index(&def).map_err(|err| {
        let message = err.to_string();
        match err {
            PrimaryKeyError::NoPrimaryKey { .. } => syn::Error::new_spanned(&input.ident, message),
            PrimaryKeyError::AmbiguousPrimaryKey { .. } => {
                // Point at the second tagged field, the first one is fine on its own.
                def.fields
                    .iter()
                    .zip(&fields)
                    .filter(|(field, _)| primary_key::is_primary_key(field))
                    .nth(1)
                    .map_or_else(
                        || syn::Error::new_spanned(&input.ident, &message),
                        |(_, field)| syn::Error::new_spanned(field, &message),
                    )
            }
            PrimaryKeyError::InvalidPrimaryKeyType { field, .. } => def
                .fields
                .iter()
                .position(|f| f.name == field)
                .map_or_else(
                    || syn::Error::new_spanned(&input.ident, &message),
                    |i| syn::Error::new_spanned(&fields[i].ty, &message),
                ),
        }
    })?;

    let member = match &fields[index].ident {
        Some(ident) => Member::Named(ident.clone()),
        None => Member::Unnamed(Index::from(index)),
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::sdata::Record for #name #ty_generics #where_clause {
            fn primary_key(&self) -> &str {
                &self.#member
            }
        }
    })
}

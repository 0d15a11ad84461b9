use crate::util::field_kind;
use darling::{FromDeriveInput, FromField, ast::Data, util::Ignored};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident, Type};

///
/// RecordInput
///

#[derive(FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
struct RecordInput {
    ident: Ident,
    generics: syn::Generics,
    data: Data<Ignored, RecordField>,

    /// Explicit store/table/collection name override.
    #[darling(default)]
    store: Option<String>,
}

///
/// RecordField
///

#[derive(FromField)]
#[darling(attributes(record))]
struct RecordField {
    ident: Option<Ident>,
    ty: Type,

    /// Identity marker.
    #[darling(default)]
    key: bool,

    /// Generated-value marker (identity strategy).
    #[darling(default)]
    generated: bool,
}

// expand
pub fn expand(input: TokenStream) -> TokenStream {
    let derive_input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let parsed = match RecordInput::from_derive_input(&derive_input) {
        Ok(parsed) => parsed,
        Err(err) => return err.write_errors(),
    };

    let ident = &parsed.ident;
    let type_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = parsed.generics.split_for_impl();

    let fields: Vec<&RecordField> = parsed
        .data
        .as_ref()
        .take_struct()
        .map(|fields| fields.fields)
        .unwrap_or_default();

    let store_name = match &parsed.store {
        Some(name) => quote!(Some(#name)),
        None => quote!(None),
    };

    let field_models = fields.iter().map(|field| {
        let name = field.ident.as_ref().expect("named field").to_string();
        let kind = field_kind(&field.ty);
        let key = field.key;
        let generated = field.generated;

        quote! {
            ::qaud::model::FieldModel {
                name: #name,
                kind: #kind,
                key: #key,
                generated: #generated,
            },
        }
    });

    let field_names = fields.iter().map(|field| {
        let name = field.ident.as_ref().expect("named field").to_string();
        quote!(#name,)
    });

    let read_arms = fields.iter().map(|field| {
        let field_ident = field.ident.as_ref().expect("named field");
        let name = field_ident.to_string();

        quote! {
            #name => Some(::qaud::value::FieldValue::to_value(&self.#field_ident)),
        }
    });

    let write_arms = fields.iter().map(|field| {
        let field_ident = field.ident.as_ref().expect("named field");
        let name = field_ident.to_string();

        quote! {
            if field.eq_ignore_ascii_case(#name) {
                self.#field_ident = ::qaud::value::FieldValue::from_value(value)
                    .map_err(|source| ::qaud::traits::FieldWriteError::mismatch(#name, source))?;
                return Ok(());
            }
        }
    });

    quote! {
        impl #impl_generics ::qaud::traits::Fields for #ident #ty_generics #where_clause {
            fn field_names(&self) -> &'static [&'static str] {
                &[#(#field_names)*]
            }

            fn field_value(&self, field: &str) -> Option<::qaud::value::Value> {
                match field {
                    #(#read_arms)*
                    _ => None,
                }
            }
        }

        impl #impl_generics ::qaud::traits::Record for #ident #ty_generics #where_clause {
            const MODEL: &'static ::qaud::model::RecordModel = &::qaud::model::RecordModel {
                type_name: #type_name,
                store_name: #store_name,
                fields: &[#(#field_models)*],
            };

            fn set_field_value(
                &mut self,
                field: &str,
                value: ::qaud::value::Value,
            ) -> Result<(), ::qaud::traits::FieldWriteError> {
                #(#write_arms)*

                Err(::qaud::traits::FieldWriteError::unknown(field))
            }
        }
    }
}

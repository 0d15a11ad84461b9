use crate::util::named_fields;
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

// expand
pub fn expand(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let fields = match named_fields(&input) {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error(),
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

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
    }
}

use crate::util::named_fields;
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

// expand
//
// Maps an embedded struct onto a document-valued cell: `to_value` writes
// every field into a nested row, `from_value` rebuilds from one (missing
// cells keep their defaults, so the target must implement `Default`).
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

    let writes = fields.iter().map(|field| {
        let field_ident = field.ident.as_ref().expect("named field");
        let name = field_ident.to_string();

        quote! {
            row.set(#name, ::qaud::value::FieldValue::to_value(&self.#field_ident));
        }
    });

    let reads = fields.iter().map(|field| {
        let field_ident = field.ident.as_ref().expect("named field");
        let name = field_ident.to_string();

        quote! {
            if let Some(cell) = row.get(#name) {
                out.#field_ident = ::qaud::value::FieldValue::from_value(cell.clone())?;
            }
        }
    });

    quote! {
        impl #impl_generics ::qaud::value::FieldValue for #ident #ty_generics #where_clause {
            fn to_value(&self) -> ::qaud::value::Value {
                let mut row = ::qaud::row::Row::new();
                #(#writes)*

                ::qaud::value::Value::Document(row)
            }

            fn from_value(
                value: ::qaud::value::Value,
            ) -> Result<Self, ::qaud::value::ValueTypeError> {
                match value {
                    ::qaud::value::Value::Null => Ok(Self::default()),
                    ::qaud::value::Value::Document(row) => {
                        let mut out = Self::default();
                        #(#reads)*

                        Ok(out)
                    }
                    other => Err(::qaud::value::ValueTypeError::new("document", other.kind())),
                }
            }
        }
    }
}

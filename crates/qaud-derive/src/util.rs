use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, GenericArgument, PathArguments, Type};
use syn::punctuated::Punctuated;
use syn::token::Comma;

/// Named fields of a struct, or a compile error for anything else.
pub fn named_fields(input: &DeriveInput) -> Result<&Punctuated<Field, Comma>, Error> {
    if let Data::Struct(data) = &input.data {
        if let Fields::Named(named) = &data.fields {
            return Ok(&named.named);
        }
    }

    Err(Error::new_spanned(
        &input.ident,
        "this derive only supports structs with named fields",
    ))
}

/// Map a field's Rust type onto its `FieldKind` tag expression.
///
/// `Option<T>` classifies as `T`; `Vec<T>` is a list; unrecognized leaf
/// types classify as documents (nested structures).
pub fn field_kind(ty: &Type) -> TokenStream {
    match leaf(ty) {
        Leaf::Named(name) => match name.as_str() {
            "bool" => quote!(::qaud::model::FieldKind::Bool),
            "i8" | "i16" | "i32" | "i64" => quote!(::qaud::model::FieldKind::Int),
            "u8" | "u16" | "u32" | "u64" => quote!(::qaud::model::FieldKind::Uint),
            "f32" | "f64" => quote!(::qaud::model::FieldKind::Float),
            "String" | "str" => quote!(::qaud::model::FieldKind::Text),
            "Timestamp" => quote!(::qaud::model::FieldKind::Timestamp),
            _ => quote!(::qaud::model::FieldKind::Document),
        },
        Leaf::List => quote!(::qaud::model::FieldKind::List),
        Leaf::Other => quote!(::qaud::model::FieldKind::Document),
    }
}

enum Leaf {
    Named(String),
    List,
    Other,
}

fn leaf(ty: &Type) -> Leaf {
    let Type::Path(path) = ty else {
        return Leaf::Other;
    };
    let Some(segment) = path.path.segments.last() else {
        return Leaf::Other;
    };

    let ident = segment.ident.to_string();
    match ident.as_str() {
        // transparent nullability wrapper
        "Option" => inner_type(&segment.arguments).map_or(Leaf::Other, leaf),
        "Vec" => Leaf::List,
        _ => Leaf::Named(ident),
    }
}

fn inner_type(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };

    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

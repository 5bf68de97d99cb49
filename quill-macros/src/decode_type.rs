use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use std::cmp::min;
use syn::{GenericArgument, Path, PathArguments, Type, TypePath};

pub(crate) fn matches_path(path: &Path, expect: &[&str]) -> bool {
    let len = min(path.segments.len(), expect.len());
    path.segments
        .iter()
        .rev()
        .take(len)
        .map(|v| &v.ident)
        .eq(expect.iter().rev().take(len))
}

fn first_generic(path: &Path) -> Option<&Type> {
    let PathArguments::AngleBracketed(arguments) = &path.segments.last()?.arguments else {
        return None;
    };
    arguments.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

/// Expression building the `::quill::FieldType` of `ty`.
///
/// `enumeration` tags the innermost type as an enum, wrappers are kept around it.
pub(crate) fn decode_type(ty: &Type, enumeration: bool) -> TokenStream {
    let other = || {
        let name = ty.to_token_stream().to_string();
        quote!(::quill::FieldType::Other(#name))
    };
    match ty {
        Type::Reference(reference) => decode_type(&reference.elem, enumeration),
        Type::Group(group) => decode_type(&group.elem, enumeration),
        Type::Paren(paren) => decode_type(&paren.elem, enumeration),
        Type::Array(array) => match &*array.elem {
            Type::Path(TypePath { path, .. }) if path.is_ident("u8") => {
                quote!(::quill::FieldType::Bytes)
            }
            _ => other(),
        },
        Type::Path(TypePath { path, qself: None }) => {
            if matches_path(path, &["std", "option", "Option"]) {
                if let Some(inner) = first_generic(path) {
                    let inner = decode_type(inner, enumeration);
                    return quote!(::quill::FieldType::Optional(&#inner));
                }
                return other();
            }
            if matches_path(path, &["std", "boxed", "Box"])
                || matches_path(path, &["std", "rc", "Rc"])
                || matches_path(path, &["std", "sync", "Arc"])
            {
                return match first_generic(path) {
                    Some(inner) => decode_type(inner, enumeration),
                    None => other(),
                };
            }
            if enumeration {
                return quote!(::quill::FieldType::Enum);
            }
            if let Some(ident) = path.get_ident() {
                let primitive = match ident.to_string().as_str() {
                    "bool" => Some(quote!(Bool)),
                    "char" => Some(quote!(Char)),
                    "i8" => Some(quote!(Int8)),
                    "i16" => Some(quote!(Int16)),
                    "i32" => Some(quote!(Int32)),
                    "i64" | "isize" => Some(quote!(Int64)),
                    "i128" => Some(quote!(Int128)),
                    "u8" => Some(quote!(UInt8)),
                    "u16" => Some(quote!(UInt16)),
                    "u32" => Some(quote!(UInt32)),
                    "u64" | "usize" => Some(quote!(UInt64)),
                    "u128" => Some(quote!(UInt128)),
                    "f32" => Some(quote!(Float32)),
                    "f64" => Some(quote!(Float64)),
                    "str" => Some(quote!(String)),
                    _ => None,
                };
                if let Some(primitive) = primitive {
                    return quote!(::quill::FieldType::#primitive);
                }
            }
            if matches_path(path, &["std", "string", "String"]) {
                quote!(::quill::FieldType::String)
            } else if matches_path(path, &["rust_decimal", "Decimal"]) {
                quote!(::quill::FieldType::Decimal)
            } else if matches_path(path, &["time", "Date"]) {
                quote!(::quill::FieldType::Date)
            } else if matches_path(path, &["time", "Time"]) {
                quote!(::quill::FieldType::Time)
            } else if matches_path(path, &["time", "PrimitiveDateTime"])
                || matches_path(path, &["time", "OffsetDateTime"])
            {
                quote!(::quill::FieldType::DateTime)
            } else if matches_path(path, &["std", "time", "Duration"]) {
                quote!(::quill::FieldType::TimeSpan)
            } else if matches_path(path, &["uuid", "Uuid"]) {
                quote!(::quill::FieldType::Uuid)
            } else if matches_path(path, &["std", "vec", "Vec"])
                && first_generic(path).is_some_and(|inner| {
                    matches!(inner, Type::Path(TypePath { path, .. }) if path.is_ident("u8"))
                })
            {
                quote!(::quill::FieldType::Bytes)
            } else {
                other()
            }
        }
        _ => other(),
    }
}

use crate::decode_type::decode_type;
use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{Field, Ident, ItemStruct, LitStr, ext::IdentExt, parse::ParseBuffer};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) name: String,
    pub(crate) field_type: TokenStream,
    pub(crate) skip: bool,
}

/// Case applied to field names when the struct carries `#[record(rename_all = "...")]`.
pub(crate) fn decode_rename_all(item: &ItemStruct) -> Option<Case> {
    let mut case = None;
    for attr in &item.attrs {
        if !attr.meta.path().is_ident("record") {
            continue;
        }
        let Ok(list) = attr.meta.require_list() else {
            panic!("Error while parsing `record`, use it like: `#[record(rename_all = \"PascalCase\")]`");
        };
        let _ = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("rename_all") {
                let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    panic!("Error while parsing `rename_all`, use it like: `#[record(rename_all = \"PascalCase\")]`");
                };
                case = Some(match v.value().as_str() {
                    "PascalCase" => Case::Pascal,
                    "camelCase" => Case::Camel,
                    "snake_case" => Case::Snake,
                    "SCREAMING_SNAKE_CASE" => Case::UpperSnake,
                    "kebab-case" => Case::Kebab,
                    "lowercase" => Case::Flat,
                    "UPPERCASE" => Case::UpperFlat,
                    other => panic!("Unknown case `{}` in `rename_all`", other),
                });
            } else {
                panic!(
                    "Unknown attribute `{}` on the struct, only `rename_all` is supported",
                    arg.path.to_token_stream()
                );
            }
            Ok(())
        });
    }
    case
}

pub(crate) fn decode_field(field: &Field, rename_all: Option<Case>) -> FieldMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Record can only be derived on structs with named fields");
    let unraw = ident.unraw().to_string();
    let mut name = match rename_all {
        Some(case) => unraw.to_case(case),
        None => unraw,
    };
    let mut enumeration = false;
    let mut skip = false;
    for attr in &field.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("record") {
            continue;
        }
        let Ok(list) = meta.require_list() else {
            panic!("Error while parsing `record`, use it like: `#[record(attribute = value, ...)]`");
        };
        let _ = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    panic!("Error while parsing `name`, use it like: `#[record(name = \"Kind\")]`");
                };
                name = v.value();
            } else if arg.path.is_ident("skip") {
                let Err(..) = arg.value() else {
                    // value() is Err for Meta::Path
                    panic!("Error while parsing `skip`, use it like: `#[record(skip)]`");
                };
                skip = true;
            } else if arg.path.is_ident("enumeration") {
                let Err(..) = arg.value() else {
                    panic!("Error while parsing `enumeration`, use it like: `#[record(enumeration)]`");
                };
                enumeration = true;
            } else {
                panic!(
                    "Unknown attribute `{}` inside record macro",
                    arg.path.to_token_stream()
                );
            }
            Ok(())
        });
    }
    FieldMetadata {
        field_type: decode_type(&field.ty, enumeration),
        ident,
        name,
        skip,
    }
}

mod decode_field;
mod decode_type;
mod fields_trait;

use decode_field::{decode_field, decode_rename_all};
use fields_trait::fields_trait;
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, parse_macro_input};

#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let name = &item.ident;
    let type_name = name.to_string();
    let rename_all = decode_rename_all(&item);
    let fields: Vec<_> = item
        .fields
        .iter()
        .map(|f| decode_field(f, rename_all))
        .filter(|f| !f.skip)
        .collect();
    let field_defs = fields.iter().map(|f| {
        let name = &f.name;
        let field_type = &f.field_type;
        quote!(::quill::FieldDef::new(#name, #field_type))
    });
    let tags = fields_trait(&item, &fields);
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    quote! {
        impl #impl_generics ::quill::Record for #name #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }

            fn fields() -> &'static [::quill::FieldDef] {
                static FIELDS: &[::quill::FieldDef] = &[#(#field_defs),*];
                FIELDS
            }
        }
        #tags
    }
    .into()
}

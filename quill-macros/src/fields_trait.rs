use crate::decode_field::FieldMetadata;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, ItemStruct, spanned::Spanned};

/// Typed field tags: `Product::kind` is the `FieldDef` of `kind`, usable wherever a property
/// is selected.
pub(crate) fn fields_trait(item: &ItemStruct, fields: &[FieldMetadata]) -> TokenStream {
    let struct_name = &item.ident;
    let vis = &item.vis;
    let trait_name = Ident::new(&format!("{}Fields", struct_name), item.span());
    let declarations = fields.iter().map(|f| {
        let ident = &f.ident;
        quote! {
            #[allow(non_upper_case_globals)]
            const #ident: ::quill::FieldDef;
        }
    });
    let definitions = fields.iter().map(|f| {
        let ident = &f.ident;
        let name = &f.name;
        let field_type = &f.field_type;
        quote! {
            const #ident: ::quill::FieldDef = ::quill::FieldDef::new(#name, #field_type);
        }
    });
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    quote! {
        #vis trait #trait_name {
            #(#declarations)*
        }
        impl #impl_generics #trait_name for #struct_name #ty_generics #where_clause {
            #(#definitions)*
        }
    }
}

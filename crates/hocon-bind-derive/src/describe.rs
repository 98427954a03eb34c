//! `DescribeConfig` derive macro implementation.

use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::{DeriveInput, spanned::Spanned};

use crate::utils::{ConfigContainer, ConfigField};

impl ConfigField {
    fn describe(&self, cr: &proc_macro2::TokenStream) -> proc_macro2::TokenStream {
        let name = self.rust_name();
        let tag = self
            .tag
            .as_ref()
            .map_or_else(String::new, syn::LitStr::value);
        let help = &self.docs;
        let ty = &self.ty;
        let ty_in_code = quote!(#ty).to_string().replace(' ', "");

        quote_spanned! {ty.span()=>
            #cr::metadata::FieldMetadata {
                rust_field_name: #name,
                tag: #tag,
                help: #help,
                rust_type: #cr::metadata::RustType::of::<#ty>(#ty_in_code),
                shape: <#ty as #cr::de::DeserializeField>::SHAPE,
            }
        }
    }
}

impl ConfigContainer {
    fn derive_describe_config(&self) -> proc_macro2::TokenStream {
        let cr = self.cr();
        let name = &self.name;
        let name_str = name.to_string();
        let help = &self.docs;
        let fields = self.fields.iter().map(|field| field.describe(&cr));

        quote! {
            impl #cr::DescribeConfig for #name {
                const DESCRIPTION: #cr::metadata::ConfigMetadata = #cr::metadata::ConfigMetadata {
                    ty: #cr::metadata::RustType::of::<Self>(#name_str),
                    help: #help,
                    fields: &[#(#fields,)*],
                };
            }
        }
    }
}

pub(crate) fn impl_describe_config(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse(input) {
        Ok(input) => input,
        Err(err) => return err.into_compile_error().into(),
    };
    let container = match ConfigContainer::new(&input) {
        Ok(container) => container,
        Err(err) => return err.into_compile_error().into(),
    };
    container.derive_describe_config().into()
}

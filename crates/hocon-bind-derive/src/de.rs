use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::DeriveInput;

use crate::utils::ConfigContainer;

impl ConfigContainer {
    fn derive_deserialize_config(&self) -> proc_macro2::TokenStream {
        let cr = self.cr();
        let name = &self.name;

        let fields = self.fields.iter().enumerate().map(|(i, field)| {
            let field_name = &field.name;
            quote_spanned! {field_name.span()=>
                ctx.deserialize_field(#i, &mut self.#field_name)?;
            }
        });

        let allow_unused = self
            .fields
            .is_empty()
            .then(|| quote!(#[allow(unused_variables)]));

        quote! {
            impl #cr::DeserializeConfig for #name {
                #allow_unused
                fn deserialize_config(
                    &mut self,
                    ctx: &#cr::de::DeserializeContext<'_>,
                ) -> ::core::result::Result<(), #cr::LoadError> {
                    #(#fields)*
                    ::core::result::Result::Ok(())
                }
            }

            impl #cr::de::DeserializeField for #name {
                const SHAPE: #cr::metadata::FieldShape =
                    #cr::metadata::FieldShape::Nested(&<#name as #cr::DescribeConfig>::DESCRIPTION);

                fn deserialize_field(
                    &mut self,
                    ctx: #cr::de::FieldContext<'_>,
                ) -> ::core::result::Result<(), #cr::LoadError> {
                    const DESCRIPTION: &#cr::metadata::ConfigMetadata =
                        &<#name as #cr::DescribeConfig>::DESCRIPTION;
                    let ctx = ctx.nested(DESCRIPTION);
                    <Self as #cr::DeserializeConfig>::deserialize_config(self, &ctx)
                }
            }
        }
    }
}

pub(crate) fn impl_deserialize_config(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse(input) {
        Ok(input) => input,
        Err(err) => return err.into_compile_error().into(),
    };
    let container = match ConfigContainer::new(&input) {
        Ok(container) => container,
        Err(err) => return err.into_compile_error().into(),
    };
    container.derive_deserialize_config().into()
}

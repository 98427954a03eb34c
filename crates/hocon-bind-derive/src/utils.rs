//! Parsing of config containers and their fields shared by all derive macros.

use proc_macro2::Ident;
use quote::{quote, quote_spanned};
use syn::{
    Attribute, Data, DeriveInput, Expr, Field, Fields, Lit, LitStr, Path, Type, ext::IdentExt,
};

const ATTR_NAME: &str = "hocon";

fn parse_docs(attrs: &[Attribute]) -> String {
    let doc_lines = attrs.iter().filter_map(|attr| {
        if attr.meta.path().is_ident("doc") {
            let name_value = attr.meta.require_name_value().ok()?;
            let Expr::Lit(doc_literal) = &name_value.value else {
                return None;
            };
            match &doc_literal.lit {
                Lit::Str(doc_literal) => Some(doc_literal.value()),
                _ => None,
            }
        } else {
            None
        }
    });

    let mut docs = String::new();
    for line in doc_lines {
        let line = line.trim();
        if line.is_empty() {
            if !docs.is_empty() {
                // New paragraph; convert it to a new line.
                docs.push('\n');
            }
        } else {
            if !docs.is_empty() && !docs.ends_with(|ch: char| ch.is_ascii_whitespace()) {
                docs.push(' ');
            }
            docs.push_str(line);
        }
    }
    docs
}

/// Field of a config container.
pub(crate) struct ConfigField {
    pub(crate) name: Ident,
    pub(crate) ty: Type,
    /// Raw tag from `#[hocon("..")]`.
    pub(crate) tag: Option<LitStr>,
    pub(crate) docs: String,
}

impl ConfigField {
    fn new(raw: &Field) -> syn::Result<Self> {
        let name = raw.ident.clone().ok_or_else(|| {
            let message = "Only named fields are supported";
            syn::Error::new_spanned(raw, message)
        })?;

        let mut tag = None;
        for attr in raw.attrs.iter().filter(|attr| attr.path().is_ident(ATTR_NAME)) {
            if tag.is_some() {
                let message = "Only one #[hocon(\"..\")] tag is allowed per field";
                return Err(syn::Error::new_spanned(attr, message));
            }
            tag = Some(attr.parse_args::<LitStr>()?);
        }

        Ok(Self {
            name,
            ty: raw.ty.clone(),
            tag,
            docs: parse_docs(&raw.attrs),
        })
    }

    /// Name of the field without the `r#` prefix.
    pub(crate) fn rust_name(&self) -> String {
        self.name.unraw().to_string()
    }
}

struct ConfigContainerAttrs {
    cr: Option<Path>,
}

impl ConfigContainerAttrs {
    fn new(attrs: &[Attribute]) -> syn::Result<Self> {
        let config_attrs = attrs.iter().filter(|attr| attr.path().is_ident(ATTR_NAME));

        let mut cr = None;
        for attr in config_attrs {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    cr = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("Unsupported attribute; only `crate` is supported"))
                }
            })?;
        }
        Ok(Self { cr })
    }
}

/// Config record (a struct with named fields).
pub(crate) struct ConfigContainer {
    attrs: ConfigContainerAttrs,
    pub(crate) name: Ident,
    pub(crate) docs: String,
    pub(crate) fields: Vec<ConfigField>,
}

impl ConfigContainer {
    pub(crate) fn new(raw: &DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = &raw.data else {
            let message = "Only structs with named fields can be configs";
            return Err(syn::Error::new_spanned(raw, message));
        };
        if let Fields::Unnamed(fields) = &data.fields {
            let message = "Tuple structs are not supported; use a struct with named fields";
            return Err(syn::Error::new_spanned(fields, message));
        }
        if raw.generics.type_params().count() != 0
            || raw.generics.const_params().count() != 0
            || raw.generics.lifetimes().count() != 0
        {
            let message = "generics are not supported";
            return Err(syn::Error::new_spanned(&raw.generics, message));
        }

        let attrs = ConfigContainerAttrs::new(&raw.attrs)?;
        let fields = data
            .fields
            .iter()
            .map(ConfigField::new)
            .collect::<syn::Result<_>>()?;
        Ok(Self {
            attrs,
            name: raw.ident.clone(),
            docs: parse_docs(&raw.attrs),
            fields,
        })
    }

    /// Path to the main crate in the generated code.
    pub(crate) fn cr(&self) -> proc_macro2::TokenStream {
        if let Some(cr) = &self.attrs.cr {
            quote!(#cr)
        } else {
            let name = &self.name;
            quote_spanned!(name.span()=> ::hocon_bind)
        }
    }
}

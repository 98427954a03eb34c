//! Procedural macros for `hocon-bind`.
//!
//! All macros in this crate are re-exported from the `hocon-bind` crate. See its docs for more details
//! and the examples of usage.

// Documentation settings
#![doc(html_root_url = "https://docs.rs/hocon-bind-derive/0.1.0")]
// General settings
#![recursion_limit = "128"]
// Linter settings
#![allow(missing_docs)] // Adding docs here would interfere with docs in the main crate

extern crate proc_macro;

use proc_macro::TokenStream;

mod de;
mod describe;
mod utils;

#[proc_macro_derive(DescribeConfig, attributes(hocon))]
pub fn describe_config(input: TokenStream) -> TokenStream {
    describe::impl_describe_config(input)
}

#[proc_macro_derive(DeserializeConfig, attributes(hocon))]
pub fn deserialize_config(input: TokenStream) -> TokenStream {
    de::impl_deserialize_config(input)
}

//! `hocon-bind` – tag-driven binding of HOCON configuration onto typed Rust records.
//!
//! # Overview
//!
//! A config record is a struct with named fields deriving [`DescribeConfig`] and [`DeserializeConfig`].
//! The first macro builds [metadata](ConfigMetadata) for the record as a `const`; the second one generates
//! the code visiting each field in declaration order. Each field has a dotted path in the HOCON document
//! which is derived from the field name and can be customized with a *tag*:
//!
//! ```text
//! #[hocon("path=a.b,node=x,default=5")]
//! ```
//!
//! - `path` sets the absolute path of the field, ignoring the path of the enclosing records.
//! - `node` replaces the field name as the last path segment.
//! - `default` is a literal used when the document has no value at the path. It's parsed with
//!   the same rules as values in the document.
//!
//! Tags are parsed when loading the config; see the [`tag`] module for details. Tags on nested record fields
//! change the prefix of all fields of the nested record.
//!
//! Field types are restricted to fixed-width integers (`i8`..`i64`, `u8`..`u64`), `f32` / `f64`, `bool`, `String`,
//! `Vec`s of these types, and nested records. Values are range-checked for the field type; e.g., loading
//! `300` into a `u8` field is an error rather than a silent truncation. There is no implicit fallback
//! to zero values: a field without a value in the document and without a default is an error.
//! See the [`de`] module for details.
//!
//! Parsing HOCON (including substitutions) is delegated to the [`hocon`] crate.
//!
//! # Examples
//!
//! ```
//! use hocon_bind::{load_config_text, DescribeConfig, DeserializeConfig};
//!
//! #[derive(Debug, Default, DescribeConfig, DeserializeConfig)]
//! struct ServerConfig {
//!     /// Port to bind to.
//!     #[hocon("default=8080")]
//!     port: u16,
//!     #[hocon("node=log-level,default=info")]
//!     log_level: String,
//!     /// Connection pool settings.
//!     #[hocon("node=db")]
//!     pool: PoolConfig,
//! }
//!
//! #[derive(Debug, Default, DescribeConfig, DeserializeConfig)]
//! struct PoolConfig {
//!     size: u32,
//!     #[hocon("path=timeouts.acquire_ms")]
//!     acquire_timeout_ms: u64,
//! }
//!
//! let hocon = r#"
//!     port: 3000
//!     db { size: 16 }
//!     timeouts { acquire_ms: 500 }
//! "#;
//! let mut config = ServerConfig::default();
//! load_config_text(hocon, &mut config)?;
//! assert_eq!(config.port, 3_000);
//! assert_eq!(config.log_level, "info"); // from the default
//! assert_eq!(config.pool.size, 16);
//! assert_eq!(config.pool.acquire_timeout_ms, 500);
//! # anyhow::Ok(())
//! ```

// Documentation settings
#![doc(html_root_url = "https://docs.rs/hocon-bind/0.1.0")]
// Linter settings
#![warn(missing_docs)]

/// Derives the [`DescribeConfig`](trait@DescribeConfig) trait for a type.
///
/// The macro can only be placed on structs with named fields and without generics.
///
/// # Container attributes
///
/// ## `crate`
///
/// **Type:** path
///
/// Path to the `hocon-bind` crate in the generated code. Defaults to `::hocon_bind`.
///
/// # Field attributes
///
/// ## Tag
///
/// **Type:** string literal, e.g. `#[hocon("node=port,default=8080")]`
///
/// Configures the path and the default value of the field. At most one tag can be specified
/// per field. Tags are not validated at compile time; use [`ConfigSchema`] to validate them upfront.
///
/// Doc comments of the record and its fields are used as help.
///
/// # Examples
///
/// ```
/// use hocon_bind::{metadata::FieldShape, DescribeConfig};
/// # use hocon_bind::DeserializeConfig;
///
/// /// Test config.
/// #[derive(DescribeConfig, DeserializeConfig)]
/// struct TestConfig {
///     /// Values to process.
///     #[hocon("node=items")]
///     values: Vec<u32>,
/// }
///
/// let metadata = &TestConfig::DESCRIPTION;
/// assert_eq!(metadata.help, "Test config.");
/// let field = &metadata.fields[0];
/// assert_eq!(field.rust_field_name, "values");
/// assert_eq!(field.tag, "node=items");
/// assert_eq!(field.help, "Values to process.");
/// assert!(matches!(field.shape, FieldShape::Array(_)));
/// ```
pub use hocon_bind_derive::DescribeConfig;
/// Derives the [`DeserializeConfig`](trait@DeserializeConfig) trait for a type.
///
/// This macro is intended to be used together with [`DescribeConfig`](macro@DescribeConfig). It reuses
/// the same attributes, so see `DescribeConfig` docs for details. Besides `DeserializeConfig`, the macro
/// implements [`DeserializeField`](de::DeserializeField), so that the record can be nested in other records.
pub use hocon_bind_derive::DeserializeConfig;

pub use self::{
    de::LoadOptions,
    error::{CoerceError, ErrorKind, LoadError},
    schema::{ConfigSchema, ParamRef},
    source::{ConfigLoader, ConfigTree, load_config_file, load_config_text},
};
use self::{de::DeserializeContext, metadata::ConfigMetadata};

pub mod de;
mod error;
pub mod metadata;
mod schema;
mod source;
pub mod tag;
#[cfg(test)]
mod testonly;
pub mod value;

/// Describes a configuration record.
pub trait DescribeConfig: 'static {
    /// Provides the record description.
    const DESCRIPTION: ConfigMetadata;
}

/// Loads a configuration record in place from a configuration tree.
///
/// This trait should be derived using the [corresponding proc macro](macro@DeserializeConfig).
pub trait DeserializeConfig: DescribeConfig {
    /// Loads all fields of the record in declaration order, stopping on the first error.
    ///
    /// # Errors
    ///
    /// Returns an error if any field (including fields of nested records) fails to load.
    fn deserialize_config(&mut self, ctx: &DeserializeContext<'_>) -> Result<(), LoadError>;
}

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

//! Field tags: the `#[hocon("key=value,...")]` micro-language.
//!
//! A tag is a comma-separated list of `key=value` items. The recognized keys are:
//!
//! - `path`: absolute dotted path of the field in the HOCON tree. Overrides everything else,
//!   including the prefix accumulated from parent records.
//! - `node`: path segment appended to the parent path instead of the field name.
//! - `default`: raw literal used when the tree has no value for the field. Parsed with the same
//!   rules as the values themselves.
//!
//! Tags are parsed when a configuration is loaded, so malformed tags surface as
//! [`LoadError`](crate::LoadError)s rather than compilation errors.

use std::fmt;

use crate::value::Pointer;

const PATH_KEY: &str = "path";
const NODE_KEY: &str = "node";
const DEFAULT_KEY: &str = "default";

/// How to treat unrecognized keys in tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagPolicy {
    /// Unknown keys are ignored.
    #[default]
    Lenient,
    /// Unknown keys are errors.
    Strict,
}

/// Error parsing a field tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TagError {
    /// An item doesn't have the `key=value` form.
    Format {
        /// Offending item.
        item: String,
    },
    /// Key is not one of `path`, `node` or `default` (only reported with [`TagPolicy::Strict`]).
    UnknownKey {
        /// Offending key.
        key: String,
    },
}

impl fmt::Display for TagError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format { item } => write!(formatter, "item '{item}' is not a key=value pair"),
            Self::UnknownKey { key } => write!(
                formatter,
                "unknown key '{key}'; expected one of {PATH_KEY}, {NODE_KEY}, {DEFAULT_KEY}"
            ),
        }
    }
}

impl std::error::Error for TagError {}

/// Parsed contents of a field tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directives<'a> {
    /// Absolute path override.
    pub path: Option<&'a str>,
    /// Relative segment override.
    pub node: Option<&'a str>,
    /// Raw default literal. `Some("")` for `default=`.
    pub default: Option<&'a str>,
}

impl<'a> Directives<'a> {
    /// Parses a tag. An empty tag produces empty directives.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is malformed, or contains an unknown key and `policy` is strict.
    pub fn parse(tag: &'a str, policy: TagPolicy) -> Result<Self, TagError> {
        let mut directives = Self::default();
        if tag.is_empty() {
            return Ok(directives);
        }

        for item in tag.split(',') {
            let mut parts = item.split('=');
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(TagError::Format {
                    item: item.to_owned(),
                });
            };

            match key {
                PATH_KEY => directives.path = Some(value),
                NODE_KEY => directives.node = Some(value),
                DEFAULT_KEY => directives.default = Some(value),
                _ if policy == TagPolicy::Strict => {
                    return Err(TagError::UnknownKey {
                        key: key.to_owned(),
                    });
                }
                _ => { /* ignored */ }
            }
        }
        Ok(directives)
    }

    /// Resolves the absolute path of a field given the path of its parent.
    pub fn resolve_path(&self, parent: Pointer<'_>, field_name: &str) -> String {
        if let Some(path) = self.path {
            return path.to_owned();
        }
        parent.join(self.node.unwrap_or(field_name))
    }
}

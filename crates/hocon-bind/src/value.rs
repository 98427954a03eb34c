//! HOCON object model with value origins.

use std::{collections::HashMap, fmt, sync::Arc};

/// Origin of a [`Value`] in configuration input.
#[derive(Debug, Default)]
#[non_exhaustive]
pub enum ValueOrigin {
    /// Unknown / default origin.
    #[default]
    Unknown,
    /// HOCON text supplied directly by the caller.
    Inline,
    /// HOCON file.
    File {
        /// Name of the file.
        name: String,
    },
    /// Path from another origin.
    Path {
        /// Source of the value.
        source: Arc<Self>,
        /// Dot-separated path in the source, like `api.http.port`.
        path: String,
    },
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => formatter.write_str("unknown"),
            Self::Inline => formatter.write_str("inline HOCON text"),
            Self::File { name } => write!(formatter, "HOCON file '{name}'"),
            Self::Path { source, path } => {
                if path.is_empty() {
                    fmt::Display::fmt(source, formatter)
                } else {
                    write!(formatter, "variable at '{path}' in {source}")
                }
            }
        }
    }
}

/// Value in the HOCON object model after substitutions are resolved.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// `null`.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(serde_json::Number),
    /// String value (quoted or unquoted in the source).
    String(String),
    /// Array of values.
    Array(Vec<WithOrigin>),
    /// Object / map of values.
    Object(Map),
}

impl Value {
    /// Human-readable name of the value type used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(number) if number.is_f64() => "float",
            Self::Number(_) => "integer",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Renders a scalar value as text the way it would be written in HOCON. Returns `None` for
    /// `null`, arrays and objects.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Bool(value) => Some(value.to_string()),
            Self::Number(value) => Some(value.to_string()),
            Self::String(value) => Some(value.clone()),
            Self::Null | Self::Array(_) | Self::Object(_) => None,
        }
    }

    /// Attempts to convert this value to an object.
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }
}

/// HOCON object.
pub type Map<V = Value> = HashMap<String, WithOrigin<V>>;

/// HOCON value together with its origin.
#[derive(Debug, Clone, Default)]
pub struct WithOrigin<T = Value> {
    /// Inner value.
    pub inner: T,
    /// Origin of the value.
    pub origin: Arc<ValueOrigin>,
}

impl PartialEq for WithOrigin {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> WithOrigin<T> {
    pub(crate) fn new(inner: T, origin: Arc<ValueOrigin>) -> Self {
        Self { inner, origin }
    }
}

impl WithOrigin {
    pub(crate) fn get(&self, pointer: Pointer<'_>) -> Option<&Self> {
        pointer
            .segments()
            .try_fold(self, |ptr, segment| match &ptr.inner {
                Value::Object(map) => map.get(segment),
                Value::Array(array) => array.get(segment.parse::<usize>().ok()?),
                _ => None,
            })
    }
}

/// Dot-separated path into a [`Value`] tree. The empty pointer refers to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pointer<'a>(pub &'a str);

impl<'a> Pointer<'a> {
    /// Iterates over path segments.
    pub fn segments(self) -> impl Iterator<Item = &'a str> {
        self.0
            .split('.')
            .take(if self.0.is_empty() { 0 } else { usize::MAX })
    }

    /// Splits off the last segment of this pointer.
    pub fn split_last(self) -> Option<(Self, &'a str)> {
        if self.0.is_empty() {
            None
        } else if let Some((parent, last_segment)) = self.0.rsplit_once('.') {
            Some((Self(parent), last_segment))
        } else {
            Some((Self(""), self.0))
        }
    }

    /// Appends a segment (or a dotted suffix) to this pointer.
    pub fn join(self, suffix: &str) -> String {
        if self.0.is_empty() {
            suffix.to_owned()
        } else {
            format!("{}.{suffix}", self.0)
        }
    }
}

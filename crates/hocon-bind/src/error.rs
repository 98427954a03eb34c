//! Config loading errors.

use std::{fmt, io, path::PathBuf, sync::Arc};

use crate::{
    metadata::{FieldMetadata, PrimitiveType},
    tag::TagError,
    value::ValueOrigin,
};

/// Error coercing a raw value or a default literal to the type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoerceError {
    /// Value doesn't fit into the target type.
    OutOfRange {
        /// Textual form of the offending value.
        literal: String,
        /// Target type.
        expected: PrimitiveType,
    },
    /// Value is not a valid literal for the target type.
    InvalidSyntax {
        /// Textual form of the offending value.
        literal: String,
        /// Target type.
        expected: PrimitiveType,
    },
    /// Value is not one of the recognized boolean literals.
    InvalidBool {
        /// Textual form of the offending value.
        literal: String,
    },
    /// Value has a type that cannot be converted to the target type at all (e.g., an object).
    UnexpectedType {
        /// Expected value type.
        expected: &'static str,
        /// Actual value type.
        actual: &'static str,
    },
}

impl fmt::Display for CoerceError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { literal, expected } => {
                write!(formatter, "parsing '{literal}' as {expected}: value out of range")
            }
            Self::InvalidSyntax { literal, expected } => {
                write!(formatter, "parsing '{literal}' as {expected}: invalid syntax")
            }
            Self::InvalidBool { literal } => write!(
                formatter,
                "'{literal}' is not a boolean; expected one of true/false, yes/no, on/off (case-insensitive)"
            ),
            Self::UnexpectedType { expected, actual } => {
                write!(formatter, "invalid type: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for CoerceError {}

/// Kind of a [`LoadError`].
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Field tag is malformed.
    Tag(TagError),
    /// Field has neither a value in the configuration nor a default.
    MissingValue,
    /// A default value was specified for a field that doesn't support defaults (e.g., a `Vec`).
    DefaultNotSupported,
    /// Field uses a platform-dependent integer type.
    PlatformInteger {
        /// Used type (`isize` or `usize`).
        rust_type: &'static str,
        /// Suggested replacements.
        suggestion: &'static str,
    },
    /// Field type cannot be loaded.
    UnsupportedType(&'static str),
    /// Value in the configuration cannot be coerced to the field type.
    InvalidValue(CoerceError),
    /// Default literal from the tag cannot be coerced to the field type.
    InvalidDefault(CoerceError),
    /// Configuration file cannot be read.
    FileAccess {
        /// Path to the file.
        file: PathBuf,
        /// I/O error.
        source: io::Error,
    },
    /// Configuration text is not valid HOCON.
    Syntax(hocon::Error),
}

impl ErrorKind {
    fn describe(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(TagError::UnknownKey { .. }) => formatter.write_str("unknown tag key"),
            Self::Tag(_) => formatter.write_str("tag format error"),
            Self::MissingValue => formatter.write_str("no value either default value provided"),
            Self::DefaultNotSupported => formatter.write_str("slices do not support default value"),
            Self::PlatformInteger {
                rust_type,
                suggestion,
            } => write!(
                formatter,
                "cannot use {rust_type}; use {suggestion} explicitly instead"
            ),
            Self::UnsupportedType(ty) => write!(formatter, "unimplemented data type {ty}"),
            Self::InvalidValue(_) => formatter.write_str("wrong value"),
            Self::InvalidDefault(_) => formatter.write_str("wrong default value"),
            Self::FileAccess { file, .. } => write!(
                formatter,
                "cannot read configuration file `{}`",
                file.display()
            ),
            Self::Syntax(_) => formatter.write_str("cannot parse HOCON"),
        }
    }

    fn cause(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tag(err) => Some(err),
            Self::InvalidValue(err) | Self::InvalidDefault(err) => Some(err),
            Self::FileAccess { source, .. } => Some(source),
            Self::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

/// Error loading a configuration.
///
/// The error message identifies the offending field by its Rust name and raw tag, together with
/// the resolved path and the value origin where applicable.
pub struct LoadError {
    kind: ErrorKind,
    field: Option<&'static FieldMetadata>,
    path: Option<String>,
    origin: Option<Arc<ValueOrigin>>,
}

impl fmt::Debug for LoadError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoadError")
            .field("kind", &self.kind)
            .field("field", &self.field.map(|field| field.rust_field_name))
            .field("tag", &self.field.map(|field| field.tag))
            .field("path", &self.path)
            .field("origin", &self.origin)
            .finish()
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.describe(formatter)?;
        if let Some(field) = self.field {
            write!(formatter, " for {} [{}]", field.rust_field_name, field.tag)?;
        }
        if let Some(path) = &self.path {
            write!(formatter, " at `{path}`")?;
        }
        if let Some(origin) = &self.origin {
            write!(formatter, " [origin: {origin}]")?;
        }
        if let Some(cause) = self.kind.cause() {
            write!(formatter, ": {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.cause()
    }
}

impl From<ErrorKind> for LoadError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            field: None,
            path: None,
            origin: None,
        }
    }
}

impl LoadError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns metadata of the field this error concerns, if any.
    pub fn field(&self) -> Option<&'static FieldMetadata> {
        self.field
    }

    /// Returns the absolute path on which this error has occurred, if any.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the origin of the value which failed to load, if any.
    pub fn origin(&self) -> Option<&ValueOrigin> {
        self.origin.as_deref()
    }

    pub(crate) fn for_field(mut self, field: &'static FieldMetadata) -> Self {
        self.field = Some(field);
        self
    }

    pub(crate) fn with_path(mut self, path: String) -> Self {
        self.path = Some(path);
        self
    }

    pub(crate) fn with_origin(mut self, origin: &Arc<ValueOrigin>) -> Self {
        self.origin = Some(origin.clone());
        self
    }
}

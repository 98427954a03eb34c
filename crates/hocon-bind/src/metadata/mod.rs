//! Configuration metadata.
//!
//! Metadata is produced by the [`DescribeConfig`](macro@crate::DescribeConfig) derive macro as a `const`,
//! so it is built once per type and is available without instantiating the config.

use std::{any, fmt};


/// Metadata for a configuration record.
#[derive(Debug, Clone, Copy)]
pub struct ConfigMetadata {
    /// Type of this configuration.
    pub ty: RustType,
    /// Help regarding the config itself.
    pub help: &'static str,
    /// Fields of the record in declaration order.
    pub fields: &'static [FieldMetadata],
}

impl ConfigMetadata {
    /// Finds a field by its name in Rust code.
    pub fn field(&self, rust_field_name: &str) -> Option<&'static FieldMetadata> {
        self.fields
            .iter()
            .find(|field| field.rust_field_name == rust_field_name)
    }
}

/// Metadata for a single field of a configuration record.
#[derive(Debug, Clone, Copy)]
pub struct FieldMetadata {
    /// Name of the field in Rust code (without the `r#` prefix for raw identifiers).
    /// Used as the path segment unless overridden by the tag.
    pub rust_field_name: &'static str,
    /// Raw tag text from the `#[hocon("...")]` attribute; empty if the attribute is absent.
    pub tag: &'static str,
    /// Human-readable help parsed from the doc comment.
    pub help: &'static str,
    /// Rust type of the field.
    pub rust_type: RustType,
    /// Shape of the field as seen by the loader.
    pub shape: FieldShape,
}

/// Shape of a config field.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum FieldShape {
    /// Primitive leaf value.
    Primitive(PrimitiveType),
    /// List of primitive values.
    Array(PrimitiveType),
    /// Nested configuration record.
    Nested(&'static ConfigMetadata),
    /// Type that is recognized only to be rejected during loading.
    Unsupported(&'static str),
}

impl FieldShape {
    /// Checks whether this is a leaf field (i.e., not a nested record).
    pub const fn is_leaf(&self) -> bool {
        !matches!(self, Self::Nested(_))
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(ty) => fmt::Display::fmt(ty, formatter),
            Self::Array(ty) => write!(formatter, "array of {ty}"),
            Self::Nested(meta) => write!(formatter, "config `{}`", meta.ty.name_in_code()),
            Self::Unsupported(ty) => write!(formatter, "unsupported {ty}"),
        }
    }
}

/// Primitive types supported by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PrimitiveType {
    /// Boolean; accepts `true` / `false`, `yes` / `no`, `on` / `off` in any case.
    Bool,
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// Single-precision float.
    F32,
    /// Double-precision float.
    F64,
    /// String.
    String,
}

impl PrimitiveType {
    /// Returns the name of the type as it is written in Rust.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
        }
    }

    /// Returns the bit width for numeric types.
    pub const fn bit_width(self) -> Option<u32> {
        match self {
            Self::I8 | Self::U8 => Some(8),
            Self::I16 | Self::U16 => Some(16),
            Self::I32 | Self::U32 | Self::F32 => Some(32),
            Self::I64 | Self::U64 | Self::F64 => Some(64),
            Self::Bool | Self::String => None,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Representation of a Rust type.
#[derive(Clone, Copy)]
pub struct RustType {
    id: fn() -> any::TypeId,
    name_in_code: &'static str,
}

impl fmt::Debug for RustType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name_in_code)
    }
}

impl PartialEq for RustType {
    fn eq(&self, other: &Self) -> bool {
        (self.id)() == (other.id)()
    }
}

impl RustType {
    /// Creates a new type.
    pub const fn of<T: 'static>(name_in_code: &'static str) -> Self {
        Self {
            id: any::TypeId::of::<T>,
            name_in_code,
        }
    }

    /// Returns the unique ID of this type.
    pub fn id(&self) -> any::TypeId {
        (self.id)()
    }

    /// Returns the name of this type as specified in code.
    pub const fn name_in_code(&self) -> &'static str {
        self.name_in_code
    }
}

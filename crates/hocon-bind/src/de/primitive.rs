//! Coercion of raw values to primitive field types.

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    num::{IntErrorKind, ParseIntError},
};

use super::{DeserializeField, FieldContext};
use crate::{
    error::{CoerceError, ErrorKind, LoadError},
    metadata::{FieldShape, PrimitiveType},
    value::{Pointer, Value},
};

/// 2^64; integral floats with a greater magnitude do not fit any supported integer type.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Primitive type that can be coerced from a HOCON scalar or a textual literal.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a primitive config value",
    note = "Array items must be primitive values; nested configs cannot be array items"
)]
pub trait Primitive: Sized + 'static {
    /// Type used in metadata and error messages.
    const TYPE: PrimitiveType;

    /// Parses a textual literal, e.g. a tag default or an array item.
    ///
    /// # Errors
    ///
    /// Returns an error if the literal is malformed or is out of range for the type.
    fn from_literal(literal: &str) -> Result<Self, CoerceError>;

    /// Coerces a value from the configuration tree. By default, the value is rendered as text
    /// and parsed with [`Self::from_literal()`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be coerced to the type.
    fn from_value(value: &Value) -> Result<Self, CoerceError> {
        Self::from_literal(&scalar_text(value, Self::TYPE)?)
    }
}

fn scalar_text(value: &Value, expected: PrimitiveType) -> Result<String, CoerceError> {
    value.as_text().ok_or(CoerceError::UnexpectedType {
        expected: expected.as_str(),
        actual: value.type_name(),
    })
}

fn int_error(literal: &str, expected: PrimitiveType, err: &ParseIntError) -> CoerceError {
    let literal = literal.to_owned();
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            CoerceError::OutOfRange { literal, expected }
        }
        _ => CoerceError::InvalidSyntax { literal, expected },
    }
}

/// Converts a number to an integer wide enough to hold any supported integer type.
#[allow(clippy::cast_possible_truncation)] // the float is checked to be integral and bounded
fn integer_from_number(
    number: &serde_json::Number,
    expected: PrimitiveType,
) -> Result<i128, CoerceError> {
    if let Some(value) = number.as_i64() {
        return Ok(value.into());
    }
    if let Some(value) = number.as_u64() {
        return Ok(value.into());
    }

    let literal = number.to_string();
    let value = number.as_f64().unwrap_or(f64::NAN);
    if !value.is_finite() || value.fract() != 0.0 {
        Err(CoerceError::InvalidSyntax { literal, expected })
    } else if value.abs() >= TWO_POW_64 {
        Err(CoerceError::OutOfRange { literal, expected })
    } else {
        Ok(value as i128)
    }
}

macro_rules! impl_signed_primitive {
    ($($ty:ident => $kind:ident,)+) => {
        $(
        impl Primitive for $ty {
            const TYPE: PrimitiveType = PrimitiveType::$kind;

            fn from_literal(literal: &str) -> Result<Self, CoerceError> {
                literal
                    .parse()
                    .map_err(|err| int_error(literal, Self::TYPE, &err))
            }

            fn from_value(value: &Value) -> Result<Self, CoerceError> {
                let Value::Number(number) = value else {
                    return Self::from_literal(&scalar_text(value, Self::TYPE)?);
                };
                let wide = integer_from_number(number, Self::TYPE)?;
                Self::try_from(wide).map_err(|_| CoerceError::OutOfRange {
                    literal: number.to_string(),
                    expected: Self::TYPE,
                })
            }
        }
        )+
    };
}

impl_signed_primitive!(i8 => I8, i16 => I16, i32 => I32, i64 => I64,);

/// Splits off a radix prefix from an unsigned literal: `0x`, `0o`, `0b`, or a leading `0`
/// for octal.
fn split_radix(literal: &str) -> (&str, u32) {
    const PREFIXES: [(&str, u32); 3] = [("0x", 16), ("0o", 8), ("0b", 2)];

    for (prefix, radix) in PREFIXES {
        if let Some(digits) = literal
            .strip_prefix(prefix)
            .or_else(|| literal.strip_prefix(&prefix.to_ascii_uppercase()))
        {
            return (digits, radix);
        }
    }
    match literal.strip_prefix('0') {
        Some(digits) if !digits.is_empty() => (digits, 8),
        _ => (literal, 10),
    }
}

/// Removes `_` digit separators. A separator must be followed by a digit, and preceded by a digit
/// or a radix prefix.
fn remove_separators(digits: &str, has_prefix: bool) -> Option<Cow<'_, str>> {
    if !digits.contains('_') {
        return Some(Cow::Borrowed(digits));
    }
    let misplaced = digits.ends_with('_')
        || digits.contains("__")
        || (!has_prefix && digits.starts_with('_'));
    (!misplaced).then(|| Cow::Owned(digits.replace('_', "")))
}

macro_rules! impl_unsigned_primitive {
    ($($ty:ident => $kind:ident,)+) => {
        $(
        impl Primitive for $ty {
            const TYPE: PrimitiveType = PrimitiveType::$kind;

            fn from_literal(literal: &str) -> Result<Self, CoerceError> {
                let (digits, radix) = split_radix(literal);
                let digits = remove_separators(digits, radix != 10).ok_or_else(|| {
                    CoerceError::InvalidSyntax {
                        literal: literal.to_owned(),
                        expected: Self::TYPE,
                    }
                })?;
                Self::from_str_radix(&digits, radix)
                    .map_err(|err| int_error(literal, Self::TYPE, &err))
            }

            fn from_value(value: &Value) -> Result<Self, CoerceError> {
                let Value::Number(number) = value else {
                    return Self::from_literal(&scalar_text(value, Self::TYPE)?);
                };
                let wide = integer_from_number(number, Self::TYPE)?;
                if wide < 0 {
                    return Err(CoerceError::InvalidSyntax {
                        literal: number.to_string(),
                        expected: Self::TYPE,
                    });
                }
                Self::try_from(wide).map_err(|_| CoerceError::OutOfRange {
                    literal: number.to_string(),
                    expected: Self::TYPE,
                })
            }
        }
        )+
    };
}

impl_unsigned_primitive!(u8 => U8, u16 => U16, u32 => U32, u64 => U64,);

fn is_infinity_literal(literal: &str) -> bool {
    let unsigned = literal.strip_prefix(['+', '-']).unwrap_or(literal);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

macro_rules! impl_float_primitive {
    ($($ty:ident => $kind:ident,)+) => {
        $(
        impl Primitive for $ty {
            const TYPE: PrimitiveType = PrimitiveType::$kind;

            fn from_literal(literal: &str) -> Result<Self, CoerceError> {
                let value: Self = literal.parse().map_err(|_| CoerceError::InvalidSyntax {
                    literal: literal.to_owned(),
                    expected: Self::TYPE,
                })?;
                if value.is_infinite() && !is_infinity_literal(literal) {
                    return Err(CoerceError::OutOfRange {
                        literal: literal.to_owned(),
                        expected: Self::TYPE,
                    });
                }
                Ok(value)
            }
        }
        )+
    };
}

impl_float_primitive!(f32 => F32, f64 => F64,);

impl Primitive for bool {
    const TYPE: PrimitiveType = PrimitiveType::Bool;

    fn from_literal(literal: &str) -> Result<Self, CoerceError> {
        const TRUE_LITERALS: [&str; 3] = ["true", "yes", "on"];
        const FALSE_LITERALS: [&str; 3] = ["false", "no", "off"];

        if TRUE_LITERALS.iter().any(|s| literal.eq_ignore_ascii_case(s)) {
            Ok(true)
        } else if FALSE_LITERALS.iter().any(|s| literal.eq_ignore_ascii_case(s)) {
            Ok(false)
        } else {
            Err(CoerceError::InvalidBool {
                literal: literal.to_owned(),
            })
        }
    }

    fn from_value(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Bool(flag) => Ok(*flag),
            _ => Self::from_literal(&scalar_text(value, Self::TYPE)?),
        }
    }
}

impl Primitive for String {
    const TYPE: PrimitiveType = PrimitiveType::String;

    fn from_literal(literal: &str) -> Result<Self, CoerceError> {
        Ok(literal.to_owned())
    }
}

/// Loads a primitive field. The default literal is validated even if it's not used.
fn deserialize_primitive<T: Primitive>(
    slot: &mut T,
    ctx: &FieldContext<'_>,
) -> Result<(), LoadError> {
    let default = ctx
        .default_literal()
        .map(T::from_literal)
        .transpose()
        .map_err(|err| ctx.default_error(err))?;

    *slot = if let Some(value) = ctx.value() {
        T::from_value(&value.inner).map_err(|err| ctx.error(ErrorKind::InvalidValue(err)))?
    } else if let Some(default) = default {
        tracing::trace!(path = ctx.path(), "using default value");
        default
    } else {
        return Err(ctx.error(ErrorKind::MissingValue));
    };
    Ok(())
}

macro_rules! impl_deserialize_primitive {
    ($($ty:ty,)+) => {
        $(
        impl DeserializeField for $ty {
            const SHAPE: FieldShape = FieldShape::Primitive(<$ty as Primitive>::TYPE);

            fn deserialize_field(&mut self, ctx: FieldContext<'_>) -> Result<(), LoadError> {
                deserialize_primitive(self, &ctx)
            }
        }
        )+
    };
}

impl_deserialize_primitive!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64,);

impl DeserializeField for String {
    const SHAPE: FieldShape = FieldShape::Primitive(PrimitiveType::String);

    fn deserialize_field(&mut self, ctx: FieldContext<'_>) -> Result<(), LoadError> {
        let default = ctx.default_literal();
        if default.is_none() && ctx.value().is_none() {
            return Err(ctx.error(ErrorKind::MissingValue));
        }
        *self = ctx
            .tree()
            .get_string(ctx.path(), default.unwrap_or_default())
            .map_err(|err| ctx.error(ErrorKind::InvalidValue(err)))?;
        Ok(())
    }
}

impl<T: Primitive> DeserializeField for Vec<T> {
    const SHAPE: FieldShape = FieldShape::Array(T::TYPE);

    fn deserialize_field(&mut self, ctx: FieldContext<'_>) -> Result<(), LoadError> {
        if ctx.default_literal().is_some() {
            return Err(ctx.error(ErrorKind::DefaultNotSupported));
        }
        if ctx.value().is_none() {
            return Err(ctx.error(ErrorKind::MissingValue));
        }

        let items = ctx
            .tree()
            .get_string_list(ctx.path())
            .map_err(|err| ctx.error(ErrorKind::InvalidValue(err)))?;
        *self = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                T::from_literal(item).map_err(|err| {
                    ctx.error(ErrorKind::InvalidValue(err))
                        .with_path(Pointer(ctx.path()).join(&i.to_string()))
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(())
    }
}

/// Error kind for a field type that cannot be loaded.
pub(crate) fn unsupported_kind(rust_type: &'static str) -> ErrorKind {
    match rust_type {
        "isize" => ErrorKind::PlatformInteger {
            rust_type,
            suggestion: "i32 or i64",
        },
        "usize" => ErrorKind::PlatformInteger {
            rust_type,
            suggestion: "u32 or u64",
        },
        _ => ErrorKind::UnsupportedType(rust_type),
    }
}

macro_rules! impl_unsupported {
    ($($ty:ident,)+) => {
        $(
        impl DeserializeField for $ty {
            const SHAPE: FieldShape = FieldShape::Unsupported(stringify!($ty));

            fn deserialize_field(&mut self, ctx: FieldContext<'_>) -> Result<(), LoadError> {
                Err(ctx.error(unsupported_kind(stringify!($ty))))
            }
        }
        )+
    };
}

impl_unsupported!(isize, usize,);

impl<K, V, S> DeserializeField for HashMap<K, V, S> {
    const SHAPE: FieldShape = FieldShape::Unsupported("map");

    fn deserialize_field(&mut self, ctx: FieldContext<'_>) -> Result<(), LoadError> {
        Err(ctx.error(unsupported_kind("map")))
    }
}

impl<K, V> DeserializeField for BTreeMap<K, V> {
    const SHAPE: FieldShape = FieldShape::Unsupported("map");

    fn deserialize_field(&mut self, ctx: FieldContext<'_>) -> Result<(), LoadError> {
        Err(ctx.error(unsupported_kind("map")))
    }
}

/// Dispatches on a [`PrimitiveType`], binding `$t` to the corresponding Rust type.
macro_rules! with_primitive {
    ($ty:expr, $t:ident => $body:expr) => {
        match $ty {
            PrimitiveType::Bool => { type $t = bool; $body }
            PrimitiveType::I8 => { type $t = i8; $body }
            PrimitiveType::I16 => { type $t = i16; $body }
            PrimitiveType::I32 => { type $t = i32; $body }
            PrimitiveType::I64 => { type $t = i64; $body }
            PrimitiveType::U8 => { type $t = u8; $body }
            PrimitiveType::U16 => { type $t = u16; $body }
            PrimitiveType::U32 => { type $t = u32; $body }
            PrimitiveType::U64 => { type $t = u64; $body }
            PrimitiveType::F32 => { type $t = f32; $body }
            PrimitiveType::F64 => { type $t = f64; $body }
            PrimitiveType::String => { type $t = String; $body }
        }
    };
}

/// Checks that a literal can be coerced to the specified type.
pub(crate) fn check_literal(ty: PrimitiveType, literal: &str) -> Result<(), CoerceError> {
    with_primitive!(ty, T => T::from_literal(literal).map(drop))
}

/// Checks that a tree value can be coerced to the specified type.
pub(crate) fn check_value(ty: PrimitiveType, value: &Value) -> Result<(), CoerceError> {
    with_primitive!(ty, T => T::from_value(value).map(drop))
}

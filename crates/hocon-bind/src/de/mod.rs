//! Configuration deserialization logic.
//!
//! # How it works
//!
//! [`DeserializeConfig`](crate::DeserializeConfig) derive macro visits all config fields in declaration order,
//! invoking [`DeserializeContext::deserialize_field()`] for each of them. The context parses the field tag,
//! resolves the absolute path of the field and passes control to the [`DeserializeField`] implementation
//! of the field type:
//!
//! - For nested configs, the implementation (also generated by the derive macro) recurses with
//!   the resolved path as the new prefix.
//! - For [primitive types](Primitive), the implementation looks up the value in the [`ConfigTree`],
//!   coerces it to the field type and writes it to the field, falling back to the tag default if
//!   the value is absent.
//!
//! Unlike with `serde`, loading stops on the first error. The receiver is mutated in place, so fields
//! visited before the failing one keep their loaded values.

pub(crate) use self::primitive::{check_literal, check_value, unsupported_kind};
pub use self::primitive::Primitive;
use crate::{
    error::{CoerceError, ErrorKind, LoadError},
    metadata::{ConfigMetadata, FieldMetadata, FieldShape},
    source::ConfigTree,
    tag::{Directives, TagPolicy},
    value::{Pointer, WithOrigin},
};

mod primitive;

/// Options controlling config loading.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// How unrecognized keys in field tags are treated.
    pub tag_policy: TagPolicy,
}

/// Context for deserializing a configuration record.
#[derive(Debug)]
pub struct DeserializeContext<'a> {
    options: &'a LoadOptions,
    tree: &'a ConfigTree,
    path: String,
    config: &'static ConfigMetadata,
}

impl<'a> DeserializeContext<'a> {
    pub(crate) fn new(
        options: &'a LoadOptions,
        tree: &'a ConfigTree,
        path: String,
        config: &'static ConfigMetadata,
    ) -> Self {
        Self {
            options,
            tree,
            path,
            config,
        }
    }

    /// Returns the absolute path of the record. The root record has an empty path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns metadata of the record being deserialized.
    pub fn config(&self) -> &'static ConfigMetadata {
        self.config
    }

    /// Deserializes the field with the specified index into `slot`.
    #[doc(hidden)] // called from the derive macro
    pub fn deserialize_field<T: DeserializeField>(
        &self,
        index: usize,
        slot: &mut T,
    ) -> Result<(), LoadError> {
        let field = self.config.fields.get(index).unwrap_or_else(|| {
            panic!("Internal error: called `deserialize_field()` with missing field index {index}")
        });
        let directives = Directives::parse(field.tag, self.options.tag_policy).map_err(|err| {
            LoadError::from(ErrorKind::Tag(err))
                .for_field(field)
                .with_path(Pointer(&self.path).join(field.rust_field_name))
        })?;
        let path = directives.resolve_path(Pointer(&self.path), field.rust_field_name);
        tracing::trace!(
            config = self.config.ty.name_in_code(),
            field = field.rust_field_name,
            path = %path,
            "resolved field path"
        );

        slot.deserialize_field(FieldContext {
            options: self.options,
            tree: self.tree,
            field,
            directives,
            path,
        })
    }
}

/// Context for deserializing a single field.
#[derive(Debug)]
pub struct FieldContext<'a> {
    options: &'a LoadOptions,
    tree: &'a ConfigTree,
    field: &'static FieldMetadata,
    directives: Directives<'static>,
    path: String,
}

impl<'a> FieldContext<'a> {
    /// Returns the resolved absolute path of the field.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns field metadata.
    pub fn field(&self) -> &'static FieldMetadata {
        self.field
    }

    /// Returns directives parsed from the field tag.
    pub fn directives(&self) -> &Directives<'static> {
        &self.directives
    }

    /// Returns the raw default literal from the field tag, if any.
    pub fn default_literal(&self) -> Option<&'static str> {
        self.directives.default
    }

    /// Returns the configuration tree.
    pub fn tree(&self) -> &'a ConfigTree {
        self.tree
    }

    /// Returns the value at the field path. `null` values are treated as absent.
    pub fn value(&self) -> Option<&'a WithOrigin> {
        self.tree.get_value(&self.path)
    }

    /// Creates an error for this field, attaching the path and the value origin (if there is a value).
    #[cold]
    pub fn error(&self, kind: ErrorKind) -> LoadError {
        let err = LoadError::from(kind)
            .for_field(self.field)
            .with_path(self.path.clone());
        match self.value() {
            Some(value) => err.with_origin(&value.origin),
            None => err,
        }
    }

    /// Creates an error for an invalid default literal in the field tag.
    #[cold]
    pub fn default_error(&self, err: CoerceError) -> LoadError {
        LoadError::from(ErrorKind::InvalidDefault(err))
            .for_field(self.field)
            .with_path(self.path.clone())
    }

    /// Converts this context into one for a nested record located at the field path.
    pub fn nested(self, config: &'static ConfigMetadata) -> DeserializeContext<'a> {
        DeserializeContext::new(self.options, self.tree, self.path, config)
    }
}

/// Deserialization of a single config field. Implemented for [primitive types](Primitive), `Vec`s
/// of primitive types and, via the derive macro, for nested configs.
pub trait DeserializeField {
    /// Shape of the field used in metadata.
    const SHAPE: FieldShape;

    /// Deserializes the field value in place.
    ///
    /// # Errors
    ///
    /// Should return an error if the value (or default) is missing or cannot be coerced.
    fn deserialize_field(&mut self, ctx: FieldContext<'_>) -> Result<(), LoadError>;
}

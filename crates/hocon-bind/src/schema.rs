//! Flattened configuration schema.

use std::collections::HashMap;

use crate::{
    de::{LoadOptions, check_literal, check_value, unsupported_kind},
    error::{ErrorKind, LoadError},
    metadata::{ConfigMetadata, FieldMetadata, FieldShape},
    source::ConfigTree,
    tag::Directives,
    value::Pointer,
};

/// Reference to a leaf field inside [`ConfigSchema`].
#[derive(Debug, Clone)]
pub struct ParamRef {
    path: String,
    field: &'static FieldMetadata,
    config: &'static ConfigMetadata,
    directives: Directives<'static>,
}

impl ParamRef {
    /// Returns the absolute path of the field.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns field metadata.
    pub fn field(&self) -> &'static FieldMetadata {
        self.field
    }

    /// Returns metadata of the record containing the field.
    pub fn config(&self) -> &'static ConfigMetadata {
        self.config
    }

    /// Returns directives parsed from the field tag.
    pub fn directives(&self) -> &Directives<'static> {
        &self.directives
    }

    /// Checks that the value of this field in `tree` can be loaded, without loading it into a config.
    /// Uses the same rules as loading.
    ///
    /// # Errors
    ///
    /// Returns the error that loading the field from `tree` would produce.
    pub fn validate(&self, tree: &ConfigTree) -> Result<(), LoadError> {
        let value = tree.get_value(&self.path);
        let err = |kind: ErrorKind| {
            let err = LoadError::from(kind)
                .for_field(self.field)
                .with_path(self.path.clone());
            match value {
                Some(value) => err.with_origin(&value.origin),
                None => err,
            }
        };

        match self.field.shape {
            FieldShape::Primitive(ty) => match value {
                Some(value) => {
                    check_value(ty, &value.inner).map_err(|e| err(ErrorKind::InvalidValue(e)))
                }
                None if self.directives.default.is_some() => Ok(()),
                None => Err(err(ErrorKind::MissingValue)),
            },
            FieldShape::Array(ty) => {
                if value.is_none() {
                    return Err(err(ErrorKind::MissingValue));
                }
                let items = tree
                    .get_string_list(&self.path)
                    .map_err(|e| err(ErrorKind::InvalidValue(e)))?;
                for (i, item) in items.iter().enumerate() {
                    check_literal(ty, item).map_err(|e| {
                        err(ErrorKind::InvalidValue(e))
                            .with_path(Pointer(&self.path).join(&i.to_string()))
                    })?;
                }
                Ok(())
            }
            FieldShape::Unsupported(ty) => Err(err(unsupported_kind(ty))),
            // Nested configs are flattened when building the schema.
            FieldShape::Nested(_) => Ok(()),
        }
    }
}

/// Schema of a configuration record: all leaf fields of the record and its nested records
/// together with their resolved paths.
///
/// Building a schema validates all tags and default literals, so it can be used to check a config type
/// without any configuration input.
///
/// # Examples
///
/// ```
/// use hocon_bind::{ConfigSchema, DescribeConfig, DeserializeConfig};
///
/// #[derive(DescribeConfig, DeserializeConfig)]
/// struct AppConfig {
///     #[hocon("node=http")]
///     server: ServerConfig,
///     #[hocon("default=false")]
///     debug: bool,
/// }
///
/// #[derive(DescribeConfig, DeserializeConfig)]
/// struct ServerConfig {
///     #[hocon("default=8080")]
///     port: u16,
///     #[hocon("path=app.host")]
///     host: String,
/// }
///
/// let schema = ConfigSchema::new(&AppConfig::DESCRIPTION)?;
/// let paths: Vec<_> = schema.params().iter().map(|param| param.path()).collect();
/// assert_eq!(paths, ["http.port", "app.host", "debug"]);
/// let port = schema.param("http.port").unwrap();
/// assert_eq!(port.directives().default, Some("8080"));
/// # anyhow::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSchema {
    metadata: &'static ConfigMetadata,
    params: Vec<ParamRef>,
    params_by_path: HashMap<String, usize>,
}

impl ConfigSchema {
    /// Builds the schema for a record with default [`LoadOptions`].
    ///
    /// # Errors
    ///
    /// Returns an error if any field tag is malformed or contains an invalid default.
    pub fn new(metadata: &'static ConfigMetadata) -> Result<Self, LoadError> {
        Self::with_options(metadata, &LoadOptions::default())
    }

    /// Builds the schema for a record with the specified options.
    ///
    /// # Errors
    ///
    /// Returns an error if any field tag is malformed or contains an invalid default.
    pub fn with_options(
        metadata: &'static ConfigMetadata,
        options: &LoadOptions,
    ) -> Result<Self, LoadError> {
        let mut this = Self {
            metadata,
            params: vec![],
            params_by_path: HashMap::new(),
        };
        this.collect_params(metadata, Pointer(""), options)?;
        tracing::debug!(
            config = metadata.ty.name_in_code(),
            params = this.params.len(),
            "built config schema"
        );
        Ok(this)
    }

    fn collect_params(
        &mut self,
        config: &'static ConfigMetadata,
        prefix: Pointer<'_>,
        options: &LoadOptions,
    ) -> Result<(), LoadError> {
        for field in config.fields {
            let directives = Directives::parse(field.tag, options.tag_policy).map_err(|err| {
                LoadError::from(ErrorKind::Tag(err))
                    .for_field(field)
                    .with_path(prefix.join(field.rust_field_name))
            })?;
            let path = directives.resolve_path(prefix, field.rust_field_name);
            let field_err = |kind: ErrorKind| {
                LoadError::from(kind)
                    .for_field(field)
                    .with_path(path.clone())
            };

            match (field.shape, directives.default) {
                (FieldShape::Nested(nested), _) => {
                    self.collect_params(nested, Pointer(&path), options)?;
                    continue;
                }
                (FieldShape::Primitive(ty), Some(default)) => {
                    check_literal(ty, default)
                        .map_err(|err| field_err(ErrorKind::InvalidDefault(err)))?;
                }
                (FieldShape::Array(_), Some(_)) => {
                    return Err(field_err(ErrorKind::DefaultNotSupported));
                }
                _ => { /* nothing to check */ }
            }

            // The first field wins if several fields are mapped to the same path.
            self.params_by_path
                .entry(path.clone())
                .or_insert(self.params.len());
            self.params.push(ParamRef {
                path,
                field,
                config,
                directives,
            });
        }
        Ok(())
    }

    /// Returns metadata of the root record.
    pub fn metadata(&self) -> &'static ConfigMetadata {
        self.metadata
    }

    /// Returns all leaf fields in the order they are visited during loading.
    pub fn params(&self) -> &[ParamRef] {
        &self.params
    }

    /// Gets a leaf field by its absolute path.
    pub fn param(&self, path: &str) -> Option<&ParamRef> {
        let &index = self.params_by_path.get(path)?;
        self.params.get(index)
    }
}

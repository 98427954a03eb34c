//! Configuration sources and loading.

use std::{fs, io, path::Path};

pub use self::tree::ConfigTree;
use crate::{
    DeserializeConfig, LoadError,
    de::{DeserializeContext, LoadOptions},
    tag::TagPolicy,
};

mod tree;

/// Checks that the file exists, is readable by its owner and is not a directory.
fn check_file_accessibility(path: &Path) -> io::Result<()> {
    let metadata = fs::metadata(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;

        if metadata.permissions().mode() & 0o400 == 0 {
            let message = format!("{} permission denied", path.display());
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, message));
        }
    }
    if metadata.is_dir() {
        let message = format!("{} is a directory", path.display());
        return Err(io::Error::new(io::ErrorKind::IsADirectory, message));
    }
    Ok(())
}

/// Loader of configurations from HOCON input.
///
/// # Examples
///
/// ```
/// use hocon_bind::{ConfigLoader, DescribeConfig, DeserializeConfig};
///
/// #[derive(Debug, Default, DescribeConfig, DeserializeConfig)]
/// struct TestConfig {
///     #[hocon("node=port,extra=ignored")]
///     port: u16,
/// }
///
/// let mut config = TestConfig::default();
/// // Strict loaders reject unknown tag keys.
/// let err = ConfigLoader::new()
///     .strict_tags(true)
///     .load_text("{ port: 8080 }", &mut config)
///     .unwrap_err();
/// assert!(err.to_string().starts_with("unknown tag key"), "{err}");
///
/// ConfigLoader::new().load_text("{ port: 8080 }", &mut config)?;
/// assert_eq!(config.port, 8_080);
/// # anyhow::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    options: LoadOptions,
}

impl ConfigLoader {
    /// Creates a loader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader with the specified options.
    pub fn with_options(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Sets whether unknown keys in field tags are treated as errors.
    #[must_use]
    pub fn strict_tags(mut self, strict: bool) -> Self {
        self.options.tag_policy = if strict {
            TagPolicy::Strict
        } else {
            TagPolicy::Lenient
        };
        self
    }

    /// Returns options used by this loader.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Loads the `receiver` config from an already parsed tree. Fields are overwritten in place;
    /// on error, the fields loaded before the failing one retain their new values.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered while walking the config fields.
    pub fn load<C: DeserializeConfig>(
        &self,
        tree: &ConfigTree,
        receiver: &mut C,
    ) -> Result<(), LoadError> {
        let config = &C::DESCRIPTION;
        tracing::debug!(config = config.ty.name_in_code(), "loading config");
        let ctx = DeserializeContext::new(&self.options, tree, String::new(), config);
        receiver.deserialize_config(&ctx)?;
        tracing::debug!(config = config.ty.name_in_code(), "loaded config");
        Ok(())
    }

    /// Parses HOCON text and loads the `receiver` config from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid HOCON, or if loading fails.
    pub fn load_text<C: DeserializeConfig>(
        &self,
        text: &str,
        receiver: &mut C,
    ) -> Result<(), LoadError> {
        let tree = ConfigTree::parse_str(text)?;
        self.load(&tree, receiver)
    }

    /// Reads a HOCON file and loads the `receiver` config from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid HOCON, or if loading fails.
    pub fn load_file<C: DeserializeConfig>(
        &self,
        path: impl AsRef<Path>,
        receiver: &mut C,
    ) -> Result<(), LoadError> {
        let tree = ConfigTree::from_file(path)?;
        self.load(&tree, receiver)
    }
}

/// Loads the `receiver` config from a HOCON file using default [`LoadOptions`].
///
/// # Errors
///
/// See [`ConfigLoader::load_file()`].
pub fn load_config_file<C: DeserializeConfig>(
    path: impl AsRef<Path>,
    receiver: &mut C,
) -> Result<(), LoadError> {
    ConfigLoader::new().load_file(path, receiver)
}

/// Loads the `receiver` config from HOCON text using default [`LoadOptions`].
///
/// # Errors
///
/// See [`ConfigLoader::load_text()`].
pub fn load_config_text<C: DeserializeConfig>(
    text: &str,
    receiver: &mut C,
) -> Result<(), LoadError> {
    ConfigLoader::new().load_text(text, receiver)
}

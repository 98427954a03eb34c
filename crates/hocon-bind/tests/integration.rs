//! Integration tests for `hocon-bind`.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use assert_matches::assert_matches;
use hocon_bind::{
    ConfigLoader, ConfigSchema, DescribeConfig, DeserializeConfig, ErrorKind, load_config_file,
    value::ValueOrigin,
};

#[test]
fn ui() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/derives/*.rs");
}

fn data_file(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[derive(Debug, Default, DescribeConfig, DeserializeConfig)]
struct Container {
    key9: i32,
    #[hocon("default=unnamed")]
    name: String,
}

#[derive(Debug, Default, DescribeConfig, DeserializeConfig)]
struct FileConfig {
    #[hocon("node=container1")]
    inner: Container,
}

#[derive(Debug, Default, DescribeConfig, DeserializeConfig)]
struct SecondContainer {
    retries: u8,
    hosts: Vec<String>,
    enabled: bool,
    #[hocon("path=container1.key9")]
    shared_key: i64,
}

#[test]
fn loading_config_file() {
    let mut config = FileConfig::default();
    load_config_file(data_file("conf1.conf"), &mut config).unwrap();
    assert_eq!(config.inner.key9, -999);
    assert_eq!(config.inner.name, "first container");
}

#[test]
fn loading_config_file_with_substitutions() {
    #[derive(Debug, Default, DescribeConfig, DeserializeConfig)]
    struct Config {
        #[hocon("node=container2")]
        second: SecondContainer,
    }

    let mut config = Config::default();
    ConfigLoader::new()
        .load_file(data_file("conf1.conf"), &mut config)
        .unwrap();
    assert_eq!(config.second.retries, 3);
    assert_eq!(config.second.hosts, ["alpha", "beta.example.com"]);
    assert!(config.second.enabled);
    assert_eq!(config.second.shared_key, -999);
}

#[test]
fn errors_reference_config_file() {
    #[derive(Debug, Default, DescribeConfig, DeserializeConfig)]
    struct Config {
        #[hocon("node=container1")]
        inner: NarrowContainer,
    }

    #[derive(Debug, Default, DescribeConfig, DeserializeConfig)]
    struct NarrowContainer {
        key9: u16,
    }

    let path = data_file("conf1.conf");
    let mut config = Config::default();
    let err = load_config_file(&path, &mut config).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::InvalidValue(_));
    assert_eq!(err.path(), Some("container1.key9"));
    assert_matches!(
        err.origin(),
        Some(ValueOrigin::Path { source, path: value_path })
            if value_path == "container1.key9"
                && matches!(source.as_ref(), ValueOrigin::File { name } if name.ends_with("conf1.conf"))
    );
    let message = err.to_string();
    assert!(message.contains("conf1.conf"), "{message}");
    assert!(message.ends_with("invalid syntax"), "{message}");
}

#[test]
fn loading_nonexistent_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = FileConfig::default();
    let err = load_config_file(dir.path().join("missing.conf"), &mut config).unwrap_err();
    assert_matches!(
        err.kind(),
        ErrorKind::FileAccess { source, .. } if source.kind() == io::ErrorKind::NotFound
    );
    assert!(
        err.to_string().starts_with("cannot read configuration file"),
        "{err}"
    );
}

#[test]
fn loading_directory_as_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = FileConfig::default();
    let err = load_config_file(dir.path(), &mut config).unwrap_err();
    assert_matches!(
        err.kind(),
        ErrorKind::FileAccess { source, .. } if source.kind() == io::ErrorKind::IsADirectory
    );
    assert!(err.to_string().ends_with("is a directory"), "{err}");
}

#[cfg(unix)]
#[test]
fn loading_file_without_read_permission() {
    use std::os::unix::fs::PermissionsExt as _;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("denied.conf");
    fs::write(&path, "container1 { key9: 1 }").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0)).unwrap();

    let mut config = FileConfig::default();
    let err = load_config_file(&path, &mut config).unwrap_err();
    assert_matches!(
        err.kind(),
        ErrorKind::FileAccess { source, .. } if source.kind() == io::ErrorKind::PermissionDenied
    );
    assert!(err.to_string().ends_with("permission denied"), "{err}");
}

#[test]
fn loading_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.conf");
    fs::write(&path, "container1 { key9: [1, 2 ").unwrap();

    let mut config = FileConfig::default();
    let err = load_config_file(&path, &mut config).unwrap_err();
    assert_matches!(err.kind(), ErrorKind::Syntax(_));
    assert_matches!(err.origin(), Some(ValueOrigin::File { .. }));
}

#[test]
fn schema_for_file_config() {
    let schema = ConfigSchema::new(&FileConfig::DESCRIPTION).unwrap();
    let paths: Vec<_> = schema.params().iter().map(|param| param.path()).collect();
    assert_eq!(paths, ["container1.key9", "container1.name"]);
    let name = schema.param("container1.name").unwrap();
    assert_eq!(name.directives().default, Some("unnamed"));
}

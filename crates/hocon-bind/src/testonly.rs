//! Test-only functionality shared among multiple test modules.

use crate::{DescribeConfig, DeserializeConfig};

#[derive(Debug, Default, PartialEq, DescribeConfig, DeserializeConfig)]
#[hocon(crate = crate)]
pub(crate) struct FlatConfig {
    pub field1: String,
    pub field2: String,
}

#[derive(Debug, Default, PartialEq, DescribeConfig, DeserializeConfig)]
#[hocon(crate = crate)]
pub(crate) struct InnerConfig {
    #[hocon("node=f1")]
    pub field: String,
}

#[derive(Debug, Default, PartialEq, DescribeConfig, DeserializeConfig)]
#[hocon(crate = crate)]
pub(crate) struct MiddleConfig {
    #[hocon("node=i2")]
    pub inner: InnerConfig,
    /// `path` overrides both the prefix and `node`.
    #[hocon("node=n1,path=i1.f1")]
    pub field: String,
}

/// Config with all kinds of path overrides.
#[derive(Debug, Default, PartialEq, DescribeConfig, DeserializeConfig)]
#[hocon(crate = crate)]
pub(crate) struct OuterConfig {
    #[hocon("node=i1")]
    pub middle: MiddleConfig,
    #[hocon("path=x.y")]
    pub absolute: u32,
    pub top: bool,
}

/// Server settings.
#[derive(Debug, Default, PartialEq, DescribeConfig, DeserializeConfig)]
#[hocon(crate = crate)]
pub(crate) struct ServerConfig {
    /// Port to bind to.
    #[hocon("default=8080")]
    pub port: u16,
    /// Hosts to accept connections from.
    pub hosts: Vec<String>,
    #[hocon("node=timeout,default=1.5")]
    pub timeout_sec: f64,
}

/// Application config.
#[derive(Debug, Default, PartialEq, DescribeConfig, DeserializeConfig)]
#[hocon(crate = crate)]
pub(crate) struct AppConfig {
    pub server: ServerConfig,
    #[hocon("node=log-level,default=info,alias=level")]
    pub log_level: String,
    #[hocon("default=false")]
    pub debug: bool,
}

#[derive(Debug, Default, PartialEq, DescribeConfig, DeserializeConfig)]
#[hocon(crate = crate)]
pub(crate) struct EmptyConfig {}

#[derive(Debug, Default, PartialEq, DescribeConfig, DeserializeConfig)]
#[hocon(crate = crate)]
pub(crate) struct WithBadNestedTag {
    #[hocon("node=n1 path=a.b.c")]
    pub nested: EmptyConfig,
}

#[derive(Debug, Default, PartialEq, DescribeConfig, DeserializeConfig)]
#[hocon(crate = crate)]
pub(crate) struct BadDefaultConfig {
    #[hocon("default=300")]
    pub small: u8,
}

use hocon_bind::{DescribeConfig, DeserializeConfig};

#[derive(Default, DescribeConfig, DeserializeConfig)]
struct NestedConfig {
    port: u16,
}

#[derive(DescribeConfig)]
struct TestConfig {
    nested: Vec<NestedConfig>,
}

fn main() {}

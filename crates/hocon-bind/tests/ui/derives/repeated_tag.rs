use hocon_bind::DescribeConfig;

#[derive(DescribeConfig)]
struct TestConfig {
    #[hocon("default=1")]
    #[hocon("path=a.b")]
    value: u32,
}

fn main() {}

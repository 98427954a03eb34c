use hocon_bind::DescribeConfig;

#[derive(DescribeConfig)]
struct TestConfig(u64);

fn main() {}

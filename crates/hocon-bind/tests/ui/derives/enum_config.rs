use hocon_bind::DescribeConfig;

#[derive(DescribeConfig)]
enum TestConfig { First, Second }

fn main() {}

use hocon_bind::DeserializeConfig;

#[derive(Default, DeserializeConfig)]
struct TestConfig<T> { value: T }

fn main() {}

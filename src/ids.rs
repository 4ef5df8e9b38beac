use rand::Rng;

/// Generates a fresh record id such as `asg-3f09c2a17b4e`
pub fn new_id(prefix: &str) -> String {
    let value: u64 = rand::thread_rng().gen_range(0..1u64 << 48);
    format!("{}-{:012x}", prefix, value)
}

//! Configuration access port trait.

/// Section/key lookup over a configuration source. Values come back raw;
/// parsing and validation happen in `domain::config_validation`.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}

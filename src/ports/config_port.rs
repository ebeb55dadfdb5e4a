//! Configuration access port trait.

pub trait ConfigPort {
    /// Trimmed value, `None` when the key is missing.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// `Ok(None)` when missing or blank, `Err` when present but not an integer.
    fn get_int_checked(&self, section: &str, key: &str) -> Result<Option<i64>, String>;

    /// `Ok(None)` when missing or blank, `Err` when present but not a number.
    fn get_double_checked(&self, section: &str, key: &str) -> Result<Option<f64>, String>;

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.get_int_checked(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.get_double_checked(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    /// Whether the key carries a non-blank value.
    fn has_key(&self, section: &str, key: &str) -> bool {
        self.get_string(section, key)
            .is_some_and(|v| !v.is_empty())
    }

    /// Optional unsigned value, `None` when missing or unparseable.
    fn get_u64_opt(&self, section: &str, key: &str) -> Option<u64> {
        self.get_string(section, key)
            .and_then(|v| v.parse::<u64>().ok())
    }
}

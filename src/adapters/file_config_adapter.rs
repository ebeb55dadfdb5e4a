//! INI file configuration adapter.

use crate::domain::error::SimError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| SimError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, SimError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| SimError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_value<T>(&self, section: &str, key: &str, kind: &str) -> Result<Option<T>, String>
    where
        T: std::str::FromStr,
    {
        match self.get_string(section, key).filter(|v| !v.is_empty()) {
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|_| format!("expected {kind} for [{section}] {key}, got '{raw}'")),
            None => Ok(None),
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key).map(|v| v.trim().to_string())
    }

    fn get_int_checked(&self, section: &str, key: &str) -> Result<Option<i64>, String> {
        self.parse_value(section, key, "an integer")
    }

    fn get_double_checked(&self, section: &str, key: &str) -> Result<Option<f64>, String> {
        self.parse_value(section, key, "a number")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[simulation]
symbol = PETR4
initial_price = 30.0
seed = 42
distribution = normal

[portfolio]
initial_balance = 10000.0

[indicators]
sma_window = 10
rsi_period = 14
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("simulation", "symbol"),
            Some("PETR4".to_string())
        );
        assert_eq!(adapter.get_double("simulation", "initial_price", 0.0), 30.0);
        assert_eq!(adapter.get_double("portfolio", "initial_balance", 0.0), 10000.0);
        assert_eq!(adapter.get_int("indicators", "rsi_period", 0), 14);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("simulation", "missing"), None);
        assert_eq!(adapter.get_int("indicators", "volatility_window", 20), 20);
        assert_eq!(adapter.get_double("missing", "key", 1.5), 1.5);
        assert_eq!(adapter.get_double_checked("simulation", "missing"), Ok(None));
    }

    #[test]
    fn non_numeric_values_are_reported() {
        let adapter = FileConfigAdapter::from_string(
            "[indicators]\nsma_window = abc\n[portfolio]\ninitial_balance = lots\n",
        )
        .unwrap();
        let err = adapter.get_int_checked("indicators", "sma_window").unwrap_err();
        assert!(err.contains("sma_window") && err.contains("abc"), "{err}");
        assert!(adapter.get_double_checked("portfolio", "initial_balance").is_err());
        assert_eq!(adapter.get_int("indicators", "sma_window", 10), 10);
        assert_eq!(adapter.get_double("portfolio", "initial_balance", 5.0), 5.0);
    }

    #[test]
    fn values_are_trimmed_and_blank_is_missing() {
        let adapter =
            FileConfigAdapter::from_string("[x]\nprice = 12.5 \nblank =\n").unwrap();
        assert_eq!(adapter.get_double_checked("x", "price"), Ok(Some(12.5)));
        assert!(!adapter.has_key("x", "blank"));
        assert_eq!(adapter.get_int_checked("x", "blank"), Ok(None));
    }

    #[test]
    fn provided_helpers() {
        let adapter = FileConfigAdapter::from_string(
            "[simulation]\nseed = 42\nticks = -3\nhistory_limit =\n",
        )
        .unwrap();
        assert_eq!(adapter.get_u64_opt("simulation", "seed"), Some(42));
        assert_eq!(adapter.get_u64_opt("simulation", "missing"), None);
        assert_eq!(adapter.get_u64_opt("simulation", "ticks"), None);
        assert!(adapter.has_key("simulation", "seed"));
        assert!(!adapter.has_key("simulation", "history_limit"));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("simulation", "distribution"),
            Some("normal".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/path/sim.ini").err();
        assert!(matches!(err, Some(SimError::ConfigParse { .. })));
    }
}

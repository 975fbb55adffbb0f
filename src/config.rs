use crate::market::{Segment, Timeframe};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub defaults: DefaultsConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub segment: Segment,
    pub timeframe: Timeframe,
    pub fetch_on_load: bool,
    /// Pins "today" for the mock generator. Local date when unset.
    pub reference_date: Option<NaiveDate>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            segment: Segment::default(),
            timeframe: Timeframe::default(),
            fetch_on_load: true,
            reference_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_secs.min(u32::MAX as u64) as i64)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("marketnews").join("config.toml"))
    }

    /// Load from an explicit path, or from the default location if present.
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.defaults.fetch_on_load);
        assert_eq!(config.cache.ttl_secs, 3600);
        assert_eq!(config.ui.tick_rate_ms, 250);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(
            r#"
            [defaults]
            segment = "Small Cap FNO"
            timeframe = "Last Three Months"
            fetch_on_load = false
            reference_date = "2024-01-15"

            [cache]
            ttl_secs = 60

            [logging]
            level = "debug"
            file = "/tmp/marketnews.log"
            "#,
        )
        .unwrap();

        assert_eq!(config.defaults.segment, Segment::SmallCapFno);
        assert_eq!(config.defaults.timeframe, Timeframe::LastThreeMonths);
        assert!(!config.defaults.fetch_on_load);
        assert_eq!(
            config.defaults.reference_date,
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.cache.ttl(), chrono::Duration::minutes(1));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.file,
            Some(PathBuf::from("/tmp/marketnews.log"))
        );
    }

    #[test]
    fn test_unknown_segment_is_rejected() {
        let result = Config::from_toml_str(
            r#"
            [defaults]
            segment = "Large Cap Equity"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\ntimeframe = \"Last One Week\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.defaults.timeframe, Timeframe::LastOneWeek);
        assert_eq!(config.defaults.segment, Segment::LargeCapFno);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

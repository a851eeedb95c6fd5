//! Runtime configuration, read from the environment once at startup.

use std::path::PathBuf;

pub const MODEL_PATH_VAR: &str = "HEARTGUARD_MODEL_PATH";
pub const REPORT_DIR_VAR: &str = "HEARTGUARD_REPORT_DIR";
pub const LOG_MODE_VAR: &str = "HEARTGUARD_LOG_MODE";
pub const LOG_FILE_VAR: &str = "HEARTGUARD_LOG_FILE";

const DEFAULT_MODEL_PATH: &str = "models";
const DEFAULT_REPORT_DIR: &str = ".";
const DEFAULT_LOG_FILE: &str = "heartguard.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise.
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Whether logs go to the log file, given whether stdout is a terminal.
    ///
    /// Logging to an interactive terminal would corrupt the TUI.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the model artifacts.
    pub model_path: PathBuf,
    /// Directory the report download is written to.
    pub report_dir: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset or empty variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            model_path: get(MODEL_PATH_VAR).map_or(defaults.model_path, PathBuf::from),
            report_dir: get(REPORT_DIR_VAR).map_or(defaults.report_dir, PathBuf::from),
            log_mode: get(LOG_MODE_VAR).map_or(defaults.log_mode, |v| LogMode::parse(&v)),
            log_file: get(LOG_FILE_VAR).map_or(defaults.log_file, PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.model_path, PathBuf::from("models"));
        assert_eq!(config.log_file, PathBuf::from("heartguard.log"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (MODEL_PATH_VAR, "/opt/heartguard/models"),
            (REPORT_DIR_VAR, "/tmp/reports"),
            (LOG_MODE_VAR, "Stdout"),
            (LOG_FILE_VAR, "/var/log/hg.log"),
        ]));
        assert_eq!(config.model_path, PathBuf::from("/opt/heartguard/models"));
        assert_eq!(config.report_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/var/log/hg.log"));
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[(MODEL_PATH_VAR, "  "), (LOG_MODE_VAR, "bogus")]));
        assert_eq!(config.model_path, PathBuf::from("models"));
        assert_eq!(config.log_mode, LogMode::Auto);
    }

    #[test]
    fn test_log_mode_routing() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}

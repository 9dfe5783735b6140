use std::fs;
use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::SettingsError;

pub const DEFAULT_BIND: &str = "127.0.0.1:8787";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings shared by the CLI and the HTTP front, read from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind: String,
    pub output_dir: Option<String>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            output_dir: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

pub fn parse_settings(yaml: &str) -> Result<Settings, SettingsError> {
    if yaml.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_yaml::from_str(yaml)?;
    validate_settings(&settings)?;
    Ok(settings)
}

pub fn load_settings(path: Option<&str>) -> Result<Settings, SettingsError> {
    let path = match path {
        Some(p) => p,
        None => return Ok(Settings::default()),
    };
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_settings(&content)
}

pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.bind.parse::<SocketAddr>().is_err() {
        return Err(SettingsError::Invalid(format!(
            "bind must be host:port, got {}",
            settings.bind
        )));
    }
    match settings.log_level.to_lowercase().as_str() {
        "off" | "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
        other => Err(SettingsError::Invalid(format!("unknown log level: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_settings("").expect("settings"), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = parse_settings("output_dir: out\n").expect("settings");
        assert_eq!(settings.output_dir.as_deref(), Some("out"));
        assert_eq!(settings.bind, DEFAULT_BIND);
        assert_eq!(settings.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn rejects_bad_bind() {
        let err = parse_settings("bind: localhost\n").unwrap_err();
        match err {
            SettingsError::Invalid(msg) => assert!(msg.contains("bind")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_log_level() {
        assert!(parse_settings("log_level: loud\n").is_err());
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_settings(Some("/nonexistent/vlessconv.yaml")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }
}

use thiserror::Error;

/// The only way a translation can fail. Pattern mismatches and percent
/// decoding failures are reported through the same variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("malformed vless link: {0}")]
    MalformedLink(String),
}

impl TranslateError {
    pub fn malformed(message: impl Into<String>) -> Self {
        TranslateError::MalformedLink(message.into())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

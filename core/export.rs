use std::fs;
use std::path::Path;

use log::info;

use crate::error::ExportError;
use crate::outbound::ClientConfig;

pub const DEFAULT_FILE_NAME: &str = "config.json";

/// Pretty JSON with two space indentation and a trailing newline.
pub fn to_pretty_json(config: &ClientConfig) -> Result<String, ExportError> {
    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');
    Ok(json)
}

pub fn suggested_file_name(label: &str) -> String {
    let cleaned: String = label
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        format!("{}.json", cleaned)
    }
}

pub fn write_config(path: &Path, config: &ClientConfig) -> Result<(), ExportError> {
    let json = to_pretty_json(config)?;
    fs::write(path, json).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!("config written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::convert;

    #[test]
    fn pretty_json_uses_two_spaces() {
        let conversion = convert(
            "vless://b831381d-6324-4d53-ad4f-8cda48b30811@example.com:443?type=tcp#A",
        )
        .expect("convert");
        let json = to_pretty_json(&conversion.config).expect("json");
        assert!(json.starts_with("{\n  \"inbounds\": []"));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn file_name_from_label() {
        assert_eq!(suggested_file_name("WS Node"), "WS Node.json");
        assert_eq!(suggested_file_name("a/b:c"), "a_b_c.json");
        assert_eq!(suggested_file_name(""), "config.json");
        assert_eq!(suggested_file_name(".."), "config.json");
    }

    #[test]
    fn write_to_missing_dir_fails() {
        let conversion = convert(
            "vless://b831381d-6324-4d53-ad4f-8cda48b30811@example.com:443?type=tcp",
        )
        .expect("convert");
        let mut path = std::env::temp_dir();
        path.push("vlessconv_missing_dir_for_test");
        path.push("nested");
        path.push("config.json");
        let err = write_config(&path, &conversion.config).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }
}

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Number;

use crate::error::TranslateError;
use crate::params::decode_component;

static VLESS_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^vless://([0-9a-f-]{36})@([^:/?#]+):([0-9]+)\?([^#]*)(?:#(.*))?$")
        .expect("vless link pattern")
});

/// The pieces of a share link before any transport interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLink {
    pub id: String,
    pub host: String,
    /// Not range checked. Digits beyond u64 become a float.
    pub port: Number,
    pub query: String,
    pub label: Option<String>,
}

pub fn parse_link(raw: &str) -> Result<ParsedLink, TranslateError> {
    let caps = VLESS_LINK.captures(raw).ok_or_else(|| {
        TranslateError::malformed(
            "expected vless://<uuid>@<host>:<port>?<params>[#<label>]",
        )
    })?;

    let id = caps[1].to_string();
    let host = caps[2].to_string();
    let port = parse_port(&caps[3]);
    let query = caps[4].to_string();
    let label = match caps.get(5) {
        Some(m) => Some(decode_label(m.as_str())?),
        None => None,
    };

    Ok(ParsedLink {
        id,
        host,
        port,
        query,
        label,
    })
}

fn parse_port(digits: &str) -> Number {
    if let Ok(port) = digits.parse::<u64>() {
        return Number::from(port);
    }
    // Past f64 range the value saturates at f64::MAX.
    let port = digits.parse::<f64>().unwrap_or(f64::MAX);
    Number::from_f64(port)
        .or_else(|| Number::from_f64(f64::MAX))
        .unwrap_or_else(|| Number::from(u64::MAX))
}

fn decode_label(raw: &str) -> Result<String, TranslateError> {
    decode_component(&raw.replace('+', " "))
        .map_err(|reason| TranslateError::malformed(format!("label: {}", reason)))
}

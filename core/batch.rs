use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use log::debug;

use crate::translate::{translate, ConversionResult};

/// Splits pasted text into links, one per line. Text with no `://` anywhere is
/// tried as a base64 subscription body first.
pub fn split_links(text: &str) -> Vec<String> {
    if !text.contains("://") {
        if let Some(decoded) = decode_subscription(text) {
            return collect_lines(&decoded);
        }
    }
    collect_lines(text)
}

pub fn translate_all(text: &str) -> Vec<ConversionResult> {
    split_links(text).iter().map(|link| translate(link)).collect()
}

fn collect_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn decode_subscription(text: &str) -> Option<String> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    let bytes = decode_base64(&compact)
        .map_err(|err| debug!("input is not a base64 subscription: {}", err))
        .ok()?;
    String::from_utf8(bytes)
        .ok()
        .filter(|decoded| decoded.contains("://"))
}

fn decode_base64(value: &str) -> Result<Vec<u8>, String> {
    STANDARD
        .decode(value)
        .or_else(|_| URL_SAFE_NO_PAD.decode(value.trim_end_matches('=')))
        .map_err(|e| e.to_string())
}

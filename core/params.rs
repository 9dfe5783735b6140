use std::collections::HashMap;

use crate::error::TranslateError;

/// Decoded query parameters of a link. Later duplicates overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: HashMap<String, String>,
}

impl ParameterSet {
    pub fn parse(query: &str) -> Result<Self, TranslateError> {
        let mut values = HashMap::new();
        for token in query.split('&') {
            let (key, raw) = match token.split_once('=') {
                Some((key, raw)) => (key, raw),
                None => (token, ""),
            };
            if key.is_empty() {
                continue;
            }
            let value = decode_component(raw).map_err(|reason| {
                TranslateError::malformed(format!("parameter {}: {}", key, reason))
            })?;
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    /// Raw presence: `Some("")` for `key=` or a bare `key`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Present and non-empty. Optional fields are read through this.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Strict percent decoding: every `%` must start a two digit hex escape and the
/// decoded bytes must be UTF-8. `+` is left alone.
pub fn decode_component(input: &str) -> Result<String, String> {
    let bytes = input.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            let escape = bytes.get(idx + 1..idx + 3);
            match escape {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                    idx += 3;
                    continue;
                }
                _ => return Err(format!("bad percent escape at offset {}", idx)),
            }
        }
        idx += 1;
    }

    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .map_err(|_| "decoded bytes are not valid utf-8".to_string())
}

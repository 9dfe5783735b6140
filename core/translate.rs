use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::TranslateError;
use crate::link::parse_link;
use crate::outbound::{build_config, ClientConfig};
use crate::params::ParameterSet;

/// A successful translation: the document plus the display name it was
/// tagged with.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub config: ClientConfig,
    pub label: String,
}

/// Result record handed to callers that cannot use `Result` directly.
///
/// Exactly one of two shapes exists: `config` present with `is_valid` true and
/// an empty message, or `config` absent with `is_valid` false and a non-empty
/// message. Only [`ConversionResult::success`] and
/// [`ConversionResult::failure`] build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub config: Option<ClientConfig>,
    pub label: String,
    pub is_valid: bool,
    pub error_message: String,
}

impl ConversionResult {
    pub fn success(conversion: Conversion) -> Self {
        Self {
            config: Some(conversion.config),
            label: conversion.label,
            is_valid: true,
            error_message: String::new(),
        }
    }

    pub fn failure(err: &TranslateError) -> Self {
        Self {
            config: None,
            label: String::new(),
            is_valid: false,
            error_message: err.to_string(),
        }
    }
}

impl From<Result<Conversion, TranslateError>> for ConversionResult {
    fn from(result: Result<Conversion, TranslateError>) -> Self {
        match result {
            Ok(conversion) => ConversionResult::success(conversion),
            Err(err) => ConversionResult::failure(&err),
        }
    }
}

pub fn convert(link: &str) -> Result<Conversion, TranslateError> {
    let parsed = parse_link(link)?;
    let params = ParameterSet::parse(&parsed.query)?;
    let config = build_config(&parsed, &params);
    let label = config
        .outbound()
        .map(|o| o.tag.clone())
        .unwrap_or_default();
    Ok(Conversion { config, label })
}

pub fn translate(link: &str) -> ConversionResult {
    let result = convert(link);
    if let Err(ref err) = result {
        debug!("rejected link: {}", err);
    }
    result.into()
}

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::translate::ConversionResult;

#[derive(Debug, Default)]
pub struct Telemetry {
    conversions: AtomicU64,
    valid: AtomicU64,
    invalid: AtomicU64,
    last_error: Mutex<Option<String>>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, result: &ConversionResult) {
        self.conversions.fetch_add(1, Ordering::Relaxed);
        if result.is_valid {
            self.valid.fetch_add(1, Ordering::Relaxed);
        } else {
            self.invalid.fetch_add(1, Ordering::Relaxed);
            if let Ok(mut guard) = self.last_error.lock() {
                *guard = Some(result.error_message.clone());
            }
        }
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        let last_error = self
            .last_error
            .lock()
            .ok()
            .and_then(|guard| guard.clone());
        TelemetrySnapshot {
            conversions: self.conversions.load(Ordering::Relaxed),
            valid: self.valid.load(Ordering::Relaxed),
            invalid: self.invalid.load(Ordering::Relaxed),
            last_error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TelemetrySnapshot {
    pub conversions: u64,
    pub valid: u64,
    pub invalid: u64,
    pub last_error: Option<String>,
}

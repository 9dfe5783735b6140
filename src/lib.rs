#[path = "../core/error.rs"]
pub mod error;

#[path = "../core/params.rs"]
pub mod params;

#[path = "../core/link.rs"]
pub mod link;

#[path = "../core/outbound.rs"]
pub mod outbound;

#[path = "../core/translate.rs"]
pub mod translate;

#[path = "../core/export.rs"]
pub mod export;

#[path = "../core/batch.rs"]
pub mod batch;

#[path = "../core/settings.rs"]
pub mod settings;

#[path = "../core/telemetry.rs"]
pub mod telemetry;

pub use error::TranslateError;
pub use outbound::ClientConfig;
pub use translate::{convert, translate, Conversion, ConversionResult};

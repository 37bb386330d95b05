use serde::Serialize;

use crate::pipeline::extraction::{ExtractionError, OcrEngineKind};

/// Application-level constants
pub const APP_NAME: &str = "bp-reader";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable selecting the OCR engine.
pub const ENGINE_ENV: &str = "BP_READER_ENGINE";

/// Environment variable holding the cloud vision API key.
pub const API_KEY_ENV: &str = "BP_READER_VISION_API_KEY";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "bp_reader_lib=info,bp_reader=info"
}

/// OCR configuration handed to whichever recognizer the caller builds.
///
/// The API key is an injected value, never read from global state by the
/// extractor.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub engine: OcrEngineKind,
    pub api_key: Option<String>,
}

/// Whether OCR can run with the current configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationStatus {
    pub configured: bool,
    pub message: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: OcrEngineKind::LocalTesseract,
            api_key: None,
        }
    }
}

impl OcrConfig {
    pub fn new(engine: OcrEngineKind, api_key: Option<String>) -> Self {
        Self { engine, api_key }
    }

    /// Build from `BP_READER_ENGINE` and `BP_READER_VISION_API_KEY`.
    /// Unknown engine names fall back to the local engine.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let engine = match lookup(ENGINE_ENV) {
            Some(name) => OcrEngineKind::from_str(name.trim()).unwrap_or_else(|| {
                tracing::warn!(engine = %name, "Unknown OCR engine, using local_tesseract");
                OcrEngineKind::LocalTesseract
            }),
            None => OcrEngineKind::LocalTesseract,
        };
        Self {
            engine,
            api_key: lookup(API_KEY_ENV),
        }
    }

    /// A blank key counts as no key.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    pub fn configuration_status(&self) -> ConfigurationStatus {
        if !self.engine.requires_api_key() {
            return ConfigurationStatus {
                configured: true,
                message: format!("{} needs no API key", self.engine),
            };
        }
        if self.has_api_key() {
            ConfigurationStatus {
                configured: true,
                message: format!("{} is configured", self.engine),
            }
        } else {
            ConfigurationStatus {
                configured: false,
                message: format!("{} requires an API key in {API_KEY_ENV}", self.engine),
            }
        }
    }

    /// Fail before invoking an engine that cannot run.
    pub fn ensure_configured(&self) -> Result<(), ExtractionError> {
        let status = self.configuration_status();
        if status.configured {
            Ok(())
        } else {
            Err(ExtractionError::EngineUnavailable(status.message))
        }
    }
}

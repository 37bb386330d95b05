pub mod types;
pub mod confidence;
pub mod normalize;
pub mod numbers;
pub mod validity;
pub mod labels;
pub mod extractor;
pub mod recognizer;

pub use types::*;
pub use normalize::*;
pub use extractor::*;
pub use recognizer::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The caller handed over something that is not text at all.
    #[error("Input is not valid UTF-8 text: {0}")]
    InvalidInput(#[from] std::str::Utf8Error),

    #[error("{engine} recognition failed: {reason}")]
    Recognition { engine: OcrEngineKind, reason: String },

    #[error("OCR engine not available: {0}")]
    EngineUnavailable(String),
}

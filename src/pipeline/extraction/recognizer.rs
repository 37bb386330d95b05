//! OCR engine adapters.
//!
//! Every engine (local, cloud, backend proxy) sits behind `TextRecognizer`
//! and hands its text to the one shared extractor. Engines differ only in
//! how they turn pixels into text.

use super::extractor::extract_recognized;
use super::types::{BloodPressureCandidate, OcrEngineKind, RecognizedText};
use super::ExtractionError;

/// An OCR backend that turns image bytes into text.
pub trait TextRecognizer: Send + Sync {
    fn kind(&self) -> OcrEngineKind;

    fn recognize(&self, image_bytes: &[u8]) -> Result<RecognizedText, ExtractionError>;
}

/// Recognize an image and extract a reading from the result.
///
/// Engine failures are errors. An image that yields no usable numbers is
/// `Ok(None)`, so the caller can offer manual entry.
pub fn read_blood_pressure(
    recognizer: &dyn TextRecognizer,
    image_bytes: &[u8],
) -> Result<Option<BloodPressureCandidate>, ExtractionError> {
    tracing::info!(
        engine = %recognizer.kind(),
        image_size = image_bytes.len(),
        "Starting blood pressure recognition"
    );

    let recognized = recognizer.recognize(image_bytes).map_err(|e| {
        tracing::warn!(engine = %recognizer.kind(), error = %e, "Recognition failed");
        e
    })?;

    let candidate = extract_recognized(&recognized);

    match &candidate {
        Some(c) => tracing::info!(
            engine = %recognized.engine,
            tier = c.tier.as_str(),
            confidence = c.confidence,
            complete = c.is_complete(),
            "Blood pressure recognition complete"
        ),
        None => tracing::info!(
            engine = %recognized.engine,
            "No blood pressure values in recognized text"
        ),
    }

    Ok(candidate)
}

// ──────────────────────────────────────────────
// MockRecognizer (testing)
// ──────────────────────────────────────────────

/// Recognizer returning fixed text, or a fixed failure.
pub struct MockRecognizer {
    kind: OcrEngineKind,
    response_text: String,
    confidence: Option<f32>,
    failure: Option<String>,
}

impl MockRecognizer {
    pub fn new(response_text: &str, kind: OcrEngineKind) -> Self {
        Self {
            kind,
            response_text: response_text.to_string(),
            confidence: None,
            failure: None,
        }
    }

    /// A recognizer whose every call fails with `reason`.
    pub fn failing(reason: &str, kind: OcrEngineKind) -> Self {
        Self {
            kind,
            response_text: String::new(),
            confidence: None,
            failure: Some(reason.to_string()),
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

impl TextRecognizer for MockRecognizer {
    fn kind(&self) -> OcrEngineKind {
        self.kind
    }

    fn recognize(&self, _image_bytes: &[u8]) -> Result<RecognizedText, ExtractionError> {
        if let Some(reason) = &self.failure {
            return Err(ExtractionError::Recognition {
                engine: self.kind,
                reason: reason.clone(),
            });
        }
        Ok(RecognizedText {
            text: self.response_text.clone(),
            engine: self.kind,
            engine_confidence: self.confidence,
        })
    }
}

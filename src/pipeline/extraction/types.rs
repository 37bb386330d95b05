use std::fmt;

use serde::{Deserialize, Serialize};

/// Which OCR engine produced the recognized text.
///
/// The extractor never branches on this; it is carried so adapters and logs
/// can say where a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrEngineKind {
    /// On-device engine (Tesseract-style).
    LocalTesseract,
    /// Cloud vision API called directly with an API key.
    CloudVision,
    /// Cloud vision API reached through the application's own backend.
    BackendProxy,
}

impl OcrEngineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OcrEngineKind::LocalTesseract => "local_tesseract",
            OcrEngineKind::CloudVision => "cloud_vision",
            OcrEngineKind::BackendProxy => "backend_proxy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "local_tesseract" => Some(OcrEngineKind::LocalTesseract),
            "cloud_vision" => Some(OcrEngineKind::CloudVision),
            "backend_proxy" => Some(OcrEngineKind::BackendProxy),
            _ => None,
        }
    }

    /// Engines that call out to the cloud vision service need an API key.
    pub fn requires_api_key(self) -> bool {
        matches!(self, OcrEngineKind::CloudVision)
    }
}

impl fmt::Display for OcrEngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text output of an OCR engine, with whatever metadata the engine reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedText {
    pub text: String,
    pub engine: OcrEngineKind,
    /// Engine-reported confidence (0.0 to 1.0), if any. Informational only.
    pub engine_confidence: Option<f32>,
}

impl RecognizedText {
    pub fn new(text: impl Into<String>, engine: OcrEngineKind) -> Self {
        Self {
            text: text.into(),
            engine,
            engine_confidence: None,
        }
    }

    pub fn with_engine_confidence(mut self, confidence: f32) -> Self {
        self.engine_confidence = Some(confidence);
        self
    }
}

/// The values a tier managed to determine.
///
/// Partial outcomes are explicit variants rather than nullable fields, so a
/// caller cannot mistake a two-value reading for a complete one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BloodPressureValues {
    Full {
        systolic: u16,
        diastolic: u16,
        pulse: u16,
    },
    PressureOnly {
        systolic: u16,
        diastolic: u16,
    },
    SystolicOnly {
        systolic: u16,
    },
}

/// Which fallback tier produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionTier {
    /// SYS / DIA / PUL labels were legible.
    Labeled,
    /// First range-valid combination of the digit runs.
    RangeMatch,
    /// Distinct values sorted descending.
    SortedFallback,
}

impl ExtractionTier {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractionTier::Labeled => "labeled",
            ExtractionTier::RangeMatch => "range_match",
            ExtractionTier::SortedFallback => "sorted_fallback",
        }
    }
}

/// A validated reading inferred from one piece of OCR text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureCandidate {
    pub values: BloodPressureValues,
    /// Heuristic trust in the inference (0.0 to 1.0), fixed per tier.
    pub confidence: f32,
    pub tier: ExtractionTier,
}

impl BloodPressureCandidate {
    pub fn systolic(&self) -> u16 {
        match self.values {
            BloodPressureValues::Full { systolic, .. }
            | BloodPressureValues::PressureOnly { systolic, .. }
            | BloodPressureValues::SystolicOnly { systolic } => systolic,
        }
    }

    pub fn diastolic(&self) -> Option<u16> {
        match self.values {
            BloodPressureValues::Full { diastolic, .. }
            | BloodPressureValues::PressureOnly { diastolic, .. } => Some(diastolic),
            BloodPressureValues::SystolicOnly { .. } => None,
        }
    }

    pub fn pulse(&self) -> Option<u16> {
        match self.values {
            BloodPressureValues::Full { pulse, .. } => Some(pulse),
            _ => None,
        }
    }

    /// All three values were determined.
    pub fn is_complete(&self) -> bool {
        matches!(self.values, BloodPressureValues::Full { .. })
    }
}

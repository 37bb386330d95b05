pub mod config;
pub mod models;
pub mod pipeline;

pub use pipeline::extraction::{
    extract, extract_bytes, extract_recognized, BloodPressureCandidate, BloodPressureValues,
    ExtractionError, ExtractionTier,
};

//! Confidence assigned to each extraction tier.
//!
//! These are fixed heuristic scores, not probabilities. Callers surface them
//! to the user (e.g. "88% sure") and may ask for confirmation below a level.

/// SYS, DIA and PUL labels all matched and the triple is valid.
pub const LABELED: f32 = 0.9;

/// First range-valid combination of unlabeled digit runs.
pub const RANGE_MATCH: f32 = 0.7;

/// Exactly two distinct plausible values: larger systolic, smaller diastolic.
pub const TWO_VALUE: f32 = 0.6;

/// Three or more distinct values, top three sorted descending.
pub const SORTED: f32 = 0.5;

/// A single plausible value taken as systolic.
pub const SINGLE_VALUE: f32 = 0.3;

/// Below this a caller should ask the user to confirm every value.
pub const CONFIRM_BELOW: f32 = RANGE_MATCH;

/// Whether a confidence is low enough that the caller should ask the user
/// to check the values before saving.
pub fn needs_confirmation(confidence: f32) -> bool {
    confidence < CONFIRM_BELOW
}

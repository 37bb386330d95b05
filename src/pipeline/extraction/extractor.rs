//! Blood-pressure reading extraction from OCR text.
//!
//! Tiers, tried in order until one yields a valid reading:
//! 1. **Labeled**: SYS, DIA and PUL labels each followed by a value.
//! 2. **Range match**: first combination of unlabeled digit runs, in
//!    systolic → diastolic → pulse nested order, that passes the range checks.
//! 3. **Sorted fallback**: distinct plausible values sorted descending,
//!    relying on systolic > diastolic > pulse on typical home monitors.
//!
//! Extraction is pure: no I/O, no shared state, same output for the same
//! input. Unreadable text is `None`, never an error.

use super::confidence;
use super::labels::find_labeled_values;
use super::normalize::normalize_text;
use super::numbers::{distinct_in_band, extract_digit_runs};
use super::types::{BloodPressureCandidate, BloodPressureValues, ExtractionTier, RecognizedText};
use super::validity::{
    is_valid_full, is_valid_pressure, is_valid_systolic, DIASTOLIC_RANGE, LABELED_PULSE_RANGE,
    PLAUSIBLE_RANGE, PULSE_RANGE, SYSTOLIC_RANGE,
};
use super::ExtractionError;

/// Pool entries beyond this are ignored by the range tier, bounding the
/// search at `MAX_POOL_SIZE³` combinations on cluttered images.
pub const MAX_POOL_SIZE: usize = 12;

/// Extract a reading from recognized text.
pub fn extract(text: &str) -> Option<BloodPressureCandidate> {
    let normalized = normalize_text(text);
    tracing::trace!(text = %normalized.text, "Extracting blood pressure from OCR text");

    if let Some(candidate) = labeled_tier(&normalized.upper) {
        return Some(log_outcome(candidate));
    }

    let numbers = extract_digit_runs(&normalized.text);
    tracing::debug!(count = numbers.len(), numbers = ?numbers, "Digit runs extracted");

    let outcome = range_tier(&numbers).or_else(|| sorted_fallback(&numbers));
    match outcome {
        Some(candidate) => Some(log_outcome(candidate)),
        None => {
            tracing::debug!("No blood pressure reading found in OCR text");
            None
        }
    }
}

/// Extract from raw bytes that are expected to be UTF-8 text.
///
/// Anything that is not text is a caller bug and is rejected outright; text
/// that simply contains no reading is `Ok(None)`.
pub fn extract_bytes(bytes: &[u8]) -> Result<Option<BloodPressureCandidate>, ExtractionError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(extract(text))
}

/// Extract from an OCR engine's output. The engine does not influence the
/// algorithm; it is only recorded in the log.
pub fn extract_recognized(recognized: &RecognizedText) -> Option<BloodPressureCandidate> {
    tracing::debug!(
        engine = %recognized.engine,
        engine_confidence = ?recognized.engine_confidence,
        text_length = recognized.text.len(),
        "Extracting from recognized text"
    );
    extract(&recognized.text)
}

fn log_outcome(candidate: BloodPressureCandidate) -> BloodPressureCandidate {
    tracing::debug!(
        tier = candidate.tier.as_str(),
        systolic = candidate.systolic(),
        diastolic = ?candidate.diastolic(),
        pulse = ?candidate.pulse(),
        confidence = candidate.confidence,
        "Blood pressure reading extracted"
    );
    candidate
}

fn labeled_tier(upper: &str) -> Option<BloodPressureCandidate> {
    let labels = find_labeled_values(upper);
    let Some((systolic, diastolic, pulse)) = labels.complete() else {
        if labels.found_count() > 0 {
            tracing::debug!(
                found = labels.found_count(),
                "Only some labels legible, falling back to unlabeled tiers"
            );
        }
        return None;
    };

    if !is_valid_full(systolic, diastolic, pulse, &LABELED_PULSE_RANGE) {
        tracing::debug!(systolic, diastolic, pulse, "Labeled values failed range checks");
        return None;
    }

    Some(BloodPressureCandidate {
        values: BloodPressureValues::Full {
            systolic,
            diastolic,
            pulse,
        },
        confidence: confidence::LABELED,
        tier: ExtractionTier::Labeled,
    })
}

/// Positions in `numbers` whose value lies in `range`, capped at `MAX_POOL_SIZE`.
fn pool(numbers: &[u16], range: &std::ops::RangeInclusive<u16>) -> Vec<usize> {
    numbers
        .iter()
        .enumerate()
        .filter(|(_, v)| range.contains(*v))
        .map(|(i, _)| i)
        .take(MAX_POOL_SIZE)
        .collect()
}

/// First valid (systolic, diastolic, pulse) in nested pool order.
///
/// The three values must come from three different positions: one printed
/// number is never both diastolic and pulse. Ties are broken by input order,
/// not by magnitude.
fn range_tier(numbers: &[u16]) -> Option<BloodPressureCandidate> {
    let systolic_pool = pool(numbers, &SYSTOLIC_RANGE);
    let diastolic_pool = pool(numbers, &DIASTOLIC_RANGE);
    let pulse_pool = pool(numbers, &PULSE_RANGE);

    for &s in &systolic_pool {
        for &d in diastolic_pool.iter().filter(|&&d| d != s) {
            if numbers[s] <= numbers[d] {
                continue;
            }
            for &p in pulse_pool.iter().filter(|&&p| p != s && p != d) {
                let (systolic, diastolic, pulse) = (numbers[s], numbers[d], numbers[p]);
                if is_valid_full(systolic, diastolic, pulse, &PULSE_RANGE) {
                    return Some(BloodPressureCandidate {
                        values: BloodPressureValues::Full {
                            systolic,
                            diastolic,
                            pulse,
                        },
                        confidence: confidence::RANGE_MATCH,
                        tier: ExtractionTier::RangeMatch,
                    });
                }
            }
        }
    }

    None
}

/// Distinct plausible values sorted descending: systolic, diastolic, pulse.
fn sorted_fallback(numbers: &[u16]) -> Option<BloodPressureCandidate> {
    let mut distinct = distinct_in_band(numbers, PLAUSIBLE_RANGE);
    distinct.sort_unstable_by(|a, b| b.cmp(a));

    let (values, confidence) = match distinct.as_slice() {
        [] => return None,
        [systolic] => {
            if !is_valid_systolic(*systolic) {
                return None;
            }
            (
                BloodPressureValues::SystolicOnly {
                    systolic: *systolic,
                },
                confidence::SINGLE_VALUE,
            )
        }
        [systolic, diastolic] => {
            if !is_valid_pressure(*systolic, *diastolic) {
                return None;
            }
            (
                BloodPressureValues::PressureOnly {
                    systolic: *systolic,
                    diastolic: *diastolic,
                },
                confidence::TWO_VALUE,
            )
        }
        [systolic, diastolic, pulse, ..] => {
            if !is_valid_full(*systolic, *diastolic, *pulse, &PULSE_RANGE) {
                return None;
            }
            (
                BloodPressureValues::Full {
                    systolic: *systolic,
                    diastolic: *diastolic,
                    pulse: *pulse,
                },
                confidence::SORTED,
            )
        }
    };

    Some(BloodPressureCandidate {
        values,
        confidence,
        tier: ExtractionTier::SortedFallback,
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::pipeline::extraction::types::OcrEngineKind;

    fn full(systolic: u16, diastolic: u16, pulse: u16) -> BloodPressureValues {
        BloodPressureValues::Full {
            systolic,
            diastolic,
            pulse,
        }
    }

    fn assert_invariant(c: &BloodPressureCandidate) {
        assert!(SYSTOLIC_RANGE.contains(&c.systolic()), "{c:?}");
        if let Some(d) = c.diastolic() {
            assert!(DIASTOLIC_RANGE.contains(&d), "{c:?}");
            assert!(c.systolic() > d, "{c:?}");
        }
        if let Some(p) = c.pulse() {
            let range = if c.tier == ExtractionTier::Labeled {
                LABELED_PULSE_RANGE
            } else {
                PULSE_RANGE
            };
            assert!(range.contains(&p), "{c:?}");
        }
        assert!((0.0..=1.0).contains(&c.confidence));
    }

    // ── labeled tier ──

    #[test]
    fn labeled_example() {
        let c = extract("SYS 153 DIA 102 PUL 88").unwrap();
        assert_eq!(c.values, full(153, 102, 88));
        assert_eq!(c.tier, ExtractionTier::Labeled);
        assert!((c.confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn labeled_wins_over_noise_in_any_order() {
        let text = "2024/10/16 07:42\nPUL 88 /min\nbattery 12\nDIA 102 mmHg\nSYS 153 mmHg\nM 3";
        let c = extract(text).unwrap();
        assert_eq!(c.values, full(153, 102, 88));
        assert_eq!(c.tier, ExtractionTier::Labeled);
    }

    #[test]
    fn label_fragment_in_noise_word_does_not_win() {
        let c = extract("INDIA 60 SYS 153 DIA 102 PUL 88").unwrap();
        assert_eq!(c.values, full(153, 102, 88));
        assert_eq!(c.tier, ExtractionTier::Labeled);
    }

    #[test]
    fn labeled_is_case_insensitive() {
        let c = extract("sys 121\ndia 79\npul 66").unwrap();
        assert_eq!(c.values, full(121, 79, 66));
        assert_eq!(c.tier, ExtractionTier::Labeled);
    }

    #[test]
    fn labeled_accepts_low_pulse() {
        // 35 bpm is outside the unlabeled pulse bound but the label vouches for it.
        let c = extract("SYS 120 DIA 80 PUL 35").unwrap();
        assert_eq!(c.values, full(120, 80, 35));
        assert_eq!(c.tier, ExtractionTier::Labeled);
    }

    #[test]
    fn invalid_labeled_triple_falls_through() {
        // DIA above SYS: the labeled triple is rejected and the range tier
        // takes the first valid combination in input order.
        let c = extract("SYS 80 DIA 130 PUL 70").unwrap();
        assert_eq!(c.tier, ExtractionTier::RangeMatch);
        assert_eq!(c.values, full(80, 70, 130));
    }

    #[test]
    fn partial_labels_fall_through() {
        let c = extract("SYS 142 DIA 91 76").unwrap();
        assert_eq!(c.tier, ExtractionTier::RangeMatch);
        assert_eq!(c.values, full(142, 91, 76));
    }

    // ── range tier ──

    #[test]
    fn range_tier_first_combination_in_nested_order() {
        // systolic pool [200, 150], diastolic pool [45, 150, 70],
        // pulse pool [200, 45, 150, 70]; 200 > 45, first unused pulse is 150.
        let c = extract("200 45 150 70").unwrap();
        assert_eq!(c.values, full(200, 45, 150));
        assert_eq!(c.tier, ExtractionTier::RangeMatch);
        assert!((c.confidence - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn range_tier_plain_display() {
        let c = extract("128\n82\n71").unwrap();
        assert_eq!(c.values, full(128, 82, 71));
        assert_eq!(c.tier, ExtractionTier::RangeMatch);
    }

    #[test]
    fn range_tier_skips_smaller_leading_systolic() {
        // 90 heads the systolic pool and pairs with 65, leaving 180 as pulse.
        let c = extract("90 180 65").unwrap();
        assert_eq!(c.values, full(90, 65, 180));
        assert_eq!(c.tier, ExtractionTier::RangeMatch);
    }

    #[test]
    fn range_tier_ignores_out_of_range_noise() {
        // 12, 2024 and 250 never reach the diastolic or pulse pools.
        let c = extract("12 99 2024 135 85 68 250").unwrap();
        assert_eq!(c.values, full(99, 85, 135));
    }

    #[test]
    fn range_tier_never_reuses_a_position() {
        assert!(range_tier(&[130, 85]).is_none());
    }

    #[test]
    fn range_tier_allows_repeated_values_at_different_positions() {
        let c = range_tier(&[130, 85, 130]).unwrap();
        assert_eq!(c.values, full(130, 85, 130));
    }

    #[test]
    fn range_tier_respects_pool_cap() {
        // Every pooled systolic equals every pooled diastolic; the values
        // that would pair sit past the cap.
        let mut numbers = vec![80; MAX_POOL_SIZE];
        numbers.extend([120, 70, 60]);
        assert!(range_tier(&numbers).is_none());
    }

    // ── sorted fallback ──

    #[test]
    fn sorted_fallback_three_values() {
        let c = sorted_fallback(&[90, 180, 65]).unwrap();
        assert_eq!(c.values, full(180, 90, 65));
        assert_eq!(c.tier, ExtractionTier::SortedFallback);
        assert!((c.confidence - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn sorted_fallback_uses_top_three() {
        let c = sorted_fallback(&[60, 70, 140, 90, 140]).unwrap();
        assert_eq!(c.values, full(140, 90, 70));
    }

    #[test]
    fn sorted_fallback_invalid_triple_is_none() {
        // Diastolic 160 is out of range; no retry with fewer values.
        assert!(sorted_fallback(&[200, 160, 70]).is_none());
    }

    #[test]
    fn sorted_fallback_reached_when_range_tier_capped() {
        let mut text = "80 ".repeat(MAX_POOL_SIZE);
        text.push_str("120 70 60");
        let c = extract(&text).unwrap();
        assert_eq!(c.tier, ExtractionTier::SortedFallback);
        assert_eq!(c.values, full(120, 80, 70));
        assert!((c.confidence - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn two_values() {
        let c = extract("130 85").unwrap();
        assert_eq!(
            c.values,
            BloodPressureValues::PressureOnly {
                systolic: 130,
                diastolic: 85
            }
        );
        assert_eq!(c.pulse(), None);
        assert!((c.confidence - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn two_values_example_with_trailing_space() {
        let c = extract("195 88 ").unwrap();
        assert_eq!(c.systolic(), 195);
        assert_eq!(c.diastolic(), Some(88));
        assert_eq!(c.pulse(), None);
        assert_eq!(c.tier, ExtractionTier::SortedFallback);
    }

    #[test]
    fn two_values_sorted_regardless_of_order() {
        let c = extract("dia 85 / 130").unwrap();
        assert_eq!(c.systolic(), 130);
        assert_eq!(c.diastolic(), Some(85));
    }

    #[test]
    fn repeated_value_counts_once() {
        let c = extract("130 130").unwrap();
        assert_eq!(c.values, BloodPressureValues::SystolicOnly { systolic: 130 });
    }

    #[test]
    fn two_invalid_values_is_none() {
        // 45 as systolic is implausible.
        assert!(extract("45 35").is_none());
    }

    #[test]
    fn single_value() {
        let c = extract("SYS 120").unwrap();
        assert_eq!(c.values, BloodPressureValues::SystolicOnly { systolic: 120 });
        assert!((c.confidence - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn single_low_value_is_none() {
        assert!(extract("err 42").is_none());
    }

    // ── no result ──

    #[test]
    fn no_digits_is_none() {
        assert!(extract("battery low").is_none());
    }

    #[test]
    fn single_digit_is_none() {
        assert!(extract("5").is_none());
    }

    #[test]
    fn empty_is_none() {
        assert!(extract("").is_none());
        assert!(extract("   \n ").is_none());
    }

    #[test]
    fn only_out_of_band_numbers_is_none() {
        assert!(extract("12 20 300 999 1234").is_none());
    }

    // ── contract ──

    #[test]
    fn bytes_must_be_utf8() {
        let result = extract_bytes(&[0xff, 0xfe, 0x31, 0x32]);
        assert!(matches!(result, Err(ExtractionError::InvalidInput(_))));
    }

    #[test]
    fn bytes_without_reading_is_ok_none() {
        assert!(matches!(extract_bytes(b"no data"), Ok(None)));
    }

    #[test]
    fn bytes_with_reading() {
        let c = extract_bytes(b"SYS 153 DIA 102 PUL 88").unwrap().unwrap();
        assert_eq!(c.values, full(153, 102, 88));
    }

    #[test]
    fn engine_does_not_change_result() {
        let text = "SYS 131\nDIA 84\nPUL 62";
        let results: Vec<_> = [
            OcrEngineKind::LocalTesseract,
            OcrEngineKind::CloudVision,
            OcrEngineKind::BackendProxy,
        ]
        .into_iter()
        .map(|engine| {
            extract_recognized(&RecognizedText::new(text, engine).with_engine_confidence(0.42))
        })
        .collect();
        assert!(results.iter().all(|r| *r == results[0]));
        assert_eq!(results[0].unwrap().values, full(131, 84, 62));
    }

    #[test]
    fn deterministic() {
        let text = "07:42 M1 144 93 2024 SYS 58 /min 99";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn fuzzed_results_always_satisfy_invariant() {
        let mut rng = StdRng::seed_from_u64(0x5eed_b100d);
        let labels = ["SYS", "DIA", "PUL", "mmHg", "/min", "M", ":", "\n"];

        for _ in 0..2_000 {
            let tokens = rng.gen_range(0..8);
            let mut text = String::new();
            for _ in 0..tokens {
                if rng.gen_bool(0.3) {
                    text.push_str(labels[rng.gen_range(0..labels.len())]);
                } else {
                    let n: u32 = rng.gen_range(0..1200);
                    text.push_str(&n.to_string());
                }
                text.push(' ');
            }

            if let Some(c) = extract(&text) {
                assert_invariant(&c);
            }
            assert_eq!(extract(&text), extract(&text), "non-deterministic for {text:?}");
        }
    }
}

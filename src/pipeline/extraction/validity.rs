//! Physiological bounds a reading must satisfy before it is returned.

use std::ops::RangeInclusive;

pub const SYSTOLIC_RANGE: RangeInclusive<u16> = 80..=250;
pub const DIASTOLIC_RANGE: RangeInclusive<u16> = 40..=150;
pub const PULSE_RANGE: RangeInclusive<u16> = 40..=200;

/// Wider pulse bound for the labeled tier, where the PUL label already
/// disambiguates the value.
pub const LABELED_PULSE_RANGE: RangeInclusive<u16> = 30..=250;

/// Broad band for the sorted fallback's candidate values.
pub const PLAUSIBLE_RANGE: RangeInclusive<u16> = 30..=250;

pub fn is_valid_systolic(systolic: u16) -> bool {
    SYSTOLIC_RANGE.contains(&systolic)
}

/// Systolic and diastolic in range, systolic strictly above diastolic.
pub fn is_valid_pressure(systolic: u16, diastolic: u16) -> bool {
    is_valid_systolic(systolic) && DIASTOLIC_RANGE.contains(&diastolic) && systolic > diastolic
}

/// Full triple check with the given pulse bound.
pub fn is_valid_full(
    systolic: u16,
    diastolic: u16,
    pulse: u16,
    pulse_range: &RangeInclusive<u16>,
) -> bool {
    is_valid_pressure(systolic, diastolic) && pulse_range.contains(&pulse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typical_reading_is_valid() {
        assert!(is_valid_full(120, 80, 72, &PULSE_RANGE));
    }

    #[test]
    fn systolic_must_exceed_diastolic() {
        assert!(!is_valid_pressure(100, 100));
        assert!(!is_valid_pressure(90, 120));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(is_valid_full(250, 150, 200, &PULSE_RANGE));
        assert!(is_valid_full(80, 40, 40, &PULSE_RANGE));
        assert!(!is_valid_full(251, 80, 70, &PULSE_RANGE));
        assert!(!is_valid_full(120, 39, 70, &PULSE_RANGE));
        assert!(!is_valid_full(120, 80, 201, &PULSE_RANGE));
    }

    #[test]
    fn labeled_pulse_range_is_wider() {
        assert!(!is_valid_full(120, 80, 35, &PULSE_RANGE));
        assert!(is_valid_full(120, 80, 35, &LABELED_PULSE_RANGE));
        assert!(is_valid_full(120, 80, 230, &LABELED_PULSE_RANGE));
        assert!(!is_valid_full(120, 80, 251, &LABELED_PULSE_RANGE));
    }

    #[test]
    fn systolic_alone() {
        assert!(is_valid_systolic(80));
        assert!(!is_valid_systolic(79));
        assert!(!is_valid_systolic(30));
    }
}

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

/// Digit runs shorter or longer than this are never a display value.
pub const MIN_RUN_DIGITS: usize = 2;
pub const MAX_RUN_DIGITS: usize = 3;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Every maximal run of 2 or 3 ASCII digits, parsed, in left-to-right order.
///
/// Runs of 1 digit or of 4+ digits (dates, clock times without a colon,
/// serial numbers) are skipped whole; "2024" never yields "202".
pub fn extract_digit_runs(text: &str) -> Vec<u16> {
    DIGIT_RUN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|run| (MIN_RUN_DIGITS..=MAX_RUN_DIGITS).contains(&run.len()))
        .filter_map(|run| run.parse::<u16>().ok())
        .collect()
}

/// Values inside `band`, deduplicated, in order of first appearance.
pub fn distinct_in_band(values: &[u16], band: RangeInclusive<u16>) -> Vec<u16> {
    let mut seen = HashSet::new();
    values
        .iter()
        .copied()
        .filter(|v| band.contains(v))
        .filter(|v| seen.insert(*v))
        .collect()
}

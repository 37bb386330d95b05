//! Label tier: SYS / DIA / PUL tokens printed next to their values.
//!
//! Each label is searched independently. Between a label and its value only
//! separators (whitespace, punctuation) and one optional unit token are
//! allowed, so a label never reaches across another word to steal the
//! number that belongs to it.

use std::sync::LazyLock;

use regex::Regex;

/// Anything but digits and letters.
const SEPARATOR: &str = r"[^0-9\p{L}]*";
const WORD_START: &str = r"(?:^|[^\p{L}])";
const UNIT: &str = r"(?:MMHG|/?MIN|BPM)";

/// Builds the pattern for one label. Applied to uppercased text.
/// A label must start a word, so `INDIA` never reads as `DIA`.
fn label_pattern(label: &str) -> Regex {
    let pattern = format!(
        r"{WORD_START}{label}{SEPARATOR}(?:{UNIT}{SEPARATOR})?([0-9]{{2,3}})(?:[^0-9]|$)"
    );
    Regex::new(&pattern).unwrap()
}

static SYSTOLIC_LABEL: LazyLock<Regex> = LazyLock::new(|| label_pattern("SYS(?:TOLIC)?"));
static DIASTOLIC_LABEL: LazyLock<Regex> = LazyLock::new(|| label_pattern("DIA(?:STOLIC)?"));
static PULSE_LABEL: LazyLock<Regex> = LazyLock::new(|| label_pattern("PUL(?:SE)?"));

/// Values found next to each label, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelMatches {
    pub systolic: Option<u16>,
    pub diastolic: Option<u16>,
    pub pulse: Option<u16>,
}

impl LabelMatches {
    /// All three labels matched.
    pub fn complete(&self) -> Option<(u16, u16, u16)> {
        Some((self.systolic?, self.diastolic?, self.pulse?))
    }

    pub fn found_count(&self) -> usize {
        [self.systolic, self.diastolic, self.pulse]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }
}

/// Search uppercased, whitespace-normalized text for the three labels.
pub fn find_labeled_values(upper: &str) -> LabelMatches {
    LabelMatches {
        systolic: first_value(&SYSTOLIC_LABEL, upper),
        diastolic: first_value(&DIASTOLIC_LABEL, upper),
        pulse: first_value(&PULSE_LABEL, upper),
    }
}

fn first_value(pattern: &Regex, upper: &str) -> Option<u16> {
    pattern
        .captures(upper)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

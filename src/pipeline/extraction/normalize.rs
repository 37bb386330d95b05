/// OCR text after whitespace normalization.
///
/// `text` keeps the original casing for number extraction; `upper` is the
/// uppercased copy used for label matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    pub upper: String,
}

/// Collapse every whitespace run (newlines included) to one space and trim.
pub fn normalize_text(raw: &str) -> NormalizedText {
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let upper = text.to_uppercase();
    NormalizedText { text, upper }
}

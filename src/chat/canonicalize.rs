use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Loose North American phone shape: optional `+1` or standalone `1`, then
/// 3-3-4 digits with optional parentheses around the area code and `-`, `.`
/// or space separators. The leading `1` must start a word so the tail of a
/// preceding number is never taken as a country code.
const PHONE_PATTERN: &str =
    r"(?:\+1[-.\s]?|\b1[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b";

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"));

/// Rewrites every phone-shaped substring of model output to the practice's
/// one real number, so a hallucinated number never reaches a patient.
#[derive(Debug, Clone)]
pub struct PhoneCanonicalizer {
    canonical: String,
}

impl PhoneCanonicalizer {
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        canonicalize_phone_numbers(text, &self.canonical)
    }
}

pub fn canonicalize_phone_numbers(text: &str, canonical: &str) -> String {
    PHONE_RE.replace_all(text, NoExpand(canonical)).into_owned()
}

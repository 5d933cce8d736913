use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::record::ResolutionFields;
use crate::extract::{capitalize_words, FieldRule};

// OCR output is noisy around the header, so the code pattern tolerates
// hyphen/space variation between its fixed tokens.
static CASE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)TRANS[-\s]?SEGEN[-\s]?UPCH[-\s]?\d{4}[-\s]?CU[-\s]?\d{4}").unwrap()
});

static CONSIDERANDO_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)CONSIDERANDO:.*?Que,?\s+([A-ZÁÉÍÓÚÑ\s]+(?:,\s*[A-ZÁÉÍÓÚÑ\s]+)?)").unwrap()
});

static NAME_CUTOFF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),?\s+es\s+estudiante|,?\s+de\s+acuerdo").unwrap());

/// Ordered rule table for the Trans-Segen resolution template.
pub const RULES: &[FieldRule] = &[
    FieldRule::new("case_number", case_number),
    FieldRule::new("full_name", full_name),
];

pub fn extract(text: &str) -> ResolutionFields {
    ResolutionFields {
        full_name: full_name(text).unwrap_or_default(),
        case_number: case_number(text).unwrap_or_default(),
    }
}

/// First header code match, normalized by collapsing every whitespace run
/// to a single hyphen: `TRANS SEGEN UPCH 2025 CU 0042` becomes
/// `TRANS-SEGEN-UPCH-2025-CU-0042`.
pub fn case_number(text: &str) -> Option<String> {
    CASE_NUMBER_RE.find(text).map(|m| {
        m.as_str()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    })
}

/// The name follows the first `Que` of the CONSIDERANDO section as an
/// uppercase span, which the scan truncates at the boilerplate that follows
/// it (`es estudiante` / `de acuerdo`, whichever comes first) and re-cases
/// word by word.
pub fn full_name(text: &str) -> Option<String> {
    let caps = CONSIDERANDO_NAME_RE.captures(text)?;
    let raw = caps[1].trim();
    let clean = NAME_CUTOFF_RE.split(raw).next().unwrap_or("").trim();
    if clean.is_empty() {
        return None;
    }
    Some(capitalize_words(clean))
}

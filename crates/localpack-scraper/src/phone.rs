//! Phone-number candidate matching and E.164 canonicalization.
//!
//! Extraction is two-staged: a permissive regex locates a plausible
//! phone-like substring inside arbitrary metadata text, then the candidate
//! is validated against calling-code and national-length plausibility rules
//! and reformatted to canonical international form (leading `+`, country
//! code, national number, no separators). A candidate that fails validation
//! is discarded — the raw regex match is never passed through.

use std::sync::LazyLock;

use regex::Regex;

/// Matches grouped digits with optional `+CC` prefix and optional
/// parenthesized area code, e.g. `+81 70-1274-0809` or `(555) 123-4567`.
static PHONE_CANDIDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,9}")
        .expect("valid phone candidate regex")
});

/// Region assumed for candidates that carry no explicit `+CC` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Us,
    Ca,
    Gb,
    In,
    Jp,
    Au,
    De,
    Fr,
}

impl Region {
    /// Parses a two-letter ISO region code, case-insensitively.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "US" => Some(Self::Us),
            "CA" => Some(Self::Ca),
            "GB" => Some(Self::Gb),
            "IN" => Some(Self::In),
            "JP" => Some(Self::Jp),
            "AU" => Some(Self::Au),
            "DE" => Some(Self::De),
            "FR" => Some(Self::Fr),
            _ => None,
        }
    }

    fn calling_code(self) -> &'static str {
        match self {
            Self::Us | Self::Ca => "1",
            Self::Gb => "44",
            Self::In => "91",
            Self::Jp => "81",
            Self::Au => "61",
            Self::De => "49",
            Self::Fr => "33",
        }
    }

    /// Whether `len` is a plausible national-number length for this region.
    fn national_len_ok(self, len: usize) -> bool {
        match self {
            Self::Us | Self::Ca | Self::In => len == 10,
            Self::Gb | Self::Jp => (9..=10).contains(&len),
            Self::Au | Self::Fr => len == 9,
            Self::De => (7..=11).contains(&len),
        }
    }
}

/// Extracts and canonicalizes the first phone number found in `text`.
///
/// Returns the E.164 string (e.g. `"+817012740809"`), or `None` when no
/// candidate matches or the candidate fails validation.
#[must_use]
pub fn normalize_phone(text: &str, default_region: Region) -> Option<String> {
    let candidate = PHONE_CANDIDATE_RE.find(text)?.as_str();
    canonicalize(candidate, default_region)
}

fn canonicalize(candidate: &str, default_region: Region) -> Option<String> {
    let has_plus = candidate.trim_start().starts_with('+');
    let digits: String = candidate.chars().filter(char::is_ascii_digit).collect();

    if has_plus {
        let (code, national) = split_calling_code(&digits)?;
        // National significant numbers never begin with the trunk zero in
        // international form.
        if national.starts_with('0') || !(6..=12).contains(&national.len()) {
            return None;
        }
        return Some(format!("+{code}{national}"));
    }

    let code = default_region.calling_code();
    let mut national = digits.as_str();

    if code == "1" {
        // NANP: an 11-digit number with a leading 1 spells out its own
        // country code.
        if national.len() == 11 && national.starts_with('1') {
            national = &national[1..];
        }
        // Area codes run 2-9 in the first digit.
        if !national.starts_with(|c: char| ('2'..='9').contains(&c)) {
            return None;
        }
    } else if let Some(stripped) = national.strip_prefix('0') {
        // Domestic formats outside the NANP write a trunk zero that E.164
        // drops.
        national = stripped;
    }

    if !default_region.national_len_ok(national.len()) {
        return None;
    }
    Some(format!("+{code}{national}"))
}

/// Splits `digits` into (calling code, national number).
///
/// One-digit zones (1, 7) and the two-digit assignments are matched
/// explicitly; everything else is treated as a three-digit code, which is
/// how the remaining ITU zones are assigned. Prefix-freedom of the numbering
/// plan makes the split unambiguous.
fn split_calling_code(digits: &str) -> Option<(&str, &str)> {
    const TWO_DIGIT_CODES: &[&str] = &[
        "20", "27", "30", "31", "32", "33", "34", "36", "39", "40", "41", "43", "44", "45", "46",
        "47", "48", "49", "51", "52", "53", "54", "55", "56", "57", "58", "60", "61", "62", "63",
        "64", "65", "66", "81", "82", "84", "86", "90", "91", "92", "93", "94", "95", "98",
    ];

    if digits.len() < 2 {
        return None;
    }
    let first = &digits[..1];
    if first == "1" || first == "7" {
        return Some((first, &digits[1..]));
    }
    let two = &digits[..2];
    if TWO_DIGIT_CODES.contains(&two) {
        return Some((two, &digits[2..]));
    }
    if digits.len() >= 3 {
        let three = &digits[..3];
        // 0xx and 1xx are not assigned as three-digit codes.
        if !three.starts_with('0') && !three.starts_with('1') {
            return Some((three, &digits[3..]));
        }
    }
    None
}

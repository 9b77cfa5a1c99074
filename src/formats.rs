//! # Format descriptors and the field format registry
//!
//! ## Purpose
//!
//! Every data element is encoded and decoded under the control of a
//! [`FormatDescriptor`]: content class, length discipline, size ceiling,
//! optional padding and validation pattern. Descriptors live in a
//! [`FormatRegistry`] keyed by field identifier (`"2"`, `"127.25"`,
//! `"127.25.12"`). The registry is a read-only input to every codec
//! operation; callers may share one instance across threads.
//!
//! Dispatch is table-driven: there is no per-field type hierarchy, just a
//! descriptor lookup and a small set of match arms in the field codec.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("numeric pattern"));
static ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z ]+$").expect("alpha pattern"));
static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 ]+$").expect("alphanumeric pattern"));
static HEXADECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]+$").expect("hex pattern"));
static TRACK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9=D]+$").expect("track pattern"));
static AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[CD][0-9]+$").expect("amount pattern"));

/// Content classes from the ISO 8583 field attribute vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    /// `n` - decimal digits
    #[serde(rename = "n")]
    Numeric,
    /// `a` - letters and space
    #[serde(rename = "a")]
    Alpha,
    /// `an` - letters, digits, space
    #[serde(rename = "an")]
    AlphaNumeric,
    /// `ans` - letters, digits, special characters
    #[serde(rename = "ans")]
    AlphaNumericSpecial,
    /// `anp` - letters, digits, space padding
    #[serde(rename = "anp")]
    AlphaNumericPad,
    /// `ns` - digits and special characters
    #[serde(rename = "ns")]
    NumericSpecial,
    /// `b` - binary, represented as hex text in decoded messages
    #[serde(rename = "b")]
    Binary,
    /// `z` - track-2 magnetic stripe data
    #[serde(rename = "z")]
    Track,
    /// `x+n` - amount with a leading credit/debit indicator
    #[serde(rename = "x+n")]
    Amount,
}

impl ContentType {
    /// Content pattern enforced on encode and decode.
    ///
    /// Deliberately permissive classes (`ans`, `anp`, `ns`) return `None`;
    /// anything printable passes for them.
    pub fn pattern(&self) -> Option<&'static Regex> {
        match self {
            ContentType::Numeric => Some(&NUMERIC),
            ContentType::Alpha => Some(&ALPHA),
            ContentType::AlphaNumeric => Some(&ALPHANUMERIC),
            ContentType::Binary => Some(&HEXADECIMAL),
            ContentType::Track => Some(&TRACK),
            ContentType::Amount => Some(&AMOUNT),
            ContentType::AlphaNumericSpecial
            | ContentType::AlphaNumericPad
            | ContentType::NumericSpecial => None,
        }
    }

    /// Binary fields travel as raw bytes (half the hex-text width).
    pub fn is_binary(&self) -> bool {
        matches!(self, ContentType::Binary)
    }
}

/// Length discipline for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthClass {
    /// Exactly `max_len` on the wire
    Fixed,
    /// 2-digit ASCII length prefix
    LlVar,
    /// 3-digit ASCII length prefix
    LllVar,
    /// 4-digit ASCII length prefix
    LlllVar,
    /// 6-digit ASCII length prefix
    LlllllVar,
}

impl LengthClass {
    /// Number of ASCII digits in the length prefix (0 for fixed).
    pub fn prefix_digits(&self) -> usize {
        match self {
            LengthClass::Fixed => 0,
            LengthClass::LlVar => 2,
            LengthClass::LllVar => 3,
            LengthClass::LlllVar => 4,
            LengthClass::LlllllVar => 6,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, LengthClass::Fixed)
    }

    /// Largest length the prefix can express.
    pub fn prefix_ceiling(&self) -> usize {
        match self {
            LengthClass::Fixed => usize::MAX,
            _ => 10usize.pow(self.prefix_digits() as u32) - 1,
        }
    }
}

/// Which side of a fixed field gets the fill character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadDirection {
    Left,
    Right,
}

/// Padding rule for fixed-length fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub direction: PadDirection,
    #[serde(rename = "char")]
    pub ch: char,
}

/// Complete encode/decode recipe for one data element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatDescriptor {
    /// Documentary name ("Primary Account Number")
    pub label: String,
    pub content_type: ContentType,
    pub len_type: LengthClass,
    /// Maximum size in wire characters (hex characters for `b` content)
    pub max_len: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    /// Custom validation pattern overriding the content-type default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
}

impl FormatDescriptor {
    /// Fixed-length descriptor of exactly `len` wire characters.
    pub fn fixed(label: &str, content_type: ContentType, len: usize) -> Self {
        Self {
            label: label.to_string(),
            content_type,
            len_type: LengthClass::Fixed,
            max_len: len,
            min_len: None,
            padding: None,
            validation: None,
        }
    }

    /// Variable-length descriptor with the given prefix class and ceiling.
    pub fn var(label: &str, content_type: ContentType, len_type: LengthClass, max: usize) -> Self {
        Self {
            label: label.to_string(),
            content_type,
            len_type,
            max_len: max,
            min_len: None,
            padding: None,
            validation: None,
        }
    }

    pub fn with_padding(mut self, direction: PadDirection, ch: char) -> Self {
        self.padding = Some(Padding { direction, ch });
        self
    }

    pub fn with_validation(mut self, pattern: &str) -> Self {
        self.validation = Some(pattern.to_string());
        self
    }

    pub fn with_min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }
}

/// How a caller-supplied registry combines with the default catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatStrategy {
    /// Caller entries override matching defaults, the rest stay
    #[default]
    Merge,
    /// Caller registry is used alone
    Replace,
}

/// Field identifier → descriptor lookup table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatRegistry {
    formats: HashMap<String, FormatDescriptor>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, descriptor: FormatDescriptor) {
        self.formats.insert(field.into(), descriptor);
    }

    pub fn get(&self, field: &str) -> Option<&FormatDescriptor> {
        self.formats.get(field)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Overlay `overrides` onto `self`, replacing colliding entries.
    pub fn merged_with(&self, overrides: &FormatRegistry) -> FormatRegistry {
        let mut formats = self.formats.clone();
        for (field, descriptor) in &overrides.formats {
            formats.insert(field.clone(), descriptor.clone());
        }
        FormatRegistry { formats }
    }
}

impl FromIterator<(String, FormatDescriptor)> for FormatRegistry {
    fn from_iter<I: IntoIterator<Item = (String, FormatDescriptor)>>(iter: I) -> Self {
        FormatRegistry {
            formats: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_digits_match_length_class() {
        assert_eq!(LengthClass::Fixed.prefix_digits(), 0);
        assert_eq!(LengthClass::LlVar.prefix_digits(), 2);
        assert_eq!(LengthClass::LllVar.prefix_digits(), 3);
        assert_eq!(LengthClass::LlllVar.prefix_digits(), 4);
        assert_eq!(LengthClass::LlllllVar.prefix_digits(), 6);
        assert_eq!(LengthClass::LlVar.prefix_ceiling(), 99);
        assert_eq!(LengthClass::LlllllVar.prefix_ceiling(), 999_999);
    }

    #[test]
    fn content_patterns_accept_and_reject() {
        assert!(ContentType::Numeric.pattern().unwrap().is_match("0818160244"));
        assert!(!ContentType::Numeric.pattern().unwrap().is_match("AAAA"));
        assert!(ContentType::Binary.pattern().unwrap().is_match("9F2608AB"));
        assert!(!ContentType::Binary.pattern().unwrap().is_match("XYZ"));
        assert!(ContentType::Track.pattern().unwrap().is_match("4242424242424242=2512101"));
        assert!(ContentType::Amount.pattern().unwrap().is_match("C00001000"));
        assert!(ContentType::AlphaNumericSpecial.pattern().is_none());
    }

    #[test]
    fn registry_merge_overrides_colliding_entries() {
        let mut base = FormatRegistry::new();
        base.insert("2", FormatDescriptor::var("PAN", ContentType::Numeric, LengthClass::LlVar, 19));
        base.insert("3", FormatDescriptor::fixed("Processing Code", ContentType::Numeric, 6));

        let mut overrides = FormatRegistry::new();
        overrides.insert("2", FormatDescriptor::var("PAN", ContentType::Numeric, LengthClass::LlVar, 28));

        let merged = base.merged_with(&overrides);
        assert_eq!(merged.get("2").unwrap().max_len, 28);
        assert_eq!(merged.get("3").unwrap().max_len, 6);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn descriptor_deserializes_from_config_json() {
        let descriptor: FormatDescriptor = serde_json::from_str(
            r#"{
                "label": "Primary Account Number",
                "content_type": "n",
                "len_type": "llvar",
                "max_len": 19,
                "validation": "^[0-9]{6,19}$"
            }"#,
        )
        .unwrap();
        assert_eq!(descriptor.content_type, ContentType::Numeric);
        assert_eq!(descriptor.len_type, LengthClass::LlVar);
        assert_eq!(descriptor.validation.as_deref(), Some("^[0-9]{6,19}$"));
    }
}

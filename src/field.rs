//! # Field codec
//!
//! ## Purpose
//!
//! Encodes and decodes a single data element under its format
//! descriptor: fixed versus variable length discipline, ASCII length
//! prefixes, padding, content validation, and the binary (`b`)
//! representation where decoded values are hex text and the wire carries
//! half as many raw bytes.
//!
//! Two layers are exposed. `encode`/`decode` work on decoded text values
//! and perform content conversion and validation. `encode_raw`/
//! `decode_raw` work on already-encoded content bytes and only apply the
//! length discipline; the extension codec uses them to frame composite
//! payloads whose interior bytes are not text.

use crate::bytes::{bytes_to_hex, hex_to_bytes, pad_left, pad_right, take};
use crate::error::{CodecError, CodecResult};
use crate::formats::{FormatDescriptor, PadDirection};
use regex::Regex;
use std::borrow::Cow;

/// Encode one field value under its descriptor.
pub fn encode(field: &str, value: &str, format: &FormatDescriptor) -> CodecResult<Vec<u8>> {
    validate_content(field, value, format)?;
    let value = apply_padding(value, format);
    let size = value.len();
    check_sizes(field, size, format)?;

    let content = if format.content_type.is_binary() {
        hex_to_bytes(&value, field)?
    } else {
        value.into_owned().into_bytes()
    };
    frame(field, size, content, format)
}

/// Frame pre-encoded content bytes under the descriptor's length
/// discipline, without content conversion or pattern validation.
pub fn encode_raw(field: &str, content: &[u8], format: &FormatDescriptor) -> CodecResult<Vec<u8>> {
    let size = content.len();
    check_sizes(field, size, format)?;
    frame(field, size, content.to_vec(), format)
}

/// Decode one field off the front of `data`, returning the value and the
/// remaining payload.
///
/// A missing descriptor yields an empty value without consuming bytes;
/// the walk continues (the caller decides whether that is acceptable).
pub fn decode<'a>(
    field: &str,
    data: &'a [u8],
    format: Option<&FormatDescriptor>,
) -> CodecResult<(String, &'a [u8])> {
    let Some(format) = format else {
        return Ok((String::new(), data));
    };
    let (content, rest) = decode_raw(field, data, format)?;
    let value = if format.content_type.is_binary() {
        bytes_to_hex(content)
    } else {
        std::str::from_utf8(content)
            .map_err(|_| CodecError::InvalidText {
                field: field.to_string(),
            })?
            .to_string()
    };
    if !value.is_empty() {
        validate_content(field, &value, format)?;
    }
    Ok((value, rest))
}

/// Slice one field's wire content off the front of `data` without
/// converting it, returning the content bytes and the remainder.
pub fn decode_raw<'a>(
    field: &str,
    data: &'a [u8],
    format: &FormatDescriptor,
) -> CodecResult<(&'a [u8], &'a [u8])> {
    if format.len_type.is_fixed() {
        let wire = wire_len(field, format.max_len, format)?;
        return take(data, wire, field);
    }

    let digits = format.len_type.prefix_digits();
    let (prefix, rest) = take(data, digits, field)?;
    let declared = parse_length_prefix(field, prefix)?;
    if declared > format.max_len {
        return Err(CodecError::length_exceeded(field, declared, format.max_len));
    }
    if let Some(min) = format.min_len {
        if declared < min {
            return Err(CodecError::LengthBelowMinimum {
                field: field.to_string(),
                size: declared,
                min,
            });
        }
    }
    let wire = wire_len(field, declared, format)?;
    take(rest, wire, field)
}

fn frame(
    field: &str,
    size: usize,
    content: Vec<u8>,
    format: &FormatDescriptor,
) -> CodecResult<Vec<u8>> {
    if format.len_type.is_fixed() {
        return Ok(content);
    }
    if size > format.len_type.prefix_ceiling() {
        return Err(CodecError::format_ambiguous(
            field,
            format!(
                "length {size} cannot be expressed in {} prefix digits",
                format.len_type.prefix_digits()
            ),
        ));
    }
    let mut out = pad_left(&size.to_string(), '0', format.len_type.prefix_digits()).into_bytes();
    out.extend(content);
    Ok(out)
}

fn check_sizes(field: &str, size: usize, format: &FormatDescriptor) -> CodecResult<()> {
    if size > format.max_len {
        return Err(CodecError::length_exceeded(field, size, format.max_len));
    }
    if format.len_type.is_fixed() {
        if size != format.max_len {
            return Err(CodecError::FixedLengthMismatch {
                field: field.to_string(),
                size,
                expected: format.max_len,
            });
        }
    } else if let Some(min) = format.min_len {
        if size < min {
            return Err(CodecError::LengthBelowMinimum {
                field: field.to_string(),
                size,
                min,
            });
        }
    }
    Ok(())
}

fn apply_padding<'a>(value: &'a str, format: &FormatDescriptor) -> Cow<'a, str> {
    match format.padding {
        Some(padding) if format.len_type.is_fixed() => match padding.direction {
            PadDirection::Left => Cow::Owned(pad_left(value, padding.ch, format.max_len)),
            PadDirection::Right => Cow::Owned(pad_right(value, padding.ch, format.max_len)),
        },
        _ => Cow::Borrowed(value),
    }
}

fn validate_content(field: &str, value: &str, format: &FormatDescriptor) -> CodecResult<()> {
    if let Some(pattern) = &format.validation {
        let re = Regex::new(pattern)
            .map_err(|e| CodecError::format_ambiguous(field, format!("bad validation pattern: {e}")))?;
        if !re.is_match(value) {
            return Err(CodecError::validation_failed(field, value, pattern));
        }
        return Ok(());
    }
    if let Some(re) = format.content_type.pattern() {
        if !re.is_match(value) {
            return Err(CodecError::validation_failed(field, value, re.as_str()));
        }
    }
    Ok(())
}

fn parse_length_prefix(field: &str, prefix: &[u8]) -> CodecResult<usize> {
    std::str::from_utf8(prefix)
        .ok()
        .filter(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| CodecError::InvalidLengthPrefix {
            field: field.to_string(),
            prefix: String::from_utf8_lossy(prefix).into_owned(),
        })
}

/// Wire width in bytes for `chars` decoded characters of this content
/// class. Binary content occupies half its hex-text width.
fn wire_len(field: &str, chars: usize, format: &FormatDescriptor) -> CodecResult<usize> {
    if format.content_type.is_binary() {
        if chars % 2 != 0 {
            return Err(CodecError::format_ambiguous(
                field,
                format!("binary width {chars} is not an even number of hex digits"),
            ));
        }
        Ok(chars / 2)
    } else {
        Ok(chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{ContentType, FormatDescriptor, LengthClass, PadDirection};

    fn n_fixed(len: usize) -> FormatDescriptor {
        FormatDescriptor::fixed("test", ContentType::Numeric, len)
    }

    fn ans_llvar(max: usize) -> FormatDescriptor {
        FormatDescriptor::var("test", ContentType::AlphaNumericSpecial, LengthClass::LlVar, max)
    }

    fn n_llvar(max: usize) -> FormatDescriptor {
        FormatDescriptor::var("test", ContentType::Numeric, LengthClass::LlVar, max)
    }

    #[test]
    fn fixed_numeric_round_trip() {
        let format = n_fixed(6);
        let wire = encode("11", "646465", &format).unwrap();
        assert_eq!(wire, b"646465");
        let (value, rest) = decode("11", &wire, Some(&format)).unwrap();
        assert_eq!(value, "646465");
        assert!(rest.is_empty());
    }

    #[test]
    fn llvar_prefix_counts_value_bytes() {
        let format = ans_llvar(25);
        let wire = encode("44", "APPROVED", &format).unwrap();
        assert_eq!(wire, b"08APPROVED");
        let (value, rest) = decode("44", b"08APPROVEDtrailing", Some(&format)).unwrap();
        assert_eq!(value, "APPROVED");
        assert_eq!(rest, b"trailing");
    }

    #[test]
    fn lllvar_and_llllllvar_prefix_widths() {
        let lll = FormatDescriptor::var("test", ContentType::AlphaNumericSpecial, LengthClass::LllVar, 999);
        assert_eq!(encode("48", "AB", &lll).unwrap(), b"002AB");

        let llllll =
            FormatDescriptor::var("test", ContentType::AlphaNumericSpecial, LengthClass::LlllllVar, 999_999);
        assert_eq!(encode("127", "XY", &llllll).unwrap(), b"000002XY");
    }

    #[test]
    fn binary_fixed_packs_hex_to_raw_bytes() {
        let format = FormatDescriptor::fixed("MAC", ContentType::Binary, 16);
        let wire = encode("64", "9F2608AB01020304", &format).unwrap();
        assert_eq!(wire, vec![0x9F, 0x26, 0x08, 0xAB, 0x01, 0x02, 0x03, 0x04]);

        let (value, rest) = decode("64", &wire, Some(&format)).unwrap();
        assert_eq!(value, "9F2608AB01020304");
        assert!(rest.is_empty());
    }

    #[test]
    fn binary_variable_prefix_counts_hex_characters() {
        let format = FormatDescriptor::var("ICC", ContentType::Binary, LengthClass::LllVar, 64);
        let wire = encode("55", "CAFE", &format).unwrap();
        assert_eq!(wire, vec![b'0', b'0', b'4', 0xCA, 0xFE]);

        let (value, rest) = decode("55", &wire, Some(&format)).unwrap();
        assert_eq!(value, "CAFE");
        assert!(rest.is_empty());
    }

    #[test]
    fn padding_applies_to_fixed_fields_only() {
        let format = n_fixed(6).with_padding(PadDirection::Left, '0');
        assert_eq!(encode("11", "123", &format).unwrap(), b"000123");

        let right = FormatDescriptor::fixed("test", ContentType::AlphaNumericSpecial, 5)
            .with_padding(PadDirection::Right, ' ');
        assert_eq!(encode("98", "AB", &right).unwrap(), b"AB   ");
    }

    #[test]
    fn content_validation_rejects_nonconforming_values() {
        let err = encode("2", "AAAA", &n_llvar(19)).unwrap_err();
        match err {
            CodecError::ValidationFailed { field, value, .. } => {
                assert_eq!(field, "2");
                assert_eq!(value, "AAAA");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn custom_validation_overrides_content_pattern() {
        let format = ans_llvar(20).with_validation("^[0-9]{4}$");
        assert!(encode("62", "1234", &format).is_ok());
        assert!(matches!(
            encode("62", "12345", &format),
            Err(CodecError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn oversized_values_are_rejected_before_emission() {
        let err = encode("44", "ABCDEF", &ans_llvar(4)).unwrap_err();
        assert_eq!(err, CodecError::length_exceeded("44", 6, 4));
    }

    #[test]
    fn fixed_values_must_fill_the_slot() {
        let err = encode("11", "123", &n_fixed(6)).unwrap_err();
        assert!(matches!(err, CodecError::FixedLengthMismatch { .. }));
    }

    #[test]
    fn minimum_length_is_enforced_for_variable_fields() {
        let format = ans_llvar(20).with_min_len(4);
        assert!(matches!(
            encode("62", "AB", &format),
            Err(CodecError::LengthBelowMinimum { .. })
        ));
        assert!(matches!(
            decode("62", b"02AB", Some(&format)),
            Err(CodecError::LengthBelowMinimum { .. })
        ));
    }

    #[test]
    fn decode_without_descriptor_leaves_field_empty() {
        let (value, rest) = decode("113", b"UNTOUCHED", None).unwrap();
        assert_eq!(value, "");
        assert_eq!(rest, b"UNTOUCHED");
    }

    #[test]
    fn malformed_length_prefix_is_reported() {
        let err = decode("44", b"XYdata", Some(&ans_llvar(25))).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidLengthPrefix {
                field: "44".to_string(),
                prefix: "XY".to_string(),
            }
        );
    }

    #[test]
    fn declared_length_beyond_maximum_is_rejected() {
        let err = decode("44", b"99data", Some(&ans_llvar(25))).unwrap_err();
        assert_eq!(err, CodecError::length_exceeded("44", 99, 25));
    }

    #[test]
    fn truncated_payload_surfaces_invalid_length() {
        let err = decode("11", b"12", Some(&n_fixed(6))).unwrap_err();
        assert!(matches!(err, CodecError::InvalidLength { .. }));
    }
}

//! # Bitmap engine
//!
//! ## Purpose
//!
//! Builds presence bitmaps from a message's field keys and walks received
//! bitmaps to drive field extraction. Bit `i` (0-based) corresponds to
//! field `i + 1`. Positions 0 and 64 are bitmap-continuation markers
//! (secondary and tertiary presence) and never map to data; position 128
//! is likewise continuation when a tertiary segment exists. Position 63
//! (field 64) is ordinary data and is never skipped.
//!
//! Bitmaps are built and walked as uppercase hex text; the wire
//! representation (packed bytes or ASCII hex) is a framing concern owned
//! by the message codec.

use crate::bytes::{bitmap_bits, bytes_to_hex, take};
use crate::config::BitmapEncoding;
use crate::error::{CodecError, CodecResult};

/// Bits per bitmap segment.
pub const SEGMENT_BITS: usize = 64;

/// Hex characters per bitmap segment.
pub const SEGMENT_HEX: usize = 16;

/// Presence bits for every key of the form `prefix` + decimal `k`
/// (1 ≤ k ≤ `width`); bit `k - 1` is set for each such key.
///
/// Keys that extend past the sub-element number (`"127.25.4"` against
/// prefix `"127."`) do not register; presence of the composite itself is
/// the caller's concern.
pub fn presence_bits<'a>(
    keys: impl Iterator<Item = &'a str>,
    prefix: &str,
    width: usize,
) -> Vec<bool> {
    let mut bits = vec![false; width];
    for key in keys {
        let Some(rest) = key.strip_prefix(prefix) else {
            continue;
        };
        let Ok(n) = rest.parse::<usize>() else {
            continue;
        };
        if (1..=width).contains(&n) {
            bits[n - 1] = true;
        }
    }
    bits
}

/// Render bits as uppercase hex, four bits per character MSB-first.
pub fn to_hex(bits: &[bool]) -> String {
    let mut out = String::with_capacity(bits.len() / 4 + 1);
    for chunk in bits.chunks(4) {
        let mut nibble = 0u32;
        for (i, bit) in chunk.iter().enumerate() {
            if *bit {
                nibble |= 1 << (3 - i);
            }
        }
        out.push(char::from_digit(nibble, 16).expect("nibble in range").to_ascii_uppercase());
    }
    out
}

/// Field numbers whose bits are set, in ascending order, with the
/// continuation positions (0, 64, and 128) excluded.
pub fn walk(bitmap_hex: &str) -> CodecResult<Vec<usize>> {
    let bits = bitmap_bits(bitmap_hex)?;
    let mut fields = Vec::new();
    for (index, bit) in bits.iter().enumerate() {
        if !bit || index == 0 || index == 64 || index == 128 {
            continue;
        }
        fields.push(index + 1);
    }
    Ok(fields)
}

/// Read the chained bitmap segments off the front of `payload`.
///
/// One 64-bit segment is always present; its first bit announces a
/// secondary segment, whose first bit in turn announces a tertiary.
/// Returns the combined hex text (16/32/48 characters) and the rest of
/// the payload.
pub fn extract(payload: &[u8], encoding: BitmapEncoding) -> CodecResult<(String, &[u8])> {
    let (mut hex, mut rest) = read_segment(payload, encoding)?;
    if leading_bit_set(&hex) {
        let (secondary, after) = read_segment(rest, encoding)?;
        rest = after;
        let chain_tertiary = leading_bit_set(&secondary);
        hex.push_str(&secondary);
        if chain_tertiary {
            let (tertiary, after) = read_segment(rest, encoding)?;
            rest = after;
            hex.push_str(&tertiary);
        }
    }
    Ok((hex, rest))
}

fn read_segment(payload: &[u8], encoding: BitmapEncoding) -> CodecResult<(String, &[u8])> {
    let width = encoding.segment_width();
    let (segment, rest) = take(payload, width, "bitmap segment").map_err(|_| {
        CodecError::BitmapExtractionFailed {
            need: width,
            got: payload.len(),
        }
    })?;
    let hex = match encoding {
        BitmapEncoding::Hex => bytes_to_hex(segment),
        BitmapEncoding::Ascii => std::str::from_utf8(segment)
            .map_err(|_| CodecError::invalid_hex("bitmap", "non-ASCII segment"))?
            .to_ascii_uppercase(),
    };
    Ok((hex, rest))
}

fn leading_bit_set(hex: &str) -> bool {
    hex.chars()
        .next()
        .and_then(|c| c.to_digit(16))
        .map(|n| n >= 8)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_with_bits(total_bits: usize, set: &[usize]) -> String {
        let mut bits = vec![false; total_bits];
        for &i in set {
            bits[i] = true;
        }
        to_hex(&bits)
    }

    #[test]
    fn presence_bits_parse_prefixed_keys_exactly() {
        let keys = ["2", "7", "70", "127.2", "127.25", "127.25.4", "0", "129"];
        let top = presence_bits(keys.iter().copied(), "", 128);
        assert!(top[1] && top[6] && top[69]);
        assert!(!top[0], "field 0 never registers");
        assert!(!top[126], "dotted keys never register at top level");

        let inner = presence_bits(keys.iter().copied(), "127.", 64);
        assert!(inner[1] && inner[24]);
        assert!(!inner[3], "127.25.4 must not register as 127.4");
    }

    #[test]
    fn to_hex_renders_msb_first_uppercase() {
        let hex = hex_with_bits(64, &[0, 1, 6, 10, 11, 12]);
        assert_eq!(hex, "C238000000000000");
    }

    #[test]
    fn walk_skips_continuation_position_0() {
        let hex = hex_with_bits(128, &[0, 1]);
        assert_eq!(walk(&hex).unwrap(), vec![2]);
    }

    #[test]
    fn walk_keeps_field_63() {
        let hex = hex_with_bits(128, &[62]);
        assert_eq!(walk(&hex).unwrap(), vec![63]);
    }

    #[test]
    fn walk_keeps_field_64() {
        // Position 63 is a data element, not a continuation marker.
        let hex = hex_with_bits(128, &[63]);
        assert_eq!(walk(&hex).unwrap(), vec![64]);
    }

    #[test]
    fn walk_skips_continuation_position_64() {
        let hex = hex_with_bits(128, &[64, 65]);
        assert_eq!(walk(&hex).unwrap(), vec![66]);
    }

    #[test]
    fn walk_keeps_field_128_and_skips_position_128() {
        let hex = hex_with_bits(192, &[127, 128, 129]);
        assert_eq!(walk(&hex).unwrap(), vec![128, 130]);
    }

    #[test]
    fn extract_reads_a_single_packed_segment() {
        let mut payload = hex::decode("7238000000000400").unwrap();
        payload.extend_from_slice(b"rest");
        let (hex_text, rest) = extract(&payload, BitmapEncoding::Hex).unwrap();
        assert_eq!(hex_text, "7238000000000400");
        assert_eq!(rest, b"rest");
    }

    #[test]
    fn extract_chains_secondary_and_tertiary() {
        let mut payload = hex::decode("8238000000000000").unwrap();
        payload.extend_from_slice(&hex::decode("8400000000000000").unwrap());
        payload.extend_from_slice(&hex::decode("0000000000000001").unwrap());
        let (hex_text, rest) = extract(&payload, BitmapEncoding::Hex).unwrap();
        assert_eq!(hex_text.len(), 48);
        assert!(hex_text.starts_with("8238"));
        assert!(hex_text.ends_with("01"));
        assert!(rest.is_empty());
    }

    #[test]
    fn extract_reads_ascii_segments() {
        let mut payload = b"8238000000000000".to_vec();
        payload.extend_from_slice(b"0400000000000000");
        let (hex_text, rest) = extract(&payload, BitmapEncoding::Ascii).unwrap();
        assert_eq!(hex_text, "82380000000000000400000000000000");
        assert!(rest.is_empty());
    }

    #[test]
    fn extract_fails_on_truncated_segment() {
        let payload = hex::decode("8238").unwrap();
        let err = extract(&payload, BitmapEncoding::Hex).unwrap_err();
        assert_eq!(err, CodecError::BitmapExtractionFailed { need: 8, got: 2 });
    }
}

//! Byte-level primitives shared by every layer of the codec
//!
//! Checked slicing, hex conversion, bitmap bit iteration, padding, field
//! identifier construction, and the 2-byte TCP length header. All
//! operations are bounds-checked and total; nothing here panics on
//! malformed wire input.

use crate::error::{CodecError, CodecResult};

/// Split `payload` into its first `length` bytes and the remainder.
///
/// The `context` string ends up in the error when the payload is short;
/// callers pass the field identifier or framing stage being read.
pub fn take<'a>(payload: &'a [u8], length: usize, context: &str) -> CodecResult<(&'a [u8], &'a [u8])> {
    if length > payload.len() {
        return Err(CodecError::invalid_length(length, payload.len(), context));
    }
    Ok(payload.split_at(length))
}

/// Uppercase hex text for a byte slice.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decode hex text to raw bytes. Strict: even length, hex digits only.
pub fn hex_to_bytes(text: &str, context: &str) -> CodecResult<Vec<u8>> {
    hex::decode(text).map_err(|e| CodecError::invalid_hex(context, e.to_string()))
}

/// Expand hex text into its bit sequence, MSB-first per nibble.
///
/// `"82"` becomes `[1,0,0,0, 0,0,1,0]`. The result always has
/// `4 * text.len()` entries.
pub fn bitmap_bits(text: &str) -> CodecResult<Vec<bool>> {
    let mut bits = Vec::with_capacity(text.len() * 4);
    for ch in text.chars() {
        let nibble = ch
            .to_digit(16)
            .ok_or_else(|| CodecError::invalid_hex("bitmap", format!("non-hex digit {ch:?}")))?;
        for shift in (0..4).rev() {
            bits.push(nibble & (1 << shift) != 0);
        }
    }
    Ok(bits)
}

/// Left-pad `s` with `ch` up to `width`. Never truncates.
pub fn pad_left(s: &str, ch: char, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat(ch).take(width - len));
    out.push_str(s);
    out
}

/// Right-pad `s` with `ch` up to `width`. Never truncates.
pub fn pad_right(s: &str, ch: char, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(width);
    out.push_str(s);
    out.extend(std::iter::repeat(ch).take(width - len));
    out
}

/// Build the identifier string for sub-element `n` under `prefix`.
///
/// `construct_field(25, "127.")` is `"127.25"`; an empty prefix yields
/// the top-level identifier.
pub fn construct_field(n: usize, prefix: &str) -> String {
    format!("{prefix}{n}")
}

/// Two-byte big-endian length header for `data`.
pub fn encode_tcp_header(data: &[u8]) -> CodecResult<[u8; 2]> {
    let len = data.len();
    if len > u16::MAX as usize {
        return Err(CodecError::invalid_length(
            len,
            u16::MAX as usize,
            "tcp length header",
        ));
    }
    Ok([(len >> 8) as u8, (len & 0xFF) as u8])
}

/// Read the two-byte big-endian length header; returns the declared
/// length and the remaining payload.
pub fn extract_tcp_header(payload: &[u8]) -> CodecResult<(usize, &[u8])> {
    let (head, rest) = take(payload, 2, "tcp length header")?;
    Ok((usize::from(head[0]) * 256 + usize::from(head[1]), rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_splits_and_bounds_checks() {
        let data = b"HELLO";
        let (head, tail) = take(data, 2, "test").unwrap();
        assert_eq!(head, b"HE");
        assert_eq!(tail, b"LLO");

        let err = take(data, 6, "test").unwrap_err();
        assert_eq!(
            err,
            CodecError::invalid_length(6, 5, "test"),
        );
    }

    #[test]
    fn hex_round_trip_is_uppercase_and_strict() {
        assert_eq!(bytes_to_hex(&[0x82, 0x38, 0x00]), "823800");
        assert_eq!(hex_to_bytes("823800", "test").unwrap(), vec![0x82, 0x38, 0x00]);
        assert_eq!(hex_to_bytes("ab04", "test").unwrap(), vec![0xAB, 0x04]);
        assert!(hex_to_bytes("ABC", "test").is_err());
        assert!(hex_to_bytes("GG", "test").is_err());
    }

    #[test]
    fn bitmap_bits_expand_msb_first() {
        let bits = bitmap_bits("82").unwrap();
        assert_eq!(
            bits,
            vec![true, false, false, false, false, false, true, false]
        );
        assert_eq!(bitmap_bits("8238000000000400").unwrap().len(), 64);
        assert!(bitmap_bits("8Z").is_err());
    }

    #[test]
    fn padding_never_truncates() {
        assert_eq!(pad_left("7", '0', 3), "007");
        assert_eq!(pad_left("1234", '0', 3), "1234");
        assert_eq!(pad_right("AB", ' ', 4), "AB  ");
    }

    #[test]
    fn field_names_carry_the_prefix() {
        assert_eq!(construct_field(2, ""), "2");
        assert_eq!(construct_field(25, "127."), "127.25");
        assert_eq!(construct_field(7, "127.25."), "127.25.7");
    }

    #[test]
    fn tcp_header_is_symmetric_big_endian() {
        let data = vec![0u8; 49];
        let header = encode_tcp_header(&data).unwrap();
        assert_eq!(header, [0x00, 0x31]);

        let mut framed = header.to_vec();
        framed.extend_from_slice(&data);
        let (declared, rest) = extract_tcp_header(&framed).unwrap();
        assert_eq!(declared, 49);
        assert_eq!(rest.len(), 49);

        let big = vec![0u8; 0x0102];
        assert_eq!(encode_tcp_header(&big).unwrap(), [0x01, 0x02]);
    }
}

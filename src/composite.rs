//! # Composite codec for DE 120 (client-specific "PPN" layout)
//!
//! ## Purpose
//!
//! DE 120 carries a tag-length-value sequence rather than a bitmap: each
//! record is a 3-digit tag, a 3-digit decimal length, then that many
//! bytes of value. Packing always emits records in the canonical tag
//! order below, independent of insertion order; unpacking accepts any
//! order and terminates at end of input.
//!
//! The declared length always governs the value width, including for
//! tags 047, 050 and 056 whose historical peers hard-coded widths.
//!
//! The layout is pluggable behind [`SubElementCodec`]; `codec_for`
//! resolves a client tag to its implementation, with PPN as the shipped
//! layout.

use crate::bytes::{pad_left, take};
use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::message::FieldMap;
use tracing::debug;

/// Canonical PPN sub-field table: wire tag, sub-field identifier, label.
/// Pack order is table order.
pub const PPN_TAGS: &[(&str, &str, &str)] = &[
    ("001", "120.1", "Transaction Type"),
    ("045", "120.45", "Remitter Name"),
    ("046", "120.46", "Beneficiary Name"),
    ("047", "120.47", "Original Transaction Detail"),
    ("050", "120.50", "Remitter Proc Info"),
    ("056", "120.56", "Channel Indicator"),
    ("062", "120.62", "Beneficiary Account Number"),
    ("070", "120.70", "Remitter Address"),
    ("071", "120.71", "Remitter SWIFT Code"),
    ("072", "120.72", "Beneficiary Address"),
    ("073", "120.73", "Beneficiary SWIFT Code"),
    ("074", "120.74", "Transaction Reason"),
    ("075", "120.75", "Remitter Transaction Reference"),
];

/// Largest value a 3-digit length can declare.
const MAX_VALUE_LEN: usize = 999;

/// A client-specific sub-element layout for a composite data element.
pub trait SubElementCodec: Send + Sync {
    /// Serialize the recognized sub-fields of `fields` to wire bytes.
    fn pack(&self, fields: &FieldMap) -> CodecResult<Vec<u8>>;
    /// Parse wire bytes back into a sub-field map.
    fn unpack(&self, data: &[u8]) -> CodecResult<FieldMap>;
}

/// The PPN tag-length-value layout for DE 120.
#[derive(Debug, Default)]
pub struct PpnCodec;

static PPN_CODEC: PpnCodec = PpnCodec;

/// Resolve a client tag to its sub-element codec.
pub fn codec_for(client: &str) -> Option<&'static dyn SubElementCodec> {
    if client.eq_ignore_ascii_case("ppn") {
        Some(&PPN_CODEC)
    } else {
        None
    }
}

impl SubElementCodec for PpnCodec {
    fn pack(&self, fields: &FieldMap) -> CodecResult<Vec<u8>> {
        let mut out = Vec::new();
        for (tag, key, _) in PPN_TAGS {
            let Some(value) = fields.get(*key) else {
                continue;
            };
            if value.len() > MAX_VALUE_LEN {
                return Err(CodecError::length_exceeded(*key, value.len(), MAX_VALUE_LEN));
            }
            out.extend_from_slice(tag.as_bytes());
            out.extend(pad_left(&value.len().to_string(), '0', 3).into_bytes());
            out.extend_from_slice(value.as_bytes());
        }
        Ok(out)
    }

    fn unpack(&self, data: &[u8]) -> CodecResult<FieldMap> {
        let mut fields = FieldMap::new();
        let mut rest = data;
        while !rest.is_empty() {
            let remaining = rest;
            let (tag_bytes, after_tag) = take(remaining, 3, "composite tag")
                .map_err(|_| truncated("", remaining))?;
            let tag = String::from_utf8_lossy(tag_bytes).into_owned();

            let Some((_, key, _)) = PPN_TAGS.iter().find(|(t, _, _)| *t == tag) else {
                return Err(truncated(&tag, remaining));
            };

            let (len_bytes, after_len) =
                take(after_tag, 3, "composite length").map_err(|_| truncated(&tag, remaining))?;
            let declared = parse_declared_length(len_bytes).ok_or_else(|| truncated(&tag, remaining))?;

            let (value_bytes, after_value) =
                take(after_len, declared, "composite value").map_err(|_| truncated(&tag, remaining))?;
            let value = std::str::from_utf8(value_bytes).map_err(|_| CodecError::InvalidText {
                field: key.to_string(),
            })?;

            fields.insert(key.to_string(), value.to_string());
            rest = after_value;
        }
        Ok(fields)
    }
}

fn parse_declared_length(len_bytes: &[u8]) -> Option<usize> {
    let text = std::str::from_utf8(len_bytes).ok()?;
    if text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

fn truncated(tag: &str, remaining: &[u8]) -> CodecError {
    CodecError::composite_data(tag, String::from_utf8_lossy(remaining).into_owned())
}

/// Serialize the client-specific sub-fields of `message` for `field`.
pub fn encode_field(
    client: &str,
    field: &str,
    message: &FieldMap,
    config: &CodecConfig,
) -> CodecResult<Vec<u8>> {
    let codec = resolve(client, field)?;
    let packed = codec.pack(message)?;
    if config.de_detail {
        debug!("DE {field} packed for client {client}: {} bytes", packed.len());
    }
    Ok(packed)
}

/// Parse a client-specific composite payload back into sub-fields.
pub fn decode_field(
    client: &str,
    field: &str,
    data: &[u8],
    config: &CodecConfig,
) -> CodecResult<FieldMap> {
    let codec = resolve(client, field)?;
    let fields = codec.unpack(data)?;
    if config.de_detail {
        debug!("DE {field} unpacked for client {client}: {} sub-fields", fields.len());
    }
    Ok(fields)
}

fn resolve(client: &str, field: &str) -> CodecResult<&'static dyn SubElementCodec> {
    if field != "120" {
        return Err(CodecError::format_ambiguous(
            field,
            format!("client {client:?} defines no sub-element layout for this field"),
        ));
    }
    codec_for(client).ok_or_else(|| {
        CodecError::format_ambiguous(field, format!("unknown client tag {client:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FieldMap {
        [
            ("120.1", "ABC"),
            ("120.45", "JOHN"),
            ("120.70", "12345"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn unpack_reads_tag_length_value_records() {
        let fields = PpnCodec.unpack(b"001003ABC045004JOHN07000512345").unwrap();
        assert_eq!(fields, sample());
    }

    #[test]
    fn pack_emits_canonical_tag_order() {
        // 056 slots between 045 and 070 per the tag table.
        let mut fields = sample();
        fields.insert("120.56".to_string(), "MOB".to_string());
        let packed = PpnCodec.pack(&fields).unwrap();
        assert_eq!(
            packed,
            b"001003ABC045004JOHN056003MOB07000512345".to_vec()
        );
    }

    #[test]
    fn pack_unpack_round_trip() {
        let mut fields = FieldMap::new();
        for (_, key, _) in PPN_TAGS {
            fields.insert(key.to_string(), format!("V-{key}"));
        }
        let packed = PpnCodec.pack(&fields).unwrap();
        assert_eq!(PpnCodec.unpack(&packed).unwrap(), fields);
    }

    #[test]
    fn declared_length_wins_for_historically_fixed_tags() {
        // 047 once had a hard-coded width of 36; the declared length rules.
        let fields = PpnCodec.unpack(b"047005SHORT056001X").unwrap();
        assert_eq!(fields.get("120.47").map(String::as_str), Some("SHORT"));
        assert_eq!(fields.get("120.56").map(String::as_str), Some("X"));
    }

    #[test]
    fn unknown_tag_reports_the_remaining_buffer() {
        let err = PpnCodec.unpack(b"001003ABC999004JUNK").unwrap_err();
        assert_eq!(
            err,
            CodecError::composite_data("999", "999004JUNK")
        );
    }

    #[test]
    fn truncated_record_is_invalid_composite_data() {
        let err = PpnCodec.unpack(b"045010JO").unwrap_err();
        assert!(matches!(err, CodecError::InvalidCompositeData { tag, .. } if tag == "045"));

        let err = PpnCodec.unpack(b"04").unwrap_err();
        assert!(matches!(err, CodecError::InvalidCompositeData { .. }));
    }

    #[test]
    fn client_resolution_is_case_insensitive_and_scoped_to_de_120() {
        let config = CodecConfig::default();
        assert!(encode_field("PPN", "120", &sample(), &config).is_ok());
        assert!(matches!(
            encode_field("ppn", "121", &sample(), &config),
            Err(CodecError::FormatAmbiguous { .. })
        ));
        assert!(matches!(
            encode_field("acme", "120", &sample(), &config),
            Err(CodecError::FormatAmbiguous { .. })
        ));
    }
}

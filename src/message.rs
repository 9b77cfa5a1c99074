//! # Message codec
//!
//! ## Purpose
//!
//! Top-level orchestration of the wire format: optional 2-byte TCP
//! length header, optional static meta prefix, 4-byte MTI, chained
//! bitmap segments, then one field encoding per set bit. Encode and
//! decode are exact mirrors; a message that encodes cleanly decodes back
//! to the same map.
//!
//! ```text
//! [tcp_len(2B)] [static_meta] [mti(4B)] [bitmaps] [field bytes ...]
//! ```
//!
//! The codec holds no state between calls; all options arrive in the
//! [`CodecConfig`] and the format registry is a read-only input.

use crate::bitmap;
use crate::bytes;
use crate::config::{BitmapEncoding, CodecConfig};
use crate::error::{CodecError, CodecResult};
use crate::extension;
use crate::field;
use crate::mti;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A structured ISO 8583 message: field identifier → decoded value.
///
/// Identifiers are `"0"` (the MTI), `"1"`–`"128"`, and the composite
/// sub-element forms `"127.N"` / `"127.25.N"`. Binary (`b`) values are
/// uppercase hex text.
pub type FieldMap = BTreeMap<String, String>;

/// Encode a structured message to its wire representation.
pub fn encode(message: &FieldMap, config: &CodecConfig) -> CodecResult<Vec<u8>> {
    let registry = config.registry();
    let mti = mti::from_message(message)?;

    // Composite expansion: innermost first, so DE 127 sees the encoded
    // DE 127.25 as one of its own sub-elements.
    let mut pre_encoded: HashMap<String, Vec<u8>> = HashMap::new();
    if extension::has_subfields(message, extension::DE127_25_PREFIX) {
        let inner = extension::encode_composite(
            message,
            extension::DE127_25_PREFIX,
            &registry,
            &HashMap::new(),
        )?;
        pre_encoded.insert("127.25".to_string(), inner);
    }
    if extension::has_subfields(message, extension::DE127_PREFIX)
        || pre_encoded.contains_key("127.25")
    {
        let content =
            extension::encode_composite(message, extension::DE127_PREFIX, &registry, &pre_encoded)?;
        pre_encoded.insert("127".to_string(), content);
    }

    let keys = message
        .keys()
        .map(String::as_str)
        .chain(pre_encoded.keys().map(String::as_str));
    let mut bits = bitmap::presence_bits(keys, "", 2 * bitmap::SEGMENT_BITS);
    bits[0] = true; // secondary bitmap always travels
    bits[64] = false; // no tertiary segment is ever emitted
    if message.contains_key("127.1") {
        bits[126] = true;
    }
    let bitmap_hex = bitmap::to_hex(&bits);

    let mut body = Vec::new();
    body.extend_from_slice(mti.as_bytes());
    match config.bitmap_encoding {
        BitmapEncoding::Hex => body.extend(bytes::hex_to_bytes(&bitmap_hex, "bitmap")?),
        BitmapEncoding::Ascii => body.extend_from_slice(bitmap_hex.as_bytes()),
    }

    for field_no in bitmap::walk(&bitmap_hex)? {
        let id = field_no.to_string();
        let descriptor = registry
            .get(&id)
            .ok_or_else(|| CodecError::unknown_field(&id))?;
        let emitted = if let Some(content) = pre_encoded.get(&id) {
            field::encode_raw(&id, content, descriptor)?
        } else {
            let value = message
                .get(&id)
                .ok_or_else(|| CodecError::unknown_field(&id))?;
            field::encode(&id, value, descriptor)?
        };
        if config.de_detail {
            debug!("DE {id} ({}) encoded as {} bytes", descriptor.label, emitted.len());
        }
        body.extend(emitted);
    }

    let mut out = Vec::new();
    if let Some(meta) = &config.static_meta {
        out.extend_from_slice(meta);
    }
    out.extend(body);

    if config.tcp_len_header {
        let header = bytes::encode_tcp_header(&out)?;
        let mut framed = Vec::with_capacity(out.len() + 2);
        framed.extend_from_slice(&header);
        framed.extend(out);
        return Ok(framed);
    }
    Ok(out)
}

/// Decode a wire payload back into a structured message.
///
/// Composites are re-expanded: a present DE 127 comes back as `127.*`
/// keys (and a nested DE 127.25 as `127.25.*`), never as raw content.
pub fn decode(payload: &[u8], config: &CodecConfig) -> CodecResult<FieldMap> {
    let registry = config.registry();
    let mut data = payload;

    if config.tcp_len_header {
        let (declared, rest) = bytes::extract_tcp_header(data)?;
        // Advisory only; framing is re-derived from the bitmap walk.
        if declared != rest.len() {
            debug!(
                "tcp length header declares {declared} bytes, payload carries {}",
                rest.len()
            );
        }
        data = rest;
    }
    if let Some(meta) = &config.static_meta {
        let (_, rest) = bytes::take(data, meta.len(), "static meta")?;
        data = rest;
    }

    let (mti_bytes, rest) = bytes::take(data, 4, "mti")?;
    data = rest;
    let mti_text = std::str::from_utf8(mti_bytes).map_err(|_| CodecError::MtiInvalid {
        mti: String::from_utf8_lossy(mti_bytes).into_owned(),
    })?;
    mti::validate(mti_text)?;

    let (bitmap_hex, rest) = bitmap::extract(data, config.bitmap_encoding)?;
    data = rest;

    let mut fields = FieldMap::new();
    for field_no in bitmap::walk(&bitmap_hex)? {
        let id = field_no.to_string();
        if config.de_detail {
            debug!("decoding DE {id}");
        }
        if id == "127" {
            match registry.get(&id) {
                Some(descriptor) => {
                    let (content, after) = field::decode_raw(&id, data, descriptor)?;
                    data = after;
                    fields.extend(extension::decode_composite(
                        content,
                        extension::DE127_PREFIX,
                        &registry,
                    )?);
                }
                None => {
                    fields.insert(id, String::new());
                }
            }
        } else {
            let (value, after) = field::decode(&id, data, registry.get(&id))?;
            data = after;
            fields.insert(id, value);
        }
    }

    fields.insert("0".to_string(), mti_text.to_string());
    Ok(fields)
}

/// Validate a structured message against the registry without emitting
/// bytes. Returns the message unchanged on success.
pub fn valid(message: &FieldMap, config: &CodecConfig) -> CodecResult<FieldMap> {
    let registry = config.registry();
    mti::from_message(message)?;
    for (key, value) in message {
        if key == "0" {
            continue;
        }
        match registry.get(key) {
            Some(descriptor) => {
                field::encode(key, value, descriptor)?;
            }
            // Client-specific sub-fields (e.g. 120.x) validate through
            // their own codec; a bare unknown element is an error.
            None if key.contains('.') => {}
            None => return Err(CodecError::unknown_field(key)),
        }
    }
    Ok(message.clone())
}

/// Decode-and-validate a wire payload; decoding applies every format
/// check, so a successful decode is the validation.
pub fn valid_bytes(payload: &[u8], config: &CodecConfig) -> CodecResult<FieldMap> {
    decode(payload, config)
}

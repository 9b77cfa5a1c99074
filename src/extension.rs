//! # Extension codec for DE 127 and DE 127.25
//!
//! ## Purpose
//!
//! Both composites are self-contained inner messages: a 64-bit bitmap as
//! 16 hex characters followed by the concatenated sub-field encodings.
//! This module is the same bitmap-walk engine as the top level, invoked
//! with a different field-identifier prefix; it is not an independent
//! parser.
//!
//! The composite's own length prefix (`llllllvar` for DE 127, `lllvar`
//! for DE 127.25) is applied by the *enclosing* field walk from the
//! composite's descriptor. `encode_127`/`encode_127_25` therefore return
//! the un-prefixed content, and the decode twins consume exactly that.

use crate::bitmap;
use crate::bytes::{construct_field, take};
use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::field;
use crate::formats::FormatRegistry;
use crate::message::FieldMap;
use std::collections::HashMap;

/// Identifier prefix for DE 127 sub-elements.
pub(crate) const DE127_PREFIX: &str = "127.";

/// Identifier prefix for DE 127.25 sub-elements.
pub(crate) const DE127_25_PREFIX: &str = "127.25.";

/// Does the message carry any sub-element of the composite at `prefix`?
pub(crate) fn has_subfields(message: &FieldMap, prefix: &str) -> bool {
    bitmap::presence_bits(message.keys().map(String::as_str), prefix, bitmap::SEGMENT_BITS)
        .iter()
        .any(|bit| *bit)
}

/// Encode the composite content at `prefix`: 16-character bitmap plus
/// sub-field encodings in bit order.
///
/// `pre_encoded` supplies content for sub-elements that are themselves
/// composites (the already-built DE 127.25 inside DE 127); their bytes
/// are framed with `encode_raw` rather than re-validated as text.
pub(crate) fn encode_composite(
    message: &FieldMap,
    prefix: &str,
    registry: &FormatRegistry,
    pre_encoded: &HashMap<String, Vec<u8>>,
) -> CodecResult<Vec<u8>> {
    let keys = message
        .keys()
        .map(String::as_str)
        .chain(pre_encoded.keys().map(String::as_str));
    let bits = bitmap::presence_bits(keys, prefix, bitmap::SEGMENT_BITS);
    let bitmap_hex = bitmap::to_hex(&bits);

    let mut out = bitmap_hex.clone().into_bytes();
    for field_no in bitmap::walk(&bitmap_hex)? {
        let id = construct_field(field_no, prefix);
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
        out.extend(emitted);
    }
    Ok(out)
}

/// Decode composite content at `prefix` back into its sub-element map.
///
/// The inner bitmap is consumed here and is not surfaced as a `.1` key;
/// a nested DE 127.25 is expanded recursively.
pub(crate) fn decode_composite(
    content: &[u8],
    prefix: &str,
    registry: &FormatRegistry,
) -> CodecResult<FieldMap> {
    let (bitmap_raw, mut rest) =
        take(content, bitmap::SEGMENT_HEX, "composite bitmap").map_err(|_| {
            CodecError::BitmapExtractionFailed {
                need: bitmap::SEGMENT_HEX,
                got: content.len(),
            }
        })?;
    let bitmap_hex = std::str::from_utf8(bitmap_raw)
        .map_err(|_| CodecError::invalid_hex("composite bitmap", "non-ASCII segment"))?
        .to_ascii_uppercase();

    let mut fields = FieldMap::new();
    for field_no in bitmap::walk(&bitmap_hex)? {
        let id = construct_field(field_no, prefix);
        if id == "127.25" {
            match registry.get(&id) {
                Some(descriptor) => {
                    let (inner, after) = field::decode_raw(&id, rest, descriptor)?;
                    rest = after;
                    fields.extend(decode_composite(inner, DE127_25_PREFIX, registry)?);
                }
                None => {
                    fields.insert(id, String::new());
                }
            }
        } else {
            let (value, after) = field::decode(&id, rest, registry.get(&id))?;
            rest = after;
            fields.insert(id, value);
        }
    }
    Ok(fields)
}

/// Encode the `127.*` sub-elements of `message` into DE 127 content.
pub fn encode_127(message: &FieldMap, config: &CodecConfig) -> CodecResult<Vec<u8>> {
    let registry = config.registry();
    let mut pre_encoded = HashMap::new();
    if has_subfields(message, DE127_25_PREFIX) {
        let inner = encode_composite(message, DE127_25_PREFIX, &registry, &HashMap::new())?;
        pre_encoded.insert("127.25".to_string(), inner);
    }
    encode_composite(message, DE127_PREFIX, &registry, &pre_encoded)
}

/// Decode DE 127 content into its `127.*` sub-elements.
pub fn decode_127(content: &[u8], config: &CodecConfig) -> CodecResult<FieldMap> {
    decode_composite(content, DE127_PREFIX, &config.registry())
}

/// Encode the `127.25.*` sub-elements of `message` into DE 127.25 content.
pub fn encode_127_25(message: &FieldMap, config: &CodecConfig) -> CodecResult<Vec<u8>> {
    encode_composite(message, DE127_25_PREFIX, &config.registry(), &HashMap::new())
}

/// Decode DE 127.25 content into its `127.25.*` sub-elements.
pub fn decode_127_25(content: &[u8], config: &CodecConfig) -> CodecResult<FieldMap> {
    decode_composite(content, DE127_25_PREFIX, &config.registry())
}

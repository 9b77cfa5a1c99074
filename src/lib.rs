//! # ISO 8583 Codec - Field-Driven Message Encoding and Decoding
//!
//! ## Purpose
//!
//! Bidirectional codec for ISO 8583 financial transaction messages:
//! a structured message (field identifier → value) in, wire bytes out,
//! and back again. Covers the 128 primary data elements with primary,
//! secondary and tertiary bitmaps, the DE 127 / DE 127.25 composite
//! extensions (inner messages with their own 64-bit bitmaps), and a
//! pluggable tag-length-value layout for DE 120.
//!
//! ## Architecture Role
//!
//! ```text
//! Host Application → [iso8583-codec] → Transport Layer
//!       ↑                  ↓                 ↓
//!  FieldMap values    Format Registry    TCP framing by
//!  Response status    Bitmap engine      the caller
//! ```
//!
//! The codec is a pure transformation: no transport, no persistence, no
//! shared mutable state. All options are call-scoped via [`CodecConfig`]
//! and the format registry is an explicit, read-only input that may be
//! shared across threads.
//!
//! ## What This Crate Contains
//! - Field-driven encode/decode engine (bitmap build/walk, length
//!   prefixes, content-type-aware serialization)
//! - Format descriptor registry with a complete default catalogue
//! - DE 127 / DE 127.25 extension codec and DE 120 PPN composite codec
//! - MTI validation and DE 39 response-status lookup
//!
//! ## What This Crate Does NOT Contain
//! - Network transport or connection handling
//! - Message routing or persistence
//! - Asynchronous execution; every operation is short and CPU-bound
//!
//! ## Quick Start
//!
//! ```rust
//! use iso8583_codec::{decode, encode, CodecConfig, FieldMap};
//!
//! let mut message = FieldMap::new();
//! message.insert("0".to_string(), "0800".to_string());
//! message.insert("7".to_string(), "0818160244".to_string());
//! message.insert("11".to_string(), "646465".to_string());
//! message.insert("70".to_string(), "001".to_string());
//!
//! let config = CodecConfig::default();
//! let wire = encode(&message, &config).unwrap();
//! assert_eq!(decode(&wire, &config).unwrap(), message);
//! ```

pub mod bitmap;
pub mod bytes;
pub mod catalogue;
pub mod composite;
pub mod config;
pub mod error;
pub mod extension;
pub mod field;
pub mod formats;
pub mod message;
pub mod mti;
pub mod status;

pub use catalogue::default_catalogue;
pub use composite::{codec_for, decode_field, encode_field, PpnCodec, SubElementCodec, PPN_TAGS};
pub use config::{BitmapEncoding, CodecConfig};
pub use error::{CodecError, CodecResult};
pub use extension::{decode_127, decode_127_25, encode_127, encode_127_25};
pub use formats::{
    ContentType, FormatDescriptor, FormatRegistry, FormatStrategy, LengthClass, PadDirection,
    Padding,
};
pub use message::{decode, encode, valid, valid_bytes, FieldMap};
pub use status::{status, ACTION_CODES};

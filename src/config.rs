//! Call-scoped codec options
//!
//! Every encode/decode call receives a [`CodecConfig`]; nothing is
//! global. The defaults reproduce the standard wire shape: 2-byte TCP
//! length header, packed bitmaps, the built-in format catalogue, no
//! static meta prefix.

use crate::catalogue::default_catalogue;
use crate::formats::{FormatRegistry, FormatStrategy};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How bitmap segments travel on the wire.
///
/// The bitmap is always built as 16 uppercase hex characters per 64-bit
/// segment; this option selects the wire representation of that text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitmapEncoding {
    /// Pack each 16-character segment into 8 raw bytes (the default)
    #[default]
    Hex,
    /// Emit the 16 hex characters themselves as ASCII text
    Ascii,
}

impl BitmapEncoding {
    /// Wire width of one 64-bit bitmap segment.
    pub fn segment_width(&self) -> usize {
        match self {
            BitmapEncoding::Hex => 8,
            BitmapEncoding::Ascii => 16,
        }
    }
}

/// Options for a single encode/decode pass
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Prepend/consume the 2-byte big-endian length header
    pub tcp_len_header: bool,
    /// Bitmap wire representation
    pub bitmap_encoding: BitmapEncoding,
    /// Caller-supplied format registry
    pub formats: Option<FormatRegistry>,
    /// How `formats` combines with the default catalogue
    pub format_strategy: FormatStrategy,
    /// Fixed byte sequence between the TCP header and the MTI
    pub static_meta: Option<Vec<u8>>,
    /// Emit per-data-element debug logging
    pub de_detail: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            tcp_len_header: true,
            bitmap_encoding: BitmapEncoding::Hex,
            formats: None,
            format_strategy: FormatStrategy::Merge,
            static_meta: None,
            de_detail: false,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_tcp_header(mut self) -> Self {
        self.tcp_len_header = false;
        self
    }

    pub fn with_bitmap_encoding(mut self, encoding: BitmapEncoding) -> Self {
        self.bitmap_encoding = encoding;
        self
    }

    pub fn with_formats(mut self, formats: FormatRegistry, strategy: FormatStrategy) -> Self {
        self.formats = Some(formats);
        self.format_strategy = strategy;
        self
    }

    pub fn with_static_meta(mut self, meta: impl Into<Vec<u8>>) -> Self {
        self.static_meta = Some(meta.into());
        self
    }

    pub fn with_de_detail(mut self) -> Self {
        self.de_detail = true;
        self
    }

    /// Resolve the registry for this call: the default catalogue, the
    /// caller's registry, or the merge of the two.
    pub fn registry(&self) -> Cow<'_, FormatRegistry> {
        match (&self.formats, self.format_strategy) {
            (None, _) => Cow::Borrowed(default_catalogue()),
            (Some(custom), FormatStrategy::Replace) => Cow::Borrowed(custom),
            (Some(custom), FormatStrategy::Merge) => {
                Cow::Owned(default_catalogue().merged_with(custom))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{ContentType, FormatDescriptor, LengthClass};

    #[test]
    fn defaults_match_the_standard_wire_shape() {
        let config = CodecConfig::default();
        assert!(config.tcp_len_header);
        assert_eq!(config.bitmap_encoding, BitmapEncoding::Hex);
        assert_eq!(config.format_strategy, FormatStrategy::Merge);
        assert!(config.static_meta.is_none());
        assert!(!config.de_detail);
    }

    #[test]
    fn segment_widths_follow_the_encoding() {
        assert_eq!(BitmapEncoding::Hex.segment_width(), 8);
        assert_eq!(BitmapEncoding::Ascii.segment_width(), 16);
    }

    #[test]
    fn registry_resolution_merges_and_replaces() {
        let mut custom = FormatRegistry::new();
        custom.insert(
            "2",
            FormatDescriptor::var("PAN", ContentType::Numeric, LengthClass::LlVar, 28),
        );

        let merged = CodecConfig::new()
            .with_formats(custom.clone(), FormatStrategy::Merge)
            .registry()
            .into_owned();
        assert_eq!(merged.get("2").unwrap().max_len, 28);
        assert!(merged.get("3").is_some());

        let replaced = CodecConfig::new()
            .with_formats(custom, FormatStrategy::Replace)
            .registry()
            .into_owned();
        assert_eq!(replaced.get("2").unwrap().max_len, 28);
        assert!(replaced.get("3").is_none());
    }
}

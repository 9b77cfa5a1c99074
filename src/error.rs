//! Codec-level errors for ISO 8583 message processing
//!
//! Every failure carries structured context (field identifier, sizes,
//! offending bytes) so callers and log pipelines can act on it without
//! parsing display strings. The codec never recovers internally; errors
//! propagate unchanged to the caller.

use thiserror::Error;

/// ISO 8583 encode/decode errors with diagnostic context
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Field 0 is absent from the message
    #[error("MTI missing: message has no field 0")]
    MtiMissing,

    /// Field 0 is present but not a recognized message type indicator
    #[error("invalid MTI {mti:?}: expected a 4-digit type from the supported set")]
    MtiInvalid { mti: String },

    /// Payload ended before the declared bitmap segments
    #[error("bitmap extraction failed: need {need} bytes, payload has {got}")]
    BitmapExtractionFailed { need: usize, got: usize },

    /// A slice request ran past the end of the payload
    #[error("invalid length: requested {requested} bytes, {available} available ({context})")]
    InvalidLength {
        requested: usize,
        available: usize,
        context: String,
    },

    /// Value longer than the descriptor's maximum
    #[error("field {field}: value of {size} bytes exceeds maximum {max}")]
    LengthExceeded {
        field: String,
        size: usize,
        max: usize,
    },

    /// Value shorter than the descriptor's minimum
    #[error("field {field}: value of {size} bytes is below minimum {min}")]
    LengthBelowMinimum {
        field: String,
        size: usize,
        min: usize,
    },

    /// Fixed-length field whose (padded) value does not fill the slot
    #[error("field {field}: fixed-length value of {size} bytes must be exactly {expected}")]
    FixedLengthMismatch {
        field: String,
        size: usize,
        expected: usize,
    },

    /// Variable-length prefix was not the expected run of ASCII digits
    #[error("field {field}: malformed length prefix {prefix:?}")]
    InvalidLengthPrefix { field: String, prefix: String },

    /// Value failed the format's content pattern
    #[error("field {field}: value {value:?} does not match pattern {pattern}")]
    ValidationFailed {
        field: String,
        value: String,
        pattern: String,
    },

    /// Field bytes on the wire were not valid text
    #[error("field {field}: content is not valid UTF-8 text")]
    InvalidText { field: String },

    /// Hex conversion failed (odd length or non-hex digit)
    #[error("invalid hex in {context}: {reason}")]
    InvalidHex { context: String, reason: String },

    /// A bitmap bit is set (or a value supplied) with no format descriptor
    #[error("unknown field {field}: no format descriptor registered")]
    UnknownField { field: String },

    /// DE 120 TLV stream contains an unrecognized tag or truncated record
    #[error("invalid composite data at tag {tag:?}, remaining buffer {remaining:?}")]
    InvalidCompositeData { tag: String, remaining: String },

    /// Format descriptor cannot express the requested operation
    #[error("ambiguous format for field {field}: {reason}")]
    FormatAmbiguous { field: String, reason: String },

    /// `status` was asked about a message without field 39
    #[error("response code missing: message has no field 39")]
    ResponseCodeMissing,

    /// Field 39 value has no entry in the action-code table
    #[error("unknown response code {code:?} for MTI {mti}")]
    ResponseCodeUnknown { mti: String, code: String },
}

impl CodecError {
    pub fn invalid_length(requested: usize, available: usize, context: impl Into<String>) -> Self {
        Self::InvalidLength {
            requested,
            available,
            context: context.into(),
        }
    }

    pub fn length_exceeded(field: impl Into<String>, size: usize, max: usize) -> Self {
        Self::LengthExceeded {
            field: field.into(),
            size,
            max,
        }
    }

    pub fn validation_failed(
        field: impl Into<String>,
        value: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self::ValidationFailed {
            field: field.into(),
            value: value.into(),
            pattern: pattern.into(),
        }
    }

    pub fn invalid_hex(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHex {
            context: context.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    pub fn composite_data(tag: impl Into<String>, remaining: impl Into<String>) -> Self {
        Self::InvalidCompositeData {
            tag: tag.into(),
            remaining: remaining.into(),
        }
    }

    pub fn format_ambiguous(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FormatAmbiguous {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for codec operations
pub type CodecResult<T> = std::result::Result<T, CodecError>;

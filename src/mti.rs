//! Message type indicator validation
//!
//! The MTI occupies field 0 and is always four ASCII digits. Only the
//! 1987-vintage request/response pairs below are accepted; anything else
//! is rejected before framing starts.

use crate::error::{CodecError, CodecResult};
use crate::message::FieldMap;

/// Message type indicators the codec will frame or accept.
pub const VALID_MTIS: &[&str] = &[
    // Authorization
    "0100", "0110", "0120", "0121", "0130",
    // Financial
    "0200", "0210", "0220", "0221", "0230",
    // Batch transfer
    "0320", "0330",
    // Reversal
    "0400", "0410", "0420", "0421", "0430",
    // Reconciliation
    "0500", "0510", "0520", "0530",
    // Administrative
    "0600", "0610", "0620", "0630",
    // Network management
    "0800", "0810", "0820", "0830",
];

/// Validate a candidate MTI against the allow-list.
pub fn validate(mti: &str) -> CodecResult<()> {
    if mti.len() == 4 && VALID_MTIS.contains(&mti) {
        Ok(())
    } else {
        Err(CodecError::MtiInvalid {
            mti: mti.to_string(),
        })
    }
}

/// Pull field 0 out of a message and validate it.
pub fn from_message(message: &FieldMap) -> CodecResult<&str> {
    let mti = message.get("0").ok_or(CodecError::MtiMissing)?;
    validate(mti)?;
    Ok(mti)
}

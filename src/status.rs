//! Response status lookup
//!
//! Maps the (MTI, DE 39) pair of a response message to a short
//! human-readable status label using the standard action-code table.

use crate::error::{CodecError, CodecResult};
use crate::message::FieldMap;
use crate::mti;

/// Standard DE 39 action codes and their labels.
pub const ACTION_CODES: &[(&str, &str)] = &[
    ("00", "Approved or completed successfully"),
    ("01", "Refer to card issuer"),
    ("02", "Refer to card issuer, special conditions"),
    ("03", "Invalid merchant"),
    ("04", "Pick-up card"),
    ("05", "Do not honour"),
    ("06", "Error"),
    ("07", "Pick-up card, special conditions"),
    ("08", "Honour with identification"),
    ("09", "Request in progress"),
    ("10", "Approved for partial amount"),
    ("11", "Approved (VIP)"),
    ("12", "Invalid transaction"),
    ("13", "Invalid amount"),
    ("14", "Invalid card number"),
    ("15", "No such issuer"),
    ("16", "Approved, update track 3"),
    ("17", "Customer cancellation"),
    ("18", "Customer dispute"),
    ("19", "Re-enter transaction"),
    ("20", "Invalid response"),
    ("21", "No action taken"),
    ("22", "Suspected malfunction"),
    ("23", "Unacceptable transaction fee"),
    ("24", "File update not supported by receiver"),
    ("25", "Unable to locate record on file"),
    ("26", "Duplicate file update record"),
    ("27", "File update field edit error"),
    ("28", "File update file locked out"),
    ("29", "File update not successful"),
    ("30", "Format error"),
    ("31", "Bank not supported by switch"),
    ("32", "Completed partially"),
    ("33", "Expired card, pick-up"),
    ("34", "Suspected fraud, pick-up"),
    ("35", "Card acceptor contact acquirer, pick-up"),
    ("36", "Restricted card, pick-up"),
    ("37", "Card acceptor call acquirer security, pick-up"),
    ("38", "Allowable PIN tries exceeded, pick-up"),
    ("39", "No credit account"),
    ("40", "Requested function not supported"),
    ("41", "Lost card, pick-up"),
    ("42", "No universal account"),
    ("43", "Stolen card, pick-up"),
    ("44", "No investment account"),
    ("51", "Insufficient funds"),
    ("52", "No chequing account"),
    ("53", "No savings account"),
    ("54", "Expired card"),
    ("55", "Incorrect PIN"),
    ("56", "No card record"),
    ("57", "Transaction not permitted to cardholder"),
    ("58", "Transaction not permitted to terminal"),
    ("59", "Suspected fraud"),
    ("60", "Card acceptor contact acquirer"),
    ("61", "Exceeds withdrawal amount limit"),
    ("62", "Restricted card"),
    ("63", "Security violation"),
    ("64", "Original amount incorrect"),
    ("65", "Exceeds withdrawal frequency limit"),
    ("66", "Card acceptor call acquirer security"),
    ("67", "Hard capture, pick-up"),
    ("68", "Response received too late"),
    ("75", "Allowable number of PIN tries exceeded"),
    ("90", "Cutoff is in progress"),
    ("91", "Issuer or switch is inoperative"),
    ("92", "Routing error"),
    ("93", "Transaction cannot be completed, violation of law"),
    ("94", "Duplicate transmission"),
    ("95", "Reconcile error"),
    ("96", "System malfunction"),
];

/// Look up the status label for a message's (MTI, DE 39) pair.
pub fn status(message: &FieldMap) -> CodecResult<String> {
    let mti = mti::from_message(message)?;
    let code = message.get("39").ok_or(CodecError::ResponseCodeMissing)?;
    ACTION_CODES
        .iter()
        .find(|(c, _)| c == code)
        .map(|(_, label)| (*label).to_string())
        .ok_or_else(|| CodecError::ResponseCodeUnknown {
            mti: mti.to_string(),
            code: code.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(code: &str) -> FieldMap {
        [("0", "0810"), ("39", code)]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn known_codes_resolve_to_labels() {
        assert_eq!(
            status(&response("00")).unwrap(),
            "Approved or completed successfully"
        );
        assert_eq!(status(&response("05")).unwrap(), "Do not honour");
        assert_eq!(status(&response("96")).unwrap(), "System malfunction");
    }

    #[test]
    fn missing_field_39_is_an_error() {
        let mut message = response("00");
        message.remove("39");
        assert_eq!(
            status(&message).unwrap_err(),
            CodecError::ResponseCodeMissing
        );
    }

    #[test]
    fn unknown_codes_carry_the_pair_in_context() {
        assert_eq!(
            status(&response("ZZ")).unwrap_err(),
            CodecError::ResponseCodeUnknown {
                mti: "0810".to_string(),
                code: "ZZ".to_string(),
            }
        );
    }

    #[test]
    fn the_mti_is_still_validated() {
        let mut message = response("00");
        message.insert("0".to_string(), "9999".to_string());
        assert!(matches!(
            status(&message).unwrap_err(),
            CodecError::MtiInvalid { .. }
        ));
    }
}

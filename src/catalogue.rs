//! # Default format catalogue
//!
//! The 1987-vintage data element table covering DE 1-128, the DE 127
//! sub-elements (`127.2`-`127.39`), and the DE 127.25 integrated circuit
//! card sub-elements (`127.25.2`-`127.25.33`). Callers replace or overlay
//! entries through the `formats` / `format_strategy` options.
//!
//! `b` content stores `max_len` in hex characters; the wire carries half
//! that many raw bytes.

use crate::formats::{ContentType, FormatDescriptor, FormatRegistry, LengthClass};
use once_cell::sync::Lazy;

use ContentType::{
    AlphaNumeric, AlphaNumericSpecial, Amount, Binary, Numeric, NumericSpecial, Track,
};
use LengthClass::{LlVar, LllVar, LlllVar, LlllllVar};

static DEFAULT_CATALOGUE: Lazy<FormatRegistry> = Lazy::new(build);

/// The built-in descriptor table.
pub fn default_catalogue() -> &'static FormatRegistry {
    &DEFAULT_CATALOGUE
}

fn fixed(label: &str, content_type: ContentType, len: usize) -> FormatDescriptor {
    FormatDescriptor::fixed(label, content_type, len)
}

fn var(label: &str, content_type: ContentType, len_type: LengthClass, max: usize) -> FormatDescriptor {
    FormatDescriptor::var(label, content_type, len_type, max)
}

fn build() -> FormatRegistry {
    let mut r = FormatRegistry::new();

    // Primary data elements
    r.insert("1", fixed("Secondary Bitmap", Binary, 16));
    r.insert("2", var("Primary Account Number", Numeric, LlVar, 19));
    r.insert("3", fixed("Processing Code", Numeric, 6));
    r.insert("4", fixed("Amount, Transaction", Numeric, 12));
    r.insert("5", fixed("Amount, Settlement", Numeric, 12));
    r.insert("6", fixed("Amount, Cardholder Billing", Numeric, 12));
    r.insert("7", fixed("Transmission Date and Time", Numeric, 10));
    r.insert("8", fixed("Amount, Cardholder Billing Fee", Numeric, 8));
    r.insert("9", fixed("Conversion Rate, Settlement", Numeric, 8));
    r.insert("10", fixed("Conversion Rate, Cardholder Billing", Numeric, 8));
    r.insert("11", fixed("System Trace Audit Number", Numeric, 6));
    r.insert("12", fixed("Time, Local Transaction", Numeric, 6));
    r.insert("13", fixed("Date, Local Transaction", Numeric, 4));
    r.insert("14", fixed("Date, Expiration", Numeric, 4));
    r.insert("15", fixed("Date, Settlement", Numeric, 4));
    r.insert("16", fixed("Date, Conversion", Numeric, 4));
    r.insert("17", fixed("Date, Capture", Numeric, 4));
    r.insert("18", fixed("Merchant Type", Numeric, 4));
    r.insert("19", fixed("Acquiring Institution Country Code", Numeric, 3));
    r.insert("20", fixed("PAN Extended Country Code", Numeric, 3));
    r.insert("21", fixed("Forwarding Institution Country Code", Numeric, 3));
    r.insert("22", fixed("Point of Service Entry Mode", Numeric, 3));
    r.insert("23", fixed("Application PAN Sequence Number", Numeric, 3));
    r.insert("24", fixed("Network International Identifier", Numeric, 3));
    r.insert("25", fixed("Point of Service Condition Code", Numeric, 2));
    r.insert("26", fixed("Point of Service Capture Code", Numeric, 2));
    r.insert("27", fixed("Authorizing ID Response Length", Numeric, 1));
    r.insert("28", fixed("Amount, Transaction Fee", Amount, 9));
    r.insert("29", fixed("Amount, Settlement Fee", Amount, 9));
    r.insert("30", fixed("Amount, Transaction Processing Fee", Amount, 9));
    r.insert("31", fixed("Amount, Settlement Processing Fee", Amount, 9));
    r.insert("32", var("Acquiring Institution ID Code", Numeric, LlVar, 11));
    r.insert("33", var("Forwarding Institution ID Code", Numeric, LlVar, 11));
    r.insert("34", var("Primary Account Number, Extended", NumericSpecial, LlVar, 28));
    r.insert("35", var("Track 2 Data", Track, LlVar, 37));
    r.insert("36", var("Track 3 Data", Numeric, LllVar, 104));
    r.insert("37", fixed("Retrieval Reference Number", AlphaNumeric, 12));
    r.insert("38", fixed("Authorization ID Response", AlphaNumeric, 6));
    r.insert("39", fixed("Response Code", AlphaNumeric, 2));
    r.insert("40", fixed("Service Restriction Code", AlphaNumeric, 3));
    r.insert("41", fixed("Card Acceptor Terminal ID", AlphaNumericSpecial, 8));
    r.insert("42", fixed("Card Acceptor ID Code", AlphaNumericSpecial, 15));
    r.insert("43", fixed("Card Acceptor Name and Location", AlphaNumericSpecial, 40));
    r.insert("44", var("Additional Response Data", AlphaNumeric, LlVar, 25));
    r.insert("45", var("Track 1 Data", AlphaNumeric, LlVar, 76));
    r.insert("46", var("Additional Data, ISO", AlphaNumeric, LllVar, 999));
    r.insert("47", var("Additional Data, National", AlphaNumeric, LllVar, 999));
    r.insert("48", var("Additional Data, Private", AlphaNumeric, LllVar, 999));
    r.insert("49", fixed("Currency Code, Transaction", Numeric, 3));
    r.insert("50", fixed("Currency Code, Settlement", Numeric, 3));
    r.insert("51", fixed("Currency Code, Cardholder Billing", Numeric, 3));
    r.insert("52", fixed("PIN Data", Binary, 16));
    r.insert("53", fixed("Security Related Control Information", Numeric, 16));
    r.insert("54", var("Additional Amounts", AlphaNumeric, LllVar, 120));
    r.insert("55", var("ICC Data", AlphaNumericSpecial, LllVar, 999));
    r.insert("56", var("Reserved, ISO", AlphaNumericSpecial, LllVar, 999));
    r.insert("57", var("Reserved, National", AlphaNumericSpecial, LllVar, 999));
    r.insert("58", var("Reserved, National", AlphaNumericSpecial, LllVar, 999));
    r.insert("59", var("Reserved, National", AlphaNumericSpecial, LllVar, 999));
    r.insert("60", var("Reserved, National", AlphaNumericSpecial, LllVar, 999));
    r.insert("61", var("Reserved, Private", AlphaNumericSpecial, LllVar, 999));
    r.insert("62", var("Reserved, Private", AlphaNumericSpecial, LllVar, 999));
    r.insert("63", var("Reserved, Private", AlphaNumericSpecial, LllVar, 999));
    r.insert("64", fixed("Message Authentication Code", Binary, 16));

    // Secondary data elements
    r.insert("65", fixed("Tertiary Bitmap Indicator", Binary, 2));
    r.insert("66", fixed("Settlement Code", Numeric, 1));
    r.insert("67", fixed("Extended Payment Code", Numeric, 2));
    r.insert("68", fixed("Receiving Institution Country Code", Numeric, 3));
    r.insert("69", fixed("Settlement Institution Country Code", Numeric, 3));
    r.insert("70", fixed("Network Management Information Code", Numeric, 3));
    r.insert("71", fixed("Message Number", Numeric, 4));
    r.insert("72", fixed("Message Number, Last", Numeric, 4));
    r.insert("73", fixed("Date, Action", Numeric, 6));
    r.insert("74", fixed("Credits, Number", Numeric, 10));
    r.insert("75", fixed("Credits, Reversal Number", Numeric, 10));
    r.insert("76", fixed("Debits, Number", Numeric, 10));
    r.insert("77", fixed("Debits, Reversal Number", Numeric, 10));
    r.insert("78", fixed("Transfer, Number", Numeric, 10));
    r.insert("79", fixed("Transfer, Reversal Number", Numeric, 10));
    r.insert("80", fixed("Inquiries, Number", Numeric, 10));
    r.insert("81", fixed("Authorizations, Number", Numeric, 10));
    r.insert("82", fixed("Credits, Processing Fee Amount", Numeric, 12));
    r.insert("83", fixed("Credits, Transaction Fee Amount", Numeric, 12));
    r.insert("84", fixed("Debits, Processing Fee Amount", Numeric, 12));
    r.insert("85", fixed("Debits, Transaction Fee Amount", Numeric, 12));
    r.insert("86", fixed("Credits, Amount", Numeric, 16));
    r.insert("87", fixed("Credits, Reversal Amount", Numeric, 16));
    r.insert("88", fixed("Debits, Amount", Numeric, 16));
    r.insert("89", fixed("Debits, Reversal Amount", Numeric, 16));
    r.insert("90", fixed("Original Data Elements", Numeric, 42));
    r.insert("91", fixed("File Update Code", AlphaNumeric, 1));
    r.insert("92", fixed("File Security Code", AlphaNumeric, 2));
    r.insert("93", fixed("Response Indicator", AlphaNumeric, 5));
    r.insert("94", fixed("Service Indicator", AlphaNumeric, 7));
    r.insert("95", fixed("Replacement Amounts", AlphaNumeric, 42));
    r.insert("96", fixed("Message Security Code", Binary, 16));
    r.insert("97", fixed("Amount, Net Settlement", Amount, 17));
    r.insert("98", fixed("Payee", AlphaNumericSpecial, 25));
    r.insert("99", var("Settlement Institution ID Code", Numeric, LlVar, 11));
    r.insert("100", var("Receiving Institution ID Code", Numeric, LlVar, 11));
    r.insert("101", var("File Name", AlphaNumericSpecial, LlVar, 17));
    r.insert("102", var("Account Identification 1", AlphaNumericSpecial, LlVar, 28));
    r.insert("103", var("Account Identification 2", AlphaNumericSpecial, LlVar, 28));
    r.insert("104", var("Transaction Description", AlphaNumericSpecial, LllVar, 100));
    for n in 105..=119 {
        r.insert(n.to_string(), var("Reserved for ISO Use", AlphaNumericSpecial, LllVar, 999));
    }
    r.insert("120", var("Reserved for Private Use", AlphaNumericSpecial, LllVar, 999));
    for n in 121..=126 {
        r.insert(n.to_string(), var("Reserved for Private Use", AlphaNumericSpecial, LllVar, 999));
    }
    r.insert("127", var("Private Use Extension", AlphaNumericSpecial, LlllllVar, 999_999));
    r.insert("128", fixed("Message Authentication Code", Binary, 16));

    // DE 127 sub-elements
    r.insert("127.1", fixed("Bitmap", Binary, 16));
    r.insert("127.2", var("Switch Key", AlphaNumericSpecial, LlVar, 32));
    r.insert("127.3", fixed("Routing Information", AlphaNumericSpecial, 48));
    r.insert("127.4", fixed("POS Data", AlphaNumericSpecial, 22));
    r.insert("127.5", fixed("Service Station Data", AlphaNumericSpecial, 73));
    r.insert("127.6", fixed("Authorization Profile", Numeric, 2));
    r.insert("127.7", var("Check Data", AlphaNumericSpecial, LlVar, 50));
    r.insert("127.8", var("Retention Data", AlphaNumericSpecial, LllVar, 999));
    r.insert("127.9", var("Additional Node Data", AlphaNumericSpecial, LllVar, 255));
    r.insert("127.10", fixed("CVV2", Numeric, 3));
    r.insert("127.11", var("Original Key", AlphaNumericSpecial, LlVar, 32));
    r.insert("127.12", var("Terminal Owner", AlphaNumericSpecial, LlVar, 25));
    r.insert("127.13", fixed("POS Geographic Data", AlphaNumericSpecial, 17));
    r.insert("127.14", fixed("Sponsor Bank", AlphaNumericSpecial, 8));
    r.insert("127.15", var("Address Verification Data", AlphaNumericSpecial, LlVar, 29));
    r.insert("127.16", fixed("Address Verification Result", AlphaNumericSpecial, 1));
    r.insert("127.17", var("Cardholder Information", AlphaNumericSpecial, LlVar, 50));
    r.insert("127.18", var("Validation Data", AlphaNumericSpecial, LlVar, 50));
    r.insert("127.19", fixed("Bank Details", AlphaNumericSpecial, 8));
    r.insert("127.20", fixed("Originator/Authorizer Date Settlement", Numeric, 8));
    r.insert("127.21", var("Record Identification", AlphaNumericSpecial, LlVar, 12));
    r.insert("127.22", var("Structured Data", AlphaNumericSpecial, LlllVar, 9999));
    r.insert("127.23", fixed("Payee Name and Address", AlphaNumericSpecial, 253));
    r.insert("127.24", var("Payer Account", AlphaNumericSpecial, LlVar, 28));
    r.insert("127.25", var("Integrated Circuit Card Data", AlphaNumericSpecial, LllVar, 999));
    r.insert("127.26", var("Original Node", AlphaNumericSpecial, LlVar, 20));
    r.insert("127.27", fixed("Card Verification Result", AlphaNumericSpecial, 1));
    r.insert("127.28", fixed("Card Identifier", Numeric, 8));
    r.insert("127.29", fixed("3-D Secure Data", Binary, 8));
    r.insert("127.30", fixed("3-D Secure Result", AlphaNumericSpecial, 1));
    r.insert("127.31", var("Issuer Network ID", AlphaNumericSpecial, LlVar, 11));
    r.insert("127.32", var("UCAF Data", AlphaNumericSpecial, LlVar, 33));
    r.insert("127.33", fixed("Extended Transaction Type", Numeric, 4));
    r.insert("127.34", fixed("Account Type Qualifiers", Numeric, 2));
    r.insert("127.35", var("Acquirer Network ID", AlphaNumericSpecial, LlVar, 11));
    r.insert("127.36", var("Customer ID", AlphaNumericSpecial, LlVar, 25));
    r.insert("127.37", fixed("Extended Response Code", AlphaNumericSpecial, 4));
    r.insert("127.38", var("Additional POS Data Code", AlphaNumericSpecial, LlVar, 99));
    r.insert("127.39", fixed("Original Response Code", AlphaNumericSpecial, 2));

    // DE 127.25 sub-elements (ICC data)
    r.insert("127.25.1", fixed("Bitmap", Binary, 16));
    r.insert("127.25.2", fixed("Amount, Authorized", Numeric, 12));
    r.insert("127.25.3", fixed("Amount, Other", Numeric, 12));
    r.insert("127.25.4", var("Application Identifier", AlphaNumericSpecial, LlVar, 32));
    r.insert("127.25.5", fixed("Application Interchange Profile", Binary, 4));
    r.insert("127.25.6", fixed("Application Transaction Counter", Binary, 4));
    r.insert("127.25.7", fixed("Application Usage Control", Binary, 8));
    r.insert("127.25.8", fixed("Authorization Response Code", AlphaNumeric, 2));
    r.insert("127.25.9", fixed("Card Authentication Reliability Indicator", Binary, 2));
    r.insert("127.25.10", fixed("Card Authentication Result Code", Binary, 2));
    r.insert("127.25.11", fixed("Chip Condition Code", Numeric, 1));
    r.insert("127.25.12", fixed("Cryptogram", Binary, 16));
    r.insert("127.25.13", fixed("Cryptogram Information Data", Binary, 2));
    r.insert("127.25.14", fixed("Cardholder Verification Method Results", Binary, 6));
    r.insert("127.25.15", var("Interface Device Serial Number", AlphaNumericSpecial, LlVar, 16));
    r.insert("127.25.16", fixed("Issuer Action Code", Binary, 10));
    r.insert("127.25.17", var("Issuer Application Data", Binary, LlVar, 64));
    r.insert("127.25.18", var("Issuer Script Results", Binary, LllVar, 999));
    r.insert("127.25.19", fixed("Terminal Application Version Number", Numeric, 4));
    r.insert("127.25.20", fixed("Terminal Capabilities", Binary, 6));
    r.insert("127.25.21", fixed("Terminal Country Code", Numeric, 3));
    r.insert("127.25.22", fixed("Terminal Type", Numeric, 2));
    r.insert("127.25.23", fixed("Terminal Verification Result", Binary, 10));
    r.insert("127.25.24", fixed("Transaction Category Code", AlphaNumericSpecial, 1));
    r.insert("127.25.25", fixed("Transaction Currency Code", Numeric, 3));
    r.insert("127.25.26", fixed("Transaction Date", Numeric, 6));
    r.insert("127.25.27", fixed("Transaction Sequence Counter", Numeric, 8));
    r.insert("127.25.28", fixed("Transaction Type", Numeric, 2));
    r.insert("127.25.29", fixed("Unpredictable Number", Binary, 8));
    r.insert("127.25.30", fixed("ICC Dynamic Number", Binary, 16));
    r.insert("127.25.31", var("Issuer Authentication Data", Binary, LlVar, 32));
    r.insert("127.25.32", var("ICC Script Data", Binary, LllVar, 999));
    r.insert("127.25.33", var("Issuer Script Template", Binary, LllVar, 510));

    r
}

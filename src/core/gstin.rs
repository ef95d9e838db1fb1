//! GSTIN and PAN format validation.

use std::fmt;

use super::states::is_known_state_code;

const CHARSET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Error returned when a GSTIN or PAN fails format validation.
#[derive(Debug, Clone)]
pub struct GstinError {
    /// The invalid input value.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl fmt::Display for GstinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid GSTIN '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for GstinError {}

/// The parts of a validated GSTIN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gstin<'a> {
    /// Positions 1-2: GST state code of registration.
    pub state_code: &'a str,
    /// Positions 3-12: PAN of the registered person.
    pub pan: &'a str,
    /// Position 13: registration count for this PAN within the state.
    pub entity_code: char,
    /// Position 15: checksum character.
    pub check_char: char,
}

/// Validate a 15-character GSTIN including its checksum.
///
/// Layout: 2-digit state code, 10-character PAN, entity code (1-9 or A-Z),
/// the literal `Z`, and a base-36 check character.
pub fn validate_gstin(gstin: &str) -> Result<Gstin<'_>, GstinError> {
    let gstin = gstin.trim();
    let fail = |reason: &str| GstinError {
        value: gstin.into(),
        reason: reason.into(),
    };

    if gstin.len() != 15 || !gstin.is_ascii() {
        return Err(fail("must be exactly 15 ASCII characters"));
    }
    let bytes = gstin.as_bytes();

    let state_code = &gstin[..2];
    if !is_known_state_code(state_code) {
        return Err(fail("unknown state code in positions 1-2"));
    }

    let pan = &gstin[2..12];
    if !is_valid_pan(pan) {
        return Err(fail("positions 3-12 must be a PAN (5 letters, 4 digits, 1 letter)"));
    }

    let entity_code = bytes[12] as char;
    if !(entity_code.is_ascii_uppercase() || ('1'..='9').contains(&entity_code)) {
        return Err(fail("entity code (position 13) must be 1-9 or A-Z"));
    }

    if bytes[13] != b'Z' {
        return Err(fail("position 14 must be 'Z'"));
    }

    let check_char = bytes[14] as char;
    match gstin_check_char(&gstin[..14]) {
        Some(expected) if expected == check_char => Ok(Gstin {
            state_code,
            pan,
            entity_code,
            check_char,
        }),
        Some(expected) => Err(fail(&format!(
            "checksum mismatch, expected '{expected}'"
        ))),
        None => Err(fail("contains characters outside 0-9 and A-Z")),
    }
}

/// Compute the GSTIN check character for the first 14 characters.
///
/// Each character's base-36 value is multiplied by 1 or 2 (alternating),
/// the product's base-36 digits are summed, and the check value is
/// `(36 - sum % 36) % 36`.
pub fn gstin_check_char(first14: &str) -> Option<char> {
    if first14.len() != 14 {
        return None;
    }

    let mut sum = 0u32;
    for (i, byte) in first14.bytes().enumerate() {
        let value = CHARSET.iter().position(|c| *c == byte)? as u32;
        let product = value * if i % 2 == 0 { 1 } else { 2 };
        sum += product / 36 + product % 36;
    }

    let check = (36 - sum % 36) % 36;
    Some(CHARSET[check as usize] as char)
}

/// PAN format: 5 uppercase letters, 4 digits, 1 uppercase letter.
pub fn is_valid_pan(pan: &str) -> bool {
    let b = pan.as_bytes();
    b.len() == 10
        && b[..5].iter().all(u8::is_ascii_uppercase)
        && b[5..9].iter().all(u8::is_ascii_digit)
        && b[9].is_ascii_uppercase()
}

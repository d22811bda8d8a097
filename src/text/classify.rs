//! Sequence classification from a leading code unit.
//!
//! ## UTF-8
//!
//! | Bytes | First byte    | Continuation bytes | Code point range     |
//! |-------|---------------|--------------------|----------------------|
//! | 1     | `0xxxxxxx`    | -                  | U+0000 - U+007F      |
//! | 2     | `110xxxxx`    | `10xxxxxx`         | U+0080 - U+07FF      |
//! | 3     | `1110xxxx`    | `10xxxxxx` × 2     | U+0800 - U+FFFF      |
//! | 4     | `11110xxx`    | `10xxxxxx` × 3     | U+10000 - U+10FFFF   |
//!
//! ## UTF-16
//!
//! Units outside `0xD800..=0xDFFF` stand alone. A lead surrogate
//! (`0xD800..=0xDBFF`) must be followed by a trail surrogate
//! (`0xDC00..=0xDFFF`); a trail surrogate can never come first.

use super::unicode::{is_lead_surrogate, is_trail_surrogate};

/// Get the expected sequence length from a UTF-8 lead byte.
///
/// Returns 0 for continuation bytes and bytes `0xF8..=0xFF`, which cannot
/// start a sequence.
///
/// Lead bytes that only produce overlong or out-of-range sequences (`0xC0`,
/// `0xC1`, `0xF5..=0xF7`) still classify by their bit pattern; the decoder
/// rejects them once the code point is known.
///
/// # Examples
///
/// ```
/// use utfcore::text::classify::sequence_length;
///
/// assert_eq!(sequence_length(b'A'), 1);
/// assert_eq!(sequence_length(0xC3), 2);
/// assert_eq!(sequence_length(0xE2), 3);
/// assert_eq!(sequence_length(0xF0), 4);
/// assert_eq!(sequence_length(0x80), 0);
/// ```
#[inline]
pub const fn sequence_length(lead_byte: u8) -> usize {
    if lead_byte < 0x80 {
        1
    } else if lead_byte >> 5 == 0b110 {
        2
    } else if lead_byte >> 4 == 0b1110 {
        3
    } else if lead_byte >> 3 == 0b11110 {
        4
    } else {
        0
    }
}

/// Check if a byte is a valid UTF-8 continuation byte (0x80-0xBF).
#[inline(always)]
pub const fn is_continuation_byte(byte: u8) -> bool {
    (byte & 0xC0) == 0x80
}

/// Returns true if `length` bytes is more than the minimal UTF-8 encoding of `cp`.
#[inline]
pub const fn is_overlong_sequence(cp: u32, length: usize) -> bool {
    if cp < 0x80 {
        length != 1
    } else if cp < 0x800 {
        length != 2
    } else if cp < 0x10000 {
        length != 3
    } else {
        false
    }
}

/// Role of a single UTF-16 code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf16Unit {
    /// A non-surrogate unit; it is a code point on its own.
    Single,
    /// A leading (high) surrogate; a trail surrogate must follow.
    Lead,
    /// A trailing (low) surrogate; only valid right after a lead surrogate.
    Trail,
}

/// Classify a UTF-16 code unit.
#[inline]
pub const fn classify_utf16(unit: u16) -> Utf16Unit {
    if is_lead_surrogate(unit as u32) {
        Utf16Unit::Lead
    } else if is_trail_surrogate(unit as u32) {
        Utf16Unit::Trail
    } else {
        Utf16Unit::Single
    }
}

/// Get the expected sequence length from a leading UTF-16 unit.
///
/// Returns 1 for standalone units, 2 for lead surrogates and 0 for trail
/// surrogates (invalid as a first unit).
#[inline]
pub const fn utf16_sequence_length(unit: u16) -> usize {
    match classify_utf16(unit) {
        Utf16Unit::Single => 1,
        Utf16Unit::Lead => 2,
        Utf16Unit::Trail => 0,
    }
}

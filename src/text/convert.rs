//! Whole-sequence transcoding between UTF-8, UTF-16 and UTF-32.
//!
//! Every function appends to an [`Extend`] sink and returns the number of
//! units it appended. Conversion stops at the first invalid sequence; output
//! produced before that point stays in the sink.
//!
//! ```
//! use utfcore::text::convert::{utf16_to_utf8, utf8_to_utf16};
//!
//! let mut units = Vec::new();
//! utf8_to_utf16("zß水🍌".as_bytes(), &mut units).unwrap();
//! assert_eq!(units, [0x7A, 0xDF, 0x6C34, 0xD83C, 0xDF4C]);
//!
//! let mut bytes = Vec::new();
//! utf16_to_utf8(&units, &mut bytes).unwrap();
//! assert_eq!(bytes, "zß水🍌".as_bytes());
//! ```

use super::classify::is_continuation_byte;
use super::error::{DecodeError, Utf16Error, Utf32Error, Utf8Error};
use super::unicode::is_code_point_valid;
use super::utf16::{decode_one16, encode16_one};
use super::utf8::{decode_one, encode_one};

/// Convert UTF-8 to UTF-16.
pub fn utf8_to_utf16<S>(input: &[u8], out: &mut S) -> Result<usize, Utf8Error>
where
    S: Extend<u16>,
{
    let mut cursor = input.iter();
    let mut written = 0;
    while !cursor.as_slice().is_empty() {
        match decode_one(&mut cursor) {
            Ok(cp) => written += encode16_one(cp, out),
            Err(kind) => {
                let offset = input.len() - cursor.as_slice().len();
                return Err(Utf8Error::locate(input, offset, kind));
            }
        }
    }
    Ok(written)
}

/// Convert UTF-16 to UTF-8.
pub fn utf16_to_utf8<S>(input: &[u16], out: &mut S) -> Result<usize, Utf16Error>
where
    S: Extend<u8>,
{
    let mut cursor = input.iter();
    let mut written = 0;
    while !cursor.as_slice().is_empty() {
        match decode_one16(&mut cursor) {
            Ok(cp) => written += encode_one(cp, out),
            Err(kind) => {
                return Err(Utf16Error {
                    offset: input.len() - cursor.as_slice().len(),
                    kind,
                })
            }
        }
    }
    Ok(written)
}

/// Convert UTF-8 to a sequence of code points.
pub fn utf8_to_utf32<S>(input: &[u8], out: &mut S) -> Result<usize, Utf8Error>
where
    S: Extend<u32>,
{
    let mut cursor = input.iter();
    let mut written = 0;
    while !cursor.as_slice().is_empty() {
        match decode_one(&mut cursor) {
            Ok(cp) => {
                out.extend([cp]);
                written += 1;
            }
            Err(kind) => {
                let offset = input.len() - cursor.as_slice().len();
                return Err(Utf8Error::locate(input, offset, kind));
            }
        }
    }
    Ok(written)
}

/// Convert a sequence of code points to UTF-8.
///
/// Each code point is checked first; a surrogate or a value above U+10FFFF
/// fails with its index.
///
/// # Examples
///
/// ```
/// use utfcore::text::convert::utf32_to_utf8;
///
/// let mut out = Vec::new();
/// assert_eq!(utf32_to_utf8(&[0x48, 0x20AC], &mut out), Ok(4));
///
/// let err = utf32_to_utf8(&[0x48, 0xD800], &mut out).unwrap_err();
/// assert_eq!((err.offset, err.code_point), (1, 0xD800));
/// ```
pub fn utf32_to_utf8<S>(input: &[u32], out: &mut S) -> Result<usize, Utf32Error>
where
    S: Extend<u8>,
{
    let mut written = 0;
    for (offset, &cp) in input.iter().enumerate() {
        if !is_code_point_valid(cp) {
            return Err(Utf32Error {
                offset,
                code_point: cp,
            });
        }
        written += encode_one(cp, out);
    }
    Ok(written)
}

/// Copy `input` to `out`, replacing each invalid sequence with `replacement`.
///
/// Returns how many replacements were made. Recovery after an error:
/// - a truncated sequence at the end is replaced once and ends the input;
/// - an invalid lead byte is skipped on its own;
/// - otherwise the lead byte and the continuation bytes right after it are
///   skipped together.
///
/// `replacement` is encoded with [`encode_one`] and so must be a valid code
/// point; [`REPLACEMENT_CHARACTER`](super::unicode::REPLACEMENT_CHARACTER) is
/// the usual choice.
///
/// # Examples
///
/// ```
/// use utfcore::text::convert::replace_invalid;
/// use utfcore::text::unicode::REPLACEMENT_CHARACTER;
///
/// let mut out = Vec::new();
/// let replaced = replace_invalid(b"a\x80b\xC0\xAFc\xE2\x82", REPLACEMENT_CHARACTER, &mut out);
/// assert_eq!(replaced, 3);
/// assert_eq!(String::from_utf8(out).unwrap(), "a\u{FFFD}b\u{FFFD}c\u{FFFD}");
/// ```
pub fn replace_invalid<S>(input: &[u8], replacement: u32, out: &mut S) -> usize
where
    S: Extend<u8>,
{
    let mut cursor = input.iter();
    let mut replaced = 0;

    loop {
        let before = cursor.as_slice();
        match decode_one(&mut cursor) {
            Ok(_) => {
                let consumed = before.len() - cursor.as_slice().len();
                out.extend(before[..consumed].iter().copied());
            }
            Err(DecodeError::NotEnoughRoom) => {
                if !before.is_empty() {
                    encode_one(replacement, out);
                    replaced += 1;
                }
                return replaced;
            }
            Err(DecodeError::InvalidLead) => {
                encode_one(replacement, out);
                replaced += 1;
                cursor.next();
            }
            Err(_) => {
                encode_one(replacement, out);
                replaced += 1;
                cursor.next();
                let skip = cursor
                    .as_slice()
                    .iter()
                    .take_while(|&&b| is_continuation_byte(b))
                    .count();
                cursor = cursor.as_slice()[skip..].iter();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::unicode::REPLACEMENT_CHARACTER;

    mod utf8_utf16 {
        use super::*;

        #[test]
        fn matches_std() {
            let text = "Hello! 你好 مرحبا 🌍🚀 Ñoño café 𝄞";
            let mut units = Vec::new();
            let written = utf8_to_utf16(text.as_bytes(), &mut units).unwrap();
            let expected: Vec<u16> = text.encode_utf16().collect();
            assert_eq!(units, expected);
            assert_eq!(written, expected.len());
        }

        #[test]
        fn empty() {
            let mut units: Vec<u16> = Vec::new();
            assert_eq!(utf8_to_utf16(b"", &mut units), Ok(0));
            assert!(units.is_empty());
        }

        #[test]
        fn stops_at_error_keeping_prefix() {
            let mut units = Vec::new();
            let err = utf8_to_utf16(b"ok\nno\xFF", &mut units).unwrap_err();
            assert_eq!(err.kind, DecodeError::InvalidLead);
            assert_eq!((err.offset, err.line, err.column), (5, 2, 3));
            assert_eq!(units, [0x6F, 0x6B, 0x0A, 0x6E, 0x6F]);
        }
    }

    mod utf16_utf8 {
        use super::*;

        #[test]
        fn matches_std() {
            let text = "€ and 😀 and \u{FFFF}";
            let units: Vec<u16> = text.encode_utf16().collect();
            let mut bytes = Vec::new();
            assert_eq!(utf16_to_utf8(&units, &mut bytes), Ok(text.len()));
            assert_eq!(bytes, text.as_bytes());
        }

        #[test]
        fn unpaired_surrogates() {
            let mut bytes = Vec::new();
            let err = utf16_to_utf8(&[0x41, 0xD800, 0x42], &mut bytes).unwrap_err();
            assert_eq!(
                err,
                Utf16Error {
                    offset: 1,
                    kind: DecodeError::IncompleteSequence
                }
            );
            assert_eq!(bytes, b"A");

            let err = utf16_to_utf8(&[0xDC00], &mut Vec::<u8>::new()).unwrap_err();
            assert_eq!(err.kind, DecodeError::InvalidLead);

            let err = utf16_to_utf8(&[0x41, 0xDBFF], &mut Vec::<u8>::new()).unwrap_err();
            assert_eq!(err.kind, DecodeError::NotEnoughRoom);
            assert_eq!(err.offset, 1);
        }
    }

    mod utf32 {
        use super::*;

        #[test]
        fn roundtrip() {
            let text = "aé€😀";
            let mut cps = Vec::new();
            assert_eq!(utf8_to_utf32(text.as_bytes(), &mut cps), Ok(4));
            assert_eq!(cps, [0x61, 0xE9, 0x20AC, 0x1F600]);

            let mut bytes = Vec::new();
            assert_eq!(utf32_to_utf8(&cps, &mut bytes), Ok(text.len()));
            assert_eq!(bytes, text.as_bytes());
        }

        #[test]
        fn rejects_invalid_code_points() {
            let err = utf32_to_utf8(&[0x110000], &mut Vec::<u8>::new()).unwrap_err();
            assert_eq!(
                err,
                Utf32Error {
                    offset: 0,
                    code_point: 0x110000
                }
            );
        }

        #[test]
        fn reports_utf8_error() {
            let err = utf8_to_utf32(&[0x61, 0xE0, 0x80, 0x80], &mut Vec::<u32>::new()).unwrap_err();
            assert_eq!(err.kind, DecodeError::OverlongSequence);
            assert_eq!(err.offset, 1);
        }
    }

    mod replace {
        use super::*;

        fn repair(input: &[u8]) -> (String, usize) {
            let mut out = Vec::new();
            let n = replace_invalid(input, REPLACEMENT_CHARACTER, &mut out);
            (String::from_utf8(out).unwrap(), n)
        }

        #[test]
        fn valid_is_copied() {
            assert_eq!(repair("Grüße 👋".as_bytes()), ("Grüße 👋".to_string(), 0));
            assert_eq!(repair(b""), (String::new(), 0));
        }

        #[test]
        fn invalid_lead_skips_one_byte() {
            assert_eq!(repair(b"\x80\x80x"), ("\u{FFFD}\u{FFFD}x".to_string(), 2));
        }

        #[test]
        fn overlong_skips_continuations() {
            assert_eq!(repair(b"\xE0\x80\xAFz"), ("\u{FFFD}z".to_string(), 1));
        }

        #[test]
        fn surrogate_skips_continuations() {
            assert_eq!(repair(b"<\xED\xA0\x80>"), ("<\u{FFFD}>".to_string(), 1));
        }

        #[test]
        fn incomplete_keeps_following_lead() {
            // The 'A' after the broken sequence survives
            assert_eq!(repair(b"\xE2\x82A"), ("\u{FFFD}A".to_string(), 1));
        }

        #[test]
        fn truncated_tail_replaced_once() {
            assert_eq!(repair(b"ok\xF0\x9F\x98"), ("ok\u{FFFD}".to_string(), 1));
        }

        #[test]
        fn custom_replacement() {
            let mut out = Vec::new();
            replace_invalid(b"a\xFFb", '?' as u32, &mut out);
            assert_eq!(out, b"a?b");
        }
    }
}

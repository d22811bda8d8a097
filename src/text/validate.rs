//! Whole-input UTF-8 validation and byte-order-mark detection.
//!
//! [`find_invalid`] and [`is_valid`] run the single code point decoder over an
//! entire input in one pass. [`validate_utf8`] does the same and reports the
//! kind and position (byte offset, line, column) of the first violation.

use core::borrow::Borrow;

use super::error::Utf8Error;
use super::utf8::decode_one;

/// The UTF-8 byte order mark (U+FEFF encoded as UTF-8).
pub const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Advance `cursor` to the first invalid sequence.
///
/// Returns the cursor positioned at the lead byte of the first sequence that
/// fails to decode, or exhausted if the whole input is valid.
///
/// # Examples
///
/// ```
/// use utfcore::text::validate::find_invalid_in;
///
/// let input = [b'o', b'k', 0xC0, 0x80];
/// let rest = find_invalid_in(input.iter());
/// assert_eq!(rest.as_slice(), &[0xC0, 0x80]);
/// ```
pub fn find_invalid_in<I>(mut cursor: I) -> I
where
    I: Iterator + Clone,
    I::Item: Borrow<u8>,
{
    while decode_one(&mut cursor).is_ok() {}
    cursor
}

/// Byte offset of the first invalid sequence in `input`, or `input.len()` if
/// the input is valid UTF-8.
///
/// # Examples
///
/// ```
/// use utfcore::text::validate::find_invalid;
///
/// assert_eq!(find_invalid(b""), 0);
/// assert_eq!(find_invalid("héllo".as_bytes()), 6);
/// assert_eq!(find_invalid(b"h\xE9llo"), 1);
/// ```
pub fn find_invalid(input: &[u8]) -> usize {
    input.len() - find_invalid_in(input.iter()).as_slice().len()
}

/// Returns true if `input` is entirely valid UTF-8.
///
/// # Examples
///
/// ```
/// use utfcore::text::validate::is_valid;
///
/// assert!(is_valid("日本語".as_bytes()));
/// assert!(!is_valid(&[0xED, 0xA0, 0x80])); // encoded surrogate
/// ```
#[inline]
pub fn is_valid(input: &[u8]) -> bool {
    find_invalid(input) == input.len()
}

/// Returns true if everything the cursor yields is valid UTF-8.
pub fn is_valid_in<I>(cursor: I) -> bool
where
    I: Iterator + Clone,
    I::Item: Borrow<u8>,
{
    find_invalid_in(cursor).next().is_none()
}

/// Returns true if the units begin with the UTF-8 [`BOM`].
///
/// Stops reading at the first unit that differs or when the input runs out.
///
/// # Examples
///
/// ```
/// use utfcore::text::validate::starts_with_bom;
///
/// assert!(starts_with_bom(&[0xEFu8, 0xBB, 0xBF, 0x41]));
/// assert!(!starts_with_bom(&[0xEFu8, 0xBB]));
/// assert!(!starts_with_bom(b"ABC".iter()));
/// ```
pub fn starts_with_bom<I>(units: I) -> bool
where
    I: IntoIterator,
    I::Item: Borrow<u8>,
{
    let mut it = units.into_iter();
    BOM.iter()
        .all(|&expected| it.next().map_or(false, |unit| *unit.borrow() == expected))
}

/// Validate that the input is valid UTF-8.
///
/// Returns `Ok(())` if the input is valid UTF-8, or an `Err(Utf8Error)` with
/// the kind of the first violation and the position of its lead byte.
///
/// # Examples
///
/// ```
/// use utfcore::text::validate::validate_utf8;
/// use utfcore::text::DecodeError;
///
/// assert!(validate_utf8("émoji: 🎉".as_bytes()).is_ok());
///
/// let err = validate_utf8(&[b'a', 0xC2]).unwrap_err();
/// assert_eq!(err.kind, DecodeError::NotEnoughRoom);
/// assert_eq!(err.offset, 1);
/// ```
pub fn validate_utf8(input: &[u8]) -> Result<(), Utf8Error> {
    let mut cursor = input.iter();
    while !cursor.as_slice().is_empty() {
        if let Err(kind) = decode_one(&mut cursor) {
            let offset = input.len() - cursor.as_slice().len();
            return Err(Utf8Error::locate(input, offset, kind));
        }
    }
    Ok(())
}

/// Byte order marks recognised by [`sniff_bom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Bom {
    /// `EF BB BF`
    Utf8,
    /// `FF FE`
    Utf16Le,
    /// `FE FF`
    Utf16Be,
}

impl Bom {
    /// The bytes of this mark.
    pub const fn bytes(&self) -> &'static [u8] {
        match self {
            Self::Utf8 => &BOM,
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf16Be => &[0xFE, 0xFF],
        }
    }

    /// Length of this mark in bytes.
    pub const fn len(&self) -> usize {
        self.bytes().len()
    }

    /// Always `false`: every mark is at least two bytes.
    pub const fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }
}

/// Detect a UTF-8 or UTF-16 byte order mark at the start of `input`.
///
/// # Examples
///
/// ```
/// use utfcore::text::validate::{sniff_bom, Bom};
///
/// assert_eq!(sniff_bom(&[0xEF, 0xBB, 0xBF, b'x']), Some(Bom::Utf8));
/// assert_eq!(sniff_bom(&[0xFF, 0xFE, b'x', 0]), Some(Bom::Utf16Le));
/// assert_eq!(sniff_bom(b"plain"), None);
/// ```
pub fn sniff_bom(input: &[u8]) -> Option<Bom> {
    [Bom::Utf8, Bom::Utf16Le, Bom::Utf16Be]
        .into_iter()
        .find(|bom| input.starts_with(bom.bytes()))
}

/// Return `input` without its leading byte order mark, if it has one.
pub fn strip_bom(input: &[u8]) -> (Option<Bom>, &[u8]) {
    match sniff_bom(input) {
        Some(bom) => (Some(bom), &input[bom.len()..]),
        None => (None, input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DecodeError;

    mod find {
        use super::*;

        #[test]
        fn empty_is_valid() {
            assert_eq!(find_invalid(&[]), 0);
            assert!(is_valid(&[]));
        }

        #[test]
        fn all_ascii() {
            let ascii: Vec<u8> = (0x00..=0x7F).collect();
            assert_eq!(find_invalid(&ascii), ascii.len());
        }

        #[test]
        fn bom_prefixed() {
            let input = [0xEFu8, 0xBB, 0xBF, 0x41];
            assert_eq!(find_invalid(&input), 4);
        }

        #[test]
        fn invalid_at_various_offsets() {
            for pos in [0, 1, 7, 63, 64, 65, 200] {
                let mut data = vec![b'a'; 256];
                data[pos] = 0xFF;
                assert_eq!(find_invalid(&data), pos);
                assert!(!is_valid(&data));
            }
        }

        #[test]
        fn points_at_lead_of_bad_sequence() {
            // 3-byte lead followed by ASCII: the lead byte is reported
            assert_eq!(find_invalid(b"ab\xE2\x82z"), 2);
            assert_eq!(find_invalid("€€".as_bytes()), 6);
            assert_eq!(find_invalid(b"\xE2\x82\xAC\xE2\x82"), 3);
        }

        #[test]
        fn generic_cursor() {
            let bytes = "ok\u{7FF}".bytes().chain([0x80u8, b'!']);
            let rest = find_invalid_in(bytes);
            assert_eq!(rest.collect::<Vec<u8>>(), [0x80, b'!']);
            assert!(is_valid_in("fine".bytes()));
            assert!(!is_valid_in([0xC3u8].iter()));
        }

        #[test]
        fn agrees_with_std() {
            let samples: [&[u8]; 8] = [
                b"plain",
                "Hello! 你好 مرحبا 🌍🚀".as_bytes(),
                &[0xF4, 0x90, 0x80, 0x80],
                &[0xED, 0xBF, 0xBF],
                &[0xC1, 0x81],
                &[0xF0, 0x9F, 0x98],
                &[0xE0, 0xA0, 0x80, 0x80],
                &[0x7F, 0xC2, 0x80, 0xDF, 0xBF],
            ];
            for sample in samples {
                let expected = match core::str::from_utf8(sample) {
                    Ok(_) => sample.len(),
                    Err(e) => e.valid_up_to(),
                };
                assert_eq!(find_invalid(sample), expected, "{:02X?}", sample);
            }
        }
    }

    mod bom {
        use super::*;

        #[test]
        fn detection() {
            assert!(starts_with_bom(&BOM));
            assert!(starts_with_bom(&[0xEFu8, 0xBB, 0xBF, 0x41]));
            assert!(!starts_with_bom(b""));
            assert!(!starts_with_bom(&[0xEFu8]));
            assert!(!starts_with_bom(&[0xEFu8, 0xBB, 0xBE]));
            assert!(!starts_with_bom(&[0x41u8, 0xEF, 0xBB, 0xBF]));
        }

        #[test]
        fn short_circuits() {
            // Nothing after the first mismatch is read
            let mut reads = 0;
            let units = [0x00u8, 0xBB, 0xBF].into_iter().inspect(|_| reads += 1);
            assert!(!starts_with_bom(units));
            assert_eq!(reads, 1);
        }

        #[test]
        fn sniffing() {
            assert_eq!(sniff_bom(&BOM), Some(Bom::Utf8));
            assert_eq!(sniff_bom(&[0xFE, 0xFF, 0x00, 0x41]), Some(Bom::Utf16Be));
            assert_eq!(sniff_bom(&[0xFF, 0xFE]), Some(Bom::Utf16Le));
            assert_eq!(sniff_bom(&[0xEF, 0xBB]), None);
            assert_eq!(sniff_bom(&[]), None);
        }

        #[test]
        fn stripping() {
            assert_eq!(strip_bom(&[0xEF, 0xBB, 0xBF, b'x']), (Some(Bom::Utf8), &b"x"[..]));
            assert_eq!(strip_bom(b"xyz"), (None, &b"xyz"[..]));
            assert_eq!(Bom::Utf16Le.len(), 2);
            assert_eq!(Bom::Utf8.len(), 3);
            for bom in [Bom::Utf8, Bom::Utf16Le, Bom::Utf16Be] {
                assert!(!bom.is_empty());
                assert_eq!(bom.len(), bom.bytes().len());
            }
        }
    }

    mod detailed {
        use super::*;

        #[test]
        fn valid_inputs() {
            assert!(validate_utf8(b"").is_ok());
            assert!(validate_utf8("Ñoño café 日本 🎉\n".as_bytes()).is_ok());
        }

        #[test]
        fn kinds() {
            let cases: [(&[u8], DecodeError); 5] = [
                (&[0xC3], DecodeError::NotEnoughRoom),
                (&[0xFF], DecodeError::InvalidLead),
                (&[0xC3, 0x28], DecodeError::IncompleteSequence),
                (&[0xC0, 0x80], DecodeError::OverlongSequence),
                (&[0xED, 0xA0, 0x80], DecodeError::InvalidCodePoint),
            ];
            for (input, kind) in cases {
                let err = validate_utf8(input).unwrap_err();
                assert_eq!(err.kind, kind);
                assert_eq!(err.offset, 0);
            }
        }

        #[test]
        fn position_on_later_line() {
            let input = b"first\nsecond \xF0\x9F\x98\n";
            let err = validate_utf8(input).unwrap_err();
            assert_eq!(err.kind, DecodeError::IncompleteSequence);
            assert_eq!(err.offset, 13);
            assert_eq!(err.line, 2);
            assert_eq!(err.column, 8);
        }

        #[test]
        fn position_after_multibyte() {
            // Column counts bytes, not characters
            let mut input = "日本".as_bytes().to_vec();
            input.push(0x80);
            let err = validate_utf8(&input).unwrap_err();
            assert_eq!(err.offset, 6);
            assert_eq!(err.column, 7);
        }

        #[test]
        fn idempotent() {
            let input = b"abc\xC0\xAFdef";
            assert_eq!(validate_utf8(input), validate_utf8(input));
            assert_eq!(is_valid(input), is_valid(input));
        }
    }
}

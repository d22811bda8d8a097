//! UTF-16 decoding and encoding, including surrogate pairs.
//!
//! Works on native `u16` code units; byte order is the caller's concern (see
//! [`Bom`](super::validate::Bom) for detecting it). Cursors follow the same
//! rules as [`utf8::decode_one`](super::utf8::decode_one).

use core::borrow::Borrow;

use super::classify::{classify_utf16, Utf16Unit};
use super::error::{DecodeError, Utf16Error};
use super::unicode::{
    is_code_point_valid, is_in_bmp, is_trail_surrogate, LEAD_OFFSET, SURROGATE_OFFSET,
    TRAIL_SURROGATE_MIN,
};

/// Decode one code point and advance `cursor` past it.
///
/// A lone trail surrogate fails with [`DecodeError::InvalidLead`], a lead
/// surrogate at the end of input with [`DecodeError::NotEnoughRoom`], and a
/// lead surrogate followed by anything but a trail surrogate with
/// [`DecodeError::IncompleteSequence`]. On error the cursor is left exactly
/// where it was.
///
/// # Examples
///
/// ```
/// use utfcore::text::utf16::decode_one16;
/// use utfcore::text::DecodeError;
///
/// let units = [0xD83Du16, 0xDE00, 0x0041];
/// let mut cursor = units.iter();
/// assert_eq!(decode_one16(&mut cursor), Ok(0x1F600));
/// assert_eq!(decode_one16(&mut cursor), Ok(0x41));
///
/// let lone = [0xDE00u16];
/// let mut cursor = lone.iter();
/// assert_eq!(decode_one16(&mut cursor), Err(DecodeError::InvalidLead));
/// assert_eq!(cursor.as_slice().len(), 1);
/// ```
pub fn decode_one16<I>(cursor: &mut I) -> Result<u32, DecodeError>
where
    I: Iterator + Clone,
    I::Item: Borrow<u16>,
{
    let mut it = cursor.clone();

    let first = match it.next() {
        Some(unit) => *unit.borrow(),
        None => return Err(DecodeError::NotEnoughRoom),
    };

    let cp = match classify_utf16(first) {
        Utf16Unit::Single => first as u32,
        Utf16Unit::Trail => return Err(DecodeError::InvalidLead),
        Utf16Unit::Lead => {
            let second = match it.next() {
                Some(unit) => *unit.borrow(),
                None => return Err(DecodeError::NotEnoughRoom),
            };
            if !is_trail_surrogate(second as u32) {
                return Err(DecodeError::IncompleteSequence);
            }
            ((first as u32) << 10)
                .wrapping_add(second as u32)
                .wrapping_add(SURROGATE_OFFSET)
        }
    };

    *cursor = it;
    Ok(cp)
}

/// Decode the code point starting at unit `offset` of `input`.
///
/// Returns the code point and the offset one past its last unit.
pub fn decode_at16(input: &[u16], offset: usize) -> Result<(u32, usize), DecodeError> {
    let mut cursor = input.get(offset..).unwrap_or_default().iter();
    let cp = decode_one16(&mut cursor)?;
    Ok((cp, input.len() - cursor.as_slice().len()))
}

/// Number of units [`encode16_one`] writes for `cp`.
#[inline]
pub const fn encoded_len16(cp: u32) -> usize {
    if is_in_bmp(cp) {
        1
    } else {
        2
    }
}

/// Append the UTF-16 encoding of `cp` to `dest`, returning the number of
/// units written.
///
/// `cp` must be a valid code point. This is not checked: BMP values
/// (surrogates included) are written as a single unit, everything from
/// 0x10000 up as a surrogate pair computed with wrapping 16-bit arithmetic.
/// Use [`encode_code_point16`] when the input is untrusted.
///
/// # Examples
///
/// ```
/// use utfcore::text::utf16::encode16_one;
///
/// let mut out = Vec::new();
/// assert_eq!(encode16_one(0x20AC, &mut out), 1);
/// assert_eq!(encode16_one(0x1F600, &mut out), 2);
/// assert_eq!(out, [0x20AC, 0xD83D, 0xDE00]);
/// ```
pub fn encode16_one<S>(cp: u32, dest: &mut S) -> usize
where
    S: Extend<u16>,
{
    if is_in_bmp(cp) {
        dest.extend([cp as u16]);
        1
    } else {
        let (lead, trail) = surrogate_pair(cp);
        dest.extend([lead, trail]);
        2
    }
}

/// Split a supplementary code point into its lead and trail surrogates.
#[inline]
const fn surrogate_pair(cp: u32) -> (u16, u16) {
    let lead = LEAD_OFFSET.wrapping_add(cp >> 10) as u16;
    let trail = TRAIL_SURROGATE_MIN.wrapping_add((cp & 0x3FF) as u16);
    (lead, trail)
}

/// Encode a Unicode code point as UTF-16.
///
/// Returns `None` if the code point is invalid (surrogate or > U+10FFFF).
/// On success, returns the units and how many of them are used.
///
/// # Examples
///
/// ```
/// use utfcore::text::utf16::encode_code_point16;
///
/// assert_eq!(encode_code_point16(0x41), Some(([0x41, 0], 1)));
/// assert_eq!(encode_code_point16(0x10FFFF), Some(([0xDBFF, 0xDFFF], 2)));
/// assert_eq!(encode_code_point16(0xDC00), None);
/// ```
pub const fn encode_code_point16(cp: u32) -> Option<([u16; 2], usize)> {
    if !is_code_point_valid(cp) {
        return None;
    }
    if is_in_bmp(cp) {
        Some(([cp as u16, 0], 1))
    } else {
        let (lead, trail) = surrogate_pair(cp);
        Some(([lead, trail], 2))
    }
}

/// Iterator over the code points of a UTF-16 slice.
///
/// Yields `Err` for the first invalid sequence and then stops.
#[derive(Debug, Clone)]
pub struct CodePoints16<'a> {
    input: &'a [u16],
    cursor: core::slice::Iter<'a, u16>,
    failed: bool,
}

impl<'a> CodePoints16<'a> {
    /// Create an iterator over `input`.
    pub fn new(input: &'a [u16]) -> Self {
        Self {
            input,
            cursor: input.iter(),
            failed: false,
        }
    }

    /// Unit offset of the next code point.
    pub fn offset(&self) -> usize {
        self.input.len() - self.cursor.as_slice().len()
    }
}

impl Iterator for CodePoints16<'_> {
    type Item = Result<u32, Utf16Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.as_slice().is_empty() {
            return None;
        }
        match decode_one16(&mut self.cursor) {
            Ok(cp) => Some(Ok(cp)),
            Err(kind) => {
                self.failed = true;
                Some(Err(Utf16Error {
                    offset: self.offset(),
                    kind,
                }))
            }
        }
    }
}

impl core::iter::FusedIterator for CodePoints16<'_> {}

/// Iterate over the code points of `input`.
pub fn code_points16(input: &[u16]) -> CodePoints16<'_> {
    CodePoints16::new(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rejected(input: &[u16], expected: DecodeError) {
        let mut cursor = input.iter();
        assert_eq!(decode_one16(&mut cursor), Err(expected), "input {:04X?}", input);
        assert_eq!(cursor.as_slice().len(), input.len());
    }

    mod decode {
        use super::*;

        #[test]
        fn bmp_units() {
            assert_eq!(decode_at16(&[0x0041], 0), Ok((0x41, 1)));
            assert_eq!(decode_at16(&[0xD7FF], 0), Ok((0xD7FF, 1)));
            assert_eq!(decode_at16(&[0xE000], 0), Ok((0xE000, 1)));
            assert_eq!(decode_at16(&[0xFFFF], 0), Ok((0xFFFF, 1)));
        }

        #[test]
        fn surrogate_pairs() {
            assert_eq!(decode_at16(&[0xD83D, 0xDE00], 0), Ok((0x1F600, 2)));
            assert_eq!(decode_at16(&[0xD800, 0xDC00], 0), Ok((0x10000, 2)));
            assert_eq!(decode_at16(&[0xDBFF, 0xDFFF], 0), Ok((0x10FFFF, 2)));
            assert_eq!(decode_at16(&[0xD801, 0xDC37], 0), Ok((0x10437, 2)));
        }

        #[test]
        fn matches_std() {
            let text = "a€😀𝄞\u{FFFF}";
            let units: Vec<u16> = text.encode_utf16().collect();
            let decoded: Vec<u32> = code_points16(&units).map(Result::unwrap).collect();
            let expected: Vec<u32> = text.chars().map(|c| c as u32).collect();
            assert_eq!(decoded, expected);
        }

        #[test]
        fn copied_cursor() {
            let units = [0xD83Du16, 0xDE00];
            let mut cursor = units.iter().copied();
            assert_eq!(decode_one16(&mut cursor), Ok(0x1F600));
            assert_eq!(cursor.next(), None);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn empty() {
            assert_rejected(&[], DecodeError::NotEnoughRoom);
        }

        #[test]
        fn lone_trail() {
            assert_rejected(&[0xDC00], DecodeError::InvalidLead);
            assert_rejected(&[0xDFFF, 0x0041], DecodeError::InvalidLead);
        }

        #[test]
        fn lead_at_end() {
            assert_rejected(&[0xD800], DecodeError::NotEnoughRoom);
            assert_rejected(&[0xDBFF], DecodeError::NotEnoughRoom);
        }

        #[test]
        fn lead_without_trail() {
            assert_rejected(&[0xD800, 0x0041], DecodeError::IncompleteSequence);
            assert_rejected(&[0xD800, 0xD800], DecodeError::IncompleteSequence);
        }

        #[test]
        fn iterator_reports_offset() {
            let units = [0x41u16, 0x42, 0xDC00, 0x43];
            let mut it = code_points16(&units);
            assert_eq!(it.next(), Some(Ok(0x41)));
            assert_eq!(it.next(), Some(Ok(0x42)));
            assert_eq!(
                it.next(),
                Some(Err(Utf16Error {
                    offset: 2,
                    kind: DecodeError::InvalidLead
                }))
            );
            assert_eq!(it.next(), None);
        }
    }

    mod encode {
        use super::*;

        #[test]
        fn bmp() {
            let mut out = Vec::new();
            assert_eq!(encode16_one(0x41, &mut out), 1);
            assert_eq!(encode16_one(0xFFFF, &mut out), 1);
            assert_eq!(out, [0x41, 0xFFFF]);
        }

        #[test]
        fn supplementary() {
            let mut out = Vec::new();
            encode16_one(0x1F600, &mut out);
            assert_eq!(out, [0xD83D, 0xDE00]);

            out.clear();
            encode16_one(0x10000, &mut out);
            assert_eq!(out, [0xD800, 0xDC00]);

            out.clear();
            encode16_one(0x10FFFF, &mut out);
            assert_eq!(out, [0xDBFF, 0xDFFF]);
        }

        #[test]
        fn matches_std() {
            for c in ['A', 'é', '€', '😀', '𝄞', '\u{10FFFF}'] {
                let mut expected = [0u16; 2];
                let expected = c.encode_utf16(&mut expected);
                let mut out = Vec::new();
                assert_eq!(encode16_one(c as u32, &mut out), expected.len());
                assert_eq!(out, expected);
                assert_eq!(encoded_len16(c as u32), expected.len());
            }
        }

        #[test]
        fn checked() {
            assert_eq!(encode_code_point16(0x20AC), Some(([0x20AC, 0], 1)));
            assert_eq!(encode_code_point16(0x1F600), Some(([0xD83D, 0xDE00], 2)));
            assert_eq!(encode_code_point16(0xD800), None);
            assert_eq!(encode_code_point16(0x110000), None);
        }
    }
}

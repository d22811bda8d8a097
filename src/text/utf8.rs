//! UTF-8 decoding and encoding, one code point at a time.
//!
//! ## Cursors
//!
//! [`decode_one`] reads from a *forward cursor*: any `Iterator + Clone` whose
//! items borrow as `u8`, such as `slice::Iter<u8>` or `Copied<..>`. The
//! function works on a clone and writes it back only once a complete, valid
//! code point has been read, so on error the caller's cursor still points at
//! the lead byte of the rejected sequence.
//!
//! ## Decoding Checks
//!
//! The decoder rejects, in order:
//! 1. **End of input** before or inside a sequence ([`DecodeError::NotEnoughRoom`])
//! 2. **Invalid lead bytes**: 0x80-0xBF and 0xF8-0xFF ([`DecodeError::InvalidLead`])
//! 3. **Missing continuation bytes** ([`DecodeError::IncompleteSequence`])
//! 4. **Surrogates and values above U+10FFFF** ([`DecodeError::InvalidCodePoint`])
//! 5. **Overlong encodings** ([`DecodeError::OverlongSequence`])

use core::borrow::Borrow;

use super::classify::{is_continuation_byte, is_overlong_sequence, sequence_length};
use super::error::{DecodeError, Utf8Error};
use super::unicode::is_code_point_valid;

/// Payload bits kept from the lead byte, indexed by sequence length.
const LEAD_MASKS: [u8; 5] = [0x00, 0x7F, 0x1F, 0x0F, 0x07];

/// Decode one code point and advance `cursor` past it.
///
/// On error the cursor is left exactly where it was.
///
/// # Examples
///
/// ```
/// use utfcore::text::utf8::decode_one;
/// use utfcore::text::DecodeError;
///
/// let bytes = "€!".as_bytes();
/// let mut cursor = bytes.iter();
/// assert_eq!(decode_one(&mut cursor), Ok(0x20AC));
/// assert_eq!(decode_one(&mut cursor), Ok('!' as u32));
/// assert_eq!(decode_one(&mut cursor), Err(DecodeError::NotEnoughRoom));
///
/// // Truncated sequence: the cursor does not move
/// let truncated = [0xE2u8, 0x82];
/// let mut cursor = truncated.iter();
/// assert_eq!(decode_one(&mut cursor), Err(DecodeError::NotEnoughRoom));
/// assert_eq!(cursor.as_slice().len(), 2);
/// ```
pub fn decode_one<I>(cursor: &mut I) -> Result<u32, DecodeError>
where
    I: Iterator + Clone,
    I::Item: Borrow<u8>,
{
    let mut it = cursor.clone();

    let lead = match it.next() {
        Some(unit) => *unit.borrow(),
        None => return Err(DecodeError::NotEnoughRoom),
    };

    let length = sequence_length(lead);
    if length == 0 {
        return Err(DecodeError::InvalidLead);
    }

    let mut cp = (lead & LEAD_MASKS[length]) as u32;
    for _ in 1..length {
        let byte = match it.next() {
            Some(unit) => *unit.borrow(),
            None => return Err(DecodeError::NotEnoughRoom),
        };
        if !is_continuation_byte(byte) {
            return Err(DecodeError::IncompleteSequence);
        }
        cp = (cp << 6) | (byte & 0x3F) as u32;
    }

    if !is_code_point_valid(cp) {
        return Err(DecodeError::InvalidCodePoint);
    }
    if is_overlong_sequence(cp, length) {
        return Err(DecodeError::OverlongSequence);
    }

    *cursor = it;
    Ok(cp)
}

/// Decode the code point starting at byte `offset` of `input`.
///
/// Returns the code point and the offset one past its last byte. An `offset`
/// at or beyond the end fails with [`DecodeError::NotEnoughRoom`].
///
/// # Examples
///
/// ```
/// use utfcore::text::utf8::decode_at;
///
/// let input = "aé".as_bytes();
/// assert_eq!(decode_at(input, 0), Ok(('a' as u32, 1)));
/// assert_eq!(decode_at(input, 1), Ok((0xE9, 3)));
/// ```
pub fn decode_at(input: &[u8], offset: usize) -> Result<(u32, usize), DecodeError> {
    let mut cursor = input.get(offset..).unwrap_or_default().iter();
    let cp = decode_one(&mut cursor)?;
    Ok((cp, input.len() - cursor.as_slice().len()))
}

/// Number of bytes [`encode_one`] writes for `cp`.
#[inline]
pub const fn encoded_len(cp: u32) -> usize {
    if cp < 0x80 {
        1
    } else if cp < 0x800 {
        2
    } else if cp < 0x10000 {
        3
    } else {
        4
    }
}

/// Encode `cp` into a fixed buffer without any validity check.
#[inline]
const fn encode_raw(cp: u32) -> ([u8; 4], usize) {
    let mut buf = [0u8; 4];

    let len = if cp < 0x80 {
        buf[0] = cp as u8;
        1
    } else if cp < 0x800 {
        buf[0] = 0xC0 | ((cp >> 6) as u8);
        buf[1] = 0x80 | ((cp & 0x3F) as u8);
        2
    } else if cp < 0x10000 {
        buf[0] = 0xE0 | ((cp >> 12) as u8);
        buf[1] = 0x80 | (((cp >> 6) & 0x3F) as u8);
        buf[2] = 0x80 | ((cp & 0x3F) as u8);
        3
    } else {
        buf[0] = 0xF0 | ((cp >> 18) as u8);
        buf[1] = 0x80 | (((cp >> 12) & 0x3F) as u8);
        buf[2] = 0x80 | (((cp >> 6) & 0x3F) as u8);
        buf[3] = 0x80 | ((cp & 0x3F) as u8);
        4
    };

    (buf, len)
}

/// Append the UTF-8 encoding of `cp` to `dest`, returning the number of bytes
/// written.
///
/// `cp` must be a valid code point. This is not checked: surrogates are
/// encoded as 3-byte sequences and values of 0x10000 and above always take
/// the 4-byte form. Above 0x1FFFFF the high bits spill out of the `11110xxx`
/// pattern, so the lead byte lands in 0xF8-0xFF and the output does not
/// decode. Use [`encode_code_point`] when the input is untrusted.
///
/// # Examples
///
/// ```
/// use utfcore::text::utf8::encode_one;
///
/// let mut out = Vec::new();
/// assert_eq!(encode_one(0x41, &mut out), 1);
/// assert_eq!(encode_one(0xE9, &mut out), 2);
/// assert_eq!(encode_one(0x1F600, &mut out), 4);
/// assert_eq!(out, "Aé😀".as_bytes());
/// ```
pub fn encode_one<S>(cp: u32, dest: &mut S) -> usize
where
    S: Extend<u8>,
{
    let (buf, len) = encode_raw(cp);
    dest.extend(buf[..len].iter().copied());
    len
}

/// Encode a Unicode code point as UTF-8.
///
/// Returns `None` if the code point is invalid (surrogate or > U+10FFFF).
/// On success, returns the UTF-8 bytes and the number of bytes used.
///
/// # Examples
///
/// ```
/// use utfcore::text::utf8::encode_code_point;
///
/// // 3-byte character (€)
/// let (bytes, len) = encode_code_point(0x20AC).unwrap();
/// assert_eq!(&bytes[..len], "€".as_bytes());
///
/// // Invalid: surrogate
/// assert!(encode_code_point(0xD800).is_none());
///
/// // Invalid: out of range
/// assert!(encode_code_point(0x110000).is_none());
/// ```
pub const fn encode_code_point(cp: u32) -> Option<([u8; 4], usize)> {
    if !is_code_point_valid(cp) {
        return None;
    }
    Some(encode_raw(cp))
}

/// Iterator over the code points of a UTF-8 byte slice.
///
/// Yields `Err` for the first invalid sequence and then stops.
#[derive(Debug, Clone)]
pub struct CodePoints<'a> {
    input: &'a [u8],
    cursor: core::slice::Iter<'a, u8>,
    failed: bool,
}

impl<'a> CodePoints<'a> {
    /// Create an iterator over `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            cursor: input.iter(),
            failed: false,
        }
    }

    /// Byte offset of the next code point.
    pub fn offset(&self) -> usize {
        self.input.len() - self.cursor.as_slice().len()
    }
}

impl Iterator for CodePoints<'_> {
    type Item = Result<u32, Utf8Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.as_slice().is_empty() {
            return None;
        }
        match decode_one(&mut self.cursor) {
            Ok(cp) => Some(Ok(cp)),
            Err(kind) => {
                self.failed = true;
                Some(Err(Utf8Error::locate(self.input, self.offset(), kind)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.cursor.as_slice().len();
        ((remaining + 3) / 4, Some(remaining))
    }
}

impl core::iter::FusedIterator for CodePoints<'_> {}

/// Iterate over the code points of `input`.
///
/// # Examples
///
/// ```
/// use utfcore::text::utf8::code_points;
///
/// let cps: Result<Vec<u32>, _> = code_points("日本".as_bytes()).collect();
/// assert_eq!(cps.unwrap(), [0x65E5, 0x672C]);
/// ```
pub fn code_points(input: &[u8]) -> CodePoints<'_> {
    CodePoints::new(input)
}

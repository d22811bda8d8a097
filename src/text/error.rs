//! Error types for decoding and validation.
//!
//! [`DecodeError`] classifies why a single code point could not be decoded.
//! [`Utf8Error`], [`Utf16Error`] and [`Utf32Error`] attach the position of the offending
//! sequence when a whole input is validated or transcoded.

use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Why a code point could not be decoded.
///
/// Variants are listed in the order the decoder reaches its checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DecodeError {
    /// The input ended before the sequence was complete.
    NotEnoughRoom,

    /// The first unit cannot start a sequence.
    ///
    /// For UTF-8 this is a continuation byte (0x80-0xBF) or 0xF8-0xFF; for
    /// UTF-16 a trail surrogate.
    InvalidLead,

    /// A unit where a continuation (UTF-8) or trail surrogate (UTF-16) was
    /// expected is something else.
    IncompleteSequence,

    /// The sequence decodes to a surrogate (U+D800-U+DFFF) or to a value
    /// above U+10FFFF. Reported even when the encoding is also overlong.
    InvalidCodePoint,

    /// A code point was encoded using more bytes than necessary.
    /// For example, encoding U+0000 as `C0 80` instead of `00`.
    OverlongSequence,
}

impl DecodeError {
    /// A short hint on how to fix the input, if one applies.
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotEnoughRoom => None,
            Self::InvalidLead => Some("bytes 0x80-0xBF are continuation bytes"),
            Self::IncompleteSequence => Some("expected byte 0x80-0xBF"),
            Self::InvalidCodePoint => {
                Some("U+D800-U+DFFF are reserved for UTF-16, maximum is U+10FFFF")
            }
            Self::OverlongSequence => Some("use shortest possible encoding"),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughRoom => write!(f, "truncated sequence at end of input"),
            Self::InvalidLead => write!(f, "invalid lead code unit"),
            Self::IncompleteSequence => write!(f, "incomplete sequence"),
            Self::InvalidCodePoint => write!(f, "invalid code point"),
            Self::OverlongSequence => write!(f, "overlong encoding"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// A UTF-8 error with the position of the offending sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Utf8Error {
    /// The byte offset of the sequence's lead byte (0-indexed).
    pub offset: usize,
    /// The line number where the error occurred (1-indexed).
    pub line: usize,
    /// The column (byte position within the line, 1-indexed).
    pub column: usize,
    /// The kind of UTF-8 error.
    pub kind: DecodeError,
}

impl Utf8Error {
    /// Build an error for the sequence starting at `offset` in `input`,
    /// computing its line and column.
    ///
    /// Lines are separated by `\n`; `offset` may equal `input.len()`.
    pub fn locate(input: &[u8], offset: usize, kind: DecodeError) -> Self {
        let before = &input[..offset.min(input.len())];
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |nl| nl + 1);
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;

        Self {
            offset,
            line,
            column: offset - line_start + 1,
            kind,
        }
    }
}

impl fmt::Display for Utf8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at byte {}, line {}, column {}",
            self.kind, self.offset, self.line, self.column
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Utf8Error {}

/// A UTF-16 error with the position of the offending sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Utf16Error {
    /// The offset, in 16-bit units, of the sequence's first unit.
    pub offset: usize,
    /// The kind of UTF-16 error.
    pub kind: DecodeError,
}

impl fmt::Display for Utf16Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at unit {}", self.kind, self.offset)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Utf16Error {}

/// An invalid code point in a UTF-32 sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Utf32Error {
    /// Index of the offending code point.
    pub offset: usize,
    /// The offending value.
    pub code_point: u32,
}

impl fmt::Display for Utf32Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} 0x{:X} at index {}",
            DecodeError::InvalidCodePoint,
            self.code_point,
            self.offset
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Utf32Error {}

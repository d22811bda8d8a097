//! Text encoding utilities.
//!
//! This module provides code-point level UTF-8 and UTF-16 handling: the
//! sequence classifier, single code point decoders and encoders, whole-input
//! validation, and transcoding between the encodings.
//!
//! ## Decoding
//!
//! Decoders take a forward cursor (any `Iterator + Clone` over code units) and
//! advance it only when a complete, valid code point was read.
//!
//! ```
//! use utfcore::text::utf8::decode_one;
//! use utfcore::text::DecodeError;
//!
//! let bytes = [0xC3u8, 0xA9, 0xC0, 0x80];
//! let mut cursor = bytes.iter();
//! assert_eq!(decode_one(&mut cursor), Ok(0xE9));
//!
//! // Overlong encoding of U+0000 is rejected and the cursor stays put
//! assert_eq!(decode_one(&mut cursor), Err(DecodeError::OverlongSequence));
//! assert_eq!(cursor.as_slice(), &[0xC0, 0x80]);
//! ```
//!
//! ## Validation
//!
//! ```
//! use utfcore::text::validate::{find_invalid, validate_utf8};
//! use utfcore::text::DecodeError;
//!
//! assert_eq!(find_invalid(b"abc\xFFdef"), 3);
//!
//! let err = validate_utf8(b"line one\nbad \x80").unwrap_err();
//! assert_eq!(err.kind, DecodeError::InvalidLead);
//! assert_eq!((err.offset, err.line, err.column), (13, 2, 5));
//! ```

pub mod classify;
pub mod convert;
pub mod error;
pub mod unicode;
pub mod utf16;
pub mod utf8;
pub mod validate;

// Re-export commonly used types
pub use error::{DecodeError, Utf16Error, Utf32Error, Utf8Error};
pub use validate::{validate_utf8, Bom};

//! # utfcore
//!
//! Validating UTF-8 and UTF-16 decoding, encoding and transcoding.
//!
//! The core works one code point at a time over generic *cursors*: any
//! `Iterator + Clone` whose items borrow as a code unit. A failed decode never
//! moves the caller's cursor, and encoders append to any [`Extend`] sink.
//!
//! ## Module Organization
//!
//! - [`text::unicode`] - Code point constants and predicates
//! - [`text::classify`] - Sequence length from a lead code unit
//! - [`text::utf8`] - UTF-8 decoder and encoder
//! - [`text::utf16`] - UTF-16 decoder and encoder (surrogate pairs)
//! - [`text::validate`] - Validation queries and byte-order-mark detection
//! - [`text::convert`] - Whole-sequence transcoding and lossy repair
//!
//! ## Quick Start
//!
//! ```
//! use utfcore::{decode_one, encode16_one, find_invalid, starts_with_bom};
//!
//! let bytes = [0xF0u8, 0x9F, 0x98, 0x80];
//! let mut cursor = bytes.iter();
//! assert_eq!(decode_one(&mut cursor), Ok(0x1F600));
//! assert!(cursor.as_slice().is_empty());
//!
//! let mut units = Vec::new();
//! encode16_one(0x1F600, &mut units);
//! assert_eq!(units, [0xD83D, 0xDE00]);
//!
//! let input = [0xEFu8, 0xBB, 0xBF, 0x41];
//! assert!(starts_with_bom(&input));
//! assert_eq!(find_invalid(&input), input.len());
//! ```
//!
//! ## Features
//!
//! - `std` (default) - `std::error::Error` impls for the error types
//! - `serde` - `Serialize` for error types
//! - `cli` - the `utfcore` command line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

/// Unicode text encodings: classification, decoding, encoding, validation.
pub mod text;

// =============================================================================
// Public re-exports
// =============================================================================

pub use text::error::{DecodeError, Utf16Error, Utf8Error};
pub use text::utf16::{decode_one16, encode16_one};
pub use text::utf8::{decode_one, encode_one};
pub use text::validate::{find_invalid, is_valid, starts_with_bom, BOM};

//! Unicode code point constants and predicates.
//!
//! A *code point* here is a `u32`. The valid ones (Unicode scalar values) are
//! `0..=0x10FFFF` minus the surrogate range `0xD800..=0xDFFF`.

/// Smallest leading (high) surrogate.
pub const LEAD_SURROGATE_MIN: u16 = 0xD800;
/// Largest leading (high) surrogate.
pub const LEAD_SURROGATE_MAX: u16 = 0xDBFF;
/// Smallest trailing (low) surrogate.
pub const TRAIL_SURROGATE_MIN: u16 = 0xDC00;
/// Largest trailing (low) surrogate.
pub const TRAIL_SURROGATE_MAX: u16 = 0xDFFF;

/// Added to `cp >> 10` to form the lead surrogate of a supplementary code point.
///
/// Equal to `LEAD_SURROGATE_MIN - (0x10000 >> 10)`.
pub const LEAD_OFFSET: u32 = LEAD_SURROGATE_MIN as u32 - (0x10000 >> 10);

/// Added to `(lead << 10) + trail` to recover the code point of a surrogate pair.
///
/// Equal to `0x10000 - (LEAD_SURROGATE_MIN << 10) - TRAIL_SURROGATE_MIN`,
/// computed modulo 2^32.
pub const SURROGATE_OFFSET: u32 = 0x10000u32
    .wrapping_sub((LEAD_SURROGATE_MIN as u32) << 10)
    .wrapping_sub(TRAIL_SURROGATE_MIN as u32);

/// Maximum valid value for a Unicode code point.
pub const CODE_POINT_MAX: u32 = 0x10FFFF;

/// U+FFFD REPLACEMENT CHARACTER, the default substitute for invalid input.
pub const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

/// Returns true for code points in `0xD800..=0xDBFF`.
#[inline]
pub const fn is_lead_surrogate(cp: u32) -> bool {
    cp >= LEAD_SURROGATE_MIN as u32 && cp <= LEAD_SURROGATE_MAX as u32
}

/// Returns true for code points in `0xDC00..=0xDFFF`.
#[inline]
pub const fn is_trail_surrogate(cp: u32) -> bool {
    cp >= TRAIL_SURROGATE_MIN as u32 && cp <= TRAIL_SURROGATE_MAX as u32
}

/// Returns true for code points in `0xD800..=0xDFFF`.
#[inline]
pub const fn is_surrogate(cp: u32) -> bool {
    cp >= LEAD_SURROGATE_MIN as u32 && cp <= TRAIL_SURROGATE_MAX as u32
}

/// Returns true if `cp` is a Unicode scalar value.
///
/// # Examples
///
/// ```
/// use utfcore::text::unicode::is_code_point_valid;
///
/// assert!(is_code_point_valid(0x41));
/// assert!(is_code_point_valid(0x10FFFF));
/// assert!(!is_code_point_valid(0xD800));
/// assert!(!is_code_point_valid(0x110000));
/// ```
#[inline]
pub const fn is_code_point_valid(cp: u32) -> bool {
    cp <= CODE_POINT_MAX && !is_surrogate(cp)
}

/// Returns true if `cp` lies in the Basic Multilingual Plane.
#[inline]
pub const fn is_in_bmp(cp: u32) -> bool {
    cp < 0x10000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_offsets() {
        assert_eq!(LEAD_OFFSET, 0xD7C0);
        assert_eq!(SURROGATE_OFFSET, 0xFCA0_2400);
    }

    #[test]
    fn surrogate_ranges() {
        assert!(!is_surrogate(0xD7FF));
        assert!(is_lead_surrogate(0xD800));
        assert!(is_lead_surrogate(0xDBFF));
        assert!(!is_lead_surrogate(0xDC00));
        assert!(is_trail_surrogate(0xDC00));
        assert!(is_trail_surrogate(0xDFFF));
        assert!(!is_surrogate(0xE000));
    }

    #[test]
    fn validity() {
        assert!(is_code_point_valid(0));
        assert!(is_code_point_valid(0xD7FF));
        assert!(is_code_point_valid(0xE000));
        assert!(!is_code_point_valid(0xDFFF));
        assert!(!is_code_point_valid(u32::MAX));

        // Must agree with the standard library's notion of a scalar value
        for cp in (0..=0x11_0000u32).step_by(0x7F) {
            assert_eq!(is_code_point_valid(cp), char::from_u32(cp).is_some());
        }
    }

    #[test]
    fn bmp() {
        assert!(is_in_bmp(0xFFFF));
        assert!(!is_in_bmp(0x10000));
    }
}

//! Saturating conversions to 8-bit intensities
//!
//! Every stage that computes in a wider type narrows through one of these
//! helpers, so an out-of-range intermediate saturates at 0 or 255 instead
//! of wrapping.

/// Clamp to `[0, 255]`, then truncate toward zero.
///
/// NaN maps to 0.
#[inline]
pub fn saturate_u8(value: f64) -> u8 {
    // `as` from float saturates and maps NaN to 0
    value.clamp(0.0, 255.0) as u8
}

/// Round half away from zero, then clamp to `[0, 255]`.
#[inline]
pub fn round_saturate_u8(value: f64) -> u8 {
    saturate_u8(value.round())
}

/// Clamp an integer to `[0, 255]`.
#[inline]
pub fn saturate_i32_u8(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

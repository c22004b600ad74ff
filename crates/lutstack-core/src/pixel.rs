//! Pixel storage formats and quantization.
//!
//! The color engine works on normalized `[f32; 3]` triplets. Image buffers
//! arrive in one of the storage types implementing [`PixelFormat`] and are
//! decoded on the way in and encoded on the way out.
//!
//! # Rounding
//!
//! Integer encodes round to nearest (`round(clamp(v, 0, 1) * MAX)`), never
//! truncate, so a decode/encode round trip through the integer domain is
//! exact and there is no systematic darkening bias.
//!
//! ```
//! use lutstack_core::{decode_u8, encode_u8};
//!
//! for u in 0..=255u8 {
//!     assert_eq!(encode_u8(decode_u8(u)), u);
//! }
//! ```

use half::f16;

/// Normalized RGB triplet.
pub type Rgb = [f32; 3];

/// Clamps a value to `[0, 1]`, mapping NaN to 0.
#[inline]
pub fn clamp01(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Clamps every channel of an RGB triplet to `[0, 1]`.
#[inline]
pub fn clamp_rgb(rgb: Rgb) -> Rgb {
    [clamp01(rgb[0]), clamp01(rgb[1]), clamp01(rgb[2])]
}

/// Encodes a normalized value to 8 bits: `round(clamp(v, 0, 1) * 255)`.
///
/// # Example
///
/// ```
/// use lutstack_core::encode_u8;
///
/// assert_eq!(encode_u8(0.5), 128);
/// assert_eq!(encode_u8(1.7), 255);
/// assert_eq!(encode_u8(-0.2), 0);
/// ```
#[inline]
pub fn encode_u8(v: f32) -> u8 {
    (clamp01(v) * 255.0).round() as u8
}

/// Decodes an 8-bit value to `[0, 1]`: `u / 255`.
#[inline]
pub fn decode_u8(u: u8) -> f32 {
    u as f32 / 255.0
}

/// Trait for pixel storage types.
///
/// Implemented for:
/// - `u8` - 8-bit unsigned (0-255)
/// - `u16` - 16-bit unsigned (0-65535)
/// - `f16` - 16-bit float (half precision)
/// - `f32` - 32-bit float (single precision)
///
/// Integer types normalize to `[0, 1]` and clamp on encode. Float types pass
/// values through unchanged.
///
/// # Example
///
/// ```
/// use lutstack_core::PixelFormat;
///
/// let byte_val: u8 = 128;
/// assert!((byte_val.to_f32() - 0.502).abs() < 0.01);
///
/// let back: u16 = PixelFormat::from_f32(0.5);
/// assert_eq!(back, 32768);
/// ```
pub trait PixelFormat: Copy + Default + Send + Sync + PartialOrd + 'static {
    /// Number of bits per channel.
    const BITS: u32;

    /// Whether this is a floating-point format.
    const IS_FLOAT: bool;

    /// Value representing full intensity (1.0 for floats).
    const ONE: Self;

    /// Decodes to normalized f32.
    fn to_f32(self) -> f32;

    /// Encodes from normalized f32.
    fn from_f32(v: f32) -> Self;
}

impl PixelFormat for u8 {
    const BITS: u32 = 8;
    const IS_FLOAT: bool = false;
    const ONE: Self = u8::MAX;

    #[inline]
    fn to_f32(self) -> f32 {
        decode_u8(self)
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        encode_u8(v)
    }
}

impl PixelFormat for u16 {
    const BITS: u32 = 16;
    const IS_FLOAT: bool = false;
    const ONE: Self = u16::MAX;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32 / 65535.0
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        (clamp01(v) * 65535.0).round() as u16
    }
}

impl PixelFormat for f16 {
    const BITS: u32 = 16;
    const IS_FLOAT: bool = true;
    const ONE: Self = f16::ONE;

    #[inline]
    fn to_f32(self) -> f32 {
        f16::to_f32(self)
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        f16::from_f32(v)
    }
}

impl PixelFormat for f32 {
    const BITS: u32 = 32;
    const IS_FLOAT: bool = true;
    const ONE: Self = 1.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_rounds_not_truncates() {
        // 0.999 * 255 = 254.745 -> 255 with rounding, 254 with truncation
        assert_eq!(encode_u8(0.999), 255);
        assert_eq!(encode_u8(0.5), 128);
        assert_eq!(encode_u8(1.0 / 255.0 * 0.49), 0);
        assert_eq!(encode_u8(1.0 / 255.0 * 0.51), 1);
    }

    #[test]
    fn encode_clamps() {
        assert_eq!(encode_u8(-1.0), 0);
        assert_eq!(encode_u8(2.0), 255);
        assert_eq!(encode_u8(f32::NAN), 0);
    }

    #[test]
    fn integer_roundtrip_is_exact() {
        for u in 0..=255u8 {
            assert_eq!(encode_u8(decode_u8(u)), u);
        }
        for u in (0..=65535u16).step_by(97) {
            assert_eq!(u16::from_f32(u.to_f32()), u);
        }
    }

    #[test]
    fn float_roundtrip_within_one_step() {
        for i in 0..=1000 {
            let v = i as f32 / 1000.0;
            let back = decode_u8(encode_u8(v));
            assert!((back - v).abs() <= 1.0 / 255.0, "v={v} back={back}");
        }
    }

    #[test]
    fn float_formats_pass_through() {
        assert_eq!(f32::from_f32(1.5), 1.5);
        assert_eq!(f16::from_f32(0.5).to_f32(), 0.5);
        assert!(f32::IS_FLOAT && !u8::IS_FLOAT);
        assert_eq!(u16::ONE, 65535);
    }

    #[test]
    fn clamp_rgb_handles_nan() {
        assert_eq!(clamp_rgb([f32::NAN, -0.5, 1.5]), [0.0, 0.0, 1.0]);
    }
}

//! sRGB curve for linear-light blending.
//!
//! `BlendPolicy::LinearLight` decodes the layer input and the graded color
//! with [`decode_rgb`], mixes them, and re-encodes with [`encode_rgb`].
//!
//! Both directions work on the unit interval only: input is clamped to
//! `[0, 1]` with NaN read as 0, and the end points map onto themselves
//! exactly, so black and white survive a decode/mix/encode trip unchanged.
//!
//! ```text
//! decode(v) = v / 12.92                        v <= 0.04045
//!           = ((v + 0.055) / 1.055)^2.4        otherwise
//! encode(l) = l * 12.92                        l <= 0.0031308
//!           = 1.055 * l^(1/2.4) - 0.055        otherwise
//! ```

/// Encoded value where the linear toe ends.
pub const DECODE_KNEE: f32 = 0.04045;

/// Linear value where the linear toe ends.
pub const ENCODE_KNEE: f32 = 0.0031308;

const TOE_SLOPE: f32 = 12.92;
const OFFSET: f32 = 0.055;
const EXPONENT: f32 = 2.4;

#[inline]
fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Encoded sRGB to linear light.
///
/// # Example
///
/// ```rust
/// use lutstack_transfer::srgb::decode;
///
/// assert!((decode(0.5) - 0.214).abs() < 0.01);
/// assert_eq!(decode(1.0), 1.0);
/// assert_eq!(decode(f32::NAN), 0.0);
/// ```
#[inline]
pub fn decode(v: f32) -> f32 {
    let v = unit(v);
    if v <= DECODE_KNEE {
        v / TOE_SLOPE
    } else if v == 1.0 {
        1.0
    } else {
        ((v + OFFSET) / (1.0 + OFFSET)).powf(EXPONENT)
    }
}

/// Linear light to encoded sRGB.
#[inline]
pub fn encode(l: f32) -> f32 {
    let l = unit(l);
    if l <= ENCODE_KNEE {
        l * TOE_SLOPE
    } else if l == 1.0 {
        1.0
    } else {
        (1.0 + OFFSET) * l.powf(1.0 / EXPONENT) - OFFSET
    }
}

/// [`decode`] per channel.
#[inline]
pub fn decode_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(decode)
}

/// [`encode`] per channel.
#[inline]
pub fn encode_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_points_are_exact() {
        assert_eq!(decode(0.0), 0.0);
        assert_eq!(decode(1.0), 1.0);
        assert_eq!(encode(0.0), 0.0);
        assert_eq!(encode(1.0), 1.0);
        assert_eq!(encode_rgb(decode_rgb([0.0, 1.0, 1.0])), [0.0, 1.0, 1.0]);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(decode(-0.3), 0.0);
        assert_eq!(decode(1.7), 1.0);
        assert_eq!(encode(f32::INFINITY), 1.0);
        assert_eq!(decode_rgb([f32::NAN, -1.0, 2.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn every_8bit_level_survives_roundtrip() {
        for u in 0..=255u8 {
            let v = u as f32 / 255.0;
            let back = encode(decode(v));
            assert!((v - back).abs() < 1e-5, "level {}: {} -> {}", u, v, back);
        }
    }

    #[test]
    fn decode_is_monotonic() {
        let mut prev = decode(0.0);
        for u in 1..=255u8 {
            let next = decode(u as f32 / 255.0);
            assert!(next > prev, "level {}", u);
            prev = next;
        }
    }

    #[test]
    fn toe_is_continuous() {
        let below = decode(DECODE_KNEE - 1e-6);
        let above = decode(DECODE_KNEE + 1e-6);
        assert!((below - above).abs() < 1e-4);
        let below = encode(ENCODE_KNEE - 1e-7);
        let above = encode(ENCODE_KNEE + 1e-7);
        assert!((below - above).abs() < 1e-4);
    }

    #[test]
    fn half_linear_encodes_brighter_than_half() {
        // black/white midpoint in linear light
        let mid = encode(0.5 * decode(0.0) + 0.5 * decode(1.0));
        assert!((mid - 0.7354).abs() < 1e-3, "{}", mid);
    }
}

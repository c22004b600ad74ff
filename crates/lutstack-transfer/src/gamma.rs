//! Pure power-law gamma curves.
//!
//! - 1.8: classic Mac display gamma, used by editor-compatible blending
//! - 2.2: legacy CRT approximation
//!
//! Inputs at or below zero map to zero.

/// Gamma used by the editor-compatible blend preset.
pub const EDITOR_GAMMA: f32 = 1.8;

/// EOTF for arbitrary gamma: `v^gamma`
///
/// # Example
///
/// ```rust
/// use lutstack_transfer::gamma::gamma_eotf;
///
/// let linear = gamma_eotf(0.5, 2.2);
/// assert!((linear - 0.2176).abs() < 0.001);
/// ```
#[inline]
pub fn gamma_eotf(v: f32, gamma: f32) -> f32 {
    if v <= 0.0 { 0.0 } else { v.powf(gamma) }
}

/// OETF for arbitrary gamma: `l^(1/gamma)`
///
/// # Example
///
/// ```rust
/// use lutstack_transfer::gamma::gamma_oetf;
///
/// let encoded = gamma_oetf(0.218, 2.2);
/// assert!((encoded - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn gamma_oetf(l: f32, gamma: f32) -> f32 {
    if l <= 0.0 { 0.0 } else { l.powf(1.0 / gamma) }
}

/// Applies [`gamma_eotf`] to an RGB triplet.
#[inline]
pub fn eotf_rgb(rgb: [f32; 3], gamma: f32) -> [f32; 3] {
    [
        gamma_eotf(rgb[0], gamma),
        gamma_eotf(rgb[1], gamma),
        gamma_eotf(rgb[2], gamma),
    ]
}

/// Applies [`gamma_oetf`] to an RGB triplet.
#[inline]
pub fn oetf_rgb(rgb: [f32; 3], gamma: f32) -> [f32; 3] {
    [
        gamma_oetf(rgb[0], gamma),
        gamma_oetf(rgb[1], gamma),
        gamma_oetf(rgb[2], gamma),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_gamma_roundtrip() {
        for i in 0..=100 {
            let v = i as f32 / 100.0;
            let back = gamma_oetf(gamma_eotf(v, EDITOR_GAMMA), EDITOR_GAMMA);
            assert!((v - back).abs() < 1e-5);
        }
    }

    #[test]
    fn test_gamma_identity() {
        assert_eq!(gamma_eotf(0.5, 1.0), 0.5);
        assert_eq!(gamma_oetf(0.5, 1.0), 0.5);
    }

    #[test]
    fn test_negative_maps_to_zero() {
        assert_eq!(gamma_eotf(-0.25, 2.2), 0.0);
        assert_eq!(gamma_oetf(-0.25, 2.2), 0.0);
    }
}

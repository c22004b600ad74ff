//! Opacity blending and color-space policy.
//!
//! A layer's sampled color is merged with the color that entered the layer
//! according to a [`BlendPolicy`]. One policy is fixed per
//! [`LayerStack`](crate::LayerStack) and used for every layer in it.
//!
//! | Policy | Mix performed on |
//! |--------|------------------|
//! | [`Linear`](BlendPolicy::Linear) | stored (encoded) values, default |
//! | [`Gamma`](BlendPolicy::Gamma) | values raised to `gamma`, opacity scaled |
//! | [`LinearLight`](BlendPolicy::LinearLight) | sRGB-decoded linear light |
//!
//! Sampling itself always happens in the encoded space the table was
//! authored for. The policy only wraps the mix.
//!
//! # Example
//!
//! ```rust
//! use lutstack_color::{blend, BlendPolicy};
//!
//! let base = [0.2, 0.4, 0.6];
//! let graded = [0.6, 0.4, 0.2];
//! let out = blend(base, graded, 0.5, BlendPolicy::Linear);
//! assert!((out[0] - 0.4).abs() < 1e-6);
//! ```

use lutstack_core::{clamp01, clamp_rgb, Rgb};
use lutstack_transfer::{gamma, srgb};

/// Opacity scale of the editor-compatible preset.
///
/// A full-opacity layer only moves 70% of the way (in gamma 1.8 space)
/// toward its graded color, which is what the reference editor renders for
/// a color-lookup adjustment layer.
pub const EDITOR_OPACITY_SCALE: f32 = 0.7;

/// How a layer's graded color is merged with its input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BlendPolicy {
    /// `base * (1 - o) + graded * o` on stored values.
    ///
    /// Opacity 1 returns the graded color exactly.
    #[default]
    Linear,

    /// Mix in a power-law space.
    ///
    /// Both colors are raised to `gamma`, mixed with `o * opacity_scale`,
    /// and the result raised to `1 / gamma`.
    Gamma {
        /// Exponent applied before mixing.
        gamma: f32,
        /// Multiplier on layer opacity, in `[0, 1]`.
        opacity_scale: f32,
    },

    /// Mix in linear light using the sRGB piecewise curve.
    LinearLight,
}

impl BlendPolicy {
    /// Gamma 1.8 with a 0.7 opacity scale.
    pub const EDITOR_COMPAT: Self = Self::Gamma {
        gamma: gamma::EDITOR_GAMMA,
        opacity_scale: EDITOR_OPACITY_SCALE,
    };

    /// Power-law blend without opacity scaling.
    pub fn gamma(gamma: f32) -> Self {
        Self::Gamma {
            gamma,
            opacity_scale: 1.0,
        }
    }

    /// Opacity actually used for the mix.
    #[inline]
    pub fn effective_opacity(&self, opacity: f32) -> f32 {
        let opacity = clamp01(opacity);
        match *self {
            Self::Gamma { opacity_scale, .. } => opacity * clamp01(opacity_scale),
            Self::Linear | Self::LinearLight => opacity,
        }
    }

    /// Merges `graded` into `base` at `opacity`.
    ///
    /// Opacity is clamped to `[0, 1]` with NaN treated as 0. Opacity 0
    /// returns `base` unchanged. The result is clamped to `[0, 1]^3`.
    pub fn blend(&self, base: Rgb, graded: Rgb, opacity: f32) -> Rgb {
        let o = self.effective_opacity(opacity);
        if o == 0.0 {
            return base;
        }

        let out = match *self {
            Self::Linear => mix(base.map(finite_or_clamped), graded, o),
            Self::Gamma { gamma: g, .. } => {
                let g = sanitize_gamma(g);
                let mixed = mix(
                    gamma::eotf_rgb(clamp_rgb(base), g),
                    gamma::eotf_rgb(clamp_rgb(graded), g),
                    o,
                );
                gamma::oetf_rgb(mixed, g)
            }
            Self::LinearLight => {
                let mixed = mix(srgb::decode_rgb(base), srgb::decode_rgb(graded), o);
                srgb::encode_rgb(mixed)
            }
        };
        clamp_rgb(out)
    }
}

/// Merges `graded` into `base` at `opacity` under `policy`.
///
/// Free-function form of [`BlendPolicy::blend`].
#[inline]
pub fn blend(base: Rgb, graded: Rgb, opacity: f32, policy: BlendPolicy) -> Rgb {
    policy.blend(base, graded, opacity)
}

/// `a * (1 - t) + b * t`, exact at both ends.
#[inline]
fn mix(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let s = 1.0 - t;
    [a[0] * s + b[0] * t, a[1] * s + b[1] * t, a[2] * s + b[2] * t]
}

/// NaN to 0 and infinities to the nearest bound; finite values pass.
#[inline]
fn finite_or_clamped(v: f32) -> f32 {
    if v.is_finite() { v } else { clamp01(v) }
}

#[inline]
fn sanitize_gamma(g: f32) -> f32 {
    if g.is_finite() && g > 0.0 { g } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const BASE: Rgb = [1.0, 0.5, 0.0];
    const GRADED: Rgb = [1.0, 0.6, 0.0];

    #[test]
    fn zero_opacity_returns_base_exactly() {
        let odd = [1.3, -0.2, 0.5];
        for policy in [BlendPolicy::Linear, BlendPolicy::EDITOR_COMPAT, BlendPolicy::LinearLight] {
            assert_eq!(policy.blend(odd, GRADED, 0.0), odd);
            assert_eq!(policy.blend(odd, GRADED, -1.0), odd);
            assert_eq!(policy.blend(odd, GRADED, f32::NAN), odd);
        }
    }

    #[test]
    fn linear_full_opacity_returns_graded_exactly() {
        let graded = [0.123_456_7, 0.987_654_3, 0.333_333_3];
        assert_eq!(BlendPolicy::Linear.blend([0.9, 0.1, 0.4], graded, 1.0), graded);
        assert_eq!(BlendPolicy::Linear.blend([0.9, 0.1, 0.4], graded, 3.0), graded);
    }

    #[test]
    fn linear_is_proportional() {
        let out = blend(BASE, GRADED, 0.26, BlendPolicy::Linear);
        assert_abs_diff_eq!(out[1], 0.5 + 0.26 * 0.1, epsilon = 1e-6);
    }

    #[test]
    fn editor_compat_never_reaches_graded() {
        let out = BlendPolicy::EDITOR_COMPAT.blend(BASE, GRADED, 1.0);
        assert!(out[1] > BASE[1] && out[1] < GRADED[1], "{out:?}");
        // equal channels stay put
        assert_abs_diff_eq!(out[0], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn editor_compat_matches_formula() {
        let g = 1.8f32;
        let expected = ((0.5f32.powf(g) * 0.3) + 0.6f32.powf(g) * 0.7).powf(1.0 / g);
        let out = BlendPolicy::EDITOR_COMPAT.blend(BASE, GRADED, 1.0);
        assert_abs_diff_eq!(out[1], expected, epsilon = 1e-6);
    }

    #[test]
    fn gamma_one_matches_linear() {
        let a = BlendPolicy::gamma(1.0).blend([0.2, 0.3, 0.4], [0.8, 0.1, 0.9], 0.4);
        let b = BlendPolicy::Linear.blend([0.2, 0.3, 0.4], [0.8, 0.1, 0.9], 0.4);
        for c in 0..3 {
            assert_abs_diff_eq!(a[c], b[c], epsilon = 1e-6);
        }
    }

    #[test]
    fn linear_light_is_brighter_at_midpoint() {
        // mixing black and white in linear light lands above 0.5 encoded
        let out = BlendPolicy::LinearLight.blend([0.0; 3], [1.0; 3], 0.5);
        assert!(out[0] > 0.7 && out[0] < 0.76, "{out:?}");
    }

    #[test]
    fn output_is_clamped() {
        let out = BlendPolicy::Linear.blend([1.5, -0.5, 0.5], [1.5, -0.5, 0.5], 0.5);
        assert_eq!(out, [1.0, 0.0, 0.5]);
    }

    #[test]
    fn non_finite_base_matches_sampler_clamping() {
        let graded = [0.25, 0.5, 0.75];
        let out = BlendPolicy::Linear.blend([f32::NAN, f32::INFINITY, 0.5], graded, 1.0);
        assert_eq!(out, graded);

        // NaN reads as 0, +inf as 1
        let out = BlendPolicy::Linear.blend([f32::NAN, f32::INFINITY, 0.5], [0.0; 3], 0.5);
        assert_eq!(out, [0.0, 0.5, 0.25]);

        // finite out-of-range values are mixed as-is, then clamped
        let out = BlendPolicy::Linear.blend([1.4, -0.2, 0.5], [1.0, 0.0, 0.5], 0.5);
        assert_abs_diff_eq!(out[0], 1.0, epsilon = 1e-6);
        assert_eq!(out[1], 0.0);
    }

    #[test]
    fn linear_light_keeps_black_and_white() {
        let out = BlendPolicy::LinearLight.blend([0.0, 1.0, 1.0], [0.0, 1.0, 1.0], 0.5);
        assert_eq!(out, [0.0, 1.0, 1.0]);
        let out = BlendPolicy::LinearLight.blend([f32::NAN, 2.0, 0.5], [0.0, 1.0, 0.5], 1.0);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 1.0);
        assert_abs_diff_eq!(out[2], 0.5, epsilon = 1e-5);
    }

    #[test]
    fn invalid_gamma_falls_back_to_linear_mix() {
        let a = BlendPolicy::gamma(0.0).blend([0.2; 3], [0.6; 3], 0.5);
        assert_abs_diff_eq!(a[0], 0.4, epsilon = 1e-6);
    }
}

//! Optional output enhancement.
//!
//! Some renderers nudge contrast when writing the final pixel. That is kept
//! here as an explicit transform applied between compositing and encoding,
//! never folded into [`encode_u8`](crate::encode_u8) itself, so the
//! encode/decode pair stays an exact round trip. The default is
//! [`Enhancement::None`].

use crate::pixel::{clamp01, Rgb};

/// Output enhancement applied after compositing, before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Enhancement {
    /// No change.
    #[default]
    None,

    /// Contrast around mid-gray: `(v - 0.5) * (1 + amount) + 0.5`.
    ///
    /// Positive amounts increase contrast, negative amounts flatten it.
    Contrast(f32),
}

impl Enhancement {
    /// Returns true if this enhancement leaves values untouched.
    #[inline]
    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            Self::Contrast(amount) => *amount == 0.0,
        }
    }

    /// Applies the enhancement to one normalized value.
    #[inline]
    pub fn apply(&self, v: f32) -> f32 {
        match *self {
            Self::None => v,
            Self::Contrast(amount) => clamp01((v - 0.5) * (1.0 + amount) + 0.5),
        }
    }

    /// Applies the enhancement to an RGB triplet.
    #[inline]
    pub fn apply_rgb(&self, rgb: Rgb) -> Rgb {
        if self.is_none() {
            return rgb;
        }
        [self.apply(rgb[0]), self.apply(rgb[1]), self.apply(rgb[2])]
    }
}

//! # lutstack-transfer
//!
//! Transfer curves used when blending in a gamma-aware space.
//!
//! | Module | Curve |
//! |--------|-------|
//! | [`srgb`] | IEC 61966-2-1 piecewise sRGB, clamped to `[0, 1]` |
//! | [`gamma`] | Pure power law (e.g. 1.8, 2.2) |
//!
//! # Usage
//!
//! ```rust
//! use lutstack_transfer::{gamma, srgb};
//!
//! let linear = srgb::decode(0.5);
//! let encoded = srgb::encode(linear);
//! assert!((encoded - 0.5).abs() < 1e-5);
//!
//! let lifted = gamma::gamma_eotf(0.5, 1.8);
//! assert!(lifted < 0.5);
//! ```
//!
//! # Used By
//!
//! - `lutstack-color` - `BlendPolicy::Gamma` and `BlendPolicy::LinearLight`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod gamma;
pub mod srgb;

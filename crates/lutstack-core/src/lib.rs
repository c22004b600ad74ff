//! # lutstack-core
//!
//! Numeric building blocks shared by every lutstack crate.
//!
//! - [`PixelFormat`] - Quantization between storage types (u8, u16, f16, f32)
//!   and the normalized `[0, 1]` float domain the color engine works in
//! - [`encode_u8`] / [`decode_u8`] - The canonical 8-bit encode/decode pair
//! - [`Enhancement`] - Optional, explicit output enhancement (off by default)
//! - [`clamp01`] / [`clamp_rgb`] - NaN-safe clamping used on the hot path
//!
//! ## Crate Structure
//!
//! ```text
//! lutstack-core (this crate)
//!    ^
//!    |
//!    +-- lutstack-lut (tables, sampler, .cube)
//!    +-- lutstack-color (layers, blend, compositor)
//!    +-- lutstack-ops (batch pixel driver)
//! ```
//!
//! # Dependencies
//!
//! - `half` - `f16` pixel storage

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod enhance;
pub mod pixel;

pub use enhance::Enhancement;
pub use pixel::{clamp01, clamp_rgb, decode_u8, encode_u8, PixelFormat, Rgb};

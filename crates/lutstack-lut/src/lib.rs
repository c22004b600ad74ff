//! # lutstack-lut
//!
//! 3D lookup tables for color grading.
//!
//! - [`LutTable`] - Immutable `size^3` RGB cube, red-fastest
//! - [`build_table`] - Validated construction from flat float triplets
//! - [`sample`] - Trilinear (default), tetrahedral and nearest sampling
//! - [`cube`] - Adobe/Resolve `.cube` reader and writer
//! - [`LutCache`] - Explicit, application-owned table cache
//!
//! # Usage
//!
//! ```rust
//! use lutstack_lut::{sample, LutTable};
//!
//! let lut = LutTable::from_fn(17, |[r, g, b]| [r, g * 0.9, b * 0.8]);
//! let out = sample::sample(&lut, [0.5, 0.5, 0.5]);
//! assert!((out[1] - 0.45).abs() < 1e-5);
//! ```
//!
//! # Dependencies
//!
//! - `lutstack-core` - Rgb type, clamping and 8-bit quantization
//! - `thiserror` - Error handling
//! - `tracing` - Parse and cache diagnostics
//!
//! # Used By
//!
//! - `lutstack-color` - Layer cascade
//! - `lutstack-cli` - File loading

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod error;
mod interp;
mod table;
pub mod cube;
pub mod sample;

pub use cache::LutCache;
pub use error::{LutError, LutResult};
pub use interp::Interpolation;
pub use table::{build_table, LutTable, MAX_SIZE};

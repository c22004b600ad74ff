//! # lutstack-color
//!
//! Multi-layer LUT compositing.
//!
//! - [`Layer`] / [`LayerStack`] - Ordered color-grade passes
//! - [`BlendPolicy`] / [`blend`] - How each pass merges with its input
//! - [`composite_pixel`] - Apply a stack to one color
//!
//! # Cascade
//!
//! ```text
//! pixel ──► layer 0 ──► layer 1 ──► layer 2 ──► out
//!            │ sample     │ sample     │ sample
//!            └ blend      └ blend      └ blend
//! ```
//!
//! Each layer samples the output of the one below it.
//!
//! # Dependencies
//!
//! - `lutstack-lut` - Tables and sampling
//! - `lutstack-transfer` - Gamma and sRGB curves for non-linear policies
//! - `thiserror`, `tracing`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod blend;
mod composite;
mod error;
mod layer;

pub use blend::{blend, BlendPolicy, EDITOR_OPACITY_SCALE};
pub use composite::{composite_layers, composite_pixel};
pub use error::{ColorError, ColorResult};
pub use layer::{Layer, LayerStack, MAX_LAYERS};

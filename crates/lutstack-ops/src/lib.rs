//! # lutstack-ops
//!
//! Batch driver for applying a [`LayerStack`](lutstack_color::LayerStack)
//! to whole images.
//!
//! # Modules
//!
//! - [`batch`] - Parallel per-row compositing over interleaved buffers
//!
//! Buffers are interleaved RGB or RGBA in any
//! [`PixelFormat`](lutstack_core::PixelFormat) (`u8`, `u16`, `f16`, `f32`).
//! No resizing, file I/O or threading setup happens here; the host
//! configures the rayon pool.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod batch;

pub use batch::{
    composite_image, composite_image_in_place, composite_image_with, exceeds_max_dimension,
    MAX_DIMENSION,
};
pub use error::{OpsError, OpsResult};

//! Whole-image compositing.
//!
//! Decodes each pixel from its storage format, runs it through a
//! [`LayerStack`], optionally applies an [`Enhancement`], and encodes it back.
//! Rows are processed in parallel on the rayon global pool; pixels share no
//! state, so the result does not depend on scheduling.
//!
//! # Example
//!
//! ```rust
//! use lutstack_color::LayerStack;
//! use lutstack_ops::batch::composite_image;
//!
//! let src = vec![10u8, 20, 30, 255, 40, 50, 60, 128];
//! let out = composite_image(&LayerStack::new(), &src, 2, 1, 4).unwrap();
//! assert_eq!(out, src);
//! ```

use lutstack_color::LayerStack;
use lutstack_core::{Enhancement, PixelFormat};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{OpsError, OpsResult};

/// Largest width or height a caller should feed without downscaling first.
///
/// The driver accepts larger images; this is advice for hosts with
/// bounded texture sizes.
pub const MAX_DIMENSION: usize = 8192;

/// Returns true if either side exceeds [`MAX_DIMENSION`].
#[inline]
pub fn exceeds_max_dimension(width: usize, height: usize) -> bool {
    width > MAX_DIMENSION || height > MAX_DIMENSION
}

/// Composites a copy of `src` and returns the new buffer.
///
/// `src` is interleaved RGB (`channels == 3`) or RGBA (`channels == 4`).
/// Alpha is copied through unchanged.
///
/// # Errors
///
/// - [`OpsError::UnsupportedChannels`] if `channels` is not 3 or 4
/// - [`OpsError::InvalidDimensions`] if `src.len() != width * height * channels`
pub fn composite_image<T: PixelFormat>(
    stack: &LayerStack,
    src: &[T],
    width: usize,
    height: usize,
    channels: usize,
) -> OpsResult<Vec<T>> {
    let mut dst = src.to_vec();
    composite_image_in_place(stack, &mut dst, width, height, channels)?;
    Ok(dst)
}

/// Composites `buf` in place.
///
/// Same contract as [`composite_image`].
pub fn composite_image_in_place<T: PixelFormat>(
    stack: &LayerStack,
    buf: &mut [T],
    width: usize,
    height: usize,
    channels: usize,
) -> OpsResult<()> {
    composite_image_with(stack, buf, width, height, channels, Enhancement::None)
}

/// Composites `buf` in place, applying `enhancement` before encoding.
pub fn composite_image_with<T: PixelFormat>(
    stack: &LayerStack,
    buf: &mut [T],
    width: usize,
    height: usize,
    channels: usize,
    enhancement: Enhancement,
) -> OpsResult<()> {
    validate(buf.len(), width, height, channels)?;

    trace!(width, height, channels, "composite_image");
    debug!(
        width,
        height,
        layers = stack.len(),
        active = stack.active_count(),
        "Compositing image"
    );

    if width == 0 || height == 0 {
        return Ok(());
    }
    if stack.active_count() == 0 && enhancement.is_none() {
        // Nothing can change; skip the decode/encode trip.
        return Ok(());
    }

    buf.par_chunks_mut(width * channels).for_each(|row| {
        for px in row.chunks_exact_mut(channels) {
            let rgb = [px[0].to_f32(), px[1].to_f32(), px[2].to_f32()];
            let out = enhancement.apply_rgb(stack.apply(rgb));
            px[0] = T::from_f32(out[0]);
            px[1] = T::from_f32(out[1]);
            px[2] = T::from_f32(out[2]);
        }
    });

    Ok(())
}

fn validate(len: usize, width: usize, height: usize, channels: usize) -> OpsResult<()> {
    if channels != 3 && channels != 4 {
        return Err(OpsError::UnsupportedChannels(channels));
    }

    let expected = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| OpsError::InvalidDimensions("image dimensions overflow".into()))?;

    if len != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} values for {}x{}x{}, got {}",
            expected, width, height, channels, len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use half::f16;
    use lutstack_color::Layer;
    use lutstack_lut::LutTable;

    fn invert_stack() -> LayerStack {
        let invert = Arc::new(LutTable::from_fn(17, |[r, g, b]| [1.0 - r, 1.0 - g, 1.0 - b]));
        LayerStack::new().with_layer(Layer::new(invert, 1.0)).unwrap()
    }

    #[test]
    fn rejects_bad_channels() {
        let buf = vec![0u8; 8];
        let err = composite_image(&LayerStack::new(), &buf, 2, 2, 2).unwrap_err();
        assert!(matches!(err, OpsError::UnsupportedChannels(2)));
    }

    #[test]
    fn rejects_length_mismatch() {
        let buf = vec![0u8; 11];
        let err = composite_image(&LayerStack::new(), &buf, 2, 2, 3).unwrap_err();
        assert!(matches!(err, OpsError::InvalidDimensions(_)));
    }

    #[test]
    fn rejects_overflow() {
        let mut buf = vec![0u8; 3];
        let err =
            composite_image_in_place(&LayerStack::new(), &mut buf, usize::MAX, 2, 3).unwrap_err();
        assert!(matches!(err, OpsError::InvalidDimensions(_)));
    }

    #[test]
    fn empty_image_is_ok() {
        let out = composite_image::<u8>(&invert_stack(), &[], 0, 0, 4).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn empty_stack_keeps_pixels() {
        let src: Vec<u16> = (0..4 * 3 * 3).map(|i| (i * 1111) as u16).collect();
        let out = composite_image(&LayerStack::new(), &src, 4, 3, 3).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn inverts_u8_and_keeps_alpha() {
        // 51 and 204 fall between nodes; the table is linear in each channel.
        let src = vec![0u8, 255, 51, 7, 255, 0, 204, 200];
        let out = composite_image(&invert_stack(), &src, 2, 1, 4).unwrap();
        assert_eq!(out, vec![255, 0, 204, 7, 0, 255, 51, 200]);
    }

    #[test]
    fn f16_buffers() {
        let src: Vec<f16> = [0.0f32, 0.5, 1.0].iter().map(|&v| f16::from_f32(v)).collect();
        let out = composite_image(&invert_stack(), &src, 1, 1, 3).unwrap();
        let out: Vec<f32> = out.iter().map(|v| v.to_f32()).collect();
        assert_eq!(out, vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn enhancement_applies_after_stack() {
        let mut buf = vec![0.25f32, 0.5, 0.75];
        composite_image_with(
            &LayerStack::new(),
            &mut buf,
            1,
            1,
            3,
            Enhancement::Contrast(1.0),
        )
        .unwrap();
        assert_eq!(buf, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn rows_are_independent() {
        let (w, h) = (33, 17);
        let src: Vec<u8> = (0..w * h * 3).map(|i| (i * 7 % 256) as u8).collect();
        let stack = invert_stack();
        let out = composite_image(&stack, &src, w, h, 3).unwrap();
        for (i, px) in src.chunks_exact(3).enumerate() {
            let rgb = [px[0].to_f32(), px[1].to_f32(), px[2].to_f32()];
            let expect = stack.apply(rgb).map(u8::from_f32);
            assert_eq!(&out[i * 3..i * 3 + 3], &expect);
        }
    }

    #[test]
    fn dimension_threshold() {
        assert!(!exceeds_max_dimension(MAX_DIMENSION, MAX_DIMENSION));
        assert!(exceeds_max_dimension(MAX_DIMENSION + 1, 1));
        assert!(exceeds_max_dimension(1, MAX_DIMENSION + 1));
    }
}

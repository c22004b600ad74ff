//! Layer cascade.
//!
//! ```text
//! current = base
//! for layer in stack (bottom first):
//!     skip no-op layers
//!     graded  = sample(layer.table, current)
//!     current = blend(current, graded, layer.opacity)
//! return current
//! ```
//!
//! Stateless and deterministic. With every layer a no-op the input is
//! returned bit-for-bit, including values outside `[0, 1]`.

use lutstack_core::Rgb;

use crate::{BlendPolicy, Layer, LayerStack};

/// Applies `stack` to one color.
///
/// # Example
///
/// ```rust
/// use lutstack_color::{composite_pixel, LayerStack};
///
/// let c = [0.25, 0.5, 0.75];
/// assert_eq!(composite_pixel(&LayerStack::new(), c), c);
/// ```
#[inline]
pub fn composite_pixel(stack: &LayerStack, rgb: Rgb) -> Rgb {
    composite_layers(stack.layers(), stack.policy(), rgb)
}

/// Applies `layers` in order under `policy`.
pub fn composite_layers(layers: &[Layer], policy: BlendPolicy, rgb: Rgb) -> Rgb {
    layers
        .iter()
        .fold(rgb, |current, layer| layer.apply(current, policy))
}

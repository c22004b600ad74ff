//! Color-grade layers and the ordered layer stack.
//!
//! A [`Layer`] is one LUT pass: a shared table, an opacity and an enabled
//! flag. A [`LayerStack`] holds up to [`MAX_LAYERS`] of them in order plus
//! the [`BlendPolicy`] used for all of them.
//!
//! Layers are cheap to rebuild; the UI creates or edits them on every
//! interaction and hands the stack to the compositor by reference.

use std::sync::Arc;

use lutstack_core::Rgb;
use lutstack_lut::{sample, LutResult, LutTable};
use tracing::{debug, warn};

use crate::{BlendPolicy, ColorError, ColorResult};

/// Maximum number of layers in a stack.
pub const MAX_LAYERS: usize = 3;

/// One color-grade pass.
///
/// A layer with no table, `enabled == false`, or zero opacity is a no-op:
/// it is skipped without sampling.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    /// Table to sample, or `None` for pass-through.
    pub table: Option<Arc<LutTable>>,
    /// Opacity in `[0, 1]`; out-of-range values are clamped when blending.
    pub opacity: f32,
    /// Whether the layer takes part in compositing.
    pub enabled: bool,
    /// Display name.
    pub name: Option<String>,
}

impl Layer {
    /// Creates an enabled layer.
    pub fn new(table: Arc<LutTable>, opacity: f32) -> Self {
        Self {
            table: Some(table),
            opacity,
            enabled: true,
            name: None,
        }
    }

    /// Creates a layer that never changes color.
    pub fn pass_through() -> Self {
        Self::default()
    }

    /// Creates a layer from the outcome of loading its table.
    ///
    /// A failed load yields an enabled pass-through layer, so one bad LUT
    /// never takes down the rest of the stack.
    pub fn from_load_result(result: LutResult<Arc<LutTable>>, opacity: f32) -> Self {
        match result {
            Ok(table) => Self::new(table, opacity),
            Err(err) => {
                warn!(error = %err, "LUT failed to load, layer passes through");
                Self {
                    table: None,
                    opacity,
                    enabled: true,
                    name: None,
                }
            }
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Returns true if this layer cannot change color.
    #[inline]
    pub fn is_noop(&self) -> bool {
        // NaN opacity compares false and counts as zero
        !self.enabled || self.table.is_none() || !(self.opacity > 0.0)
    }

    /// Applies this layer to `rgb` under `policy`.
    #[inline]
    pub fn apply(&self, rgb: Rgb, policy: BlendPolicy) -> Rgb {
        match &self.table {
            Some(table) if !self.is_noop() => {
                let graded = sample::sample(table, rgb);
                policy.blend(rgb, graded, self.opacity)
            }
            _ => rgb,
        }
    }
}

/// Ordered layers applied as a cascade.
///
/// Layer `i + 1` grades the output of layer `i`, never the original pixel.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use lutstack_color::{Layer, LayerStack};
/// use lutstack_lut::LutTable;
///
/// let darken = Arc::new(LutTable::from_fn(17, |[r, g, b]| [r * 0.5, g * 0.5, b * 0.5]));
/// let stack = LayerStack::new()
///     .with_layer(Layer::new(darken.clone(), 1.0))?
///     .with_layer(Layer::new(darken, 1.0))?;
///
/// let out = stack.apply([1.0, 1.0, 1.0]);
/// assert!((out[0] - 0.25).abs() < 1e-5);
/// # Ok::<(), lutstack_color::ColorError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    layers: Vec<Layer>,
    policy: BlendPolicy,
}

impl LayerStack {
    /// Creates an empty stack with the default [`BlendPolicy::Linear`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stack from layers, failing past [`MAX_LAYERS`].
    pub fn from_layers<I: IntoIterator<Item = Layer>>(layers: I) -> ColorResult<Self> {
        let mut stack = Self::new();
        for layer in layers {
            stack.push(layer)?;
        }
        Ok(stack)
    }

    /// Sets the blend policy.
    pub fn with_policy(mut self, policy: BlendPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Appends a layer (builder form of [`push`](Self::push)).
    pub fn with_layer(mut self, layer: Layer) -> ColorResult<Self> {
        self.push(layer)?;
        Ok(self)
    }

    /// Appends a layer on top of the stack.
    pub fn push(&mut self, layer: Layer) -> ColorResult<()> {
        if self.layers.len() >= MAX_LAYERS {
            return Err(ColorError::TooManyLayers { max: MAX_LAYERS });
        }
        debug!(
            index = self.layers.len(),
            name = layer.name.as_deref(),
            opacity = layer.opacity,
            enabled = layer.enabled,
            "push layer"
        );
        self.layers.push(layer);
        Ok(())
    }

    /// Blend policy used by every layer.
    #[inline]
    pub fn policy(&self) -> BlendPolicy {
        self.policy
    }

    /// Layers, bottom first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable access to one layer, for UI edits between composites.
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Number of layers, including no-ops.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if the stack has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of layers that can change color.
    pub fn active_count(&self) -> usize {
        self.layers.iter().filter(|l| !l.is_noop()).count()
    }

    /// Applies the whole stack to one color.
    ///
    /// See [`composite_pixel`](crate::composite_pixel).
    #[inline]
    pub fn apply(&self, rgb: Rgb) -> Rgb {
        crate::composite_pixel(self, rgb)
    }
}

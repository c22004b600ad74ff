//! Immutable 3D lookup table.
//!
//! A [`LutTable`] maps RGB input to RGB output through a cube of `size^3`
//! color values. Typical sizes are 17, 33 and 65.
//!
//! # Layout
//!
//! Entries are stored red-fastest, exactly as they appear in a `.cube` file:
//!
//! ```text
//! index = r + g * size + b * size^2
//! ```
//!
//! Tables have no mutation API. Build one, optionally set its title and
//! interpolation, then share it behind an `Arc` for any number of readers.

use lutstack_core::{decode_u8, encode_u8, Rgb};

use crate::{sample, Interpolation, LutError, LutResult};

/// Largest grid size accepted from external sources.
pub const MAX_SIZE: usize = 256;

/// A 3-dimensional lookup table.
///
/// # Example
///
/// ```rust
/// use lutstack_lut::LutTable;
///
/// let lut = LutTable::identity(33);
/// let out = lut.apply([0.5, 0.3, 0.2]);
/// assert!((out[0] - 0.5).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LutTable {
    size: usize,
    data: Vec<Rgb>,
    title: Option<String>,
    interpolation: Interpolation,
}

/// Builds a table from flattened float triplets.
///
/// `triplets` holds `size^3 * 3` floats, red-fastest. Anything else fails
/// with [`LutError::MalformedTable`].
///
/// # Example
///
/// ```rust
/// use lutstack_lut::build_table;
///
/// let flat = [
///     0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0,
///     0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0,
/// ];
/// let lut = build_table(2, &flat).unwrap();
/// assert_eq!(lut.size(), 2);
///
/// assert!(build_table(2, &flat[..21]).is_err());
/// ```
pub fn build_table(size: usize, triplets: &[f32]) -> LutResult<LutTable> {
    let expected = expected_len(size)?
        .checked_mul(3)
        .ok_or_else(|| LutError::MalformedTable(format!("size {size} overflows")))?;
    if triplets.len() != expected {
        return Err(LutError::MalformedTable(format!(
            "expected {} floats for size {}, got {}",
            expected,
            size,
            triplets.len()
        )));
    }
    let data = triplets
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    LutTable::from_rgb(data, size)
}

/// Number of entries for a grid size, rejecting 0 and overflow.
fn expected_len(size: usize) -> LutResult<usize> {
    if size == 0 {
        return Err(LutError::MalformedTable("size must be at least 1".into()));
    }
    size.checked_mul(size)
        .and_then(|v| v.checked_mul(size))
        .ok_or_else(|| LutError::MalformedTable(format!("size {size} overflows")))
}

/// Normalized coordinate of grid node `i`.
#[inline]
pub(crate) fn node_value(i: usize, size: usize) -> f32 {
    if size <= 1 {
        0.0
    } else {
        i as f32 / (size - 1) as f32
    }
}

impl LutTable {
    /// Creates an identity (pass-through) table.
    pub fn identity(size: usize) -> Self {
        Self::from_fn(size, |rgb| rgb)
    }

    /// Creates a table by evaluating `f` at every grid node.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lutstack_lut::LutTable;
    ///
    /// // Invert every channel
    /// let lut = LutTable::from_fn(17, |[r, g, b]| [1.0 - r, 1.0 - g, 1.0 - b]);
    /// assert_eq!(lut.apply([0.0, 0.0, 0.0]), [1.0, 1.0, 1.0]);
    /// ```
    pub fn from_fn<F: Fn(Rgb) -> Rgb>(size: usize, f: F) -> Self {
        let mut data = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push(f([
                        node_value(r, size),
                        node_value(g, size),
                        node_value(b, size),
                    ]));
                }
            }
        }
        Self {
            size,
            data,
            title: None,
            interpolation: Interpolation::default(),
        }
    }

    /// Creates a table from red-fastest RGB entries.
    ///
    /// Data must hold exactly `size^3` entries.
    pub fn from_rgb(data: Vec<Rgb>, size: usize) -> LutResult<Self> {
        let expected = expected_len(size)?;
        if data.len() != expected {
            return Err(LutError::MalformedTable(format!(
                "expected {} entries for size {}, got {}",
                expected,
                size,
                data.len()
            )));
        }
        Ok(Self {
            size,
            data,
            title: None,
            interpolation: Interpolation::default(),
        })
    }

    /// Builds a table from an 8-bit RGB texel buffer (`size^3 * 3` bytes).
    pub fn from_texels_u8(size: usize, texels: &[u8]) -> LutResult<Self> {
        let floats: Vec<f32> = texels.iter().map(|&t| decode_u8(t)).collect();
        build_table(size, &floats)
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the interpolation method.
    pub fn with_interpolation(mut self, interp: Interpolation) -> Self {
        self.interpolation = interp;
        self
    }

    /// Grid size per axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Red-fastest entries.
    #[inline]
    pub fn data(&self) -> &[Rgb] {
        &self.data
    }

    /// Title from the source file, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Interpolation used by [`apply`](Self::apply).
    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Total number of entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    /// Flat index of grid node (r, g, b).
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + g * self.size + b * self.size * self.size
    }

    /// Value at grid node (r, g, b).
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> Rgb {
        self.data[self.index(r, g, b)]
    }

    /// Per-channel minimum and maximum over all entries.
    pub fn value_range(&self) -> (Rgb, Rgb) {
        let mut lo = [f32::INFINITY; 3];
        let mut hi = [f32::NEG_INFINITY; 3];
        for v in &self.data {
            for c in 0..3 {
                lo[c] = lo[c].min(v[c]);
                hi[c] = hi[c].max(v[c]);
            }
        }
        (lo, hi)
    }

    /// Returns true if every node maps to itself within `tolerance`.
    pub fn is_identity(&self, tolerance: f32) -> bool {
        let size = self.size;
        (0..size).all(|b| {
            (0..size).all(|g| {
                (0..size).all(|r| {
                    let v = self.get(r, g, b);
                    let n = [node_value(r, size), node_value(g, size), node_value(b, size)];
                    (0..3).all(|c| (v[c] - n[c]).abs() <= tolerance)
                })
            })
        })
    }

    /// Encodes entries to an 8-bit RGB texel buffer, red-fastest.
    pub fn to_texels_u8(&self) -> Vec<u8> {
        self.data
            .iter()
            .flat_map(|v| [encode_u8(v[0]), encode_u8(v[1]), encode_u8(v[2])])
            .collect()
    }

    /// The table as seen through 8-bit texel storage.
    ///
    /// Every entry is snapped to the nearest multiple of 1/255. Title and
    /// interpolation are kept.
    pub fn quantized_u8(&self) -> Self {
        let data = self
            .data
            .iter()
            .map(|v| {
                [
                    decode_u8(encode_u8(v[0])),
                    decode_u8(encode_u8(v[1])),
                    decode_u8(encode_u8(v[2])),
                ]
            })
            .collect();
        Self {
            size: self.size,
            data,
            title: self.title.clone(),
            interpolation: self.interpolation,
        }
    }

    /// Samples the table using its interpolation method.
    ///
    /// See [`sample::sample`].
    #[inline]
    pub fn apply(&self, rgb: Rgb) -> Rgb {
        sample::sample(self, rgb)
    }
}

//! 3D LUT sampling.
//!
//! Maps a continuous color in `[0, 1]^3` onto the table grid and interpolates
//! between the surrounding nodes.
//!
//! # Coordinate mapping
//!
//! ```text
//! coord  = clamp(color, 0, 1) * (size - 1)
//! lo     = floor(coord)
//! hi     = min(lo + 1, size - 1)
//! frac   = coord - lo
//! ```
//!
//! At the top edge `hi == lo`, so the cell collapses and interpolation is a
//! copy of the edge node. There is no wraparound and no out-of-bounds read.
//!
//! Coordinates within [`GRID_SNAP_ULPS`] float steps of a node are snapped
//! onto it, so `i / (size - 1)` reproduces the stored node exactly even
//! though that quotient is not exact in f32. Anything farther away, however
//! close, is interpolated.
//!
//! # Trilinear order
//!
//! Red is interpolated first (4 lerps), then green (2), then blue (1). Each
//! lerp is `a + (b - a) * t`; `t == 0` returns `a` bit-for-bit.

use lutstack_core::{clamp_rgb, Rgb};

use crate::{Interpolation, LutTable};

/// Snap distance to a grid node, in units of `f32::EPSILON` relative to
/// the node index (at least 1).
pub const GRID_SNAP_ULPS: f32 = 4.0;

/// Grid cell enclosing a sample coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Lower node index per axis (r, g, b).
    pub lo: [usize; 3],
    /// Upper node index per axis, clamped to `size - 1`.
    pub hi: [usize; 3],
    /// Fractional position inside the cell per axis.
    pub frac: [f32; 3],
}

impl Cell {
    /// Locates the cell for an already clamped color.
    ///
    /// `size` must be at least 2.
    pub fn locate(size: usize, rgb: Rgb) -> Self {
        let n = (size - 1) as f32;
        let mut lo = [0usize; 3];
        let mut hi = [0usize; 3];
        let mut frac = [0.0f32; 3];
        for axis in 0..3 {
            let coord = snap(rgb[axis] * n);
            let base = (coord.floor() as usize).min(size - 1);
            lo[axis] = base;
            hi[axis] = (base + 1).min(size - 1);
            frac[axis] = coord - base as f32;
        }
        Self { lo, hi, frac }
    }

    /// The 8 corner values, indexed by `r_bit | g_bit << 1 | b_bit << 2`.
    ///
    /// Corner 0 is (lo, lo, lo), corner 1 is (hi, lo, lo), corner 7 is
    /// (hi, hi, hi).
    pub fn corners(&self, table: &LutTable) -> [Rgb; 8] {
        let [r0, g0, b0] = self.lo;
        let [r1, g1, b1] = self.hi;
        [
            table.get(r0, g0, b0),
            table.get(r1, g0, b0),
            table.get(r0, g1, b0),
            table.get(r1, g1, b0),
            table.get(r0, g0, b1),
            table.get(r1, g0, b1),
            table.get(r0, g1, b1),
            table.get(r1, g1, b1),
        ]
    }
}

#[inline]
fn snap(coord: f32) -> f32 {
    let node = coord.round();
    if (coord - node).abs() <= node.max(1.0) * GRID_SNAP_ULPS * f32::EPSILON {
        node
    } else {
        coord
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Samples `table` at `rgb` with the table's interpolation method.
///
/// Input is clamped to `[0, 1]^3` first. Tables with `size <= 1` are
/// treated as identity and return the clamped input. The result is clamped
/// to `[0, 1]^3`.
///
/// # Example
///
/// ```rust
/// use lutstack_lut::{sample, LutTable};
///
/// let lut = LutTable::identity(2);
/// let out = sample::sample(&lut, [0.3, 0.6, 0.9]);
/// assert!((out[1] - 0.6).abs() < 1e-6);
/// ```
#[inline]
pub fn sample(table: &LutTable, rgb: Rgb) -> Rgb {
    match table.interpolation() {
        Interpolation::Nearest => sample_nearest(table, rgb),
        Interpolation::Trilinear => sample_trilinear(table, rgb),
        Interpolation::Tetrahedral => sample_tetrahedral(table, rgb),
    }
}

/// Trilinear interpolation, red then green then blue.
pub fn sample_trilinear(table: &LutTable, rgb: Rgb) -> Rgb {
    let rgb = clamp_rgb(rgb);
    if table.size() <= 1 {
        return rgb;
    }

    let cell = Cell::locate(table.size(), rgb);
    let c = cell.corners(table);
    let [rf, gf, bf] = cell.frac;

    let mut out = [0.0f32; 3];
    for i in 0..3 {
        // red
        let c00 = lerp(c[0][i], c[1][i], rf);
        let c10 = lerp(c[2][i], c[3][i], rf);
        let c01 = lerp(c[4][i], c[5][i], rf);
        let c11 = lerp(c[6][i], c[7][i], rf);
        // green
        let c0 = lerp(c00, c10, gf);
        let c1 = lerp(c01, c11, gf);
        // blue
        out[i] = lerp(c0, c1, bf);
    }
    clamp_rgb(out)
}

/// Tetrahedral interpolation over the same cell.
pub fn sample_tetrahedral(table: &LutTable, rgb: Rgb) -> Rgb {
    let rgb = clamp_rgb(rgb);
    if table.size() <= 1 {
        return rgb;
    }

    let cell = Cell::locate(table.size(), rgb);
    let c = cell.corners(table);
    let [rf, gf, bf] = cell.frac;
    let [c000, c100, c010, c110, c001, c101, c011, c111] = c;

    // Path from c000 to c111 through the tetrahedron containing the point,
    // with the fractions in descending order as weights.
    let (p1, p2, [w1, w2, w3]) = if rf > gf {
        if gf > bf {
            (c100, c110, [rf, gf, bf])
        } else if rf > bf {
            (c100, c101, [rf, bf, gf])
        } else {
            (c001, c101, [bf, rf, gf])
        }
    } else if gf > bf {
        if rf > bf {
            (c010, c110, [gf, rf, bf])
        } else {
            (c010, c011, [gf, bf, rf])
        }
    } else {
        (c001, c011, [bf, gf, rf])
    };

    let mut out = [0.0f32; 3];
    for i in 0..3 {
        out[i] = c000[i] + w1 * (p1[i] - c000[i]) + w2 * (p2[i] - p1[i]) + w3 * (c111[i] - p2[i]);
    }
    clamp_rgb(out)
}

/// Nearest-node lookup.
pub fn sample_nearest(table: &LutTable, rgb: Rgb) -> Rgb {
    let rgb = clamp_rgb(rgb);
    let size = table.size();
    if size <= 1 {
        return rgb;
    }

    let n = (size - 1) as f32;
    let idx = |v: f32| ((v * n).round() as usize).min(size - 1);
    clamp_rgb(table.get(idx(rgb[0]), idx(rgb[1]), idx(rgb[2])))
}

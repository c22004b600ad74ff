//! Interpolation methods for LUT evaluation.

/// Interpolation method for LUT evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Nearest grid node (no interpolation).
    Nearest,

    /// Trilinear: red axis first, then green, then blue.
    ///
    /// Default method, and the one reference renderers use.
    #[default]
    Trilinear,

    /// Tetrahedral: blends 4 of the 8 cell corners.
    Tetrahedral,
}

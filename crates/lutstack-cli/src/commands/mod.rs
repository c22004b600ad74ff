//! CLI command implementations

pub mod apply;
pub mod identity;
pub mod info;
pub mod sample;

use anyhow::{Context, Result};
use lutstack_lut::{cube, LutTable};
use std::path::Path;

/// Load a .cube table from path
pub fn load_lut(path: &Path) -> Result<LutTable> {
    cube::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save a .cube table to path
pub fn save_lut(path: &Path, lut: &LutTable) -> Result<()> {
    cube::write(path, lut).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Format an RGB triplet for display
pub fn format_rgb(rgb: [f32; 3]) -> String {
    format!("{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2])
}

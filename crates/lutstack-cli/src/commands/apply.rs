//! Raw buffer grading command.
//!
//! Input and output are headerless interleaved buffers: one byte per channel
//! at depth 8, little-endian `u16` at depth 16.

use crate::config::StackConfig;
use crate::ApplyArgs;
use anyhow::{bail, Context, Result};
use lutstack_color::LayerStack;
use lutstack_core::Enhancement;
use lutstack_lut::LutCache;
use lutstack_ops::batch;
use std::fs;
use tracing::{info, warn};

pub fn run(args: ApplyArgs, verbose: bool) -> Result<()> {
    let config = match &args.config {
        Some(path) => StackConfig::load(path)?,
        None if !args.lut.is_empty() => StackConfig::from_specs(&args.lut),
        None => bail!("Either --config or at least one --lut is required"),
    };

    let mut cache = LutCache::new();
    let stack = config.build_stack(&mut cache, config.blend_policy(args.policy))?;
    if stack.active_count() < stack.len() {
        warn!(
            active = stack.active_count(),
            total = stack.len(),
            "some layers are inactive"
        );
    }
    if batch::exceeds_max_dimension(args.width, args.height) {
        warn!(
            width = args.width,
            height = args.height,
            max = batch::MAX_DIMENSION,
            "image exceeds recommended size; consider downscaling"
        );
    }

    let enhancement = args.contrast.map_or(Enhancement::None, Enhancement::Contrast);
    let raw = fs::read(&args.input)
        .with_context(|| format!("Failed to read: {}", args.input.display()))?;

    let out = match args.depth {
        8 => grade_u8(raw, &stack, &args, enhancement)?,
        16 => grade_u16(&raw, &stack, &args, enhancement)?,
        d => bail!("Unsupported depth: {} (expected 8 or 16)", d),
    };

    fs::write(&args.output, &out)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;

    info!(
        layers = stack.active_count(),
        width = args.width,
        height = args.height,
        "graded {}",
        args.output.display()
    );
    if verbose {
        println!(
            "Applied {} layer(s) to {} -> {}",
            stack.active_count(),
            args.input.display(),
            args.output.display()
        );
    }
    Ok(())
}

fn grade_u8(
    mut buf: Vec<u8>,
    stack: &LayerStack,
    args: &ApplyArgs,
    enhancement: Enhancement,
) -> Result<Vec<u8>> {
    batch::composite_image_with(
        stack,
        &mut buf,
        args.width,
        args.height,
        args.channels,
        enhancement,
    )
    .context("Compositing failed")?;
    Ok(buf)
}

fn grade_u16(
    raw: &[u8],
    stack: &LayerStack,
    args: &ApplyArgs,
    enhancement: Enhancement,
) -> Result<Vec<u8>> {
    if raw.len() % 2 != 0 {
        bail!("16-bit input has odd byte length {}", raw.len());
    }
    let mut buf: Vec<u16> = raw
        .chunks_exact(2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .collect();
    batch::composite_image_with(
        stack,
        &mut buf,
        args.width,
        args.height,
        args.channels,
        enhancement,
    )
    .context("Compositing failed")?;
    Ok(buf.iter().flat_map(|v| v.to_le_bytes()).collect())
}

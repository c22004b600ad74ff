//! Single-color sampling command.

use crate::SampleArgs;
use anyhow::{bail, Result};
use lutstack_lut::{sample, Interpolation};
use tracing::debug;

pub fn run(args: SampleArgs, verbose: bool) -> Result<()> {
    let [r, g, b] = args.rgb[..] else {
        bail!("--rgb takes exactly three values, got {}", args.rgb.len());
    };
    let interp = Interpolation::from(args.interp);

    let lut = super::load_lut(&args.lut)?.with_interpolation(interp);
    debug!(size = lut.size(), ?interp, "sampling");

    let out = sample::sample(&lut, [r, g, b]);
    if verbose {
        println!("{} -> {}", super::format_rgb([r, g, b]), super::format_rgb(out));
    } else {
        println!("{}", super::format_rgb(out));
    }
    Ok(())
}

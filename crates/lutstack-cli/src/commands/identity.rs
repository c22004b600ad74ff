//! Identity table writer.

use crate::IdentityArgs;
use anyhow::{bail, Result};
use lutstack_lut::{LutTable, MAX_SIZE};

pub fn run(args: IdentityArgs, verbose: bool) -> Result<()> {
    if !(2..=MAX_SIZE).contains(&args.size) {
        bail!("Size must be in 2..={}, got {}", MAX_SIZE, args.size);
    }

    let mut lut = LutTable::identity(args.size);
    if let Some(title) = args.title {
        lut = lut.with_title(title);
    }
    super::save_lut(&args.output, &lut)?;

    if verbose {
        println!("Wrote {}^3 identity to {}", args.size, args.output.display());
    }
    Ok(())
}

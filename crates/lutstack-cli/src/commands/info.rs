//! Table info command.

use crate::InfoArgs;
use anyhow::Result;

/// Prints size, title, entry count and value range of each table.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        let lut = super::load_lut(path)?;
        let (min, max) = lut.value_range();

        println!("{}", path.display());
        if let Some(title) = lut.title() {
            println!("  Title:    {}", title);
        }
        println!("  Size:     {}x{}x{}", lut.size(), lut.size(), lut.size());
        println!("  Entries:  {}", lut.entry_count());
        println!("  Min:      {}", super::format_rgb(min));
        println!("  Max:      {}", super::format_rgb(max));
        if verbose {
            println!("  Identity: {}", lut.is_identity(1e-5));
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

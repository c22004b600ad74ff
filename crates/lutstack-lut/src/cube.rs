//! Adobe/Resolve .cube LUT format support.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "LUT Name"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! Data lines are red-fastest (blue outer loop, green middle, red inner),
//! which is also the in-memory order of [`LutTable`], so no reordering
//! happens in either direction.
//!
//! `TITLE` is kept on the table. `DOMAIN_MIN`/`DOMAIN_MAX` and other
//! keywords are metadata and skipped; sampling always covers `[0, 1]`.
//! 1D LUTs are rejected.
//!
//! # Example
//!
//! ```rust,ignore
//! use lutstack_lut::cube;
//!
//! let lut = cube::read("grade.cube")?;
//! let rgb = lut.apply([0.5, 0.3, 0.2]);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::table::MAX_SIZE;
use crate::{LutError, LutResult, LutTable};

/// Reads a 3D LUT from a .cube file.
pub fn read<P: AsRef<Path>>(path: P) -> LutResult<LutTable> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading .cube");
    let file = File::open(path)?;
    parse(BufReader::new(file))
}

/// Parses a 3D LUT from a reader.
pub fn parse<R: BufRead>(reader: R) -> LutResult<LutTable> {
    let mut size: Option<usize> = None;
    let mut title: Option<String> = None;
    let mut data: Vec<[f32; 3]> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let line_no = line_no + 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("TITLE") {
            title = Some(rest.trim().trim_matches('"').to_string());
        } else if line.starts_with("LUT_3D_SIZE") {
            let n = parse_size(line, line_no)?;
            if n < 2 || n > MAX_SIZE {
                return Err(LutError::ParseError(format!(
                    "line {line_no}: LUT_3D_SIZE {n} outside 2..={MAX_SIZE}"
                )));
            }
            data.reserve(n * n * n);
            size = Some(n);
        } else if line.starts_with("LUT_1D_SIZE") {
            return Err(LutError::ParseError("expected 3D LUT, found 1D".into()));
        } else if starts_with_keyword(line) {
            // DOMAIN_MIN, DOMAIN_MAX, LUT_3D_INPUT_RANGE, vendor keywords
            trace!(line_no, keyword = line.split_whitespace().next(), "skipping .cube metadata");
        } else {
            data.push(parse_rgb(line, line_no)?);
        }
    }

    let size = size.ok_or_else(|| LutError::ParseError("missing LUT_3D_SIZE".into()))?;
    let mut lut = LutTable::from_rgb(data, size)?;
    if let Some(title) = title {
        lut = lut.with_title(title);
    }

    debug!(size, title = lut.title(), "parsed .cube");
    Ok(lut)
}

/// Writes a 3D LUT to a .cube file.
///
/// # Example
///
/// ```rust,ignore
/// let lut = LutTable::identity(33);
/// cube::write("identity.cube", &lut)?;
/// ```
pub fn write<P: AsRef<Path>>(path: P, lut: &LutTable) -> LutResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, lut)?;
    writer.flush()?;
    Ok(())
}

/// Writes a 3D LUT in .cube text form to any writer.
pub fn write_to<W: Write>(writer: &mut W, lut: &LutTable) -> LutResult<()> {
    writeln!(writer, "# Generated by lutstack")?;
    if let Some(title) = lut.title() {
        writeln!(writer, "TITLE \"{}\"", title)?;
    }
    writeln!(writer, "LUT_3D_SIZE {}", lut.size())?;
    writeln!(writer)?;

    for rgb in lut.data() {
        writeln!(writer, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2])?;
    }

    Ok(())
}

// Helper functions

fn starts_with_keyword(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

fn parse_size(line: &str, line_no: usize) -> LutResult<usize> {
    line.split_whitespace()
        .nth(1)
        .ok_or_else(|| LutError::ParseError(format!("line {line_no}: invalid size line")))?
        .parse()
        .map_err(|_| LutError::ParseError(format!("line {line_no}: invalid size value")))
}

fn parse_rgb(line: &str, line_no: usize) -> LutResult<[f32; 3]> {
    let mut parts = line.split_whitespace();
    let mut next = |channel: &str| -> LutResult<f32> {
        parts
            .next()
            .ok_or_else(|| {
                LutError::ParseError(format!("line {line_no}: invalid RGB line: {line}"))
            })?
            .parse()
            .map_err(|_| LutError::ParseError(format!("line {line_no}: invalid {channel} value")))
    };
    Ok([next("R")?, next("G")?, next("B")?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CORNERS: &str = r#"
# Test LUT
TITLE "Test Grade"
LUT_3D_SIZE 2
DOMAIN_MIN 0.0 0.0 0.0
DOMAIN_MAX 1.0 1.0 1.0

0.0 0.0 0.0
1.0 0.0 0.0
0.0 1.0 0.0
1.0 1.0 0.0
0.0 0.0 1.0
1.0 0.0 1.0
0.0 1.0 1.0
1.0 1.0 1.0
"#;

    #[test]
    fn parse_3d_cube() {
        let lut = parse(Cursor::new(CORNERS)).expect("parse failed");
        assert_eq!(lut.size(), 2);
        assert_eq!(lut.title(), Some("Test Grade"));
        // red-fastest: second line is r=1, g=0, b=0
        assert_eq!(lut.get(1, 0, 0), [1.0, 0.0, 0.0]);
        assert_eq!(lut.get(0, 1, 0), [0.0, 1.0, 0.0]);
        assert_eq!(lut.get(0, 0, 1), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn rejects_wrong_entry_count() {
        let short = CORNERS.replace("1.0 1.0 1.0\n", "");
        let err = parse(Cursor::new(short)).unwrap_err();
        assert!(matches!(err, LutError::MalformedTable(_)));
    }

    #[test]
    fn rejects_1d() {
        let err = parse(Cursor::new("LUT_1D_SIZE 3\n0 0 0\n0.5 0.5 0.5\n1 1 1\n")).unwrap_err();
        assert!(matches!(err, LutError::ParseError(_)));
    }

    #[test]
    fn rejects_missing_size() {
        assert!(parse(Cursor::new("0 0 0\n")).is_err());
    }

    #[test]
    fn reports_bad_line_number() {
        let text = "LUT_3D_SIZE 2\n0 0 0\n1 x 0\n";
        let err = parse(Cursor::new(text)).unwrap_err().to_string();
        assert!(err.contains("line 3"), "{err}");
    }

    #[test]
    fn roundtrip_through_file() {
        let lut = LutTable::from_fn(4, |[r, g, b]| [r * 0.5, g, 1.0 - b]).with_title("Half Red");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.cube");

        write(&path, &lut).expect("write failed");
        let loaded = read(&path).expect("read failed");

        assert_eq!(loaded.size(), 4);
        assert_eq!(loaded.title(), Some("Half Red"));
        for (a, b) in lut.data().iter().zip(loaded.data()) {
            for c in 0..3 {
                assert!((a[c] - b[c]).abs() < 1e-6);
            }
        }
    }
}

//! ESRI ASCII grid rasters (`.asc`) with an optional `.prj` CRS sidecar.
//!
//! Header keys are case-insensitive:
//!
//! ```text
//! ncols        4
//! nrows        3
//! xllcorner    1000.0      (or xllcenter)
//! yllcorner    1970.0      (or yllcenter)
//! cellsize     10.0        (or dx / dy)
//! NODATA_value -9999       (optional)
//! ```
//!
//! followed by `nrows * ncols` whitespace-separated values, north row first.
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use glam::DVec2;
use tracing::debug;

use super::{RasterSink, RasterSource};
use crate::error::{Error, Result};
use crate::raster::{GeoTransform, Raster};

#[derive(Default)]
struct Header {
    ncols: Option<usize>,
    nrows: Option<usize>,
    xll: Option<(f64, bool)>,
    yll: Option<(f64, bool)>,
    cellsize: Option<f64>,
    dx: Option<f64>,
    dy: Option<f64>,
    nodata: Option<f32>,
}

fn parse_number<T: std::str::FromStr>(line: usize, key: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::parse(line, format!("invalid value '{raw}' for '{key}'")))
}

impl Header {
    fn set(&mut self, line: usize, key: &str, raw: &str) -> Result<()> {
        match key.to_ascii_lowercase().as_str() {
            "ncols" => self.ncols = Some(parse_number(line, key, raw)?),
            "nrows" => self.nrows = Some(parse_number(line, key, raw)?),
            "xllcorner" => self.xll = Some((parse_number(line, key, raw)?, false)),
            "xllcenter" => self.xll = Some((parse_number(line, key, raw)?, true)),
            "yllcorner" => self.yll = Some((parse_number(line, key, raw)?, false)),
            "yllcenter" => self.yll = Some((parse_number(line, key, raw)?, true)),
            "cellsize" => self.cellsize = Some(parse_number(line, key, raw)?),
            "dx" => self.dx = Some(parse_number(line, key, raw)?),
            "dy" => self.dy = Some(parse_number(line, key, raw)?),
            "nodata_value" => self.nodata = Some(parse_number(line, key, raw)?),
            _ => return Err(Error::parse(line, format!("unknown header key '{key}'"))),
        }
        Ok(())
    }

    fn transform(&self, line: usize) -> Result<(usize, usize, GeoTransform)> {
        let missing = |key: &str| Error::parse(line, format!("missing header key '{key}'"));
        let cols = self.ncols.ok_or_else(|| missing("ncols"))?;
        let rows = self.nrows.ok_or_else(|| missing("nrows"))?;
        let (xll, x_center) = self.xll.ok_or_else(|| missing("xllcorner"))?;
        let (yll, y_center) = self.yll.ok_or_else(|| missing("yllcorner"))?;
        let dx = self
            .dx
            .or(self.cellsize)
            .ok_or_else(|| missing("cellsize"))?;
        let dy = self
            .dy
            .or(self.cellsize)
            .ok_or_else(|| missing("cellsize"))?;
        if dx <= 0.0 || dy <= 0.0 {
            return Err(Error::parse(line, "cell size must be > 0"));
        }

        let left = if x_center { xll - dx / 2.0 } else { xll };
        let bottom = if y_center { yll - dy / 2.0 } else { yll };
        let top = bottom + dy * rows as f64;
        let transform = GeoTransform::north_up(DVec2::new(left, top), dx, dy)?;
        Ok((rows, cols, transform))
    }
}

/// Read an ASCII grid from any buffered reader. The CRS is left unset.
pub fn read_ascii_grid<R: BufRead>(reader: R) -> Result<Raster> {
    let mut header = Header::default();
    let mut values = Vec::new();
    let mut in_body = false;
    let mut last_line = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        last_line = line_no;
        let mut tokens = line.split_whitespace().peekable();
        let Some(first) = tokens.peek() else {
            continue;
        };

        if !in_body && first.parse::<f64>().is_err() {
            let key = tokens.next().unwrap_or_default();
            let Some(raw) = tokens.next() else {
                return Err(Error::parse(line_no, format!("header key '{key}' has no value")));
            };
            header.set(line_no, key, raw)?;
            continue;
        }

        in_body = true;
        for tok in tokens {
            let v: f32 = tok
                .parse()
                .map_err(|_| Error::parse(line_no, format!("invalid cell value '{tok}'")))?;
            values.push(v);
        }
    }

    let (rows, cols, transform) = header.transform(last_line)?;
    let cells = rows
        .checked_mul(cols)
        .ok_or_else(|| Error::parse(last_line, format!("grid of {rows}x{cols} is too large")))?;
    if values.len() != cells {
        return Err(Error::parse(
            last_line,
            format!("expected {cells} cell values, found {}", values.len()),
        ));
    }

    debug!(rows, cols, nodata = ?header.nodata, "read ascii grid");
    Ok(Raster::new(rows, cols, values, transform)?.with_nodata(header.nodata))
}

/// Write `raster` as an ASCII grid. Only north-up transforms can be represented.
pub fn write_ascii_grid<W: Write>(writer: W, raster: &Raster) -> Result<()> {
    let transform = raster.transform();
    if !transform.is_north_up() {
        return Err(Error::InvalidConfig(
            "ascii grids only support north-up transforms without rotation".into(),
        ));
    }
    let [a, _, c, _, e, f] = transform.coefficients();
    let (rows, cols) = raster.shape();
    let dy = -e;

    let mut w = BufWriter::new(writer);
    writeln!(w, "ncols {cols}")?;
    writeln!(w, "nrows {rows}")?;
    writeln!(w, "xllcorner {c}")?;
    writeln!(w, "yllcorner {}", f - dy * rows as f64)?;
    if a == dy {
        writeln!(w, "cellsize {a}")?;
    } else {
        writeln!(w, "dx {a}")?;
        writeln!(w, "dy {dy}")?;
    }
    if let Some(nd) = raster.nodata() {
        writeln!(w, "NODATA_value {nd}")?;
    }
    for row in raster.values().chunks(cols) {
        let mut first = true;
        for v in row {
            if !first {
                w.write_all(b" ")?;
            }
            write!(w, "{v}")?;
            first = false;
        }
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

/// File-backed ASCII grid collaborator. The CRS lives in a sibling `.prj` file.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsciiGrid;

impl RasterSource for AsciiGrid {
    fn read_raster(&self, path: &Path) -> Result<Raster> {
        let raster = read_ascii_grid(BufReader::new(File::open(path)?))?;
        let crs = super::read_prj(path)?;
        Ok(raster.with_crs(crs))
    }
}

impl RasterSink for AsciiGrid {
    fn write_raster(&self, path: &Path, raster: &Raster) -> Result<()> {
        write_ascii_grid(File::create(path)?, raster)?;
        if let Some(crs) = raster.crs() {
            fs::write(path.with_extension("prj"), crs.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::raster::Crs;

    const SAMPLE: &str = "\
ncols 4
NROWS 3
xllcorner 1000
yllcorner 1970
cellsize 10
NODATA_value -9999
0 1 2 3
10 -9999 12 13
20 21 22 23
";

    #[test]
    fn reads_header_and_values() {
        let r = read_ascii_grid(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(r.shape(), (3, 4));
        assert_eq!(r.nodata(), Some(-9999.0));
        assert_eq!(r.get(1, 1), Some(-9999.0));
        assert_eq!(r.get(2, 3), Some(23.0));
        assert_eq!(
            r.transform().coefficients(),
            [10.0, 0.0, 1000.0, 0.0, -10.0, 2000.0]
        );
    }

    #[test]
    fn center_registration_shifts_by_half_a_cell() {
        let text = "ncols 1\nnrows 1\nxllcenter 5\nyllcenter 5\ncellsize 10\n7\n";
        let r = read_ascii_grid(Cursor::new(text)).unwrap();
        assert_eq!(r.transform().coefficients()[2], 0.0);
        assert_eq!(r.transform().coefficients()[5], 10.0);
    }

    #[test]
    fn roundtrip_preserves_grid() {
        let original = read_ascii_grid(Cursor::new(SAMPLE)).unwrap();
        let mut buf = Vec::new();
        write_ascii_grid(&mut buf, &original).unwrap();
        let back = read_ascii_grid(Cursor::new(buf)).unwrap();

        assert_eq!(back.shape(), original.shape());
        assert!(back.transform().abs_diff_eq(original.transform(), 1e-9));
        assert_eq!(back.nodata(), original.nodata());
        for (a, b) in back.values().iter().zip(original.values()) {
            assert!((a - b).abs() <= 1e-6);
        }
    }

    #[test]
    fn roundtrip_handles_rectangular_cells_and_nan_nodata() {
        let t = GeoTransform::north_up(DVec2::new(-5.5, 12.25), 0.5, 2.0).unwrap();
        let r = Raster::new(2, 2, vec![0.125, f32::NAN, 0.3, 1.0], t)
            .unwrap()
            .with_nodata(Some(f32::NAN));
        let mut buf = Vec::new();
        write_ascii_grid(&mut buf, &r).unwrap();
        let back = read_ascii_grid(Cursor::new(buf)).unwrap();

        assert!(back.transform().abs_diff_eq(r.transform(), 1e-9));
        assert!(back.nodata().is_some_and(f32::is_nan));
        assert!(back.values()[1].is_nan());
        assert_eq!(back.values()[2], 0.3);
    }

    #[test]
    fn rotated_transform_cannot_be_written() {
        let t = GeoTransform::from_coefficients(1.0, 0.2, 0.0, 0.0, -1.0, 0.0).unwrap();
        let r = Raster::filled(1, 1, 0.0, t).unwrap();
        assert!(matches!(
            write_ascii_grid(Vec::new(), &r),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_input_reports_line() {
        let bad_value = "ncols 2\nnrows 1\nxllcorner 0\nyllcorner 0\ncellsize 1\n1 x\n";
        assert!(matches!(
            read_ascii_grid(Cursor::new(bad_value)),
            Err(Error::Parse { line: 6, .. })
        ));

        let short = "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 1\n1 2 3\n";
        assert!(matches!(
            read_ascii_grid(Cursor::new(short)),
            Err(Error::Parse { .. })
        ));

        let oversized = "\
ncols 8589934592
nrows 8589934592
xllcorner 0
yllcorner 0
cellsize 1
1
";
        assert!(matches!(
            read_ascii_grid(Cursor::new(oversized)),
            Err(Error::Parse { line: 6, .. })
        ));

        let no_size = "ncols 1\nnrows 1\nxllcorner 0\nyllcorner 0\n1\n";
        assert!(matches!(
            read_ascii_grid(Cursor::new(no_size)),
            Err(Error::Parse { ref message, .. }) if message.contains("cellsize")
        ));
    }

    #[test]
    fn file_roundtrip_keeps_crs_sidecar() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("layer.asc");
        let r = read_ascii_grid(Cursor::new(SAMPLE))
            .unwrap()
            .with_crs(Some(Crs::epsg(32643)));

        AsciiGrid.write_raster(&path, &r).unwrap();
        let back = AsciiGrid.read_raster(&path).unwrap();
        assert_eq!(back.crs(), Some(&Crs::epsg(32643)));
        assert!(path.with_extension("prj").exists());
        assert_eq!(back.values(), r.values());
    }
}

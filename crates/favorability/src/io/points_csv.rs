//! Occurrence points from delimited text with an optional `.prj` CRS sidecar.
//!
//! The first row names the columns. Coordinates are read from the `x`/`y` columns,
//! falling back to `lon`/`lat` or `easting`/`northing`; other columns are ignored.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use glam::DVec2;
use tracing::debug;

use super::PointSource;
use crate::error::{Error, Result};
use crate::raster::Crs;
use crate::sampling::PointSet;

const X_NAMES: [&str; 4] = ["x", "lon", "longitude", "easting"];
const Y_NAMES: [&str; 4] = ["y", "lat", "latitude", "northing"];

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
}

/// Read points from CSV text, tagging them with `crs`.
pub fn read_points_csv<R: Read>(reader: R, crs: Option<Crs>) -> Result<PointSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let x_col = find_column(&headers, &X_NAMES)
        .ok_or_else(|| Error::parse(1, "no x/lon/easting column in header"))?;
    let y_col = find_column(&headers, &Y_NAMES)
        .ok_or_else(|| Error::parse(1, "no y/lat/northing column in header"))?;

    let mut points = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        let coord = |col: usize, axis: &str| -> Result<f64> {
            let raw = record.get(col).unwrap_or("");
            raw.parse()
                .map_err(|_| Error::parse(line, format!("invalid {axis} coordinate '{raw}'")))
        };
        points.push(DVec2::new(coord(x_col, "x")?, coord(y_col, "y")?));
    }

    debug!(points = points.len(), "read point csv");
    Ok(PointSet::new(points, crs))
}

/// File-backed CSV point collaborator. The CRS lives in a sibling `.prj` file.
#[derive(Clone, Copy, Debug, Default)]
pub struct CsvPoints;

impl PointSource for CsvPoints {
    fn read_points(&self, path: &Path) -> Result<PointSet> {
        let crs = super::read_prj(path)?;
        read_points_csv(File::open(path)?, crs)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn reads_named_columns_in_any_order() {
        let text = "id,Y,X\n1,2000.5,1000.25\n2, 1990 , 1010\n";
        let set = read_points_csv(text.as_bytes(), Some(Crs::epsg(32643))).unwrap();
        assert_eq!(
            set.points(),
            &[DVec2::new(1000.25, 2000.5), DVec2::new(1010.0, 1990.0)]
        );
        assert_eq!(set.crs(), Some(&Crs::epsg(32643)));
    }

    #[test]
    fn falls_back_to_lon_lat() {
        let set = read_points_csv("lat,lon\n10,20\n".as_bytes(), None).unwrap();
        assert_eq!(set.points(), &[DVec2::new(20.0, 10.0)]);
        assert!(set.crs().is_none());
    }

    #[test]
    fn missing_column_and_bad_number_are_errors() {
        assert!(matches!(
            read_points_csv("a,b\n1,2\n".as_bytes(), None),
            Err(Error::Parse { line: 1, .. })
        ));
        assert!(matches!(
            read_points_csv("x,y\n1,2\n3,abc\n".as_bytes(), None),
            Err(Error::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn file_source_reads_prj_sidecar() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("occurrences.csv");
        fs::write(&path, "x,y\n1,2\n").unwrap();

        let without = CsvPoints.read_points(&path).unwrap();
        assert!(without.crs().is_none());

        fs::write(path.with_extension("prj"), "EPSG:32643\n").unwrap();
        let with = CsvPoints.read_points(&path).unwrap();
        assert_eq!(with.crs(), Some(&Crs::epsg(32643)));
        assert_eq!(with.len(), 1);
    }
}

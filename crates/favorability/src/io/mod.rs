//! Raster and point file collaborators.
//!
//! The pipeline only depends on the [`RasterSource`], [`RasterSink`] and [`PointSource`]
//! traits. [`AsciiGrid`] and [`CsvPoints`] are simple built-in implementations; other
//! formats can be plugged in by implementing the traits.
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;
use crate::raster::{Crs, Raster};
use crate::sampling::PointSet;

pub mod ascii_grid;
pub mod points_csv;

pub use ascii_grid::{read_ascii_grid, write_ascii_grid, AsciiGrid};
pub use points_csv::{read_points_csv, CsvPoints};

/// Loads single-band rasters.
pub trait RasterSource {
    fn read_raster(&self, path: &Path) -> Result<Raster>;
}

/// Persists single-band rasters.
pub trait RasterSink {
    fn write_raster(&self, path: &Path, raster: &Raster) -> Result<()>;
}

/// Loads point sets. The returned set may lack a CRS.
pub trait PointSource {
    fn read_points(&self, path: &Path) -> Result<PointSet>;
}

/// CRS text from the `.prj` file next to `path`, if present and non-empty.
pub(crate) fn read_prj(path: &Path) -> Result<Option<Crs>> {
    match fs::read_to_string(path.with_extension("prj")) {
        Ok(text) if !text.trim().is_empty() => Ok(Some(Crs::new(text.trim()))),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

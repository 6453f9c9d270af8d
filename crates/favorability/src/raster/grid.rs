//! Single-band raster grid with georeferencing and a nodata sentinel.
use glam::DVec2;

use super::{Crs, GeoTransform};
use crate::error::{Error, Result};

/// Number of cells of a `rows x cols` grid, rejecting empty and overflowing shapes.
fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidConfig(format!(
            "raster dimensions must be > 0, got {rows}x{cols}"
        )));
    }
    rows.checked_mul(cols).ok_or_else(|| {
        Error::InvalidConfig(format!("raster of {rows}x{cols} has too many cells"))
    })
}

/// Row-major single-band raster of `f32` values.
///
/// Cells are addressed by `(row, col)`. A cell is *valid* when it is not NaN and does
/// not match the nodata sentinel; a NaN sentinel matches every NaN cell.
#[derive(Clone, Debug)]
pub struct Raster {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
    transform: GeoTransform,
    nodata: Option<f32>,
    crs: Option<Crs>,
}

impl Raster {
    /// Create a raster from row-major values.
    pub fn new(rows: usize, cols: usize, values: Vec<f32>, transform: GeoTransform) -> Result<Self> {
        let cells = cell_count(rows, cols)?;
        if values.len() != cells {
            return Err(Error::InvalidConfig(format!(
                "raster of {rows}x{cols} needs {cells} values, got {}",
                values.len()
            )));
        }
        Ok(Self {
            rows,
            cols,
            values,
            transform,
            nodata: None,
            crs: None,
        })
    }

    /// Create a raster with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f32, transform: GeoTransform) -> Result<Self> {
        let cells = cell_count(rows, cols)?;
        Self::new(rows, cols, vec![value; cells], transform)
    }

    /// Sets the nodata sentinel.
    pub fn with_nodata(mut self, nodata: Option<f32>) -> Self {
        self.nodata = nodata;
        self
    }

    /// Sets the coordinate reference system.
    pub fn with_crs(mut self, crs: Option<Crs>) -> Self {
        self.crs = crs;
        self
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    pub fn nodata(&self) -> Option<f32> {
        self.nodata
    }

    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    /// Value at `(row, col)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.values[row * self.cols + col])
    }

    /// `true` when `v` matches the nodata sentinel, comparing NaN by kind.
    #[inline]
    pub fn is_nodata(&self, v: f32) -> bool {
        match self.nodata {
            Some(nd) if nd.is_nan() => v.is_nan(),
            Some(nd) => v == nd,
            None => false,
        }
    }

    /// `true` when `v` is a usable measurement for this raster.
    #[inline]
    pub fn is_valid(&self, v: f32) -> bool {
        !v.is_nan() && !self.is_nodata(v)
    }

    /// Iterate valid cells as `(row, col, value)` in row-major order.
    pub fn valid_cells(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| self.is_valid(**v))
            .map(|(i, v)| (i / self.cols, i % self.cols, *v))
    }

    /// World position of the center of cell `(row, col)`.
    pub fn cell_center(&self, row: usize, col: usize) -> DVec2 {
        self.transform
            .pixel_to_world(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// `true` when both rasters share shape and transform.
    pub fn is_aligned_with(&self, other: &Raster) -> bool {
        self.shape() == other.shape() && self.transform == other.transform
    }

    /// New raster on the same grid with values replaced. Nodata is cleared.
    pub(crate) fn with_values(&self, values: Vec<f32>) -> Raster {
        debug_assert_eq!(values.len(), self.values.len());
        Raster {
            rows: self.rows,
            cols: self.cols,
            values,
            transform: self.transform,
            nodata: None,
            crs: self.crs.clone(),
        }
    }
}

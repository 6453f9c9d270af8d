//! Point-to-cell mapping and value extraction.
use glam::DVec2;
use tracing::{debug, warn};

use super::PointSet;
use crate::error::{Error, Result};
use crate::raster::{GeoTransform, Raster};

/// A raster value read at one input point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSample {
    /// Index of the originating point in its [`PointSet`].
    pub point: usize,
    pub row: usize,
    pub col: usize,
    pub value: f32,
}

/// Map a world position to integer `(row, col)` indices.
///
/// Applies the inverse transform and floors the fractional pixel coordinate, so points
/// left of or above the grid map to negative indices. Truncating toward zero instead would
/// fold the band within one cell west or north of the grid onto row or column 0.
/// Returns `None` for non-finite input.
#[inline]
pub fn world_to_index(transform: &GeoTransform, p: DVec2) -> Option<(i64, i64)> {
    let px = transform.world_to_pixel(p);
    if !px.is_finite() {
        return None;
    }
    Some((px.y.floor() as i64, px.x.floor() as i64))
}

/// Cell of `raster` containing `p`, or `None` when outside the grid.
#[inline]
pub fn cell_index(raster: &Raster, p: DVec2) -> Option<(usize, usize)> {
    let (row, col) = world_to_index(raster.transform(), p)?;
    let (rows, cols) = raster.shape();
    if row < 0 || col < 0 || row >= rows as i64 || col >= cols as i64 {
        return None;
    }
    Some((row as usize, col as usize))
}

/// Ensure the points and raster share a coordinate reference system.
///
/// Both must declare one. No reprojection is attempted.
pub fn check_crs(raster: &Raster, points: &PointSet) -> Result<()> {
    let point_crs = points.require_crs()?;
    let raster_crs = raster.crs().ok_or(Error::MissingCrs { what: "raster" })?;
    if point_crs != raster_crs {
        return Err(Error::CrsMismatch {
            raster: raster_crs.to_string(),
            points: point_crs.to_string(),
        });
    }
    Ok(())
}

/// Read the raster under every point, keeping point order.
///
/// Points outside the grid and points on nodata or NaN cells are skipped.
pub fn extract_indexed(raster: &Raster, points: &PointSet) -> Result<Vec<CellSample>> {
    check_crs(raster, points)?;

    let mut out = Vec::with_capacity(points.len());
    let mut outside = 0usize;
    let mut invalid = 0usize;
    for (i, p) in points.iter().enumerate() {
        let Some((row, col)) = cell_index(raster, p) else {
            outside += 1;
            continue;
        };
        let Some(value) = raster.get(row, col) else {
            outside += 1;
            continue;
        };
        if !raster.is_valid(value) {
            invalid += 1;
            continue;
        }
        out.push(CellSample {
            point: i,
            row,
            col,
            value,
        });
    }

    if outside + invalid > 0 {
        warn!(
            outside,
            nodata = invalid,
            kept = out.len(),
            "skipped points during extraction"
        );
    }
    debug!(points = points.len(), kept = out.len(), "extracted raster values");

    Ok(out)
}

/// Raster values under `points`, in point order, skipping out-of-grid and nodata points.
pub fn extract(raster: &Raster, points: &PointSet) -> Result<Vec<f32>> {
    Ok(extract_indexed(raster, points)?
        .into_iter()
        .map(|s| s.value)
        .collect())
}

//! Affine georeferencing between pixel space and world space.
//!
//! Coefficients follow the common `(a, b, c, d, e, f)` layout:
//!
//! ```text
//! x = a * col + b * row + c
//! y = d * col + e * row + f
//! ```
//!
//! where `(col, row)` are pixel coordinates measured from the upper-left corner of
//! the upper-left cell.
use glam::{DAffine2, DVec2};

use crate::error::{Error, Result};

/// Invertible affine map from `(col, row)` pixel coordinates to `(x, y)` world coordinates.
///
/// The inverse is computed once at construction, so every [`GeoTransform`] that exists
/// is guaranteed to be invertible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoTransform {
    forward: DAffine2,
    inverse: DAffine2,
}

impl GeoTransform {
    /// Wrap an affine map, rejecting singular or non-finite transforms.
    pub fn new(forward: DAffine2) -> Result<Self> {
        let det = forward.matrix2.determinant();
        if !forward.is_finite() || !det.is_finite() || det == 0.0 {
            return Err(Error::InvalidConfig(format!(
                "transform must be finite and invertible (determinant {det})"
            )));
        }
        Ok(Self {
            forward,
            inverse: forward.inverse(),
        })
    }

    /// Build from `(a, b, c, d, e, f)` coefficients.
    pub fn from_coefficients(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<Self> {
        Self::new(DAffine2::from_cols(
            DVec2::new(a, d),
            DVec2::new(b, e),
            DVec2::new(c, f),
        ))
    }

    /// Build from a GDAL-ordered geotransform `[c, a, b, f, d, e]`.
    pub fn from_gdal(gt: [f64; 6]) -> Result<Self> {
        Self::from_coefficients(gt[1], gt[2], gt[0], gt[4], gt[5], gt[3])
    }

    /// North-up transform with square or rectangular cells.
    ///
    /// `upper_left` is the world position of the outer upper-left corner; rows grow southwards.
    pub fn north_up(upper_left: DVec2, cell_width: f64, cell_height: f64) -> Result<Self> {
        Self::from_coefficients(cell_width, 0.0, upper_left.x, 0.0, -cell_height, upper_left.y)
    }

    /// Coefficients as `(a, b, c, d, e, f)`.
    pub fn coefficients(&self) -> [f64; 6] {
        let m = self.forward.matrix2;
        let t = self.forward.translation;
        [m.x_axis.x, m.y_axis.x, t.x, m.x_axis.y, m.y_axis.y, t.y]
    }

    pub fn affine(&self) -> DAffine2 {
        self.forward
    }

    /// World position of a fractional pixel coordinate.
    #[inline]
    pub fn pixel_to_world(&self, col: f64, row: f64) -> DVec2 {
        self.forward.transform_point2(DVec2::new(col, row))
    }

    /// Fractional `(col, row)` pixel coordinate of a world position.
    #[inline]
    pub fn world_to_pixel(&self, p: DVec2) -> DVec2 {
        self.inverse.transform_point2(p)
    }

    /// `true` when the transform has no rotation or shear and rows run north to south.
    pub fn is_north_up(&self) -> bool {
        let [a, b, _, d, e, _] = self.coefficients();
        b == 0.0 && d == 0.0 && a > 0.0 && e < 0.0
    }

    /// Compare coefficients with an absolute tolerance.
    pub fn abs_diff_eq(&self, other: &GeoTransform, max_abs_diff: f64) -> bool {
        self.forward.abs_diff_eq(other.forward, max_abs_diff)
    }
}

//! In-memory raster grids and their georeferencing.
//!
//! A [`Raster`] is a single-band `f32` grid tied to world space through a
//! [`GeoTransform`], optionally tagged with a [`Crs`] and a nodata sentinel.
pub mod crs;
pub mod grid;
pub mod transform;

pub use crs::Crs;
pub use grid::Raster;
pub use transform::GeoTransform;

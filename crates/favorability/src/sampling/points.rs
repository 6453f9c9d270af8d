//! Point sets in world coordinates.
use glam::DVec2;

use crate::error::{Error, Result};
use crate::raster::Crs;

/// Ordered sequence of world positions sharing one coordinate reference system.
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    points: Vec<DVec2>,
    crs: Option<Crs>,
}

impl PointSet {
    pub fn new(points: Vec<DVec2>, crs: Option<Crs>) -> Self {
        Self { points, crs }
    }

    /// Build from any type convertible into a [`mint::Point2`], e.g. `[f64; 2]`.
    pub fn from_mint<I, P>(points: I, crs: Option<Crs>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<mint::Point2<f64>>,
    {
        let points = points
            .into_iter()
            .map(|p| {
                let p: mint::Point2<f64> = p.into();
                DVec2::new(p.x, p.y)
            })
            .collect();
        Self { points, crs }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }

    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    /// The point set's CRS, or [`Error::MissingCrs`] if it has none.
    pub fn require_crs(&self) -> Result<&Crs> {
        self.crs
            .as_ref()
            .ok_or(Error::MissingCrs { what: "point set" })
    }
}

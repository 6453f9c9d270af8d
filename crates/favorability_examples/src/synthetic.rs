//! Synthetic input layers and occurrences shared by the example binaries.
use favorability::prelude::*;
use glam::DVec2;
use rand::Rng;

/// EPSG code of all synthetic data (UTM zone 43N).
pub const DEMO_CRS: u32 = 32643;

const SIDE: usize = 64;
const CELL: f64 = 30.0;
const UPPER_LEFT: DVec2 = DVec2::new(500_000.0, 4_000_000.0);

fn layer(f: impl Fn(f32, f32) -> f32) -> Result<Raster> {
    let transform = GeoTransform::north_up(UPPER_LEFT, CELL, CELL)?;
    let values = (0..SIDE * SIDE)
        .map(|i| {
            let u = (i % SIDE) as f32 / (SIDE - 1) as f32;
            let v = (i / SIDE) as f32 / (SIDE - 1) as f32;
            f(u, v)
        })
        .collect();
    Ok(Raster::new(SIDE, SIDE, values, transform)?
        .with_nodata(Some(-9999.0))
        .with_crs(Some(Crs::epsg(DEMO_CRS))))
}

/// Three layers whose ideal values (50, 0.3, 300) coincide near the grid center.
pub fn synthetic_layers() -> Result<Vec<LayerSpec>> {
    let dist = |u: f32, v: f32| ((u - 0.5).powi(2) + (v - 0.5).powi(2)).sqrt();
    Ok(vec![
        LayerSpec::new(
            "clay_pct",
            layer(|u, v| 50.0 + 60.0 * dist(u, v) * (1.0 + 0.3 * (8.0 * u).sin()))?,
            MembershipParams::new(50.0, 15.0),
        ),
        LayerSpec::new(
            "ndvi",
            layer(|u, v| 0.3 + 0.25 * (u - 0.5) + 0.2 * (v - 0.45).abs())?,
            MembershipParams::new(0.3, 0.1),
        ),
        LayerSpec::new(
            "elevation_m",
            layer(|u, v| {
                // Northeast corner has no coverage.
                if u > 0.92 && v < 0.08 {
                    -9999.0
                } else {
                    300.0 + 220.0 * (v - 0.5) + 40.0 * (6.0 * u).cos()
                }
            })?,
            MembershipParams::new(300.0, 60.0),
        ),
    ])
}

/// Occurrence points clustered around the favorable center, every tenth one scattered wider.
pub fn synthetic_occurrences(count: usize, rng: &mut dyn Rng) -> PointSet {
    let extent = SIDE as f64 * CELL;
    let center = UPPER_LEFT + DVec2::new(extent * 0.5, -extent * 0.5);
    let mut unit = || rng.next_u32() as f64 / (u32::MAX as f64 + 1.0);

    let points = (0..count)
        .map(|i| {
            let spread = if i % 10 == 0 { 0.9 } else { 0.15 };
            let dx = (unit() - 0.5) * extent * spread;
            let dy = (unit() - 0.5) * extent * spread;
            center + DVec2::new(dx, dy)
        })
        .collect();
    PointSet::new(points, Some(Crs::epsg(DEMO_CRS)))
}

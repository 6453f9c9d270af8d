use std::time::Duration;

use criterion::{Criterion, Throughput};
use favorability::prelude::{Crs, GeoTransform, Raster};
use glam::DVec2;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub const GRID_SIDES: [usize; 4] = [64, 256, 512, 1024];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn cells_throughput(side: usize) -> Throughput {
    Throughput::Elements((side * side).max(1) as u64)
}

/// Square raster with a smooth diagonal ramp in `[0, scale]` and 30 m cells.
pub fn ramp_raster(side: usize, scale: f32) -> Raster {
    let transform =
        GeoTransform::north_up(DVec2::new(500_000.0, 4_000_000.0), 30.0, 30.0).unwrap();
    let denom = (2 * side.max(2) - 2) as f32;
    let values = (0..side * side)
        .map(|i| ((i / side + i % side) as f32 / denom) * scale)
        .collect();
    Raster::new(side, side, values, transform)
        .unwrap()
        .with_crs(Some(Crs::epsg(32643)))
}

//! Random background sampling over valid raster cells.
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::raster::Raster;

/// Draw up to `count` distinct valid cells uniformly without replacement.
///
/// Returns `(row, col, value)` in draw order. When `count` exceeds the number of valid
/// cells, every valid cell is returned exactly once. Fails if the raster has no valid cell.
pub fn random_background_cells(
    raster: &Raster,
    count: usize,
    rng: &mut dyn Rng,
) -> Result<Vec<(usize, usize, f32)>> {
    let mut cells: Vec<(usize, usize, f32)> = raster.valid_cells().collect();
    if cells.is_empty() {
        return Err(Error::EmptySample(
            "no valid pixels available for background sampling".into(),
        ));
    }

    let n = cells.len();
    let take = count.min(n);
    if take < count {
        warn!(
            requested = count,
            available = n,
            "background sample clamped to valid cell count"
        );
    }

    let (drawn, _) = cells.partial_shuffle(rng, take);
    let drawn = drawn.to_vec();

    debug!(drawn = take, valid = n, "sampled background cells");
    Ok(drawn)
}

/// Values of up to `count` distinct valid cells drawn uniformly without replacement.
pub fn random_background(raster: &Raster, count: usize, rng: &mut dyn Rng) -> Result<Vec<f32>> {
    Ok(random_background_cells(raster, count, rng)?
        .into_iter()
        .map(|(_, _, v)| v)
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use glam::DVec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::raster::GeoTransform;

    fn raster(rows: usize, cols: usize) -> Raster {
        let t = GeoTransform::north_up(DVec2::new(0.0, rows as f64), 1.0, 1.0).unwrap();
        let values = (0..rows * cols).map(|i| i as f32).collect();
        Raster::new(rows, cols, values, t).unwrap()
    }

    #[test]
    fn count_above_valid_returns_every_valid_cell_once() {
        let r = raster(3, 3).with_nodata(Some(4.0));
        let mut rng = StdRng::seed_from_u64(11);
        let cells = random_background_cells(&r, 100, &mut rng).unwrap();
        assert_eq!(cells.len(), 8);

        let unique: HashSet<_> = cells.iter().map(|(r, c, _)| (*r, *c)).collect();
        assert_eq!(unique.len(), 8);
        assert!(!unique.contains(&(1, 1)));
    }

    #[test]
    fn draws_are_distinct_and_valid() {
        let mut values: Vec<f32> = (0..100).map(|i| i as f32).collect();
        for v in values.iter_mut().step_by(3) {
            *v = f32::NAN;
        }
        let t = GeoTransform::north_up(DVec2::new(0.0, 10.0), 1.0, 1.0).unwrap();
        let r = Raster::new(10, 10, values, t)
            .unwrap()
            .with_nodata(Some(f32::NAN));

        let mut rng = StdRng::seed_from_u64(3);
        let sample = random_background(&r, 20, &mut rng).unwrap();
        assert_eq!(sample.len(), 20);
        assert!(sample.iter().all(|v| !v.is_nan()));
        let unique: HashSet<u32> = sample.iter().map(|v| v.to_bits()).collect();
        assert_eq!(unique.len(), 20);
    }

    #[test]
    fn same_seed_same_sample() {
        let r = raster(20, 20);
        let a = random_background(&r, 15, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = random_background(&r, 15, &mut StdRng::seed_from_u64(99)).unwrap();
        let c = random_background(&r, 15, &mut StdRng::seed_from_u64(100)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn all_nodata_fails() {
        let t = GeoTransform::north_up(DVec2::new(0.0, 2.0), 1.0, 1.0).unwrap();
        let r = Raster::filled(2, 2, -1.0, t)
            .unwrap()
            .with_nodata(Some(-1.0));
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            random_background(&r, 4, &mut rng),
            Err(Error::EmptySample(_))
        ));
    }

    #[test]
    fn zero_count_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(random_background(&raster(2, 2), 0, &mut rng)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn every_cell_is_reachable() {
        let r = raster(2, 3);
        let mut seen = HashSet::new();
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..200 {
            for (row, col, _) in random_background_cells(&r, 1, &mut rng).unwrap() {
                seen.insert((row, col));
            }
        }
        assert_eq!(seen.len(), 6);
    }
}

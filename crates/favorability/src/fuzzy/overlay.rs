//! Cell-wise combination of aligned membership grids.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::raster::Raster;

/// Fuzzy operator applied across layers at every cell.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FuzzyOperator {
    /// Minimum across layers.
    And,
    /// Maximum across layers.
    Or,
    /// `and^(1 - gamma) * or^gamma`, always between the AND and OR values.
    Gamma(f32),
    /// `(and * (1 - gamma)) * (or * gamma)`.
    ///
    /// Reproduces legacy favorability maps. Not bounded by the AND/OR values and
    /// zero at both `gamma = 0` and `gamma = 1`.
    ScaledProduct(f32),
}

impl FuzzyOperator {
    /// Validates the operator, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        match *self {
            FuzzyOperator::Gamma(g) | FuzzyOperator::ScaledProduct(g)
                if !(0.0..=1.0).contains(&g) =>
            {
                Err(Error::InvalidConfig(format!(
                    "gamma must be within [0, 1], got {g}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Combine the AND and OR values of one cell.
    #[inline]
    pub fn combine(&self, and: f32, or: f32) -> f32 {
        match *self {
            FuzzyOperator::And => and,
            FuzzyOperator::Or => or,
            FuzzyOperator::Gamma(g) => {
                let v = and.powf(1.0 - g) * or.powf(g);
                // Rounding in powf can step one ulp past either bound.
                v.max(and).min(or)
            }
            FuzzyOperator::ScaledProduct(g) => (and * (1.0 - g)) * (or * g),
        }
    }
}

/// Fuzzy-gamma overlay of `layers`.
///
/// `gamma = 0` yields the fuzzy AND (cell minimum), `gamma = 1` the fuzzy OR (cell maximum).
pub fn overlay(layers: &[Raster], gamma: f32) -> Result<Raster> {
    overlay_with(layers, FuzzyOperator::Gamma(gamma))
}

/// Combine aligned membership grids with an arbitrary [`FuzzyOperator`].
///
/// All layers must share shape and transform, and every cell must lie in `[0, 1]`.
/// The result carries the first layer's georeferencing.
pub fn overlay_with(layers: &[Raster], op: FuzzyOperator) -> Result<Raster> {
    let Some(first) = layers.first() else {
        return Err(Error::InvalidConfig(
            "overlay needs at least one layer".into(),
        ));
    };
    op.validate()?;

    for (i, layer) in layers.iter().enumerate() {
        if layer.shape() != first.shape() {
            return Err(Error::ShapeMismatch {
                layer: i,
                expected: first.shape(),
                found: layer.shape(),
            });
        }
        if layer.transform() != first.transform() {
            return Err(Error::InvalidConfig(format!(
                "layer {i} transform differs from layer 0"
            )));
        }
        if let Some(v) = layer.values().iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(Error::InvalidConfig(format!(
                "layer {i} is not a membership grid: found value {v} outside [0, 1]"
            )));
        }
    }

    let n = first.values().len();
    let mut and = first.values().to_vec();
    let mut or = first.values().to_vec();
    for layer in &layers[1..] {
        for ((a, o), &v) in and.iter_mut().zip(or.iter_mut()).zip(layer.values()) {
            *a = a.min(v);
            *o = o.max(v);
        }
    }

    let values: Vec<f32> = and
        .iter()
        .zip(&or)
        .map(|(&a, &o)| op.combine(a, o))
        .collect();

    debug!(layers = layers.len(), cells = n, ?op, "overlay complete");

    Ok(first.with_values(values))
}

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::raster::GeoTransform;

    fn transform() -> GeoTransform {
        GeoTransform::north_up(DVec2::new(0.0, 2.0), 1.0, 1.0).unwrap()
    }

    fn layer(values: Vec<f32>) -> Raster {
        Raster::new(2, 2, values, transform()).unwrap()
    }

    fn random_layer(rng: &mut StdRng) -> Raster {
        let values = (0..4)
            .map(|_| (rng.next_u32() as f32) / (u32::MAX as f32))
            .collect();
        layer(values)
    }

    #[test]
    fn gamma_extremes_reduce_to_and_or() {
        let a = layer(vec![0.2, 0.9, 0.0, 1.0]);
        let b = layer(vec![0.6, 0.1, 0.5, 1.0]);
        let layers = [a, b];

        let and = overlay(&layers, 0.0).unwrap();
        assert_eq!(and.values(), &[0.2, 0.1, 0.0, 1.0]);

        let or = overlay(&layers, 1.0).unwrap();
        assert_eq!(or.values(), &[0.6, 0.9, 0.5, 1.0]);

        assert_eq!(
            overlay_with(&layers, FuzzyOperator::And).unwrap().values(),
            and.values()
        );
        assert_eq!(
            overlay_with(&layers, FuzzyOperator::Or).unwrap().values(),
            or.values()
        );
    }

    #[test]
    fn output_lies_between_and_and_or() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let layers: Vec<_> = (0..3).map(|_| random_layer(&mut rng)).collect();
            let and = overlay_with(&layers, FuzzyOperator::And).unwrap();
            let or = overlay_with(&layers, FuzzyOperator::Or).unwrap();
            for gamma in [0.0, 0.1, 0.5, 0.85, 1.0] {
                let out = overlay(&layers, gamma).unwrap();
                for ((v, lo), hi) in out.values().iter().zip(and.values()).zip(or.values()) {
                    assert!(lo <= v && v <= hi, "{lo} <= {v} <= {hi} failed at gamma {gamma}");
                }
            }
        }
    }

    #[test]
    fn single_layer_is_identity() {
        let a = layer(vec![0.25, 0.5, 0.75, 1.0]);
        let out = overlay(std::slice::from_ref(&a), 0.3).unwrap();
        assert_eq!(out.values(), a.values());
    }

    #[test]
    fn gamma_out_of_range_is_rejected() {
        let layers = [layer(vec![0.5; 4])];
        for g in [-0.1, 1.5, f32::NAN] {
            assert!(matches!(
                overlay(&layers, g),
                Err(Error::InvalidConfig(ref m)) if m.contains("gamma")
            ));
        }
    }

    #[test]
    fn empty_and_misaligned_layers_are_rejected() {
        assert!(matches!(overlay(&[], 0.5), Err(Error::InvalidConfig(_))));

        let a = layer(vec![0.5; 4]);
        let b = Raster::new(1, 4, vec![0.5; 4], transform()).unwrap();
        assert!(matches!(
            overlay(&[a.clone(), b], 0.5),
            Err(Error::ShapeMismatch { layer: 1, expected: (2, 2), found: (1, 4) })
        ));

        let shifted = GeoTransform::north_up(DVec2::new(1.0, 2.0), 1.0, 1.0).unwrap();
        let c = Raster::new(2, 2, vec![0.5; 4], shifted).unwrap();
        assert!(matches!(overlay(&[a, c], 0.5), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn non_membership_values_are_rejected() {
        let raw = layer(vec![0.5, 50.0, 0.5, 0.5]);
        assert!(matches!(overlay(&[raw], 0.5), Err(Error::InvalidConfig(ref m)) if m.contains("layer 0")));
    }

    #[test]
    fn scaled_product_matches_legacy_formula() {
        let layers = [layer(vec![1.0; 4]), layer(vec![0.5; 4])];
        let out = overlay_with(&layers, FuzzyOperator::ScaledProduct(0.85)).unwrap();
        let expected = (0.5f32 * (1.0 - 0.85)) * (1.0 * 0.85);
        assert!(out.values().iter().all(|v| (*v - expected).abs() < 1e-6));
    }
}

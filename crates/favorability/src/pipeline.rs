//! End-to-end workflows: build a favorability grid, then validate it against occurrences.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::fuzzy::{membership, overlay_with, FuzzyOperator, MembershipParams, NodataPolicy};
use crate::raster::{Crs, Raster};
use crate::sampling::{check_crs, extract, random_background, PointSet};
use crate::validation::{validate, ValidationResult};

/// Gamma used when none is configured.
pub const DEFAULT_GAMMA: f32 = 0.85;

/// Seed used for background sampling when none is configured.
pub const DEFAULT_SEED: u64 = 2025;

/// One input raster paired with its membership curve.
#[derive(Clone, Debug)]
pub struct LayerSpec {
    /// Label used in logs and error messages.
    pub name: String,
    pub raster: Raster,
    pub params: MembershipParams,
}

impl LayerSpec {
    pub fn new(name: impl Into<String>, raster: Raster, params: MembershipParams) -> Self {
        Self {
            name: name.into(),
            raster,
            params,
        }
    }
}

/// Configuration for building a favorability grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct OverlayConfig {
    /// Operator combining the membership grids.
    pub operator: FuzzyOperator,
    /// Treatment of nodata cells before membership.
    pub nodata_policy: NodataPolicy,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            operator: FuzzyOperator::Gamma(DEFAULT_GAMMA),
            nodata_policy: NodataPolicy::default(),
        }
    }
}

impl OverlayConfig {
    /// Creates a new [`OverlayConfig`] using the fuzzy-gamma operator.
    pub fn new(gamma: f32) -> Self {
        Self {
            operator: FuzzyOperator::Gamma(gamma),
            ..Default::default()
        }
    }

    /// Sets the overlay operator.
    pub fn with_operator(mut self, operator: FuzzyOperator) -> Self {
        self.operator = operator;
        self
    }

    /// Sets the nodata policy.
    pub fn with_nodata_policy(mut self, nodata_policy: NodataPolicy) -> Self {
        self.nodata_policy = nodata_policy;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.operator.validate()?;
        self.nodata_policy.validate()
    }
}

/// Transform every layer into membership and combine them into one favorability grid.
///
/// All parameters and layer alignments are checked before any cell is computed.
pub fn build_favorability(layers: &[LayerSpec], config: &OverlayConfig) -> Result<Raster> {
    config.validate()?;
    let Some(first) = layers.first() else {
        return Err(Error::InvalidConfig(
            "at least one layer is required".into(),
        ));
    };

    for (i, layer) in layers.iter().enumerate() {
        layer.params.validate().map_err(|e| match e {
            Error::InvalidConfig(msg) => {
                Error::InvalidConfig(format!("layer '{}': {msg}", layer.name))
            }
            other => other,
        })?;
        if layer.raster.shape() != first.raster.shape() {
            return Err(Error::ShapeMismatch {
                layer: i,
                expected: first.raster.shape(),
                found: layer.raster.shape(),
            });
        }
        if !layer.raster.is_aligned_with(&first.raster) {
            return Err(Error::InvalidConfig(format!(
                "layer '{}' transform differs from layer '{}'",
                layer.name, first.name
            )));
        }
    }

    let fuzzy = layers
        .iter()
        .map(|layer| {
            info!(layer = %layer.name, "applying membership");
            membership(&layer.raster, &layer.params, config.nodata_policy)
        })
        .collect::<Result<Vec<_>>>()?;

    let out = overlay_with(&fuzzy, config.operator)?;
    info!(layers = layers.len(), operator = ?config.operator, "favorability grid built");
    Ok(out)
}

/// How many background cells to draw.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BackgroundCount {
    /// As many as there are surviving foreground samples.
    #[default]
    MatchForeground,
    /// A fixed number of cells.
    Fixed(usize),
}

/// Configuration for validating a favorability grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct ValidationConfig {
    /// Size of the background sample, clamped to the number of valid cells.
    pub background: BackgroundCount,
    /// Seed for [`run_validation`].
    pub seed: u64,
    /// CRS assumed for a favorability grid that declares none.
    pub fallback_crs: Option<Crs>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            background: BackgroundCount::default(),
            seed: DEFAULT_SEED,
            fallback_crs: None,
        }
    }
}

impl ValidationConfig {
    /// Sets the background sample size.
    pub fn with_background(mut self, background: BackgroundCount) -> Self {
        self.background = background;
        self
    }

    /// Sets the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the CRS assumed for grids without one.
    pub fn with_fallback_crs(mut self, crs: Crs) -> Self {
        self.fallback_crs = Some(crs);
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.background == BackgroundCount::Fixed(0) {
            return Err(Error::InvalidConfig(
                "background count must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Samples and scores of one validation run.
#[derive(Clone, Debug)]
pub struct ValidationRun {
    pub result: ValidationResult,
    /// Grid values at occurrence points, in point order.
    pub foreground: Vec<f32>,
    /// Grid values at background cells, in draw order.
    pub background: Vec<f32>,
}

/// Validate `favorability` against occurrence `points` using the supplied RNG.
pub fn validate_favorability(
    favorability: &Raster,
    points: &PointSet,
    config: &ValidationConfig,
    rng: &mut dyn Rng,
) -> Result<ValidationRun> {
    config.validate()?;
    points.require_crs()?;

    let tagged;
    let grid = match (favorability.crs(), &config.fallback_crs) {
        (Some(_), _) => favorability,
        (None, Some(fallback)) => {
            info!(crs = %fallback, "favorability grid has no CRS, using fallback");
            tagged = favorability.clone().with_crs(Some(fallback.clone()));
            &tagged
        }
        (None, None) => return Err(Error::MissingCrs { what: "raster" }),
    };
    check_crs(grid, points)?;

    let foreground = extract(grid, points)?;
    if foreground.is_empty() {
        return Err(Error::EmptySample(format!(
            "none of {} occurrence points fall on valid cells",
            points.len()
        )));
    }

    let count = match config.background {
        BackgroundCount::MatchForeground => foreground.len(),
        BackgroundCount::Fixed(n) => n,
    };
    let background = random_background(grid, count, rng)?;
    let result = validate(&foreground, &background)?;

    Ok(ValidationRun {
        result,
        foreground,
        background,
    })
}

/// Validate with an RNG seeded from [`ValidationConfig::seed`].
pub fn run_validation(
    favorability: &Raster,
    points: &PointSet,
    config: &ValidationConfig,
) -> Result<ValidationRun> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    validate_favorability(favorability, points, config, &mut rng)
}

//! Gaussian fuzzy membership.
//!
//! Maps raw measurements to a degree of favorability in `[0, 1]`, peaking at an ideal
//! `center` and decaying symmetrically with distance according to `spread`:
//!
//! ```text
//! m(v) = exp(-(v - center)^2 / (2 * spread^2))
//! ```
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::raster::Raster;

/// Ideal value and tolerance of a Gaussian membership curve.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MembershipParams {
    /// Value receiving full membership.
    pub center: f32,
    /// Standard deviation of the curve. Must be nonzero.
    pub spread: f32,
}

impl MembershipParams {
    pub fn new(center: f32, spread: f32) -> Self {
        Self { center, spread }
    }

    /// Validates the parameters, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "center must be finite, got {}",
                self.center
            )));
        }
        if !self.spread.is_finite() || self.spread == 0.0 {
            return Err(Error::InvalidConfig(format!(
                "spread must be finite and nonzero, got {}",
                self.spread
            )));
        }
        Ok(())
    }
}

/// How invalid cells are treated before the membership function is applied.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodataPolicy {
    /// Replace nodata and NaN cells by this raw value, then evaluate it like any other.
    Substitute(f32),
}

impl Default for NodataPolicy {
    fn default() -> Self {
        NodataPolicy::Substitute(0.0)
    }
}

impl NodataPolicy {
    /// Validates the policy, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        match *self {
            NodataPolicy::Substitute(neutral) if neutral.is_nan() => Err(Error::InvalidConfig(
                "nodata substitute value must not be NaN".into(),
            )),
            _ => Ok(()),
        }
    }

    #[inline]
    fn resolve(&self, raster: &Raster, v: f32) -> f32 {
        match *self {
            NodataPolicy::Substitute(neutral) => {
                if raster.is_valid(v) {
                    v
                } else {
                    neutral
                }
            }
        }
    }
}

/// Membership of a single value. Assumes `params` has been validated.
///
/// The distance is normalized by `spread` in `f64` before squaring, so the center maps
/// to exactly `1.0` for every nonzero spread and finite input never yields NaN.
#[inline]
pub fn membership_value(v: f32, params: &MembershipParams) -> f32 {
    let z = (v as f64 - params.center as f64) / params.spread as f64;
    if z.is_nan() {
        return 0.0;
    }
    ((-0.5 * z * z).exp() as f32).clamp(0.0, 1.0)
}

/// Transform every cell of `raster` into a membership grid.
///
/// Nodata cells are replaced according to `policy` before evaluation. The output shares
/// the input's shape, transform and CRS and carries no nodata sentinel.
pub fn membership(
    raster: &Raster,
    params: &MembershipParams,
    policy: NodataPolicy,
) -> Result<Raster> {
    params.validate()?;
    policy.validate()?;

    let mut substituted = 0usize;
    let values = raster
        .values()
        .iter()
        .map(|&v| {
            if !raster.is_valid(v) {
                substituted += 1;
            }
            membership_value(policy.resolve(raster, v), params)
        })
        .collect();

    debug!(
        center = params.center,
        spread = params.spread,
        cells = raster.values().len(),
        substituted,
        "computed membership grid"
    );

    Ok(raster.with_values(values))
}

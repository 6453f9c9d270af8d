//! Text summary and histogram data for validation reports.
//!
//! Rendering is left to callers; this module only produces the numbers.
use std::fmt;

use super::ValidationResult;
use crate::error::{Error, Result};

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 20;

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Summary:")?;
        writeln!(f, "Number of known occurrences: {}", self.n_foreground)?;
        writeln!(f, "Number of random points: {}", self.n_background)?;
        writeln!(
            f,
            "Mean favorability (occurrences): {:.3}",
            self.mean_foreground
        )?;
        writeln!(f, "Mean favorability (random): {:.3}", self.mean_background)?;
        write!(f, "ROC-AUC Score: {:.3}", self.auc)
    }
}

/// Fixed-width histogram over `[min, max]`. The last bin is closed on the right.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub min: f32,
    pub max: f32,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `samples` into `bins` equal-width bins spanning `range`.
    ///
    /// Values outside the range and NaN values are not counted.
    pub fn from_samples(samples: &[f32], bins: usize, range: (f32, f32)) -> Result<Self> {
        let (min, max) = range;
        if bins == 0 {
            return Err(Error::InvalidConfig("histogram needs at least one bin".into()));
        }
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(Error::InvalidConfig(format!(
                "histogram range must be finite and increasing, got [{min}, {max}]"
            )));
        }

        let mut counts = vec![0usize; bins];
        let width = (max - min) as f64 / bins as f64;
        for &v in samples {
            if !(min..=max).contains(&v) {
                continue;
            }
            let bin = (((v - min) as f64 / width) as usize).min(bins - 1);
            counts[bin] += 1;
        }
        Ok(Self { min, max, counts })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Total number of counted samples.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Lower and upper edge of bin `i`.
    pub fn bin_edges(&self, i: usize) -> (f32, f32) {
        let width = (self.max - self.min) / self.bins() as f32;
        let lo = self.min + width * i as f32;
        let hi = if i + 1 == self.bins() {
            self.max
        } else {
            self.min + width * (i + 1) as f32
        };
        (lo, hi)
    }
}

/// Foreground and background histograms sharing one set of bins.
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramComparison {
    pub foreground: Histogram,
    pub background: Histogram,
}

impl HistogramComparison {
    /// Bin both samples over the combined value range.
    ///
    /// A degenerate range (all values equal) is widened on both sides by half the value's
    /// magnitude, or by 0.5 when the magnitude is below one.
    pub fn new(foreground: &[f32], background: &[f32], bins: usize) -> Result<Self> {
        let (lo, hi) = foreground
            .iter()
            .chain(background)
            .filter(|v| v.is_finite())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo > hi {
            return Err(Error::EmptySample(
                "no finite values to build a histogram from".into(),
            ));
        }
        let range = if lo == hi {
            let pad = lo.abs().max(1.0) * 0.5;
            ((lo - pad).max(f32::MIN), (hi + pad).min(f32::MAX))
        } else {
            (lo, hi)
        };

        Ok(Self {
            foreground: Histogram::from_samples(foreground, bins, range)?,
            background: Histogram::from_samples(background, bins, range)?,
        })
    }

    /// Largest count across both histograms.
    pub fn max_count(&self) -> usize {
        self.foreground
            .counts
            .iter()
            .chain(&self.background.counts)
            .copied()
            .max()
            .unwrap_or(0)
    }
}

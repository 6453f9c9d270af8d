//! Discrimination scoring of a favorability surface.
//!
//! Compares raster values sampled at known occurrences (foreground) with values sampled
//! at random background cells, and summarizes the separation as a ROC-AUC score.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

pub mod auc;
pub mod report;

pub use auc::roc_auc;
pub use report::{Histogram, HistogramComparison};

/// Outcome of [`validate`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationResult {
    /// Area under the ROC curve in `[0, 1]`.
    pub auc: f64,
    pub mean_foreground: f64,
    pub mean_background: f64,
    pub n_foreground: usize,
    pub n_background: usize,
}

fn mean(values: &[f32]) -> f64 {
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Score how well `foreground` values separate from `background` values.
///
/// Both samples must be non-empty.
pub fn validate(foreground: &[f32], background: &[f32]) -> Result<ValidationResult> {
    if foreground.is_empty() {
        return Err(Error::EmptySample(
            "no foreground samples survived extraction".into(),
        ));
    }
    if background.is_empty() {
        return Err(Error::EmptySample("no background samples drawn".into()));
    }

    let result = ValidationResult {
        auc: roc_auc(foreground, background)?,
        mean_foreground: mean(foreground),
        mean_background: mean(background),
        n_foreground: foreground.len(),
        n_background: background.len(),
    };

    info!(
        auc = result.auc,
        n_foreground = result.n_foreground,
        n_background = result.n_background,
        "validation complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_counts_and_means() {
        let r = validate(&[0.9, 0.8, 0.7], &[0.1, 0.3]).unwrap();
        assert_eq!(r.n_foreground, 3);
        assert_eq!(r.n_background, 2);
        assert!((r.mean_foreground - 0.8).abs() < 1e-6);
        assert!((r.mean_background - 0.2).abs() < 1e-6);
        assert_eq!(r.auc, 1.0);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert!(matches!(validate(&[], &[0.5]), Err(Error::EmptySample(ref m)) if m.contains("foreground")));
        assert!(matches!(validate(&[0.5], &[]), Err(Error::EmptySample(ref m)) if m.contains("background")));
    }

    #[test]
    fn uninformative_scores_give_one_half() {
        let r = validate(&[0.2, 0.4, 0.6, 0.8], &[0.8, 0.6, 0.4, 0.2]).unwrap();
        assert_eq!(r.auc, 0.5);
    }
}

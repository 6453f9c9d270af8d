//! Area under the ROC curve via the Mann-Whitney rank statistic.
use crate::error::{Error, Result};

/// Probability that a random foreground score exceeds a random background score,
/// counting ties as one half.
///
/// Computed from midranks of the pooled scores, so the result only depends on the
/// ordering of scores. Both slices must be non-empty and free of NaN.
pub fn roc_auc(foreground: &[f32], background: &[f32]) -> Result<f64> {
    if foreground.is_empty() || background.is_empty() {
        return Err(Error::EmptySample(format!(
            "AUC needs both classes, got {} foreground and {} background scores",
            foreground.len(),
            background.len()
        )));
    }
    if foreground.iter().chain(background).any(|v| v.is_nan()) {
        return Err(Error::InvalidConfig("scores must not contain NaN".into()));
    }

    let mut pooled: Vec<(f32, bool)> = foreground
        .iter()
        .map(|&v| (v, true))
        .chain(background.iter().map(|&v| (v, false)))
        .collect();
    pooled.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut rank_sum = 0.0f64;
    let mut start = 0;
    while start < pooled.len() {
        let value = pooled[start].0;
        let mut end = start + 1;
        while end < pooled.len() && pooled[end].0 == value {
            end += 1;
        }
        // 1-based ranks start+1..=end share their mean.
        let midrank = (start + 1 + end) as f64 / 2.0;
        let positives = pooled[start..end].iter().filter(|(_, fg)| *fg).count();
        rank_sum += midrank * positives as f64;
        start = end;
    }

    let n_fg = foreground.len() as f64;
    let n_bg = background.len() as f64;
    let u = rank_sum - n_fg * (n_fg + 1.0) / 2.0;
    Ok(u / (n_fg * n_bg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(fg: &[f32], bg: &[f32]) -> f64 {
        let mut wins = 0.0;
        for &f in fg {
            for &b in bg {
                if f > b {
                    wins += 1.0;
                } else if f == b {
                    wins += 0.5;
                }
            }
        }
        wins / (fg.len() * bg.len()) as f64
    }

    #[test]
    fn perfect_separation_and_inversion() {
        assert_eq!(roc_auc(&[0.9, 0.8], &[0.1, 0.2]).unwrap(), 1.0);
        assert_eq!(roc_auc(&[0.1, 0.2], &[0.9, 0.8]).unwrap(), 0.0);
    }

    #[test]
    fn full_tie_is_one_half() {
        assert_eq!(roc_auc(&[0.5, 0.5], &[0.5, 0.5]).unwrap(), 0.5);
    }

    #[test]
    fn matches_pairwise_definition_with_ties() {
        let fg = [0.3, 0.7, 0.7, 0.1, 0.9, 0.5];
        let bg = [0.2, 0.7, 0.5, 0.5, 0.0, 0.3, 0.8];
        let auc = roc_auc(&fg, &bg).unwrap();
        assert!((auc - brute_force(&fg, &bg)).abs() < 1e-12);
    }

    #[test]
    fn invariant_under_monotonic_transform() {
        let fg = [0.3f32, 0.65, 0.7, 0.12, 0.9];
        let bg = [0.2f32, 0.7, 0.5, 0.45, 0.05, 0.3];
        let base = roc_auc(&fg, &bg).unwrap();

        let squash = |v: &f32| 1.0 / (1.0 + (-10.0 * (v - 0.5)).exp());
        let fg_t: Vec<f32> = fg.iter().map(squash).collect();
        let bg_t: Vec<f32> = bg.iter().map(squash).collect();
        assert_eq!(roc_auc(&fg_t, &bg_t).unwrap(), base);

        let fg_s: Vec<f32> = fg.iter().map(|v| v * 100.0 - 3.0).collect();
        let bg_s: Vec<f32> = bg.iter().map(|v| v * 100.0 - 3.0).collect();
        assert_eq!(roc_auc(&fg_s, &bg_s).unwrap(), base);
    }

    #[test]
    fn empty_class_is_an_error() {
        assert!(matches!(roc_auc(&[], &[0.1]), Err(Error::EmptySample(_))));
        assert!(matches!(roc_auc(&[0.1], &[]), Err(Error::EmptySample(_))));
    }

    #[test]
    fn nan_scores_are_rejected() {
        assert!(matches!(
            roc_auc(&[f32::NAN], &[0.1]),
            Err(Error::InvalidConfig(_))
        ));
    }
}

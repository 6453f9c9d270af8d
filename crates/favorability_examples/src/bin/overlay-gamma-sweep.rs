use favorability::prelude::*;
use favorability_examples::{init_tracing, synthetic_layers, synthetic_occurrences};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let layers = synthetic_layers()?;
    let points = synthetic_occurrences(80, &mut StdRng::seed_from_u64(11));

    // Same background seed for every operator so AUC differences come from the overlay alone.
    let validation = ValidationConfig::default()
        .with_background(BackgroundCount::Fixed(500))
        .with_seed(99);

    let mut operators = vec![FuzzyOperator::And, FuzzyOperator::Or];
    operators.extend([0.0, 0.25, 0.5, 0.75, 0.85, 1.0].map(FuzzyOperator::Gamma));
    operators.push(FuzzyOperator::ScaledProduct(0.85));

    println!("{:<28} {:>8} {:>10} {:>10}", "operator", "auc", "mean_occ", "mean_bg");
    for op in operators {
        let config = OverlayConfig::default().with_operator(op);
        let grid = build_favorability(&layers, &config)?;
        let run = run_validation(&grid, &points, &validation)?;
        println!(
            "{:<28} {:>8.3} {:>10.3} {:>10.3}",
            format!("{op:?}"),
            run.result.auc,
            run.result.mean_foreground,
            run.result.mean_background
        );
    }

    Ok(())
}

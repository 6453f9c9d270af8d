use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use favorability::prelude::*;
use favorability::validation::report::DEFAULT_BINS;
use favorability_examples::{
    init_tracing, render_histograms_to_png, synthetic_layers, synthetic_occurrences,
    HistogramStyle, DEMO_CRS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let dir = Path::new("favorability-demo");
    fs::create_dir_all(dir)?;

    // Produce the inputs the validation reads back from disk.
    let favorability = build_favorability(&synthetic_layers()?, &OverlayConfig::new(0.85))?;
    let raster_path = dir.join("fuzzy_overlay.asc");
    AsciiGrid.write_raster(&raster_path, &favorability)?;

    let mut rng = StdRng::seed_from_u64(2025);
    let occurrences = synthetic_occurrences(60, &mut rng);
    let points_path = dir.join("occurrences.csv");
    let mut csv = String::from("id,x,y\n");
    for (i, p) in occurrences.iter().enumerate() {
        writeln!(csv, "{i},{},{}", p.x, p.y)?;
    }
    fs::write(&points_path, csv)?;
    fs::write(points_path.with_extension("prj"), Crs::epsg(DEMO_CRS).as_str())?;

    let raster = AsciiGrid.read_raster(&raster_path)?;
    let points = CsvPoints.read_points(&points_path)?;

    let config = ValidationConfig::default()
        .with_seed(7)
        .with_fallback_crs(Crs::epsg(DEMO_CRS));
    let run = run_validation(&raster, &points, &config)?;
    println!("\n{}", run.result);

    let histograms = HistogramComparison::new(&run.foreground, &run.background, DEFAULT_BINS)?;
    render_histograms_to_png(
        &histograms,
        &HistogramStyle::default(),
        dir.join("favorability_distribution.png"),
    )?;

    Ok(())
}

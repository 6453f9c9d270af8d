use std::path::Path;

use favorability::prelude::*;
use favorability_examples::{init_tracing, render_raster_to_png, synthetic_layers, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let layers = synthetic_layers()?;

    // Render every membership grid next to the combined result.
    let render = RenderConfig::default().with_scale(6);
    for layer in &layers {
        let fuzzy = membership(&layer.raster, &layer.params, NodataPolicy::default())?;
        render_raster_to_png(&fuzzy, &render, format!("membership-{}.png", layer.name))?;
    }

    let config = OverlayConfig::new(0.85);
    let favorability = build_favorability(&layers, &config)?;

    AsciiGrid.write_raster(Path::new("favorability_overlay.asc"), &favorability)?;
    render_raster_to_png(&favorability, &render, "favorability_overlay.png")?;

    println!("Favorability map saved: favorability_overlay.asc");
    Ok(())
}

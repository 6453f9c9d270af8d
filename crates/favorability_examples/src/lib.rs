#![forbid(unsafe_code)]

mod rendering;
mod synthetic;

pub use rendering::{render_histograms_to_png, render_raster_to_png, HistogramStyle, RenderConfig};
pub use synthetic::{synthetic_layers, synthetic_occurrences, DEMO_CRS};

/// Install a `tracing` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#![forbid(unsafe_code)]
//! favorability: Fuzzy membership overlay of raster layers and ROC-AUC validation against occurrences.
//!
//! Modules:
//! - raster: single-band grids, affine georeferencing and CRS identifiers
//! - fuzzy: Gaussian membership and fuzzy AND/OR/gamma overlay
//! - sampling: point-to-cell extraction and seeded random background sampling
//! - validation: rank-based AUC, summary statistics and histogram data
//! - pipeline: build and validate a favorability grid end to end
//! - io: raster/point collaborator traits with ASCII grid and CSV implementations
pub mod error;
pub mod fuzzy;
pub mod io;
pub mod pipeline;
pub mod raster;
pub mod sampling;
pub mod validation;

/// Convenient re-exports for common types. Import with `use favorability::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::fuzzy::{
        membership, overlay, overlay_with, FuzzyOperator, MembershipParams, NodataPolicy,
    };
    pub use crate::io::{AsciiGrid, CsvPoints, PointSource, RasterSink, RasterSource};
    pub use crate::pipeline::{
        build_favorability, run_validation, validate_favorability, BackgroundCount, LayerSpec,
        OverlayConfig, ValidationConfig, ValidationRun,
    };
    pub use crate::raster::{Crs, GeoTransform, Raster};
    pub use crate::sampling::{extract, random_background, world_to_index, PointSet};
    pub use crate::validation::{validate, HistogramComparison, ValidationResult};
}

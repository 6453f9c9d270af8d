//! Point sampling of raster grids.
//!
//! This module maps world coordinates onto raster cells and reads values for known
//! occurrence points ([`extract`]) and for random background cells ([`random_background`]).
//! Randomness always comes from a caller-supplied [`rand::Rng`].

pub mod background;
pub mod extract;
pub mod points;

pub use background::{random_background, random_background_cells};
pub use extract::{cell_index, check_crs, extract, extract_indexed, world_to_index, CellSample};
pub use points::PointSet;

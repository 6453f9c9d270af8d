//! Fuzzy membership and overlay engines.
//!
//! Raw raster measurements are turned into `[0, 1]` membership grids by
//! [`membership`], then combined into a single favorability grid by [`overlay`].
pub mod membership;
pub mod overlay;

pub use membership::{membership, membership_value, MembershipParams, NodataPolicy};
pub use overlay::{overlay, overlay_with, FuzzyOperator};

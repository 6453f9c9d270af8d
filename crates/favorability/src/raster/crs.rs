//! Coordinate reference system identifiers.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque coordinate reference identifier such as `EPSG:32643` or a WKT string.
///
/// Two identifiers are equal when they match after trimming surrounding whitespace,
/// ignoring ASCII case. No reprojection or semantic CRS comparison is performed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq)]
pub struct Crs(String);

impl Crs {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier of the form `EPSG:<code>`.
    pub fn epsg(code: u32) -> Self {
        Self(format!("EPSG:{code}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Crs {
    fn eq(&self, other: &Self) -> bool {
        self.0.trim().eq_ignore_ascii_case(other.0.trim())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.trim())
    }
}

//! Error type shared by registry validation, configuration and engine lookups.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::registry::IslandId;

#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("content registry is empty")]
    NoContent,
    #[error("unknown island: {0}")]
    InvalidIslandReference(IslandId),
    #[error("island {id} has degenerate geometry ({width} x {height})")]
    InvalidIslandGeometry { id: IslandId, width: f64, height: f64 },
    #[error("duplicate island id: {0}")]
    DuplicateIsland(IslandId),
    #[error("home island {0} is not in the registry")]
    UnknownHomeIsland(IslandId),
    #[error("viewport {width} x {height} is not usable")]
    InvalidViewport { width: f64, height: f64 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl NavError {
    /// Stable machine-readable code for hosts that surface errors.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoContent => "E_NO_CONTENT",
            Self::InvalidIslandReference(_) => "E_INVALID_ISLAND_REFERENCE",
            Self::InvalidIslandGeometry { .. } => "E_INVALID_ISLAND_GEOMETRY",
            Self::DuplicateIsland(_) => "E_DUPLICATE_ISLAND",
            Self::UnknownHomeIsland(_) => "E_UNKNOWN_HOME_ISLAND",
            Self::InvalidViewport { .. } => "E_INVALID_VIEWPORT",
            Self::InvalidConfig(_) => "E_INVALID_CONFIG",
            Self::Parse(_) => "E_PARSE",
        }
    }
}

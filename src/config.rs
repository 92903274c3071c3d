//! Engine configuration
//!
//! Grid size is the only externally configurable parameter; everything else
//! about the engine is fixed by the rules.

use serde::{Deserialize, Serialize};

use crate::{clamp_grid_size, consts};

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grid edge length (cells per row/column), clamped to the supported
    /// range when the engine is built
    pub grid_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: consts::GRID_SIZE_DEFAULT,
        }
    }
}

impl EngineConfig {
    /// Create a config with the given grid size
    pub fn with_grid_size(grid_size: usize) -> Self {
        Self { grid_size }
    }

    /// Effective grid size (clamped into the supported range)
    pub fn effective_grid_size(&self) -> usize {
        clamp_grid_size(self.grid_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_size() {
        let config = EngineConfig::default();
        assert_eq!(config.effective_grid_size(), consts::GRID_SIZE_DEFAULT);
    }

    #[test]
    fn test_grid_size_clamped() {
        assert_eq!(
            EngineConfig::with_grid_size(1).effective_grid_size(),
            consts::GRID_SIZE_MIN
        );
        assert_eq!(
            EngineConfig::with_grid_size(100).effective_grid_size(),
            consts::GRID_SIZE_MAX
        );
        assert_eq!(EngineConfig::with_grid_size(7).effective_grid_size(), 7);
    }
}

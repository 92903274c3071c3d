//! Crossout - a grid marking puzzle engine
//!
//! Core modules:
//! - `engine`: Deterministic matching core (grid state, pattern detection,
//!   two-phase match resolution)
//! - `config`: Engine configuration (grid sizing)
//!
//! The engine is presentation-free: it emits [`engine::PresentationRequest`]
//! values for a rendering/audio layer to consume and receives finish events
//! back. See the `engine` module docs for the determinism contract.

pub mod config;
pub mod engine;

pub use config::EngineConfig;
pub use engine::{
    BoundsError, Coordinator, Grid, MatchResult, Pattern, PatternKind, PresentationRequest, detect,
};

/// Engine configuration constants
pub mod consts {
    /// Smallest playable grid edge length
    pub const GRID_SIZE_MIN: usize = 3;
    /// Largest supported grid edge length
    pub const GRID_SIZE_MAX: usize = 10;
    /// Default grid edge length
    pub const GRID_SIZE_DEFAULT: usize = 5;

    /// Minimum cell count for a straight run to match
    pub const RUN_MIN_LEN: usize = 3;
}

/// Clamp a requested grid edge length into the supported range
#[inline]
pub fn clamp_grid_size(size: usize) -> usize {
    size.clamp(consts::GRID_SIZE_MIN, consts::GRID_SIZE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_grid_size() {
        assert_eq!(clamp_grid_size(0), consts::GRID_SIZE_MIN);
        assert_eq!(clamp_grid_size(3), 3);
        assert_eq!(clamp_grid_size(5), 5);
        assert_eq!(clamp_grid_size(10), 10);
        assert_eq!(clamp_grid_size(64), consts::GRID_SIZE_MAX);
    }
}

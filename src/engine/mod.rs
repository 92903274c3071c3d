//! Deterministic matching engine
//!
//! All puzzle logic lives here. This module must be pure and deterministic:
//! - Detection is a pure function of grid contents + reservation set
//! - Stable ordering everywhere (anchor order, pattern order, removal order)
//! - Resolution is driven by explicit finish events, never by timers
//! - No rendering, audio, or platform dependencies
//!
//! The only shared mutable state (grid, reservation set, pending cache) is
//! owned by the [`Coordinator`]; presenters interact through its inbound
//! event methods and the drainable [`PresentationRequest`] queue.

pub mod coordinator;
pub mod grid;
pub mod pattern;

pub use coordinator::{Coordinator, PresentationRequest};
pub use grid::{BoundsError, Grid};
pub use pattern::{AXIS_NEIGHBORS, MatchResult, Pattern, PatternKind, detect};

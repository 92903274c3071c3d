//! Match coordination - the two-phase detect/resolve protocol
//!
//! Detection happens immediately on input; removal happens only after the
//! presentation layer reports its draw and highlight sequences finished.
//! Between the two, every matched cell sits in the reservation set so that
//! later detections cannot claim it. The pending cache is keyed by trigger
//! position and each entry is consumed exactly once.
//!
//! The model is cooperative, not multi-threaded: inbound events arrive on
//! one logical thread in any order across triggers, and every illegal or
//! stale event degrades to a no-op because presenters cannot be trusted to
//! call back exactly once.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{BoundsError, Grid};
use super::pattern::{MatchResult, Pattern, detect};
use crate::config::EngineConfig;

/// Outbound request to the presentation layer.
///
/// The coordinator queues these; the embedder drains and animates them.
/// Sequencing delays (draw time, inter-pattern highlight gaps) belong to the
/// presenter, which reports back through the coordinator's finish events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationRequest {
    /// Play the mark-drawing effect at a cell (input was accepted)
    Mark(IVec2),
    /// Highlight one matched pattern; emitted once per pattern, in
    /// detection order
    Highlight(Pattern),
    /// Play the removal effect and clear the marks from these cells
    Removal(Vec<IVec2>),
    /// The running match counter changed
    MatchCount(u32),
}

/// Where a pending match sits between detection and resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingPhase {
    /// Waiting for the mark-draw presentation to finish
    AwaitingDraw,
    /// Highlights requested, waiting for the sequence to finish
    Highlighting,
}

/// A detection result parked until its presentation resolves
#[derive(Debug, Clone)]
struct PendingMatch {
    result: MatchResult,
    phase: PendingPhase,
}

/// Owns the grid, the reservation set, the pending cache, and the match
/// counter. All inbound events go through here; the reservation set is the
/// single synchronization point between overlapping input→resolution flows.
#[derive(Debug, Clone)]
pub struct Coordinator {
    grid: Grid,
    reserved: HashSet<IVec2>,
    pending: HashMap<IVec2, PendingMatch>,
    match_count: u32,
    outbox: Vec<PresentationRequest>,
}

impl Coordinator {
    /// Create a coordinator with an empty grid sized from `config`
    pub fn new(config: EngineConfig) -> Self {
        Self {
            grid: Grid::new(config.effective_grid_size()),
            reserved: HashSet::new(),
            pending: HashMap::new(),
            match_count: 0,
            outbox: Vec::new(),
        }
    }

    /// Current grid state (read-only; presenters repaint from this)
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Running match counter
    pub fn match_count(&self) -> u32 {
        self.match_count
    }

    /// Queued presentation requests, oldest first, without consuming them
    pub fn requests(&self) -> &[PresentationRequest] {
        &self.outbox
    }

    /// Drain queued presentation requests, oldest first
    pub fn drain_requests(&mut self) -> impl Iterator<Item = PresentationRequest> + '_ {
        self.outbox.drain(..)
    }

    /// Player input at `pos`.
    ///
    /// Input on a marked or reserved cell is an expected timing outcome and
    /// is ignored silently. Otherwise the cell is marked, the mark-draw
    /// presentation is requested, and detection runs against the current
    /// reservation set; a non-empty result reserves its cells and parks in
    /// the pending cache until the finish events arrive.
    ///
    /// # Errors
    ///
    /// [`BoundsError`] if `pos` is off the grid.
    pub fn input_at(&mut self, pos: IVec2) -> Result<(), BoundsError> {
        if self.grid.is_marked(pos)? || self.reserved.contains(&pos) {
            log::debug!("input at ({}, {}) ignored: cell occupied or reserved", pos.x, pos.y);
            return Ok(());
        }

        self.grid.mark(pos)?;
        self.outbox.push(PresentationRequest::Mark(pos));

        let result = detect(&self.grid, pos, &self.reserved);
        if !result.is_empty() {
            log::debug!(
                "detected {} pattern(s) at ({}, {}), reserving {} cell(s)",
                result.match_count(),
                pos.x,
                pos.y,
                result.cells_to_remove.len()
            );
            self.reserved.extend(result.cells_to_remove.iter().copied());
            self.pending.insert(
                pos,
                PendingMatch {
                    result,
                    phase: PendingPhase::AwaitingDraw,
                },
            );
        }
        Ok(())
    }

    /// The mark-draw presentation for `pos` finished.
    ///
    /// No pending entry (the common case: the input produced no pattern) or
    /// a duplicate finish are no-ops. Otherwise one highlight request per
    /// pattern goes out, in detection order, and the entry waits for
    /// [`Coordinator::highlight_finished`].
    pub fn mark_finished(&mut self, pos: IVec2) {
        let Some(entry) = self.pending.get_mut(&pos) else {
            return;
        };
        if entry.phase != PendingPhase::AwaitingDraw {
            log::debug!("duplicate mark-finished for ({}, {}) ignored", pos.x, pos.y);
            return;
        }
        entry.phase = PendingPhase::Highlighting;
        for pattern in &entry.result.patterns {
            self.outbox.push(PresentationRequest::Highlight(pattern.clone()));
        }
    }

    /// The highlight sequence for `trigger` finished; resolve the match.
    ///
    /// Unmarks every matched cell exactly once, releases its reservation,
    /// requests the removal presentation, and bumps the counter by the
    /// pattern count. Unknown triggers (including anything pre-dating a
    /// reset) and out-of-order finishes are no-ops.
    pub fn highlight_finished(&mut self, trigger: IVec2) -> Result<(), BoundsError> {
        let Entry::Occupied(slot) = self.pending.entry(trigger) else {
            // Unknown trigger: the common no-pattern click, or pre-reset
            return Ok(());
        };
        if slot.get().phase != PendingPhase::Highlighting {
            log::debug!(
                "highlight-finished for ({}, {}) before its draw finished, ignored",
                trigger.x,
                trigger.y
            );
            return Ok(());
        }
        let entry = slot.remove();

        for &cell in &entry.result.cells_to_remove {
            self.grid.unmark(cell)?;
            self.reserved.remove(&cell);
        }
        self.match_count += entry.result.match_count();

        self.outbox
            .push(PresentationRequest::Removal(entry.result.cells_to_remove));
        self.outbox
            .push(PresentationRequest::MatchCount(self.match_count));
        Ok(())
    }

    /// Reset the round, optionally at a new grid size (clamped to the
    /// supported range; `None` keeps the current size).
    ///
    /// Replaces the grid wholesale and clears reservations, pending matches,
    /// the counter, and any un-drained requests (they reference a grid that
    /// no longer exists). Finish events for pre-reset triggers then find an
    /// empty cache and fall through as no-ops.
    pub fn reset(&mut self, new_size: Option<usize>) {
        let size = new_size.unwrap_or(self.grid.size());
        self.grid = Grid::new(size);
        self.reserved.clear();
        self.pending.clear();
        self.match_count = 0;
        self.outbox.clear();
        self.outbox.push(PresentationRequest::MatchCount(0));
        log::info!("grid reset to {0}x{0}", self.grid.size());
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

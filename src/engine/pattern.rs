//! Pattern detection
//!
//! Pure function of grid contents + trigger + reservation set. Detection
//! never mutates anything, so identical snapshots always produce identical
//! results regardless of call order or timing. Cells already reserved by a
//! pending match are invisible here; that exclusion is what keeps two
//! in-flight matches disjoint.

use std::collections::HashSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::consts::RUN_MIN_LEN;

/// Axis neighbor offsets, in anchor-candidate order: +x, -x, +y, -y
pub const AXIS_NEIGHBORS: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

/// The four L-triple offset pairs, checked in this order per anchor
const L_OFFSETS: [[IVec2; 2]; 4] = [
    [IVec2::new(1, 0), IVec2::new(0, 1)],
    [IVec2::new(-1, 0), IVec2::new(0, 1)],
    [IVec2::new(1, 0), IVec2::new(0, -1)],
    [IVec2::new(-1, 0), IVec2::new(0, -1)],
];

/// Shape of a matched pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternKind {
    /// Anchor cell plus two cells one diagonal "step" away
    LTriple,
    /// Contiguous horizontal run of at least [`RUN_MIN_LEN`] cells
    HorizontalRun,
    /// Contiguous vertical run of at least [`RUN_MIN_LEN`] cells
    VerticalRun,
}

/// One matched pattern: its shape and cells in detection order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub cells: Vec<IVec2>,
}

/// Everything one detection call found.
///
/// `cells_to_remove` has set semantics (each cell once, however many
/// patterns it appears in) but keeps first-seen detection order so that
/// removal presentation and tests are order-stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Patterns in detection order: L-triples per anchor (trigger first,
    /// then its neighbors), then horizontal run, then vertical run
    pub patterns: Vec<Pattern>,
    /// Union of all pattern cells, deduplicated
    pub cells_to_remove: Vec<IVec2>,
}

impl MatchResult {
    /// True when detection found nothing
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of matched patterns. A cell shared by two patterns still
    /// counts toward both; it is removed once.
    pub fn match_count(&self) -> u32 {
        self.patterns.len() as u32
    }

    fn push(&mut self, pattern: Pattern) {
        for &cell in &pattern.cells {
            if !self.cells_to_remove.contains(&cell) {
                self.cells_to_remove.push(cell);
            }
        }
        self.patterns.push(pattern);
    }
}

/// A cell counts for matching when it is on the grid, marked, and not
/// claimed by a pending match
fn available(grid: &Grid, pos: IVec2, reserved: &HashSet<IVec2>) -> bool {
    matches!(grid.is_marked(pos), Ok(true)) && !reserved.contains(&pos)
}

/// Contiguous run through `trigger` along `step`. Cell order: trigger, then
/// the +step side outward, then the -step side outward.
fn scan_run(grid: &Grid, trigger: IVec2, step: IVec2, reserved: &HashSet<IVec2>) -> Vec<IVec2> {
    let mut run = vec![trigger];
    for dir in [step, -step] {
        let mut cursor = trigger + dir;
        while available(grid, cursor, reserved) {
            run.push(cursor);
            cursor += dir;
        }
    }
    run
}

/// Detect every pattern connected to `trigger`.
///
/// Anchor candidates are the trigger plus its available axis neighbors.
/// Each anchor is checked against the four L-triple shapes; straight runs
/// are checked for the trigger only, horizontal and vertical independently
/// (both can fire in the same call). An unmarked or reserved trigger yields
/// an empty result.
pub fn detect(grid: &Grid, trigger: IVec2, reserved: &HashSet<IVec2>) -> MatchResult {
    let mut result = MatchResult::default();
    if !available(grid, trigger, reserved) {
        return result;
    }

    let mut anchors: Vec<IVec2> = Vec::with_capacity(5);
    anchors.push(trigger);
    for offset in AXIS_NEIGHBORS {
        let neighbor = trigger + offset;
        if available(grid, neighbor, reserved) {
            anchors.push(neighbor);
        }
    }

    for &anchor in &anchors {
        for offsets in L_OFFSETS {
            let first = anchor + offsets[0];
            let second = anchor + offsets[1];
            if available(grid, first, reserved) && available(grid, second, reserved) {
                result.push(Pattern {
                    kind: PatternKind::LTriple,
                    cells: vec![anchor, first, second],
                });
            }
        }
    }

    for (step, kind) in [
        (IVec2::new(1, 0), PatternKind::HorizontalRun),
        (IVec2::new(0, 1), PatternKind::VerticalRun),
    ] {
        let run = scan_run(grid, trigger, step, reserved);
        if run.len() >= RUN_MIN_LEN {
            result.push(Pattern { kind, cells: run });
        }
    }

    result
}

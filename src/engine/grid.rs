//! Grid state - the single source of truth for marked cells
//!
//! The grid owns nothing but the marked flags. Detection reads it, the
//! coordinator mutates it; size is fixed for the grid's lifetime and a grid
//! is replaced wholesale on reset.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::clamp_grid_size;

/// Out-of-range grid access.
///
/// Positions reaching the grid are validated at the input boundary, so this
/// is a programmer error when it surfaces from engine internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsError {
    /// The offending position
    pub pos: IVec2,
    /// Grid edge length at the time of access
    pub size: usize,
}

impl std::fmt::Display for BoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "position ({}, {}) outside {}x{} grid",
            self.pos.x, self.pos.y, self.size, self.size
        )
    }
}

impl std::error::Error for BoundsError {}

/// Square grid of markable cells.
///
/// Row-major flag storage; `(x, y)` is column `x`, row `y`, both 0-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an empty grid. The edge length is clamped to the supported
    /// range, so a `Grid` never exists at an unsupported size.
    pub fn new(size: usize) -> Self {
        let size = clamp_grid_size(size);
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Grid edge length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `pos` addresses a cell of this grid
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    fn index(&self, pos: IVec2) -> Result<usize, BoundsError> {
        if self.in_bounds(pos) {
            Ok(pos.y as usize * self.size + pos.x as usize)
        } else {
            Err(BoundsError {
                pos,
                size: self.size,
            })
        }
    }

    /// Whether the cell at `pos` carries a mark
    pub fn is_marked(&self, pos: IVec2) -> Result<bool, BoundsError> {
        Ok(self.cells[self.index(pos)?])
    }

    /// Set the marked flag. Callers are responsible for rejecting input on
    /// already-marked or reserved cells; this only flips the flag.
    pub fn mark(&mut self, pos: IVec2) -> Result<(), BoundsError> {
        let idx = self.index(pos)?;
        self.cells[idx] = true;
        Ok(())
    }

    /// Clear the marked flag
    pub fn unmark(&mut self, pos: IVec2) -> Result<(), BoundsError> {
        let idx = self.index(pos)?;
        self.cells[idx] = false;
        Ok(())
    }

    /// Iterate over all marked cells in row-major order (for presenters
    /// repainting from state)
    pub fn marked_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, &marked)| {
            marked.then(|| IVec2::new((i % self.size) as i32, (i / self.size) as i32))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_unmark_roundtrip() {
        let mut grid = Grid::new(5);
        let pos = IVec2::new(2, 3);

        assert_eq!(grid.is_marked(pos), Ok(false));
        grid.mark(pos).unwrap();
        assert_eq!(grid.is_marked(pos), Ok(true));
        grid.unmark(pos).unwrap();
        assert_eq!(grid.is_marked(pos), Ok(false));
    }

    #[test]
    fn test_out_of_bounds_is_error() {
        let mut grid = Grid::new(5);

        for pos in [
            IVec2::new(-1, 0),
            IVec2::new(0, -1),
            IVec2::new(5, 0),
            IVec2::new(0, 5),
        ] {
            assert!(!grid.in_bounds(pos));
            assert_eq!(grid.is_marked(pos), Err(BoundsError { pos, size: 5 }));
            assert!(grid.mark(pos).is_err());
        }
    }

    #[test]
    fn test_size_clamped_at_creation() {
        assert_eq!(Grid::new(0).size(), crate::consts::GRID_SIZE_MIN);
        assert_eq!(Grid::new(99).size(), crate::consts::GRID_SIZE_MAX);
    }

    #[test]
    fn test_marked_cells_iteration_order() {
        let mut grid = Grid::new(3);
        grid.mark(IVec2::new(2, 1)).unwrap();
        grid.mark(IVec2::new(0, 0)).unwrap();
        grid.mark(IVec2::new(1, 2)).unwrap();

        // Row-major: (0,0) before (2,1) before (1,2)
        let marked: Vec<IVec2> = grid.marked_cells().collect();
        assert_eq!(
            marked,
            vec![IVec2::new(0, 0), IVec2::new(2, 1), IVec2::new(1, 2)]
        );
    }

    #[test]
    fn test_bounds_error_display() {
        let err = BoundsError {
            pos: IVec2::new(7, -1),
            size: 5,
        };
        assert_eq!(err.to_string(), "position (7, -1) outside 5x5 grid");
    }
}

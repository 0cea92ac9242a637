//! A fixed-size cell grid with enforced state transitions.
//!
//! The grid is an `N×N` matrix of [`CellState`] with value semantics: it is
//! `Copy`, so callers that need snapshot isolation (placement preview, attack
//! history) just keep a copy. The only legal transitions are
//! `Empty→Occupied` (placement), `Occupied→Hit` / `Empty→Miss` (attack) and
//! `Hit→Sunk` (whole-ship sink); `Miss` and `Sunk` are terminal.

use crate::common::{Coord, GameError};

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    Empty,
    Occupied,
    Hit,
    Miss,
    Sunk,
}

/// An `N×N` grid of cell states, indexed by (row, col), 0-based, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid<const N: usize> {
    cells: [[CellState; N]; N],
}

impl<const N: usize> Grid<N> {
    /// Create a grid of all `Empty` cells.
    pub fn new() -> Self {
        Grid {
            cells: [[CellState::Empty; N]; N],
        }
    }

    /// Board side length.
    pub const fn size(&self) -> usize {
        N
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < N && col < N
    }

    /// Read a cell, failing with `OutOfBounds` outside `[0, N)`.
    pub fn get(&self, row: usize, col: usize) -> Result<CellState, GameError> {
        if !self.in_bounds(row, col) {
            return Err(GameError::OutOfBounds { row, col });
        }
        Ok(self.cells[row][col])
    }

    /// Mark a cell `Occupied` during placement. Only `Empty` cells accept a
    /// ship segment.
    pub(crate) fn occupy(&mut self, row: usize, col: usize) -> Result<(), GameError> {
        match self.get(row, col)? {
            CellState::Empty => {
                self.cells[row][col] = CellState::Occupied;
                Ok(())
            }
            _ => Err(GameError::InvalidPlacement),
        }
    }

    /// Resolve a shot at a cell. Returns `true` on hit (`Occupied→Hit`),
    /// `false` on miss (`Empty→Miss`); any already-resolved cell fails with
    /// `CellAlreadyAttacked` and is left unchanged.
    pub(crate) fn fire(&mut self, row: usize, col: usize) -> Result<bool, GameError> {
        match self.get(row, col)? {
            CellState::Occupied => {
                self.cells[row][col] = CellState::Hit;
                Ok(true)
            }
            CellState::Empty => {
                self.cells[row][col] = CellState::Miss;
                Ok(false)
            }
            CellState::Hit | CellState::Miss | CellState::Sunk => {
                Err(GameError::CellAlreadyAttacked)
            }
        }
    }

    /// Promote a `Hit` cell to `Sunk` once its whole ship is down.
    /// Promoting a cell that is already `Sunk` is a no-op.
    pub(crate) fn sink(&mut self, row: usize, col: usize) -> Result<(), GameError> {
        match self.get(row, col)? {
            CellState::Hit => {
                self.cells[row][col] = CellState::Sunk;
                Ok(())
            }
            CellState::Sunk => Ok(()),
            _ => Err(GameError::InvalidPlacement),
        }
    }

    /// Project this grid into the attacker's fog-of-war view.
    pub fn target_view(&self) -> TargetView<N> {
        let mut cells = [[TargetCell::Unknown; N]; N];
        for r in 0..N {
            for c in 0..N {
                cells[r][c] = match self.cells[r][c] {
                    CellState::Empty | CellState::Occupied => TargetCell::Unknown,
                    CellState::Hit => TargetCell::Hit,
                    CellState::Miss => TargetCell::Miss,
                    CellState::Sunk => TargetCell::Sunk,
                };
            }
        }
        TargetView { cells }
    }
}

impl<const N: usize> Default for Grid<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// What the attacking side knows about a defender's cell. Unresolved
/// `Occupied` cells are indistinguishable from `Empty` here, so AI strategies
/// fed a `TargetView` cannot see ship locations before a shot lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCell {
    /// Untouched cell: a legal target.
    Unknown,
    Hit,
    Miss,
    Sunk,
}

/// Fog-of-war projection of a [`Grid`], the only board view AI strategies
/// ever receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetView<const N: usize> {
    cells: [[TargetCell; N]; N],
}

impl<const N: usize> TargetView<N> {
    pub fn get(&self, row: usize, col: usize) -> Result<TargetCell, GameError> {
        if row < N && col < N {
            Ok(self.cells[row][col])
        } else {
            Err(GameError::OutOfBounds { row, col })
        }
    }

    /// True when (row, col) is in bounds and not yet resolved.
    pub fn is_legal_target(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Ok(TargetCell::Unknown))
    }

    /// All legal target coordinates in row-major order.
    pub fn legal_targets(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..N).flat_map(move |r| {
            (0..N).filter_map(move |c| {
                if self.cells[r][c] == TargetCell::Unknown {
                    Some((r, c))
                } else {
                    None
                }
            })
        })
    }
}

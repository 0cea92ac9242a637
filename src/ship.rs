//! Ship definitions and placed-ship geometry.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{Coord, GameError};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Static description of a ship class: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipSpec {
    name: &'static str,
    length: usize,
}

impl ShipSpec {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship committed to a board: stable id, spec and the ordered, contiguous,
/// axis-aligned cells it occupies.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    id: usize,
    spec: ShipSpec,
    cells: Vec<Coord>,
    sunk: bool,
}

impl Ship {
    /// Build a ship anchored at (`row`, `col`) extending along `orientation`.
    /// Fails with `InvalidPlacement` when any cell would fall outside an
    /// `N×N` board.
    pub fn new(
        id: usize,
        spec: ShipSpec,
        orientation: Orientation,
        row: usize,
        col: usize,
        board_size: usize,
    ) -> Result<Self, GameError> {
        let len = spec.length();
        let fits = match orientation {
            Orientation::Horizontal => row < board_size && col + len <= board_size,
            Orientation::Vertical => col < board_size && row + len <= board_size,
        };
        if !fits {
            return Err(GameError::InvalidPlacement);
        }
        let cells = (0..len)
            .map(|i| match orientation {
                Orientation::Horizontal => (row, col + i),
                Orientation::Vertical => (row + i, col),
            })
            .collect();
        Ok(Ship {
            id,
            spec,
            cells,
            sunk: false,
        })
    }

    /// Stable id within a game (index into the fleet order).
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.spec.name()
    }

    pub fn length(&self) -> usize {
        self.spec.length()
    }

    pub fn spec(&self) -> ShipSpec {
        self.spec
    }

    /// Occupied cells in placement order (monotonically increasing).
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.iter().any(|&(r, c)| r == row && c == col)
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub(crate) fn mark_sunk(&mut self) {
        self.sunk = true;
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, name: \"{}\", cells: {:?}, sunk: {} }}",
            self.id, self.spec.name, self.cells, self.sunk
        )
    }
}

//! Common engine types: coordinates and error kinds.

/// A 0-based (row, col) pair, row-major.
pub type Coord = (usize, usize);

/// Errors returned by engine operations. All are local and recoverable:
/// the rejected command leaves state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate outside the board.
    OutOfBounds { row: usize, col: usize },
    /// Ship placement overlaps another ship or runs off the board.
    InvalidPlacement,
    /// Attack re-targeted a cell already resolved to hit, miss or sunk.
    CellAlreadyAttacked,
    /// Command issued outside the phase that permits it.
    WrongPhase,
    /// Random placement exceeded its retry budget.
    PlacementExhausted,
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::OutOfBounds { row, col } => {
                write!(f, "coordinate ({}, {}) is outside the board", row, col)
            }
            GameError::InvalidPlacement => {
                write!(f, "ship placement overlaps or is out of bounds")
            }
            GameError::CellAlreadyAttacked => {
                write!(f, "cell was already attacked")
            }
            GameError::WrongPhase => {
                write!(f, "command not permitted in the current phase")
            }
            GameError::PlacementExhausted => {
                write!(f, "random placement retry budget exhausted")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

//! One side's board: grid, fleet placement and attack resolution.

use rand::Rng;

use crate::common::{Coord, GameError};
use crate::config::{BOARD_SIZE, MAX_PLACEMENT_ATTEMPTS, NUM_SHIPS, SHIP_SPECS};
use crate::grid::{CellState, Grid, TargetView};
use crate::ship::{Orientation, Ship};

/// Result of one resolved attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    pub hit: bool,
    /// The ship this attack finished off, if any.
    pub sunk: Option<Ship>,
    /// True when every ship in the fleet is now sunk.
    pub fleet_defeated: bool,
}

/// A side's grid plus its fleet of up to `NUM_SHIPS` placed ships.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid<BOARD_SIZE>,
    ships: [Option<Ship>; NUM_SHIPS],
}

impl Board {
    /// Empty board, no ships placed.
    pub fn new() -> Self {
        Board {
            grid: Grid::new(),
            ships: core::array::from_fn(|_| None),
        }
    }

    pub fn grid(&self) -> &Grid<BOARD_SIZE> {
        &self.grid
    }

    /// Fog-of-war view of this board for the attacking side.
    pub fn target_view(&self) -> TargetView<BOARD_SIZE> {
        self.grid.target_view()
    }

    /// Placed ships in fleet order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().flatten()
    }

    pub fn ship(&self, ship_index: usize) -> Option<&Ship> {
        self.ships.get(ship_index).and_then(|s| s.as_ref())
    }

    pub fn ships_placed(&self) -> usize {
        self.ships.iter().flatten().count()
    }

    pub fn all_placed(&self) -> bool {
        self.ships_placed() == NUM_SHIPS
    }

    /// Number of ships sunk so far.
    pub fn sunk_count(&self) -> usize {
        self.ships().filter(|s| s.is_sunk()).count()
    }

    /// True when every ship in the fleet is sunk. An unfilled fleet is never
    /// defeated.
    pub fn all_sunk(&self) -> bool {
        self.ships
            .iter()
            .all(|slot| slot.as_ref().is_some_and(Ship::is_sunk))
    }

    /// Lengths of not-yet-sunk ships, zero for sunk or unplaced slots so the
    /// output stays fixed-size.
    pub fn remaining_lengths(&self) -> [usize; NUM_SHIPS] {
        let mut lens = [0usize; NUM_SHIPS];
        for (i, slot) in self.ships.iter().enumerate() {
            if let Some(ship) = slot {
                if !ship.is_sunk() {
                    lens[i] = ship.length();
                }
            }
        }
        lens
    }

    /// True iff all `length` consecutive cells starting at (`row`, `col`)
    /// along `orientation` are in bounds and `Empty`.
    pub fn can_place(
        &self,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
    ) -> bool {
        for i in 0..length {
            let (r, c) = match orientation {
                Orientation::Horizontal => (row, col + i),
                Orientation::Vertical => (row + i, col),
            };
            match self.grid.get(r, c) {
                Ok(CellState::Empty) => {}
                _ => return false,
            }
        }
        true
    }

    /// Commit the ship at `ship_index` to (`row`, `col`). Fails with
    /// `InvalidPlacement` when the slot is already filled or `can_place`
    /// would reject the footprint; the board is left unchanged on failure.
    pub fn place(
        &mut self,
        ship_index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        let spec = match SHIP_SPECS.get(ship_index) {
            Some(spec) if self.ships[ship_index].is_none() => *spec,
            _ => return Err(GameError::InvalidPlacement),
        };
        if !self.can_place(row, col, spec.length(), orientation) {
            return Err(GameError::InvalidPlacement);
        }
        let ship = Ship::new(ship_index, spec, orientation, row, col, BOARD_SIZE)?;
        for &(r, c) in ship.cells() {
            self.grid.occupy(r, c)?;
        }
        self.ships[ship_index] = Some(ship);
        Ok(())
    }

    /// Fill every remaining fleet slot by rejection sampling: 50/50
    /// orientation, uniform anchor, retried up to `MAX_PLACEMENT_ATTEMPTS`
    /// per ship. Practically unreachable on a standard board, the budget
    /// exists so a pathological configuration fails with
    /// `PlacementExhausted` instead of hanging.
    pub fn place_all_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        for ship_index in 0..NUM_SHIPS {
            if self.ships[ship_index].is_some() {
                continue;
            }
            let length = SHIP_SPECS[ship_index].length();
            let mut placed = false;
            for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                let orientation = if rng.random() {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                let (max_r, max_c) = match orientation {
                    Orientation::Horizontal => (BOARD_SIZE - 1, BOARD_SIZE - length),
                    Orientation::Vertical => (BOARD_SIZE - length, BOARD_SIZE - 1),
                };
                let row = rng.random_range(0..=max_r);
                let col = rng.random_range(0..=max_c);
                if self.can_place(row, col, length, orientation) {
                    self.place(ship_index, row, col, orientation)?;
                    placed = true;
                    break;
                }
            }
            if !placed {
                return Err(GameError::PlacementExhausted);
            }
        }
        Ok(())
    }

    /// Resolve a shot at (`row`, `col`): mark the cell, detect any newly
    /// sunk ship and promote its cells to `Sunk`. Fails with
    /// `CellAlreadyAttacked` on a resolved cell, leaving the board
    /// unchanged. Knows nothing of turns or phases; both sides resolve
    /// attacks through this.
    pub fn attack(&mut self, row: usize, col: usize) -> Result<AttackOutcome, GameError> {
        let hit = self.grid.fire(row, col)?;

        let mut sunk = None;
        if hit {
            for slot in self.ships.iter_mut() {
                let ship = match slot {
                    Some(ship) if !ship.is_sunk() => ship,
                    _ => continue,
                };
                let down = ship.cells().iter().all(|&(r, c)| {
                    matches!(self.grid.get(r, c), Ok(CellState::Hit | CellState::Sunk))
                });
                if down {
                    for &(r, c) in ship.cells() {
                        self.grid.sink(r, c)?;
                    }
                    ship.mark_sunk();
                    sunk = Some(ship.clone());
                    // cells don't overlap, so at most one ship sinks per shot
                    break;
                }
            }
        }

        Ok(AttackOutcome {
            hit,
            sunk,
            fleet_defeated: self.all_sunk(),
        })
    }

    /// Which ship, if any, occupies (`row`, `col`).
    pub fn ship_at(&self, row: usize, col: usize) -> Option<&Ship> {
        self.ships().find(|ship| ship.contains(row, col))
    }

    /// All occupied coordinates of the fleet, in fleet order.
    pub fn ship_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.ships().flat_map(|ship| ship.cells().iter().copied())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

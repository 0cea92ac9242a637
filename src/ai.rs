//! Targeting strategies for the computer opponent.
//!
//! All strategies observe only a [`TargetView`], the fog-of-war projection
//! where unresolved ship cells read as `Unknown`. Selection is a pure
//! function of the view, the surviving ship lengths, the strategy's memory
//! and the injected RNG, so seeded games replay identically.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use rand::Rng;

use crate::board::AttackOutcome;
use crate::common::Coord;
use crate::config::{BOARD_SIZE, NUM_SHIPS};
use crate::grid::{TargetCell, TargetView};

/// Extra accumulator weight for a candidate placement covering at least one
/// confirmed hit: that ship has to run through the hit somewhere.
const HIT_WEIGHT: u32 = 20;

/// The closed set of targeting behaviours, fixed for a game's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Uniform over all legal targets, no memory.
    Random,
    /// Random search until a hit, then flood the hit's orthogonal
    /// neighbours via a FIFO queue.
    HuntTarget,
    /// Score every cell by the consistent ship placements through it,
    /// recomputed fresh each turn.
    ProbabilityDensity,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Random => "Random",
            Strategy::HuntTarget => "Hunt-Target",
            Strategy::ProbabilityDensity => "Probability-Density",
        }
    }
}

/// Hunt-target working set, reset at battle start and updated after every
/// computer attack.
#[derive(Debug, Clone, Default)]
pub struct AiMemory {
    /// Untried candidates adjacent to unresolved hits, FIFO.
    pending: VecDeque<Coord>,
    /// Cells hit but not yet confirmed part of a sunk ship.
    active_hits: Vec<Coord>,
}

impl AiMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.active_hits.clear();
    }

    pub fn pending(&self) -> impl Iterator<Item = Coord> + '_ {
        self.pending.iter().copied()
    }

    pub fn active_hits(&self) -> &[Coord] {
        &self.active_hits
    }

    /// Fold one resolved attack into the memory. On a hit, the up-to-four
    /// orthogonal in-bounds legal neighbours are enqueued (every hit seeds
    /// the hunt, not just the first). The instant a ship is confirmed sunk,
    /// its cells are purged from both structures along with any queued
    /// coordinate that is no longer a legal target.
    pub fn observe<const N: usize>(
        &mut self,
        coord: Coord,
        outcome: &AttackOutcome,
        view: &TargetView<N>,
    ) {
        if outcome.hit {
            self.active_hits.push(coord);
            for neighbor in orthogonal_neighbors::<N>(coord) {
                if view.is_legal_target(neighbor.0, neighbor.1)
                    && !self.pending.contains(&neighbor)
                {
                    self.pending.push_back(neighbor);
                }
            }
        }
        if let Some(ship) = &outcome.sunk {
            self.active_hits.retain(|&(r, c)| !ship.contains(r, c));
            self.pending.retain(|&(r, c)| {
                !ship.contains(r, c) && view.is_legal_target(r, c)
            });
        }
    }
}

fn orthogonal_neighbors<const N: usize>((row, col): Coord) -> impl Iterator<Item = Coord> {
    let mut out = [None; 4];
    if row > 0 {
        out[0] = Some((row - 1, col));
    }
    if row + 1 < N {
        out[1] = Some((row + 1, col));
    }
    if col > 0 {
        out[2] = Some((row, col - 1));
    }
    if col + 1 < N {
        out[3] = Some((row, col + 1));
    }
    out.into_iter().flatten()
}

/// Pick the next attack coordinate for `strategy`. Returns `None` only when
/// the view has no legal target left, which a live game never presents: an
/// exhausted board means the fleet was already defeated.
pub fn select_target<R: Rng + ?Sized>(
    strategy: Strategy,
    view: &TargetView<BOARD_SIZE>,
    remaining_lengths: &[usize; NUM_SHIPS],
    memory: &mut AiMemory,
    rng: &mut R,
) -> Option<Coord> {
    match strategy {
        Strategy::Random => random_target(view, rng),
        Strategy::HuntTarget => hunt_target(view, memory, rng),
        Strategy::ProbabilityDensity => density_target(view, remaining_lengths, rng),
    }
}

/// Uniform sample over all legal targets.
fn random_target<R: Rng + ?Sized>(view: &TargetView<BOARD_SIZE>, rng: &mut R) -> Option<Coord> {
    let candidates: Vec<Coord> = view.legal_targets().collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}

/// Pop queued candidates in FIFO order until one is still legal, falling
/// back to a random legal target when the queue runs dry.
fn hunt_target<R: Rng + ?Sized>(
    view: &TargetView<BOARD_SIZE>,
    memory: &mut AiMemory,
    rng: &mut R,
) -> Option<Coord> {
    while let Some((row, col)) = memory.pending.pop_front() {
        if view.is_legal_target(row, col) {
            return Some((row, col));
        }
    }
    random_target(view, rng)
}

/// Accumulate, for every surviving ship length, the weight of every
/// placement consistent with current knowledge. A placement is consistent
/// iff none of its cells reads `Miss` or `Sunk`; covering a confirmed `Hit`
/// raises its weight from 1 to [`HIT_WEIGHT`].
pub fn density_weights(
    view: &TargetView<BOARD_SIZE>,
    remaining_lengths: &[usize; NUM_SHIPS],
) -> [[u32; BOARD_SIZE]; BOARD_SIZE] {
    let mut weights = [[0u32; BOARD_SIZE]; BOARD_SIZE];

    for &len in remaining_lengths {
        if len == 0 {
            continue;
        }
        // horizontal then vertical anchors
        for vertical in [false, true] {
            let (max_r, max_c) = if vertical {
                (BOARD_SIZE - len + 1, BOARD_SIZE)
            } else {
                (BOARD_SIZE, BOARD_SIZE - len + 1)
            };
            for r in 0..max_r {
                for c in 0..max_c {
                    let mut consistent = true;
                    let mut covers_hit = false;
                    for k in 0..len {
                        let (rr, cc) = if vertical { (r + k, c) } else { (r, c + k) };
                        match view.get(rr, cc) {
                            Ok(TargetCell::Miss) | Ok(TargetCell::Sunk) => {
                                consistent = false;
                                break;
                            }
                            Ok(TargetCell::Hit) => covers_hit = true,
                            _ => {}
                        }
                    }
                    if !consistent {
                        continue;
                    }
                    let weight = if covers_hit { HIT_WEIGHT } else { 1 };
                    for k in 0..len {
                        let (rr, cc) = if vertical { (r + k, c) } else { (r, c + k) };
                        weights[rr][cc] += weight;
                    }
                }
            }
        }
    }

    weights
}

/// Take the legal cell with the maximum accumulated weight, breaking ties
/// uniformly at random (single-pass reservoir over the tied maxima).
fn density_target<R: Rng + ?Sized>(
    view: &TargetView<BOARD_SIZE>,
    remaining_lengths: &[usize; NUM_SHIPS],
    rng: &mut R,
) -> Option<Coord> {
    let weights = density_weights(view, remaining_lengths);
    let mut best: Option<(u32, Coord)> = None;
    let mut ties = 0u32;
    for (row, col) in view.legal_targets() {
        let w = weights[row][col];
        match best {
            Some((max, _)) if w < max => {}
            Some((max, _)) if w == max => {
                ties += 1;
                if rng.random_range(0..=ties) == 0 {
                    best = Some((w, (row, col)));
                }
            }
            _ => {
                ties = 0;
                best = Some((w, (row, col)));
            }
        }
    }
    best.map(|(_, coord)| coord)
}

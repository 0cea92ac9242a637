//! The game-level state machine: placement, alternating battle turns,
//! game over. The orchestrator is the sole mutator of both boards, so turn
//! resolution is serialized by construction.

use rand::rngs::SmallRng;

use crate::ai::{self, AiMemory, Strategy};
use crate::board::{AttackOutcome, Board};
use crate::common::{Coord, GameError};
use crate::config::{BOARD_SIZE, NUM_SHIPS};
use crate::grid::TargetView;
use crate::leaderboard::ShotRecord;
use crate::ship::Orientation;

/// Which side acts or won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOwner {
    Human,
    Computer,
}

/// Strictly advancing game phase; only a full reset returns to `Placement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Accepting human ship placements, `next_ship` slots already filled.
    Placement { next_ship: usize },
    Battle { turn: TurnOwner },
    GameOver { winner: TurnOwner },
}

/// One resolved human attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanShot {
    pub outcome: AttackOutcome,
    pub phase: GamePhase,
}

/// One resolved computer attack, with the coordinate the AI chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerShot {
    pub coord: Coord,
    pub outcome: AttackOutcome,
    pub phase: GamePhase,
}

/// A full human-vs-computer game. The strategy is chosen at construction and
/// fixed for the game's duration; the RNG is injected so seeded games replay
/// identically.
pub struct Game {
    human: Board,
    computer: Board,
    phase: GamePhase,
    strategy: Strategy,
    memory: AiMemory,
    rng: SmallRng,
    shots: u32,
}

impl Game {
    pub fn new(strategy: Strategy, rng: SmallRng) -> Self {
        Game {
            human: Board::new(),
            computer: Board::new(),
            phase: GamePhase::Placement { next_ship: 0 },
            strategy,
            memory: AiMemory::new(),
            rng,
            shots: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Side to act, `None` outside of battle.
    pub fn turn_owner(&self) -> Option<TurnOwner> {
        match self.phase {
            GamePhase::Battle { turn } => Some(turn),
            _ => None,
        }
    }

    /// The human's own board, ships visible.
    pub fn human_board(&self) -> &Board {
        &self.human
    }

    /// The computer's board. Renderers must use [`Game::tracking_view`] for
    /// the human-facing tracking grid; this accessor exists for game-over
    /// reveals and tests.
    pub fn computer_board(&self) -> &Board {
        &self.computer
    }

    /// Fog-of-war view of the computer's board.
    pub fn tracking_view(&self) -> TargetView<BOARD_SIZE> {
        self.computer.target_view()
    }

    /// Human shots fired this battle.
    pub fn shot_count(&self) -> u32 {
        self.shots
    }

    fn next_placement_slot(&self) -> Result<usize, GameError> {
        match self.phase {
            GamePhase::Placement { next_ship } if next_ship < NUM_SHIPS => Ok(next_ship),
            _ => Err(GameError::WrongPhase),
        }
    }

    /// Place the next ship of the fixed fleet order on the human board.
    pub fn place_ship(
        &mut self,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<GamePhase, GameError> {
        let slot = self.next_placement_slot()?;
        self.human.place(slot, row, col, orientation)?;
        self.phase = GamePhase::Placement {
            next_ship: slot + 1,
        };
        Ok(self.phase)
    }

    /// Fill every remaining human slot at once. Atomic: on
    /// `PlacementExhausted` the board keeps its manual placements.
    pub fn place_all_random(&mut self) -> Result<GamePhase, GameError> {
        self.next_placement_slot()?;
        let mut filled = self.human.clone();
        filled.place_all_random(&mut self.rng)?;
        self.human = filled;
        self.phase = GamePhase::Placement {
            next_ship: NUM_SHIPS,
        };
        Ok(self.phase)
    }

    /// Discard all human placements and start placing again.
    pub fn reset_placement(&mut self) -> Result<GamePhase, GameError> {
        match self.phase {
            GamePhase::Placement { .. } => {
                self.human = Board::new();
                self.phase = GamePhase::Placement { next_ship: 0 };
                Ok(self.phase)
            }
            _ => Err(GameError::WrongPhase),
        }
    }

    /// Transition to battle once the human fleet is complete: places the
    /// computer fleet, resets the AI memory and the shot counter, and hands
    /// the first turn to the human.
    pub fn start_battle(&mut self) -> Result<GamePhase, GameError> {
        match self.phase {
            GamePhase::Placement { next_ship } if next_ship == NUM_SHIPS => {}
            _ => return Err(GameError::WrongPhase),
        }
        // place into a scratch board so a PlacementExhausted failure leaves
        // the game exactly as it was
        let mut computer = Board::new();
        computer.place_all_random(&mut self.rng)?;
        self.computer = computer;
        self.memory.reset();
        self.shots = 0;
        self.phase = GamePhase::Battle {
            turn: TurnOwner::Human,
        };
        Ok(self.phase)
    }

    /// Resolve one human attack against the computer's board. Only legal in
    /// `Battle` on the human's turn; a rejected attack changes nothing.
    pub fn attack(&mut self, row: usize, col: usize) -> Result<HumanShot, GameError> {
        match self.phase {
            GamePhase::Battle {
                turn: TurnOwner::Human,
            } => {}
            _ => return Err(GameError::WrongPhase),
        }
        let outcome = self.computer.attack(row, col)?;
        self.shots += 1;
        self.phase = if outcome.fleet_defeated {
            GamePhase::GameOver {
                winner: TurnOwner::Human,
            }
        } else {
            GamePhase::Battle {
                turn: TurnOwner::Computer,
            }
        };
        Ok(HumanShot {
            outcome,
            phase: self.phase,
        })
    }

    /// Let the selected strategy pick and resolve one attack against the
    /// human's board. Only legal in `Battle` on the computer's turn.
    pub fn computer_turn(&mut self) -> Result<ComputerShot, GameError> {
        match self.phase {
            GamePhase::Battle {
                turn: TurnOwner::Computer,
            } => {}
            _ => return Err(GameError::WrongPhase),
        }
        let view = self.human.target_view();
        let remaining = self.human.remaining_lengths();
        // a live battle always has a legal target: an exhausted view would
        // mean the human fleet was already defeated and the phase GameOver
        let coord = ai::select_target(
            self.strategy,
            &view,
            &remaining,
            &mut self.memory,
            &mut self.rng,
        )
        .ok_or(GameError::WrongPhase)?;
        let outcome = self.human.attack(coord.0, coord.1)?;
        self.memory
            .observe(coord, &outcome, &self.human.target_view());
        self.phase = if outcome.fleet_defeated {
            GamePhase::GameOver {
                winner: TurnOwner::Computer,
            }
        } else {
            GamePhase::Battle {
                turn: TurnOwner::Human,
            }
        };
        Ok(ComputerShot {
            coord,
            outcome,
            phase: self.phase,
        })
    }

    /// Full reset back to `Placement(0)`: both boards cleared, AI memory and
    /// shot counter zeroed. The strategy and RNG stream are kept.
    pub fn reset_game(&mut self) {
        self.human = Board::new();
        self.computer = Board::new();
        self.memory.reset();
        self.shots = 0;
        self.phase = GamePhase::Placement { next_ship: 0 };
    }

    /// The record to append to the external leaderboard, present only after
    /// a human victory. The caller supplies the timestamp; the engine has no
    /// clock and never reads the leaderboard back.
    pub fn victory_record(&self, timestamp: u64) -> Option<ShotRecord> {
        match self.phase {
            GamePhase::GameOver {
                winner: TurnOwner::Human,
            } => Some(ShotRecord::new(self.strategy.name(), self.shots, timestamp)),
            _ => None,
        }
    }
}

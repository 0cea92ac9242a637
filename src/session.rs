#![cfg(feature = "std")]

//! Async driver around a [`Game`]: resolves the human attack immediately,
//! then schedules the computer reply behind a cancellable "thinking time"
//! delay. A reset fires the cancel handle, so a stale computer move can
//! never apply after the boards have been cleared.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::time::Duration;

use crate::common::GameError;
use crate::game::{ComputerShot, Game, GamePhase, HumanShot, TurnOwner};
use crate::ship::Orientation;

/// Injectable scheduling seam for the computer's thinking pause. The delay
/// is presentation flavour, never a correctness mechanism, so tests swap in
/// [`NoDelay`] for determinism.
#[async_trait::async_trait]
pub trait TurnClock: Send + Sync {
    async fn pause(&self);
}

/// Real clock: sleep a fixed duration.
pub struct DelayClock(pub Duration);

#[async_trait::async_trait]
impl TurnClock for DelayClock {
    async fn pause(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// Zero-delay clock for tests and headless runs.
pub struct NoDelay;

#[async_trait::async_trait]
impl TurnClock for NoDelay {
    async fn pause(&self) {}
}

/// Outcome of the scheduled computer reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputerMove {
    Played(ComputerShot),
    /// The pending delay was cancelled (game reset) before the move fired.
    Cancelled,
    /// No reply owed: the human attack ended the game.
    NotNeeded,
}

pub struct Session {
    game: Game,
    clock: Box<dyn TurnClock>,
    cancel: Arc<Notify>,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when the attack future completes or is
/// dropped mid-delay, so an abandoned attack can never wedge the session.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Session {
    pub fn new(game: Game, clock: Box<dyn TurnClock>) -> Self {
        Session {
            game,
            clock,
            cancel: Arc::new(Notify::new()),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Handle usable from another task to cancel a pending computer turn,
    /// exactly what [`Session::reset`] fires internally.
    pub fn cancel_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.cancel)
    }

    pub fn place_ship(
        &mut self,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<GamePhase, GameError> {
        self.game.place_ship(row, col, orientation)
    }

    pub fn place_all_random(&mut self) -> Result<GamePhase, GameError> {
        self.game.place_all_random()
    }

    pub fn reset_placement(&mut self) -> Result<GamePhase, GameError> {
        self.game.reset_placement()
    }

    pub fn start_battle(&mut self) -> Result<GamePhase, GameError> {
        self.game.start_battle()
    }

    /// Resolve one human attack and, unless the game ended, the computer's
    /// delayed reply. Re-entry while an attack is still in flight is
    /// rejected, guarding against a UI double-fire targeting the same cell
    /// twice before state lands.
    pub async fn attack(
        &mut self,
        row: usize,
        col: usize,
    ) -> Result<(HumanShot, ComputerMove), GameError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(GameError::WrongPhase);
        }
        let _guard = InFlightGuard(Arc::clone(&self.in_flight));
        self.attack_inner(row, col).await
    }

    async fn attack_inner(
        &mut self,
        row: usize,
        col: usize,
    ) -> Result<(HumanShot, ComputerMove), GameError> {
        let shot = self.game.attack(row, col)?;
        log::debug!(
            "human attack ({}, {}): hit={} phase={:?}",
            row,
            col,
            shot.outcome.hit,
            shot.phase
        );
        if !matches!(
            shot.phase,
            GamePhase::Battle {
                turn: TurnOwner::Computer
            }
        ) {
            return Ok((shot, ComputerMove::NotNeeded));
        }
        let reply = self.computer_move().await?;
        Ok((shot, reply))
    }

    /// Wait out the thinking delay, then resolve the computer's attack.
    /// Resolves to `Cancelled` if the cancel handle fires first.
    pub async fn computer_move(&mut self) -> Result<ComputerMove, GameError> {
        tokio::select! {
            _ = self.cancel.notified() => {
                log::debug!("computer turn cancelled before firing");
                Ok(ComputerMove::Cancelled)
            }
            _ = self.clock.pause() => {
                let shot = self.game.computer_turn()?;
                log::debug!(
                    "computer attack {:?}: hit={} phase={:?}",
                    shot.coord,
                    shot.outcome.hit,
                    shot.phase
                );
                Ok(ComputerMove::Played(shot))
            }
        }
    }

    /// Full game reset. Cancels any pending computer-turn delay first, the
    /// one explicit cancellation contract in the system.
    pub fn reset(&mut self) {
        self.cancel.notify_waiters();
        self.in_flight.store(false, Ordering::Release);
        self.game.reset_game();
        log::info!("game reset to placement");
    }
}

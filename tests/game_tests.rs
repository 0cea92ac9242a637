use broadside::{
    Game, GameError, GamePhase, Orientation, Strategy, TurnOwner, BOARD_SIZE, NUM_SHIPS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn new_game(strategy: Strategy, seed: u64) -> Game {
    Game::new(strategy, SmallRng::seed_from_u64(seed))
}

/// First legal target of the tracking view, scanning row-major.
fn next_sweep_target(game: &Game) -> (usize, usize) {
    game.tracking_view()
        .legal_targets()
        .next()
        .expect("a live game always has a legal target")
}

#[test]
fn starts_in_placement() {
    let game = new_game(Strategy::Random, 1);
    assert_eq!(game.phase(), GamePhase::Placement { next_ship: 0 });
    assert_eq!(game.turn_owner(), None);
    assert_eq!(game.shot_count(), 0);
}

#[test]
fn commands_rejected_outside_their_phase() {
    let mut game = new_game(Strategy::Random, 2);
    assert_eq!(game.attack(0, 0).unwrap_err(), GameError::WrongPhase);
    assert_eq!(game.computer_turn().unwrap_err(), GameError::WrongPhase);
    assert_eq!(game.start_battle().unwrap_err(), GameError::WrongPhase);

    game.place_all_random().unwrap();
    assert_eq!(
        game.place_ship(0, 0, Orientation::Horizontal).unwrap_err(),
        GameError::WrongPhase
    );
    game.start_battle().unwrap();
    assert_eq!(game.place_all_random().unwrap_err(), GameError::WrongPhase);
    assert_eq!(game.reset_placement().unwrap_err(), GameError::WrongPhase);
    assert_eq!(game.start_battle().unwrap_err(), GameError::WrongPhase);

    // human to act: the computer may not move yet
    assert_eq!(game.computer_turn().unwrap_err(), GameError::WrongPhase);
    let (r, c) = next_sweep_target(&game);
    game.attack(r, c).unwrap();
    // turn flipped: a second human attack is re-entry, rejected untouched
    let snapshot = game.shot_count();
    assert_eq!(game.attack(r, c + 1).unwrap_err(), GameError::WrongPhase);
    assert_eq!(game.shot_count(), snapshot);
}

#[test]
fn manual_placement_advances_in_fleet_order() {
    let mut game = new_game(Strategy::Random, 3);
    let rows = [0, 2, 4, 6, 8];
    for (i, &row) in rows.iter().enumerate() {
        let phase = game.place_ship(row, 0, Orientation::Horizontal).unwrap();
        assert_eq!(phase, GamePhase::Placement { next_ship: i + 1 });
    }
    assert_eq!(game.human_board().ships_placed(), NUM_SHIPS);
    game.start_battle().unwrap();
    assert_eq!(
        game.phase(),
        GamePhase::Battle {
            turn: TurnOwner::Human
        }
    );
    assert!(game.computer_board().all_placed());
}

#[test]
fn rejected_placement_leaves_slot_open() {
    let mut game = new_game(Strategy::Random, 4);
    game.place_ship(0, 0, Orientation::Horizontal).unwrap();
    // overlapping the carrier
    let err = game.place_ship(0, 2, Orientation::Vertical).unwrap_err();
    assert_eq!(err, GameError::InvalidPlacement);
    assert_eq!(game.phase(), GamePhase::Placement { next_ship: 1 });
    game.place_ship(2, 0, Orientation::Horizontal).unwrap();
    assert_eq!(game.phase(), GamePhase::Placement { next_ship: 2 });
}

#[test]
fn reset_placement_discards_ships() {
    let mut game = new_game(Strategy::Random, 5);
    game.place_ship(0, 0, Orientation::Horizontal).unwrap();
    game.place_ship(2, 0, Orientation::Horizontal).unwrap();
    game.reset_placement().unwrap();
    assert_eq!(game.phase(), GamePhase::Placement { next_ship: 0 });
    assert_eq!(game.human_board().ships_placed(), 0);
}

/// A rejected `start_battle` leaves every piece of state untouched: no
/// phase change and no partially placed computer fleet.
#[test]
fn failed_start_battle_leaves_state_untouched() {
    let mut game = new_game(Strategy::Random, 8);
    game.place_ship(0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(game.start_battle().unwrap_err(), GameError::WrongPhase);
    assert_eq!(game.phase(), GamePhase::Placement { next_ship: 1 });
    assert_eq!(game.computer_board().ships_placed(), 0);
    assert_eq!(game.human_board().ships_placed(), 1);
}

/// Scenario: a seeded full game against the Random strategy terminates
/// within `BOARD_SIZE²` computer turns (finite board, no repeated legal
/// targets).
#[test]
fn seeded_game_terminates_within_board_bound() {
    for seed in 0..8u64 {
        let mut game = new_game(Strategy::Random, seed);
        game.place_all_random().unwrap();
        game.start_battle().unwrap();

        let mut computer_turns = 0usize;
        let winner = loop {
            match game.phase() {
                GamePhase::GameOver { winner } => break winner,
                GamePhase::Battle {
                    turn: TurnOwner::Human,
                } => {
                    let (r, c) = next_sweep_target(&game);
                    game.attack(r, c).unwrap();
                }
                GamePhase::Battle {
                    turn: TurnOwner::Computer,
                } => {
                    game.computer_turn().unwrap();
                    computer_turns += 1;
                    assert!(
                        computer_turns <= BOARD_SIZE * BOARD_SIZE,
                        "seed {} exceeded the pigeonhole bound",
                        seed
                    );
                }
                GamePhase::Placement { .. } => unreachable!(),
            }
        };
        assert!(matches!(winner, TurnOwner::Human | TurnOwner::Computer));
    }
}

#[test]
fn victory_record_only_after_human_win() {
    let mut game = new_game(Strategy::HuntTarget, 6);
    assert!(game.victory_record(0).is_none());
    game.place_all_random().unwrap();
    game.start_battle().unwrap();
    assert!(game.victory_record(0).is_none());

    // sweep the computer's actual fleet; the human wins without reply
    let targets: Vec<_> = game.computer_board().ship_cells().collect();
    for (r, c) in targets {
        if game.turn_owner() == Some(TurnOwner::Computer) {
            game.computer_turn().unwrap();
        }
        let shot = game.attack(r, c).unwrap();
        assert!(shot.outcome.hit);
        if let GamePhase::GameOver { winner } = shot.phase {
            assert_eq!(winner, TurnOwner::Human);
        }
    }
    assert!(matches!(
        game.phase(),
        GamePhase::GameOver {
            winner: TurnOwner::Human
        }
    ));
    let record = game.victory_record(1234).expect("human won");
    assert_eq!(record.shots, game.shot_count());
    assert_eq!(record.opponent, "Hunt-Target");
    assert_eq!(record.timestamp, 1234);
}

#[test]
fn game_over_is_terminal_until_reset() {
    let mut game = new_game(Strategy::Random, 7);
    game.place_all_random().unwrap();
    game.start_battle().unwrap();
    let targets: Vec<_> = game.computer_board().ship_cells().collect();
    for (r, c) in targets {
        if game.turn_owner() == Some(TurnOwner::Computer) {
            game.computer_turn().unwrap();
        }
        game.attack(r, c).unwrap();
    }
    assert!(matches!(game.phase(), GamePhase::GameOver { .. }));
    assert_eq!(game.attack(0, 0).unwrap_err(), GameError::WrongPhase);
    assert_eq!(game.computer_turn().unwrap_err(), GameError::WrongPhase);
    assert_eq!(game.start_battle().unwrap_err(), GameError::WrongPhase);

    game.reset_game();
    assert_eq!(game.phase(), GamePhase::Placement { next_ship: 0 });
    assert_eq!(game.shot_count(), 0);
    assert_eq!(game.human_board().ships_placed(), 0);
    assert_eq!(game.computer_board().ships_placed(), 0);
    // strategy survives the reset
    assert_eq!(game.strategy(), Strategy::Random);
}

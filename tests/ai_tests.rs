use broadside::{
    density_weights, select_target, AiMemory, Board, Orientation, Strategy, TargetCell,
    BOARD_SIZE, NUM_SHIPS,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Brute-force reference for "some surviving ship length fits through this
/// cell given current misses and sunk cells".
fn placement_exists(
    view: &broadside::TargetView<BOARD_SIZE>,
    remaining: &[usize; NUM_SHIPS],
    row: usize,
    col: usize,
) -> bool {
    for &len in remaining {
        if len == 0 {
            continue;
        }
        for vertical in [false, true] {
            for offset in 0..len {
                let (r0, c0) = if vertical {
                    match row.checked_sub(offset) {
                        Some(r0) => (r0, col),
                        None => continue,
                    }
                } else {
                    match col.checked_sub(offset) {
                        Some(c0) => (row, c0),
                        None => continue,
                    }
                };
                let fits = (0..len).all(|k| {
                    let (r, c) = if vertical { (r0 + k, c0) } else { (r0, c0 + k) };
                    !matches!(
                        view.get(r, c),
                        Ok(TargetCell::Miss) | Ok(TargetCell::Sunk) | Err(_)
                    )
                });
                if fits {
                    return true;
                }
            }
        }
    }
    false
}

/// Density weight is 0 iff no surviving ship length can be placed through
/// the cell.
#[test]
fn density_weight_zero_iff_no_placement_fits() {
    for seed in 0..20u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        board.place_all_random(&mut rng).unwrap();
        for _ in 0..35 {
            let r = rng.random_range(0..BOARD_SIZE);
            let c = rng.random_range(0..BOARD_SIZE);
            let _ = board.attack(r, c);
        }
        let view = board.target_view();
        let remaining = board.remaining_lengths();
        let weights = density_weights(&view, &remaining);
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                assert_eq!(
                    weights[r][c] > 0,
                    placement_exists(&view, &remaining, r, c),
                    "seed {} cell ({}, {})",
                    seed,
                    r,
                    c
                );
            }
        }
    }
}

/// Scenario: a length-2 ship hit once and boxed in by misses on three of its
/// four extensions. Density must concentrate all hit-biased weight on the
/// one remaining extension and pick it.
#[test]
fn density_targets_the_only_open_extension() {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    board.place(1, 2, 0, Orientation::Horizontal).unwrap();
    board.place(2, 0, 6, Orientation::Vertical).unwrap();
    board.place(3, 8, 0, Orientation::Horizontal).unwrap();
    board.place(4, 5, 5, Orientation::Horizontal).unwrap(); // Destroyer F6-G6

    // sink everything but the destroyer
    for c in 0..5 {
        board.attack(0, c).unwrap();
    }
    for c in 0..4 {
        board.attack(2, c).unwrap();
    }
    for r in 0..3 {
        board.attack(r, 6).unwrap();
    }
    for c in 0..3 {
        board.attack(8, c).unwrap();
    }
    assert_eq!(board.remaining_lengths(), [0, 0, 0, 0, 2]);

    // one hit on the destroyer, misses on three of its extensions
    assert!(board.attack(5, 5).unwrap().hit);
    assert!(!board.attack(4, 5).unwrap().hit);
    assert!(!board.attack(6, 5).unwrap().hit);
    assert!(!board.attack(5, 4).unwrap().hit);

    let view = board.target_view();
    let weights = density_weights(&view, &board.remaining_lengths());
    assert!(weights[5][6] >= 20, "open extension must carry the hit bias");
    for (r, c) in view.legal_targets() {
        if (r, c) != (5, 6) {
            assert!(
                weights[r][c] < weights[5][6],
                "({}, {}) must not out-weigh the open extension",
                r,
                c
            );
        }
    }

    let mut memory = AiMemory::new();
    let mut rng = SmallRng::seed_from_u64(9);
    let pick = select_target(
        Strategy::ProbabilityDensity,
        &view,
        &board.remaining_lengths(),
        &mut memory,
        &mut rng,
    );
    assert_eq!(pick, Some((5, 6)));
}

/// A view with no legal target left yields no pick from any strategy,
/// rather than a fabricated coordinate that would then bounce as
/// `CellAlreadyAttacked`.
#[test]
fn exhausted_view_yields_no_target() {
    let mut rng = SmallRng::seed_from_u64(21);
    let mut board = Board::new();
    board.place_all_random(&mut rng).unwrap();
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            board.attack(r, c).unwrap();
        }
    }
    let view = board.target_view();
    assert_eq!(view.legal_targets().count(), 0);
    for strategy in [
        Strategy::Random,
        Strategy::HuntTarget,
        Strategy::ProbabilityDensity,
    ] {
        let mut memory = AiMemory::new();
        assert_eq!(
            select_target(strategy, &view, &board.remaining_lengths(), &mut memory, &mut rng),
            None,
            "{:?} invented a target on an exhausted view",
            strategy
        );
    }
}

/// Every strategy only ever fires at legal targets, across whole games.
/// A pick of a resolved cell would surface as `CellAlreadyAttacked` inside
/// `computer_turn`.
#[test]
fn strategies_never_target_resolved_cells() {
    for strategy in [
        Strategy::Random,
        Strategy::HuntTarget,
        Strategy::ProbabilityDensity,
    ] {
        for seed in 0..5u64 {
            let mut memory = AiMemory::new();
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut board = Board::new();
            board.place_all_random(&mut rng).unwrap();
            let mut turns = 0;
            loop {
                let view = board.target_view();
                let remaining = board.remaining_lengths();
                let (r, c) = select_target(strategy, &view, &remaining, &mut memory, &mut rng)
                    .expect("live game must offer a target");
                assert!(
                    view.is_legal_target(r, c),
                    "{:?} seed {} picked resolved cell ({}, {})",
                    strategy,
                    seed,
                    r,
                    c
                );
                let outcome = board.attack(r, c).unwrap();
                memory.observe((r, c), &outcome, &board.target_view());
                turns += 1;
                if outcome.fleet_defeated {
                    break;
                }
                assert!(turns <= BOARD_SIZE * BOARD_SIZE, "strategy failed to finish");
            }
        }
    }
}

/// Hunt-target finishes a fleet in fewer shots than pure random search
/// needs in the worst case: after the first hit it stays in the
/// neighbourhood until the ship sinks.
#[test]
fn hunt_follows_up_on_a_hit() {
    let mut board = Board::new();
    board.place(0, 0, 0, Orientation::Horizontal).unwrap();
    board.place(1, 2, 0, Orientation::Horizontal).unwrap();
    board.place(2, 4, 0, Orientation::Horizontal).unwrap();
    board.place(3, 6, 0, Orientation::Horizontal).unwrap();
    board.place(4, 8, 0, Orientation::Horizontal).unwrap();

    let mut memory = AiMemory::new();
    let mut rng = SmallRng::seed_from_u64(3);

    // seed the hunt with a known hit
    let outcome = board.attack(2, 1).unwrap();
    assert!(outcome.hit);
    memory.observe((2, 1), &outcome, &board.target_view());

    // the next picks must come from the queued neighbourhood until the
    // battleship is sunk
    let mut sunk = false;
    for _ in 0..12 {
        let view = board.target_view();
        let (r, c) = select_target(
            Strategy::HuntTarget,
            &view,
            &board.remaining_lengths(),
            &mut memory,
            &mut rng,
        )
        .expect("live game must offer a target");
        assert!(
            r.abs_diff(2) + c.abs_diff(1) <= 4,
            "hunt wandered away from the hit at (2, 1): picked ({}, {})",
            r,
            c
        );
        let outcome = board.attack(r, c).unwrap();
        memory.observe((r, c), &outcome, &board.target_view());
        if outcome.sunk.is_some() {
            sunk = true;
            break;
        }
    }
    assert!(sunk, "battleship not sunk within the follow-up budget");
}

/// Fog of war: strategies fed two boards with identical resolved cells but
/// different hidden placements make identical picks from the same seed.
#[test]
fn strategies_cannot_see_unhit_ships() {
    let mut a = Board::new();
    a.place(0, 0, 0, Orientation::Horizontal).unwrap();
    a.place(1, 1, 0, Orientation::Horizontal).unwrap();
    a.place(2, 2, 0, Orientation::Horizontal).unwrap();
    a.place(3, 3, 0, Orientation::Horizontal).unwrap();
    a.place(4, 4, 0, Orientation::Horizontal).unwrap();

    let mut b = Board::new();
    b.place(0, 0, 5, Orientation::Horizontal).unwrap();
    b.place(1, 1, 5, Orientation::Horizontal).unwrap();
    b.place(2, 2, 5, Orientation::Horizontal).unwrap();
    b.place(3, 3, 5, Orientation::Horizontal).unwrap();
    b.place(4, 4, 5, Orientation::Horizontal).unwrap();

    // identical misses on cells empty in both layouts
    for &(r, c) in &[(8, 1), (8, 5), (9, 3), (7, 7)] {
        assert!(!a.attack(r, c).unwrap().hit);
        assert!(!b.attack(r, c).unwrap().hit);
    }
    assert_eq!(a.target_view(), b.target_view());

    for strategy in [
        Strategy::Random,
        Strategy::HuntTarget,
        Strategy::ProbabilityDensity,
    ] {
        for seed in 0..10u64 {
            let mut mem_a = AiMemory::new();
            let mut mem_b = AiMemory::new();
            let mut rng_a = SmallRng::seed_from_u64(seed);
            let mut rng_b = SmallRng::seed_from_u64(seed);
            let pick_a = select_target(
                strategy,
                &a.target_view(),
                &a.remaining_lengths(),
                &mut mem_a,
                &mut rng_a,
            );
            let pick_b = select_target(
                strategy,
                &b.target_view(),
                &b.remaining_lengths(),
                &mut mem_b,
                &mut rng_b,
            );
            assert_eq!(pick_a, pick_b, "{:?} diverged on hidden placement", strategy);
        }
    }
}

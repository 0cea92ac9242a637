//! Headless seeded game: human moves are auto-played with the Random
//! strategy, the computer with the requested one. Prints a single JSON
//! summary line, handy for benchmarking strategies against each other.

use broadside::{
    select_target, AiMemory, ComputerMove, Game, GamePhase, NoDelay, Session, Strategy, TurnOwner,
    BOARD_SIZE,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

fn parse_strategy(arg: &str) -> Option<Strategy> {
    match arg {
        "random" => Some(Strategy::Random),
        "hunt" => Some(Strategy::HuntTarget),
        "density" => Some(Strategy::ProbabilityDensity),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed> <random|hunt|density>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let strategy =
        parse_strategy(&args[2]).ok_or_else(|| anyhow::anyhow!("unknown strategy {}", args[2]))?;

    let rng = SmallRng::seed_from_u64(seed);
    let mut driver_rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    let mut session = Session::new(Game::new(strategy, rng), Box::new(NoDelay));
    session.place_all_random().map_err(|e| anyhow::anyhow!(e))?;
    session.start_battle().map_err(|e| anyhow::anyhow!(e))?;

    let mut memory = AiMemory::new();
    let mut computer_shots = 0u32;
    let winner = loop {
        if let GamePhase::GameOver { winner } = session.game().phase() {
            break winner;
        }
        let view = session.game().tracking_view();
        let remaining = session.game().computer_board().remaining_lengths();
        let (row, col) = select_target(
            Strategy::Random,
            &view,
            &remaining,
            &mut memory,
            &mut driver_rng,
        )
        .ok_or_else(|| anyhow::anyhow!("no legal target left"))?;
        let (_, reply) = session
            .attack(row, col)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        if matches!(reply, ComputerMove::Played(_)) {
            computer_shots += 1;
        }
        // pigeonhole: a finite board with no repeated legal targets
        if session.game().shot_count() > (BOARD_SIZE * BOARD_SIZE) as u32 {
            anyhow::bail!("game failed to terminate");
        }
    };

    let result = json!({
        "seed": seed,
        "strategy": session.game().strategy().name(),
        "winner": match winner {
            TurnOwner::Human => "driver",
            TurnOwner::Computer => "ai",
        },
        "driver_shots": session.game().shot_count(),
        "ai_shots": computer_shots,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

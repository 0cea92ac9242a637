#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    init_logging,
    ui::{coord_to_string, parse_coord, render_own_board, render_tracking_board},
    ComputerMove, DelayClock, Game, GameError, GamePhase, Leaderboard, NoDelay, Orientation,
    Session, Strategy, TurnClock, TurnOwner, NUM_SHIPS, SHIP_SPECS,
};

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};
#[cfg(feature = "std")]
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(ValueEnum, Clone, Debug)]
#[cfg(feature = "std")]
enum StrategyArg {
    Random,
    Hunt,
    Density,
}

#[cfg(feature = "std")]
impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Random => Strategy::Random,
            StrategyArg::Hunt => Strategy::HuntTarget,
            StrategyArg::Density => Strategy::ProbabilityDensity,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "Grid-combat game against an AI opponent")]
#[cfg(feature = "std")]
struct Cli {
    /// AI targeting strategy for this game.
    #[arg(long, value_enum, default_value_t = StrategyArg::Hunt)]
    strategy: StrategyArg,
    /// Fix the RNG seed for a reproducible game (e.g., --seed 12345).
    #[arg(long)]
    seed: Option<u64>,
    /// Computer "thinking time" between turns, in milliseconds.
    #[arg(long, default_value_t = 600)]
    delay_ms: u64,
}

#[cfg(feature = "std")]
fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(feature = "std")]
fn run_placement(session: &mut Session) -> anyhow::Result<()> {
    loop {
        let placed = match session.game().phase() {
            GamePhase::Placement { next_ship } => next_ship,
            _ => return Ok(()),
        };
        if placed == NUM_SHIPS {
            return Ok(());
        }
        println!("\n{}", render_own_board(session.game().human_board()));
        let spec = SHIP_SPECS[placed];
        let input = read_line(&format!(
            "Place {} (length {}) as e.g. 'B4 H', or 'r' for random fleet: ",
            spec.name(),
            spec.length()
        ))?;
        if input.eq_ignore_ascii_case("r") {
            session.place_all_random().map_err(|e| anyhow::anyhow!(e))?;
            continue;
        }
        if input.eq_ignore_ascii_case("reset") {
            session.reset_placement().map_err(|e| anyhow::anyhow!(e))?;
            continue;
        }
        let mut parts = input.split_whitespace();
        let coord = match parts.next().map(parse_coord) {
            Some(Ok(coord)) => coord,
            Some(Err(msg)) => {
                println!("{}", msg);
                continue;
            }
            None => continue,
        };
        let orientation = match parts.next().map(str::to_ascii_uppercase).as_deref() {
            Some("H") => Orientation::Horizontal,
            Some("V") => Orientation::Vertical,
            _ => {
                println!("Orientation must be H or V");
                continue;
            }
        };
        if let Err(e) = session.place_ship(coord.0, coord.1, orientation) {
            println!("Cannot place there: {}", e);
        }
    }
}

#[cfg(feature = "std")]
async fn run_battle(session: &mut Session, leaderboard: &mut Leaderboard) -> anyhow::Result<()> {
    loop {
        match session.game().phase() {
            GamePhase::GameOver { winner } => {
                println!("\nFinal board:");
                println!("{}", render_own_board(session.game().human_board()));
                match winner {
                    TurnOwner::Human => {
                        println!(
                            "You win! {} shots against {}.",
                            session.game().shot_count(),
                            session.game().strategy().name()
                        );
                        let now = SystemTime::now()
                            .duration_since(UNIX_EPOCH)
                            .map(|d| d.as_secs())
                            .unwrap_or(0);
                        if let Some(record) = session.game().victory_record(now) {
                            leaderboard.append(record);
                        }
                        if !leaderboard.is_empty() {
                            println!("\nBest games this run:");
                            for (i, rec) in leaderboard.display().iter().enumerate() {
                                println!("{:2}. {} shots vs {}", i + 1, rec.shots, rec.opponent);
                            }
                        }
                    }
                    TurnOwner::Computer => println!("The computer wins."),
                }
                return Ok(());
            }
            GamePhase::Battle { .. } => {}
            GamePhase::Placement { .. } => return Ok(()),
        }

        println!("\nYour fleet:");
        println!("{}", render_own_board(session.game().human_board()));
        println!("Tracking grid:");
        println!("{}", render_tracking_board(&session.game().tracking_view()));

        let input = read_line("Fire at (e.g., B4), or 'quit': ")?;
        if input.eq_ignore_ascii_case("quit") {
            return Ok(());
        }
        let (row, col) = match parse_coord(&input) {
            Ok(coord) => coord,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };

        match session.attack(row, col).await {
            Ok((shot, reply)) => {
                if let Some(ship) = &shot.outcome.sunk {
                    println!("You sank the {}!", ship.name());
                } else if shot.outcome.hit {
                    println!("Hit!");
                } else {
                    println!("Miss.");
                }
                match reply {
                    ComputerMove::Played(cs) => {
                        let coord = coord_to_string(cs.coord.0, cs.coord.1);
                        if let Some(ship) = &cs.outcome.sunk {
                            println!("Computer fires {} and sinks your {}!", coord, ship.name());
                        } else if cs.outcome.hit {
                            println!("Computer fires {} - hit.", coord);
                        } else {
                            println!("Computer fires {} - miss.", coord);
                        }
                    }
                    ComputerMove::Cancelled | ComputerMove::NotNeeded => {}
                }
            }
            Err(GameError::CellAlreadyAttacked) => println!("Already fired there."),
            Err(e) => println!("Rejected: {}", e),
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let rng = match cli.seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    };

    let strategy: Strategy = cli.strategy.into();
    println!("Opponent strategy: {}", strategy.name());

    let clock: Box<dyn TurnClock> = if cli.delay_ms == 0 {
        Box::new(NoDelay)
    } else {
        Box::new(DelayClock(Duration::from_millis(cli.delay_ms)))
    };

    let mut session = Session::new(Game::new(strategy, rng), clock);
    let mut leaderboard = Leaderboard::new();

    run_placement(&mut session)?;
    session.start_battle().map_err(|e| anyhow::anyhow!(e))?;
    run_battle(&mut session, &mut leaderboard).await?;
    Ok(())
}

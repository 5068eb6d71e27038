use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use capitaly::console;
use capitaly::game::{kernel::{Game, Session}, messages::GameError};
use capitaly::input::Scenario;

mod cli;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            eprintln!("Error: {why}");
            ExitCode::FAILURE
        },
    }
}

/// Logs to stderr. `RUST_LOG` wins over the verbosity flag.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: cli::Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.game_config()?;
    let scenario = Scenario::load(&cli.input)?;
    tracing::info!(
        tiles = scenario.tiles.len(),
        players = scenario.players.len(),
        ?config,
        "scenario loaded"
    );

    let session: Session = Game::start(scenario.tiles, scenario.players, config)?.into();

    let simulated = scenario.rolls.is_some();
    let session = match scenario.rolls {
        Some(rolls) => simulate(session, rolls)?,
        None => {
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let stdin = io::stdin();
            console::primitive::run(
                session,
                stdin.lock(),
                &mut io::stdout(),
                &mut rng,
                !cli.json && console::stdout_is_tty(),
            )?
        },
    };

    // The interactive loop already printed each turn as it happened.
    report(&session, cli.json, simulated)?;
    Ok(())
}

/// Plays every roll from the scenario, stopping early if the game ends.
fn simulate(session: Session, rolls: Vec<u32>) -> Result<Session, GameError> {
    tracing::info!(rolls = rolls.len(), "simulating");

    let game = match session {
        Session::Running(game) => game,
        finished @ Session::Finished(_) => return Ok(finished),
    };

    match game.speed_play(rolls) {
        Ok(update) => Ok(update.into()),
        Err((_, invalid)) => Err(invalid),
    }
}

fn report(session: &Session, json: bool, with_turns: bool) -> io::Result<()> {
    let mut out = io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &session.report())?;
        writeln!(out)?;
        return Ok(());
    }

    if with_turns {
        for turn in session.history() {
            writeln!(out, "{turn}")?;
        }
        if let Session::Finished(game) = session {
            writeln!(out, "{} won the game!", game.winner().name())?;
        }
    }
    writeln!(out, "Standings:")?;
    console::render_standings(&mut out, &session.get_standings(), console::stdout_is_tty())
}

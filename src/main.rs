//! Tilejump headless runner
//!
//! Usage: `tilejump [levels.json] [settings.json]`
//!
//! Plays every level in order without input and logs the outcome. Without a
//! levels file the bundled demo levels are used. Set `RUST_LOG=debug` for
//! per-level detail.

use std::process::ExitCode;

use tilejump::Settings;
use tilejump::plans::{demo_plans, read_plans};
use tilejump::sim::{LevelParser, Status, run_game};

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let plans_path = args.next();
    let settings = args.next().map(Settings::load).unwrap_or_default();

    let plans = match plans_path {
        Some(path) => match read_plans(&path) {
            Ok(plans) => plans,
            Err(err) => {
                log::error!("{path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("No levels file given, playing demo levels");
            demo_plans()
        }
    };

    let parser = LevelParser::with_default_actors().with_seed(settings.seed);
    let outcome = run_game(&parser, &plans, &settings);

    match outcome.status {
        Status::Won => log::info!("All {} levels won", outcome.levels_won),
        Status::Lost => log::info!(
            "Game lost after {} of {} levels",
            outcome.levels_won,
            plans.len()
        ),
    }
    println!(
        "{} ({}/{} levels)",
        if outcome.status == Status::Won { "won" } else { "lost" },
        outcome.levels_won,
        plans.len()
    );

    ExitCode::SUCCESS
}

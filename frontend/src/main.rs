use std::io;

use clap::Parser;
use gridsearch::{util::load_map, Board, Observer, SearchOutcome, StepLimit};
use log::{info, warn};

use crate::cli::Cli;
use crate::render::{describe, FrameCounter, TextRenderer};
use crate::settings::Settings;

mod cli;
mod render;
mod settings;

/// Run the configured search, cancelling it after `max_steps` expansions.
/// Hands the observer back once the search is over.
fn search<O: Observer>(board: &mut Board, settings: &Settings, mut observer: O) -> (SearchOutcome, O) {
    let params = settings.params();

    match settings.max_steps {
        Some(max_steps) => {
            let mut limited = StepLimit::new(observer, max_steps);
            let outcome = board.run(settings.algorithm, &params, &mut limited);
            (outcome, limited.into_inner())
        }
        None => {
            let outcome = board.run(settings.algorithm, &params, &mut observer);
            (outcome, observer)
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    cli.apply(&mut settings);

    let grid = load_map(&cli.map)?;
    info!(
        "loaded {}x{} map from {}",
        grid.rows(),
        grid.columns(),
        cli.map.display()
    );

    // a map saved after a search still carries its marks
    let mut board = Board::from_grid(grid);
    board.clear_search();
    if let Some(start) = settings.start {
        board.set_start(start);
    }
    if let Some(goal) = settings.goal {
        board.set_goal(goal);
    }
    if board.start().is_none() || board.goal().is_none() {
        warn!("the map needs a start and a goal, use --start and --goal to place them");
    }

    let outcome = if settings.animate {
        let mut renderer = TextRenderer::new(io::stdout().lock(), settings.frame_delay());
        if !settings.clear_screen {
            renderer = renderer.without_clearing();
        }
        let (outcome, renderer) = search(&mut board, &settings, renderer);
        info!("{} frames", renderer.frames());
        renderer.finish()?;
        outcome
    } else {
        let (outcome, counter) = search(&mut board, &settings, FrameCounter::default());
        info!("{} frames", counter.frames);
        outcome
    };

    println!("{}", board.grid());
    println!("{}", describe(settings.algorithm, &outcome));

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use gridsearch::{parse_depth_limit, Algorithm, HeuristicKind, Point};
use log::warn;

use crate::settings::{parse_point, Settings};

#[derive(Parser, Debug)]
#[command(name = "gridsearch")]
#[command(about = "Search a path on a grid map and watch the search unfold")]
#[command(version)]
pub struct Cli {
    /// Map to search: a text map (.txt, .map) or an image where dark pixels are barriers
    pub map: PathBuf,

    /// Settings file (JSON), command line flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// BFS, DFS, UCS, Greedy, A*, DLS, IDDFS or IDA*
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Manhattan or Euclidean, used by A*, Greedy and IDA*
    #[arg(long)]
    pub heuristic: Option<HeuristicKind>,

    /// Depth limit for DLS and IDDFS, anything but a number counts as 0
    #[arg(short, long)]
    pub depth_limit: Option<String>,

    /// Start point as row,col
    #[arg(long, value_parser = parse_point)]
    pub start: Option<Point>,

    /// Goal point as row,col
    #[arg(long, value_parser = parse_point)]
    pub goal: Option<Point>,

    /// Print the grid after every step of the search
    #[arg(long)]
    pub animate: bool,

    /// Pause between two animation frames
    #[arg(long)]
    pub frame_delay_ms: Option<u64>,

    /// Print animation frames one after the other instead of redrawing
    #[arg(long)]
    pub no_clear: bool,

    /// Cancel the search after this many expansions
    #[arg(long)]
    pub max_steps: Option<usize>,
}

impl Cli {
    /// Overwrite everything in `settings` that was given on the command line
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(algorithm) = self.algorithm {
            settings.algorithm = algorithm;
        }
        if let Some(heuristic) = self.heuristic {
            settings.heuristic = heuristic;
            if !settings.algorithm.uses_heuristic() {
                warn!("{} does not use a heuristic, ignoring it", settings.algorithm);
            }
        }
        if let Some(depth_limit) = &self.depth_limit {
            settings.depth_limit = parse_depth_limit(depth_limit);
            if !settings.algorithm.uses_depth_limit() {
                warn!("{} does not use a depth limit, ignoring it", settings.algorithm);
            }
        }
        if self.start.is_some() {
            settings.start = self.start;
        }
        if self.goal.is_some() {
            settings.goal = self.goal;
        }
        if self.animate {
            settings.animate = true;
        }
        if let Some(delay) = self.frame_delay_ms {
            settings.frame_delay_ms = delay;
        }
        if self.no_clear {
            settings.clear_screen = false;
        }
        if self.max_steps.is_some() {
            settings.max_steps = self.max_steps;
        }
    }
}

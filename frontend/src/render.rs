use std::{
    io::{self, Write},
    thread,
    time::Duration,
};

use gridsearch::{Algorithm, Grid, Observer, SearchOutcome};

/// Moves the cursor home and clears the terminal
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Prints every grid it is shown, waiting `delay` after each one.
///
/// Writing can fail halfway through a search (a closed pipe, for example).
/// The first error is kept and asks the search to stop.
pub struct TextRenderer<W: Write> {
    out: W,
    delay: Duration,
    clear: bool,
    frames: usize,
    error: Option<io::Error>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, delay: Duration) -> Self {
        Self {
            out,
            delay,
            clear: true,
            frames: 0,
            error: None,
        }
    }

    /// Print frames one after the other instead of redrawing in place
    pub fn without_clearing(mut self) -> Self {
        self.clear = false;
        self
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn finish(self) -> Result<W, io::Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn draw(&mut self, grid: &Grid) -> Result<(), io::Error> {
        if self.clear {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        write!(self.out, "{}", grid)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Observer for TextRenderer<W> {
    fn observe(&mut self, grid: &Grid) {
        self.frames += 1;
        if self.error.is_some() {
            return;
        }

        if let Err(e) = self.draw(grid) {
            self.error = Some(e);
            return;
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    fn should_stop(&mut self) -> bool {
        self.error.is_some()
    }
}

/// Counts frames without showing them
#[derive(Debug, Default)]
pub struct FrameCounter {
    pub frames: usize,
}

impl Observer for FrameCounter {
    fn observe(&mut self, _grid: &Grid) {
        self.frames += 1;
    }
}

/// One line summary of how a search ended
pub fn describe(algorithm: Algorithm, outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::PathFound(result) => format!(
            "{}: path from {} to {} with cost {}",
            algorithm, result.start, result.goal, result.total_cost
        ),
        SearchOutcome::NoPathFound => format!("{}: no path found", algorithm),
        SearchOutcome::Cancelled => format!("{}: cancelled", algorithm),
    }
}

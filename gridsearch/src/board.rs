use crate::algorithm::{Algorithm, SearchParams};
use crate::find::SearchOutcome;
use crate::grid::{CellKind, Grid, Point};
use crate::observe::Observer;

/// A grid together with the endpoints a user has placed on it.
///
/// The grid itself does not know which cells are the start and the end, the
/// board keeps both references in sync with the cell kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    start: Option<Point>,
    goal: Option<Point>,
}

impl Board {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::from_grid(Grid::new(rows, columns))
    }

    /// Take over a grid, picking up the start and end cells already on it
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            start: grid.find(CellKind::Start),
            goal: grid.find(CellKind::End),
            grid,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    /// Place something on a cell: the start if there is none yet, then the
    /// goal, and barriers after that. The endpoints are never overwritten.
    pub fn place(&mut self, point: Point) {
        if !self.grid.is_valid(point) {
            return;
        }

        let is_start = self.start == Some(point);
        let is_goal = self.goal == Some(point);

        if self.start.is_none() && !is_goal {
            self.start = Some(point);
            self.grid.make_start(point);
        } else if self.goal.is_none() && !is_start {
            self.goal = Some(point);
            self.grid.make_end(point);
        } else if !is_start && !is_goal {
            self.grid.make_barrier(point);
        }
    }

    /// Move the start to `point`, whatever was there before
    pub fn set_start(&mut self, point: Point) {
        if !self.grid.is_valid(point) {
            return;
        }

        if let Some(old) = self.start.replace(point) {
            self.grid.reset_cell(old);
        }
        if self.goal == Some(point) {
            self.goal = None;
        }
        self.grid.make_start(point);
    }

    /// Move the goal to `point`, whatever was there before
    pub fn set_goal(&mut self, point: Point) {
        if !self.grid.is_valid(point) {
            return;
        }

        if let Some(old) = self.goal.replace(point) {
            self.grid.reset_cell(old);
        }
        if self.start == Some(point) {
            self.start = None;
        }
        self.grid.make_end(point);
    }

    /// Turn a cell back into an empty one, forgetting it as start or goal
    pub fn erase(&mut self, point: Point) {
        if !self.grid.is_valid(point) {
            return;
        }

        self.grid.reset_cell(point);
        if self.start == Some(point) {
            self.start = None;
        } else if self.goal == Some(point) {
            self.goal = None;
        }
    }

    /// Empty the whole board
    pub fn clear(&mut self) {
        self.grid.reset();
        self.start = None;
        self.goal = None;
    }

    /// Remove what a previous search left behind
    pub fn clear_search(&mut self) {
        self.grid.clear_search();
    }

    pub fn run<O: Observer>(
        &mut self,
        algorithm: Algorithm,
        params: &SearchParams,
        observer: &mut O,
    ) -> SearchOutcome {
        algorithm.run(&mut self.grid, observer, self.start, self.goal, params)
    }
}

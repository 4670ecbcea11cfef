//! Search algorithms on a uniform grid that leave their progress on the grid
//! for an observer to look at.
//!
//! Every algorithm marks the cells it discovers as [`CellKind::Open`], the
//! cells it has finished with as [`CellKind::Closed`] and, when it reaches the
//! goal, the cells in between as [`CellKind::Path`]. An [`Observer`] is called
//! whenever something visible changed. The path itself is returned as a
//! [`SearchOutcome`], so the marks are only needed for display.
//!
//! ```
//! use gridsearch::{bfs, Grid, NoObserver, Point};
//!
//! let mut grid: Grid = "S.#\n..#\n..E".parse().unwrap();
//! let outcome = bfs(&mut grid, &mut NoObserver, Point::new(0, 0), Point::new(2, 2));
//!
//! assert_eq!(outcome.result().unwrap().total_cost, 4);
//! ```

pub mod algorithm;
pub mod board;
pub mod deepening;
pub mod find;
pub mod grid;
pub mod heuristic;
pub mod informed;
pub mod observe;
pub mod uninformed;
pub mod util;

pub use algorithm::{parse_depth_limit, Algorithm, SearchParams};
pub use board::Board;
pub use deepening::{dls, ida_star, iddfs};
pub use find::{PathResult, SearchOutcome};
pub use grid::{CellKind, Grid, Point};
pub use heuristic::{euclidean, manhattan, HeuristicKind};
pub use informed::{astar, greedy, ucs};
pub use observe::{NoObserver, Observer, StepLimit};
pub use uninformed::{bfs, dfs};

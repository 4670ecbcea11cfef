use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::deepening::{dls, ida_star, iddfs};
use crate::find::SearchOutcome;
use crate::grid::{Grid, Point};
use crate::heuristic::HeuristicKind;
use crate::informed::{astar, greedy, ucs};
use crate::observe::Observer;
use crate::uninformed::{bfs, dfs};

/// All search strategies, in the order they are usually offered to a user
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")] // stored by display name
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    AStar,
    Dls,
    Ucs,
    Greedy,
    Iddfs,
    IdaStar,
}

/// Extra inputs some of the algorithms need
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Used by A*, greedy search and IDA*
    pub heuristic: HeuristicKind,
    /// Used by DLS (the limit) and IDDFS (the largest limit tried)
    pub depth_limit: usize,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::AStar,
        Algorithm::Dls,
        Algorithm::Ucs,
        Algorithm::Greedy,
        Algorithm::Iddfs,
        Algorithm::IdaStar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::AStar => "A*",
            Algorithm::Dls => "DLS",
            Algorithm::Ucs => "UCS",
            Algorithm::Greedy => "Greedy",
            Algorithm::Iddfs => "IDDFS",
            Algorithm::IdaStar => "IDA*",
        }
    }

    pub fn uses_heuristic(self) -> bool {
        matches!(
            self,
            Algorithm::AStar | Algorithm::Greedy | Algorithm::IdaStar
        )
    }

    pub fn uses_depth_limit(self) -> bool {
        matches!(self, Algorithm::Dls | Algorithm::Iddfs)
    }

    /// Run the algorithm on `grid`. A missing start or goal simply means
    /// there is no path.
    pub fn run<O: Observer>(
        self,
        grid: &mut Grid,
        observer: &mut O,
        start: Option<Point>,
        goal: Option<Point>,
        params: &SearchParams,
    ) -> SearchOutcome {
        let (Some(start), Some(goal)) = (start, goal) else {
            return SearchOutcome::NoPathFound;
        };
        let heuristic = params.heuristic.function();

        match self {
            Algorithm::Bfs => bfs(grid, observer, start, goal),
            Algorithm::Dfs => dfs(grid, observer, start, goal),
            Algorithm::AStar => astar(grid, observer, start, goal, heuristic),
            Algorithm::Dls => dls(grid, observer, start, goal, params.depth_limit),
            Algorithm::Ucs => ucs(grid, observer, start, goal),
            Algorithm::Greedy => greedy(grid, observer, start, goal, heuristic),
            Algorithm::Iddfs => iddfs(grid, observer, start, goal, params.depth_limit),
            Algorithm::IdaStar => ida_star(grid, observer, start, goal, heuristic),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.name().to_owned()
    }
}

impl TryFrom<String> for Algorithm {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "a*" | "astar" => Ok(Algorithm::AStar),
            "dls" => Ok(Algorithm::Dls),
            "ucs" => Ok(Algorithm::Ucs),
            "greedy" => Ok(Algorithm::Greedy),
            "iddfs" => Ok(Algorithm::Iddfs),
            "ida*" | "idastar" | "ida" => Ok(Algorithm::IdaStar),
            _ => Err(anyhow::anyhow!("Invalid algorithm: {}", s)),
        }
    }
}

/// Read a depth limit typed by a user. Anything that is not a plain
/// non-negative number counts as 0.
pub fn parse_depth_limit(input: &str) -> usize {
    input.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::grid::CellKind;
    use crate::observe::NoObserver;

    #[test]
    fn test_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert_eq!("astar".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("Ida".parse::<Algorithm>().unwrap(), Algorithm::IdaStar);
        assert!("dijkstra".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_parameters_in_use() {
        let with_heuristic: Vec<_> = Algorithm::ALL
            .into_iter()
            .filter(|a| a.uses_heuristic())
            .collect();
        let with_depth: Vec<_> = Algorithm::ALL
            .into_iter()
            .filter(|a| a.uses_depth_limit())
            .collect();

        assert_eq!(
            with_heuristic,
            vec![Algorithm::AStar, Algorithm::Greedy, Algorithm::IdaStar]
        );
        assert_eq!(with_depth, vec![Algorithm::Dls, Algorithm::Iddfs]);
    }

    #[test]
    fn test_missing_endpoints() {
        let params = SearchParams::default();

        for algorithm in Algorithm::ALL {
            let mut grid = Grid::new(3, 3);
            assert_eq!(
                algorithm.run(&mut grid, &mut NoObserver, None, Some(Point::new(2, 2)), &params),
                SearchOutcome::NoPathFound
            );
            assert_eq!(
                algorithm.run(&mut grid, &mut NoObserver, Some(Point::new(0, 0)), None, &params),
                SearchOutcome::NoPathFound
            );
            assert_eq!(grid, Grid::new(3, 3));
        }
    }

    #[test]
    fn test_run_dispatches_with_params() {
        let start = Some(Point::new(0, 0));
        let goal = Some(Point::new(0, 4));
        let params = SearchParams {
            heuristic: HeuristicKind::Euclidean,
            depth_limit: 4,
        };

        for algorithm in Algorithm::ALL {
            let mut grid: Grid = "S...E".parse().unwrap();
            let outcome = algorithm.run(&mut grid, &mut NoObserver, start, goal, &params);

            assert_eq!(outcome.result().map(|r| r.total_cost), Some(4), "{}", algorithm);
            assert_eq!(grid.count(CellKind::Path), 3);
        }

        let mut grid: Grid = "S...E".parse().unwrap();
        let short = SearchParams {
            depth_limit: 3,
            ..params
        };
        assert!(!bool::from(Algorithm::Dls.run(&mut grid, &mut NoObserver, start, goal, &short)));
    }

    #[test]
    fn test_parse_depth_limit() {
        assert_eq!(parse_depth_limit("12"), 12);
        assert_eq!(parse_depth_limit(" 7 "), 7);
        assert_eq!(parse_depth_limit(""), 0);
        assert_eq!(parse_depth_limit("-3"), 0);
        assert_eq!(parse_depth_limit("ten"), 0);
    }

    #[test]
    fn test_serde_uses_display_names() {
        assert_eq!(serde_json::to_string(&Algorithm::IdaStar).unwrap(), r#""IDA*""#);
        assert_eq!(serde_json::from_str::<Algorithm>(r#""A*""#).unwrap(), Algorithm::AStar);
        assert_eq!(serde_json::from_str::<Algorithm>(r#""astar""#).unwrap(), Algorithm::AStar);
        assert!(serde_json::from_str::<Algorithm>(r#""dijkstra""#).is_err());

        for algorithm in Algorithm::ALL {
            let json = serde_json::to_string(&algorithm).unwrap();
            assert_eq!(serde_json::from_str::<Algorithm>(&json).unwrap(), algorithm);
        }
    }

    #[test]
    fn test_params_from_partial_json() {
        let params: SearchParams = serde_json::from_str(r#"{ "depth_limit": 9 }"#).unwrap();

        assert_eq!(params.depth_limit, 9);
        assert_eq!(params.heuristic, HeuristicKind::Manhattan);

        let params: SearchParams = serde_json::from_str(r#"{ "heuristic": "euclidean" }"#).unwrap();
        assert_eq!(params.heuristic, HeuristicKind::Euclidean);
        assert!(serde_json::from_str::<SearchParams>(r#"{ "heuristic": "chebyshev" }"#).is_err());
    }
}

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::grid::Point;

/// Manhattan (L1) distance between two points.
pub fn manhattan(a: Point, b: Point) -> f64 {
    (a.row.abs_diff(b.row) + a.col.abs_diff(b.col)) as f64
}

/// Euclidean (L2) distance between two points.
///
/// Never larger than [`manhattan`], so it is admissible on a 4-connected grid too.
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dr = a.row.abs_diff(b.row) as f64;
    let dc = a.col.abs_diff(b.col) as f64;
    dr.hypot(dc)
}

/// The heuristics that can be selected by name
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HeuristicKind {
    #[default]
    Manhattan,
    Euclidean,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 2] = [HeuristicKind::Manhattan, HeuristicKind::Euclidean];

    pub fn function(self) -> fn(Point, Point) -> f64 {
        match self {
            HeuristicKind::Manhattan => manhattan,
            HeuristicKind::Euclidean => euclidean,
        }
    }
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HeuristicKind::Manhattan => "Manhattan",
                HeuristicKind::Euclidean => "Euclidean",
            }
        )
    }
}

impl From<HeuristicKind> for String {
    fn from(kind: HeuristicKind) -> Self {
        kind.to_string()
    }
}

impl TryFrom<String> for HeuristicKind {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for HeuristicKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" => Ok(HeuristicKind::Manhattan),
            "euclidean" | "euclidian" => Ok(HeuristicKind::Euclidean),
            _ => Err(anyhow::anyhow!("Invalid heuristic: {}", s)),
        }
    }
}

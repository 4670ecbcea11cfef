use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap},
};

use log::{debug, warn};

use crate::grid::{Grid, Point};
use crate::observe::Observer;

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct PathResult {
    /// Every point of the path, including `start` and `goal`
    pub path: Vec<Point>,
    pub start: Point,
    pub goal: Point,
    /// Number of steps along the path
    pub total_cost: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    NoPathFound,
    /// The observer asked the search to stop before it was done
    Cancelled,
    PathFound(PathResult),
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::PathFound(_))
    }

    pub fn result(&self) -> Option<&PathResult> {
        match self {
            SearchOutcome::PathFound(result) => Some(result),
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&[Point]> {
        self.result().map(|r| r.path.as_slice())
    }
}

impl From<SearchOutcome> for bool {
    fn from(outcome: SearchOutcome) -> Self {
        outcome.is_found()
    }
}

/// The objects that we store in the priority queue
#[derive(Debug)]
struct ToVisit {
    priority: f64,
    count: usize,
    point: Point,
}

impl Ord for ToVisit {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse for BinaryHeap to be a min-heap, earlier insertions win ties
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.count.cmp(&other.count))
            .reverse()
    }
}

impl PartialOrd for ToVisit {
    fn partial_cmp(&self, other: &ToVisit) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ToVisit {
    fn eq(&self, other: &ToVisit) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ToVisit {}

/// Min-priority queue of points. Entries with equal priority come out in the
/// order they were pushed.
#[derive(Debug, Default)]
pub(crate) struct PriorityFrontier {
    visit_list: BinaryHeap<ToVisit>,
    count: usize,
}

impl PriorityFrontier {
    pub(crate) fn push(&mut self, priority: f64, point: Point) {
        self.visit_list.push(ToVisit {
            priority,
            count: self.count,
            point,
        });
        self.count += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<(f64, Point)> {
        self.visit_list.pop().map(|v| (v.priority, v.point))
    }
}

/// Walk the predecessor map back from `goal` and return the path from
/// `start` to `goal`
pub(crate) fn backtrack(came_from: &HashMap<Point, Point>, start: Point, goal: Point) -> Vec<Point> {
    let mut path = vec![goal];
    let mut current = goal;

    while current != start {
        current = match came_from.get(&current) {
            Some(from) => *from,
            None => panic!("Backtracking lead to a Point that was never visited"),
        };
        path.push(current);
    }

    path.reverse();
    path
}

/// The order in which the cells of a found path are marked
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Trace {
    FromGoal,
    FromStart,
}

/// State shared by every search while it runs: the grid it marks, the
/// observer it reports to and the two endpoints.
pub(crate) struct Search<'a, O: Observer> {
    name: &'static str,
    grid: &'a mut Grid,
    observer: &'a mut O,
    start: Point,
    goal: Point,
    expansions: usize,
}

impl<'a, O: Observer> Search<'a, O> {
    /// Returns `None` when one of the endpoints lies outside the grid
    pub(crate) fn new(
        name: &'static str,
        grid: &'a mut Grid,
        observer: &'a mut O,
        start: Point,
        goal: Point,
    ) -> Option<Self> {
        if !grid.is_valid(start) || !grid.is_valid(goal) {
            debug!("{}: endpoint outside of the grid, {} -> {}", name, start, goal);
            return None;
        }

        debug!("{}: searching {} -> {}", name, start, goal);
        Some(Self {
            name,
            grid,
            observer,
            start,
            goal,
            expansions: 0,
        })
    }

    pub(crate) fn start(&self) -> Point {
        self.start
    }

    pub(crate) fn goal(&self) -> Point {
        self.goal
    }

    pub(crate) fn is_endpoint(&self, point: Point) -> bool {
        point == self.start || point == self.goal
    }

    pub(crate) fn neighbors_of(&self, point: Point) -> Vec<Point> {
        self.grid.neighbors_of(point)
    }

    /// Mark a point as discovered, the start keeps its kind
    pub(crate) fn open(&mut self, point: Point) {
        if point != self.start {
            self.grid.make_open(point);
        }
    }

    /// Mark a point as done, the start keeps its kind
    pub(crate) fn close(&mut self, point: Point) {
        if point != self.start {
            self.grid.make_closed(point);
        }
    }

    pub(crate) fn draw(&mut self) {
        self.observer.observe(&*self.grid);
    }

    /// Count an expansion and ask the observer whether to keep going
    pub(crate) fn should_stop(&mut self) -> bool {
        self.expansions += 1;
        self.observer.should_stop()
    }

    /// Mark the cells between the endpoints as path, drawing after each one,
    /// and restore the kinds of the endpoints
    pub(crate) fn path_found(self, path: Vec<Point>, trace: Trace) -> SearchOutcome {
        let Search {
            name,
            grid,
            observer,
            start,
            goal,
            expansions,
        } = self;

        let mut inner: Vec<Point> = path
            .iter()
            .copied()
            .filter(|p| *p != start && *p != goal)
            .collect();
        if trace == Trace::FromGoal {
            inner.reverse();
        }

        for point in inner {
            grid.make_path(point);
            observer.observe(&*grid);
        }
        grid.make_end(goal);
        grid.make_start(start);

        let total_cost = path.len().saturating_sub(1);
        debug!(
            "{}: found path {} -> {} with cost {} after {} expansions",
            name, start, goal, total_cost, expansions
        );

        SearchOutcome::PathFound(PathResult {
            path,
            start,
            goal,
            total_cost,
        })
    }

    pub(crate) fn no_path(self) -> SearchOutcome {
        debug!(
            "{}: no path {} -> {} after {} expansions",
            self.name, self.start, self.goal, self.expansions
        );
        SearchOutcome::NoPathFound
    }

    /// Stop early. The goal may already be marked as discovered, so both
    /// endpoints get their kinds back.
    pub(crate) fn cancelled(self) -> SearchOutcome {
        self.grid.make_end(self.goal);
        self.grid.make_start(self.start);
        warn!(
            "{}: cancelled after {} expansions",
            self.name, self.expansions
        );
        SearchOutcome::Cancelled
    }
}

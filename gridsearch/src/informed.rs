use std::collections::{HashMap, HashSet};

use crate::find::{backtrack, PriorityFrontier, Search, SearchOutcome, Trace};
use crate::grid::{Grid, Point};
use crate::observe::Observer;

/// Every move between two neighbouring cells costs the same
const STEP_COST: usize = 1;

/// Uniform-cost search (Dijkstra on unit weights).
///
/// A cheaper route to a point pushes it onto the frontier again instead of
/// updating the old entry, outdated entries are skipped when they come up.
pub fn ucs<O: Observer>(
    grid: &mut Grid,
    observer: &mut O,
    start: Point,
    goal: Point,
) -> SearchOutcome {
    let Some(mut search) = Search::new("UCS", grid, observer, start, goal) else {
        return SearchOutcome::NoPathFound;
    };

    let mut frontier = PriorityFrontier::default();
    frontier.push(0.0, start);
    let mut cost_so_far: HashMap<Point, usize> = HashMap::from([(start, 0)]);
    let mut came_from = HashMap::new();

    while let Some((cost, current)) = frontier.pop() {
        let current_cost = match cost_so_far.get(&current) {
            Some(c) if (*c as f64) < cost => continue,
            Some(c) => *c,
            None => unreachable!("points are recorded before they are pushed"),
        };

        if search.should_stop() {
            return search.cancelled();
        }

        if current == goal {
            let path = backtrack(&came_from, start, goal);
            return search.path_found(path, Trace::FromGoal);
        }

        let new_cost = current_cost + STEP_COST;
        for neighbor in search.neighbors_of(current) {
            if cost_so_far.get(&neighbor).map_or(true, |c| new_cost < *c) {
                cost_so_far.insert(neighbor, new_cost);
                frontier.push(new_cost as f64, neighbor);
                came_from.insert(neighbor, current);
                search.open(neighbor);
            }
        }

        search.draw();
        search.close(current);
    }

    search.no_path()
}

/// Greedy best-first search, always expands the point that looks closest
/// to the goal. Fast, but the path is not necessarily the shortest.
pub fn greedy<O: Observer, H: Fn(Point, Point) -> f64>(
    grid: &mut Grid,
    observer: &mut O,
    start: Point,
    goal: Point,
    heuristic: H,
) -> SearchOutcome {
    let Some(mut search) = Search::new("Greedy", grid, observer, start, goal) else {
        return SearchOutcome::NoPathFound;
    };

    let mut frontier = PriorityFrontier::default();
    frontier.push(0.0, start);
    let mut visited = HashSet::from([start]);
    let mut came_from = HashMap::new();

    while let Some((_, current)) = frontier.pop() {
        if search.should_stop() {
            return search.cancelled();
        }

        if current == goal {
            let path = backtrack(&came_from, start, goal);
            return search.path_found(path, Trace::FromGoal);
        }

        for neighbor in search.neighbors_of(current) {
            if visited.insert(neighbor) {
                frontier.push(heuristic(neighbor, goal), neighbor);
                came_from.insert(neighbor, current);
                search.open(neighbor);
            }
        }

        search.draw();
        search.close(current);
    }

    search.no_path()
}

/// A* search. Returns a shortest path as long as `heuristic` never
/// overestimates the remaining distance.
///
/// A point that is already waiting in the frontier is not pushed a second
/// time when a cheaper route to it is found, only its scores are updated.
pub fn astar<O: Observer, H: Fn(Point, Point) -> f64>(
    grid: &mut Grid,
    observer: &mut O,
    start: Point,
    goal: Point,
    heuristic: H,
) -> SearchOutcome {
    let Some(mut search) = Search::new("A*", grid, observer, start, goal) else {
        return SearchOutcome::NoPathFound;
    };

    let mut g_score: HashMap<Point, f64> = HashMap::from([(start, 0.0)]);
    let mut f_score: HashMap<Point, f64> = HashMap::from([(start, heuristic(start, goal))]);
    let mut came_from = HashMap::new();

    let mut frontier = PriorityFrontier::default();
    frontier.push(f_score[&start], start);
    let mut open_set = HashSet::from([start]);

    while let Some((_, current)) = frontier.pop() {
        open_set.remove(&current);

        if search.should_stop() {
            return search.cancelled();
        }

        if current == goal {
            let path = backtrack(&came_from, start, goal);
            return search.path_found(path, Trace::FromGoal);
        }

        let tentative_g = g_score.get(&current).copied().unwrap_or(f64::INFINITY) + STEP_COST as f64;
        for neighbor in search.neighbors_of(current) {
            if tentative_g < g_score.get(&neighbor).copied().unwrap_or(f64::INFINITY) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);
                let f = tentative_g + heuristic(neighbor, goal);
                f_score.insert(neighbor, f);

                if open_set.insert(neighbor) {
                    frontier.push(f, neighbor);
                    search.open(neighbor);
                }
            }
        }

        search.draw();
        search.close(current);
    }

    search.no_path()
}

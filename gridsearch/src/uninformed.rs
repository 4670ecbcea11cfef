use std::collections::{HashMap, HashSet, VecDeque};

use crate::find::{backtrack, Search, SearchOutcome, Trace};
use crate::grid::{Grid, Point};
use crate::observe::Observer;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Order {
    /// Queue, the oldest discovered point is expanded first
    Fifo,
    /// Stack, the newest discovered point is expanded first
    Lifo,
}

/// Breadth-first search. Finds a shortest path on a grid with unit costs.
pub fn bfs<O: Observer>(
    grid: &mut Grid,
    observer: &mut O,
    start: Point,
    goal: Point,
) -> SearchOutcome {
    traverse("BFS", grid, observer, start, goal, Order::Fifo)
}

/// Depth-first search. Finds some path, usually not the shortest.
pub fn dfs<O: Observer>(
    grid: &mut Grid,
    observer: &mut O,
    start: Point,
    goal: Point,
) -> SearchOutcome {
    traverse("DFS", grid, observer, start, goal, Order::Lifo)
}

fn traverse<O: Observer>(
    name: &'static str,
    grid: &mut Grid,
    observer: &mut O,
    start: Point,
    goal: Point,
    order: Order,
) -> SearchOutcome {
    let Some(mut search) = Search::new(name, grid, observer, start, goal) else {
        return SearchOutcome::NoPathFound;
    };

    let mut frontier = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);
    let mut came_from = HashMap::new();

    loop {
        let next = match order {
            Order::Fifo => frontier.pop_front(),
            Order::Lifo => frontier.pop_back(),
        };
        let Some(current) = next else {
            return search.no_path();
        };

        if search.should_stop() {
            return search.cancelled();
        }

        if current == goal {
            let path = backtrack(&came_from, start, goal);
            return search.path_found(path, Trace::FromGoal);
        }

        for neighbor in search.neighbors_of(current) {
            if visited.insert(neighbor) {
                came_from.insert(neighbor, current);
                frontier.push_back(neighbor);
                search.open(neighbor);
            }
        }

        search.draw();
        search.close(current);
    }
}

use std::collections::HashSet;

use log::trace;

use crate::find::{Search, SearchOutcome, Trace};
use crate::grid::{Grid, Point};
use crate::observe::Observer;

/// A point whose neighbors are being explored, `next` is the index of the
/// first neighbor that has not been tried yet
struct Frame {
    point: Point,
    depth: usize,
    neighbors: Vec<Point>,
    next: usize,
}

enum Entered {
    Goal,
    /// Depth limit reached, the point was not expanded
    Exhausted,
    Expanding(Frame),
    Stopped,
}

fn enter<O: Observer>(
    search: &mut Search<'_, O>,
    visited: &mut HashSet<Point>,
    point: Point,
    depth: usize,
) -> Entered {
    if search.should_stop() {
        return Entered::Stopped;
    }

    visited.insert(point);
    search.open(point);
    search.draw();

    if point == search.goal() {
        return Entered::Goal;
    }

    if depth == 0 {
        if point != search.start() {
            search.close(point);
            search.draw();
        }
        return Entered::Exhausted;
    }

    Entered::Expanding(Frame {
        point,
        depth,
        neighbors: search.neighbors_of(point),
        next: 0,
    })
}

/// Depth-limited depth-first search. Points further than `limit` steps away
/// from the start (along the explored branch) are never expanded, a limit of
/// 0 only looks at the start itself.
///
/// Visited points are shared by all branches of one call, so a point first
/// reached through a long branch is not tried again through a shorter one.
pub fn dls<O: Observer>(
    grid: &mut Grid,
    observer: &mut O,
    start: Point,
    goal: Point,
    limit: usize,
) -> SearchOutcome {
    let Some(mut search) = Search::new("DLS", grid, observer, start, goal) else {
        return SearchOutcome::NoPathFound;
    };

    let mut visited = HashSet::new();
    let mut stack: Vec<Frame> = Vec::new();

    match enter(&mut search, &mut visited, start, limit) {
        Entered::Goal => return search.path_found(vec![start], Trace::FromGoal),
        Entered::Exhausted => return search.no_path(),
        Entered::Stopped => return search.cancelled(),
        Entered::Expanding(frame) => stack.push(frame),
    }

    while let Some(frame) = stack.last_mut() {
        let untried = frame.neighbors[frame.next..]
            .iter()
            .position(|n| !visited.contains(n));

        let Some(offset) = untried else {
            // every neighbor failed, this branch is done
            let point = frame.point;
            stack.pop();
            if point != start {
                search.close(point);
                search.draw();
            }
            continue;
        };

        let neighbor = frame.neighbors[frame.next + offset];
        frame.next += offset + 1;
        let depth = frame.depth - 1;

        match enter(&mut search, &mut visited, neighbor, depth) {
            Entered::Goal => {
                let mut path: Vec<Point> = stack.iter().map(|f| f.point).collect();
                path.push(neighbor);
                return search.path_found(path, Trace::FromGoal);
            }
            Entered::Exhausted => {}
            Entered::Stopped => return search.cancelled(),
            Entered::Expanding(child) => stack.push(child),
        }
    }

    search.no_path()
}

/// Iterative-deepening depth-first search: runs [`dls`] with the limits
/// 0, 1, ..., `max_depth` and stops at the first one that finds the goal.
pub fn iddfs<O: Observer>(
    grid: &mut Grid,
    observer: &mut O,
    start: Point,
    goal: Point,
    max_depth: usize,
) -> SearchOutcome {
    if !grid.is_valid(start) || !grid.is_valid(goal) {
        return SearchOutcome::NoPathFound;
    }

    for depth in 0..=max_depth {
        trace!("IDDFS: depth {}", depth);
        match dls(grid, observer, start, goal, depth) {
            SearchOutcome::NoPathFound => {}
            outcome => return outcome,
        }
    }

    SearchOutcome::NoPathFound
}

/// A point on the current IDA* path. `min` is the smallest f value that was
/// cut off anywhere below it.
struct Node {
    point: Point,
    g: usize,
    neighbors: Vec<Point>,
    next: usize,
    min: f64,
}

enum Visit {
    Found,
    /// f value above the threshold
    Pruned(f64),
    Expanding(Node),
    Stopped,
}

enum Iteration {
    Found(Vec<Point>),
    /// Nothing found, carries the threshold for the next iteration
    Exceeded(f64),
    Stopped,
}

fn visit<O: Observer, H: Fn(Point, Point) -> f64>(
    search: &mut Search<'_, O>,
    heuristic: &H,
    point: Point,
    g: usize,
    threshold: f64,
) -> Visit {
    if search.should_stop() {
        return Visit::Stopped;
    }

    let f = g as f64 + heuristic(point, search.goal());
    if f > threshold {
        return Visit::Pruned(f);
    }
    if point == search.goal() {
        return Visit::Found;
    }

    if !search.is_endpoint(point) {
        search.open(point);
        search.draw();
    }

    Visit::Expanding(Node {
        point,
        g,
        neighbors: search.neighbors_of(point),
        next: 0,
        min: f64::INFINITY,
    })
}

/// One depth-first pass of IDA* bounded by `threshold`
fn iteration<O: Observer, H: Fn(Point, Point) -> f64>(
    search: &mut Search<'_, O>,
    heuristic: &H,
    threshold: f64,
) -> Iteration {
    let start = search.start();
    let mut stack: Vec<Node> = Vec::new();
    let mut on_path: HashSet<Point> = HashSet::new();

    match visit(search, heuristic, start, 0, threshold) {
        Visit::Found => return Iteration::Found(vec![start]),
        Visit::Pruned(f) => return Iteration::Exceeded(f),
        Visit::Stopped => return Iteration::Stopped,
        Visit::Expanding(node) => {
            on_path.insert(start);
            stack.push(node);
        }
    }

    loop {
        let Some(node) = stack.last_mut() else {
            unreachable!("the start node is only popped together with returning");
        };

        let untried = node.neighbors[node.next..]
            .iter()
            .position(|n| !on_path.contains(n));

        let Some(offset) = untried else {
            let (point, min) = (node.point, node.min);
            stack.pop();
            on_path.remove(&point);

            let Some(parent) = stack.last_mut() else {
                return Iteration::Exceeded(min);
            };
            parent.min = parent.min.min(min);
            if !search.is_endpoint(point) {
                search.close(point);
                search.draw();
            }
            continue;
        };

        let neighbor = node.neighbors[node.next + offset];
        node.next += offset + 1;
        let g = node.g + 1;

        match visit(search, heuristic, neighbor, g, threshold) {
            Visit::Found => {
                let mut path: Vec<Point> = stack.iter().map(|n| n.point).collect();
                path.push(neighbor);
                return Iteration::Found(path);
            }
            Visit::Pruned(f) => {
                node.min = node.min.min(f);
                if !search.is_endpoint(neighbor) {
                    search.close(neighbor);
                    search.draw();
                }
            }
            Visit::Stopped => return Iteration::Stopped,
            Visit::Expanding(child) => {
                on_path.insert(neighbor);
                stack.push(child);
            }
        }
    }
}

/// Iterative-deepening A*. Repeats a depth-first search bounded by an f value
/// threshold, raising the threshold to the smallest f value that was cut off
/// until the goal is reached or nothing was cut off anymore.
///
/// Only the points on the current path are excluded from expansion, so the
/// same point may be explored many times through different paths.
pub fn ida_star<O: Observer, H: Fn(Point, Point) -> f64>(
    grid: &mut Grid,
    observer: &mut O,
    start: Point,
    goal: Point,
    heuristic: H,
) -> SearchOutcome {
    let Some(mut search) = Search::new("IDA*", grid, observer, start, goal) else {
        return SearchOutcome::NoPathFound;
    };

    let mut threshold = heuristic(start, goal);
    loop {
        trace!("IDA*: threshold {}", threshold);
        match iteration(&mut search, &heuristic, threshold) {
            Iteration::Found(path) => return search.path_found(path, Trace::FromStart),
            Iteration::Stopped => return search.cancelled(),
            Iteration::Exceeded(min) if min == f64::INFINITY => return search.no_path(),
            Iteration::Exceeded(min) => threshold = min,
        }
    }
}

//! Grid A* routing for node-avoiding links.
//!
//! Only orthogonal moves are expanded, so every routed segment between grid
//! waypoints is horizontal or vertical.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::RouteError;
use crate::geometry::{Point, Rect};
use crate::grid::{build_grid, NavGrid};

/// A* open set entry with reverse ordering for min-heap
#[derive(Clone, Copy, Debug, PartialEq)]
struct OpenEntry {
    f_score: f32,
    counter: u32, // insertion order, breaks f ties first-in-first-out
    index: usize,
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lowest f_score first)
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.counter.cmp(&self.counter))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a route from `start` to `goal` that avoids `obstacles`.
///
/// Never fails: whenever no route can be produced (degenerate grid, no
/// walkable cells, goal unreachable at this resolution) the direct line
/// `[start, goal]` is returned, so a link always renders as something.
///
/// # Arguments
/// * `start`, `goal` - Exact anchors; they are the first and last points of the result
/// * `obstacles` - Node boxes to avoid
/// * `grid_size` - Sampling resolution (larger is coarser and faster)
/// * `padding` - Clearance around each obstacle
pub fn find_path(
    start: Point,
    goal: Point,
    obstacles: &[Rect],
    grid_size: f32,
    padding: f32,
) -> Vec<Point> {
    match try_find_path(start, goal, obstacles, grid_size, padding) {
        Ok(path) => path,
        Err(err) => {
            tracing::debug!(%err, ?start, ?goal, "routing fell back to a direct line");
            vec![start, goal]
        }
    }
}

/// Like [`find_path`] but reports why no route was found.
pub fn try_find_path(
    start: Point,
    goal: Point,
    obstacles: &[Rect],
    grid_size: f32,
    padding: f32,
) -> Result<Vec<Point>, RouteError> {
    if obstacles.is_empty() {
        return Ok(vec![start, goal]);
    }

    let mut grid = build_grid(start, goal, obstacles, grid_size, padding)?;
    if grid.is_degenerate() {
        return Ok(vec![start, goal]);
    }

    let start_cell = grid.closest_cell(start).ok_or(RouteError::EmptyGrid)?;
    let goal_cell = grid.closest_cell(goal).ok_or(RouteError::EmptyGrid)?;
    let start_cell = grid
        .nearest_walkable(start_cell)
        .ok_or(RouteError::NoWalkableCell(start))?;
    let goal_cell = grid
        .nearest_walkable(goal_cell)
        .ok_or(RouteError::NoWalkableCell(goal))?;

    let reached = search(&mut grid, start_cell, goal_cell).ok_or(RouteError::NoPath)?;

    let cells = grid.trace_back(reached);
    let mut path = Vec::with_capacity(cells.len() + 2);
    path.push(start);
    for point in cells {
        if path.last() != Some(&point) {
            path.push(point);
        }
    }
    if path.len() < 2 || path.last() != Some(&goal) {
        path.push(goal);
    }
    Ok(path)
}

/// Run A* from `start` towards `goal` (cell indices).
///
/// Returns the index of the first expanded cell closer than one grid step to
/// the goal cell, or `None` once the open set is exhausted.
fn search(grid: &mut NavGrid, start: usize, goal: usize) -> Option<usize> {
    let goal_pos = grid.position(goal);
    let step = grid.grid_size();

    let mut open_set = BinaryHeap::new();
    let mut closed = vec![false; grid.len()];
    let mut counter: u32 = 0;

    {
        let h = grid.position(start).manhattan(goal_pos);
        let cell = grid.cell_at_mut(start);
        cell.g = 0.0;
        cell.h = h;
        cell.f = h;
    }
    open_set.push(OpenEntry {
        f_score: grid.cell_at(start).f,
        counter,
        index: start,
    });
    counter += 1;

    let mut neighbors = Vec::with_capacity(4);
    while let Some(entry) = open_set.pop() {
        let current = entry.index;
        if closed[current] {
            continue;
        }

        let current_pos = grid.position(current);
        if current_pos.manhattan(goal_pos) < step {
            return Some(current);
        }
        closed[current] = true;

        let current_g = grid.cell_at(current).g;
        neighbors.clear();
        neighbors.extend(grid.neighbors(current));

        for &neighbor in &neighbors {
            if closed[neighbor] {
                continue;
            }
            let neighbor_pos = grid.position(neighbor);
            let tentative_g = current_g + current_pos.manhattan(neighbor_pos);

            let cell = grid.cell_at_mut(neighbor);
            if tentative_g < cell.g {
                cell.parent = Some(current);
                cell.g = tentative_g;
                cell.h = neighbor_pos.manhattan(goal_pos);
                cell.f = cell.g + cell.h;
                open_set.push(OpenEntry {
                    f_score: cell.f,
                    counter,
                    index: neighbor,
                });
                counter += 1;
            }
        }
    }

    None
}

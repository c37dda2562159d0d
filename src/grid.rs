//! Walkability grid sampled around a start point, a goal point and a set of
//! rectangular obstacles.
//!
//! Grids are rebuilt for every routing call.

use crate::error::RouteError;
use crate::geometry::{Point, Rect};

/// Upper bound on the number of cells a single grid may hold.
///
/// Beyond this the caller's `grid_size` is too fine for the diagram and the
/// router degrades to a direct line instead of allocating.
pub const MAX_GRID_CELLS: usize = 250_000;

/// One sample point of the grid plus the A* bookkeeping for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub x: f32,
    pub y: f32,
    pub walkable: bool,
    /// Cost from the start cell.
    pub g: f32,
    /// Heuristic estimate to the goal cell.
    pub h: f32,
    /// `g + h`
    pub f: f32,
    /// Index of the cell this one was reached from.
    pub parent: Option<usize>,
}

impl GridCell {
    fn new(x: f32, y: f32, walkable: bool) -> Self {
        Self {
            x,
            y,
            walkable,
            g: f32::INFINITY,
            h: 0.0,
            f: f32::INFINITY,
            parent: None,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Row-major grid of [`GridCell`]s.
#[derive(Debug, Clone)]
pub struct NavGrid {
    cells: Vec<GridCell>,
    rows: usize,
    cols: usize,
    origin: Point,
    grid_size: f32,
}

/// Orthogonal steps as (row, col) deltas: up, right, down, left.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

impl NavGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Zero or one cell: there is nothing to search.
    pub fn is_degenerate(&self) -> bool {
        self.cells.len() <= 1
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub(crate) fn cell_at(&self, index: usize) -> &GridCell {
        &self.cells[index]
    }

    pub(crate) fn cell_at_mut(&mut self, index: usize) -> &mut GridCell {
        &mut self.cells[index]
    }

    pub fn position(&self, index: usize) -> Point {
        self.cells[index].position()
    }

    /// Walkable orthogonal neighbours of the cell at `index`.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let row = (index / self.cols) as isize;
        let col = (index % self.cols) as isize;
        DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let r = row + dr;
            let c = col + dc;
            if r < 0 || c < 0 || r >= self.rows as isize || c >= self.cols as isize {
                return None;
            }
            let n = r as usize * self.cols + c as usize;
            self.cells[n].walkable.then_some(n)
        })
    }

    /// Index of the cell closest to `point` by Manhattan distance.
    ///
    /// Samples are evenly spaced, so the nearest column and row can be found
    /// independently. Exact ties resolve to the lower row/column, i.e. the
    /// first cell in row-major order.
    pub fn closest_cell(&self, point: Point) -> Option<usize> {
        if self.cells.is_empty() {
            return None;
        }
        let nearest = |offset: f32, count: usize| -> usize {
            let t = offset / self.grid_size;
            let i = (t - 0.5).ceil();
            if i <= 0.0 {
                0
            } else {
                (i as usize).min(count - 1)
            }
        };
        let col = nearest(point.x - self.origin.x, self.cols);
        let row = nearest(point.y - self.origin.y, self.rows);
        Some(row * self.cols + col)
    }

    /// The cell itself if walkable, otherwise the walkable cell nearest to it.
    ///
    /// This is a full scan of the grid. It only runs when an endpoint sits on
    /// an obstacle, and stays cheap as long as grids are kept coarse.
    pub fn nearest_walkable(&self, index: usize) -> Option<usize> {
        if self.cells[index].walkable {
            return Some(index);
        }
        let from = self.position(index);
        let mut nearest = None;
        let mut min_dist = f32::INFINITY;
        for (i, cell) in self.cells.iter().enumerate() {
            if !cell.walkable {
                continue;
            }
            let dist = from.manhattan(cell.position());
            if dist < min_dist {
                min_dist = dist;
                nearest = Some(i);
            }
        }
        nearest
    }

    /// Walk parent pointers back from `index` and return the cell positions
    /// in start-to-end order.
    pub fn trace_back(&self, index: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            path.push(self.position(i));
            // parent chains are acyclic; the length check only guards corrupt input
            if path.len() > self.cells.len() {
                break;
            }
            current = self.cells[i].parent;
        }
        path.reverse();
        path
    }
}

/// Build a walkability grid for one routing call.
///
/// The sampled area is the bounding box of `start`, `goal` and every obstacle
/// corner, expanded by `2 * padding` on each side, plus one extra cell so
/// routes can pass around obstacles that touch the edge of that box. A cell is
/// blocked iff its sample point lies inside an obstacle inflated by `padding`.
///
/// # Arguments
/// * `start`, `goal` - Endpoints of the line being routed
/// * `obstacles` - Node boxes to avoid
/// * `grid_size` - Distance between samples
/// * `padding` - Clearance added around each obstacle
///
/// # Returns
/// The grid, or a [`RouteError`] when the parameters cannot produce one.
pub fn build_grid(
    start: Point,
    goal: Point,
    obstacles: &[Rect],
    grid_size: f32,
    padding: f32,
) -> Result<NavGrid, RouteError> {
    if !grid_size.is_finite() || grid_size <= 0.0 {
        return Err(RouteError::InvalidGridSize(grid_size));
    }
    if !start.is_finite() || !goal.is_finite() || !padding.is_finite() {
        return Err(RouteError::NonFiniteInput);
    }
    let padding = padding.max(0.0);
    let obstacles: Vec<Rect> = obstacles.iter().map(|r| r.sanitized()).collect();

    let mut min = Point::new(start.x.min(goal.x), start.y.min(goal.y));
    let mut max = Point::new(start.x.max(goal.x), start.y.max(goal.y));
    for rect in &obstacles {
        min.x = min.x.min(rect.x);
        min.y = min.y.min(rect.y);
        max.x = max.x.max(rect.right());
        max.y = max.y.max(rect.bottom());
    }

    let margin = padding * 2.0 + grid_size;
    let origin = Point::new(min.x - margin, min.y - margin);
    let span_x = (max.x + margin) - origin.x;
    let span_y = (max.y + margin) - origin.y;

    let cols_f = (span_x / grid_size).ceil() + 1.0;
    let rows_f = (span_y / grid_size).ceil() + 1.0;
    if cols_f * rows_f > MAX_GRID_CELLS as f32 {
        return Err(RouteError::GridTooLarge {
            rows: rows_f as usize,
            cols: cols_f as usize,
            limit: MAX_GRID_CELLS,
        });
    }
    let cols = cols_f as usize;
    let rows = rows_f as usize;

    let inflated: Vec<Rect> = obstacles.iter().map(|r| r.inflate(padding)).collect();
    let mut cells = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let y = origin.y + row as f32 * grid_size;
        for col in 0..cols {
            let x = origin.x + col as f32 * grid_size;
            let point = Point::new(x, y);
            let walkable = !inflated.iter().any(|rect| rect.contains(point));
            cells.push(GridCell::new(x, y, walkable));
        }
    }

    tracing::trace!(rows, cols, obstacles = obstacles.len(), "built navigation grid");

    Ok(NavGrid {
        cells,
        rows,
        cols,
        origin,
        grid_size,
    })
}

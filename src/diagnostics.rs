//! Inspection of the routing pipeline.
//!
//! [`route_line`] runs the full pipeline for arbitrary inputs and returns
//! every intermediate stage. Contributions report the same [`RouteTrace`] to an
//! optional [`DiagnosticsHook`] each time they recompute.

use std::rc::Rc;

use crate::endpoint::Endpoint;
use crate::error::RouteError;
use crate::geometry::{Point, Rect};
use crate::options::RoutingOptions;
use crate::path::{path_to_svg, simplify_path};
use crate::pathfinding::find_path;

/// Every stage of one routing run.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTrace {
    /// Line the route was computed for, `None` for standalone probes.
    pub line_id: Option<i32>,
    pub from: Point,
    pub to: Point,
    pub obstacle_count: usize,
    /// Pathfinder output.
    pub raw: Vec<Point>,
    /// After collinear points were removed.
    pub simplified: Vec<Point>,
    /// Rendered SVG path commands.
    pub svg: String,
}

impl RouteTrace {
    /// Whether the route bends around something, as opposed to the direct line.
    pub fn is_routed(&self) -> bool {
        self.raw.len() > 2
    }
}

/// Callback invoked with the trace of every route a contribution computes.
pub type DiagnosticsHook = Rc<dyn Fn(&RouteTrace)>;

/// Run grid building, pathfinding, simplification and rendering.
///
/// Fails only on non-finite endpoints; an unroutable line is still a
/// successful trace holding the direct line.
pub fn try_route_line(
    from: Point,
    to: Point,
    obstacles: &[Rect],
    options: &RoutingOptions,
) -> Result<RouteTrace, RouteError> {
    if !from.is_finite() || !to.is_finite() {
        return Err(RouteError::NonFiniteInput);
    }
    let options = options.validated();
    let raw = find_path(from, to, obstacles, options.grid_size, options.node_padding);
    let simplified = simplify_path(&raw);
    let svg = path_to_svg(&simplified, options.corner_radius);
    Ok(RouteTrace {
        line_id: None,
        from,
        to,
        obstacle_count: obstacles.len(),
        raw,
        simplified,
        svg,
    })
}

/// Standalone probe: route between two points around `obstacles`.
///
/// Non-finite coordinates are treated as 0.
pub fn route_line(from: Point, to: Point, obstacles: &[Rect], options: &RoutingOptions) -> RouteTrace {
    let from = Endpoint::from(from).resolve();
    let to = Endpoint::from(to).resolve();
    match try_route_line(from, to, obstacles, options) {
        Ok(trace) => trace,
        Err(err) => {
            tracing::debug!(%err, "route probe failed");
            let raw = vec![from, to];
            RouteTrace {
                line_id: None,
                from,
                to,
                obstacle_count: obstacles.len(),
                svg: path_to_svg(&raw, 0.0),
                simplified: raw.clone(),
                raw,
            }
        }
    }
}

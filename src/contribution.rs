//! Per-line render contributions.
//!
//! The host creates one contribution per line and asks it for the path to
//! draw, the line's bounds and centre, and distances for hit testing. Whenever
//! an endpoint moves the host calls [`LineRenderContribution::update`].

use std::rc::Rc;

use crate::diagnostics::{try_route_line, DiagnosticsHook};
use crate::endpoint::Endpoint;
use crate::geometry::{Point, Rect};
use crate::host::{collect_obstacles, DiagramHost, LineEnd, LineEntity};
use crate::options::RoutingOptions;
use crate::path::{direct_path_svg, generate_bezier_path};

/// Data a host needs to draw and select one line.
pub trait LineRenderContribution {
    /// SVG path commands for the line.
    fn path(&self) -> String;

    /// Axis-aligned box spanned by the line's endpoints.
    fn bounds(&self) -> Rect;

    /// Midpoint between the endpoints, `None` until the first update.
    fn center(&self) -> Option<Point>;

    /// Distance from `pos` to the line, 0 when inside its bounds.
    fn calc_distance(&self, pos: Point) -> f32 {
        self.bounds().distance_to(pos)
    }

    /// Recompute for new endpoint positions.
    fn update(&mut self, from: Endpoint, to: Endpoint);

    /// Polyline the current path follows.
    fn points(&self) -> Vec<Point>;
}

/// Endpoint positions of the last update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Ends {
    from: Point,
    to: Point,
}

fn resolve_end(host: &dyn DiagramHost, end: &LineEnd, raw: &Endpoint) -> Point {
    end.port_id
        .and_then(|port| host.port_position(port))
        .filter(|p| p.is_finite())
        .unwrap_or_else(|| raw.resolve())
}

// ============================================================================
// Routed lines
// ============================================================================

/// Contribution that routes its line around every node it does not connect.
pub struct LineContribution {
    entity: LineEntity,
    host: Rc<dyn DiagramHost>,
    options: RoutingOptions,
    diagnostics: Option<DiagnosticsHook>,
    ends: Option<Ends>,
    cached_path: Option<String>,
    cached_points: Vec<Point>,
}

impl LineContribution {
    pub fn new(entity: LineEntity, host: Rc<dyn DiagramHost>, options: RoutingOptions) -> Self {
        Self {
            entity,
            host,
            options: options.validated(),
            diagnostics: None,
            ends: None,
            cached_path: None,
            cached_points: Vec::new(),
        }
    }

    pub fn with_diagnostics(mut self, hook: Option<DiagnosticsHook>) -> Self {
        self.diagnostics = hook;
        self
    }

    pub fn entity(&self) -> &LineEntity {
        &self.entity
    }

    pub fn options(&self) -> &RoutingOptions {
        &self.options
    }

    /// Whether a routed path has been computed.
    pub fn has_cached_path(&self) -> bool {
        self.cached_path.is_some()
    }

    fn ends(&self) -> Ends {
        self.ends.unwrap_or_default()
    }
}

impl LineRenderContribution for LineContribution {
    fn path(&self) -> String {
        match &self.cached_path {
            Some(path) => path.clone(),
            None => {
                let ends = self.ends();
                direct_path_svg(ends.from, ends.to)
            }
        }
    }

    fn bounds(&self) -> Rect {
        let ends = self.ends();
        Rect::from_corners(ends.from, ends.to)
    }

    fn center(&self) -> Option<Point> {
        self.ends.map(|ends| ends.from.midpoint(ends.to))
    }

    fn update(&mut self, from: Endpoint, to: Endpoint) {
        let host = self.host.as_ref();
        let from = resolve_end(host, &self.entity.from, &from);
        let to = resolve_end(host, &self.entity.to, &to);
        self.ends = Some(Ends { from, to });

        let obstacles = collect_obstacles(host, &self.entity);
        match try_route_line(from, to, &obstacles, &self.options) {
            Ok(mut trace) => {
                trace.line_id = Some(self.entity.id);
                if self.options.enable_logging {
                    tracing::debug!(
                        line = self.entity.id,
                        obstacles = trace.obstacle_count,
                        raw = trace.raw.len(),
                        simplified = trace.simplified.len(),
                        routed = trace.is_routed(),
                        "line routed"
                    );
                }
                if let Some(hook) = &self.diagnostics {
                    hook(&trace);
                }
                self.cached_path = Some(trace.svg);
                self.cached_points = trace.simplified;
            }
            Err(err) => {
                tracing::debug!(line = self.entity.id, %err, "keeping previous path");
                if self.cached_path.is_none() {
                    self.cached_points = vec![from, to];
                }
            }
        }

        host.request_redraw(self.entity.id);
    }

    fn points(&self) -> Vec<Point> {
        if self.cached_points.is_empty() {
            let ends = self.ends();
            return vec![ends.from, ends.to];
        }
        self.cached_points.clone()
    }
}

// ============================================================================
// Default curve
// ============================================================================

/// Minimum horizontal control offset of the default curve.
pub const BEZIER_MIN_OFFSET: f32 = 50.0;

/// The host's built-in cubic bezier line, used when no router is registered.
pub struct BezierContribution {
    entity: LineEntity,
    host: Rc<dyn DiagramHost>,
    ends: Option<Ends>,
}

impl BezierContribution {
    pub fn new(entity: LineEntity, host: Rc<dyn DiagramHost>) -> Self {
        Self {
            entity,
            host,
            ends: None,
        }
    }
}

impl LineRenderContribution for BezierContribution {
    fn path(&self) -> String {
        let ends = self.ends.unwrap_or_default();
        generate_bezier_path(ends.from, ends.to, BEZIER_MIN_OFFSET)
    }

    fn bounds(&self) -> Rect {
        let ends = self.ends.unwrap_or_default();
        Rect::from_corners(ends.from, ends.to)
    }

    fn center(&self) -> Option<Point> {
        self.ends.map(|ends| ends.from.midpoint(ends.to))
    }

    fn update(&mut self, from: Endpoint, to: Endpoint) {
        let host = self.host.as_ref();
        let from = resolve_end(host, &self.entity.from, &from);
        let to = resolve_end(host, &self.entity.to, &to);
        self.ends = Some(Ends { from, to });
        host.request_redraw(self.entity.id);
    }

    fn points(&self) -> Vec<Point> {
        let ends = self.ends.unwrap_or_default();
        vec![ends.from, ends.to]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RouteTrace;
    use crate::geometry::SimpleNodeGeometry;
    use crate::host::LineType;
    use std::cell::RefCell;

    #[derive(Default)]
    struct TestHost {
        nodes: Vec<SimpleNodeGeometry>,
        ports: Vec<(i32, Point)>,
        redraws: RefCell<Vec<i32>>,
    }

    impl DiagramHost for TestHost {
        fn nodes(&self) -> Vec<SimpleNodeGeometry> {
            self.nodes.clone()
        }
        fn port_position(&self, port_id: i32) -> Option<Point> {
            self.ports.iter().find(|(id, _)| *id == port_id).map(|(_, p)| *p)
        }
        fn request_redraw(&self, line_id: i32) {
            self.redraws.borrow_mut().push(line_id);
        }
    }

    fn entity() -> LineEntity {
        LineEntity {
            id: 7,
            line_type: LineType::Bezier,
            from: LineEnd::new(1, 11),
            to: LineEnd::new(2, 21),
        }
    }

    fn blocked_host() -> Rc<TestHost> {
        Rc::new(TestHost {
            nodes: vec![
                SimpleNodeGeometry { id: 1, x: -20.0, y: -10.0, width: 20.0, height: 20.0 },
                SimpleNodeGeometry { id: 2, x: 200.0, y: -10.0, width: 20.0, height: 20.0 },
                SimpleNodeGeometry { id: 3, x: 50.0, y: -50.0, width: 100.0, height: 100.0 },
            ],
            ..Default::default()
        })
    }

    fn options() -> RoutingOptions {
        RoutingOptions::new().with_node_padding(0.0).with_corner_radius(0.0)
    }

    // ========================================================================
    // Before the first update
    // ========================================================================

    #[test]
    fn test_fresh_contribution_defaults() {
        let host: Rc<dyn DiagramHost> = Rc::new(TestHost::default());
        let c = LineContribution::new(entity(), host, RoutingOptions::default());
        assert_eq!(c.path(), "M 0 0 L 0 0");
        assert_eq!(c.bounds(), Rect::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(c.center(), None);
        assert!(!c.has_cached_path());
    }

    // ========================================================================
    // update()
    // ========================================================================

    #[test]
    fn test_update_routes_around_other_nodes() {
        let host = blocked_host();
        let mut c = LineContribution::new(entity(), host.clone(), options());
        c.update((0.0, 0.0).into(), (200.0, 0.0).into());

        assert!(c.has_cached_path());
        let points = c.points();
        assert!(points.len() > 2);
        assert!(points.iter().any(|p| p.y < -50.0 || p.y > 50.0));
        assert_eq!(c.center(), Some(Point::new(100.0, 0.0)));
        assert_eq!(c.bounds(), Rect::new(0.0, 0.0, 200.0, 0.0));
        assert_eq!(*host.redraws.borrow(), vec![7]);
    }

    #[test]
    fn test_update_prefers_host_port_position() {
        let host = Rc::new(TestHost {
            ports: vec![(11, Point::new(5.0, 5.0)), (21, Point::new(45.0, 5.0))],
            ..Default::default()
        });
        let mut c = LineContribution::new(entity(), host, options());
        c.update((999.0, 999.0).into(), Endpoint::Unknown);
        assert_eq!(c.path(), "M 5 5 L 45 5");
    }

    #[test]
    fn test_update_without_port_uses_endpoint() {
        let host = Rc::new(TestHost::default());
        let mut c = LineContribution::new(entity(), host, options());
        c.update((1.0, 2.0).into(), (3.0, 4.0).into());
        assert_eq!(c.path(), "M 1 2 L 3 4");
    }

    #[test]
    fn test_update_sanitizes_nan_endpoints() {
        let host = Rc::new(TestHost::default());
        let mut c = LineContribution::new(entity(), host, options());
        c.update((f32::NAN, 2.0).into(), (3.0, f32::INFINITY).into());
        assert_eq!(c.path(), "M 0 2 L 3 0");
    }

    #[test]
    fn test_diagnostics_hook_receives_trace() {
        let traces: Rc<RefCell<Vec<RouteTrace>>> = Rc::default();
        let sink = traces.clone();
        let hook: DiagnosticsHook = Rc::new(move |t: &RouteTrace| sink.borrow_mut().push(t.clone()));

        let mut c = LineContribution::new(entity(), blocked_host(), options()).with_diagnostics(Some(hook));
        c.update((0.0, 0.0).into(), (200.0, 0.0).into());

        let traces = traces.borrow();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].line_id, Some(7));
        assert_eq!(traces[0].obstacle_count, 1);
        assert_eq!(traces[0].svg, c.path());
    }

    #[test]
    fn test_calc_distance_uses_bounds() {
        let mut c = LineContribution::new(entity(), Rc::new(TestHost::default()), options());
        c.update((0.0, 0.0).into(), (100.0, 50.0).into());
        assert_eq!(c.calc_distance(Point::new(50.0, 25.0)), 0.0);
        assert_eq!(c.calc_distance(Point::new(50.0, 60.0)), 10.0);
    }

    // ========================================================================
    // BezierContribution
    // ========================================================================

    #[test]
    fn test_bezier_contribution_path() {
        let host = Rc::new(TestHost::default());
        let mut c = BezierContribution::new(entity(), host.clone());
        c.update((0.0, 50.0).into(), (100.0, 50.0).into());
        assert_eq!(c.path(), "M 0 50 C 50 50 50 50 100 50");
        assert_eq!(c.center(), Some(Point::new(50.0, 50.0)));
        assert_eq!(*host.redraws.borrow(), vec![7]);
    }
}

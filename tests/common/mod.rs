//! Common test utilities for integration tests.

#![allow(dead_code)]

use slint_smart_links::{
    DiagnosticsHook, DiagramHost, Point, Rect, RouteTrace, SimpleNodeGeometry,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Host with fixed geometry that records every redraw request.
#[derive(Default, Clone)]
pub struct RecordingHost {
    pub nodes: Rc<RefCell<Vec<SimpleNodeGeometry>>>,
    pub ports: Rc<RefCell<Vec<(i32, Point)>>>,
    /// line ids in request order
    pub redraws: Rc<RefCell<Vec<i32>>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&self, id: i32, x: f32, y: f32, width: f32, height: f32) {
        self.nodes.borrow_mut().push(SimpleNodeGeometry { id, x, y, width, height });
    }

    pub fn move_node(&self, id: i32, x: f32, y: f32) {
        for node in self.nodes.borrow_mut().iter_mut().filter(|n| n.id == id) {
            node.x = x;
            node.y = y;
        }
    }

    pub fn add_port(&self, id: i32, x: f32, y: f32) {
        self.ports.borrow_mut().push((id, Point::new(x, y)));
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws.borrow().len()
    }
}

impl DiagramHost for RecordingHost {
    fn nodes(&self) -> Vec<SimpleNodeGeometry> {
        self.nodes.borrow().clone()
    }

    fn port_position(&self, port_id: i32) -> Option<Point> {
        self.ports.borrow().iter().find(|(id, _)| *id == port_id).map(|(_, p)| *p)
    }

    fn request_redraw(&self, line_id: i32) {
        self.redraws.borrow_mut().push(line_id);
    }
}

/// Collects every [`RouteTrace`] reported through a diagnostics hook.
#[derive(Default, Clone)]
pub struct TraceTracker {
    pub traces: Rc<RefCell<Vec<RouteTrace>>>,
}

impl TraceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hook(&self) -> DiagnosticsHook {
        let traces = self.traces.clone();
        Rc::new(move |trace: &RouteTrace| traces.borrow_mut().push(trace.clone()))
    }

    pub fn len(&self) -> usize {
        self.traces.borrow().len()
    }

    pub fn last(&self) -> Option<RouteTrace> {
        self.traces.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.traces.borrow_mut().clear();
    }
}

/// Panics unless every consecutive pair of grid waypoints is axis-aligned.
///
/// The exact anchors at either end may sit off-grid and are skipped.
pub fn assert_orthogonal(path: &[Point]) {
    if path.len() < 4 {
        return;
    }
    for pair in path[1..path.len() - 1].windows(2) {
        assert!(
            pair[0].x == pair[1].x || pair[0].y == pair[1].y,
            "diagonal segment {:?} -> {:?} in {:?}",
            pair[0],
            pair[1],
            path
        );
    }
}

/// Panics if any intermediate waypoint lies inside an obstacle inflated by `padding`.
pub fn assert_waypoints_clear(path: &[Point], obstacles: &[Rect], padding: f32) {
    if path.len() < 3 {
        return;
    }
    for p in &path[1..path.len() - 1] {
        for obstacle in obstacles {
            assert!(
                !obstacle.inflate(padding).contains(*p),
                "waypoint {:?} inside {:?} (padding {})",
                p,
                obstacle,
                padding
            );
        }
    }
}

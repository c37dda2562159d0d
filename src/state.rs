use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::geometry::{NodeGeometry, Point, SimpleNodeGeometry};
use crate::host::DiagramHost;

#[derive(Clone, Copy, Debug)]
pub struct StoredPin {
    pub node_id: i32,
    pub rel_x: f32,
    pub rel_y: f32,
}

/// Helper struct to manage spatial state of the editor (node rects and pin positions)
///
/// Generic over N to allow using specialized node types that implement NodeGeometry.
pub struct GeometryCache<N = SimpleNodeGeometry> {
    pub node_rects: HashMap<i32, N>,
    pub pin_positions: HashMap<i32, StoredPin>,
}

impl<N> Default for GeometryCache<N> {
    fn default() -> Self {
        Self {
            node_rects: HashMap::new(),
            pin_positions: HashMap::new(),
        }
    }
}

impl<N> GeometryCache<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard handler for pin position reports from Slint
    pub fn handle_pin_report(
        &mut self,
        pin_id: i32,
        node_id: i32,
        rel_x: f32,
        rel_y: f32,
    ) {
        self.pin_positions.insert(
            pin_id,
            StoredPin {
                node_id,
                rel_x,
                rel_y,
            },
        );
    }

    /// Node a pin belongs to
    pub fn pin_node(&self, pin_id: i32) -> Option<i32> {
        self.pin_positions.get(&pin_id).map(|pin| pin.node_id)
    }

    /// Forget a node and every pin on it
    pub fn remove_node(&mut self, node_id: i32) {
        self.node_rects.remove(&node_id);
        self.pin_positions.retain(|_, pin| pin.node_id != node_id);
    }
}

impl<N> GeometryCache<N>
where
    N: NodeGeometry,
{
    /// Absolute position of a pin: its node's origin plus the pin offset
    pub fn pin_absolute_position(&self, pin_id: i32) -> Option<Point> {
        let pin = self.pin_positions.get(&pin_id)?;
        let rect = self.node_rects.get(&pin.node_id)?.rect();
        Some(Point::new(rect.0 + pin.rel_x, rect.1 + pin.rel_y))
    }

    /// Every cached node as plain geometry, ordered by id
    pub fn node_geometries(&self) -> Vec<SimpleNodeGeometry> {
        let mut nodes: Vec<SimpleNodeGeometry> = self
            .node_rects
            .values()
            .map(|node| {
                let (x, y, width, height) = node.rect();
                SimpleNodeGeometry {
                    id: node.id(),
                    x,
                    y,
                    width,
                    height,
                }
            })
            .collect();
        nodes.sort_by_key(|node| node.id);
        nodes
    }
}

/// Convenience implementation for the default SimpleNodeGeometry
impl GeometryCache<SimpleNodeGeometry> {
    /// Update a node's rectangle (shorthand for SimpleNodeGeometry)
    pub fn update_node_rect(&mut self, id: i32, x: f32, y: f32, width: f32, height: f32) {
        self.node_rects.insert(
            id,
            SimpleNodeGeometry {
                id,
                x,
                y,
                width,
                height,
            },
        );
    }

    /// Standard handler for node rect reports from Slint (for SimpleNodeGeometry)
    pub fn handle_node_rect_report(&mut self, id: i32, x: f32, y: f32, w: f32, h: f32) {
        self.update_node_rect(id, x, y, w, h);
    }
}

/// In-memory [`DiagramHost`] backed by a shared [`GeometryCache`].
///
/// Redraw requests are queued until the owner drains them, so several
/// contributions can update before the UI model is touched.
#[derive(Clone, Default)]
pub struct SceneHost {
    cache: Rc<RefCell<GeometryCache>>,
    redraw_requests: Rc<RefCell<Vec<i32>>>,
}

impl SceneHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(cache: Rc<RefCell<GeometryCache>>) -> Self {
        Self {
            cache,
            redraw_requests: Rc::default(),
        }
    }

    /// Shared handle to the geometry, for feeding node and pin reports
    pub fn cache(&self) -> Rc<RefCell<GeometryCache>> {
        self.cache.clone()
    }

    /// Line ids that asked for a redraw since the last call, in request order
    /// with duplicates removed.
    pub fn take_redraw_requests(&self) -> Vec<i32> {
        let mut requests = std::mem::take(&mut *self.redraw_requests.borrow_mut());
        let mut seen = Vec::with_capacity(requests.len());
        requests.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
        requests
    }
}

impl DiagramHost for SceneHost {
    fn nodes(&self) -> Vec<SimpleNodeGeometry> {
        self.cache.borrow().node_geometries()
    }

    fn port_position(&self, port_id: i32) -> Option<Point> {
        self.cache.borrow().pin_absolute_position(port_id)
    }

    fn port_node(&self, port_id: i32) -> Option<i32> {
        self.cache.borrow().pin_node(port_id)
    }

    fn request_redraw(&self, line_id: i32) {
        self.redraw_requests.borrow_mut().push(line_id);
    }
}

//! The boundary between the router and the diagram engine hosting it.
//!
//! The host owns all diagram geometry. The router only needs to query node
//! boxes and port positions, ask for a redraw, and register a contribution
//! factory in the host's line rendering registry.

use std::rc::Rc;

use crate::contribution::LineRenderContribution;
use crate::geometry::{NodeGeometry, Point, Rect, SimpleNodeGeometry};

/// Routing style a host draws a line with. Contributions are registered per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineType {
    /// The host's default curve style.
    #[default]
    Bezier,
    LineChart,
    Straight,
}

/// One end of a line: the node it belongs to and, if known, the port on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineEnd {
    pub node_id: Option<i32>,
    pub port_id: Option<i32>,
}

impl LineEnd {
    pub fn new(node_id: i32, port_id: i32) -> Self {
        Self {
            node_id: Some(node_id),
            port_id: Some(port_id),
        }
    }

    pub fn node(node_id: i32) -> Self {
        Self {
            node_id: Some(node_id),
            port_id: None,
        }
    }
}

/// What a contribution factory learns about the line it is created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEntity {
    pub id: i32,
    pub line_type: LineType,
    pub from: LineEnd,
    pub to: LineEnd,
}

/// Services the host diagram engine provides to the router.
pub trait DiagramHost {
    /// Current bounding boxes of every node in the diagram.
    fn nodes(&self) -> Vec<SimpleNodeGeometry>;

    /// Absolute position of a port, if the host knows it.
    fn port_position(&self, port_id: i32) -> Option<Point>;

    /// Node a port currently belongs to, if the host knows it.
    fn port_node(&self, _port_id: i32) -> Option<i32> {
        None
    }

    /// Ask the host to redraw a line after its path changed.
    fn request_redraw(&self, line_id: i32);
}

/// Creates the contribution for a newly attached line.
pub type ContributionFactory =
    Rc<dyn Fn(&LineEntity, Rc<dyn DiagramHost>) -> Box<dyn LineRenderContribution>>;

/// The host's line rendering registry, keyed by [`LineType`].
pub trait LineRenderRegistry {
    /// Install `factory` for every line of `line_type`, replacing any previous one.
    fn register_contribution(&mut self, line_type: LineType, factory: ContributionFactory);

    /// Recreate the contributions of existing lines of `line_type` from the
    /// currently registered factory. Returns the number of lines resynced.
    fn resync_contributions(&mut self, line_type: LineType) -> usize;
}

/// Every node box except those owning the line's endpoints.
///
/// The owner of an end is looked up through its port first, so ports reported
/// after the line was created still exclude their node; `node_id` is the
/// fallback when the host does not know the port.
///
/// Boxes are sanitized: non-finite numbers become 0 and negative sizes are
/// clamped, so malformed host data cannot poison the grid.
pub fn collect_obstacles(host: &dyn DiagramHost, line: &LineEntity) -> Vec<Rect> {
    let owner = |end: &LineEnd| end.port_id.and_then(|port| host.port_node(port)).or(end.node_id);
    let excluded = [owner(&line.from), owner(&line.to)];
    host.nodes()
        .iter()
        .filter(|node| !excluded.contains(&Some(node.id())))
        .map(|node| node.bounds().sanitized())
        .collect()
}

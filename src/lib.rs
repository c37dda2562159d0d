//! # Slint Smart Links
//!
//! Node-avoiding link routing for Slint node editors. Links are routed on a
//! coarse grid around every node they do not connect, simplified to their
//! corners and rendered as SVG path commands with rounded bends.
//!
//! ## Features
//!
//! - **Grid A\* Routing** - Orthogonal detours around padded node boxes
//! - **Never Fails** - Unroutable links degrade to a straight line
//! - **Registry-Based** - Replaces the host's default curve per line type, no per-link opt-in
//! - **Slint Integration** - Pushes computed paths into a bound `VecModel`
//!
//! ## Quick Start
//!
//! ```ignore
//! use slint_smart_links::{LinkManager, RoutingOptions, SceneHost, SimpleLink, SmartLinesPlugin};
//!
//! let host = SceneHost::new();
//! let mut links = LinkManager::new(host.clone());
//! SmartLinesPlugin::new(RoutingOptions::default()).register(&mut links);
//!
//! links.add(SimpleLink::with_default_color(1, output_pin, input_pin));
//! links.update_paths();
//! ```
//!
//! ## Rust Helpers
//!
//! The pipeline stages are usable on their own:
//!
//! - [`find_path`] - Route between two points around obstacles
//! - [`simplify_path`] - Drop collinear waypoints
//! - [`path_to_svg`] - Render a polyline with rounded corners
//! - [`route_line`] - Run every stage and inspect the intermediate results
//! - [`find_link_at`] - Hit-test links at a position

pub mod contribution;
pub mod diagnostics;
pub mod endpoint;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod host;
pub mod links;
pub mod options;
pub mod path;
pub mod pathfinding;
pub mod plugin;
pub mod state;

// Re-export traits and functions
pub use contribution::{BezierContribution, LineContribution, LineRenderContribution};
pub use diagnostics::{route_line, try_route_line, DiagnosticsHook, RouteTrace};
pub use endpoint::{Endpoint, EndpointHandle, RawBounds, RawPoint};
pub use error::RouteError;
pub use geometry::{NodeGeometry, Point, Rect, SimpleNodeGeometry};
pub use graph::{LinkModel, SimpleLink};
pub use grid::{build_grid, NavGrid, MAX_GRID_CELLS};
pub use hit_test::{distance_to_polyline, find_link_at, find_route_at};
pub use host::{
    collect_obstacles, ContributionFactory, DiagramHost, LineEnd, LineEntity, LineRenderRegistry,
    LineType,
};
pub use links::LinkManager;
pub use options::RoutingOptions;
pub use path::{direct_path_svg, generate_bezier_path, path_to_svg, simplify_path};
pub use pathfinding::{find_path, try_find_path};
pub use plugin::SmartLinesPlugin;
pub use state::{GeometryCache, SceneHost, StoredPin};

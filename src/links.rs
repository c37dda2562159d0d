//! Link management for Slint node editors.
//!
//! [`LinkManager`] is the host side of line routing: it owns the links, one
//! render contribution per link, and the registry that decides which
//! contribution a link gets. It pushes the resulting paths into a Slint model.
//!
//! # Example
//!
//! ```ignore
//! use slint_smart_links::{LinkManager, RoutingOptions, SceneHost, SimpleLink, SmartLinesPlugin};
//! use slint::Color;
//!
//! // Feed node and pin geometry into the host
//! let host = SceneHost::new();
//! window.on_node_rect_changed({
//!     let cache = host.cache();
//!     move |id, x, y, w, h| cache.borrow_mut().handle_node_rect_report(id, x, y, w, h)
//! });
//!
//! let mut links = LinkManager::new(host);
//! links.add(SimpleLink::new(1, output_pin, input_pin, Color::from_rgb_u8(100, 180, 255)));
//!
//! // Route every link around nodes
//! SmartLinesPlugin::new(RoutingOptions::default()).register(&mut links);
//!
//! // Update paths when geometry changes (in callbacks)
//! links.update_paths();
//! ```

use crate::contribution::{BezierContribution, LineRenderContribution};
use crate::endpoint::Endpoint;
use crate::graph::LinkModel;
use crate::geometry::Point;
use crate::hit_test;
use crate::host::{ContributionFactory, DiagramHost, LineEnd, LineEntity, LineRenderRegistry, LineType};
use crate::state::SceneHost;
use slint::{Model, SharedString, VecModel};
use std::collections::HashMap;
use std::rc::Rc;

/// Internal trait for auto-syncing to Slint models.
trait ModelSyncer {
    fn sync(&self, paths: &[LinkPathData]);
}

/// Concrete implementation of ModelSyncer for a specific path type.
struct ConcreteModelSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> ModelSyncer for ConcreteModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(i32, SharedString, slint::Color, f32) -> P,
{
    fn sync(&self, paths: &[LinkPathData]) {
        // Update existing rows or add new ones
        for (i, path) in paths.iter().enumerate() {
            let item = (self.constructor)(path.id, SharedString::from(path.path_commands.as_str()), path.color, path.line_width);
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
        }
        // Remove excess rows
        while self.model.row_count() > paths.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

/// Internal representation of a link path.
#[derive(Clone)]
struct LinkPathData {
    id: i32,
    path_commands: String,
    color: slint::Color,
    line_width: f32,
}

/// The built-in contribution for lines nothing else was registered for.
fn default_factory() -> ContributionFactory {
    Rc::new(|entity: &LineEntity, host: Rc<dyn DiagramHost>| {
        Box::new(BezierContribution::new(*entity, host)) as Box<dyn LineRenderContribution>
    })
}

/// Manages links, their render contributions and their visual paths.
///
/// Each link gets a contribution from the factory registered for its
/// [`LineType`]; unregistered types use the built-in bezier curve. Calling
/// [`update_paths`](Self::update_paths) feeds current pin positions to every
/// contribution and collects the paths they produce.
///
/// # Auto-Sync Mode
///
/// Use [`bind_model`](Self::bind_model) to enable automatic synchronization
/// to a Slint `VecModel`. After binding, every call to
/// [`update_paths`](Self::update_paths) automatically updates the Slint model.
///
/// ```ignore
/// let model = Rc::new(VecModel::<LinkPath>::default());
/// links.bind_model(model.clone(), |id, path, color, width| LinkPath { id, path_commands: path, color, width });
/// window.set_link_paths(ModelRc::from(model));
/// ```
pub struct LinkManager<L> {
    /// The logical link data
    links: Vec<L>,
    /// Geometry source handed to every contribution
    host: SceneHost,
    /// Registered contribution factories by line type
    factories: HashMap<LineType, ContributionFactory>,
    /// One contribution per link id
    contributions: HashMap<i32, Box<dyn LineRenderContribution>>,
    /// The computed paths for Slint binding, in link order
    paths: Vec<LinkPathData>,
    /// Optional auto-sync to Slint model
    syncer: Option<Box<dyn ModelSyncer>>,
}

impl<L> LinkManager<L>
where
    L: LinkModel,
{
    /// Create a new LinkManager reading geometry from `host`.
    pub fn new(host: SceneHost) -> Self {
        Self {
            links: Vec::new(),
            host,
            factories: HashMap::new(),
            contributions: HashMap::new(),
            paths: Vec::new(),
            syncer: None,
        }
    }

    /// Bind to a Slint model for automatic synchronization.
    ///
    /// # Arguments
    ///
    /// * `model` - The VecModel to sync to
    /// * `constructor` - Function to create path items from (id, path_commands, color, line_width)
    pub fn bind_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(i32, SharedString, slint::Color, f32) -> P + 'static,
    {
        self.syncer = Some(Box::new(ConcreteModelSyncer { model, constructor }));
    }

    pub fn host(&self) -> &SceneHost {
        &self.host
    }

    fn factory_for(&self, line_type: LineType) -> ContributionFactory {
        self.factories.get(&line_type).cloned().unwrap_or_else(default_factory)
    }

    // Node ids are a snapshot; obstacle collection asks the host for the
    // current owner of each port.
    fn entity_for(&self, link: &L) -> LineEntity {
        let cache = self.host.cache();
        let cache = cache.borrow();
        let end = |pin: i32| LineEnd {
            node_id: cache.pin_node(pin),
            port_id: Some(pin),
        };
        LineEntity {
            id: link.id(),
            line_type: link.line_type(),
            from: end(link.start_pin_id()),
            to: end(link.end_pin_id()),
        }
    }

    fn create_contribution(&self, link: &L) -> Box<dyn LineRenderContribution> {
        let entity = self.entity_for(link);
        let host: Rc<dyn DiagramHost> = Rc::new(self.host.clone());
        (self.factory_for(entity.line_type))(&entity, host)
    }

    /// Add a link to the manager, replacing any link with the same ID.
    ///
    /// The link's visual path will be computed on the next call to [`update_paths`](Self::update_paths).
    pub fn add(&mut self, link: L) {
        self.remove(link.id());
        let contribution = self.create_contribution(&link);
        self.contributions.insert(link.id(), contribution);
        self.links.push(link);
    }

    /// Remove a link and its contribution by ID.
    ///
    /// Returns `true` if a link was removed.
    pub fn remove(&mut self, id: i32) -> bool {
        let len_before = self.links.len();
        self.links.retain(|link| link.id() != id);
        self.contributions.remove(&id);
        self.paths.retain(|path| path.id != id);
        self.links.len() != len_before
    }

    /// Remove all links.
    pub fn clear(&mut self) {
        self.links.clear();
        self.contributions.clear();
        self.paths.clear();
    }

    /// Get the number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Check if there are no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Get a reference to the links.
    pub fn links(&self) -> &[L] {
        &self.links
    }

    /// Get an iterator over link IDs.
    pub fn ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.links.iter().map(|l| l.id())
    }

    /// Find a link by ID.
    pub fn find(&self, id: i32) -> Option<&L> {
        self.links.iter().find(|l| l.id() == id)
    }

    /// The contribution rendering a link.
    pub fn contribution(&self, id: i32) -> Option<&dyn LineRenderContribution> {
        self.contributions.get(&id).map(|c| c.as_ref())
    }

    /// Path commands computed for a link by the last update.
    pub fn path(&self, id: i32) -> Option<&str> {
        self.paths.iter().find(|p| p.id == id).map(|p| p.path_commands.as_str())
    }

    /// Update all link paths based on current pin positions.
    ///
    /// Call this whenever:
    /// - Node rects or pin positions change
    /// - Links are added/removed
    ///
    /// Every link is re-routed and every row rebuilt on each call; links whose
    /// pins are not both known yet produce no row. Redraw requests raised by
    /// the contributions during the pass are drained before the bound model is
    /// synced.
    pub fn update_paths(&mut self) {
        self.paths.clear();

        for link in &self.links {
            let Some(contribution) = self.contributions.get_mut(&link.id()) else {
                continue;
            };
            let from = self.host.port_position(link.start_pin_id());
            let to = self.host.port_position(link.end_pin_id());
            let (Some(from), Some(to)) = (from, to) else {
                continue;
            };

            contribution.update(Endpoint::from(from), Endpoint::from(to));
            self.paths.push(LinkPathData {
                id: link.id(),
                path_commands: contribution.path(),
                color: link.color(),
                line_width: link.line_width(),
            });
        }

        let redrawn = self.host.take_redraw_requests();
        tracing::trace!(links = self.links.len(), redrawn = redrawn.len(), "link paths updated");

        // Auto-sync to bound model if present
        if let Some(syncer) = &self.syncer {
            syncer.sync(&self.paths);
        }
    }

    /// Find the link whose bounds are closest to `pos`, within `hover_distance`.
    ///
    /// Returns -1 if none.
    pub fn find_link_at(&self, pos: Point, hover_distance: f32) -> i32 {
        hit_test::find_link_at(pos, self.contribution_iter(), hover_distance)
    }

    /// Like [`find_link_at`](Self::find_link_at) but measured along each link's route.
    pub fn find_route_at(&self, pos: Point, hover_distance: f32) -> i32 {
        hit_test::find_route_at(pos, self.contribution_iter(), hover_distance)
    }

    fn contribution_iter(&self) -> impl Iterator<Item = (i32, &dyn LineRenderContribution)> + '_ {
        self.links
            .iter()
            .filter_map(|link| Some((link.id(), self.contributions.get(&link.id())?.as_ref())))
    }
}

impl<L> LineRenderRegistry for LinkManager<L>
where
    L: LinkModel,
{
    fn register_contribution(&mut self, line_type: LineType, factory: ContributionFactory) {
        self.factories.insert(line_type, factory);
    }

    fn resync_contributions(&mut self, line_type: LineType) -> usize {
        let ids: Vec<i32> = self
            .links
            .iter()
            .filter(|link| link.line_type() == line_type)
            .map(|link| link.id())
            .collect();

        for &id in &ids {
            if let Some(link) = self.find(id) {
                let contribution = self.create_contribution(link);
                self.contributions.insert(id, contribution);
            }
        }

        if !ids.is_empty() {
            self.update_paths();
        }
        ids.len()
    }
}

//! Registration of node-avoiding routing with a host's line registry.

use std::rc::Rc;

use crate::contribution::{LineContribution, LineRenderContribution};
use crate::diagnostics::DiagnosticsHook;
use crate::host::{ContributionFactory, DiagramHost, LineEntity, LineRenderRegistry, LineType};
use crate::options::RoutingOptions;

/// Entry point that makes every line of a diagram route around nodes.
///
/// # Example
///
/// ```ignore
/// let mut links = LinkManager::new(host);
/// SmartLinesPlugin::new(RoutingOptions::default()).register(&mut links);
/// ```
#[derive(Clone, Default)]
pub struct SmartLinesPlugin {
    options: RoutingOptions,
    diagnostics: Option<DiagnosticsHook>,
}

impl SmartLinesPlugin {
    pub fn new(options: RoutingOptions) -> Self {
        Self {
            options: options.validated(),
            diagnostics: None,
        }
    }

    /// Report every computed route to `hook`.
    pub fn with_diagnostics(mut self, hook: DiagnosticsHook) -> Self {
        self.diagnostics = Some(hook);
        self
    }

    pub fn options(&self) -> &RoutingOptions {
        &self.options
    }

    /// Factory creating a [`LineContribution`] with this plugin's settings.
    pub fn factory(&self) -> ContributionFactory {
        let options = self.options;
        let diagnostics = self.diagnostics.clone();
        Rc::new(move |entity: &LineEntity, host: Rc<dyn DiagramHost>| {
            Box::new(LineContribution::new(*entity, host, options).with_diagnostics(diagnostics.clone()))
                as Box<dyn LineRenderContribution>
        })
    }

    /// Replace the host's default line style with routed lines.
    ///
    /// Lines that already exist are resynced so they pick up the new
    /// contribution. Returns how many were.
    pub fn register<R: LineRenderRegistry + ?Sized>(&self, registry: &mut R) -> usize {
        registry.register_contribution(LineType::Bezier, self.factory());
        let resynced = registry.resync_contributions(LineType::Bezier);
        tracing::debug!(
            resynced,
            grid_size = self.options.grid_size,
            node_padding = self.options.node_padding,
            "smart lines registered"
        );
        resynced
    }
}

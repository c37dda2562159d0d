//! Routing configuration shared by the plugin and every line it creates.

/// Default sampling resolution in diagram units.
pub const DEFAULT_GRID_SIZE: f32 = 20.0;
/// Default clearance around obstacles.
pub const DEFAULT_NODE_PADDING: f32 = 15.0;
/// Default rounding applied to interior corners of a rendered route.
pub const DEFAULT_CORNER_RADIUS: f32 = 5.0;

/// Caller-tunable routing parameters.
///
/// `grid_size` trades accuracy for speed: larger values give a coarser grid
/// that is cheaper to search, which is what keeps recomputation inside a UI
/// frame on larger diagrams. `node_padding` inflates every obstacle before
/// walkability testing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RoutingOptions {
    pub grid_size: f32,
    pub node_padding: f32,
    pub corner_radius: f32,
    /// Emit a debug event for every computed route.
    pub enable_logging: bool,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            node_padding: DEFAULT_NODE_PADDING,
            corner_radius: DEFAULT_CORNER_RADIUS,
            enable_logging: false,
        }
    }
}

impl RoutingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid_size(mut self, grid_size: f32) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_node_padding(mut self, node_padding: f32) -> Self {
        self.node_padding = node_padding;
        self
    }

    pub fn with_corner_radius(mut self, corner_radius: f32) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Replace out-of-range values with their defaults.
    ///
    /// `grid_size` must be positive, padding and radius non-negative, all finite.
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, fallback: f32, positive: bool| {
            let ok = value.is_finite() && if positive { value > 0.0 } else { value >= 0.0 };
            if ok {
                value
            } else {
                tracing::debug!(value, fallback, "invalid routing option replaced by default");
                fallback
            }
        };
        Self {
            grid_size: pick(self.grid_size, defaults.grid_size, true),
            node_padding: pick(self.node_padding, defaults.node_padding, false),
            corner_radius: pick(self.corner_radius, defaults.corner_radius, false),
            enable_logging: self.enable_logging,
        }
    }
}

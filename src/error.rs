use thiserror::Error;

/// Reasons a routing stage could not produce a routed path.
///
/// None of these reach the host: the public entry points turn every variant
/// into a direct line between the best known endpoints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    #[error("grid size must be a positive finite number, got {0}")]
    InvalidGridSize(f32),
    #[error("non-finite coordinate in routing input")]
    NonFiniteInput,
    #[error("grid of {rows}x{cols} cells exceeds the limit of {limit}")]
    GridTooLarge { rows: usize, cols: usize, limit: usize },
    #[error("grid has no cells to search")]
    EmptyGrid,
    #[error("no walkable cell near {0:?}")]
    NoWalkableCell(crate::geometry::Point),
    #[error("no route between start and goal at this resolution")]
    NoPath,
}

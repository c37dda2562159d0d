//! Resolution of whatever the host passes as a line endpoint into a [`Point`].
//!
//! Hosts hand over either plain coordinates or a richer handle (a port or node
//! object) whose position has to be dug out of bounds, a transform or one of
//! several position fields. Any of those may be missing; a missing or
//! non-finite number resolves to 0 so nothing invalid reaches rendering.

use crate::geometry::Point;

/// Partially known coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawPoint {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl RawPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x: Some(x), y: Some(y) }
    }

    fn x(&self) -> Option<f32> {
        finite(self.x)
    }

    fn y(&self) -> Option<f32> {
        finite(self.y)
    }

    fn both(&self) -> Option<Point> {
        Some(Point::new(self.x()?, self.y()?))
    }
}

/// Partially known bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawBounds {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl RawBounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Centre of the box, if its origin is known. Missing sizes count as 0.
    fn center(&self) -> Option<Point> {
        let x = finite(self.x)?;
        let y = finite(self.y)?;
        let w = finite(self.width).unwrap_or(0.0);
        let h = finite(self.height).unwrap_or(0.0);
        Some(Point::new(x + w / 2.0, y + h / 2.0))
    }
}

/// A host object that carries its position somewhere inside it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct EndpointHandle {
    pub bounds: Option<RawBounds>,
    pub transform: Option<RawPoint>,
    pub position: Option<RawPoint>,
    pub absolute_position: Option<RawPoint>,
    pub x: Option<f32>,
    pub y: Option<f32>,
}

/// What the host passes to `update` for each end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Endpoint {
    Point(Point),
    Handle(EndpointHandle),
    #[default]
    Unknown,
}

impl Endpoint {
    /// Resolve to a finite point.
    ///
    /// Order: plain point, bounds centre, transform, then per axis the first of
    /// `x`, `position`, `absolute_position`, falling back to 0.
    pub fn resolve(&self) -> Point {
        match self {
            Endpoint::Point(p) => Point::new(
                finite(Some(p.x)).unwrap_or(0.0),
                finite(Some(p.y)).unwrap_or(0.0),
            ),
            Endpoint::Handle(handle) => handle.resolve(),
            Endpoint::Unknown => Point::ORIGIN,
        }
    }
}

impl EndpointHandle {
    pub fn resolve(&self) -> Point {
        if let Some(center) = self.bounds.as_ref().and_then(RawBounds::center) {
            return center;
        }
        if let Some(p) = self.transform.as_ref().and_then(RawPoint::both) {
            return p;
        }
        let x = finite(self.x)
            .or_else(|| self.position.as_ref().and_then(RawPoint::x))
            .or_else(|| self.absolute_position.as_ref().and_then(RawPoint::x))
            .unwrap_or(0.0);
        let y = finite(self.y)
            .or_else(|| self.position.as_ref().and_then(RawPoint::y))
            .or_else(|| self.absolute_position.as_ref().and_then(RawPoint::y))
            .unwrap_or(0.0);
        Point::new(x, y)
    }
}

impl From<Point> for Endpoint {
    fn from(p: Point) -> Self {
        Endpoint::Point(p)
    }
}

impl From<(f32, f32)> for Endpoint {
    fn from(p: (f32, f32)) -> Self {
        Endpoint::Point(p.into())
    }
}

impl From<EndpointHandle> for Endpoint {
    fn from(handle: EndpointHandle) -> Self {
        Endpoint::Handle(handle)
    }
}

impl<T: Into<Endpoint>> From<Option<T>> for Endpoint {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

fn finite(v: Option<f32>) -> Option<f32> {
    v.filter(|v| v.is_finite())
}

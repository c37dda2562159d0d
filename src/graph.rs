use crate::host::LineType;
use slint::Color;

/// Default stroke width for links.
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Trait for link data to support routing and rendering operations.
///
/// Implement this trait for your link data type to use with [`LinkManager`].
///
/// # Example
///
/// ```ignore
/// struct MyLink {
///     id: i32,
///     from: i32,
///     to: i32,
///     color: Color,
///     label: String,  // custom field
/// }
///
/// impl LinkModel for MyLink {
///     fn id(&self) -> i32 { self.id }
///     fn start_pin_id(&self) -> i32 { self.from }
///     fn end_pin_id(&self) -> i32 { self.to }
///     fn color(&self) -> Color { self.color }
/// }
/// ```
///
/// [`LinkManager`]: crate::links::LinkManager
pub trait LinkModel {
    /// Unique identifier for the link
    fn id(&self) -> i32;
    /// Pin ID where the link starts (typically an output pin)
    fn start_pin_id(&self) -> i32;
    /// Pin ID where the link ends (typically an input pin)
    fn end_pin_id(&self) -> i32;
    /// Color for rendering the link (default: white)
    fn color(&self) -> Color {
        Color::from_rgb_u8(255, 255, 255)
    }
    /// Stroke width for rendering the link
    fn line_width(&self) -> f32 {
        DEFAULT_LINE_WIDTH
    }
    /// Style the link is drawn with; selects the contribution that renders it
    fn line_type(&self) -> LineType {
        LineType::Bezier
    }
}

/// Simple link data structure implementing [`LinkModel`].
///
/// Use this for basic link storage, or implement [`LinkModel`] on your own
/// type if you need additional fields.
#[derive(Clone, Debug)]
pub struct SimpleLink {
    pub id: i32,
    pub start_pin_id: i32,
    pub end_pin_id: i32,
    pub color: Color,
    pub line_width: f32,
    pub line_type: LineType,
}

impl SimpleLink {
    /// Create a new link with the specified endpoints and color.
    pub fn new(id: i32, start_pin_id: i32, end_pin_id: i32, color: Color) -> Self {
        Self {
            id,
            start_pin_id,
            end_pin_id,
            color,
            line_width: DEFAULT_LINE_WIDTH,
            line_type: LineType::Bezier,
        }
    }

    /// Create a new link with default white color.
    pub fn with_default_color(id: i32, start_pin_id: i32, end_pin_id: i32) -> Self {
        Self::new(id, start_pin_id, end_pin_id, Color::from_rgb_u8(255, 255, 255))
    }

    /// Create a new link with a custom stroke width.
    pub fn with_line_width(id: i32, start_pin_id: i32, end_pin_id: i32, color: Color, line_width: f32) -> Self {
        Self { line_width, ..Self::new(id, start_pin_id, end_pin_id, color) }
    }

    /// Change the style the link is drawn with.
    pub fn of_type(mut self, line_type: LineType) -> Self {
        self.line_type = line_type;
        self
    }
}

impl LinkModel for SimpleLink {
    fn id(&self) -> i32 { self.id }
    fn start_pin_id(&self) -> i32 { self.start_pin_id }
    fn end_pin_id(&self) -> i32 { self.end_pin_id }
    fn color(&self) -> Color { self.color }
    fn line_width(&self) -> f32 { self.line_width }
    fn line_type(&self) -> LineType { self.line_type }
}

//! Post-processing of routed polylines and SVG path generation.

use crate::geometry::Point;

/// Remove every interior point that is collinear with its neighbours.
///
/// A point is dropped when the cross product of the incoming and outgoing
/// vectors is zero, which also removes duplicate points and back-tracking
/// spikes. The first and last points are always kept, and running the result
/// through again changes nothing.
pub fn simplify_path(path: &[Point]) -> Vec<Point> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut kept: Vec<Point> = Vec::with_capacity(path.len());
    for &point in path {
        while kept.len() >= 2 && is_collinear(kept[kept.len() - 2], kept[kept.len() - 1], point) {
            kept.pop();
        }
        kept.push(point);
    }
    kept
}

fn is_collinear(prev: Point, cur: Point, next: Point) -> bool {
    let dx1 = cur.x - prev.x;
    let dy1 = cur.y - prev.y;
    let dx2 = next.x - cur.x;
    let dy2 = next.y - cur.y;
    dx1 * dy2 == dy1 * dx2
}

/// Generate SVG path commands for a polyline.
///
/// With `corner_radius == 0` the result is one `M` followed by one `L` per
/// remaining point. With a positive radius every interior vertex is replaced
/// by a quadratic curve through it; the trim on each side is capped at half of
/// the adjacent segment so neighbouring corners never overlap.
///
/// # Arguments
/// * `path` - Points in drawing order
/// * `corner_radius` - Rounding applied to interior corners
///
/// # Returns
/// SVG path command string (e.g., "M 0 0 L 40 0 Q 50 0 50 10 L 50 60"),
/// empty for fewer than two points.
pub fn path_to_svg(path: &[Point], corner_radius: f32) -> String {
    if path.len() < 2 {
        return String::new();
    }

    let mut commands = vec![format!("M {} {}", path[0].x, path[0].y)];

    if corner_radius <= 0.0 || !corner_radius.is_finite() {
        commands.extend(path[1..].iter().map(|p| format!("L {} {}", p.x, p.y)));
        return commands.join(" ");
    }

    for i in 1..path.len() {
        let current = path[i];
        if i == path.len() - 1 {
            commands.push(format!("L {} {}", current.x, current.y));
            break;
        }

        let prev = path[i - 1];
        let next = path[i + 1];
        let (dx1, dy1) = (current.x - prev.x, current.y - prev.y);
        let (dx2, dy2) = (next.x - current.x, next.y - current.y);
        let len1 = (dx1 * dx1 + dy1 * dy1).sqrt();
        let len2 = (dx2 * dx2 + dy2 * dy2).sqrt();

        if len1 <= f32::EPSILON || len2 <= f32::EPSILON {
            commands.push(format!("L {} {}", current.x, current.y));
            continue;
        }

        let radius = corner_radius.min(len1 / 2.0).min(len2 / 2.0);
        let before = Point::new(current.x - dx1 / len1 * radius, current.y - dy1 / len1 * radius);
        let after = Point::new(current.x + dx2 / len2 * radius, current.y + dy2 / len2 * radius);

        commands.push(format!("L {} {}", before.x, before.y));
        commands.push(format!("Q {} {} {} {}", current.x, current.y, after.x, after.y));
    }

    commands.join(" ")
}

/// SVG path for a straight two-point line.
pub fn direct_path_svg(from: Point, to: Point) -> String {
    format!("M {} {} L {} {}", from.x, from.y, to.x, to.y)
}

/// Generate SVG path command for a bezier link between two points
///
/// Creates a horizontal-biased cubic bezier curve suitable for node connections.
/// Control points extend horizontally from start and end points. This is the
/// host's default curve style, used for lines no router has been registered for.
///
/// # Arguments
/// * `from` - Start point (pin center)
/// * `to` - End point (pin center)
/// * `min_offset` - Minimum control point offset (default: 50.0)
///
/// # Returns
/// SVG path command string (e.g., "M 10 20 C 60 20 90 80 140 80")
pub fn generate_bezier_path(from: Point, to: Point, min_offset: f32) -> String {
    // If distance is very small, use a straight line to avoid zig-zags
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx * dx + dy * dy < 100.0 {
        return direct_path_svg(from, to);
    }

    let offset = (dx.abs() * 0.5).max(min_offset);
    format!(
        "M {} {} C {} {} {} {} {} {}",
        from.x,
        from.y,
        from.x + offset,
        from.y,
        to.x - offset,
        to.y,
        to.x,
        to.y
    )
}

//! Routing scenarios: end-to-end behaviour of the pathfinding pipeline.

mod common;

use common::{assert_orthogonal, assert_waypoints_clear};
use rstest::rstest;
use slint_smart_links::{
    find_path, path_to_svg, route_line, simplify_path, try_find_path, Point, Rect, RouteError,
    RoutingOptions,
};

fn blocking_obstacle() -> Rect {
    // x in [50, 150], y in [-50, 50]
    Rect::new(50.0, -50.0, 100.0, 100.0)
}

fn count_commands(svg: &str, command: &str) -> usize {
    svg.split_whitespace().filter(|t| *t == command).count()
}

// ============================================================================
// Scenario A: nothing in the way
// ============================================================================

#[test]
fn test_scenario_a_direct_line() {
    let path = find_path(Point::new(0.0, 0.0), Point::new(200.0, 0.0), &[], 20.0, 15.0);
    assert_eq!(path, vec![Point::new(0.0, 0.0), Point::new(200.0, 0.0)]);
}

#[test]
fn test_scenario_a_rendered() {
    let trace = route_line(Point::new(0.0, 0.0), Point::new(200.0, 0.0), &[], &RoutingOptions::default());
    assert_eq!(trace.svg, "M 0 0 L 200 0");
    assert!(!trace.is_routed());
}

// ============================================================================
// Scenario B: one node between the endpoints
// ============================================================================

#[rstest]
#[case(10.0)]
#[case(20.0)]
#[case(25.0)]
fn test_scenario_b_detours_around_node(#[case] grid_size: f32) {
    let start = Point::new(0.0, 0.0);
    let goal = Point::new(200.0, 0.0);
    let obstacles = [blocking_obstacle()];

    let path = find_path(start, goal, &obstacles, grid_size, 0.0);

    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    assert!(
        path.iter()
            .any(|p| (50.0..=150.0).contains(&p.x) && (p.y < -50.0 || p.y > 50.0)),
        "no waypoint passes the node: {:?}",
        path
    );
    assert_orthogonal(&path);
}

#[test]
fn test_scenario_b_rendered_with_rounded_corners() {
    let options = RoutingOptions::new().with_node_padding(0.0).with_corner_radius(5.0);
    let trace = route_line(Point::new(0.0, 0.0), Point::new(200.0, 0.0), &[blocking_obstacle()], &options);

    assert!(trace.is_routed());
    assert!(trace.simplified.len() >= 4);
    assert!(trace.svg.starts_with("M 0 0 "));
    assert!(trace.svg.ends_with(" L 200 0"));
    assert!(count_commands(&trace.svg, "Q") >= 2);
    assert!(!trace.svg.contains("NaN"));
}

// ============================================================================
// Scenario C: goal cannot be reached
// ============================================================================

#[test]
fn test_scenario_c_walled_in_goal_falls_back() {
    let goal = Point::new(200.0, 0.0);
    let walls = [
        Rect::new(160.0, -40.0, 80.0, 10.0),
        Rect::new(160.0, 30.0, 80.0, 10.0),
        Rect::new(160.0, -40.0, 10.0, 80.0),
        Rect::new(230.0, -40.0, 10.0, 80.0),
    ];

    assert_eq!(try_find_path(Point::ORIGIN, goal, &walls, 10.0, 0.0), Err(RouteError::NoPath));

    let options = RoutingOptions::new().with_grid_size(10.0).with_node_padding(0.0);
    let trace = route_line(Point::ORIGIN, goal, &walls, &options);
    assert_eq!(trace.raw, vec![Point::ORIGIN, goal]);
    assert_eq!(trace.svg, "M 0 0 L 200 0");
}

#[test]
fn test_scenario_c_oversized_grid_falls_back() {
    let start = Point::ORIGIN;
    let goal = Point::new(100_000.0, 100_000.0);
    let obstacles = [Rect::new(10.0, 10.0, 10.0, 10.0)];

    let err = try_find_path(start, goal, &obstacles, 1.0, 0.0).unwrap_err();
    assert!(matches!(err, RouteError::GridTooLarge { .. }));
    assert_eq!(find_path(start, goal, &obstacles, 1.0, 0.0), vec![start, goal]);
}

// ============================================================================
// Scenario D: endpoint inside a node
// ============================================================================

#[test]
fn test_scenario_d_start_inside_obstacle() {
    let obstacles = [Rect::new(-30.0, -30.0, 60.0, 60.0), Rect::new(100.0, -100.0, 20.0, 200.0)];
    let start = Point::ORIGIN;
    let goal = Point::new(200.0, 0.0);

    let path = try_find_path(start, goal, &obstacles, 20.0, 0.0).expect("route exists");

    assert_eq!(path[0], start);
    assert_eq!(path[path.len() - 1], goal);
    assert!(!obstacles[0].contains(path[1]));
    assert_waypoints_clear(&path, &obstacles, 0.0);
}

// ============================================================================
// Properties
// ============================================================================

#[rstest]
#[case(vec![Rect::new(50.0, -50.0, 100.0, 100.0)], 0.0)]
#[case(vec![Rect::new(50.0, -50.0, 100.0, 100.0)], 15.0)]
#[case(vec![Rect::new(60.0, -80.0, 40.0, 120.0), Rect::new(120.0, -20.0, 40.0, 140.0)], 5.0)]
#[case(vec![Rect::new(-40.0, 60.0, 300.0, 40.0), Rect::new(80.0, -30.0, 30.0, 60.0)], 10.0)]
fn test_waypoints_stay_clear_of_padded_obstacles(#[case] obstacles: Vec<Rect>, #[case] padding: f32) {
    let start = Point::ORIGIN;
    let goal = Point::new(200.0, 0.0);

    let raw = find_path(start, goal, &obstacles, 20.0, padding);
    let simplified = simplify_path(&raw);

    assert_waypoints_clear(&raw, &obstacles, padding);
    assert_waypoints_clear(&simplified, &obstacles, padding);
    assert_orthogonal(&raw);
}

#[rstest]
#[case(Point::new(0.0, 0.0), Point::new(200.0, 0.0))]
#[case(Point::new(10.0, -70.0), Point::new(190.0, 65.0))]
#[case(Point::new(200.0, 0.0), Point::new(0.0, 0.0))]
fn test_simplify_is_idempotent_on_routes(#[case] start: Point, #[case] goal: Point) {
    let raw = find_path(start, goal, &[blocking_obstacle()], 20.0, 5.0);
    let once = simplify_path(&raw);

    assert_eq!(simplify_path(&once), once);
    assert_eq!(once.first(), raw.first());
    assert_eq!(once.last(), raw.last());
}

#[test]
fn test_svg_without_radius_has_one_line_per_segment() {
    let raw = find_path(Point::ORIGIN, Point::new(200.0, 0.0), &[blocking_obstacle()], 20.0, 0.0);
    let svg = path_to_svg(&raw, 0.0);

    assert_eq!(count_commands(&svg, "M"), 1);
    assert_eq!(count_commands(&svg, "L"), raw.len() - 1);
}

#[test]
fn test_routing_is_deterministic() {
    let obstacles = [
        blocking_obstacle(),
        Rect::new(-40.0, 80.0, 300.0, 40.0),
        Rect::new(170.0, -120.0, 20.0, 90.0),
    ];
    let options = RoutingOptions::default();
    let first = route_line(Point::ORIGIN, Point::new(220.0, 20.0), &obstacles, &options);

    for _ in 0..5 {
        let again = route_line(Point::ORIGIN, Point::new(220.0, 20.0), &obstacles, &options);
        assert_eq!(again, first);
    }
}

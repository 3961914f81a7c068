use skyraid::geometry::*;

// ── within_bounds ─────────────────────────────────────────────────────────────

#[test]
fn within_bounds_fully_inside() {
    let r = Rect::new(50.0, 50.0, 20.0, 20.0);
    assert_eq!(within_bounds(100.0, 100.0, &r), (true, true));
}

#[test]
fn within_bounds_left_overhang() {
    let r = Rect::new(5.0, 50.0, 20.0, 20.0); // left = -5
    assert_eq!(within_bounds(100.0, 100.0, &r), (false, true));
}

#[test]
fn within_bounds_bottom_overhang() {
    let r = Rect::new(50.0, 95.0, 20.0, 20.0); // bottom = 105
    assert_eq!(within_bounds(100.0, 100.0, &r), (true, false));
}

#[test]
fn within_bounds_edge_touch_is_inside() {
    // Box exactly flush with the arena edge counts as inside
    let r = Rect::new(10.0, 10.0, 20.0, 20.0); // left = 0, top = 0
    assert_eq!(within_bounds(100.0, 100.0, &r), (true, true));
}

#[test]
fn within_bounds_both_violated() {
    let r = Rect::new(-50.0, 150.0, 20.0, 20.0);
    assert_eq!(within_bounds(100.0, 100.0, &r), (false, false));
}

// ── fully_outside ─────────────────────────────────────────────────────────────

#[test]
fn fully_outside_requires_complete_exit() {
    // Straddling the edge is not outside
    let straddling = Rect::new(100.0, 50.0, 20.0, 20.0); // spans 90..110
    assert!(!fully_outside(100.0, 100.0, &straddling));

    let gone = Rect::new(111.0, 50.0, 20.0, 20.0); // left = 101
    assert!(fully_outside(100.0, 100.0, &gone));
}

#[test]
fn fully_outside_above_arena() {
    let r = Rect::new(50.0, -30.0, 20.0, 20.0); // bottom = -20
    assert!(fully_outside(100.0, 100.0, &r));
}

// ── overlaps ──────────────────────────────────────────────────────────────────

#[test]
fn overlaps_symmetric() {
    let a = Rect::new(50.0, 50.0, 40.0, 40.0);
    let b = Rect::new(70.0, 70.0, 40.0, 40.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn overlaps_disjoint() {
    let a = Rect::new(50.0, 50.0, 40.0, 40.0);
    let b = Rect::new(200.0, 50.0, 40.0, 40.0);
    assert!(!a.overlaps(&b));
}

#[test]
fn overlaps_touching_edges() {
    // Closed-interval test: exactly touching edges count as overlap
    let a = Rect::new(50.0, 50.0, 40.0, 40.0); // right = 70
    let b = Rect::new(90.0, 50.0, 40.0, 40.0); // left = 70
    assert!(a.overlaps(&b));
}

// ── direction ─────────────────────────────────────────────────────────────────

#[test]
fn direction_is_unit_length() {
    let from = Rect::new(0.0, 0.0, 10.0, 10.0);
    let to = Rect::new(30.0, 40.0, 10.0, 10.0);
    let d = direction(&from, &to);
    assert!((d.length() - 1.0).abs() < 1e-6);
    assert!((d.x - 0.6).abs() < 1e-6);
    assert!((d.y - 0.8).abs() < 1e-6);
}

#[test]
fn direction_axis_aligned() {
    let from = Rect::new(10.0, 10.0, 4.0, 4.0);
    let to = Rect::new(10.0, 90.0, 4.0, 4.0);
    let d = direction(&from, &to);
    assert_eq!(d, Vec2::new(0.0, 1.0));
}

#[test]
fn direction_reverses_with_arguments() {
    let a = Rect::new(0.0, 0.0, 2.0, 2.0);
    let b = Rect::new(50.0, 0.0, 2.0, 2.0);
    assert_eq!(direction(&a, &b), Vec2::new(1.0, 0.0));
    assert_eq!(direction(&b, &a), Vec2::new(-1.0, 0.0));
}

use super::*;
use std::f64::consts::FRAC_PI_2;

const EPS: f64 = 1e-9;

#[test]
fn identity_multiply() {
    let t = Transform3d::from_translation(1.0, 2.0, 3.0);
    assert_eq!(Transform3d::IDENTITY * t, t);
    assert_eq!(t * Transform3d::IDENTITY, t);
}

#[test]
fn translation_composition() {
    let a = Transform3d::from_translation(1.0, 0.0, 0.0);
    let b = Transform3d::from_translation(0.0, 2.0, 0.0);
    assert_eq!((a * b).col(3), [1.0, 2.0, 0.0, 1.0]);
}

#[test]
fn rotation_y_quarter_turn_moves_x_into_depth() {
    let r = Transform3d::from_rotation_y(FRAC_PI_2);
    let [x, y, z, w] = r.transform_point(1.0, 0.0, 0.0);
    assert!(x.abs() < EPS);
    assert!(y.abs() < EPS);
    assert!((z + 1.0).abs() < EPS);
    assert_eq!(w, 1.0);
}

#[test]
fn rotation_x_keeps_x_axis_fixed() {
    let r = Transform3d::from_rotation_x(0.7);
    let p = r.transform_point(5.0, 0.0, 0.0);
    assert!((p[0] - 5.0).abs() < EPS);
    assert!(p[1].abs() < EPS && p[2].abs() < EPS);
}

#[test]
fn perspective_shrinks_points_behind_the_plane() {
    let p = Transform3d::perspective(800.0);
    assert_eq!(p.col(2)[3], -1.0 / 800.0);

    let flat = p.project_point(100.0, 50.0, 0.0);
    assert_eq!(flat, [100.0, 50.0, 0.0]);

    let behind = p.project_point(100.0, 50.0, -800.0);
    assert!((behind[0] - 50.0).abs() < EPS);
    assert!((behind[1] - 25.0).abs() < EPS);
}

#[test]
fn finite_detection() {
    assert!(Transform3d::IDENTITY.is_finite());
    let mut t = Transform3d::IDENTITY;
    t.cols[0][3] = f64::INFINITY;
    assert!(!t.is_finite());
}

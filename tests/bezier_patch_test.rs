use cgmath::{InnerSpace, Vector3};
use moving_sphere_box::geometry::bezier::{DEGREE, RationalTrianglePatch, bernstein};

use crate::common::test_utils::{assert_close, assert_vec_close};

mod common;

fn samples(n: usize) -> impl Iterator<Item = (f32, f32)> {
    (0..=n).flat_map(move |i| {
        (0..=(n - i)).map(move |j| (i as f32 / n as f32, j as f32 / n as f32))
    })
}

#[test]
fn patch_points_lie_on_the_unit_sphere() {
    let patch = RationalTrianglePatch::sphere_octant();
    for (u, v) in samples(20) {
        let p = patch.evaluate(u, v);
        assert_close(p.magnitude(), 1.0, 1e-5);
    }
}

#[test]
fn patch_stays_in_the_positive_octant() {
    let patch = RationalTrianglePatch::sphere_octant();
    for (u, v) in samples(20) {
        let p = patch.evaluate(u, v);
        assert!(p.x >= -1e-6 && p.y >= -1e-6 && p.z >= -1e-6, "{:?} at ({}, {})", p, u, v);
    }
}

#[test]
fn patch_corners_interpolate_corner_control_points() {
    let patch = RationalTrianglePatch::sphere_octant();
    assert_vec_close(patch.evaluate(0.0, 0.0), Vector3::new(0.0, 0.0, 1.0), 1e-6);
    assert_vec_close(patch.evaluate(1.0, 0.0), Vector3::new(1.0, 0.0, 0.0), 1e-6);
    assert_vec_close(patch.evaluate(0.0, 1.0), Vector3::new(0.0, 1.0, 0.0), 1e-6);

    assert_vec_close(patch.control(0, 0), patch.evaluate(0.0, 0.0), 1e-6);
    assert_vec_close(patch.control(DEGREE, 0), patch.evaluate(1.0, 0.0), 1e-6);
    assert_vec_close(patch.control(0, DEGREE), patch.evaluate(0.0, 1.0), 1e-6);
}

#[test]
fn patch_boundaries_lie_on_coordinate_planes() {
    let patch = RationalTrianglePatch::sphere_octant();
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        assert_close(patch.evaluate(t, 0.0).y, 0.0, 1e-6);
        assert_close(patch.evaluate(0.0, t).x, 0.0, 1e-6);
        assert_close(patch.evaluate(t, 1.0 - t).z, 0.0, 1e-5);
    }
}

#[test]
fn patch_weights_are_symmetric() {
    let patch = RationalTrianglePatch::sphere_octant();
    for i in 0..=DEGREE {
        for j in 0..=(DEGREE - i) {
            assert_close(patch.weight(i, j), patch.weight(j, i), 1e-6);
            assert!(patch.weight(i, j) > 0.0);
        }
    }
}

#[test]
fn bernstein_basis_is_a_partition_of_unity() {
    for (u, v) in samples(7) {
        let w = 1.0 - u - v;
        let sum: f32 = (0..=DEGREE)
            .flat_map(|i| (0..=(DEGREE - i)).map(move |j| (i, j)))
            .map(|(i, j)| bernstein(i, j, u, v, w))
            .sum();
        assert_close(sum, 1.0, 1e-5);
    }
}

#[test]
fn bernstein_outside_the_triangle_is_zero() {
    assert_eq!(bernstein(3, 2, 0.2, 0.3, 0.5), 0.0);
    assert_eq!(bernstein(0, 5, 0.2, 0.3, 0.5), 0.0);
}

#[test]
fn bernstein_matches_the_multinomial_formula() {
    // 4! / (1! 2! 1!) = 12
    let (u, v, w) = (0.2, 0.3, 0.5);
    assert_close(bernstein(1, 2, u, v, w), 12.0 * u * v * v * w, 1e-6);
    assert_close(bernstein(4, 0, u, v, w), u.powi(4), 1e-7);
}

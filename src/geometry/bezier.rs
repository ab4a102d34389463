//! Rational Bezier triangle patches.
//!
//! A degree-4 patch is defined over the triangle `u, v, w >= 0`, `u + v + w = 1`.
//! Control points are addressed by the exponents of `u` and `v`; the exponent of
//! `w` is implied by `4 - i - j`.
//!
//! [`RationalTrianglePatch::sphere_octant`] builds the weighted control net whose
//! image is exactly the unit sphere octant `x, y, z >= 0`. Placing eight copies of
//! it at the corners of a box gives the rounded corners of a box/sphere Minkowski sum.

use cgmath::{Vector3, Zero};

/// Degree of the patch.
pub const DEGREE: usize = 4;

const FACTORIAL: [f32; DEGREE + 1] = [1.0, 1.0, 2.0, 6.0, 24.0];

/// Bernstein polynomial of degree 4 over the triangle.
///
/// `i` and `j` are the exponents of `u` and `v`, the exponent of `w` is `4 - i - j`.
/// Returns zero for exponent pairs outside the triangle.
pub fn bernstein(i: usize, j: usize, u: f32, v: f32, w: f32) -> f32 {
    if i + j > DEGREE {
        return 0.0;
    }
    let k = DEGREE - i - j;
    let coefficient = FACTORIAL[DEGREE] / (FACTORIAL[i] * FACTORIAL[j] * FACTORIAL[k]);
    coefficient * u.powi(i as i32) * v.powi(j as i32) * w.powi(k as i32)
}

/// A weighted degree-4 Bezier triangle.
///
/// Only entries with `i + j <= 4` are meaningful; the rest of the square tables
/// stay zero and are never read.
#[derive(Clone, Debug)]
pub struct RationalTrianglePatch {
    control: [[Vector3<f32>; DEGREE + 1]; DEGREE + 1],
    weight: [[f32; DEGREE + 1]; DEGREE + 1],
}

impl RationalTrianglePatch {
    pub fn new(
        control: [[Vector3<f32>; DEGREE + 1]; DEGREE + 1],
        weight: [[f32; DEGREE + 1]; DEGREE + 1],
    ) -> Self {
        Self { control, weight }
    }

    /// Control net of the unit sphere octant.
    pub fn sphere_octant() -> Self {
        let sqrt2 = 2.0_f32.sqrt();
        let sqrt3 = 3.0_f32.sqrt();
        let a0 = (sqrt3 - 1.0) / sqrt3;
        let a1 = (sqrt3 + 1.0) / (2.0 * sqrt3);
        let a2 = 1.0 - (5.0 - sqrt2) * (7.0 - sqrt3) / 46.0;
        let b0 = 4.0 * sqrt3 * (sqrt3 - 1.0);
        let b1 = 3.0 * sqrt2;
        let b2 = 4.0;
        let b3 = sqrt2 * (3.0 + 2.0 * sqrt2 - sqrt3) / sqrt3;

        let p = Vector3::new;
        let o = Vector3::zero();
        let control = [
            [p(0.0, 0.0, 1.0), p(0.0, a0, 1.0), p(0.0, a1, a1), p(0.0, 1.0, a0), p(0.0, 1.0, 0.0)],
            [p(a0, 0.0, 1.0), p(a2, a2, 1.0), p(a2, 1.0, a2), p(a0, 1.0, 0.0), o],
            [p(a1, 0.0, a1), p(1.0, a2, a2), p(a1, a1, 0.0), o, o],
            [p(1.0, 0.0, a0), p(1.0, a0, 0.0), o, o, o],
            [p(1.0, 0.0, 0.0), o, o, o, o],
        ];
        let weight = [
            [b0, b1, b2, b1, b0],
            [b1, b3, b3, b1, 0.0],
            [b2, b3, b2, 0.0, 0.0],
            [b1, b1, 0.0, 0.0, 0.0],
            [b0, 0.0, 0.0, 0.0, 0.0],
        ];
        Self::new(control, weight)
    }

    /// Control point for exponents `(i, j)`.
    pub fn control(&self, i: usize, j: usize) -> Vector3<f32> {
        self.control[i][j]
    }

    pub fn weight(&self, i: usize, j: usize) -> f32 {
        self.weight[i][j]
    }

    /// Evaluates the patch at barycentric `(u, v, 1 - u - v)`.
    pub fn evaluate(&self, u: f32, v: f32) -> Vector3<f32> {
        let w = 1.0 - u - v;
        let mut numer = Vector3::zero();
        let mut denom = 0.0;
        for i in 0..=DEGREE {
            for j in 0..=(DEGREE - i) {
                let product = self.weight[i][j] * bernstein(i, j, u, v, w);
                numer += self.control[i][j] * product;
                denom += product;
            }
        }
        numer / denom
    }
}

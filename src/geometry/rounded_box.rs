//! Placement of the vertex, edge and face features of a rounded box.
//!
//! A rounded box is the set of points within `sphere.radius` of an aligned box.
//! Its boundary splits into 8 sphere octants at the corners, 12 quarter cylinders
//! along the edges and 6 rectangles parallel to the faces. Each feature reuses one
//! canonical mesh:
//!
//! - vertices: the sphere octant `x, y, z >= 0` (outward direction `(1, 1, 1)`)
//! - edges: the quarter cylinder around `z` in the quadrant `x, y >= 0`
//!   (outward direction `(1, 1, 0)`, length 2 along `z`)
//! - faces: the unit rectangle on `z = 0` (outward direction `(0, 0, 1)`)
//!
//! and is moved into place by a rotation, a non-uniform scale and a translation.

use std::f32::consts::FRAC_1_SQRT_2;

use cgmath::{InnerSpace, Quaternion, Vector3};

use crate::geometry::primitives::{AlignedBox3, Sphere3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureKind {
    Vertex,
    Edge,
    Face,
}

impl FeatureKind {
    /// Outward direction of the canonical mesh of this kind.
    pub fn canonical_direction(&self) -> Vector3<f32> {
        match self {
            FeatureKind::Vertex => Vector3::new(1.0, 1.0, 1.0),
            FeatureKind::Edge => Vector3::new(1.0, 1.0, 0.0),
            FeatureKind::Face => Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

/// Local transform and appearance of one feature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Feature {
    pub kind: FeatureKind,
    pub center: Vector3<f32>,
    pub orientation: Quaternion<f32>,
    pub scale: Vector3<f32>,
    pub color: [f32; 4],
    /// Sign pattern of the region the feature covers, e.g. `(1, -1, 0)` for an edge.
    pub normal: Vector3<f32>,
}

#[derive(Clone, Debug)]
pub struct RoundedBox {
    pub aligned_box: AlignedBox3,
    pub sphere: Sphere3,
    pub alpha: f32,
    pub vertices: [Feature; 8],
    pub edges: [Feature; 12],
    pub faces: [Feature; 6],
}

/// Quaternion from `(x, y, z, w)` components.
fn xyzw(x: f32, y: f32, z: f32, w: f32) -> Quaternion<f32> {
    Quaternion::new(w, x, y, z)
}

fn vertex_orientations() -> [Quaternion<f32>; 8] {
    let h = FRAC_1_SQRT_2;
    [
        xyzw(h, 0.0, -h, 0.0),
        xyzw(0.5, -0.5, 0.5, -0.5),
        xyzw(0.0, 1.0, 0.0, 0.0),
        xyzw(0.0, h, 0.0, h),
        xyzw(0.0, 0.0, 1.0, 0.0),
        xyzw(0.0, 0.0, -h, h),
        xyzw(0.0, 0.0, h, h),
        xyzw(0.0, 0.0, 0.0, 1.0),
    ]
}

fn edge_orientations() -> [Quaternion<f32>; 12] {
    let h = FRAC_1_SQRT_2;
    [
        // parallel to z
        xyzw(0.0, 0.0, 1.0, 0.0),
        xyzw(0.0, 0.0, -h, h),
        xyzw(0.0, 0.0, h, h),
        xyzw(0.0, 0.0, 0.0, 1.0),
        // parallel to y
        xyzw(-0.5, 0.5, 0.5, 0.5),
        xyzw(-h, 0.0, 0.0, h),
        xyzw(0.5, -0.5, 0.5, 0.5),
        xyzw(h, 0.0, 0.0, h),
        // parallel to x
        xyzw(0.5, -0.5, 0.5, -0.5),
        xyzw(0.0, h, 0.0, h),
        xyzw(0.5, -0.5, -0.5, 0.5),
        xyzw(0.0, -h, 0.0, h),
    ]
}

fn face_orientations() -> [Quaternion<f32>; 6] {
    let h = FRAC_1_SQRT_2;
    [
        xyzw(1.0, 0.0, 0.0, 0.0),
        xyzw(0.0, 0.0, 0.0, 1.0),
        xyzw(h, 0.0, 0.0, h),
        xyzw(-h, 0.0, 0.0, h),
        xyzw(0.0, -h, 0.0, h),
        xyzw(0.0, h, 0.0, h),
    ]
}

fn vertex_signs() -> [Vector3<f32>; 8] {
    std::array::from_fn(|i| {
        let sign = |bit: usize| if i & (1 << bit) == 0 { -1.0 } else { 1.0 };
        Vector3::new(sign(0), sign(1), sign(2))
    })
}

fn edge_signs() -> [Vector3<f32>; 12] {
    let v = Vector3::new;
    [
        v(-1.0, -1.0, 0.0),
        v(1.0, -1.0, 0.0),
        v(-1.0, 1.0, 0.0),
        v(1.0, 1.0, 0.0),
        v(-1.0, 0.0, -1.0),
        v(1.0, 0.0, -1.0),
        v(-1.0, 0.0, 1.0),
        v(1.0, 0.0, 1.0),
        v(0.0, -1.0, -1.0),
        v(0.0, 1.0, -1.0),
        v(0.0, -1.0, 1.0),
        v(0.0, 1.0, 1.0),
    ]
}

fn face_signs() -> [Vector3<f32>; 6] {
    let v = Vector3::new;
    [
        v(0.0, 0.0, -1.0),
        v(0.0, 0.0, 1.0),
        v(0.0, -1.0, 0.0),
        v(0.0, 1.0, 0.0),
        v(-1.0, 0.0, 0.0),
        v(1.0, 0.0, 0.0),
    ]
}

fn vertex_color(index: usize, alpha: f32) -> [f32; 4] {
    match index {
        7 => [0.0, 1.0, 0.0, alpha],
        _ => [0.0, 0.5, 0.0, alpha],
    }
}

fn edge_color(index: usize, alpha: f32) -> [f32; 4] {
    match index / 4 {
        0 => [0.5, 0.0, 0.0, alpha],
        1 => [1.0, 0.5, 0.0, alpha],
        _ => [0.0, 0.25, 0.5, alpha],
    }
}

fn face_color(alpha: f32) -> [f32; 4] {
    [0.5, 0.0, 0.5, alpha]
}

/// Index of the world axis a rotated unit axis lines up with.
fn dominant_axis(direction: Vector3<f32>) -> usize {
    let a = [direction.x.abs(), direction.y.abs(), direction.z.abs()];
    if a[0] >= a[1] && a[0] >= a[2] {
        0
    } else if a[1] >= a[2] {
        1
    } else {
        2
    }
}

/// Box and radius the feature transforms are derived from.
struct Layout {
    aligned_box: AlignedBox3,
    radius: f32,
}

impl Layout {
    /// Builds the feature covering the region with sign pattern `signs`.
    ///
    /// Axes with a nonzero sign are rounded: the feature sits on the box boundary
    /// there (faces additionally pushed out by the radius). Axes with a zero sign are
    /// spanned by the feature, so the local axis mapped onto them is stretched to the
    /// box extent.
    fn feature(
        &self,
        kind: FeatureKind,
        signs: Vector3<f32>,
        orientation: Quaternion<f32>,
        color: [f32; 4],
    ) -> Feature {
        let extents = self.aligned_box.extents();
        let offset = match kind {
            FeatureKind::Face => self.radius,
            FeatureKind::Vertex | FeatureKind::Edge => 0.0,
        };
        let center = self.aligned_box.center()
            + Vector3::new(
                signs.x * (extents.x + offset),
                signs.y * (extents.y + offset),
                signs.z * (extents.z + offset),
            );

        let local_axes = [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()];
        let mut scale = Vector3::new(1.0, 1.0, 1.0);
        for (i, axis) in local_axes.into_iter().enumerate() {
            let world = dominant_axis(orientation * axis);
            if signs[world] == 0.0 {
                scale[i] = extents[world];
            }
        }

        Feature {
            kind,
            center,
            orientation,
            scale,
            color,
            normal: signs,
        }
    }
}

impl RoundedBox {
    pub fn new(aligned_box: AlignedBox3, sphere: Sphere3, alpha: f32) -> Self {
        let layout = Layout {
            aligned_box,
            radius: sphere.radius,
        };

        let (signs, orient) = (vertex_signs(), vertex_orientations());
        let vertices = std::array::from_fn(|i| {
            layout.feature(FeatureKind::Vertex, signs[i], orient[i], vertex_color(i, alpha))
        });
        let (signs, orient) = (edge_signs(), edge_orientations());
        let edges = std::array::from_fn(|i| {
            layout.feature(FeatureKind::Edge, signs[i], orient[i], edge_color(i, alpha))
        });
        let (signs, orient) = (face_signs(), face_orientations());
        let faces = std::array::from_fn(|i| {
            layout.feature(FeatureKind::Face, signs[i], orient[i], face_color(alpha))
        });

        Self {
            aligned_box,
            sphere,
            alpha,
            vertices,
            edges,
            faces,
        }
    }

    pub fn box_color(&self) -> [f32; 4] {
        [0.5, 0.5, 0.5, self.alpha]
    }

    /// All 26 features: vertices, then edges, then faces.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.vertices
            .iter()
            .chain(self.edges.iter())
            .chain(self.faces.iter())
    }

    /// Unit outward direction of a feature.
    pub fn unit_normal(feature: &Feature) -> Vector3<f32> {
        feature.normal.normalize()
    }
}

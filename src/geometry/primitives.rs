//! Box and sphere primitives the rounded box is built from.

use cgmath::{InnerSpace, Vector3};

/// An axis-aligned box given by its minimum and maximum corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlignedBox3 {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl AlignedBox3 {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Box centered at the origin spanning `[-extents, +extents]`.
    pub fn from_extents(extents: Vector3<f32>) -> Self {
        Self {
            min: -extents,
            max: extents,
        }
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Half sizes along each axis.
    pub fn extents(&self) -> Vector3<f32> {
        (self.max - self.min) * 0.5
    }

    /// Euclidean distance from `point` to the box, zero for points inside.
    pub fn distance(&self, point: Vector3<f32>) -> f32 {
        let d = point - self.center();
        let e = self.extents();
        let outside = Vector3::new(
            (d.x.abs() - e.x).max(0.0),
            (d.y.abs() - e.y).max(0.0),
            (d.z.abs() - e.z).max(0.0),
        );
        outside.magnitude()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere3 {
    pub center: Vector3<f32>,
    pub radius: f32,
}

impl Sphere3 {
    pub fn new(center: Vector3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Default for Sphere3 {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 0.0), 1.0)
    }
}

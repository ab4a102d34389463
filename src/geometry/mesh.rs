//! CPU-side mesh generation for the rounded box features.
//!
//! All meshes are triangle lists with counter-clockwise winding when seen from
//! the outside, so back-face culling removes the inner side of each feature.

use std::f32::consts::FRAC_PI_2;

use anyhow::ensure;
use cgmath::Vector3;

use crate::geometry::bezier::RationalTrianglePatch;

/// Positions and triangle indices ready to be uploaded to the GPU.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vector3<f32>; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.positions[t[0] as usize].into(),
                self.positions[t[1] as usize].into(),
                self.positions[t[2] as usize].into(),
            ]
        })
    }
}

/// Sphere octant tessellated from the rational Bezier patch.
///
/// Vertices use the square layout `iu + density * iv`, but only the slots with
/// `iu + iv <= density - 1` are populated and referenced by the index list.
pub fn sphere_octant(density: usize, radius: f32) -> anyhow::Result<MeshData> {
    ensure!(density >= 2, "mesh density must be at least 2, got {}", density);

    let patch = RationalTrianglePatch::sphere_octant();
    let last = (density - 1) as f32;
    let mut positions = vec![[0.0; 3]; density * density];
    for iv in 0..density {
        let v = iv as f32 / last;
        for iu in 0..(density - iv) {
            let u = iu as f32 / last;
            positions[iu + density * iv] = (patch.evaluate(u, v) * radius).into();
        }
    }

    let d = density as u32;
    let mut indices = Vec::with_capacity(3 * (density - 1) * (density - 1));
    for iv in 0..(d - 1) {
        // two triangles per square
        let mut iu = 0;
        while iu + iv + 3 <= d {
            let j0 = iu + d * iv;
            let j1 = j0 + 1;
            let j2 = j0 + d;
            let j3 = j2 + 1;
            indices.extend_from_slice(&[j0, j1, j2, j1, j3, j2]);
            iu += 1;
        }

        // the last triangle of a row has no partner
        let j0 = iu + d * iv;
        indices.extend_from_slice(&[j0, j0 + 1, j0 + d]);
    }

    Ok(MeshData { positions, indices })
}

/// Flat grid on the `z = 0` plane spanning `[-x_extent, x_extent] x [-y_extent, y_extent]`.
pub fn rectangle(
    x_samples: usize,
    y_samples: usize,
    x_extent: f32,
    y_extent: f32,
) -> anyhow::Result<MeshData> {
    ensure!(
        x_samples >= 2 && y_samples >= 2,
        "rectangle needs at least 2x2 samples, got {}x{}",
        x_samples,
        y_samples
    );

    let mut positions = Vec::with_capacity(x_samples * y_samples);
    for i1 in 0..y_samples {
        let y = -y_extent + 2.0 * y_extent * i1 as f32 / (y_samples - 1) as f32;
        for i0 in 0..x_samples {
            let x = -x_extent + 2.0 * x_extent * i0 as f32 / (x_samples - 1) as f32;
            positions.push([x, y, 0.0]);
        }
    }

    let nx = x_samples as u32;
    let mut indices = Vec::with_capacity(6 * (x_samples - 1) * (y_samples - 1));
    for i1 in 0..(y_samples as u32 - 1) {
        for i0 in 0..(nx - 1) {
            let v0 = i0 + nx * i1;
            let v1 = v0 + 1;
            let v2 = v1 + nx;
            let v3 = v0 + nx;
            indices.extend_from_slice(&[v0, v1, v2, v0, v2, v3]);
        }
    }

    Ok(MeshData { positions, indices })
}

/// Quarter cylinder of the given radius around the z axis, `z` in `[-1, 1]`,
/// covering the quadrant `x, y >= 0`.
///
/// The rectangle grid is reused: rows become heights and columns angles.
pub fn quarter_cylinder(density: usize, radius: f32) -> anyhow::Result<MeshData> {
    let mut mesh = rectangle(density, density, 1.0, 1.0)?;
    let last = (density - 1) as f32;
    for row in 0..density {
        let z = -1.0 + 2.0 * row as f32 / last;
        for col in 0..density {
            let angle = FRAC_PI_2 * col as f32 / last;
            mesh.positions[col + density * row] =
                [radius * angle.cos(), radius * angle.sin(), z];
        }
    }
    Ok(mesh)
}

/// Closed box with half sizes `(x_extent, y_extent, z_extent)`, four vertices per face.
pub fn box_mesh(x_extent: f32, y_extent: f32, z_extent: f32) -> MeshData {
    let x = Vector3::new(x_extent, 0.0, 0.0);
    let y = Vector3::new(0.0, y_extent, 0.0);
    let z = Vector3::new(0.0, 0.0, z_extent);
    // (face center, first tangent, second tangent) with t1 x t2 pointing outward
    let faces = [
        (x, y, z),
        (-x, z, y),
        (y, z, x),
        (-y, x, z),
        (z, x, y),
        (-z, y, x),
    ];

    let mut mesh = MeshData::default();
    for (center, t1, t2) in faces {
        let base = mesh.positions.len() as u32;
        for corner in [
            center - t1 - t2,
            center + t1 - t2,
            center + t1 + t2,
            center - t1 + t2,
        ] {
            mesh.positions.push(corner.into());
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

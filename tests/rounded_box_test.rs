use cgmath::{InnerSpace, Vector3};
use moving_sphere_box::{
    data_structures::instance::Instance,
    geometry::{
        mesh::{self, MeshData},
        primitives::{AlignedBox3, Sphere3},
        rounded_box::{Feature, FeatureKind, RoundedBox},
    },
};

use crate::common::test_utils::{EPSILON, assert_close, assert_vec_close, demo_rounded_box, transform};

mod common;

fn canonical_mesh(kind: FeatureKind, radius: f32) -> MeshData {
    match kind {
        FeatureKind::Vertex => mesh::sphere_octant(8, radius).unwrap(),
        FeatureKind::Edge => mesh::quarter_cylinder(8, radius).unwrap(),
        FeatureKind::Face => mesh::rectangle(8, 8, 1.0, 1.0).unwrap(),
    }
}

fn assert_features_on_surface(rounded_box: &RoundedBox) {
    let radius = rounded_box.sphere.radius;
    for feature in rounded_box.features() {
        let data = canonical_mesh(feature.kind, radius);
        let instance = Instance::from(feature);
        for &index in &data.indices {
            let p = transform(&instance, data.positions[index as usize]);
            assert_close(rounded_box.aligned_box.distance(p), radius, EPSILON);
        }
    }
}

#[test]
fn has_all_twenty_six_features() {
    let rounded_box = demo_rounded_box();
    assert_eq!(rounded_box.vertices.len(), 8);
    assert_eq!(rounded_box.edges.len(), 12);
    assert_eq!(rounded_box.faces.len(), 6);

    let kinds: Vec<FeatureKind> = rounded_box.features().map(|f| f.kind).collect();
    assert_eq!(kinds.len(), 26);
    assert!(kinds[..8].iter().all(|&k| k == FeatureKind::Vertex));
    assert!(kinds[8..20].iter().all(|&k| k == FeatureKind::Edge));
    assert!(kinds[20..].iter().all(|&k| k == FeatureKind::Face));
}

#[test]
fn orientation_maps_canonical_direction_onto_normal() {
    let rounded_box = demo_rounded_box();
    for feature in rounded_box.features() {
        let direction = (feature.orientation * feature.kind.canonical_direction()).normalize();
        assert_vec_close(direction, RoundedBox::unit_normal(feature), 1e-5);
    }
}

#[test]
fn vertices_sit_on_box_corners() {
    let rounded_box = demo_rounded_box();
    for (i, vertex) in rounded_box.vertices.iter().enumerate() {
        let sign = |bit: usize| if i & (1 << bit) == 0 { -1.0 } else { 1.0 };
        let corner = Vector3::new(3.0 * sign(0), 2.0 * sign(1), 1.0 * sign(2));
        assert_vec_close(vertex.center, corner, 1e-6);
        assert_vec_close(vertex.scale, Vector3::new(1.0, 1.0, 1.0), 1e-6);
    }
}

#[test]
fn edges_are_stretched_to_their_half_length() {
    let rounded_box = demo_rounded_box();
    let half_lengths = [1.0, 2.0, 3.0];
    for (i, edge) in rounded_box.edges.iter().enumerate() {
        let expected = half_lengths[i / 4];
        assert_vec_close(edge.scale, Vector3::new(1.0, 1.0, expected), 1e-6);

        let axis = 2 - i / 4;
        assert_eq!(edge.center[axis], 0.0);
        assert_eq!(edge.normal[axis], 0.0);
    }
}

#[test]
fn faces_are_pushed_out_by_the_radius() {
    let rounded_box = demo_rounded_box();
    let expected_centers = [
        Vector3::new(0.0, 0.0, -2.0),
        Vector3::new(0.0, 0.0, 2.0),
        Vector3::new(0.0, -3.0, 0.0),
        Vector3::new(0.0, 3.0, 0.0),
        Vector3::new(-4.0, 0.0, 0.0),
        Vector3::new(4.0, 0.0, 0.0),
    ];
    for (face, expected) in rounded_box.faces.iter().zip(expected_centers) {
        assert_vec_close(face.center, expected, 1e-6);
    }

    assert_vec_close(rounded_box.faces[0].scale, Vector3::new(3.0, 2.0, 1.0), 1e-6);
    assert_vec_close(rounded_box.faces[2].scale, Vector3::new(3.0, 1.0, 1.0), 1e-6);
    assert_vec_close(rounded_box.faces[4].scale, Vector3::new(1.0, 2.0, 1.0), 1e-6);
}

#[test]
fn transformed_features_lie_on_the_rounded_box() {
    assert_features_on_surface(&demo_rounded_box());
}

#[test]
fn placement_works_for_offset_uneven_boxes() {
    let rounded_box = RoundedBox::new(
        AlignedBox3::new(Vector3::new(-1.0, 0.0, 2.0), Vector3::new(3.0, 5.0, 3.0)),
        Sphere3::new(Vector3::new(0.0, 0.0, 0.0), 0.5),
        1.0,
    );
    assert_features_on_surface(&rounded_box);
}

#[test]
fn colours_carry_the_alpha() {
    let rounded_box = demo_rounded_box();
    assert_eq!(rounded_box.box_color(), [0.5, 0.5, 0.5, 0.5]);
    assert_eq!(rounded_box.vertices[0].color, [0.0, 0.5, 0.0, 0.5]);
    assert_eq!(rounded_box.vertices[7].color, [0.0, 1.0, 0.0, 0.5]);
    assert_eq!(rounded_box.edges[0].color, [0.5, 0.0, 0.0, 0.5]);
    assert_eq!(rounded_box.edges[4].color, [1.0, 0.5, 0.0, 0.5]);
    assert_eq!(rounded_box.edges[11].color, [0.0, 0.25, 0.5, 0.5]);
    assert!(rounded_box.faces.iter().all(|f: &Feature| f.color == [0.5, 0.0, 0.5, 0.5]));
}

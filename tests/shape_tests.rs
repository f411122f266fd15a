mod support;

use approx::assert_relative_eq;
use dicecarve::{
    float_types::Real,
    mesh::{
        Mesh,
        shapes::{ICOSAHEDRON_FACES, icosahedron_buffer},
    },
    traits::CSG,
};

use crate::support::small_die;

#[test]
fn icosahedron_has_twenty_outward_faces() {
    let ico: Mesh<()> = Mesh::icosahedron(2.0, None);
    assert_eq!(ico.polygons.len(), 20);

    for poly in &ico.polygons {
        assert_eq!(poly.vertices.len(), 3);
        let centroid = poly
            .vertices
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, v| acc + v.pos.coords)
            / 3.0;
        assert!(poly.plane.normal.dot(&centroid) > 0.0);
    }
}

#[test]
fn icosahedron_corners_sit_on_the_circumsphere() {
    let radius = small_die().dice_size;
    let (positions, indices) = icosahedron_buffer(radius);
    assert_eq!(positions.len(), 12);
    assert_eq!(indices.len(), 60);
    for p in &positions {
        assert_relative_eq!(p.coords.norm(), radius, epsilon = 1e-12);
    }
}

#[test]
fn icosahedron_volume_matches_closed_form() {
    let radius: Real = 4.0;
    let ico: Mesh<()> = Mesh::icosahedron(radius, None);

    // edge length from the first face
    let (positions, _) = icosahedron_buffer(radius);
    let [a, b, _] = ICOSAHEDRON_FACES[0];
    let edge = (positions[a] - positions[b]).norm();
    let expected = 5.0 / 12.0 * (3.0 + (5.0 as Real).sqrt()) * edge.powi(3);

    assert_relative_eq!(ico.volume(), expected, epsilon = 1e-9);
    assert!(ico.is_manifold());
    assert_eq!(ico.boundary_edge_count(), 0);
}

#[test]
fn every_edge_is_shared_by_two_faces() {
    let mut edges = std::collections::HashMap::new();
    for face in ICOSAHEDRON_FACES {
        for k in 0..3 {
            let (a, b) = (face[k], face[(k + 1) % 3]);
            *edges.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }
    assert_eq!(edges.len(), 30);
    assert!(edges.values().all(|&count| count == 2));
}

#[test]
fn cube_spans_origin_to_size() {
    let cube: Mesh<()> = Mesh::cube(3.0, None);
    let bb = cube.bounding_box();
    assert_relative_eq!(bb.mins.x, 0.0);
    assert_relative_eq!(bb.maxs.z, 3.0);
    assert_relative_eq!(cube.volume(), 27.0, epsilon = 1e-9);
}

#[test]
fn sphere_is_closed() {
    let sphere: Mesh<()> = Mesh::sphere(1.0, 12, 6, None);
    assert!(sphere.is_manifold());
    assert!(sphere.volume() > 0.0);
}

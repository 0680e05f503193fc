//! Integration tests for turgor-mesh.

use turgor_math::Vec3;
use turgor_mesh::generators::{single_tetra, tetra_block};
use turgor_mesh::surface::tet_face_adjacency;
use turgor_mesh::{Surface, TetraMesh};

// ─── TetraMesh Tests ──────────────────────────────────────────

#[test]
fn single_tetra_counts() {
    let mesh = single_tetra();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.tetra_count(), 1);
    assert!(mesh.validate().is_ok());
}

#[test]
fn rest_coordinates_snapshot_initial_positions() {
    let mut mesh = single_tetra();
    mesh.positions[0] = Vec3::new(0.5, 0.5, 0.5);
    assert_eq!(mesh.rest[0], Vec3::ZERO);
    mesh.reset_to_rest();
    assert_eq!(mesh.positions[0], Vec3::ZERO);
}

#[test]
fn out_of_range_tetra_rejected() {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
    let result = TetraMesh::from_parts(positions, vec![[0, 1, 2, 9]]);
    assert!(result.is_err());
}

#[test]
fn repeated_index_rejected() {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
    let result = TetraMesh::from_parts(positions, vec![[0, 1, 2, 2]]);
    assert!(result.is_err());
}

#[test]
fn fixed_ids_are_sorted() {
    let mut mesh = single_tetra();
    mesh.fix_vertices(&[3, 0]);
    assert_eq!(mesh.fixed_ids(), vec![0, 3]);
}

#[test]
fn block_counts() {
    let mesh = tetra_block(2, 1, 1, 0.5);
    assert_eq!(mesh.vertex_count(), 3 * 2 * 2);
    assert_eq!(mesh.tetra_count(), 6 * 2);
    assert!(mesh.validate().is_ok());
}

#[test]
fn block_tets_positively_oriented() {
    let mesh = tetra_block(2, 2, 2, 1.0);
    for tet in &mesh.tets {
        let [a, b, c, d] = tet.map(|i| mesh.positions[i as usize]);
        let vol = (b - a).cross(c - a).dot(d - a) / 6.0;
        assert!(vol > 0.0, "tet {tet:?} has volume {vol}");
    }
}

// ─── Surface Tests ────────────────────────────────────────────

#[test]
fn single_tetra_surface_is_all_faces() {
    let mesh = single_tetra();
    let surface = Surface::extract(&mesh);
    assert_eq!(surface.triangle_count(), 4);
    // Four triangles, each edge shared by two of them → 6 hinges.
    assert_eq!(surface.hinges.len(), 6);
}

#[test]
fn surface_normals_point_outward() {
    let mesh = single_tetra();
    let surface = Surface::extract(&mesh);
    let normals = surface.vertex_area_normals(&mesh.positions);
    // The origin vertex is surrounded by the three axis-plane faces;
    // its area normal must point away from the centroid.
    let centroid = Vec3::new(0.25, 0.25, 0.25);
    let outward = mesh.positions[0] - centroid;
    assert!(normals[0].dot(outward) > 0.0);
}

#[test]
fn enclosed_volume_matches_tet_volume() {
    let mesh = single_tetra();
    let surface = Surface::extract(&mesh);
    let volume = surface.enclosed_volume(&mesh.positions);
    assert!((volume - 1.0 / 6.0).abs() < 1e-12);
}

#[test]
fn block_enclosed_volume() {
    let mesh = tetra_block(2, 2, 2, 0.5);
    let surface = Surface::extract(&mesh);
    let volume = surface.enclosed_volume(&mesh.positions);
    assert!((volume - 1.0).abs() < 1e-10, "volume = {volume}");
}

#[test]
fn block_interior_faces_not_on_surface() {
    let mesh = tetra_block(2, 1, 1, 1.0);
    let surface = Surface::extract(&mesh);
    // A 2×1×1 block has 2 cells × 6 tets; the shared wall is interior.
    // Surface area check: total boundary area of a 2×1×1 box = 10.
    let mut area = 0.0;
    for tri in &surface.triangles {
        let [a, b, c] = tri.map(|i| mesh.positions[i as usize]);
        area += 0.5 * (b - a).cross(c - a).length();
    }
    assert!((area - 10.0).abs() < 1e-10, "area = {area}");
}

#[test]
fn tet_adjacency_symmetric() {
    let mesh = tetra_block(2, 1, 1, 1.0);
    let adjacency = tet_face_adjacency(&mesh);
    for (t, neighbors) in adjacency.iter().enumerate() {
        for &n in neighbors {
            assert!(adjacency[n as usize].contains(&(t as u32)));
        }
    }
}

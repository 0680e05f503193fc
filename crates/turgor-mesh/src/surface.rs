//! Boundary surface extraction and adjacency queries.
//!
//! The membrane film, air pressure, and bending energies all live on the
//! boundary of the tet mesh. A face belongs to the boundary exactly when
//! one tetrahedron references it; interior faces are referenced twice.
//! Boundary triangles keep the outward orientation inherited from their
//! (positively oriented) owning tetrahedron.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::mesh::TetraMesh;
use turgor_math::{vfield::VecField, Vec3};
use turgor_types::Scalar;

/// Outward-oriented faces of a positively oriented tetra `[v0, v1, v2, v3]`.
const TET_FACES: [[usize; 3]; 4] = [[1, 2, 3], [0, 3, 2], [0, 1, 3], [0, 2, 1]];

/// A bending hinge: two surface triangles sharing an edge.
///
/// ```text
///        wa
///       / \
///     v0 ─ v1
///       \ /
///        wb
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hinge {
    /// Shared edge vertex A.
    pub v0: u32,
    /// Shared edge vertex B.
    pub v1: u32,
    /// Wing vertex of the first triangle.
    pub wing_a: u32,
    /// Wing vertex of the second triangle.
    pub wing_b: u32,
}

/// The boundary surface of a tetrahedral mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    /// Boundary triangles, outward oriented.
    pub triangles: Vec<[u32; 3]>,
    /// For each boundary triangle, the tetra that owns it.
    pub tri_tet: Vec<u32>,
    /// Bending hinges across shared surface edges.
    pub hinges: Vec<Hinge>,
}

impl Surface {
    /// Extracts the boundary surface from a tet mesh.
    pub fn extract(mesh: &TetraMesh) -> Self {
        // Count face occurrences under a canonical (sorted) key.
        let mut face_count: HashMap<[u32; 3], u32> = HashMap::new();
        for tet in &mesh.tets {
            for face in &TET_FACES {
                let mut key = [tet[face[0]], tet[face[1]], tet[face[2]]];
                key.sort_unstable();
                *face_count.entry(key).or_insert(0) += 1;
            }
        }

        let mut triangles = Vec::new();
        let mut tri_tet = Vec::new();
        for (t, tet) in mesh.tets.iter().enumerate() {
            for face in &TET_FACES {
                let tri = [tet[face[0]], tet[face[1]], tet[face[2]]];
                let mut key = tri;
                key.sort_unstable();
                if face_count[&key] == 1 {
                    triangles.push(tri);
                    tri_tet.push(t as u32);
                }
            }
        }

        let hinges = build_hinges(&triangles);

        Self {
            triangles,
            tri_tet,
            hinges,
        }
    }

    /// Returns the number of boundary triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Area-weighted outward vertex normals at the given positions.
    ///
    /// Each triangle distributes one third of its area vector to each of
    /// its vertices, so `pressure * vertex_area_normal` is the nodal
    /// pressure load.
    pub fn vertex_area_normals(&self, positions: &[Vec3]) -> VecField {
        let mut normals = vec![Vec3::ZERO; positions.len()];
        for tri in &self.triangles {
            let [a, b, c] = tri.map(|i| positions[i as usize]);
            let area_normal = 0.5 * (b - a).cross(c - a);
            for &i in tri {
                normals[i as usize] += area_normal / 3.0;
            }
        }
        normals
    }

    /// Volume enclosed by the (closed, outward-oriented) surface.
    pub fn enclosed_volume(&self, positions: &[Vec3]) -> Scalar {
        let mut volume = 0.0;
        for tri in &self.triangles {
            let [a, b, c] = tri.map(|i| positions[i as usize]);
            volume += a.dot(b.cross(c)) / 6.0;
        }
        volume
    }
}

/// Builds hinge stencils from surface-edge adjacency.
fn build_hinges(triangles: &[[u32; 3]]) -> Vec<Hinge> {
    // Canonical edge key → (triangle index, wing vertex)
    let mut edge_map: HashMap<(u32, u32), Vec<(usize, u32)>> = HashMap::new();
    for (t, tri) in triangles.iter().enumerate() {
        let edges = [(tri[0], tri[1], tri[2]), (tri[1], tri[2], tri[0]), (tri[2], tri[0], tri[1])];
        for (v0, v1, wing) in edges {
            let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
            edge_map.entry(key).or_default().push((t, wing));
        }
    }

    let mut hinges = Vec::new();
    for ((v0, v1), tris) in edge_map {
        // Boundary-of-boundary edges (open holes) have one triangle only.
        if let [(_, wing_a), (_, wing_b)] = tris[..] {
            hinges.push(Hinge {
                v0,
                v1,
                wing_a,
                wing_b,
            });
        }
    }
    // Deterministic ordering regardless of hash iteration order.
    hinges.sort_unstable_by_key(|h| (h.v0, h.v1));
    hinges
}

/// Face-sharing adjacency between tetrahedra.
///
/// `result[t]` lists the tets sharing a face with tet `t`. This is the
/// connectivity the optimizer's thickness Laplacian is built over.
pub fn tet_face_adjacency(mesh: &TetraMesh) -> Vec<Vec<u32>> {
    let mut face_map: HashMap<[u32; 3], Vec<u32>> = HashMap::new();
    for (t, tet) in mesh.tets.iter().enumerate() {
        for face in &TET_FACES {
            let mut key = [tet[face[0]], tet[face[1]], tet[face[2]]];
            key.sort_unstable();
            face_map.entry(key).or_default().push(t as u32);
        }
    }

    let mut adjacency = vec![Vec::new(); mesh.tetra_count()];
    for tets in face_map.values() {
        if let [a, b] = tets[..] {
            adjacency[a as usize].push(b);
            adjacency[b as usize].push(a);
        }
    }
    for neighbors in &mut adjacency {
        neighbors.sort_unstable();
    }
    adjacency
}

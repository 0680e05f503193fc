//! Graph Laplacians over mesh connectivity.
//!
//! Uniform (combinatorial) Laplacians: `L[i][i] = degree(i)`,
//! `L[i][j] = −1` for each neighbor. Rows sum to zero, so constant
//! fields are in the null space and applying L measures local deviation
//! from the neighborhood mean.

use turgor_math::sparse::CsrMatrix;
use turgor_mesh::{tet_face_adjacency, TetraMesh};

/// Laplacian over per-tetra variables, connectivity = shared faces.
///
/// This is the smoothness operator for the film thickness field.
pub fn tet_thickness_laplacian(mesh: &TetraMesh) -> CsrMatrix {
    let adjacency = tet_face_adjacency(mesh);
    let n = mesh.tetra_count();
    let mut triplets = Vec::new();
    for (t, neighbors) in adjacency.iter().enumerate() {
        triplets.push((t, t, neighbors.len() as f64));
        for &n_id in neighbors {
            triplets.push((t, n_id as usize, -1.0));
        }
    }
    CsrMatrix::from_triplets(n, n, &triplets)
}

/// Laplacian over per-vertex variables, connectivity = tetra edges.
///
/// Applied per coordinate to the displacement field, this is the
/// optimizer's geometric smoothness regularizer.
pub fn vertex_laplacian(mesh: &TetraMesh) -> CsrMatrix {
    let n = mesh.vertex_count();
    let mut neighbors: Vec<std::collections::BTreeSet<u32>> = vec![Default::default(); n];
    for tet in &mesh.tets {
        for i in 0..4 {
            for j in (i + 1)..4 {
                neighbors[tet[i] as usize].insert(tet[j]);
                neighbors[tet[j] as usize].insert(tet[i]);
            }
        }
    }

    let mut triplets = Vec::new();
    for (v, adj) in neighbors.iter().enumerate() {
        triplets.push((v, v, adj.len() as f64));
        for &n_id in adj {
            triplets.push((v, n_id as usize, -1.0));
        }
    }
    CsrMatrix::from_triplets(n, n, &triplets)
}

//! Procedural tet mesh generators for benchmarks and testing.
//!
//! Deterministic, resolution-configurable meshes with positively oriented
//! tetrahedra (the element precomputation rejects anything else).

use crate::mesh::TetraMesh;
use turgor_math::Vec3;
use turgor_types::Scalar;

/// A single unit tetrahedron.
///
/// Vertices at the origin and the three axis unit points; rest volume 1/6.
///
/// # Example
/// ```
/// use turgor_mesh::generators::single_tetra;
/// let mesh = single_tetra();
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.tetra_count(), 1);
/// ```
pub fn single_tetra() -> TetraMesh {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
    let tets = vec![[0, 1, 2, 3]];
    TetraMesh::from_parts(positions, tets).expect("unit tetra is valid")
}

/// An axis-aligned block of `nx × ny × nz` cells, each split into six
/// tetrahedra (Kuhn subdivision), spanning `[0, size]` per axis scaled by
/// the cell counts.
///
/// Sizes: `(nx+1)(ny+1)(nz+1)` vertices, `6·nx·ny·nz` tets.
pub fn tetra_block(nx: usize, ny: usize, nz: usize, cell_size: Scalar) -> TetraMesh {
    let vx = nx + 1;
    let vy = ny + 1;
    let vz = nz + 1;

    let mut positions = Vec::with_capacity(vx * vy * vz);
    for k in 0..vz {
        for j in 0..vy {
            for i in 0..vx {
                positions.push(Vec3::new(
                    i as Scalar * cell_size,
                    j as Scalar * cell_size,
                    k as Scalar * cell_size,
                ));
            }
        }
    }

    let vid = |i: usize, j: usize, k: usize| (k * vy * vx + j * vx + i) as u32;

    // Kuhn subdivision: six tets per cube, one per permutation of the
    // axis path from corner (0,0,0) to corner (1,1,1).
    const PATHS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    let mut tets = Vec::with_capacity(6 * nx * ny * nz);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                for path in &PATHS {
                    let mut corner = [i, j, k];
                    let v0 = vid(corner[0], corner[1], corner[2]);
                    corner[path[0]] += 1;
                    let v1 = vid(corner[0], corner[1], corner[2]);
                    corner[path[1]] += 1;
                    let v2 = vid(corner[0], corner[1], corner[2]);
                    corner[path[2]] += 1;
                    let v3 = vid(corner[0], corner[1], corner[2]);

                    let tet = orient([v0, v1, v2, v3], &positions);
                    tets.push(tet);
                }
            }
        }
    }

    TetraMesh::from_parts(positions, tets).expect("block mesh is valid")
}

/// Swaps two vertices if needed so the tetra is positively oriented.
fn orient(tet: [u32; 4], positions: &[Vec3]) -> [u32; 4] {
    let [a, b, c, d] = tet.map(|i| positions[i as usize]);
    let volume = (b - a).cross(c - a).dot(d - a);
    if volume < 0.0 {
        [tet[0], tet[2], tet[1], tet[3]]
    } else {
        tet
    }
}

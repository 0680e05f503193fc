//! Core tetrahedral mesh type.
//!
//! Vertices live in one contiguous arena; tetrahedra reference them by
//! index. This removes the lifetime hazards of element-to-vertex pointers
//! under mesh mutation — an element is always `[u32; 4]` into the arena.

use serde::{Deserialize, Serialize};

use turgor_math::Vec3;
use turgor_types::{TurgorError, TurgorResult};

/// A tetrahedral mesh.
///
/// Per-vertex channels are parallel arrays indexed by vertex id. The rest
/// coordinates are the reference configuration; `positions` is the current
/// (possibly deformed) configuration the solver reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TetraMesh {
    /// Current vertex positions.
    pub positions: Vec<Vec3>,
    /// Rest (reference) coordinates.
    pub rest: Vec<Vec3>,
    /// Per-vertex velocities.
    pub velocities: Vec<Vec3>,
    /// Accumulated external force per vertex.
    pub external_forces: Vec<Vec3>,
    /// Per-vertex fixed markers.
    pub fixed: Vec<bool>,

    /// Tetrahedra — each entry is `[v0, v1, v2, v3]` into the vertex arena.
    pub tets: Vec<[u32; 4]>,

    /// Rigid-body vertex groups.
    pub rigid_groups: Vec<Vec<u32>>,
    /// Hole vertex groups (openings in the enclosing surface).
    pub holes: Vec<Vec<u32>>,
}

impl TetraMesh {
    /// Builds a mesh from raw vertex positions and tetra indices.
    ///
    /// Rest coordinates are taken from the initial positions; velocities
    /// and external forces start at zero, all vertices free.
    pub fn from_parts(positions: Vec<Vec3>, tets: Vec<[u32; 4]>) -> TurgorResult<Self> {
        let n = positions.len();
        let mesh = Self {
            rest: positions.clone(),
            positions,
            velocities: vec![Vec3::ZERO; n],
            external_forces: vec![Vec3::ZERO; n],
            fixed: vec![false; n],
            tets,
            rigid_groups: Vec::new(),
            holes: Vec::new(),
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of tetrahedra.
    #[inline]
    pub fn tetra_count(&self) -> usize {
        self.tets.len()
    }

    /// Returns the four vertex indices of tetra `t`.
    #[inline]
    pub fn tetra(&self, t: usize) -> [u32; 4] {
        self.tets[t]
    }

    /// Ids of all fixed vertices, ascending.
    pub fn fixed_ids(&self) -> Vec<u32> {
        self.fixed
            .iter()
            .enumerate()
            .filter_map(|(i, &f)| f.then_some(i as u32))
            .collect()
    }

    /// Marks the given vertices as fixed.
    pub fn fix_vertices(&mut self, ids: &[u32]) {
        for &id in ids {
            self.fixed[id as usize] = true;
        }
    }

    /// Resets current positions to the rest configuration and clears
    /// velocities and external forces.
    pub fn reset_to_rest(&mut self) {
        self.positions.copy_from_slice(&self.rest);
        self.velocities.iter_mut().for_each(|v| *v = Vec3::ZERO);
        self.external_forces.iter_mut().for_each(|f| *f = Vec3::ZERO);
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All per-vertex channels have the same length
    /// - Tetra indices are within bounds
    /// - No tetra repeats a vertex index
    /// - Rigid-group and hole ids are within bounds
    pub fn validate(&self) -> TurgorResult<()> {
        let n = self.positions.len();

        if self.rest.len() != n
            || self.velocities.len() != n
            || self.external_forces.len() != n
            || self.fixed.len() != n
        {
            return Err(TurgorError::InvalidMesh(
                "Per-vertex channels have inconsistent lengths".into(),
            ));
        }

        for (t, tet) in self.tets.iter().enumerate() {
            for &idx in tet {
                if idx as usize >= n {
                    return Err(TurgorError::InvalidMesh(format!(
                        "Tetra {t} references vertex {idx} (vertex count: {n})"
                    )));
                }
            }
            let [a, b, c, d] = *tet;
            if a == b || a == c || a == d || b == c || b == d || c == d {
                return Err(TurgorError::InvalidMesh(format!(
                    "Tetra {t} has repeated vertex indices: {tet:?}"
                )));
            }
        }

        for group in self.rigid_groups.iter().chain(self.holes.iter()) {
            for &idx in group {
                if idx as usize >= n {
                    return Err(TurgorError::InvalidMesh(format!(
                        "Group references vertex {idx} (vertex count: {n})"
                    )));
                }
            }
        }

        Ok(())
    }
}

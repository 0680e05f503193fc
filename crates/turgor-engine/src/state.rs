//! Simulation state — per-vertex buffers for the implicit solve.
//!
//! The engine keeps a committed configuration (`positions`,
//! `velocities`) and a staged one (`positions_next`, `velocities_next`).
//! A solve writes only the staged buffers; `commit_next()` promotes them.
//! This keeps a failed solve from corrupting the committed state.

use turgor_math::vfield::{self, VecField};
use turgor_math::Vec3;
use turgor_mesh::TetraMesh;
use turgor_types::Scalar;

/// Per-vertex state buffers.
pub struct SimState {
    /// Committed vertex positions.
    pub positions: VecField,
    /// Committed vertex velocities.
    pub velocities: VecField,
    /// External force per vertex. Ignored on fixed vertices.
    pub external_forces: VecField,
    /// Staged positions from the last solve.
    pub positions_next: VecField,
    /// Staged velocities from the last solve.
    pub velocities_next: VecField,
    /// Per-vertex fixed markers.
    pub fixed: Vec<bool>,
    /// Lumped per-vertex mass.
    pub masses: Vec<Scalar>,
}

impl SimState {
    /// Initializes state from a mesh with uniform lumped vertex mass.
    pub fn from_mesh(mesh: &TetraMesh, vertex_mass: Scalar) -> Self {
        let n = mesh.vertex_count();
        Self {
            positions: mesh.positions.clone(),
            velocities: mesh.velocities.clone(),
            external_forces: mesh.external_forces.clone(),
            positions_next: mesh.positions.clone(),
            velocities_next: vfield::zeros(n),
            fixed: mesh.fixed.clone(),
            masses: vec![vertex_mass; n],
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of free (non-fixed) vertices.
    pub fn free_count(&self) -> usize {
        self.fixed.iter().filter(|&&f| !f).count()
    }

    /// Refreshes the committed buffers from a mesh.
    pub fn load(&mut self, mesh: &TetraMesh) {
        vfield::copy(&mesh.positions, &mut self.positions);
        vfield::copy(&mesh.velocities, &mut self.velocities);
        vfield::copy(&mesh.external_forces, &mut self.external_forces);
        self.fixed.copy_from_slice(&mesh.fixed);
        vfield::copy(&self.positions, &mut self.positions_next);
    }

    /// Writes the staged buffers back to a mesh.
    pub fn store(&self, mesh: &mut TetraMesh) {
        vfield::copy(&self.positions_next, &mut mesh.positions);
        vfield::copy(&self.velocities_next, &mut mesh.velocities);
    }

    /// Promotes the staged configuration to the committed one.
    pub fn commit_next(&mut self) {
        vfield::copy(&self.positions_next, &mut self.positions);
        vfield::copy(&self.velocities_next, &mut self.velocities);
    }

    /// Zeroes the entries of `field` at fixed vertices.
    ///
    /// Applied to every residual, right-hand side, and operator output,
    /// this confines the whole Newton–Krylov iteration to the free-DOF
    /// subspace. External forces on fixed vertices vanish here too.
    pub fn purify(&self, field: &mut [Vec3]) {
        for (v, &fixed) in field.iter_mut().zip(&self.fixed) {
            if fixed {
                *v = Vec3::ZERO;
            }
        }
    }
}

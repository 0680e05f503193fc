//! Optimization state over the free-DOF subspace.
//!
//! The outer solve works on a flattened unknown vector with one slot per
//! free vertex coordinate. `OptState` owns the current position iterate
//! and the free/fixed partition, and translates between the flat vector
//! the linear solver sees and the per-vertex fields everything else uses.

use turgor_math::vfield::{self, VecField};
use turgor_math::Vec3;
use turgor_types::Scalar;

/// Position iterate plus the free-DOF indexing for the outer solve.
pub struct OptState {
    /// Current vertex positions.
    pub positions: VecField,
    /// Per-vertex fixed markers.
    pub fixed: Vec<bool>,
    /// Free vertex ids, ascending.
    free: Vec<u32>,
    /// Vertex id → slot in `free`, or `None` for fixed vertices.
    slots: Vec<Option<u32>>,
}

impl OptState {
    /// Builds a state from positions and fixed markers.
    pub fn new(positions: VecField, fixed: Vec<bool>) -> Self {
        let mut state = Self {
            positions,
            fixed,
            free: Vec::new(),
            slots: Vec::new(),
        };
        state.relabel();
        state
    }

    /// Rebuilds the free/fixed partition from the fixed markers.
    ///
    /// Must be re-invoked whenever constraints change; a stale partition
    /// silently maps coordinates to the wrong unknowns.
    pub fn relabel(&mut self) {
        self.free.clear();
        self.slots = vec![None; self.fixed.len()];
        for (v, &fixed) in self.fixed.iter().enumerate() {
            if !fixed {
                self.slots[v] = Some(self.free.len() as u32);
                self.free.push(v as u32);
            }
        }
    }

    /// Number of scalar unknowns: 3 × free vertex count.
    pub fn freedom_degree(&self) -> usize {
        self.free.len() * 3
    }

    /// Free vertex ids, ascending.
    pub fn free_vertices(&self) -> &[u32] {
        &self.free
    }

    /// Slot of vertex `v` in the unknown vector, or `None` if fixed.
    #[inline]
    pub fn slot_of(&self, v: usize) -> Option<usize> {
        self.slots[v].map(|s| s as usize)
    }

    /// Applies a flat correction over the free DOFs. Fixed vertices are
    /// untouched by construction.
    pub fn update(&mut self, delta: &[Scalar]) {
        debug_assert_eq!(delta.len(), self.freedom_degree());
        for (k, &v) in self.free.iter().enumerate() {
            let d = Vec3::new(delta[3 * k], delta[3 * k + 1], delta[3 * k + 2]);
            self.positions[v as usize] += d;
        }
    }

    /// Flattens the free entries of a per-vertex field into the unknown
    /// ordering. The free list is ascending, so index-order selection
    /// matches the slot ordering.
    pub fn flatten_free(&self, field: &[Vec3]) -> Vec<Scalar> {
        vfield::flatten_selected(field, |v| !self.fixed[v])
    }
}

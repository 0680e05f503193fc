//! Per-vertex 3-vector fields.
//!
//! The solver state (positions, velocities, forces) is stored as one
//! `Vec3` per vertex. The reductions here are the primitives the
//! matrix-free CG loop is built from; with fixed-vertex entries zeroed,
//! `dot` is the inner product over the free-DOF subspace.

use crate::Vec3;
use turgor_types::Scalar;

/// A per-vertex field of 3-vectors, indexed by vertex id.
pub type VecField = Vec<Vec3>;

/// Returns a zero field of length `n`.
#[inline]
pub fn zeros(n: usize) -> VecField {
    vec![Vec3::ZERO; n]
}

/// Inner product over two fields: Σᵢ aᵢ·bᵢ.
///
/// Symmetric and positive-semidefinite; restricted to the free-DOF
/// subspace whenever fixed entries are zero by construction.
pub fn dot(a: &[Vec3], b: &[Vec3]) -> Scalar {
    debug_assert_eq!(a.len(), b.len());
    let mut acc = 0.0;
    for i in 0..a.len() {
        acc += a[i].dot(b[i]);
    }
    acc
}

/// Euclidean norm of a field: sqrt(dot(a, a)).
#[inline]
pub fn norm(a: &[Vec3]) -> Scalar {
    dot(a, a).sqrt()
}

/// In-place `y += alpha * x`.
pub fn axpy(alpha: Scalar, x: &[Vec3], y: &mut [Vec3]) {
    debug_assert_eq!(x.len(), y.len());
    for i in 0..x.len() {
        y[i] += alpha * x[i];
    }
}

/// In-place scale: `a *= alpha`.
pub fn scale(a: &mut [Vec3], alpha: Scalar) {
    for v in a.iter_mut() {
        *v *= alpha;
    }
}

/// Copies `src` into `dst`.
pub fn copy(src: &[Vec3], dst: &mut [Vec3]) {
    debug_assert_eq!(src.len(), dst.len());
    dst.copy_from_slice(src);
}

/// Flattens a field into a scalar vector `[x0, y0, z0, x1, ...]`,
/// taking only the vertices selected by `take`.
pub fn flatten_selected(a: &[Vec3], take: impl Fn(usize) -> bool) -> Vec<Scalar> {
    let mut out = Vec::with_capacity(a.len() * 3);
    for (i, v) in a.iter().enumerate() {
        if take(i) {
            out.push(v.x);
            out.push(v.y);
            out.push(v.z);
        }
    }
    out
}

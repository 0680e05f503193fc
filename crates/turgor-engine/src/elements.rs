//! Tetra element precomputation and force kernels.
//!
//! Each tetrahedron stores the inverse of its rest edge matrix and its
//! rest volume. All force quantities come from the first Piola–Kirchhoff
//! stress of the constitutive model:
//!
//! ```text
//! F = Ds · Bm                 (deformation gradient, Bm = Dm⁻¹)
//! H = −V · P(F) · Bmᵀ          (columns are forces on v1, v2, v3)
//! f0 = −(f1 + f2 + f3)         (momentum balance)
//! ```
//!
//! The differential kernel is identical with P replaced by δP(F; δF),
//! which is what makes the CG operator a loop over these elements.

use turgor_material::ElasticModel;
use turgor_math::{Mat3, Vec3};
use turgor_mesh::TetraMesh;
use turgor_types::constants::DEGENERATE_VOLUME_THRESHOLD;
use turgor_types::{Scalar, TurgorError, TurgorResult};

/// Precomputed rest-state data for a single tetra element.
#[derive(Debug, Clone, Copy)]
pub struct RestTetra {
    /// Tetra vertex indices (into the global vertex buffer).
    pub indices: [usize; 4],
    /// Inverse of the rest edge matrix Dm = [r1−r0, r2−r0, r3−r0].
    pub bm: Mat3,
    /// Rest volume, det(Dm) / 6. Positive for well-oriented tets.
    pub volume: Scalar,
}

impl RestTetra {
    /// Edge matrix of this tetra at positions `x`:
    /// Ds = [x1−x0, x2−x0, x3−x0].
    #[inline]
    pub fn edge_matrix(&self, x: &[Vec3]) -> Mat3 {
        let [i0, i1, i2, i3] = self.indices;
        Mat3::from_cols(x[i1] - x[i0], x[i2] - x[i0], x[i3] - x[i0])
    }

    /// Deformation gradient F = Ds · Bm at positions `x`.
    #[inline]
    pub fn deformation_gradient(&self, x: &[Vec3]) -> Mat3 {
        self.edge_matrix(x) * self.bm
    }
}

/// Collection of all tetra elements with precomputed rest-state data.
pub struct ElementSet {
    /// Per-tetra element data.
    pub elements: Vec<RestTetra>,
}

impl ElementSet {
    /// Computes rest-state data for all tetrahedra of a mesh.
    ///
    /// Rest edges come from the mesh's rest coordinates. A tetra whose
    /// rest volume is non-positive (or below the degeneracy threshold)
    /// is rejected; the solver cannot invert its edge matrix.
    pub fn from_mesh(mesh: &TetraMesh) -> TurgorResult<Self> {
        let mut elements = Vec::with_capacity(mesh.tetra_count());

        for (t, tet) in mesh.tets.iter().enumerate() {
            let indices = [
                tet[0] as usize,
                tet[1] as usize,
                tet[2] as usize,
                tet[3] as usize,
            ];
            let r0 = mesh.rest[indices[0]];
            let dm = Mat3::from_cols(
                mesh.rest[indices[1]] - r0,
                mesh.rest[indices[2]] - r0,
                mesh.rest[indices[3]] - r0,
            );
            let volume = dm.determinant() / 6.0;
            if volume <= DEGENERATE_VOLUME_THRESHOLD {
                return Err(TurgorError::DegenerateTetra { index: t, volume });
            }

            elements.push(RestTetra {
                indices,
                bm: dm.inverse(),
                volume,
            });
        }

        Ok(Self { elements })
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Accumulates elastic forces at positions `x` into `out`.
    ///
    /// `out` is added to, not overwritten; the caller zeroes it.
    pub fn accumulate_forces(&self, model: &dyn ElasticModel, x: &[Vec3], out: &mut [Vec3]) {
        for elem in &self.elements {
            let f = elem.deformation_gradient(x);
            let h = (-elem.volume) * (model.piola(&f) * elem.bm.transpose());
            scatter(elem, &h, out);
        }
    }

    /// Accumulates the force differentials along the displacement field
    /// `dx` into `out`. This is the matrix-free stiffness product.
    pub fn accumulate_force_differentials(
        &self,
        model: &dyn ElasticModel,
        x: &[Vec3],
        dx: &[Vec3],
        out: &mut [Vec3],
    ) {
        for elem in &self.elements {
            let f = elem.deformation_gradient(x);
            let df = elem.edge_matrix(dx) * elem.bm;
            let h = (-elem.volume) * (model.piola_differential(&f, &df) * elem.bm.transpose());
            scatter(elem, &h, out);
        }
    }

    /// Total elastic energy at positions `x`.
    pub fn elastic_energy(&self, model: &dyn ElasticModel, x: &[Vec3]) -> Scalar {
        let mut energy = 0.0;
        for elem in &self.elements {
            let f = elem.deformation_gradient(x);
            energy += elem.volume * model.energy_density(&f);
        }
        energy
    }
}

/// Distributes one element's force matrix to its four vertices.
#[inline]
fn scatter(elem: &RestTetra, h: &Mat3, out: &mut [Vec3]) {
    let [i0, i1, i2, i3] = elem.indices;
    out[i1] += h.x_axis;
    out[i2] += h.y_axis;
    out[i3] += h.z_axis;
    out[i0] -= h.x_axis + h.y_axis + h.z_axis;
}

//! Membrane film elements on the boundary surface.
//!
//! Each boundary triangle carries a 2D rest frame: an orthonormal basis
//! in the rest triangle's plane, the inverse rest edge matrix expressed
//! in that basis, and the rest area. The film deformation gradient is
//! then the 3×2 map from rest-frame coordinates to deformed edges, and
//! nodal forces follow the membrane stress scaled by the rest area and
//! the owning tetra's thickness:
//!
//! ```text
//! F = [x1−x0, x2−x0] · Bm          (3×2)
//! H = −A·h · P(F) · Bmᵀ            (columns are forces on v1, v2)
//! f0 = −(f1 + f2)
//! ```

use turgor_material::FilmModel;
use turgor_math::mat3x2::Mat3x2;
use turgor_math::{Mat2, Vec2, Vec3};
use turgor_mesh::Surface;
use turgor_types::{Scalar, TurgorError, TurgorResult};

/// Precomputed rest-state data for one boundary triangle.
#[derive(Debug, Clone, Copy)]
pub struct FilmElement {
    /// Triangle vertex indices (into the global vertex buffer).
    pub indices: [usize; 3],
    /// Owning tetra (carries this element's thickness variable).
    pub tet: usize,
    /// Inverse rest edge matrix in the triangle's 2D rest frame.
    pub bm: Mat2,
    /// Rest area.
    pub rest_area: Scalar,
}

impl FilmElement {
    /// Deformation gradient at positions `x`.
    #[inline]
    pub fn deformation_gradient(&self, x: &[Vec3]) -> Mat3x2 {
        self.edge_matrix(x).mul_mat2(self.bm)
    }

    /// Deformed edge matrix [x1−x0, x2−x0].
    #[inline]
    pub fn edge_matrix(&self, x: &[Vec3]) -> Mat3x2 {
        let [i0, i1, i2] = self.indices;
        Mat3x2::from_cols(x[i1] - x[i0], x[i2] - x[i0])
    }

    /// Nodal forces at positions `x` for film thickness `h`.
    pub fn forces(&self, model: &dyn FilmModel, x: &[Vec3], h: Scalar) -> [Vec3; 3] {
        let f = self.deformation_gradient(x);
        let hm = model.piola(&f).mul_mat2(self.bm.transpose()) * (-self.rest_area * h);
        [-(hm.col0 + hm.col1), hm.col0, hm.col1]
    }

    /// Nodal force differentials along per-vertex displacements `dx`
    /// (local, three entries matching `indices`).
    pub fn force_differentials(
        &self,
        model: &dyn FilmModel,
        x: &[Vec3],
        dx: &[Vec3; 3],
        h: Scalar,
    ) -> [Vec3; 3] {
        let f = self.deformation_gradient(x);
        let d_edges = Mat3x2::from_cols(dx[1] - dx[0], dx[2] - dx[0]);
        let df = d_edges.mul_mat2(self.bm);
        let hm = model.piola_differential(&f, &df).mul_mat2(self.bm.transpose())
            * (-self.rest_area * h);
        [-(hm.col0 + hm.col1), hm.col0, hm.col1]
    }

    /// Strain energy at positions `x` for film thickness `h`.
    pub fn energy(&self, model: &dyn FilmModel, x: &[Vec3], h: Scalar) -> Scalar {
        let f = self.deformation_gradient(x);
        self.rest_area * h * model.energy_density(&f)
    }
}

/// Builds film elements for every boundary triangle of a surface.
///
/// Rest frames come from the rest coordinates; a triangle with (near)
/// zero rest area cannot carry a membrane and fails the build.
pub fn build_film_elements(surface: &Surface, rest: &[Vec3]) -> TurgorResult<Vec<FilmElement>> {
    let mut elements = Vec::with_capacity(surface.triangle_count());
    for (t, tri) in surface.triangles.iter().enumerate() {
        let indices = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let e1 = rest[indices[1]] - rest[indices[0]];
        let e2 = rest[indices[2]] - rest[indices[0]];

        let normal = e1.cross(e2);
        let area = 0.5 * normal.length();
        if area < turgor_types::constants::EPSILON {
            return Err(TurgorError::InvalidMesh(format!(
                "Surface triangle {t} has zero rest area"
            )));
        }

        // Orthonormal rest frame: u along e1, v perpendicular in-plane.
        let u = e1.normalize();
        let v = normal.cross(u).normalize();
        let dm = Mat2::from_cols(Vec2::new(e1.dot(u), 0.0), Vec2::new(e2.dot(u), e2.dot(v)));

        elements.push(FilmElement {
            indices,
            tet: surface.tri_tet[t] as usize,
            bm: dm.inverse(),
            rest_area: area,
        });
    }
    Ok(elements)
}

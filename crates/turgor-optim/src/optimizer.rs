//! The explicit sparse Gauss–Newton optimizer.
//!
//! Combined residual over the free DOFs at positions x:
//!
//! ```text
//! f(x) = −f_total(x)                          force imbalance
//!      + alpha · (x − x_target)               shape matching
//!      + beta  · L_v (x − x_rest)             displacement smoothness
//!      + penalty · (d_i − mean_g d)           rigid-group coherence
//! ```
//!
//! where f_total sums elastic, cavity air, membrane film, and bending
//! forces. The Jacobian A = ∂f/∂x is assembled explicitly: material
//! stiffness blocks by probing the same force-differential contracts the
//! engine uses (12 probes per tetra, 9 per film triangle), bending and
//! objective blocks in closed form, and the pressure shape operator from
//! exact cross-product derivatives. A is nonsymmetric, so each outer
//! iteration solves A·δ = −f with a sparse LU factorization and applies
//! δ over the free DOFs. Between iterations the per-tetra thickness
//! field is relaxed through its face-adjacency Laplacian.

use turgor_engine::{Engine, EngineConfig};
use turgor_material::{AirModel, BendingModel, ElasticModel, FilmModel};
use turgor_math::solver::{FaerLu, SparseSolver};
use turgor_math::sparse::CsrMatrix;
use turgor_math::vfield::{self, VecField};
use turgor_math::{Mat3, Vec3};
use turgor_mesh::{Surface, TetraMesh};
use turgor_types::{Scalar, TurgorError, TurgorResult};

use crate::config::OptimConfig;
use crate::film::{build_film_elements, FilmElement};
use crate::laplacian::{tet_thickness_laplacian, vertex_laplacian};
use crate::state::OptState;

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimReport {
    /// Outer iterations actually performed.
    pub iterations: u32,
    /// Final combined residual norm.
    pub residual: Scalar,
    /// Whether the residual reached tolerance.
    pub converged: bool,
}

/// Inverse shape-design solver.
///
/// Composes an [`Engine`] for the volumetric elastic machinery and adds
/// the boundary materials (air, film, bending), the target shape, and
/// the per-tetra thickness field.
pub struct Optimizer {
    engine: Engine,
    config: OptimConfig,

    surface: Surface,
    film_elements: Vec<FilmElement>,
    air: Box<dyn AirModel>,
    film: Box<dyn FilmModel>,
    bending: Box<dyn BendingModel>,

    /// Per-tetra film thickness.
    thickness: Vec<Scalar>,
    thickness_lap: CsrMatrix,
    vertex_lap: CsrMatrix,

    state: OptState,
    rest: VecField,
    target: VecField,
    rigid_groups: Vec<Vec<u32>>,
}

impl Optimizer {
    /// Builds an optimizer from a source mesh, a target mesh, and the
    /// full material set.
    ///
    /// The target must have the same vertex count as the source; only
    /// its positions are consumed.
    pub fn new(
        mesh: &TetraMesh,
        target: &TetraMesh,
        config: OptimConfig,
        elastic: Box<dyn ElasticModel>,
        air: Box<dyn AirModel>,
        film: Box<dyn FilmModel>,
        bending: Box<dyn BendingModel>,
    ) -> TurgorResult<Self> {
        if target.vertex_count() != mesh.vertex_count() {
            return Err(TurgorError::InvalidMesh(format!(
                "Target vertex count ({}) != source vertex count ({})",
                target.vertex_count(),
                mesh.vertex_count()
            )));
        }

        let engine = Engine::new(mesh, EngineConfig::default(), elastic)?;
        let surface = Surface::extract(mesh);
        let film_elements = build_film_elements(&surface, &mesh.rest)?;
        let thickness_lap = tet_thickness_laplacian(mesh);
        let vertex_lap = vertex_laplacian(mesh);
        let state = OptState::new(mesh.positions.clone(), mesh.fixed.clone());

        Ok(Self {
            engine,
            surface,
            film_elements,
            air,
            film,
            bending,
            thickness: vec![config.initial_thickness; mesh.tetra_count()],
            thickness_lap,
            vertex_lap,
            state,
            rest: mesh.rest.clone(),
            target: target.positions.clone(),
            rigid_groups: mesh.rigid_groups.clone(),
            config,
        })
    }

    /// Reweights the objective terms. Takes effect on the next
    /// [`solve_optimal`] call.
    ///
    /// [`solve_optimal`]: Optimizer::solve_optimal
    pub fn set_coeff(&mut self, alpha: Scalar, beta: Scalar, gamma: Scalar) {
        self.config.alpha = alpha;
        self.config.beta = beta;
        self.config.gamma = gamma;
    }

    /// Swaps the air model.
    pub fn set_air_model(&mut self, air: Box<dyn AirModel>) {
        self.air = air;
    }

    /// Refreshes positions and constraints from the source mesh and
    /// target positions from the target mesh.
    pub fn input_data(&mut self, mesh: &TetraMesh, target: &TetraMesh) {
        self.engine.input_data(mesh);
        self.state = OptState::new(mesh.positions.clone(), mesh.fixed.clone());
        self.target = target.positions.clone();
    }

    /// Writes the optimized positions back to the mesh.
    pub fn output_data(&self, mesh: &mut TetraMesh) {
        vfield::copy(&self.state.positions, &mut mesh.positions);
    }

    /// Current position iterate.
    pub fn positions(&self) -> &[Vec3] {
        &self.state.positions
    }

    /// Per-tetra thickness field.
    pub fn thickness(&self) -> &[Scalar] {
        &self.thickness
    }

    /// The Laplacian over per-tetra thickness variables.
    pub fn compute_thickness_lap(&self) -> &CsrMatrix {
        &self.thickness_lap
    }

    /// Accumulates film nodal forces at positions `x` into `f_sum` and
    /// pushes the local stiffness entries (free-DOF indexed) onto
    /// `triplets`.
    pub fn compute_film_forces(
        &self,
        x: &[Vec3],
        f_sum: &mut [Vec3],
        triplets: &mut Vec<(usize, usize, Scalar)>,
    ) {
        for elem in &self.film_elements {
            let h = self.thickness[elem.tet];
            let forces = elem.forces(self.film.as_ref(), x, h);
            for (local, &v) in elem.indices.iter().enumerate() {
                f_sum[v] += forces[local];
            }

            // Probe the differential once per local column DOF.
            for col_local in 0..3 {
                let Some(col_slot) = self.state.slot_of(elem.indices[col_local]) else {
                    continue;
                };
                for c in 0..3 {
                    let mut dx = [Vec3::ZERO; 3];
                    dx[col_local][c] = 1.0;
                    let df = elem.force_differentials(self.film.as_ref(), x, &dx, h);
                    for (row_local, &v) in elem.indices.iter().enumerate() {
                        let Some(row_slot) = self.state.slot_of(v) else {
                            continue;
                        };
                        for r in 0..3 {
                            // Residual carries −f, so the Jacobian gets −df.
                            triplets.push((3 * row_slot + r, 3 * col_slot + c, -df[row_local][r]));
                        }
                    }
                }
            }
        }
    }

    /// Assembles the combined residual and its sparse Jacobian over the
    /// free DOFs at positions `x`.
    pub fn compute_force_and_gradient(&self, x: &[Vec3]) -> (Vec<Scalar>, CsrMatrix) {
        let n = x.len();
        let m = self.state.freedom_degree();
        let mut forces = vfield::zeros(n);
        let mut triplets: Vec<(usize, usize, Scalar)> = Vec::new();

        self.accumulate_elastic(x, &mut forces, &mut triplets);
        self.compute_film_forces(x, &mut forces, &mut triplets);
        self.accumulate_bending(x, &mut forces, &mut triplets);
        self.accumulate_air(x, &mut forces, &mut triplets);

        // Residual: force imbalance first, objective terms added flat.
        for v in forces.iter_mut() {
            *v = -*v;
        }
        let mut residual = self.state.flatten_free(&forces);
        self.add_objective_terms(x, &mut residual, &mut triplets);

        (residual, CsrMatrix::from_triplets(m, m, &triplets))
    }

    /// Runs the outer Gauss–Newton loop.
    ///
    /// Stops when the combined residual norm reaches tolerance; exhausting
    /// the iteration cap or losing residual decrease is
    /// [`TurgorError::NonConvergence`]. The position iterate reflects the
    /// last accepted correction either way.
    pub fn solve_optimal(&mut self) -> TurgorResult<OptimReport> {
        self.state.relabel();
        let m = self.state.freedom_degree();
        let mut solver = FaerLu::new();
        let mut previous = Scalar::MAX;
        let mut residual_norm = Scalar::MAX;

        for iter in 0..=self.config.max_iterations {
            let (residual, jacobian) = self.compute_force_and_gradient(&self.state.positions);
            residual_norm = l2_norm(&residual);

            if residual_norm < self.config.tolerance {
                return Ok(OptimReport {
                    iterations: iter,
                    residual: residual_norm,
                    converged: true,
                });
            }
            if iter == self.config.max_iterations || residual_norm >= previous {
                break;
            }
            previous = residual_norm;

            solver
                .factorize(&jacobian)
                .map_err(|e| TurgorError::InvalidConfig(format!("Jacobian factorization: {e}")))?;
            let mut delta = vec![0.0; m];
            let rhs: Vec<Scalar> = residual.iter().map(|&r| -r).collect();
            solver
                .solve(&rhs, &mut delta)
                .map_err(|e| TurgorError::InvalidConfig(format!("Correction solve: {e}")))?;

            self.state.update(&delta);
            self.smooth_thickness();
        }

        Err(TurgorError::NonConvergence {
            iterations: self.config.max_iterations,
            residual: residual_norm,
        })
    }

    /// Volumetric elastic forces and probed stiffness blocks.
    fn accumulate_elastic(
        &self,
        x: &[Vec3],
        forces: &mut [Vec3],
        triplets: &mut Vec<(usize, usize, Scalar)>,
    ) {
        self.engine
            .elements()
            .accumulate_forces(self.engine.model(), x, forces);

        for elem in &self.engine.elements().elements {
            for col_local in 0..4 {
                let Some(col_slot) = self.state.slot_of(elem.indices[col_local]) else {
                    continue;
                };
                for c in 0..3 {
                    let mut dx = [Vec3::ZERO; 4];
                    dx[col_local][c] = 1.0;
                    let df = tetra_probe(self.engine.model(), elem, x, &dx);
                    for (row_local, &v) in elem.indices.iter().enumerate() {
                        let Some(row_slot) = self.state.slot_of(v) else {
                            continue;
                        };
                        for r in 0..3 {
                            triplets.push((3 * row_slot + r, 3 * col_slot + c, -df[row_local][r]));
                        }
                    }
                }
            }
        }
    }

    /// Bending hinge forces; stiffness blocks are constant and closed
    /// form for the linearized stencil.
    fn accumulate_bending(
        &self,
        x: &[Vec3],
        forces: &mut [Vec3],
        triplets: &mut Vec<(usize, usize, Scalar)>,
    ) {
        for hinge in &self.surface.hinges {
            let ids = [
                hinge.v0 as usize,
                hinge.v1 as usize,
                hinge.wing_a as usize,
                hinge.wing_b as usize,
            ];
            let cur = ids.map(|i| x[i]);
            let rest = ids.map(|i| self.rest[i]);
            let f = self.bending.force(&cur, &rest);
            for (local, &v) in ids.iter().enumerate() {
                forces[v] += f[local];
            }

            for col_local in 0..4 {
                let Some(col_slot) = self.state.slot_of(ids[col_local]) else {
                    continue;
                };
                for c in 0..3 {
                    let mut dx = [Vec3::ZERO; 4];
                    dx[col_local][c] = 1.0;
                    let df = self.bending.force_differential(&cur, &rest, &dx);
                    for (row_local, &v) in ids.iter().enumerate() {
                        let Some(row_slot) = self.state.slot_of(v) else {
                            continue;
                        };
                        for r in 0..3 {
                            triplets.push((3 * row_slot + r, 3 * col_slot + c, -df[row_local][r]));
                        }
                    }
                }
            }
        }
    }

    /// Cavity pressure loads and the pressure shape operator.
    ///
    /// Nodal load is p(V)/3 of each incident triangle's area normal. Its
    /// derivative has the per-triangle cross-product (shape) part plus,
    /// for volume-coupled air models, a rank-one dp/dV term over the
    /// whole surface.
    fn accumulate_air(
        &self,
        x: &[Vec3],
        forces: &mut [Vec3],
        triplets: &mut Vec<(usize, usize, Scalar)>,
    ) {
        if self.surface.triangles.is_empty() {
            return;
        }
        let volume = self.surface.enclosed_volume(x);
        let p = self.air.pressure(volume);
        let normals = self.surface.vertex_area_normals(x);
        for (v, n) in normals.iter().enumerate() {
            forces[v] += p * *n;
        }

        if p != 0.0 {
            for tri in &self.surface.triangles {
                let ids = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
                let [a, b, c] = ids.map(|i| x[i]);
                // n = 0.5 (b−a)×(c−a); δn per vertex via skew matrices.
                let dn = [
                    0.5 * skew(c - b),
                    -0.5 * skew(c - a),
                    0.5 * skew(b - a),
                ];
                for &row_v in &ids {
                    let Some(row_slot) = self.state.slot_of(row_v) else {
                        continue;
                    };
                    for (col_local, &col_v) in ids.iter().enumerate() {
                        let Some(col_slot) = self.state.slot_of(col_v) else {
                            continue;
                        };
                        let block = (p / 3.0) * dn[col_local];
                        push_block(triplets, row_slot, col_slot, &(-1.0 * block));
                    }
                }
            }
        }

        let dpdv = self.air.pressure_volume_derivative(volume);
        if dpdv != 0.0 {
            // ∂V/∂x is exactly the area-normal field, so the volume
            // coupling is dp/dV · n_i n_jᵀ over surface vertices.
            let mut on_surface = vec![false; x.len()];
            for tri in &self.surface.triangles {
                for &v in tri {
                    on_surface[v as usize] = true;
                }
            }
            for (i, &row_on) in on_surface.iter().enumerate() {
                if !row_on {
                    continue;
                }
                let Some(row_slot) = self.state.slot_of(i) else {
                    continue;
                };
                for (j, &col_on) in on_surface.iter().enumerate() {
                    if !col_on {
                        continue;
                    }
                    let Some(col_slot) = self.state.slot_of(j) else {
                        continue;
                    };
                    let block = dpdv
                        * Mat3::from_cols(
                            normals[i] * normals[j].x,
                            normals[i] * normals[j].y,
                            normals[i] * normals[j].z,
                        );
                    push_block(triplets, row_slot, col_slot, &(-1.0 * block));
                }
            }
        }
    }

    /// Shape matching, displacement smoothness, and rigid-group penalty.
    fn add_objective_terms(
        &self,
        x: &[Vec3],
        residual: &mut [Scalar],
        triplets: &mut Vec<(usize, usize, Scalar)>,
    ) {
        let alpha = self.config.alpha;
        let beta = self.config.beta;
        let penalty = self.config.penalty;

        // alpha · (x − x_target), diagonal Jacobian.
        for (k, &v) in self.state.free_vertices().iter().enumerate() {
            let d = x[v as usize] - self.target[v as usize];
            for c in 0..3 {
                residual[3 * k + c] += alpha * d[c];
                triplets.push((3 * k + c, 3 * k + c, alpha));
            }
        }

        // beta · L_v (x − rest), applied per coordinate. Fixed columns
        // contribute to the residual but carry no unknowns.
        if beta != 0.0 {
            let lap = &self.vertex_lap;
            for (k, &v) in self.state.free_vertices().iter().enumerate() {
                let row = v as usize;
                for idx in lap.row_ptr[row]..lap.row_ptr[row + 1] {
                    let col = lap.col_idx[idx];
                    let w = lap.values[idx];
                    let u = x[col] - self.rest[col];
                    for c in 0..3 {
                        residual[3 * k + c] += beta * w * u[c];
                    }
                    if let Some(col_slot) = self.state.slot_of(col) {
                        for c in 0..3 {
                            triplets.push((3 * k + c, 3 * col_slot + c, beta * w));
                        }
                    }
                }
            }
        }

        // penalty · (d_i − mean_g d): every rigid-group vertex is pulled
        // toward the group's mean displacement.
        if penalty != 0.0 {
            for group in &self.rigid_groups {
                if group.len() < 2 {
                    continue;
                }
                let inv_len = 1.0 / group.len() as Scalar;
                let mut mean = Vec3::ZERO;
                for &v in group {
                    mean += x[v as usize] - self.rest[v as usize];
                }
                mean *= inv_len;

                for &vi in group {
                    let Some(row_slot) = self.state.slot_of(vi as usize) else {
                        continue;
                    };
                    let d = x[vi as usize] - self.rest[vi as usize] - mean;
                    for c in 0..3 {
                        residual[3 * row_slot + c] += penalty * d[c];
                    }
                    for &vj in group {
                        let Some(col_slot) = self.state.slot_of(vj as usize) else {
                            continue;
                        };
                        let w = if vi == vj {
                            penalty * (1.0 - inv_len)
                        } else {
                            -penalty * inv_len
                        };
                        for c in 0..3 {
                            triplets.push((3 * row_slot + c, 3 * col_slot + c, w));
                        }
                    }
                }
            }
        }
    }

    /// One Jacobi relaxation of the thickness field through its
    /// Laplacian: h ← h − γ/(1+γ) · D⁻¹ L h.
    fn smooth_thickness(&mut self) {
        if self.config.gamma == 0.0 || self.thickness.is_empty() {
            return;
        }
        let step = self.config.gamma / (1.0 + self.config.gamma);
        let lh = self.thickness_lap.mul_vec(&self.thickness);
        for t in 0..self.thickness.len() {
            let degree = self.thickness_lap.values
                [self.thickness_lap.row_ptr[t]..self.thickness_lap.row_ptr[t + 1]]
                .iter()
                .zip(&self.thickness_lap.col_idx[self.thickness_lap.row_ptr[t]..])
                .find_map(|(&v, &c)| (c == t).then_some(v))
                .unwrap_or(0.0);
            if degree > 0.0 {
                self.thickness[t] -= step * lh[t] / degree;
            }
        }
    }
}

/// Force differential of one tetra along a local 4-vertex displacement.
fn tetra_probe(
    model: &dyn ElasticModel,
    elem: &turgor_engine::RestTetra,
    x: &[Vec3],
    dx: &[Vec3; 4],
) -> [Vec3; 4] {
    let f = elem.deformation_gradient(x);
    let d_edges = Mat3::from_cols(dx[1] - dx[0], dx[2] - dx[0], dx[3] - dx[0]);
    let dh = (-elem.volume) * (model.piola_differential(&f, &(d_edges * elem.bm)) * elem.bm.transpose());
    [
        -(dh.x_axis + dh.y_axis + dh.z_axis),
        dh.x_axis,
        dh.y_axis,
        dh.z_axis,
    ]
}

/// Skew-symmetric matrix [u]× with [u]× v = u × v.
fn skew(u: Vec3) -> Mat3 {
    Mat3::from_cols(
        Vec3::new(0.0, u.z, -u.y),
        Vec3::new(-u.z, 0.0, u.x),
        Vec3::new(u.y, -u.x, 0.0),
    )
}

/// Scatters one 3×3 block at (3·row, 3·col).
fn push_block(triplets: &mut Vec<(usize, usize, Scalar)>, row: usize, col: usize, block: &Mat3) {
    let cols = [block.x_axis, block.y_axis, block.z_axis];
    for (c, col_vec) in cols.iter().enumerate() {
        for r in 0..3 {
            triplets.push((3 * row + r, 3 * col + c, col_vec[r]));
        }
    }
}

fn l2_norm(v: &[Scalar]) -> Scalar {
    v.iter().map(|x| x * x).sum::<Scalar>().sqrt()
}

//! The implicit Newton–Krylov engine.
//!
//! Backward Euler residual at candidate positions x:
//!
//! ```text
//! g(x) = M (x − xₙ − dt·vₙ) / dt² − f_ela(x) − f_ext
//! ```
//!
//! Each Newton step solves A·δ = −g with the symmetric operator
//! A(v) = M·v/dt² − δf(x; v) by conjugate gradients, then applies the
//! correction with step halving until the new residual is finite (a
//! full step can invert an element). A static solve drops the inertial
//! term on both sides and converges to a force equilibrium.
//!
//! Fixed vertices are handled by projection: residuals, right-hand
//! sides, and every operator output are zeroed on fixed entries, so the
//! iteration never leaves the free-DOF subspace and fixed positions
//! stay bitwise untouched.

use turgor_material::ElasticModel;
use turgor_math::vfield::{self, VecField};
use turgor_math::Vec3;
use turgor_mesh::TetraMesh;
use turgor_types::{Scalar, TurgorError, TurgorResult};

use crate::config::EngineConfig;
use crate::elements::ElementSet;
use crate::state::SimState;

/// Step-halving budget of the damped Newton update. 2⁻³⁰ of a Newton
/// direction that is still outside the material's domain means the
/// current iterate itself is unusable.
const MAX_STEP_HALVINGS: u32 = 30;

/// Result of one implicit solve.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Newton iterations actually performed.
    pub newton_iterations: u32,
    /// Total CG iterations over all Newton steps.
    pub cg_iterations: u32,
    /// Final residual force norm.
    pub residual: Scalar,
    /// Whether the residual reached tolerance.
    pub converged: bool,
}

/// Implicit nonlinear elastodynamics engine.
///
/// Owns the element data, the constitutive model, and the per-vertex
/// state. The mesh is borrowed per call: `input_data()` pulls the
/// current configuration in, a solve stages the next one, and
/// `output_data()` writes it back out.
pub struct Engine {
    state: SimState,
    elements: ElementSet,
    model: Box<dyn ElasticModel>,
    config: EngineConfig,
}

impl Engine {
    /// Builds an engine from a mesh, configuration, and elastic model.
    ///
    /// Precomputes all rest-state element data; fails on degenerate or
    /// inverted rest tetrahedra.
    pub fn new(
        mesh: &TetraMesh,
        config: EngineConfig,
        model: Box<dyn ElasticModel>,
    ) -> TurgorResult<Self> {
        mesh.validate()?;
        let elements = ElementSet::from_mesh(mesh)?;
        let state = SimState::from_mesh(mesh, config.vertex_mass);
        Ok(Self {
            state,
            elements,
            model,
            config,
        })
    }

    /// Read access to the per-vertex state.
    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Read access to the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read access to the precomputed elements.
    pub fn elements(&self) -> &ElementSet {
        &self.elements
    }

    /// The active constitutive model.
    pub fn model(&self) -> &dyn ElasticModel {
        self.model.as_ref()
    }

    /// Swaps the constitutive model. Element data is unaffected.
    pub fn set_model(&mut self, model: Box<dyn ElasticModel>) {
        self.model = model;
    }

    /// Refreshes positions, velocities, external forces, and fixed
    /// markers from the mesh.
    pub fn input_data(&mut self, mesh: &TetraMesh) {
        self.state.load(mesh);
    }

    /// Writes the staged (next) configuration back to the mesh.
    pub fn output_data(&self, mesh: &mut TetraMesh) {
        self.state.store(mesh);
    }

    /// Rebuilds the free/fixed partition from the mesh's constraint
    /// markers. Releasing a vertex on the mesh takes effect here.
    pub fn label_fixed_ids(&mut self, mesh: &TetraMesh) {
        self.state.fixed.copy_from_slice(&mesh.fixed);
    }

    /// Promotes the staged configuration to the committed one.
    pub fn step_to_next(&mut self) {
        self.state.commit_next();
    }

    /// Elastic forces at positions `x`, written into `out` (zeroed first).
    pub fn compute_elastic_forces(&self, x: &[Vec3], out: &mut [Vec3]) {
        out.iter_mut().for_each(|v| *v = Vec3::ZERO);
        self.elements.accumulate_forces(self.model.as_ref(), x, out);
    }

    /// Elastic force differentials along `dx` at positions `x`, written
    /// into `out` (zeroed first).
    pub fn compute_force_differentials(&self, x: &[Vec3], dx: &[Vec3], out: &mut [Vec3]) {
        out.iter_mut().for_each(|v| *v = Vec3::ZERO);
        self.elements
            .accumulate_force_differentials(self.model.as_ref(), x, dx, out);
    }

    /// Total elastic energy at positions `x`.
    pub fn elastic_energy(&self, x: &[Vec3]) -> Scalar {
        self.elements.elastic_energy(self.model.as_ref(), x)
    }

    /// Advances one backward Euler step of size `dt`.
    ///
    /// On success the staged buffers hold the next configuration and the
    /// report describes the converged solve. On [`TurgorError::NonConvergence`]
    /// the staged buffers hold the last Newton iterate; the committed
    /// state is untouched either way until [`step_to_next`] is called.
    ///
    /// [`step_to_next`]: Engine::step_to_next
    pub fn solve_next_timestep(&mut self, dt: Scalar) -> TurgorResult<StepReport> {
        if !(dt > 0.0) {
            return Err(TurgorError::InvalidConfig(format!(
                "Timestep must be positive, got {dt}"
            )));
        }
        self.newton_solve(Some(dt))
    }

    /// Solves for a static force equilibrium at the current external
    /// forces and fixed vertices. Staged velocities are zeroed.
    pub fn solve_static_pos(&mut self) -> TurgorResult<StepReport> {
        self.newton_solve(None)
    }

    /// Residual force norm at the staged positions: |f_ela + f_ext| over
    /// the free vertices. Near zero after a converged static solve.
    pub fn force_test(&self) -> Scalar {
        let n = self.state.vertex_count();
        let mut f = vfield::zeros(n);
        self.elements
            .accumulate_forces(self.model.as_ref(), &self.state.positions_next, &mut f);
        vfield::axpy(1.0, &self.state.external_forces, &mut f);
        self.state.purify(&mut f);
        vfield::norm(&f)
    }

    /// Newton outer loop shared by the dynamic and static solves.
    /// `dt = None` drops the inertial term.
    fn newton_solve(&mut self, dt: Option<Scalar>) -> TurgorResult<StepReport> {
        let n = self.state.vertex_count();
        let mut x = self.state.positions.clone();
        let mut g = vfield::zeros(n);
        let mut total_cg = 0u32;
        let mut residual = Scalar::MAX;

        for iter in 0..=self.config.newton_max_iterations {
            self.residual_at(&x, dt, &mut g);
            residual = vfield::norm(&g);

            if residual < self.config.newton_tolerance {
                self.stage_result(&x, dt);
                return Ok(StepReport {
                    newton_iterations: iter,
                    cg_iterations: total_cg,
                    residual,
                    converged: true,
                });
            }
            if iter == self.config.newton_max_iterations {
                break;
            }

            // Solve A·δ = −g on the free-DOF subspace.
            vfield::scale(&mut g, -1.0);
            let (delta, cg_iters) = self.conjugate_gradient(&x, dt, &g);
            total_cg += cg_iters;
            if !self.apply_step(&mut x, &delta, dt, &mut g) {
                break;
            }
        }

        // Leave the last iterate staged so callers can inspect it.
        self.stage_result(&x, dt);
        Err(TurgorError::NonConvergence {
            iterations: self.config.newton_max_iterations,
            residual,
        })
    }

    /// Applies a damped Newton correction: x ← x + s·δ with the largest
    /// s ≤ 1 whose residual is finite.
    ///
    /// A full step can drive an element through inversion, where the
    /// log-barrier material returns NaN; halving the step keeps the
    /// iterate inside the model's domain. Returns false when no finite
    /// step was found and `x` is unchanged.
    fn apply_step(
        &self,
        x: &mut VecField,
        delta: &[Vec3],
        dt: Option<Scalar>,
        g: &mut VecField,
    ) -> bool {
        let mut step = 1.0;
        let mut trial = vfield::zeros(x.len());
        for _ in 0..MAX_STEP_HALVINGS {
            vfield::copy(x, &mut trial);
            vfield::axpy(step, delta, &mut trial);
            self.residual_at(&trial, dt, g);
            if vfield::norm(g).is_finite() {
                vfield::copy(&trial, x);
                return true;
            }
            step *= 0.5;
        }
        false
    }

    /// Backward Euler (or static) residual g(x), purified.
    fn residual_at(&self, x: &[Vec3], dt: Option<Scalar>, g: &mut VecField) {
        let n = self.state.vertex_count();
        self.compute_elastic_forces(x, g);
        for i in 0..n {
            g[i] = -(g[i] + self.state.external_forces[i]);
        }
        if let Some(dt) = dt {
            let inv_dt2 = 1.0 / (dt * dt);
            for i in 0..n {
                let inertia = x[i] - self.state.positions[i] - dt * self.state.velocities[i];
                g[i] += self.state.masses[i] * inv_dt2 * inertia;
            }
        }
        self.state.purify(g);
    }

    /// Applies the Newton operator A(v) = M·v/dt² − δf(x; v), purified.
    fn apply_operator(&self, x: &[Vec3], dt: Option<Scalar>, v: &[Vec3], out: &mut VecField) {
        self.compute_force_differentials(x, v, out);
        vfield::scale(out, -1.0);
        if let Some(dt) = dt {
            let inv_dt2 = 1.0 / (dt * dt);
            for i in 0..out.len() {
                out[i] += self.state.masses[i] * inv_dt2 * v[i];
            }
        }
        self.state.purify(out);
    }

    /// Matrix-free CG for A·δ = b. `b` must already be purified.
    ///
    /// Converges relative to the initial residual; bails out if the
    /// operator loses positive-definiteness along the search direction
    /// (the outer Newton loop then works with the partial step).
    fn conjugate_gradient(&self, x: &[Vec3], dt: Option<Scalar>, b: &[Vec3]) -> (VecField, u32) {
        let n = b.len();
        let mut sol = vfield::zeros(n);
        let mut r = b.to_vec();
        let mut p = r.clone();
        let mut ap = vfield::zeros(n);

        let mut rr = vfield::dot(&r, &r);
        let target = self.config.cg_tolerance * self.config.cg_tolerance * rr;
        let mut iterations = 0u32;

        for _ in 0..self.config.cg_max_iterations {
            if rr <= target {
                break;
            }

            self.apply_operator(x, dt, &p, &mut ap);
            let pap = vfield::dot(&p, &ap);
            if pap <= 0.0 {
                break;
            }

            let alpha = rr / pap;
            vfield::axpy(alpha, &p, &mut sol);
            vfield::axpy(-alpha, &ap, &mut r);
            iterations += 1;

            let rr_new = vfield::dot(&r, &r);
            let beta = rr_new / rr;
            rr = rr_new;
            for i in 0..n {
                p[i] = r[i] + beta * p[i];
            }
        }

        (sol, iterations)
    }

    /// Writes the solved positions into the staged buffers and derives
    /// the staged velocities.
    fn stage_result(&mut self, x: &[Vec3], dt: Option<Scalar>) {
        let n = self.state.vertex_count();
        vfield::copy(x, &mut self.state.positions_next);
        match dt {
            Some(dt) => {
                let inv_dt = 1.0 / dt;
                for i in 0..n {
                    self.state.velocities_next[i] =
                        (x[i] - self.state.positions[i]) * inv_dt;
                }
            }
            None => {
                self.state
                    .velocities_next
                    .iter_mut()
                    .for_each(|v| *v = Vec3::ZERO);
            }
        }
    }
}

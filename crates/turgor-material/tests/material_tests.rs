//! Finite-difference consistency checks for the constitutive laws.
//!
//! Every model must satisfy two identities to first order:
//! the stress is the energy gradient, and the stress differential is
//! the directional derivative of the stress.

use turgor_math::mat3x2::Mat3x2;
use turgor_math::{Mat3, Vec3};
use turgor_material::{
    AirModel, BendingModel, ElasticModel, FilmModel, IsobaricAir, MeanCurvatureBending, NeoHookean,
    NeoHookeanFilm,
};
use turgor_types::Scalar;

const FD_STEP: Scalar = 1e-6;
const FD_TOL: Scalar = 1e-5;

fn ddot3(a: &Mat3, b: &Mat3) -> Scalar {
    a.x_axis.dot(b.x_axis) + a.y_axis.dot(b.y_axis) + a.z_axis.dot(b.z_axis)
}

fn ddot3x2(a: &Mat3x2, b: &Mat3x2) -> Scalar {
    a.col0.dot(b.col0) + a.col1.dot(b.col1)
}

/// A generic deformation gradient away from both identity and any
/// symmetry axis, with positive determinant.
fn sample_f3() -> Mat3 {
    Mat3::from_cols(
        Vec3::new(1.10, 0.05, -0.02),
        Vec3::new(0.03, 0.95, 0.08),
        Vec3::new(-0.04, 0.06, 1.20),
    )
}

fn sample_df3() -> Mat3 {
    Mat3::from_cols(
        Vec3::new(0.21, -0.34, 0.12),
        Vec3::new(-0.08, 0.17, 0.29),
        Vec3::new(0.05, -0.11, -0.23),
    )
}

fn sample_f3x2() -> Mat3x2 {
    Mat3x2::from_cols(Vec3::new(1.05, 0.10, -0.03), Vec3::new(-0.07, 0.92, 0.15))
}

fn sample_df3x2() -> Mat3x2 {
    Mat3x2::from_cols(Vec3::new(0.31, -0.12, 0.24), Vec3::new(0.09, 0.18, -0.27))
}

#[test]
fn neohookean_piola_matches_energy_gradient() {
    let model = NeoHookean::new(0.4, 0.4);
    let f = sample_f3();
    let df = sample_df3();

    let fd = (model.energy_density(&(f + FD_STEP * df))
        - model.energy_density(&(f - FD_STEP * df)))
        / (2.0 * FD_STEP);
    let analytic = ddot3(&model.piola(&f), &df);
    assert!((fd - analytic).abs() < FD_TOL, "fd {fd} vs analytic {analytic}");
}

#[test]
fn neohookean_differential_matches_piola_fd() {
    let model = NeoHookean::new(0.7, 0.3);
    let f = sample_f3();
    let df = sample_df3();

    let fd = (model.piola(&(f + FD_STEP * df)) - model.piola(&(f - FD_STEP * df)))
        * (1.0 / (2.0 * FD_STEP));
    let analytic = model.piola_differential(&f, &df);
    let err = ddot3(&(fd - analytic), &(fd - analytic)).sqrt();
    assert!(err < FD_TOL, "differential mismatch {err}");
}

#[test]
fn neohookean_rest_state_is_stress_free() {
    let model = NeoHookean::default();
    let p = model.piola(&Mat3::IDENTITY);
    assert!(ddot3(&p, &p).sqrt() < 1e-12);
    assert!(model.energy_density(&Mat3::IDENTITY).abs() < 1e-12);
}

#[test]
fn film_piola_matches_energy_gradient() {
    let model = NeoHookeanFilm::new(0.4);
    let f = sample_f3x2();
    let df = sample_df3x2();

    let fd = (model.energy_density(&(f + df * FD_STEP))
        - model.energy_density(&(f - df * FD_STEP)))
        / (2.0 * FD_STEP);
    let analytic = ddot3x2(&model.piola(&f), &df);
    assert!((fd - analytic).abs() < FD_TOL, "fd {fd} vs analytic {analytic}");
}

#[test]
fn film_differential_matches_piola_fd() {
    let model = NeoHookeanFilm::new(0.6);
    let f = sample_f3x2();
    let df = sample_df3x2();

    let fd = (model.piola(&(f + df * FD_STEP)) - model.piola(&(f - df * FD_STEP)))
        * (1.0 / (2.0 * FD_STEP));
    let analytic = model.piola_differential(&f, &df);
    let diff = fd - analytic;
    let err = ddot3x2(&diff, &diff).sqrt();
    assert!(err < FD_TOL, "differential mismatch {err}");
}

#[test]
fn film_rest_frame_is_stress_free() {
    let model = NeoHookeanFilm::default();
    let f = Mat3x2::IDENTITY;
    assert!(model.energy_density(&f).abs() < 1e-12);
    let p = model.piola(&f);
    assert!(ddot3x2(&p, &p).sqrt() < 1e-12);
}

fn hinge_rest() -> [Vec3; 4] {
    [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.5, 1.0, 0.0),
        Vec3::new(0.5, -1.0, 0.0),
    ]
}

fn hinge_bent() -> [Vec3; 4] {
    [
        Vec3::new(0.0, 0.0, 0.1),
        Vec3::new(1.0, 0.05, 0.0),
        Vec3::new(0.5, 0.9, 0.3),
        Vec3::new(0.5, -1.1, 0.2),
    ]
}

#[test]
fn bending_force_matches_energy_gradient() {
    let model = MeanCurvatureBending::new(0.01);
    let rest = hinge_rest();
    let x = hinge_bent();
    let dx = [
        Vec3::new(0.3, -0.1, 0.2),
        Vec3::new(-0.2, 0.4, 0.1),
        Vec3::new(0.1, 0.2, -0.3),
        Vec3::new(-0.4, 0.1, 0.2),
    ];

    let mut plus = x;
    let mut minus = x;
    for i in 0..4 {
        plus[i] += FD_STEP * dx[i];
        minus[i] -= FD_STEP * dx[i];
    }
    let fd = (model.energy(&plus, &rest) - model.energy(&minus, &rest)) / (2.0 * FD_STEP);

    // Force is the negative energy gradient.
    let force = model.force(&x, &rest);
    let analytic: Scalar = -(0..4).map(|i| force[i].dot(dx[i])).sum::<Scalar>();
    assert!((fd - analytic).abs() < FD_TOL, "fd {fd} vs analytic {analytic}");
}

#[test]
fn bending_differential_is_exact() {
    // The stencil is linear in positions, so the differential must equal
    // the exact force change for any step size.
    let model = MeanCurvatureBending::new(0.05);
    let rest = hinge_rest();
    let x = hinge_bent();
    let dx = [
        Vec3::new(0.7, 0.2, -0.5),
        Vec3::new(-0.3, 0.6, 0.4),
        Vec3::new(0.2, -0.8, 0.1),
        Vec3::new(0.5, 0.3, -0.2),
    ];

    let mut moved = x;
    for i in 0..4 {
        moved[i] += dx[i];
    }
    let before = model.force(&x, &rest);
    let after = model.force(&moved, &rest);
    let delta = model.force_differential(&x, &rest, &dx);
    for i in 0..4 {
        let exact = after[i] - before[i];
        assert!((exact - delta[i]).length() < 1e-12);
    }
}

#[test]
fn bending_rest_state_is_force_free() {
    let model = MeanCurvatureBending::default();
    let rest = hinge_rest();
    for f in model.force(&rest, &rest) {
        assert!(f.length() < 1e-15);
    }
    assert!(model.energy(&rest, &rest).abs() < 1e-15);
}

#[test]
fn isobaric_air_ignores_volume() {
    let air = IsobaricAir::new(2.5);
    assert_eq!(air.pressure(0.1), 2.5);
    assert_eq!(air.pressure(100.0), 2.5);
    assert_eq!(air.pressure_volume_derivative(7.0), 0.0);
}

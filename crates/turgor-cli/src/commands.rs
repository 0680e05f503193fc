//! CLI command implementations.

use std::error::Error;
use std::path::Path;

use turgor_engine::{Engine, EngineConfig};
use turgor_io::{read_tetra_mesh_file, write_tetra_mesh_file};
use turgor_material::{
    AirModel, IsobaricAir, MeanCurvatureBending, NeoHookean, NeoHookeanFilm,
};
use turgor_mesh::{Surface, TetraMesh};
use turgor_optim::{OptimConfig, Optimizer};
use turgor_telemetry::{EventBus, EventKind, SolverEvent, TracingSink};

/// Validate a mesh file and print its statistics.
pub fn validate(path: &str) -> Result<(), Box<dyn Error>> {
    let mesh = read_tetra_mesh_file(path)?;
    mesh.validate()?;
    let surface = Surface::extract(&mesh);

    println!("Mesh: {path}");
    println!("  Vertices:          {}", mesh.vertex_count());
    println!("  Tetrahedra:        {}", mesh.tetra_count());
    println!("  Fixed vertices:    {}", mesh.fixed_ids().len());
    println!("  Rigid groups:      {}", mesh.rigid_groups.len());
    println!("  Holes:             {}", mesh.holes.len());
    println!("  Surface triangles: {}", surface.triangle_count());
    println!("  Surface hinges:    {}", surface.hinges.len());
    println!(
        "  Enclosed volume:   {:.6}",
        surface.enclosed_volume(&mesh.positions)
    );
    Ok(())
}

/// Run implicit backward Euler timesteps, writing one mesh per step.
pub fn simulate(
    path: &str,
    steps: u32,
    dt: f64,
    config_path: Option<&str>,
    output_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let mut mesh = read_tetra_mesh_file(path)?;
    let config = match config_path {
        Some(p) => toml::from_str(&std::fs::read_to_string(p)?)?,
        None => EngineConfig::default(),
    };
    std::fs::create_dir_all(output_dir)?;

    let mut bus = telemetry_bus();
    let mut engine = Engine::new(&mesh, config, Box::new(NeoHookean::default()))?;

    for step in 0..steps {
        engine.input_data(&mesh);
        let report = engine.solve_next_timestep(dt)?;
        engine.step_to_next();
        engine.output_data(&mut mesh);

        bus.emit(SolverEvent::new(
            step,
            EventKind::Convergence {
                newton_iterations: report.newton_iterations,
                cg_iterations: report.cg_iterations,
                residual: report.residual,
                converged: report.converged,
            },
        ));
        bus.emit(SolverEvent::new(
            step,
            EventKind::Energy {
                elastic: engine.elastic_energy(&mesh.positions),
            },
        ));

        let out = numbered_path(output_dir, "s", step);
        write_tetra_mesh_file(&out, &mesh, &format!("t = {:.6}", (step + 1) as f64 * dt))?;
        bus.emit(SolverEvent::new(
            step,
            EventKind::MeshWritten {
                path: out.display().to_string(),
            },
        ));
        bus.flush();
    }

    bus.shutdown();
    Ok(())
}

/// Quasistatic pressure sweep: raise the cavity pressure step by step,
/// apply it as nodal loads on the boundary, and solve to equilibrium at
/// each level.
pub fn inflate(
    path: &str,
    steps: u32,
    pressure_step: f64,
    output_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let mut mesh = read_tetra_mesh_file(path)?;
    std::fs::create_dir_all(output_dir)?;

    let mut bus = telemetry_bus();
    let mut engine = Engine::new(&mesh, EngineConfig::default(), Box::new(NeoHookean::default()))?;
    let surface = Surface::extract(&mesh);
    let mut pressure = 0.0;

    // Undeformed reference frame first.
    let out = numbered_path(output_dir, "p", 0);
    write_tetra_mesh_file(&out, &mesh, &format!("pressure = {pressure}"))?;

    for step in 0..steps {
        pressure += pressure_step;
        let air = IsobaricAir::new(pressure);

        // Pressure load: p times the area-weighted outward normals of
        // the current configuration.
        let volume = surface.enclosed_volume(&mesh.positions);
        let normals = surface.vertex_area_normals(&mesh.positions);
        for (f, n) in mesh.external_forces.iter_mut().zip(&normals) {
            *f = air.pressure(volume) * *n;
        }

        engine.input_data(&mesh);
        let report = engine.solve_static_pos()?;
        engine.step_to_next();
        engine.output_data(&mut mesh);

        bus.emit(SolverEvent::new(
            step,
            EventKind::Convergence {
                newton_iterations: report.newton_iterations,
                cg_iterations: report.cg_iterations,
                residual: report.residual,
                converged: report.converged,
            },
        ));

        let out = numbered_path(output_dir, "p", step + 1);
        write_tetra_mesh_file(&out, &mesh, &format!("pressure = {pressure}"))?;
        bus.emit(SolverEvent::new(
            step,
            EventKind::MeshWritten {
                path: out.display().to_string(),
            },
        ));
        bus.flush();
    }

    bus.shutdown();
    Ok(())
}

/// Solve the inverse shape-design problem and write the result.
pub fn optimize(
    path: &str,
    target_path: &str,
    alpha: f64,
    beta: f64,
    gamma: f64,
    output: &str,
) -> Result<(), Box<dyn Error>> {
    let mut mesh = read_tetra_mesh_file(path)?;
    let target = read_tetra_mesh_file(target_path)?;

    let mut bus = telemetry_bus();
    let config = OptimConfig {
        alpha,
        beta,
        gamma,
        ..OptimConfig::default()
    };
    let mut optimizer = Optimizer::new(
        &mesh,
        &target,
        config,
        Box::new(NeoHookean::default()),
        Box::new(IsobaricAir::default()),
        Box::new(NeoHookeanFilm::default()),
        Box::new(MeanCurvatureBending::default()),
    )?;

    let report = optimizer.solve_optimal()?;
    bus.emit(SolverEvent::new(
        0,
        EventKind::OptimizerIteration {
            iteration: report.iterations,
            residual: report.residual,
        },
    ));

    optimizer.output_data(&mut mesh);
    write_tetra_mesh_file(
        output,
        &mesh,
        &format!("optimized toward {target_path}, residual = {:.3e}", report.residual),
    )?;
    bus.emit(SolverEvent::new(
        0,
        EventKind::MeshWritten {
            path: output.to_string(),
        },
    ));
    bus.shutdown();

    println!(
        "Optimization finished in {} iterations, residual {:.3e}",
        report.iterations, report.residual
    );
    Ok(())
}

fn telemetry_bus() -> EventBus {
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new()));
    bus
}

/// `<dir>/<prefix>_0000042.obj`
fn numbered_path(dir: &str, prefix: &str, index: u32) -> std::path::PathBuf {
    Path::new(dir).join(format!("{prefix}_{index:07}.obj"))
}

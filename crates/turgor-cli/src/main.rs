//! Turgor CLI — implicit elastodynamics and inverse shape design.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "turgor")]
#[command(version, about = "Turgor — implicit tetra elastodynamics and shape design")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a tetra mesh file and print its statistics.
    Validate {
        /// Path to the mesh file.
        path: String,
    },

    /// Run implicit timesteps on a mesh.
    Simulate {
        /// Path to the mesh file.
        path: String,

        /// Number of timesteps.
        #[arg(short, long, default_value_t = 60)]
        steps: u32,

        /// Timestep length in seconds.
        #[arg(short, long, default_value_t = turgor_types::constants::DEFAULT_DT)]
        dt: f64,

        /// Optional engine config (TOML).
        #[arg(short, long)]
        config: Option<String>,

        /// Output directory for numbered mesh files.
        #[arg(short, long, default_value = "output")]
        output: String,
    },

    /// Inflate a mesh through a quasistatic pressure sweep.
    Inflate {
        /// Path to the mesh file.
        path: String,

        /// Number of pressure increments.
        #[arg(short, long, default_value_t = 20)]
        steps: u32,

        /// Pressure added per increment.
        #[arg(long, default_value_t = 5e-5)]
        pressure_step: f64,

        /// Output directory for numbered mesh files.
        #[arg(short, long, default_value = "output")]
        output: String,
    },

    /// Solve the inverse shape-design problem toward a target mesh.
    Optimize {
        /// Path to the source mesh file.
        path: String,

        /// Path to the target mesh file.
        target: String,

        /// Shape-matching weight.
        #[arg(long, default_value_t = 10.0)]
        alpha: f64,

        /// Smoothness weight.
        #[arg(long, default_value_t = 1.0)]
        beta: f64,

        /// Thickness smoothing weight.
        #[arg(long, default_value_t = 100.0)]
        gamma: f64,

        /// Output path for the optimized mesh.
        #[arg(short, long, default_value = "optimized.obj")]
        output: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { path } => commands::validate(&path),
        Commands::Simulate {
            path,
            steps,
            dt,
            config,
            output,
        } => commands::simulate(&path, steps, dt, config.as_deref(), &output),
        Commands::Inflate {
            path,
            steps,
            pressure_step,
            output,
        } => commands::inflate(&path, steps, pressure_step, &output),
        Commands::Optimize {
            path,
            target,
            alpha,
            beta,
            gamma,
            output,
        } => commands::optimize(&path, &target, alpha, beta, gamma, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

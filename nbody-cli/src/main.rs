use clap::{Parser, Subcommand};
use nbody_core::{
    build_simulation_context, get_body_states, run_scenario, step_simulation, ScenarioConfig,
    UpdateOrder,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nbody")]
#[command(about = "nbody - A discrete-time N-body gravity simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Overrides applied on top of a scenario file
#[derive(clap::Args)]
struct Overrides {
    /// Maximum number of steps
    #[arg(long)]
    steps: Option<u64>,
    /// Gravitational constant used for every step
    #[arg(long)]
    gravity: Option<f64>,
    /// Skip collision checks
    #[arg(long)]
    no_collision: bool,
    /// Update bodies one at a time instead of from a shared snapshot
    #[arg(long)]
    sequential: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print the outcome
    Run {
        /// Path to the JSON scenario file
        file: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print every body's position after each step
    Trajectory {
        /// Path to the JSON scenario file
        file: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run { file, overrides } => run_file(&file, &overrides),
        Commands::Trajectory { file, overrides } => trajectory_file(&file, &overrides),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn load_scenario(
    file: &Path,
    overrides: &Overrides,
) -> Result<ScenarioConfig, Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    let mut scenario = ScenarioConfig::from_json(&source)?;

    if let Some(steps) = overrides.steps {
        scenario.steps = steps;
    }
    if let Some(g) = overrides.gravity {
        scenario.gravitational_constant = g;
    }
    if overrides.no_collision {
        scenario.collision_enabled = false;
    }
    if overrides.sequential {
        scenario.order = UpdateOrder::Sequential;
    }

    tracing::info!(
        file = %file.display(),
        bodies = scenario.bodies.len(),
        steps = scenario.steps,
        g = scenario.gravitational_constant,
        "scenario loaded"
    );
    Ok(scenario)
}

fn run_file(file: &Path, overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = load_scenario(file, overrides)?;
    let result = run_scenario(&scenario)?;

    match result.halt {
        Some(reason) => println!("halted after {} steps: {}", result.steps_run, reason),
        None => println!("completed {} steps", result.steps_run),
    }
    for body in result.bodies {
        println!(
            "body {}: pos = ({:.6}, {:.6}, {:.6}) vel = ({:.6}, {:.6}, {:.6})",
            body.index, body.pos.x, body.pos.y, body.pos.z, body.vel.x, body.vel.y, body.vel.z
        );
    }

    Ok(())
}

fn trajectory_file(file: &Path, overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = load_scenario(file, overrides)?;
    let mut ctx = build_simulation_context(&scenario)?;

    while !ctx.is_finished() {
        let result = step_simulation(&mut ctx, scenario.gravitational_constant)?;
        let positions: Vec<String> = get_body_states(&ctx)
            .iter()
            .map(|b| format!("{:.6},{:.6},{:.6}", b.pos.x, b.pos.y, b.pos.z))
            .collect();
        println!("{} {}", ctx.current_step(), positions.join(" "));

        if let nbody_core::StepResult::Halted(reason) = result {
            println!("halted: {}", reason);
        }
    }

    Ok(())
}

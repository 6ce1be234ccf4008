use clap::{Parser, Subcommand};
use rk_core::Vector;
use rk_results::{RunStore, export_banner, export_csv_file, render_table};
use rk_sim::{Integrator, SolveProgress};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

mod error;
mod scenario;

use error::CliResult;
use scenario::Scenario;

const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "rk-cli")]
#[command(about = "rkflow CLI - fixed-step RK4 integration of ODE systems", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate a scenario and export the trajectory to CSV
    Run {
        /// Path to a scenario YAML file (defaults to the SIR reference run)
        #[arg(long)]
        scenario: Option<PathBuf>,
        /// Step size override
        #[arg(long)]
        step: Option<f64>,
        /// Final time override
        #[arg(long)]
        t_final: Option<f64>,
        /// Output CSV path override
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also save the run into this run store directory
        #[arg(long)]
        store: Option<PathBuf>,
        /// Print every N-th sample in the console preview
        #[arg(long, default_value_t = 25)]
        preview_every: usize,
        /// Suppress progress and the console preview
        #[arg(short, long)]
        quiet: bool,
        /// Report solve wall time (same as setting RK_TIMING)
        #[arg(long)]
        timing: bool,
    },
    /// List runs saved in a run store
    Runs {
        /// Run store directory
        store: PathBuf,
    },
    /// Show details of a saved run
    ShowRun {
        /// Run store directory
        store: PathBuf,
        /// Run ID to display
        run_id: String,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            step,
            t_final,
            output,
            store,
            preview_every,
            quiet,
            timing,
        } => {
            if timing {
                rk_core::timing::enable_timing();
            }
            let mut scenario = match scenario {
                Some(path) => Scenario::load(&path)?,
                None => Scenario::default(),
            };
            if let Some(step) = step {
                scenario.step = step;
            }
            if let Some(t_final) = t_final {
                scenario.final_time = t_final;
            }
            if let Some(output) = output {
                scenario.output = output;
            }
            cmd_run(&scenario, store.as_deref(), preview_every, quiet)
        }
        Commands::Runs { store } => cmd_runs(&store),
        Commands::ShowRun { store, run_id } => cmd_show_run(&store, &run_id),
    }
}

fn cmd_run(
    scenario: &Scenario,
    store: Option<&Path>,
    preview_every: usize,
    quiet: bool,
) -> CliResult<()> {
    info!(scenario = %scenario.name, output = %scenario.output.display(), "run requested");
    println!("Running scenario: {}", scenario.name);
    println!(
        "  step = {}, final time = {}, initial state = {}",
        scenario.step,
        scenario.final_time,
        Vector::from_slice(&scenario.initial_state)
    );

    let mut integrator = Integrator::new(Vector::from_slice(&scenario.initial_state))?;
    integrator.configure(scenario.step, scenario.final_time)?;
    let model = scenario.model.build()?;

    let started = Instant::now();
    let mut last_emit = Instant::now();
    let solved = if quiet {
        integrator.solve(&*model).map(|_| ())
    } else {
        let result = integrator
            .solve_with_progress(
                &*model,
                Some(&mut |p: &SolveProgress| {
                    if last_emit.elapsed().as_millis() >= 100 || p.step == p.n_steps {
                        render_cli_progress(p);
                        last_emit = Instant::now();
                    }
                }),
            )
            .map(|_| ());
        clear_progress_line();
        result
    };

    if let Err(e) = solved {
        eprintln!("ERROR: {e}");
        println!("{}", export_banner(false));
        return Err(e.into());
    }

    let stats = integrator.stats();
    println!(
        "✓ Integration completed: {} steps, {} rhs evaluations, {:.3}s",
        stats.steps,
        stats.rhs_evaluations,
        started.elapsed().as_secs_f64()
    );
    if let Some(elapsed) = stats.elapsed_s {
        println!("[TIMING] solve: {:.3}s", elapsed);
    }

    if !quiet {
        if let Some(traj) = integrator.trajectory() {
            println!("\nWRITING DATA TO CSV");
            println!("-------------------");
            print!("{}", render_table(traj, preview_every));
            println!("-------------------------------");
        }
    }

    match export_csv_file(&scenario.output, &integrator) {
        Ok(()) => {
            println!("{}", export_banner(true));
            println!("  Output: {}", scenario.output.display());
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            println!("{}", export_banner(false));
            return Err(e.into());
        }
    }

    if let Some(store_dir) = store {
        let store = RunStore::new(store_dir.to_path_buf())?;
        let manifest = store.save_integrator(
            &scenario.name,
            &scenario.model,
            &integrator,
            SOLVER_VERSION,
        )?;
        println!("✓ Run saved: {}", manifest.run_id);
    }

    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(80));
    let _ = io::stdout().flush();
}

fn render_cli_progress(p: &SolveProgress) {
    let width = 28usize;
    let filled = ((p.fraction_complete * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  t={:.3}  step={}/{}",
        bar,
        p.fraction_complete * 100.0,
        p.t,
        p.step,
        p.n_steps
    );
    let _ = io::stdout().flush();
}

fn cmd_runs(store_dir: &Path) -> CliResult<()> {
    let store = RunStore::new(store_dir.to_path_buf())?;
    let runs = store.list_runs()?;

    if runs.is_empty() {
        println!("No saved runs in: {}", store_dir.display());
    } else {
        println!("Saved runs in '{}':", store_dir.display());
        for manifest in runs {
            println!(
                "  {} - {} ({})",
                manifest.run_id, manifest.config.name, manifest.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show_run(store_dir: &Path, run_id: &str) -> CliResult<()> {
    println!("Loading run: {}", run_id);

    let store = RunStore::new(store_dir.to_path_buf())?;
    let manifest = store.load_manifest(run_id)?;
    let trajectory = store.load_trajectory(run_id)?;

    println!("\nRun Summary:");
    println!("  Scenario: {}", manifest.config.name);
    println!("  Model: {:?}", manifest.config.model);
    println!(
        "  Step: {}  Final time: {}",
        manifest.config.step, manifest.config.final_time
    );
    println!("  Samples: {}", trajectory.len());
    println!("  Dimension: {}", trajectory.dimension());
    if let Some(last) = trajectory.final_state() {
        println!("  Final state: {}", last);
    }
    println!("  Solver version: {}", manifest.solver_version);
    println!("  Saved: {}", manifest.timestamp);
    Ok(())
}

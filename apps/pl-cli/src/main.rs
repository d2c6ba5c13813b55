use clap::{Parser, Subcommand};
use pl_app::{
    AppResult, LoopMetrics, RunOptions, RunRequest, RunTimingSummary, Variable, compile_scenario,
    compute_run_metrics, extract_series, get_run_summary, run_service, scenario_service,
};
use pl_project::schema::Scenario;
use pl_results::{RunManifest, TimeseriesRecord, write_csv, write_series_csv};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "piloop")]
#[command(about = "piloop - sampled PI control loop simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the discrete plant recurrence coefficients
    Coefficients {
        /// Path to the scenario YAML file (built-in heater scenario if omitted)
        scenario_path: Option<PathBuf>,
    },
    /// Run a closed-loop simulation
    Run {
        /// Path to the scenario YAML file (built-in heater scenario if omitted)
        scenario_path: Option<PathBuf>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
        /// Also write the time series to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Validate scenario file syntax and values
    Validate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Write the built-in heater scenario to a new file
    Init {
        /// Destination path for the scenario YAML file
        path: PathBuf,
    },
    /// List cached runs for a scenario
    Runs {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Delete a cached run
    DeleteRun {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Run ID to delete
        run_id: String,
    },
    /// Export a cached run as CSV
    ExportCsv {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Export only this signal (reference, output or control)
        #[arg(short, long)]
        variable: Option<Variable>,
    },
}

fn main() -> AppResult<()> {
    // Logs go to stderr so CSV on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Coefficients { scenario_path } => cmd_coefficients(scenario_path.as_deref()),
        Commands::Run {
            scenario_path,
            no_cache,
            csv,
        } => cmd_run(scenario_path.as_deref(), !no_cache, csv.as_deref()),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Init { path } => cmd_init(&path),
        Commands::Runs { scenario_path } => cmd_runs(&scenario_path),
        Commands::ShowRun {
            scenario_path,
            run_id,
        } => cmd_show_run(&scenario_path, &run_id),
        Commands::DeleteRun {
            scenario_path,
            run_id,
        } => cmd_delete_run(&scenario_path, &run_id),
        Commands::ExportCsv {
            scenario_path,
            run_id,
            output,
            variable,
        } => cmd_export_csv(&scenario_path, &run_id, output.as_deref(), variable),
    }
}

fn scenario_or_default(scenario_path: Option<&Path>) -> AppResult<Scenario> {
    match scenario_path {
        Some(path) => scenario_service::load_scenario(path),
        None => Ok(Scenario::default()),
    }
}

fn cmd_coefficients(scenario_path: Option<&Path>) -> AppResult<()> {
    let scenario = scenario_or_default(scenario_path)?;
    let compiled = compile_scenario(&scenario)?;
    let c = compiled.discrete.coefficients();

    println!(
        "Plant: {} / ({} s + 1), Ts = {} s",
        compiled.plant.gain(),
        compiled.plant.time_constant(),
        scenario.sample_period_s
    );
    println!("y[k] = b1*u[k-1] - a1*y[k-1]");
    println!("  b1 = {:.10}", c.b1);
    println!("  a1 = {:.10}", c.a1);
    match c.dc_gain() {
        Some(gain) => println!("  pole = {:.10}, dc gain = {:.6}", c.pole(), gain),
        None => println!("  pole = {:.10} (integrating, no dc gain)", c.pole()),
    }
    Ok(())
}

fn cmd_run(scenario_path: Option<&Path>, use_cache: bool, csv: Option<&Path>) -> AppResult<()> {
    let (manifest, records) = match scenario_path {
        Some(path) => {
            println!("Running scenario: {}", path.display());
            let request = RunRequest {
                scenario_path: path,
                options: RunOptions {
                    use_cache,
                    ..RunOptions::default()
                },
            };
            let response = run_service::ensure_run(&request)?;

            if response.loaded_from_cache {
                println!("✓ Loaded from cache: {}", response.run_id);
            } else {
                println!("✓ Simulation completed: {}", response.run_id);
            }
            print_timing_summary(&response.timing);

            run_service::load_run(path, &response.run_id)?
        }
        None => {
            println!("Running built-in heater scenario (not cached)");
            let (manifest, records) =
                run_service::run_scenario(&Scenario::default(), pl_app::ENGINE_VERSION)?;
            println!("✓ Simulation completed: {}", manifest.run_id);
            (manifest, records)
        }
    };

    print_run_summary(&manifest, &records)?;

    if let Some(path) = csv {
        write_csv(&records, BufWriter::new(File::create(path)?))?;
        println!("✓ Exported {} samples to {}", records.len(), path.display());
    }

    Ok(())
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = scenario_service::load_scenario(scenario_path)?;
    scenario_service::validate_scenario(&scenario)?;
    println!("✓ Scenario '{}' is valid", scenario.name);
    Ok(())
}

fn cmd_init(path: &Path) -> AppResult<()> {
    if path.exists() {
        return Err(pl_app::AppError::InvalidInput(format!(
            "refusing to overwrite existing file: {}",
            path.display()
        )));
    }
    scenario_service::save_scenario(path, &Scenario::default())?;
    println!("✓ Wrote default scenario to {}", path.display());
    Ok(())
}

fn cmd_runs(scenario_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(scenario_path)?;

    if runs.is_empty() {
        println!("No cached runs found for: {}", scenario_path.display());
    } else {
        println!("Cached runs for '{}':", scenario_path.display());
        for manifest in runs {
            println!(
                "  {} ({}, {} samples)",
                manifest.run_id, manifest.timestamp, manifest.samples
            );
        }
    }
    Ok(())
}

fn cmd_show_run(scenario_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, records) = run_service::load_run(scenario_path, run_id)?;

    println!("\nRun:");
    println!("  Scenario: {}", manifest.scenario_name);
    println!("  Created: {}", manifest.timestamp);
    println!("  Engine: {}", manifest.engine_version);
    println!(
        "  Ts = {} s, t_end = {} s",
        manifest.sample_period_s, manifest.t_end_s
    );
    println!(
        "  b1 = {:.10}, a1 = {:.10}",
        manifest.plant.b1, manifest.plant.a1
    );
    println!(
        "  Actuator: [{}, {}]",
        manifest.actuator.min, manifest.actuator.max
    );

    print_run_summary(&manifest, &records)
}

fn cmd_delete_run(scenario_path: &Path, run_id: &str) -> AppResult<()> {
    if run_service::delete_run(scenario_path, run_id)? {
        println!("✓ Deleted run: {}", run_id);
        Ok(())
    } else {
        Err(pl_app::AppError::RunNotFound(run_id.to_string()))
    }
}

fn cmd_export_csv(
    scenario_path: &Path,
    run_id: &str,
    output: Option<&Path>,
    variable: Option<Variable>,
) -> AppResult<()> {
    let (_manifest, records) = run_service::load_run(scenario_path, run_id)?;

    let write = |out: &mut dyn Write| match variable {
        Some(v) => write_series_csv(v.name(), &extract_series(&records, v), out),
        None => write_csv(&records, out),
    };

    if let Some(path) = output {
        write(&mut BufWriter::new(File::create(path)?))?;
        println!("✓ Exported {} samples to {}", records.len(), path.display());
    } else {
        write(&mut io::stdout().lock())?;
    }

    Ok(())
}

fn print_run_summary(manifest: &RunManifest, records: &[TimeseriesRecord]) -> AppResult<()> {
    let summary = get_run_summary(records)?;
    println!("\nRun summary:");
    println!("  Samples: {}", summary.record_count);
    println!(
        "  Time range: {:.3} - {:.3} s",
        summary.time_range.0, summary.time_range.1
    );
    println!(
        "  Final: reference = {:.3}, output = {:.3}, control = {:.3}",
        summary.final_reference, summary.final_output, summary.final_control
    );

    let metrics = compute_run_metrics(manifest, records)?;
    print_metrics(&metrics);
    Ok(())
}

fn print_metrics(metrics: &LoopMetrics) {
    fn show(label: &str, value: Option<f64>, unit: &str) {
        match value {
            Some(v) => println!("  {label:<22}{v:.3}{unit}"),
            None => println!("  {label:<22}-"),
        }
    }

    println!("\nLoop metrics:");
    if !metrics.has_data() {
        println!("  (no response data)");
        return;
    }
    show("Rise time 10%:", metrics.rise_time_10_s, " s");
    show("Rise time 90%:", metrics.rise_time_90_s, " s");
    show("Settling time 2%:", metrics.settling_time_2pct_s, " s");
    show("Overshoot:", metrics.overshoot_pct, " %");
    show("Steady-state error:", metrics.steady_state_error, "");
    show("Max control:", metrics.max_controller_output, "");
    show(
        "Saturated high:",
        metrics.controller_saturation_pct_upper,
        " % of time",
    );
    show(
        "Saturated low:",
        metrics.controller_saturation_pct_lower,
        " % of time",
    );
}

fn print_timing_summary(timing: &RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    let compile_pct = 100.0 * timing.compile_time_s / total;
    let simulate_pct = 100.0 * timing.simulate_time_s / total;
    let save_pct = 100.0 * timing.save_time_s / total;

    println!("\nTiming summary:");
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    } else {
        println!(
            "  Compile:  {:.3}s ({:.1}%)",
            timing.compile_time_s, compile_pct
        );
        println!(
            "  Simulate: {:.3}s ({:.1}%)",
            timing.simulate_time_s, simulate_pct
        );
        println!("  Save:     {:.3}s ({:.1}%)", timing.save_time_s, save_pct);
    }
    println!("  Total:    {:.3}s", timing.total_time_s);
}

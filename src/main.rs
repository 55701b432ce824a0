//! factory-sim entry point: CLI wiring, logging, and report output.

use std::path::Path;
use std::process;

use log::{LevelFilter, Log, Metadata, Record};

use factory_sim::cli::{CliOptions, parse_args, print_usage};
use factory_sim::config::ScenarioConfig;
use factory_sim::io::export::{export_comparison_csv, export_csv};
use factory_sim::runner::{RunError, RunResult, run_comparison, run_scenario};
use factory_sim::sim::types::Trajectory;

/// Writes `log` records to stderr as `[LEVEL] target: message`.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn load_scenario(cli: &CliOptions) -> Result<ScenarioConfig, String> {
    let mut scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name).map_err(|e| e.to_string())?
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(variant) = cli.variant {
        scenario.simulation.variant = variant.name().to_string();
    }
    Ok(scenario)
}

fn exit_with(error: &RunError) -> ! {
    match error {
        RunError::Config(errors) => {
            for e in errors {
                eprintln!("{e}");
            }
        }
        other => eprintln!("error: {other}"),
    }
    process::exit(1);
}

fn print_result(result: &RunResult) {
    if log::log_enabled!(log::Level::Debug) {
        for record in result.trajectory.records() {
            log::debug!("{record}");
        }
    }

    println!("Variant: {}", result.variant);
    println!("\n{}", result.summary);
    if let Some(ref analysis) = result.analysis {
        println!("\n{analysis}");
    }
}

fn main() {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            process::exit(1);
        }
    };
    init_logging(cli.verbose);

    let scenario = match load_scenario(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if cli.compare {
        let comparison = run_comparison(&scenario).unwrap_or_else(|e| exit_with(&e));
        println!("Model: {}", scenario.simulation.model);
        print_result(&comparison.heated);
        println!();
        print_result(&comparison.unheated);
        println!(
            "\nFinal temperature gap:      {:.6}",
            comparison.final_temperature_gap()
        );

        if let Some(ref path) = cli.series_out {
            let written = export_comparison_csv(
                &comparison.heated.trajectory,
                &comparison.unheated.trajectory,
                path,
            );
            report_series(written, path);
        }
        if let Some(ref path) = cli.plot_out {
            let title = format!("{} factory, heated vs. non-heated", scenario.simulation.model);
            write_plot(
                &comparison.heated.trajectory,
                Some(&comparison.unheated.trajectory),
                path,
                &title,
            );
        }
        return;
    }

    let result = run_scenario(&scenario).unwrap_or_else(|e| exit_with(&e));
    println!("Model: {}", scenario.simulation.model);
    print_result(&result);

    if let Some(ref path) = cli.series_out {
        report_series(export_csv(&result.trajectory, path), path);
    }
    if let Some(ref path) = cli.plot_out {
        let title = format!(
            "{} factory, {} heater",
            scenario.simulation.model, result.variant
        );
        write_plot(&result.trajectory, None, path, &title);
    }
}

fn report_series(written: std::io::Result<()>, path: &Path) {
    if let Err(e) = written {
        eprintln!("error: failed to write CSV: {e}");
        process::exit(1);
    }
    eprintln!("Series written to {}", path.display());
}

#[cfg(feature = "plot")]
fn write_plot(trajectory: &Trajectory, unheated: Option<&Trajectory>, path: &Path, title: &str) {
    let rendered = match unheated {
        Some(unheated) => factory_sim::plot::plot_comparison(trajectory, unheated, path, title),
        None => factory_sim::plot::plot_trajectory(trajectory, path, title),
    };
    if let Err(e) = rendered {
        eprintln!("error: failed to render plot: {e}");
        process::exit(1);
    }
    eprintln!("Plot written to {}", path.display());
}

#[cfg(not(feature = "plot"))]
fn write_plot(_trajectory: &Trajectory, _unheated: Option<&Trajectory>, path: &Path, _title: &str) {
    eprintln!(
        "error: cannot write {}: built without the `plot` feature",
        path.display()
    );
    process::exit(1);
}

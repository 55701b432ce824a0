use std::env;
use std::path::PathBuf;

use crate::config::ScenarioConfig;
use crate::sim::types::SimulationVariant;

pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub variant: Option<SimulationVariant>,
    pub series_out: Option<PathBuf>,
    pub plot_out: Option<PathBuf>,
    pub verbose: bool,
    pub compare: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut scenario = None;
    let mut preset = None;
    let mut variant = None;
    let mut series_out = None;
    let mut plot_out = None;
    let mut verbose = false;
    let mut compare = false;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--variant" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --variant (expected heated, toggled or non-heated)",
                )?;
                let parsed = name.parse::<SimulationVariant>().map_err(|e| e.to_string())?;
                if variant.replace(parsed).is_some() {
                    return Err("--variant provided more than once".to_string());
                }
            }
            "--series-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --series-out (expected a file path)")?;
                if series_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--series-out provided more than once".to_string());
                }
            }
            "--plot-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --plot-out (expected an SVG path)")?;
                if plot_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--plot-out provided more than once".to_string());
                }
            }
            "--verbose" | "-v" => verbose = true,
            "--compare" => compare = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if compare && variant.is_some() {
        return Err(
            "arguments `--compare` and `--variant` are mutually exclusive; \
             --compare always runs heated and non-heated"
                .to_string(),
        );
    }

    if scenario.is_some() && preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if scenario.is_none() && preset.is_none() {
        preset = Some("baseline".to_string());
    }

    Ok(CliOptions {
        scenario,
        preset,
        variant,
        series_out,
        plot_out,
        verbose,
        compare,
    })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("factory-sim: indoor temperature of a heated factory");
    eprintln!();
    eprintln!("Usage:");
    eprintln!(
        "  factory-sim [--scenario <path> | --preset <name>] [--variant <name>] \
         [--compare] [--series-out <path>] [--plot-out <path>] [--verbose]"
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>     Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>       Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!(
        "  --variant <name>      Override the heater regime ({})",
        SimulationVariant::NAMES.join(", ")
    );
    eprintln!("  --compare             Run heated and non-heated side by side");
    eprintln!("  --series-out <path>   Export the simulated series to CSV");
    eprintln!("  --plot-out <path>     Render indoor vs. outdoor temperature as SVG (feature `plot`)");
    eprintln!("  --verbose, -v         Log run details and per-step records to stderr");
    eprintln!("  --help                Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

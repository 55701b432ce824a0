mod common;

use std::process::{Command, Output};

#[derive(Debug)]
struct Report {
    final_temperature: f64,
    heater_duty_pct: f64,
    toggles: f64,
}

#[test]
fn presets_run_via_cli_and_produce_distinct_dynamics() {
    let baseline = run_and_parse(&["--preset", "baseline"]);
    let unheated = run_and_parse(&["--preset", "unheated"]);
    let toggled = run_and_parse(&["--preset", "toggled"]);
    let factory = run_and_parse(&["--preset", "factory"]);

    assert!(
        baseline.final_temperature > unheated.final_temperature,
        "expected heated run to end warmer: baseline={:.6}, unheated={:.6}",
        baseline.final_temperature,
        unheated.final_temperature
    );
    assert_eq!(baseline.heater_duty_pct, 100.0);
    assert_eq!(unheated.heater_duty_pct, 0.0);
    assert_eq!(toggled.toggles, 4.0);
    assert!(
        (toggled.heater_duty_pct - 100.0 / 3.0).abs() < 0.1,
        "toggled preset heater duty: {:.3}",
        toggled.heater_duty_pct
    );
    assert!(
        (270.0..300.0).contains(&factory.final_temperature),
        "factory final temperature out of range: {:.3}",
        factory.final_temperature
    );
}

#[test]
fn scenario_files_run_via_cli() {
    for path in [
        "scenarios/baseline.toml",
        "scenarios/night_shift.toml",
        "scenarios/steel_hall.toml",
    ] {
        let output = run(&["--scenario", path]);
        assert!(
            output.status.success(),
            "scenario run failed for {path}: stderr={}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

#[test]
fn steady_state_report_is_printed_when_analysis_is_enabled() {
    let output = run(&["--preset", "baseline"]);
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    let phase = common::parse_metric(&stdout, "Mean phase difference:", "");
    let amplitude = common::parse_metric(&stdout, "Mean amplitude difference:", "");
    assert!(phase >= 0.0);
    assert!(amplitude >= 0.0);
}

#[test]
fn variant_override_switches_heater_regime() {
    let report = run_and_parse(&["--preset", "baseline", "--variant", "non-heated"]);
    assert_eq!(report.heater_duty_pct, 0.0);
}

#[test]
fn series_out_writes_one_row_per_step() {
    let path = std::env::temp_dir().join("factory_sim_cli_series.csv");
    let output = run(&[
        "--preset",
        "unheated",
        "--series-out",
        path.to_str().expect("temp path is UTF-8"),
    ]);
    assert!(output.status.success());

    let csv = std::fs::read_to_string(&path).expect("series file should exist");
    std::fs::remove_file(&path).ok();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("step,time,indoor_temp,outdoor_temp,delta,heater_on")
    );
    assert_eq!(lines.count(), 1000);
}

#[test]
fn compare_prints_both_runs_and_writes_side_by_side_series() {
    let path = std::env::temp_dir().join("factory_sim_cli_compare.csv");
    let output = run(&[
        "--preset",
        "factory",
        "--compare",
        "--series-out",
        path.to_str().expect("temp path is UTF-8"),
    ]);
    assert!(
        output.status.success(),
        "compare run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.contains("Variant: heated"));
    assert!(stdout.contains("Variant: non-heated"));
    assert!(common::parse_metric(&stdout, "Final temperature gap:", "") > 0.0);

    let csv = std::fs::read_to_string(&path).expect("series file should exist");
    std::fs::remove_file(&path).ok();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("step,time,heated_temp,unheated_temp,outdoor_temp")
    );
    assert_eq!(lines.count(), 7200);
}

#[test]
fn invalid_inputs_exit_with_failure() {
    assert!(!run(&["--preset", "nonexistent"]).status.success());
    assert!(!run(&["--variant", "lukewarm"]).status.success());
    assert!(!run(&["--scenario", "scenarios/missing.toml"]).status.success());
    assert!(!run(&["--compare", "--variant", "heated"]).status.success());
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_factory-sim"))
        .args(args)
        .output()
        .expect("factory-sim process should run")
}

fn run_and_parse(args: &[&str]) -> Report {
    let output = run(args);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    Report {
        final_temperature: common::parse_metric(&stdout, "Final indoor temperature:", ""),
        heater_duty_pct: common::parse_metric(&stdout, "Heater duty:", "%"),
        toggles: common::parse_metric(&stdout, "Heater toggles:", ""),
    }
}

//! Deadlock-avoidance simulator CLI.
//!
//! Loads a scenario file, checks the initial state, and evaluates each
//! request in order, printing the engine's decision for every one.
//!
//! Exit status: 0 for a normal run, 1 when the initial state is already
//! deadlocked (no requests are evaluated), 2 for usage or scenario
//! errors.

use anyhow::Context;
use banker_simulator::{Scenario, SimulationRunner};
use banker_types::SafetyVerdict;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "banker-sim")]
#[command(about = "Deadlock-avoidance simulator for resource requests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a scenario's initial state is safe
    Check {
        /// Path to the scenario TOML file
        scenario: PathBuf,
    },

    /// Evaluate every request in a scenario against its initial state
    Run {
        /// Path to the scenario TOML file
        scenario: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match execute(Cli::parse()) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Check { scenario } => {
            let mut runner = load_runner(&scenario)?;
            let verdict = runner.initial_safety();
            println!("initial state: {verdict}");
            Ok(verdict_exit_code(verdict))
        }
        Commands::Run { scenario } => {
            let report = load_runner(&scenario)?.run();
            println!("initial state: {}", report.initial);
            if !report.initial.is_safe() {
                println!("no requests evaluated");
                return Ok(ExitCode::from(1));
            }

            for line in report.request_lines() {
                println!("{line}");
            }
            println!(
                "{} granted, {} partially granted, {} denied, {} led to deadlock",
                report.granted(),
                report.partially_granted(),
                report.denied(),
                report.deadlocked(),
            );
            if report.skipped > 0 {
                println!("{} malformed requests skipped", report.skipped);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_runner(path: &Path) -> anyhow::Result<SimulationRunner> {
    let scenario = Scenario::from_path(path)
        .with_context(|| format!("loading scenario {}", path.display()))?;
    SimulationRunner::new(scenario).context("invalid scenario")
}

fn verdict_exit_code(verdict: SafetyVerdict) -> ExitCode {
    if verdict.is_safe() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

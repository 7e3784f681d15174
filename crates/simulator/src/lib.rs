//! Scenario-driven simulator for the resource manager.
//!
//! This crate is the I/O collaborator around `banker-engine`: it loads a
//! scenario (initial allocation state plus a sequence of resource
//! requests) from a TOML file, feeds the requests through the engine one
//! at a time, and reports the decisions.
//!
//! # Example
//!
//! ```ignore
//! use banker_simulator::{Scenario, SimulationRunner};
//!
//! let scenario = Scenario::from_path("scenario.toml")?;
//! let runner = SimulationRunner::new(scenario)?;
//! let report = runner.run();
//!
//! println!("initial state: {}", report.initial);
//! for line in report.request_lines() {
//!     println!("{line}");
//! }
//! ```

pub mod runner;
pub mod scenario;

pub use runner::{RequestReport, SimulationReport, SimulationRunner};
pub use scenario::{RequestEntry, Scenario, ScenarioError};

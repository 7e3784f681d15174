//! The simulation run loop.

use crate::scenario::{RequestEntry, Scenario, ScenarioError};
use banker_engine::ResourceManager;
use banker_types::{GrantMode, ProcessId, RequestOutcome, ResourceRequest, SafetyVerdict};
use tracing::{info, warn};

/// The decision for one evaluated request, as reported to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestReport {
    /// 1-based process id, as written in the scenario.
    pub process: usize,
    /// Units requested per resource type.
    pub demand: Vec<u64>,
    /// The engine's decision.
    pub outcome: RequestOutcome,
}

/// Summary of a full simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Verdict for the scenario's initial state. When this is
    /// [`SafetyVerdict::Deadlocked`] no requests were evaluated.
    pub initial: SafetyVerdict,
    /// Per-request decisions, in scenario order.
    pub requests: Vec<RequestReport>,
    /// Requests dropped because they were malformed (nonexistent
    /// process id or misshapen demand vector).
    pub skipped: usize,
}

impl SimulationReport {
    /// Requests granted in full.
    pub fn granted(&self) -> usize {
        self.count(|r| {
            matches!(
                r.outcome,
                RequestOutcome::Granted {
                    mode: GrantMode::Full,
                    ..
                }
            )
        })
    }

    /// Requests granted by recording the allocation only.
    pub fn partially_granted(&self) -> usize {
        self.count(|r| {
            matches!(
                r.outcome,
                RequestOutcome::Granted {
                    mode: GrantMode::Recorded,
                    ..
                }
            )
        })
    }

    /// Requests denied for exceeding a declared maximum.
    pub fn denied(&self) -> usize {
        self.count(|r| r.outcome.is_denied())
    }

    /// Grants whose post-grant state was deadlocked.
    pub fn deadlocked(&self) -> usize {
        self.count(|r| r.outcome.verdict() == Some(SafetyVerdict::Deadlocked))
    }

    /// One human-readable line per evaluated request.
    pub fn request_lines(&self) -> Vec<String> {
        self.requests
            .iter()
            .map(|r| {
                format!(
                    "process {} requesting {:?}: {}",
                    r.process, r.demand, r.outcome
                )
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&RequestReport) -> bool) -> usize {
        self.requests.iter().filter(|r| predicate(r)).count()
    }
}

/// Drives a scenario through the engine, one request at a time.
pub struct SimulationRunner {
    manager: ResourceManager,
    requests: Vec<RequestEntry>,
}

impl SimulationRunner {
    /// Build a runner from a parsed scenario.
    pub fn new(scenario: Scenario) -> Result<Self, ScenarioError> {
        let snapshot = scenario.to_snapshot()?;
        Ok(Self {
            manager: ResourceManager::new(snapshot),
            requests: scenario.requests,
        })
    }

    /// Check the initial state only.
    pub fn initial_safety(&mut self) -> SafetyVerdict {
        self.manager.initial_safety()
    }

    /// Run the whole scenario.
    ///
    /// The initial state is checked first; if it is already deadlocked
    /// the run stops there and no requests are evaluated. Malformed
    /// requests are logged and skipped; the run continues with the next
    /// request.
    pub fn run(mut self) -> SimulationReport {
        let initial = self.manager.initial_safety();
        info!(verdict = %initial, "initial state checked");
        if !initial.is_safe() {
            warn!("initial state is already deadlocked; evaluating no requests");
            return SimulationReport {
                initial,
                requests: Vec::new(),
                skipped: 0,
            };
        }

        let mut reports = Vec::with_capacity(self.requests.len());
        let mut skipped = 0;
        for entry in &self.requests {
            // Scenario files use 1-based process ids.
            let Some(index) = entry.process.checked_sub(1) else {
                warn!(process = entry.process, "skipping request: process ids start at 1");
                skipped += 1;
                continue;
            };

            let request = ResourceRequest::new(ProcessId::new(index), entry.demand.clone());
            match self.manager.evaluate(&request) {
                Ok(outcome) => {
                    info!(process = entry.process, %outcome, "request evaluated");
                    reports.push(RequestReport {
                        process: entry.process,
                        demand: entry.demand.clone(),
                        outcome,
                    });
                }
                Err(error) => {
                    warn!(process = entry.process, %error, "skipping malformed request");
                    skipped += 1;
                }
            }
        }

        SimulationReport {
            initial,
            requests: reports,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CLASSIC: &str = r#"
        available = [3, 3, 2]
        allocation = [
            [0, 1, 0],
            [2, 0, 0],
            [3, 0, 2],
            [2, 1, 1],
            [0, 0, 2],
        ]
        maximum = [
            [7, 5, 3],
            [3, 2, 2],
            [9, 0, 2],
            [2, 2, 2],
            [4, 3, 3],
        ]

        # Fully grantable and leaves the state safe.
        [[request]]
        process = 2
        demand = [1, 0, 2]

        # Above the declared maximum: denied.
        [[request]]
        process = 1
        demand = [8, 0, 0]

        # Within the maximum but above availability: recorded only.
        [[request]]
        process = 1
        demand = [4, 0, 0]

        # Drains the pool; grantable but the result deadlocks.
        [[request]]
        process = 5
        demand = [3, 3, 0]

        # Process ids are 1-based, so this one does not exist.
        [[request]]
        process = 0
        demand = [1, 1, 1]

        # Neither does this one.
        [[request]]
        process = 6
        demand = [1, 1, 1]
    "#;

    #[test]
    fn test_classic_scenario_end_to_end() {
        let scenario: Scenario = CLASSIC.parse().unwrap();
        let report = SimulationRunner::new(scenario).unwrap().run();

        assert_eq!(report.initial, SafetyVerdict::Safe);
        assert_eq!(report.requests.len(), 4);
        assert_eq!(report.granted(), 2);
        assert_eq!(report.partially_granted(), 1);
        assert_eq!(report.denied(), 1);
        assert_eq!(report.deadlocked(), 1);
        assert_eq!(report.skipped, 2);

        assert_eq!(
            report.requests[0].outcome.verdict(),
            Some(SafetyVerdict::Safe)
        );
        assert!(report.requests[1].outcome.is_denied());
        assert_eq!(
            report.requests[3].outcome.verdict(),
            Some(SafetyVerdict::Deadlocked)
        );
    }

    #[test]
    fn test_deadlocked_initial_state_stops_the_run() {
        let scenario: Scenario = r#"
            available = [0, 0]
            allocation = [[1, 1], [2, 1]]
            maximum = [[2, 2], [3, 2]]

            [[request]]
            process = 1
            demand = [1, 0]
        "#
        .parse()
        .unwrap();

        let report = SimulationRunner::new(scenario).unwrap().run();
        assert_eq!(report.initial, SafetyVerdict::Deadlocked);
        assert!(report.requests.is_empty());
    }

    #[test]
    fn test_scenario_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CLASSIC.as_bytes()).unwrap();

        let scenario = Scenario::from_path(file.path()).unwrap();
        let report = SimulationRunner::new(scenario).unwrap().run();
        assert_eq!(report.initial, SafetyVerdict::Safe);
        assert_eq!(report.request_lines().len(), 4);
    }
}

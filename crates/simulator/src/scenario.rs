//! Scenario files: the initial state and request sequence to simulate.

use banker_engine::{ResourceSnapshot, SnapshotError};
use banker_types::{Matrix, ShapeError};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Failures while loading or validating a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid scenario TOML.
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    /// A table row has the wrong number of entries.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The tables do not form a valid snapshot.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// One request row in a scenario file.
///
/// Process ids are 1-based in scenario files, the way operators number
/// processes; the runner translates them to table indices.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RequestEntry {
    /// 1-based id of the requesting process.
    pub process: usize,
    /// Units requested per resource type.
    pub demand: Vec<u64>,
}

/// A complete simulation scenario.
///
/// ```toml
/// available = [3, 3, 2]
/// allocation = [[0, 1, 0], [2, 0, 0]]
/// maximum = [[7, 5, 3], [3, 2, 2]]
///
/// [[request]]
/// process = 2
/// demand = [1, 0, 2]
/// ```
///
/// The number of resource types is the length of `available`; the number
/// of processes is the number of `allocation` rows.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Units of each resource type initially unallocated.
    pub available: Vec<u64>,
    /// Units currently held, one row per process.
    pub allocation: Vec<Vec<u64>>,
    /// Declared ceilings, one row per process.
    pub maximum: Vec<Vec<u64>>,
    /// Requests to evaluate, in order.
    #[serde(default, rename = "request")]
    pub requests: Vec<RequestEntry>,
}

impl Scenario {
    /// Load a scenario from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Ok(text.parse()?)
    }

    /// Build the validated baseline snapshot described by the tables.
    pub fn to_snapshot(&self) -> Result<ResourceSnapshot, ScenarioError> {
        let resources = self.available.len();
        let allocation = Matrix::from_rows(self.allocation.clone(), resources)?;
        let maximum = Matrix::from_rows(self.maximum.clone(), resources)?;
        Ok(ResourceSnapshot::new(
            self.available.clone(),
            allocation,
            maximum,
        )?)
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        available = [1, 2]
        allocation = [[1, 0], [0, 1]]
        maximum = [[2, 1], [1, 3]]

        [[request]]
        process = 1
        demand = [0, 1]
    "#;

    #[test]
    fn test_parse_minimal_scenario() {
        let scenario: Scenario = MINIMAL.parse().unwrap();
        assert_eq!(scenario.available, vec![1, 2]);
        assert_eq!(scenario.requests.len(), 1);
        assert_eq!(scenario.requests[0].process, 1);
        assert_eq!(scenario.requests[0].demand, vec![0, 1]);

        let snapshot = scenario.to_snapshot().unwrap();
        assert_eq!(snapshot.process_count(), 2);
        assert_eq!(snapshot.resource_count(), 2);
    }

    #[test]
    fn test_requests_are_optional() {
        let scenario: Scenario = r#"
            available = [1]
            allocation = [[0]]
            maximum = [[1]]
        "#
        .parse()
        .unwrap();
        assert!(scenario.requests.is_empty());
    }

    #[test]
    fn test_ragged_allocation_row_is_rejected() {
        let scenario: Scenario = r#"
            available = [1, 1]
            allocation = [[1]]
            maximum = [[2, 2]]
        "#
        .parse()
        .unwrap();
        assert!(matches!(
            scenario.to_snapshot().unwrap_err(),
            ScenarioError::Shape(_)
        ));
    }

    #[test]
    fn test_allocation_over_maximum_is_rejected() {
        let scenario: Scenario = r#"
            available = [0]
            allocation = [[3]]
            maximum = [[2]]
        "#
        .parse()
        .unwrap();
        assert!(matches!(
            scenario.to_snapshot().unwrap_err(),
            ScenarioError::Snapshot(SnapshotError::AllocationExceedsMaximum {
                process: 0,
                resource: 0
            })
        ));
    }
}

//! Error types for snapshot construction and request evaluation.

use banker_types::ProcessId;
use thiserror::Error;

/// Rejections when constructing a [`crate::ResourceSnapshot`].
///
/// No snapshot is created when any of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The allocation table has no process rows.
    #[error("process count must be at least 1")]
    InvalidProcessCount,

    /// The allocation table has no resource columns.
    #[error("resource type count must be at least 1")]
    InvalidResourceCount,

    /// Allocation and maximum tables disagree on shape.
    #[error("maximum table is {actual_rows}x{actual_cols}, expected {rows}x{cols}")]
    MatrixShape {
        /// Expected rows (from the allocation table).
        rows: usize,
        /// Expected columns (from the allocation table).
        cols: usize,
        /// Rows of the maximum table.
        actual_rows: usize,
        /// Columns of the maximum table.
        actual_cols: usize,
    },

    /// The available vector's length disagrees with the resource count.
    #[error("available vector has {actual} entries, expected {expected}")]
    AvailableShape {
        /// Resource type count from the allocation table.
        expected: usize,
        /// Entries in the available vector.
        actual: usize,
    },

    /// A process is recorded as holding more than its declared maximum.
    #[error("process {process} holds more of resource {resource} than its declared maximum")]
    AllocationExceedsMaximum {
        /// Offending process row.
        process: usize,
        /// Offending resource column.
        resource: usize,
    },
}

/// Per-request rejections, reported before any evaluation happens.
///
/// These are distinct from a policy-level denial: the caller may correct
/// the request and retry, and no state has been touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The request names a process outside the snapshot's tables.
    #[error("no such process {process} (process count is {process_count})")]
    UnknownProcess {
        /// The process id as requested.
        process: ProcessId,
        /// Number of processes in the snapshot.
        process_count: usize,
    },

    /// The demand vector's length disagrees with the resource count.
    #[error("demand vector has {actual} entries, expected {expected}")]
    DemandShape {
        /// Resource type count of the snapshot.
        expected: usize,
        /// Entries in the demand vector.
        actual: usize,
    },
}

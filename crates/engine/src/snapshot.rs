//! Complete snapshots of the resource manager's bookkeeping.

use crate::error::SnapshotError;
use banker_types::Matrix;

/// One complete snapshot of system state: what is available, what each
/// process holds, and what each process declared it may ever hold.
///
/// Two snapshots coexist inside [`crate::ResourceManager`]: the committed
/// baseline and a disposable scratch copy. They share shape but own
/// independent storage; mutating one never aliases into the other.
///
/// Invariants established at construction and preserved thereafter:
///
/// - `allocation[p][r] <= maximum[p][r]` for every process and resource
/// - `available[r] + sum_p allocation[p][r]` is the constant total supply
///   of resource `r` (the partial-grant path of request evaluation
///   deliberately relaxes this inside the scratch copy; see
///   [`crate::ResourceManager::evaluate`])
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSnapshot {
    pub(crate) available: Vec<u64>,
    pub(crate) allocation: Matrix,
    pub(crate) maximum: Matrix,
}

impl ResourceSnapshot {
    /// Build a snapshot, validating shapes and the allocation-within-
    /// maximum invariant. No snapshot is created on error.
    pub fn new(
        available: Vec<u64>,
        allocation: Matrix,
        maximum: Matrix,
    ) -> Result<Self, SnapshotError> {
        let processes = allocation.rows();
        let resources = allocation.cols();

        if processes == 0 {
            return Err(SnapshotError::InvalidProcessCount);
        }
        if resources == 0 {
            return Err(SnapshotError::InvalidResourceCount);
        }
        if maximum.rows() != processes || maximum.cols() != resources {
            return Err(SnapshotError::MatrixShape {
                rows: processes,
                cols: resources,
                actual_rows: maximum.rows(),
                actual_cols: maximum.cols(),
            });
        }
        if available.len() != resources {
            return Err(SnapshotError::AvailableShape {
                expected: resources,
                actual: available.len(),
            });
        }
        for process in 0..processes {
            for resource in 0..resources {
                if allocation.row(process)[resource] > maximum.row(process)[resource] {
                    return Err(SnapshotError::AllocationExceedsMaximum { process, resource });
                }
            }
        }

        Ok(Self {
            available,
            allocation,
            maximum,
        })
    }

    /// Number of processes.
    pub fn process_count(&self) -> usize {
        self.allocation.rows()
    }

    /// Number of resource types.
    pub fn resource_count(&self) -> usize {
        self.allocation.cols()
    }

    /// Currently unallocated units per resource type.
    pub fn available(&self) -> &[u64] {
        &self.available
    }

    /// Units held by one process, per resource type.
    pub fn allocation_row(&self, process: usize) -> &[u64] {
        self.allocation.row(process)
    }

    /// Declared ceiling for one process, per resource type.
    pub fn maximum_row(&self, process: usize) -> &[u64] {
        self.maximum.row(process)
    }

    /// Total supply of one resource type: available plus everything
    /// currently held.
    pub fn total_supply(&self, resource: usize) -> u64 {
        self.available[resource] + self.allocation.column_sum(resource)
    }

    /// Overwrite `available` and `allocation` from a baseline of
    /// identical shape. Maximum tables never change after construction
    /// and are not re-copied.
    pub(crate) fn restore_from(&mut self, baseline: &ResourceSnapshot) {
        self.available.copy_from_slice(&baseline.available);
        self.allocation.copy_from(&baseline.allocation);
    }
}

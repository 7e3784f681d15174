//! Request evaluation against a committed baseline.

use crate::error::RequestError;
use crate::safety::run_safety_check;
use crate::snapshot::ResourceSnapshot;
use banker_types::{vector, GrantMode, RequestOutcome, ResourceRequest, SafetyVerdict};
use tracing::debug;

/// The resource manager's decision procedure.
///
/// Owns two structurally identical snapshots with independent storage:
///
/// - `committed` - the authoritative baseline, mutated only by
///   administrative replacement, never by evaluating a request
/// - `scratch` - the disposable working copy every hypothetical grant
///   and safety check runs against
///
/// Every request is evaluated against the baseline, not against the
/// cumulative effect of prior requests: [`ResourceManager::evaluate`]
/// mutates scratch, runs the safety check, and restores scratch from the
/// baseline before returning. Between calls the two snapshots are equal.
///
/// Evaluation is strictly one request at a time to completion. The
/// check-then-restore protocol is not reentrant, so anything exposing
/// this to concurrent callers must serialize access - which the `&mut
/// self` receivers already force on safe Rust callers.
#[derive(Debug)]
pub struct ResourceManager {
    committed: ResourceSnapshot,
    scratch: ResourceSnapshot,
}

impl ResourceManager {
    /// Create a manager over a validated baseline snapshot.
    pub fn new(baseline: ResourceSnapshot) -> Self {
        let scratch = baseline.clone();
        Self {
            committed: baseline,
            scratch,
        }
    }

    /// Check whether the baseline itself is safe.
    ///
    /// Run once after construction, before any request is accepted. The
    /// check consumes the scratch copy, which is restored before
    /// returning.
    pub fn initial_safety(&mut self) -> SafetyVerdict {
        let verdict = run_safety_check(&mut self.scratch);
        self.restore_scratch();
        debug!(%verdict, "initial safety check");
        verdict
    }

    /// Evaluate one resource request.
    ///
    /// The request is applied hypothetically to the scratch snapshot,
    /// the safety check decides the post-grant verdict, and scratch is
    /// restored from the baseline before returning - granting never
    /// commits anything.
    ///
    /// A demand the process's declared maximum cannot accommodate is
    /// [`RequestOutcome::Denied`] without touching any state. Otherwise
    /// the allocation increase is always recorded; availability is only
    /// debited when it covers the full demand ([`GrantMode::Full`]).
    /// When it does not, the grant is [`GrantMode::Recorded`]: the
    /// request is recorded rather than rejected, and the scratch
    /// allocation temporarily exceeds the tracked supply.
    ///
    /// Errors are malformed requests the caller may correct and resend;
    /// they are distinct from denial and leave all state untouched.
    pub fn evaluate(&mut self, request: &ResourceRequest) -> Result<RequestOutcome, RequestError> {
        let process = request.process.index();
        if process >= self.process_count() {
            return Err(RequestError::UnknownProcess {
                process: request.process,
                process_count: self.process_count(),
            });
        }
        if request.demand.len() != self.resource_count() {
            return Err(RequestError::DemandShape {
                expected: self.resource_count(),
                actual: request.demand.len(),
            });
        }

        if !vector::within_limit(
            self.committed.allocation_row(process),
            &request.demand,
            self.committed.maximum_row(process),
        ) {
            debug!(process = %request.process, "denied: demand exceeds declared maximum");
            return Ok(RequestOutcome::Denied);
        }

        let full = self
            .scratch
            .available
            .iter()
            .zip(&request.demand)
            .all(|(a, d)| a >= d);

        for (held, demand) in self
            .scratch
            .allocation
            .row_mut(process)
            .iter_mut()
            .zip(&request.demand)
        {
            *held += *demand;
        }
        if full {
            for (a, demand) in self.scratch.available.iter_mut().zip(&request.demand) {
                *a -= *demand;
            }
        }

        let mode = if full {
            GrantMode::Full
        } else {
            GrantMode::Recorded
        };
        let verdict = run_safety_check(&mut self.scratch);
        self.restore_scratch();

        debug!(process = %request.process, %mode, %verdict, "request evaluated");
        Ok(RequestOutcome::Granted { mode, verdict })
    }

    /// Reset the scratch snapshot to equal the committed baseline.
    ///
    /// Idempotent; called internally after every check, and harmless to
    /// call again.
    pub fn restore_scratch(&mut self) {
        self.scratch.restore_from(&self.committed);
    }

    /// The committed baseline snapshot.
    pub fn committed(&self) -> &ResourceSnapshot {
        &self.committed
    }

    /// The scratch snapshot. Equal to [`ResourceManager::committed`]
    /// between evaluations.
    pub fn scratch(&self) -> &ResourceSnapshot {
        &self.scratch
    }

    /// Number of processes.
    pub fn process_count(&self) -> usize {
        self.committed.process_count()
    }

    /// Number of resource types.
    pub fn resource_count(&self) -> usize {
        self.committed.resource_count()
    }
}

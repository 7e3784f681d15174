//! Safety checking and request evaluation for the resource manager.
//!
//! This crate implements the decision procedure of the Banker's
//! algorithm: given a snapshot of allocations, declared maximum demands,
//! and available units, decide whether the system is in a safe state and
//! whether an arriving request can be granted while preserving safety.
//!
//! # Architecture
//!
//! ```text
//! collaborator (CLI, test, ...)
//!     │ ResourceSnapshot::new(available, allocation, maximum)
//!     ▼
//! ┌───────────────────────────────────────────────────────┐
//! │ ResourceManager                                       │
//! │                                                       │
//! │   committed  - authoritative baseline snapshot        │
//! │   scratch    - disposable working copy                │
//! │                                                       │
//! │   initial_safety()  - check, then restore scratch     │
//! │   evaluate(request) - apply to scratch, check,        │
//! │                       restore, report the outcome     │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! The engine follows the usual state-machine contract:
//!
//! - **Synchronous**: no async, no blocking
//! - **Deterministic**: same snapshot + request = same outcome
//! - **No I/O**: callers source the numbers and render the outcomes
//!
//! The safety check itself is destructive (it retires processes by
//! zeroing their allocation rows and inflating availability), which is
//! why it only ever runs against the scratch snapshot, borrowed
//! exclusively for the duration of the call.

mod error;
mod manager;
mod safety;
mod snapshot;

pub use error::{RequestError, SnapshotError};
pub use manager::ResourceManager;
pub use safety::run_safety_check;
pub use snapshot::ResourceSnapshot;

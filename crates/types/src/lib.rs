//! Core types for the Banker's algorithm resource manager.
//!
//! This crate holds the plain data types shared by the engine and the
//! simulator:
//!
//! - [`Matrix`] - row-major storage for per-process resource tables
//! - [`vector`] - comparison/update primitives over resource vectors
//! - [`ProcessId`] / [`ResourceRequest`] - request identification
//! - [`RequestOutcome`] / [`SafetyVerdict`] - decisions reported back to
//!   the caller
//!
//! Everything here is synchronous plain data: no I/O, no logging, no
//! global state.

mod matrix;
mod outcome;
mod request;
pub mod vector;

pub use matrix::{Matrix, ShapeError};
pub use outcome::{GrantMode, RequestOutcome, SafetyVerdict};
pub use request::{ProcessId, ResourceRequest};

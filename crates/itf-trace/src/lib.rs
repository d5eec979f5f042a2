//! Trace containers for the Informal Trace Format (ITF).
//!
//! This crate provides the two containers that sit on top of the
//! `itf-value` codec, deliberately independent of any producing tool:
//!
//! - `state`: one trace step — a free-form `#meta` object plus ordered
//!   variable bindings, each value-decoded.
//! - `trace`: the ordered state sequence with trace-level metadata
//!   (parameter names, variable names, optional lasso index) and the JSON
//!   text boundary (`FromStr` in, `to_json_string` out).
//!
//! Decode proceeds top-down (trace → states → values), encode bottom-up.
//! Reading and writing byte streams stays with the caller; these types only
//! convert between parsed JSON and in-memory containers.
//!
//! We intentionally avoid broad re-exports so callers use stable paths like
//! `itf_trace::trace::Trace`.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

/// One trace step: `#meta` plus ordered variable bindings.
pub mod state;
/// Ordered state sequence, trace metadata, and the JSON text boundary.
pub mod trace;

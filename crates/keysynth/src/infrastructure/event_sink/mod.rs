//! Event sink implementations.
//!
//! The platform sink is selected at compile time via `#[cfg(target_os = ...)]`.
//! The dry-run and recording sinks are available everywhere.

pub mod dry_run;
pub mod recording;

#[cfg(target_os = "macos")]
pub mod macos;

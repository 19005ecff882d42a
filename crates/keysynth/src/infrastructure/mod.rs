//! Infrastructure layer for keysynth.
//!
//! Contains the OS-facing adapters and runtime plumbing around the
//! application use cases.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `keysynth_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`event_sink`** – implementations of `KeyEventSink`.  The macOS sink
//!   posts real keyboard events through CoreGraphics and is compiled only on
//!   macOS; the dry-run and recording sinks work everywhere.
//!
//! - **`storage`** – loads the TOML configuration file.
//!
//! - **`worker`** – runs typing jobs on Tokio's blocking pool so long texts
//!   can be cancelled from async code (Ctrl-C, for example).

pub mod event_sink;
pub mod storage;
pub mod worker;

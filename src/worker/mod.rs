//! Worker session controller
//!
//! This module provides the channel-driven session that serializes
//! access to the loaded speech model:
//! - `messages`: the command/event wire protocol
//! - `session`: the controller loop and its state guard
//! - `handle`: spawn helper and the host-side handle
//! - `stats`: per-session counters

mod handle;
pub mod messages;
mod session;
mod stats;

pub use handle::{spawn, WorkerHandle};
pub use messages::{Command, Event, ProgressPayload, TranscriptionPayload};
pub use session::{SessionState, WorkerSession};
pub use stats::WorkerStats;

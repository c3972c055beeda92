//! Impls - in-memory port implementations (tests, replay, dry runs).
//!
//! # Implementations
//! - **RecordingSink**: snapshot sink that keeps records in memory
//! - **ScriptedEvent**: host event built from plain data / JSON
//!
//! Production implementations live next to their concern:
//! `snapshot::FileSnapshotWriter`, `ports::SystemUserDirectory`,
//! `ports::SystemClock`.

pub mod recording;
pub mod scripted;

pub use self::recording::RecordingSink;
pub use self::scripted::{ScriptedEvent, ScriptedItems};

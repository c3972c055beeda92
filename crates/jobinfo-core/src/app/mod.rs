//! App - controller wiring.
//!
//! - builder: explicit setup (config, clock, sink)
//! - controller: the host callback entry points and job state machine

pub mod builder;
pub mod controller;

pub use self::builder::ControllerBuilder;
pub use self::controller::{HostStatus, IgnoreReason, LifecycleController, Outcome, SnapshotWrite};

//! jobinfo-core
//!
//! Per-node job lifecycle tracking for a cluster job launcher.
//!
//! The host calls the `LifecycleController` on job-create, task-init and
//! task-exit. The controller keeps one `JobRecord` per live job in the
//! `JobRegistry` and writes a `KEY=value` snapshot once the node's tasks have
//! all started, and again when the job exits.
//!
//! # Modules
//! - **domain**: ids, job record, status, errors
//! - **registry**: keyed collection of live records
//! - **ports**: host event, clock, user directory, snapshot sink
//! - **snapshot**: document rendering and the file writer
//! - **app**: controller and builder
//! - **impls**: in-memory sink and scripted host events
//! - **config**: snapshot destination
//! - **observability**: counters

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod registry;
pub mod snapshot;

pub use app::{ControllerBuilder, HostStatus, LifecycleController, Outcome};
pub use config::JobInfoConfig;
pub use domain::{JobId, JobInfoError, JobRecord, JobStatus};
pub use registry::JobRegistry;

//! ControllerBuilder - explicit setup of a `LifecycleController`.
//!
//! Replaces load-time constructor hooks: whatever embeds the controller builds
//! it once at startup and calls `shutdown` at teardown.
//!
//! # Example
//! ```ignore
//! let mut controller = ControllerBuilder::new()
//!     .config(JobInfoConfig::from_env())
//!     .build();
//! controller.job_create(&event);
//! ```

use crate::config::JobInfoConfig;
use crate::ports::{Clock, SnapshotSink, SystemClock};
use crate::snapshot::FileSnapshotWriter;

use super::controller::LifecycleController;

pub struct ControllerBuilder<C = SystemClock> {
    config: Option<JobInfoConfig>,
    clock: C,
}

impl ControllerBuilder<SystemClock> {
    pub fn new() -> Self {
        Self {
            config: None,
            clock: SystemClock,
        }
    }
}

impl Default for ControllerBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ControllerBuilder<C> {
    /// Use this config instead of reading the environment at build time.
    pub fn config(mut self, config: JobInfoConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn clock<C2: Clock>(self, clock: C2) -> ControllerBuilder<C2> {
        ControllerBuilder {
            config: self.config,
            clock,
        }
    }

    /// The config `build` will use.
    pub fn resolved_config(&self) -> JobInfoConfig {
        self.config.clone().unwrap_or_else(JobInfoConfig::from_env)
    }

    /// Build with the file writer at the configured path.
    pub fn build(self) -> LifecycleController<FileSnapshotWriter, C> {
        let writer = FileSnapshotWriter::from_config(&self.resolved_config());
        LifecycleController::new(writer, self.clock)
    }

    /// Build with a caller-supplied sink. The config is not consulted.
    pub fn build_with_sink<S: SnapshotSink>(self, sink: S) -> LifecycleController<S, C> {
        LifecycleController::new(sink, self.clock)
    }
}

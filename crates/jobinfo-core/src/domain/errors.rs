//! Errors - crate-level error type.
//!
//! None of these ever reach the host as a failure. The controller logs them
//! and still reports success, because a failing plugin call could abort the
//! job itself.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::ports::host::ItemError;
use crate::registry::RegistryError;

#[derive(Debug, Error)]
pub enum JobInfoError {
    /// Without a job id nothing can be keyed, so the event is abandoned.
    #[error("job id unavailable: {0}")]
    MissingJobId(#[source] ItemError),

    #[error("allocation failed while recording task: {0}")]
    Allocation(#[from] TryReserveError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

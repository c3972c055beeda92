//! Domain model (ids, job record, status, errors).

pub mod errors;
pub mod ids;
pub mod job;
pub mod state;

pub use errors::JobInfoError;
pub use ids::JobId;
pub use job::{JobMetadata, JobRecord, Population};
pub use state::{ExitStatus, JobStatus};

//! Domain identifiers (strongly-typed IDs).
//!
//! Job ids come from the host scheduler as plain unsigned integers. They are
//! unique only while the job is active, so a retired id may show up again for
//! a later job.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a Job (the registry key).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(u32);

impl JobId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for JobId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for JobId {
    type Error = std::num::TryFromIntError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value).map(Self)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! SnapshotSink port - where job snapshots go.
//!
//! The controller calls `write` on population-complete and on exit. A failure
//! is reported back but never changes what the controller does next.

use crate::domain::JobRecord;
use crate::snapshot::SnapshotError;

pub trait SnapshotSink {
    fn write(&mut self, record: &JobRecord) -> Result<(), SnapshotError>;
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for Box<S> {
    fn write(&mut self, record: &JobRecord) -> Result<(), SnapshotError> {
        (**self).write(record)
    }
}

//! Ports - the seams between the controller and the outside world.
//!
//! - host: callback data supplied by the job launcher
//! - clock: event timestamps
//! - user_directory: uid -> user name
//! - snapshot_sink: snapshot output

pub mod clock;
pub mod host;
pub mod snapshot_sink;
pub mod user_directory;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::host::{ExecContext, HostEvent, HostItem, ItemError, JOB_NAME_ENV};
pub use self::snapshot_sink::SnapshotSink;
pub use self::user_directory::{StaticUserDirectory, SystemUserDirectory, UserDirectory};

//! UserDirectory port - uid to user name resolution.

use std::collections::HashMap;

use nix::unistd::{Uid, User};
use tracing::debug;

/// Resolves numeric user ids to login names.
///
/// `None` means the uid could not be resolved; the snapshot falls back to a
/// placeholder name.
pub trait UserDirectory {
    fn user_name(&self, uid: u32) -> Option<String>;
}

/// Looks users up in the system passwd database.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemUserDirectory;

impl UserDirectory for SystemUserDirectory {
    fn user_name(&self, uid: u32) -> Option<String> {
        match User::from_uid(Uid::from_raw(uid)) {
            Ok(user) => user.map(|u| u.name),
            Err(err) => {
                debug!(uid, error = %err, "passwd lookup failed");
                None
            }
        }
    }
}

/// Fixed uid -> name table.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    users: HashMap<u32, String>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, uid: u32, name: impl Into<String>) -> Self {
        self.users.insert(uid, name.into());
        self
    }
}

impl UserDirectory for StaticUserDirectory {
    fn user_name(&self, uid: u32) -> Option<String> {
        self.users.get(&uid).cloned()
    }
}

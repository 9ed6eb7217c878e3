//! Permission hook over the session profile
//!
//! Pure reads, re-evaluated against the cached profile on every call; the
//! profile itself changes only through login/logout.

use crate::session::Session;

pub struct Permissions<'a> {
    session: &'a Session,
}

impl<'a> Permissions<'a> {
    pub(crate) fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// True iff the permission appears in the session's aggregated set.
    pub fn has(&self, permission: &str) -> bool {
        self.session
            .profile()
            .is_some_and(|profile| profile.permissions.iter().any(|p| p == permission))
    }

    /// True iff any one of the given permissions matches; false on an empty
    /// list.
    pub fn has_any<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        permissions.iter().any(|p| self.has(p.as_ref()))
    }

    /// Snapshot of all permissions in the session.
    pub fn all(&self) -> Vec<String> {
        self.session
            .profile()
            .map(|profile| profile.permissions)
            .unwrap_or_default()
    }
}

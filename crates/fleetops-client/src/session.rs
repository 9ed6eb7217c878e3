//! Explicit session context
//!
//! Replaces ambient token storage: `login` populates the session, `logout`
//! clears it, and every request reads the token from here.

use std::sync::RwLock;

use serde::Deserialize;
use uuid::Uuid;

/// Identity subset of the profile payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Cached session profile: who is logged in and what they may do.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub user: SessionUser,
    pub permissions: Vec<String>,
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    profile: Option<Profile>,
}

#[derive(Debug, Default)]
pub struct Session {
    inner: RwLock<SessionState>,
}

impl Session {
    pub fn token(&self) -> Option<String> {
        self.inner.read().expect("session lock poisoned").token.clone()
    }

    pub fn set_token(&self, token: String) {
        self.inner.write().expect("session lock poisoned").token = Some(token);
    }

    pub fn profile(&self) -> Option<Profile> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .profile
            .clone()
    }

    pub fn set_profile(&self, profile: Profile) {
        self.inner.write().expect("session lock poisoned").profile = Some(profile);
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .expect("session lock poisoned")
            .token
            .is_some()
    }

    /// Logout: drops token and profile together.
    pub fn clear(&self) {
        let mut state = self.inner.write().expect("session lock poisoned");
        state.token = None;
        state.profile = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_sets_and_clears() {
        let session = Session::default();
        assert!(!session.is_authenticated());

        session.set_token("tok".into());
        session.set_profile(Profile {
            user: SessionUser {
                id: Uuid::new_v4(),
                name: "Ops".into(),
                email: "ops@example.com".into(),
            },
            permissions: vec!["employee.view".into()],
        });
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("tok"));

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.profile().is_none());
    }
}

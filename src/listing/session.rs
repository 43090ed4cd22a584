//! Client-side session state handed explicitly to data-access calls.

use chrono::{DateTime, Utc};

use crate::domain::role::Role;

#[derive(Debug, Clone, PartialEq)]
struct Session {
    token: String,
    role: Role,
    profile_id: Option<i32>,
    expires_at: Option<DateTime<Utc>>,
}

/// Token, role and profile of the signed-in user, if any.
///
/// Set with [`SessionContext::establish`] after sign-in and dropped with
/// [`SessionContext::clear`] on logout. An expired session behaves like an
/// anonymous one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    session: Option<Session>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn establish(
        &mut self,
        token: impl Into<String>,
        role: Role,
        profile_id: Option<i32>,
        expires_at: Option<DateTime<Utc>>,
    ) {
        self.session = Some(Session {
            token: token.into(),
            role,
            profile_id,
            expires_at,
        });
    }

    pub fn clear(&mut self) {
        self.session = None;
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(
            &self.session,
            Some(Session { expires_at: Some(at), .. }) if *at <= now
        )
    }

    /// Clears the session once it has expired. Returns whether it did.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_expired(now) {
            log::info!("Session expired, clearing credentials");
            self.clear();
            return true;
        }
        false
    }

    fn active(&self, now: DateTime<Utc>) -> Option<&Session> {
        self.session.as_ref().filter(|_| !self.is_expired(now))
    }

    pub fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        self.active(now).is_some()
    }

    /// Token to send as `Authorization: Bearer`.
    pub fn bearer(&self, now: DateTime<Utc>) -> Option<&str> {
        self.active(now).map(|s| s.token.as_str())
    }

    pub fn role(&self, now: DateTime<Utc>) -> Option<Role> {
        self.active(now).map(|s| s.role)
    }

    pub fn profile_id(&self, now: DateTime<Utc>) -> Option<i32> {
        self.active(now).and_then(|s| s.profile_id)
    }
}

//! Demo credential gate.
//!
//! # Responsibility
//! - Decide whether the board is reachable for the current session.
//!
//! # Invariants
//! - A failed login never reveals which field was wrong.
//! - Passwords are never logged or printed through `Debug`.
//! - There is no token and no expiry; state lives as long as the gate.

use log::{info, warn};
use std::fmt::{Debug, Formatter};

/// User id accepted by the demo gate.
pub const DEMO_USER_ID: &str = "todouser";
/// Password accepted by the demo gate.
pub const DEMO_PASSWORD: &str = "1234567890";

/// Expected user id / password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    user_id: String,
    password: String,
}

impl Credential {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    /// The fixed demo credential.
    pub fn demo() -> Self {
        Self::new(DEMO_USER_ID, DEMO_PASSWORD)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn matches(&self, user_id: &str, password: &str) -> bool {
        self.user_id == user_id && self.password == password
    }
}

impl Default for Credential {
    fn default() -> Self {
        Self::demo()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Boolean login gate in front of the board.
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    credential: Credential,
    user: Option<String>,
}

impl AuthGate {
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            user: None,
        }
    }

    /// Checks the pair; on success the gate opens for `user_id`.
    ///
    /// A failed attempt leaves the current login state untouched.
    pub fn login(&mut self, user_id: &str, password: &str) -> bool {
        if self.credential.matches(user_id, password) {
            self.user = Some(user_id.to_string());
            info!("event=login module=auth status=ok");
            true
        } else {
            warn!("event=login module=auth status=rejected");
            false
        }
    }

    /// Closes the gate. Returns whether someone was logged in.
    pub fn logout(&mut self) -> bool {
        let was_authenticated = self.user.take().is_some();
        if was_authenticated {
            info!("event=logout module=auth status=ok");
        }
        was_authenticated
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthGate, Credential, DEMO_PASSWORD, DEMO_USER_ID};

    #[test]
    fn demo_credential_opens_gate() {
        let mut gate = AuthGate::default();
        assert!(gate.login(DEMO_USER_ID, DEMO_PASSWORD));
        assert!(gate.is_authenticated());
        assert_eq!(gate.current_user(), Some(DEMO_USER_ID));
    }

    #[test]
    fn wrong_password_or_user_is_rejected() {
        let mut gate = AuthGate::default();
        assert!(!gate.login(DEMO_USER_ID, "wrong"));
        assert!(!gate.login("someone", DEMO_PASSWORD));
        assert!(!gate.login(" todouser", DEMO_PASSWORD));
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn failed_login_keeps_existing_session() {
        let mut gate = AuthGate::default();
        assert!(gate.login(DEMO_USER_ID, DEMO_PASSWORD));
        assert!(!gate.login(DEMO_USER_ID, "nope"));
        assert!(gate.is_authenticated());
        assert!(gate.logout());
        assert!(!gate.logout());
    }

    #[test]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", Credential::demo());
        assert!(rendered.contains("todouser"));
        assert!(!rendered.contains(DEMO_PASSWORD));
    }
}

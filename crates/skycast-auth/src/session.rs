//! The active-identity state machine.
//!
//! Two states: `LoggedOut` and `LoggedIn(account)`. This object is the
//! only writer of "which identity is active"; repositories take the
//! identity as an explicit argument on every call instead of reading any
//! ambient state.

use skycast_core::AuthError;
use skycast_store::{Account, Identity};

use crate::service::AuthService;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    LoggedOut,
    LoggedIn(Account),
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    state: SessionState,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            state: SessionState::LoggedOut,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn(_))
    }

    pub fn current_account(&self) -> Option<&Account> {
        match &self.state {
            SessionState::LoggedIn(account) => Some(account),
            SessionState::LoggedOut => None,
        }
    }

    /// The identity repositories should route by right now.
    pub fn identity(&self) -> Identity {
        match &self.state {
            SessionState::LoggedIn(account) => Identity::Account(account.clone()),
            SessionState::LoggedOut => Identity::Anonymous,
        }
    }

    /// Transition into `LoggedIn` on successful verification; on failure
    /// the state is left untouched.
    ///
    /// After this returns `Ok`, callers must re-resolve preferences and
    /// favorites through the returned identity and drop any guest-backed
    /// views they hold: the guest and account stores are never merged.
    pub fn login(
        &mut self,
        auth: &AuthService,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let account = auth.login(username, password)?;
        tracing::info!("Session now logged in as {}", account.username);
        self.state = SessionState::LoggedIn(account);
        Ok(self.identity())
    }

    /// Registration does not imply login; the session stays as it was.
    pub fn register(
        &self,
        auth: &AuthService,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        auth.register(username, password)
    }

    /// Always succeeds. Drops the in-memory account reference only; no
    /// persisted data is touched.
    pub fn logout(&mut self) {
        if let SessionState::LoggedIn(account) = &self.state {
            tracing::info!("Session logged out from {}", account.username);
        }
        self.state = SessionState::LoggedOut;
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

//! Credential verification over the account store.

use parking_lot::Mutex;
use std::sync::Arc;

use skycast_core::AuthError;
use skycast_store::{Account, AccountStore};

use crate::hasher::PasswordHasher;

pub struct AuthService {
    accounts: Arc<Mutex<AccountStore>>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
    pub fn new(accounts: Arc<Mutex<AccountStore>>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { accounts, hasher }
    }

    /// Create an account with default preferences. Does not log the new
    /// account in.
    pub fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let accounts = self.accounts.lock();
        if accounts.find_account(username)?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let digest = self.hasher.hash(password);
        match accounts.create_account(username, &digest) {
            Ok(account) => {
                tracing::info!("Registered account {}", account.username);
                Ok(())
            }
            // The unique index is the last line of defense for a race on
            // the username check above
            Err(e) if e.is_unique_violation() => Err(AuthError::UsernameTaken),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify credentials and return the matching account.
    ///
    /// Unknown username and wrong password are indistinguishable to the
    /// caller.
    pub fn login(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let account = self
            .accounts
            .lock()
            .find_account(username.trim())?
            .ok_or(AuthError::InvalidCredentials)?;

        if account.password_hash != self.hasher.hash(password) {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::debug!("Login verified for {}", account.username);
        Ok(account)
    }
}

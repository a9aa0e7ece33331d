//! Identity-routed preference and favorites repository.
//!
//! One facade over two backends: the SQLite account store and the guest
//! JSON documents. Which backend serves a call is a pure function of the
//! `Identity` argument, so switching identity (login/logout) needs no
//! repository state change at all. Every read goes to the backing store;
//! nothing is cached, so reads always observe the latest write.

use parking_lot::Mutex;
use std::sync::Arc;

use skycast_core::StorageError;

use crate::account::AccountStore;
use crate::guest::GuestStore;
use crate::types::{Identity, Preferences};

#[derive(Clone)]
pub struct PreferenceRepository {
    accounts: Arc<Mutex<AccountStore>>,
    guest: GuestStore,
}

impl PreferenceRepository {
    pub fn new(accounts: Arc<Mutex<AccountStore>>, guest: GuestStore) -> Self {
        Self { accounts, guest }
    }

    /// Total read: absent records yield the default, and a failing account
    /// read degrades to the default rather than surfacing.
    pub fn get_preferences(&self, identity: &Identity) -> Preferences {
        match identity {
            Identity::Anonymous => self.guest.load_preferences(),
            Identity::Account(account) => {
                match self.accounts.lock().get_preferences(account.id) {
                    Ok(Some(prefs)) => prefs,
                    Ok(None) => Preferences::default(),
                    Err(e) => {
                        tracing::warn!("Account preference read failed, using defaults: {}", e);
                        Preferences::default()
                    }
                }
            }
        }
    }

    /// Account write faults surface as `StorageError`; guest write faults
    /// are swallowed by the guest store.
    pub fn set_preferences(
        &self,
        identity: &Identity,
        prefs: &Preferences,
    ) -> Result<(), StorageError> {
        match identity {
            Identity::Anonymous => {
                self.guest.save_preferences(prefs);
                Ok(())
            }
            Identity::Account(account) => self.accounts.lock().set_preferences(account.id, prefs),
        }
    }

    /// Favorite city names, insertion-ordered, duplicate-free.
    pub fn list_favorites(&self, identity: &Identity) -> Result<Vec<String>, StorageError> {
        match identity {
            Identity::Anonymous => Ok(self.guest.load_favorites()),
            Identity::Account(account) => self.accounts.lock().list_favorites(account.id),
        }
    }

    /// Idempotent; adding a present name is a successful no-op.
    pub fn add_favorite(&self, identity: &Identity, city_name: &str) -> Result<(), StorageError> {
        match identity {
            Identity::Anonymous => {
                self.guest.add_favorite(city_name);
                Ok(())
            }
            Identity::Account(account) => self.accounts.lock().add_favorite(account.id, city_name),
        }
    }

    /// Idempotent; removing an absent name succeeds.
    pub fn remove_favorite(
        &self,
        identity: &Identity,
        city_name: &str,
    ) -> Result<(), StorageError> {
        match identity {
            Identity::Anonymous => {
                self.guest.remove_favorite(city_name);
                Ok(())
            }
            Identity::Account(account) => {
                self.accounts.lock().remove_favorite(account.id, city_name)
            }
        }
    }

    /// Star-button semantics: add when absent, remove when present.
    /// Returns whether the city is a favorite afterwards.
    pub fn toggle_favorite(
        &self,
        identity: &Identity,
        city_name: &str,
    ) -> Result<bool, StorageError> {
        match identity {
            Identity::Anonymous => {
                if self.guest.is_favorite(city_name) {
                    self.guest.remove_favorite(city_name);
                    Ok(false)
                } else {
                    self.guest.add_favorite(city_name);
                    Ok(true)
                }
            }
            Identity::Account(account) => {
                let accounts = self.accounts.lock();
                if accounts.is_favorite(account.id, city_name)? {
                    accounts.remove_favorite(account.id, city_name)?;
                    Ok(false)
                } else {
                    accounts.add_favorite(account.id, city_name)?;
                    Ok(true)
                }
            }
        }
    }
}

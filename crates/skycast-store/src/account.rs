// crates/skycast-store/src/account.rs

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use skycast_core::StorageError;

use crate::types::{Account, Preferences};

/// SQLite storage for accounts, their preferences, and their favorite
/// cities. Preferences live on the users row (created at registration), so
/// an existing account always has exactly one preferences record.
pub struct AccountStore {
    conn: Connection,
}

impl AccountStore {
    /// Open or create the database
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open accounts database")?;

        let store = Self { conn };
        store.init_schema()?;

        Ok(store)
    }

    /// Create an in-memory store (used by tests and by callers that want a
    /// throwaway session).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;

        let store = Self { conn };
        store.init_schema()?;

        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        // Favorite rows must never outlive their users row
        self.conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .context("Failed to enable foreign keys")?;

        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                default_city TEXT NOT NULL,
                is_metric INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS favorite_cities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                city_name TEXT NOT NULL,
                UNIQUE (user_id, city_name),
                FOREIGN KEY (user_id) REFERENCES users(id)
            );

            CREATE INDEX IF NOT EXISTS idx_favorites_user ON favorite_cities(user_id);",
            )
            .context("Failed to initialize schema")?;

        Ok(())
    }

    /// Insert a new account with default preferences.
    ///
    /// A duplicate username surfaces as a `StorageError` whose
    /// `is_unique_violation()` is true; the auth layer maps that to its own
    /// error.
    pub fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, StorageError> {
        let defaults = Preferences::default();
        self.conn.execute(
            "INSERT INTO users (username, password_hash, default_city, is_metric)
             VALUES (?1, ?2, ?3, ?4)",
            params![username, password_hash, defaults.default_city, defaults.is_metric],
        )?;

        Ok(Account {
            id: self.conn.last_insert_rowid(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    /// Look up an account by username.
    pub fn find_account(&self, username: &str) -> Result<Option<Account>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, password_hash FROM users WHERE username = ?1")?;

        let account = stmt
            .query_row([username], |row| {
                Ok(Account {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                })
            })
            .optional()?;

        Ok(account)
    }

    /// Preferences for an account, `None` when the account row is gone.
    pub fn get_preferences(&self, account_id: i64) -> Result<Option<Preferences>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT default_city, is_metric FROM users WHERE id = ?1")?;

        let prefs = stmt
            .query_row([account_id], |row| {
                Ok(Preferences {
                    default_city: row.get(0)?,
                    is_metric: row.get(1)?,
                })
            })
            .optional()?;

        Ok(prefs)
    }

    /// Upsert keyed by account id. The row exists from registration, so
    /// touching zero rows means the account was deleted underneath us.
    pub fn set_preferences(
        &self,
        account_id: i64,
        prefs: &Preferences,
    ) -> Result<(), StorageError> {
        let updated = self.conn.execute(
            "UPDATE users SET default_city = ?1, is_metric = ?2 WHERE id = ?3",
            params![prefs.default_city, prefs.is_metric, account_id],
        )?;

        if updated == 0 {
            return Err(StorageError::MissingAccount);
        }
        Ok(())
    }

    /// Favorite city names in insertion order (autoincrement row id).
    pub fn list_favorites(&self, account_id: i64) -> Result<Vec<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT city_name FROM favorite_cities WHERE user_id = ?1 ORDER BY id")?;

        let favorites =
            stmt.query_map([account_id], |row| row.get(0))?.collect::<Result<Vec<_>, _>>()?;

        Ok(favorites)
    }

    /// Idempotent: adding a city that is already a favorite is a no-op.
    /// Inserting for a missing account still fails (foreign key).
    pub fn add_favorite(&self, account_id: i64, city_name: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO favorite_cities (user_id, city_name) VALUES (?1, ?2)",
            params![account_id, city_name],
        )?;
        Ok(())
    }

    /// Idempotent: removing an absent city succeeds.
    pub fn remove_favorite(&self, account_id: i64, city_name: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "DELETE FROM favorite_cities WHERE user_id = ?1 AND city_name = ?2",
            params![account_id, city_name],
        )?;
        Ok(())
    }

    /// True when the city is currently a favorite of the account.
    pub fn is_favorite(&self, account_id: i64, city_name: &str) -> Result<bool, StorageError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM favorite_cities WHERE user_id = ?1 AND city_name = ?2",
            params![account_id, city_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_create_and_find_account() {
        let store = AccountStore::open_in_memory().unwrap();

        let created = store.create_account("ada", "hash-a").unwrap();
        assert_eq!(created.username, "ada");

        let found = store.find_account("ada").unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "hash-a");

        assert!(store.find_account("nobody").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_is_unique_violation() {
        let store = AccountStore::open_in_memory().unwrap();
        store.create_account("ada", "hash-a").unwrap();

        let err = store.create_account("ada", "hash-b").unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[test]
    fn test_new_account_has_default_preferences() {
        let store = AccountStore::open_in_memory().unwrap();
        let account = store.create_account("ada", "hash").unwrap();

        let prefs = store.get_preferences(account.id).unwrap().unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_set_preferences_roundtrip() {
        let store = AccountStore::open_in_memory().unwrap();
        let account = store.create_account("ada", "hash").unwrap();

        let prefs = Preferences {
            default_city: "Ankara".to_string(),
            is_metric: false,
        };
        store.set_preferences(account.id, &prefs).unwrap();
        assert_eq!(store.get_preferences(account.id).unwrap().unwrap(), prefs);
    }

    #[test]
    fn test_set_preferences_for_missing_account() {
        let store = AccountStore::open_in_memory().unwrap();
        let err = store.set_preferences(999, &Preferences::default()).unwrap_err();
        assert!(matches!(err, StorageError::MissingAccount));
    }

    #[test]
    fn test_favorites_insertion_order_and_dedupe() {
        let store = AccountStore::open_in_memory().unwrap();
        let account = store.create_account("ada", "hash").unwrap();

        store.add_favorite(account.id, "Tokyo").unwrap();
        store.add_favorite(account.id, "Ankara").unwrap();
        store.add_favorite(account.id, "Tokyo").unwrap(); // no-op

        let favorites = store.list_favorites(account.id).unwrap();
        assert_eq!(favorites, vec!["Tokyo", "Ankara"]);
    }

    #[test]
    fn test_remove_favorite_is_idempotent() {
        let store = AccountStore::open_in_memory().unwrap();
        let account = store.create_account("ada", "hash").unwrap();

        store.add_favorite(account.id, "Tokyo").unwrap();
        store.remove_favorite(account.id, "Tokyo").unwrap();
        store.remove_favorite(account.id, "Tokyo").unwrap();

        assert!(store.list_favorites(account.id).unwrap().is_empty());
    }

    #[test]
    fn test_orphan_favorite_rejected() {
        let store = AccountStore::open_in_memory().unwrap();
        // No users row with id 42; the foreign key must reject this.
        assert!(store.add_favorite(42, "Tokyo").is_err());
    }

    #[test]
    fn test_is_favorite() {
        let store = AccountStore::open_in_memory().unwrap();
        let account = store.create_account("ada", "hash").unwrap();

        assert!(!store.is_favorite(account.id, "Tokyo").unwrap());
        store.add_favorite(account.id, "Tokyo").unwrap();
        assert!(store.is_favorite(account.id, "Tokyo").unwrap());
    }
}

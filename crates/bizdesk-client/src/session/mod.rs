//! Persisted session credentials.
//!
//! # Design
//! - Storage is a capability ([`SessionStore`]) with atomic single-key
//!   operations, so tests and server contexts can swap in memory.
//! - [`Session`] layers the credential rules on top: the `userType` tag picks
//!   which of the two tokens is active, and empty strings count as absent.

mod file;
mod memory;

use std::fmt;

use thiserror::Error;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

/// Storage key holding the partner/admin bearer token.
pub const PARTNER_TOKEN_KEY: &str = "partnerToken";
/// Storage key holding the employee bearer token.
pub const EMPLOYEE_TOKEN_KEY: &str = "employeeToken";
/// Storage key holding the active user-type tag.
pub const USER_TYPE_KEY: &str = "userType";
/// Every key owned by a session; cleared together on forced logout.
pub const SESSION_KEYS: [&str; 3] = [PARTNER_TOKEN_KEY, EMPLOYEE_TOKEN_KEY, USER_TYPE_KEY];

/// Errors raised by session storage backends.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Reading or writing the backing file failed.
    #[error("session storage {operation} failed for {path}")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Backing file path.
        path: String,
        /// Source IO error.
        #[source]
        source: std::io::Error,
    },
    /// Backing file did not contain a JSON string map.
    #[error("session storage at {path} is corrupt")]
    Corrupt {
        /// Backing file path.
        path: String,
        /// Source decode error.
        #[source]
        source: serde_json::Error,
    },
    /// A previous writer panicked while holding the store lock.
    #[error("session storage lock poisoned")]
    Poisoned,
}

/// Key/value capability backing session credentials.
pub trait SessionStore: Send + Sync {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionStoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionStoreError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;

    /// Delete a value; deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionStoreError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), SessionStoreError>;
}

/// Kind of principal a session belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UserType {
    /// Staff member of a partner; uses the employee token.
    Employee,
    /// Partner owner; uses the partner token.
    #[default]
    Partner,
    /// Platform administrator; shares the partner token slot.
    Admin,
}

impl UserType {
    /// Interpret a stored tag. Anything other than `employee` (including no
    /// tag at all) selects the partner token.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("employee") => Self::Employee,
            Some("admin") => Self::Admin,
            _ => Self::Partner,
        }
    }

    /// Tag written to storage for this user type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Partner => "partner",
            Self::Admin => "admin",
        }
    }

    /// Storage key of the token this user type authenticates with.
    #[must_use]
    pub const fn token_key(self) -> &'static str {
        match self {
            Self::Employee => EMPLOYEE_TOKEN_KEY,
            Self::Partner | Self::Admin => PARTNER_TOKEN_KEY,
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of what a store holds, without exposing token values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Stored user-type tag, interpreted.
    pub user_type: UserType,
    /// Whether a user-type tag is stored at all.
    pub has_user_type: bool,
    /// Whether a non-empty partner token is stored.
    pub has_partner_token: bool,
    /// Whether a non-empty employee token is stored.
    pub has_employee_token: bool,
}

impl SessionSnapshot {
    /// Whether the token selected by the user type is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        match self.user_type {
            UserType::Employee => self.has_employee_token,
            UserType::Partner | UserType::Admin => self.has_partner_token,
        }
    }
}

/// Credential rules applied over a [`SessionStore`].
#[derive(Clone, Copy)]
pub struct Session<'a> {
    store: &'a dyn SessionStore,
}

impl<'a> Session<'a> {
    /// Wrap a store.
    #[must_use]
    pub fn new(store: &'a dyn SessionStore) -> Self {
        Self { store }
    }

    /// Active user type.
    ///
    /// # Errors
    ///
    /// Propagates storage read failures.
    pub fn user_type(&self) -> Result<UserType, SessionStoreError> {
        let tag = self.store.get(USER_TYPE_KEY)?;
        Ok(UserType::from_tag(tag.as_deref()))
    }

    /// Token selected by the active user type, if one is stored.
    ///
    /// # Errors
    ///
    /// Propagates storage read failures.
    pub fn active_token(&self) -> Result<Option<String>, SessionStoreError> {
        let key = self.user_type()?.token_key();
        Ok(non_empty(self.store.get(key)?))
    }

    /// Persist a freshly issued token and make it the active one.
    ///
    /// The other token slot is removed so only one credential is ever stored.
    ///
    /// # Errors
    ///
    /// Propagates storage write failures.
    pub fn sign_in(&self, user_type: UserType, token: &str) -> Result<(), SessionStoreError> {
        let key = user_type.token_key();
        let other = if key == EMPLOYEE_TOKEN_KEY {
            PARTNER_TOKEN_KEY
        } else {
            EMPLOYEE_TOKEN_KEY
        };
        self.store.set(key, token)?;
        self.store.remove(other)?;
        self.store.set(USER_TYPE_KEY, user_type.as_str())
    }

    /// Remove every session key.
    ///
    /// All keys are attempted even when one removal fails; the first failure
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns the first storage write failure encountered.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        let mut first_error = None;
        for key in SESSION_KEYS {
            if let Err(err) = self.store.remove(key) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Summarise the stored session.
    ///
    /// # Errors
    ///
    /// Propagates storage read failures.
    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionStoreError> {
        let tag = self.store.get(USER_TYPE_KEY)?;
        Ok(SessionSnapshot {
            user_type: UserType::from_tag(tag.as_deref()),
            has_user_type: non_empty(tag).is_some(),
            has_partner_token: non_empty(self.store.get(PARTNER_TOKEN_KEY)?).is_some(),
            has_employee_token: non_empty(self.store.get(EMPLOYEE_TOKEN_KEY)?).is_some(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[(&str, &str)]) -> MemorySessionStore {
        MemorySessionStore::with_entries(entries.iter().copied())
    }

    #[test]
    fn employee_tag_selects_employee_token() {
        let store = store_with(&[
            (USER_TYPE_KEY, "employee"),
            (EMPLOYEE_TOKEN_KEY, "emp-token"),
            (PARTNER_TOKEN_KEY, "partner-token"),
        ]);
        let token = Session::new(&store).active_token().expect("readable");
        assert_eq!(token.as_deref(), Some("emp-token"));
    }

    #[test]
    fn any_other_tag_selects_partner_token() {
        for tag in ["partner", "admin", "superuser", ""] {
            let store = store_with(&[
                (USER_TYPE_KEY, tag),
                (EMPLOYEE_TOKEN_KEY, "emp-token"),
                (PARTNER_TOKEN_KEY, "partner-token"),
            ]);
            let token = Session::new(&store).active_token().expect("readable");
            assert_eq!(token.as_deref(), Some("partner-token"), "tag {tag:?}");
        }
    }

    #[test]
    fn missing_tag_selects_partner_token() {
        let store = store_with(&[(PARTNER_TOKEN_KEY, "partner-token")]);
        let session = Session::new(&store);
        assert_eq!(session.user_type().expect("readable"), UserType::Partner);
        assert_eq!(
            session.active_token().expect("readable").as_deref(),
            Some("partner-token")
        );
    }

    #[test]
    fn empty_or_missing_token_is_absent() {
        let store = store_with(&[(USER_TYPE_KEY, "employee"), (EMPLOYEE_TOKEN_KEY, "")]);
        assert_eq!(Session::new(&store).active_token().expect("readable"), None);

        let store = store_with(&[(USER_TYPE_KEY, "employee"), (PARTNER_TOKEN_KEY, "p")]);
        assert_eq!(Session::new(&store).active_token().expect("readable"), None);
    }

    #[test]
    fn sign_in_keeps_a_single_token() {
        let store = store_with(&[(PARTNER_TOKEN_KEY, "old-partner")]);
        let session = Session::new(&store);
        session
            .sign_in(UserType::Employee, "emp-token")
            .expect("writable");

        assert_eq!(store.get(USER_TYPE_KEY).expect("get").as_deref(), Some("employee"));
        assert_eq!(store.get(PARTNER_TOKEN_KEY).expect("get"), None);
        assert_eq!(
            session.active_token().expect("readable").as_deref(),
            Some("emp-token")
        );
    }

    #[test]
    fn clear_removes_every_session_key() {
        let store = store_with(&[
            (USER_TYPE_KEY, "employee"),
            (EMPLOYEE_TOKEN_KEY, "emp-token"),
            (PARTNER_TOKEN_KEY, "partner-token"),
            ("theme", "dark"),
        ]);
        Session::new(&store).clear().expect("writable");
        for key in SESSION_KEYS {
            assert_eq!(store.get(key).expect("get"), None, "{key} should be cleared");
        }
        assert_eq!(store.get("theme").expect("get").as_deref(), Some("dark"));
    }

    #[test]
    fn snapshot_reports_presence_only() {
        let store = store_with(&[(USER_TYPE_KEY, "admin"), (PARTNER_TOKEN_KEY, "p")]);
        let snapshot = Session::new(&store).snapshot().expect("readable");
        assert_eq!(snapshot.user_type, UserType::Admin);
        assert!(snapshot.has_user_type);
        assert!(snapshot.has_partner_token);
        assert!(!snapshot.has_employee_token);
        assert!(snapshot.is_authenticated());
    }
}

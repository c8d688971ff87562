//! Signed-in session tracking.

use chrono::{DateTime, Local};
use tracing::info;

use super::auth::Account;

/// The account currently signed in and when the session began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub account: Account,
    pub started_at: DateTime<Local>,
}

/// Holds at most one signed-in session.
///
/// A session begins when the auth service accepts a login and ends on
/// explicit logout.
pub trait SessionStore {
    /// Starts a session, replacing any existing one.
    fn begin(&mut self, account: Account) -> &Session;

    fn current(&self) -> Option<&Session>;

    /// Ends the current session, returning it if there was one.
    fn end(&mut self) -> Option<Session>;

    fn is_signed_in(&self) -> bool {
        self.current().is_some()
    }
}

/// Session store living for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Option<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn begin(&mut self, account: Account) -> &Session {
        info!(username = %account.username, "session started");
        self.session.insert(Session {
            account,
            started_at: Local::now(),
        })
    }

    fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn end(&mut self) -> Option<Session> {
        let ended = self.session.take();
        if let Some(session) = &ended {
            info!(username = %session.account.username, "session ended");
        }
        ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str) -> Account {
        Account {
            username: name.to_string(),
            email: format!("{name}@x.com"),
        }
    }

    #[test]
    fn test_store_starts_signed_out() {
        let store = MemorySessionStore::new();
        assert!(store.current().is_none());
        assert!(!store.is_signed_in());
    }

    #[test]
    fn test_begin_and_end() {
        let mut store = MemorySessionStore::new();
        store.begin(account("ann"));
        assert!(store.is_signed_in());
        assert_eq!(store.current().unwrap().account.username, "ann");

        let ended = store.end().unwrap();
        assert_eq!(ended.account.username, "ann");
        assert!(store.current().is_none());
        assert!(store.end().is_none());
    }

    #[test]
    fn test_begin_replaces_existing_session() {
        let mut store = MemorySessionStore::new();
        store.begin(account("ann"));
        store.begin(account("bob"));
        assert_eq!(store.current().unwrap().account.username, "bob");
    }
}

//! Auth service boundary.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classify::ClassifiedIdentifier;
use crate::error::RemoteError;
use crate::form::{LoginPayload, RegisterPayload};

/// An authenticated account as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub username: String,
    pub email: String,
}

/// Credential verification and account creation.
pub trait AuthService {
    fn login(&mut self, payload: &LoginPayload) -> Result<Account, RemoteError>;

    fn register(&mut self, payload: &RegisterPayload) -> Result<Account, RemoteError>;
}

/// Accepts every submission and logs it (password redacted).
///
/// Stands in for the real service until one is wired up.
#[derive(Debug, Default)]
pub struct LoggingAuthService;

impl AuthService for LoggingAuthService {
    fn login(&mut self, payload: &LoginPayload) -> Result<Account, RemoteError> {
        info!(
            email = payload.email(),
            username = payload.username(),
            "login accepted (no auth backend configured)"
        );
        let raw = payload.identifier.as_str();
        let username = if payload.identifier.is_email() {
            raw.split_once('@').map_or(raw, |(local, _)| local)
        } else {
            raw
        };
        Ok(Account {
            username: username.to_string(),
            email: payload.email().to_string(),
        })
    }

    fn register(&mut self, payload: &RegisterPayload) -> Result<Account, RemoteError> {
        info!(
            username = %payload.username,
            email = %payload.email,
            "registration accepted (no auth backend configured)"
        );
        Ok(Account {
            username: payload.username.clone(),
            email: payload.email.clone(),
        })
    }
}

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    password: String,
}

/// In-memory account directory.
///
/// Usernames and emails are unique after trimming and lowercasing. Login
/// looks the account up by username or by email depending on how the
/// identifier was classified.
#[derive(Debug, Default)]
pub struct MemoryAuthService {
    accounts: Vec<StoredAccount>,
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

impl MemoryAuthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn find(&self, identifier: &ClassifiedIdentifier) -> Option<&StoredAccount> {
        let needle = normalize(identifier.as_str());
        self.accounts.iter().find(|stored| {
            let key = if identifier.is_email() {
                &stored.account.email
            } else {
                &stored.account.username
            };
            normalize(key) == needle
        })
    }
}

impl AuthService for MemoryAuthService {
    fn login(&mut self, payload: &LoginPayload) -> Result<Account, RemoteError> {
        if self.is_empty() {
            debug!("login attempted before any account was registered");
        }
        match self.find(&payload.identifier) {
            Some(stored) if stored.password == payload.password => {
                info!(username = %stored.account.username, "login ok");
                Ok(stored.account.clone())
            }
            _ => {
                warn!(identifier = %payload.identifier, accounts = self.len(), "login rejected");
                Err(RemoteError::new("Invalid credentials"))
            }
        }
    }

    fn register(&mut self, payload: &RegisterPayload) -> Result<Account, RemoteError> {
        let username = normalize(&payload.username);
        let email = normalize(&payload.email);

        for stored in &self.accounts {
            if normalize(&stored.account.username) == username {
                return Err(RemoteError::new("Username already exists"));
            }
            if normalize(&stored.account.email) == email {
                return Err(RemoteError::new("Email already registered"));
            }
        }

        let account = Account {
            username: payload.username.clone(),
            email: payload.email.clone(),
        };
        self.accounts.push(StoredAccount {
            account: account.clone(),
            password: payload.password.clone(),
        });
        info!(username = %account.username, total = self.len(), "account created");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn register_payload(username: &str, email: &str, password: &str) -> RegisterPayload {
        RegisterPayload {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login_payload(identifier: &str, password: &str) -> LoginPayload {
        LoginPayload {
            identifier: classify(identifier),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_logging_service_accepts_username_login() {
        let mut svc = LoggingAuthService;
        let account = svc.login(&login_payload("ann", "pw")).unwrap();
        assert_eq!(account.username, "ann");
        assert_eq!(account.email, "");
    }

    #[test]
    fn test_logging_service_accepts_email_login() {
        let mut svc = LoggingAuthService;
        let account = svc.login(&login_payload("ann@x.com", "pw")).unwrap();
        assert_eq!(account.username, "ann");
        assert_eq!(account.email, "ann@x.com");
    }

    #[test]
    fn test_logging_service_accepts_register() {
        let mut svc = LoggingAuthService;
        let account = svc
            .register(&register_payload("ann", "ann@x.com", "pw"))
            .unwrap();
        assert_eq!(
            account,
            Account {
                username: "ann".to_string(),
                email: "ann@x.com".to_string(),
            }
        );
    }

    #[test]
    fn test_memory_register_then_login_by_username_and_email() {
        let mut svc = MemoryAuthService::new();
        svc.register(&register_payload("Ann", "ann@x.com", "pw"))
            .unwrap();

        let by_name = svc.login(&login_payload("ann", "pw")).unwrap();
        assert_eq!(by_name.username, "Ann");

        let by_email = svc.login(&login_payload("ANN@X.COM", "pw")).unwrap();
        assert_eq!(by_email.email, "ann@x.com");
    }

    #[test]
    fn test_memory_rejects_wrong_password() {
        let mut svc = MemoryAuthService::new();
        svc.register(&register_payload("ann", "ann@x.com", "pw"))
            .unwrap();

        let err = svc.login(&login_payload("ann", "nope")).unwrap_err();
        assert_eq!(err.cause, "Invalid credentials");
    }

    #[test]
    fn test_memory_rejects_unknown_account() {
        let mut svc = MemoryAuthService::new();
        assert!(svc.login(&login_payload("ghost", "pw")).is_err());
    }

    #[test]
    fn test_memory_email_identifier_does_not_match_username() {
        let mut svc = MemoryAuthService::new();
        svc.register(&register_payload("a@b.com", "other@x.com", "pw"))
            .unwrap();

        // Classified as an email, so it is looked up by email only.
        assert!(svc.login(&login_payload("a@b.com", "pw")).is_err());
    }

    #[test]
    fn test_memory_duplicate_username_normalized() {
        let mut svc = MemoryAuthService::new();
        svc.register(&register_payload("ann", "ann@x.com", "pw"))
            .unwrap();

        let err = svc
            .register(&register_payload("  ANN ", "new@x.com", "pw"))
            .unwrap_err();
        assert_eq!(err.cause, "Username already exists");
        assert_eq!(svc.len(), 1);
    }

    #[test]
    fn test_memory_duplicate_email() {
        let mut svc = MemoryAuthService::new();
        svc.register(&register_payload("ann", "ann@x.com", "pw"))
            .unwrap();

        let err = svc
            .register(&register_payload("bob", "Ann@X.com", "pw"))
            .unwrap_err();
        assert_eq!(err.cause, "Email already registered");
    }
}

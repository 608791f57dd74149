//! Login session use-case service.
//!
//! # Responsibility
//! - Check submitted credentials against the built-in account table.
//! - Persist, restore, and clear the active session through the session
//!   repository.
//!
//! # Invariants
//! - Credentials are compared verbatim; there is no real authentication.
//! - A successful login always persists before it is reported to the caller.
//! - `current()` treats absent or malformed session blobs as logged out.

use crate::model::session::{Role, Session};
use crate::repo::session_repo::SessionRepository;
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Built-in demo accounts. The portal has no account management; these two
/// rows are the entire credential table.
const ACCOUNTS: &[(&str, &str, Role, Option<&str>)] = &[
    ("admin", "admin", Role::Admin, None),
    ("client", "client", Role::Client, Some("1")),
];

/// Errors from login and session restore.
#[derive(Debug)]
pub enum AuthError {
    /// Username/password pair matches no account.
    InvalidCredentials,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "unknown username or wrong password"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InvalidCredentials => None,
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Session facade over the credential table and the session repository.
pub struct AuthService<R: SessionRepository> {
    repo: R,
}

impl<R: SessionRepository> AuthService<R> {
    /// Creates the service from its repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Checks credentials and persists the resulting session.
    ///
    /// The role and client binding come from the matched account row; the
    /// session is stored before it is returned.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let Some((_, _, role, client_id)) = ACCOUNTS
            .iter()
            .find(|(user, pass, _, _)| *user == username && *pass == password)
        else {
            info!("event=login module=service status=rejected user={username}");
            return Err(AuthError::InvalidCredentials);
        };

        let session = Session {
            role: *role,
            client_id: client_id.map(str::to_string),
        };
        self.repo.store(&session)?;
        info!(
            "event=login module=service status=ok user={username} role={}",
            role.as_str()
        );
        Ok(session)
    }

    /// Restores the persisted session, or `None` when logged out.
    pub fn current(&self) -> Result<Option<Session>, AuthError> {
        self.repo.load().map_err(Into::into)
    }

    /// Clears every session key.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.repo.clear()?;
        info!("event=logout module=service status=ok");
        Ok(())
    }
}

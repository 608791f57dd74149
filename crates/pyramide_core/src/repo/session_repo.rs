//! Login session repository.
//!
//! # Responsibility
//! - Persist and restore the active session across the three session blobs
//!   (`userRole`, `isAuthenticated`, `clientId`).
//!
//! # Invariants
//! - A session is only restored when the authenticated flag is the literal
//!   `true` and the role string parses; anything else reads as logged out.
//! - `clear` removes all three keys, including a dangling `clientId`.

use crate::db::kv;
use crate::model::session::{Role, Session};
use crate::repo::{ensure_kv_connection_ready, RepoResult};
use log::warn;
use rusqlite::Connection;

const KEY_ROLE: &str = "userRole";
const KEY_AUTHENTICATED: &str = "isAuthenticated";
const KEY_CLIENT_ID: &str = "clientId";

/// Repository interface for the login session.
pub trait SessionRepository {
    /// Restores the active session, or `None` when logged out.
    fn load(&self) -> RepoResult<Option<Session>>;
    /// Persists the session.
    fn store(&self, session: &Session) -> RepoResult<()>;
    /// Removes every session key.
    fn clear(&self) -> RepoResult<()>;
}

/// Blob-backed session repository.
pub struct KvSessionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> KvSessionRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_kv_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SessionRepository for KvSessionRepository<'_> {
    fn load(&self) -> RepoResult<Option<Session>> {
        let authenticated = kv::read_blob(self.conn, KEY_AUTHENTICATED)?;
        if authenticated.as_deref() != Some("true") {
            return Ok(None);
        }

        let Some(role_text) = kv::read_blob(self.conn, KEY_ROLE)? else {
            warn!("event=session_restore module=repo status=recovered reason=missing_role");
            return Ok(None);
        };
        let role = match Role::parse(&role_text) {
            Ok(role) => role,
            Err(err) => {
                warn!(
                    "event=session_restore module=repo status=recovered reason=bad_role error={err}"
                );
                return Ok(None);
            }
        };

        let client_id = kv::read_blob(self.conn, KEY_CLIENT_ID)?;
        Ok(Some(Session { role, client_id }))
    }

    fn store(&self, session: &Session) -> RepoResult<()> {
        kv::write_blob(self.conn, KEY_ROLE, session.role.as_str())?;
        kv::write_blob(self.conn, KEY_AUTHENTICATED, "true")?;
        match &session.client_id {
            Some(client_id) => kv::write_blob(self.conn, KEY_CLIENT_ID, client_id)?,
            None => kv::delete_blob(self.conn, KEY_CLIENT_ID)?,
        }
        Ok(())
    }

    fn clear(&self) -> RepoResult<()> {
        for key in [KEY_ROLE, KEY_AUTHENTICATED, KEY_CLIENT_ID] {
            kv::delete_blob(self.conn, key)?;
        }
        Ok(())
    }
}

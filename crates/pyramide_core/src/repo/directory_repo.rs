//! Contact/client directory repository.
//!
//! # Responsibility
//! - Load and replace one directory entity's entries as a single JSON blob.
//! - Serve the built-in default entries until a first mutation materializes
//!   the merged list into storage.
//!
//! # Invariants
//! - Once a blob exists it is authoritative; defaults are a seed, not a
//!   permanent floor, so edited or deleted defaults stay edited or deleted.
//! - Corrupt blobs are logged and discarded in favor of the defaults.

use crate::db::kv;
use crate::model::contact::Contact;
use crate::repo::{ensure_kv_connection_ready, RepoError, RepoResult};
use log::warn;
use rusqlite::Connection;

/// One of the portal's two directory entities.
///
/// Both share the record shape and the built-in default entries; they
/// persist under separate blob keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryKind {
    /// Pyramide staff contacts shown to every account.
    Contacts,
    /// Client accounts managed by administrators.
    Clients,
}

impl DirectoryKind {
    /// Blob key under which this directory persists.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Clients => "clients",
        }
    }
}

/// Built-in entries served before any mutation is persisted.
pub fn default_entries() -> Vec<Contact> {
    vec![
        Contact {
            id: "1".to_string(),
            name: "Sophie Martin".to_string(),
            role: "Responsable commercial".to_string(),
            company: "Pyramide Conseil".to_string(),
            email: "s.martin@pyramide-conseil.fr".to_string(),
            phone: "01 23 45 67 89".to_string(),
            address: "12 rue des Pyramides, 75001 Paris".to_string(),
        },
        Contact {
            id: "2".to_string(),
            name: "Thomas Bernard".to_string(),
            role: "Consultant senior".to_string(),
            company: "Pyramide Conseil".to_string(),
            email: "t.bernard@pyramide-conseil.fr".to_string(),
            phone: "01 23 45 67 90".to_string(),
            address: "12 rue des Pyramides, 75001 Paris".to_string(),
        },
        Contact {
            id: "3".to_string(),
            name: "Julie Petit".to_string(),
            role: "Support client".to_string(),
            company: "Pyramide Conseil".to_string(),
            email: "j.petit@pyramide-conseil.fr".to_string(),
            phone: "01 23 45 67 91".to_string(),
            address: "12 rue des Pyramides, 75001 Paris".to_string(),
        },
    ]
}

/// Repository interface for directory entities.
pub trait DirectoryRepository {
    /// Loads one directory's full entry list, defaulting when absent.
    fn load(&self, kind: DirectoryKind) -> RepoResult<Vec<Contact>>;
    /// Replaces one directory's full entry list wholesale.
    fn replace(&self, kind: DirectoryKind, entries: &[Contact]) -> RepoResult<()>;
}

/// Blob-backed directory repository.
pub struct KvDirectoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> KvDirectoryRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_kv_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl DirectoryRepository for KvDirectoryRepository<'_> {
    fn load(&self, kind: DirectoryKind) -> RepoResult<Vec<Contact>> {
        let key = kind.storage_key();
        let Some(raw) = kv::read_blob(self.conn, key)? else {
            return Ok(default_entries());
        };

        match serde_json::from_str::<Vec<Contact>>(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(
                    "event=blob_corrupt module=repo status=recovered key={key} error={err}"
                );
                Ok(default_entries())
            }
        }
    }

    fn replace(&self, kind: DirectoryKind, entries: &[Contact]) -> RepoResult<()> {
        let payload = serde_json::to_string(entries)
            .map_err(|err| RepoError::Encode(err.to_string()))?;
        kv::write_blob(self.conn, kind.storage_key(), &payload)?;
        Ok(())
    }
}

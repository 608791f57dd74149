//! Contact/client directory use-case service.
//!
//! # Responsibility
//! - Validate and apply directory CRUD above the blob repository.
//! - Purge a removed client's personal documents when requested.
//!
//! # Invariants
//! - Write paths call `Contact::validate()` before any persistence.
//! - Every mutation replaces the directory blob wholesale, so defaults are
//!   materialized on first write and stay authoritative afterwards.

use crate::model::contact::{Contact, ContactValidationError};
use crate::repo::directory_repo::{DirectoryKind, DirectoryRepository};
use crate::repo::node_repo::{DocumentSpace, NodeRepository};
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Document handling when removing a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveMode {
    /// Remove the entry only; personal documents stay.
    KeepDocuments,
    /// Remove the entry and every personal document it owns.
    DeleteDocuments,
}

/// Errors from directory use-case operations.
#[derive(Debug)]
pub enum DirectoryError {
    /// Entry failed field validation.
    Validation(ContactValidationError),
    /// Target entry does not exist.
    ContactNotFound(String),
    /// Entry id is already taken.
    DuplicateContact(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ContactNotFound(id) => write!(f, "directory entry not found: {id}"),
            Self::DuplicateContact(id) => write!(f, "directory entry already exists: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for DirectoryError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for DirectoryError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Directory facade over both directory entities.
pub struct DirectoryService<D: DirectoryRepository, N: NodeRepository> {
    directory: D,
    nodes: N,
}

impl<D: DirectoryRepository, N: NodeRepository> DirectoryService<D, N> {
    /// Creates the service from its repositories.
    pub fn new(directory: D, nodes: N) -> Self {
        Self { directory, nodes }
    }

    /// Lists one directory's entries, defaults included until overridden.
    pub fn list(&self, kind: DirectoryKind) -> Result<Vec<Contact>, DirectoryError> {
        self.directory.load(kind).map_err(Into::into)
    }

    /// Looks up one entry by id.
    pub fn get(&self, kind: DirectoryKind, id: &str) -> Result<Option<Contact>, DirectoryError> {
        let entries = self.directory.load(kind)?;
        Ok(entries.into_iter().find(|entry| entry.id == id))
    }

    /// Adds one validated entry.
    pub fn add(&self, kind: DirectoryKind, contact: Contact) -> Result<Contact, DirectoryError> {
        contact.validate()?;
        let mut entries = self.directory.load(kind)?;
        if entries.iter().any(|entry| entry.id == contact.id) {
            return Err(DirectoryError::DuplicateContact(contact.id));
        }
        entries.push(contact.clone());
        self.directory.replace(kind, &entries)?;
        Ok(contact)
    }

    /// Replaces one existing entry by id.
    pub fn update(&self, kind: DirectoryKind, contact: &Contact) -> Result<(), DirectoryError> {
        contact.validate()?;
        let mut entries = self.directory.load(kind)?;
        let Some(slot) = entries.iter_mut().find(|entry| entry.id == contact.id) else {
            return Err(DirectoryError::ContactNotFound(contact.id.clone()));
        };
        *slot = contact.clone();
        self.directory.replace(kind, &entries)?;
        Ok(())
    }

    /// Removes one entry, optionally purging its personal documents.
    pub fn remove(
        &self,
        kind: DirectoryKind,
        id: &str,
        mode: RemoveMode,
    ) -> Result<Contact, DirectoryError> {
        let mut entries = self.directory.load(kind)?;
        let Some(position) = entries.iter().position(|entry| entry.id == id) else {
            return Err(DirectoryError::ContactNotFound(id.to_string()));
        };
        let removed = entries.remove(position);
        self.directory.replace(kind, &entries)?;

        if mode == RemoveMode::DeleteDocuments {
            let purged = self.purge_client_documents(id)?;
            info!(
                "event=directory_remove module=service status=ok id={id} purged_documents={purged}"
            );
        }
        Ok(removed)
    }

    /// Drops every personal-space node owned by one client id.
    fn purge_client_documents(&self, client_id: &str) -> Result<usize, DirectoryError> {
        let nodes = self.nodes.load(DocumentSpace::Personal)?;
        let kept: Vec<_> = nodes
            .iter()
            .filter(|node| node.client_id.as_deref() != Some(client_id))
            .cloned()
            .collect();
        let purged = nodes.len() - kept.len();
        if purged > 0 {
            self.nodes.replace(DocumentSpace::Personal, &kept)?;
        }
        Ok(purged)
    }
}

//! Dashboard summary read model.
//!
//! # Responsibility
//! - Count file documents per space and directory entries for the landing
//!   page tiles.
//!
//! # Invariants
//! - Counts reflect file nodes only; folders are navigation structure, not
//!   documents.
//! - The summary is a read model; building it never mutates any blob.

use crate::repo::directory_repo::{DirectoryKind, DirectoryRepository};
use crate::repo::node_repo::{DocumentSpace, NodeRepository};
use crate::repo::RepoResult;

/// Counts shown on the portal landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    /// File documents in the shared Pyramide space.
    pub pyramide_documents: usize,
    /// File documents in the personal space.
    pub personal_documents: usize,
    /// Entries in the contacts directory.
    pub contacts: usize,
    /// Entries in the clients directory.
    pub clients: usize,
}

/// Builds the landing-page summary from the repositories.
pub struct DashboardService<N: NodeRepository, D: DirectoryRepository> {
    nodes: N,
    directory: D,
}

impl<N: NodeRepository, D: DirectoryRepository> DashboardService<N, D> {
    /// Creates the service from its repositories.
    pub fn new(nodes: N, directory: D) -> Self {
        Self { nodes, directory }
    }

    /// Counts documents and directory entries across the portal.
    pub fn summary(&self) -> RepoResult<DashboardSummary> {
        Ok(DashboardSummary {
            pyramide_documents: self.count_files(DocumentSpace::Pyramide)?,
            personal_documents: self.count_files(DocumentSpace::Personal)?,
            contacts: self.directory.load(DirectoryKind::Contacts)?.len(),
            clients: self.directory.load(DirectoryKind::Clients)?.len(),
        })
    }

    fn count_files(&self, space: DocumentSpace) -> RepoResult<usize> {
        let nodes = self.nodes.load(space)?;
        Ok(nodes.iter().filter(|node| !node.is_folder()).count())
    }
}

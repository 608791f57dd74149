//! Document space node repository.
//!
//! # Responsibility
//! - Load and replace the node collection of one document space as a single
//!   JSON blob.
//! - Seed first-run demo content and recover from corrupt blobs.
//!
//! # Invariants
//! - `load` followed by `replace` round-trips optional node metadata
//!   verbatim.
//! - A corrupt blob never propagates: it is logged and replaced by the
//!   space's seed collection on the next read.

use crate::db::kv;
use crate::model::node::{Node, NodeKind};
use crate::repo::{ensure_kv_connection_ready, RepoError, RepoResult};
use log::warn;
use rusqlite::Connection;

/// One virtual document space of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSpace {
    /// Shared space curated by Pyramide staff.
    Pyramide,
    /// Personal space of the signed-in client.
    Personal,
}

impl DocumentSpace {
    /// Every space, in display order.
    pub const ALL: [DocumentSpace; 2] = [DocumentSpace::Pyramide, DocumentSpace::Personal];

    /// Blob key under which this space's collection persists.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Pyramide => "pyramideFiles",
            Self::Personal => "userFiles",
        }
    }

    /// User-facing title of the space.
    pub fn title(self) -> &'static str {
        match self {
            Self::Pyramide => "Documents Pyramides",
            Self::Personal => "Mes Documents",
        }
    }

    /// First-run demo collection for this space.
    pub fn seed(self) -> Vec<Node> {
        match self {
            Self::Pyramide => vec![
                Node::with_id("folder-1", NodeKind::Folder, "Contrats", None),
                Node::with_id("folder-2", NodeKind::Folder, "Factures", None),
                Node::with_id("folder-3", NodeKind::Folder, "Rapports", None),
                Node::with_id("file-1", NodeKind::File, "Présentation Pyramide.pdf", None),
                Node::with_id("file-2", NodeKind::File, "Guide utilisateur.pdf", None),
                Node::with_id(
                    "file-3",
                    NodeKind::File,
                    "Contrat cadre 2023.pdf",
                    Some("folder-1".into()),
                ),
                Node::with_id("file-4", NodeKind::File, "Avenant 1.pdf", Some("folder-1".into())),
                Node::with_id(
                    "file-5",
                    NodeKind::File,
                    "Facture Janvier 2023.pdf",
                    Some("folder-2".into()),
                ),
                Node::with_id(
                    "file-6",
                    NodeKind::File,
                    "Facture Février 2023.pdf",
                    Some("folder-2".into()),
                ),
                Node::with_id(
                    "file-7",
                    NodeKind::File,
                    "Rapport Annuel 2022.pdf",
                    Some("folder-3".into()),
                ),
            ],
            Self::Personal => vec![
                Node::with_id("folder-1", NodeKind::Folder, "Documents administratifs", None),
                Node::with_id("folder-2", NodeKind::Folder, "Projets", None),
                Node::with_id("file-1", NodeKind::File, "Note de service.pdf", None),
                Node::with_id("file-2", NodeKind::File, "Planning 2023.xlsx", None),
                Node::with_id(
                    "file-3",
                    NodeKind::File,
                    "Carte d'identité.pdf",
                    Some("folder-1".into()),
                ),
                Node::with_id(
                    "file-4",
                    NodeKind::File,
                    "Projet A - Budget.pdf",
                    Some("folder-2".into()),
                ),
                Node::with_id(
                    "file-5",
                    NodeKind::File,
                    "Projet B - Planning.pdf",
                    Some("folder-2".into()),
                ),
            ],
        }
    }
}

/// Repository interface for document space collections.
pub trait NodeRepository {
    /// Loads one space's full collection, seeding it when absent.
    fn load(&self, space: DocumentSpace) -> RepoResult<Vec<Node>>;
    /// Replaces one space's full collection wholesale.
    fn replace(&self, space: DocumentSpace, nodes: &[Node]) -> RepoResult<()>;
}

/// Blob-backed node repository.
pub struct KvNodeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> KvNodeRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_kv_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NodeRepository for KvNodeRepository<'_> {
    fn load(&self, space: DocumentSpace) -> RepoResult<Vec<Node>> {
        let key = space.storage_key();
        let Some(raw) = kv::read_blob(self.conn, key)? else {
            return Ok(space.seed());
        };

        match serde_json::from_str::<Vec<Node>>(&raw) {
            Ok(nodes) => Ok(nodes),
            Err(err) => {
                warn!(
                    "event=blob_corrupt module=repo status=recovered key={key} error={err}"
                );
                Ok(space.seed())
            }
        }
    }

    fn replace(&self, space: DocumentSpace, nodes: &[Node]) -> RepoResult<()> {
        let payload = serde_json::to_string(nodes)
            .map_err(|err| RepoError::Encode(err.to_string()))?;
        kv::write_blob(self.conn, space.storage_key(), &payload)?;
        Ok(())
    }
}

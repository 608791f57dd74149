//! Document tree node model.
//!
//! # Responsibility
//! - Define the node record shared by both document spaces.
//! - Preserve the persisted JSON field layout exactly (camelCase keys,
//!   `type` for the kind, optional metadata present-or-absent).
//!
//! # Invariants
//! - `id` is unique across one space's collection and never reused.
//! - `parent_id` is `None` (root) or the id of an existing folder node.
//! - The parent relation forms a forest; cycle prevention is enforced by the
//!   document service, not by this record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable node identifier.
///
/// Kept as a plain string: seeded demo entries use readable ids
/// (`folder-1`, `file-3`) while freshly created nodes get UUID v4 ids.
pub type NodeId = String;

/// Node category inside a document space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Grouping node that can contain child nodes.
    Folder,
    /// Leaf document entry.
    File,
}

/// One entry of a document space, folder or file.
///
/// The serialized shape is the storage contract: every blob element is one
/// of these records, round-tripped verbatim including the optional display
/// metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique id within the collection.
    pub id: NodeId,
    /// User-facing label.
    pub name: String,
    /// Serialized as `type` to match the persisted layout.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Parent folder id. `None` means root-level.
    pub parent_id: Option<NodeId>,
    /// Optional display date, compared lexicographically when sorting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Optional display color tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Optional owning client id, used when purging a client's documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Node {
    /// Creates a node with a fresh UUID id and no optional metadata.
    pub fn new(kind: NodeKind, name: impl Into<String>, parent_id: Option<NodeId>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), kind, name, parent_id)
    }

    /// Creates a node with a caller-provided id.
    ///
    /// Used for seeded demo data, where ids are stable readable strings.
    pub fn with_id(
        id: impl Into<NodeId>,
        kind: NodeKind,
        name: impl Into<String>,
        parent_id: Option<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            parent_id,
            date: None,
            color: None,
            client_id: None,
        }
    }

    /// Returns whether this node can contain children.
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}

//! Document tree use-case service.
//!
//! # Responsibility
//! - Own one space's node collection and expose its only mutation surface:
//!   create, import, cascade delete, and reparent.
//! - Persist every mutation as a wholesale blob replacement before it
//!   becomes observable in memory.
//!
//! # Invariants
//! - `parent_id` always references an existing folder node or is `None`.
//! - The parent relation stays acyclic; move is rejected before a cycle can
//!   be written.
//! - A failed persistence attempt leaves the previous collection intact.

use crate::model::node::{Node, NodeId, NodeKind};
use crate::repo::node_repo::{DocumentSpace, NodeRepository};
use crate::repo::RepoError;
use crate::search::names::{search_nodes, SearchQuery};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from document tree operations.
#[derive(Debug)]
pub enum DocumentError {
    /// Name is blank after trim.
    InvalidName,
    /// Target node does not exist.
    NodeNotFound(NodeId),
    /// Destination parent does not exist.
    ParentNotFound(NodeId),
    /// Destination parent exists but is not a folder.
    ParentMustBeFolder(NodeId),
    /// Node was dropped onto itself.
    SelfMove(NodeId),
    /// Move would make the node its own ancestor.
    CycleDetected { node_id: NodeId, parent_id: NodeId },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "name must not be blank"),
            Self::NodeNotFound(id) => write!(f, "document node not found: {id}"),
            Self::ParentNotFound(id) => write!(f, "destination folder not found: {id}"),
            Self::ParentMustBeFolder(id) => {
                write!(f, "destination must be a folder: {id}")
            }
            Self::SelfMove(id) => write!(f, "node cannot be moved onto itself: {id}"),
            Self::CycleDetected { node_id, parent_id } => write!(
                f,
                "move would create cycle: node {node_id} under parent {parent_id}"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for DocumentError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Document tree facade over one space.
///
/// The collection is loaded once at construction and replaced wholesale on
/// each mutating call; callers never observe a partially-updated tree.
pub struct DocumentService<R: NodeRepository> {
    repo: R,
    space: DocumentSpace,
    nodes: Vec<Node>,
}

impl<R: NodeRepository> DocumentService<R> {
    /// Loads the service for one document space.
    pub fn try_new(repo: R, space: DocumentSpace) -> Result<Self, DocumentError> {
        let nodes = repo.load(space)?;
        Ok(Self { repo, space, nodes })
    }

    /// Space served by this service.
    pub fn space(&self) -> DocumentSpace {
        self.space
    }

    /// Full collection, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Looks up one node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Lists direct children of one folder (`None` for the root level).
    pub fn list_children(&self, parent_id: Option<&str>) -> Vec<Node> {
        self.nodes
            .iter()
            .filter(|node| node.parent_id.as_deref() == parent_id)
            .cloned()
            .collect()
    }

    /// Number of file (non-folder) nodes in the collection.
    pub fn file_count(&self) -> usize {
        self.nodes.iter().filter(|node| !node.is_folder()).count()
    }

    /// Searches the whole collection by name, regardless of open folder.
    pub fn search(&self, query: &SearchQuery) -> Vec<Node> {
        search_nodes(&self.nodes, query)
    }

    /// Creates one folder under an optional parent folder.
    pub fn create_folder(
        &mut self,
        name: impl Into<String>,
        parent_id: Option<&str>,
    ) -> Result<Node, DocumentError> {
        self.create_node(NodeKind::Folder, name.into(), parent_id)
    }

    /// Imports one file under an optional parent folder.
    pub fn import_file(
        &mut self,
        name: impl Into<String>,
        parent_id: Option<&str>,
    ) -> Result<Node, DocumentError> {
        self.create_node(NodeKind::File, name.into(), parent_id)
    }

    /// Imports a batch of files under one parent, persisting once.
    ///
    /// The whole batch is validated before any node is created, so a blank
    /// name rejects the entire import without consuming ids.
    pub fn import_files(
        &mut self,
        names: &[String],
        parent_id: Option<&str>,
    ) -> Result<Vec<Node>, DocumentError> {
        for name in names {
            if name.trim().is_empty() {
                return Err(DocumentError::InvalidName);
            }
        }
        if let Some(parent_id) = parent_id {
            self.ensure_parent_is_folder(parent_id)?;
        }

        let created: Vec<Node> = names
            .iter()
            .map(|name| {
                Node::new(
                    NodeKind::File,
                    name.trim(),
                    parent_id.map(str::to_string),
                )
            })
            .collect();

        let mut next = self.nodes.clone();
        next.extend(created.iter().cloned());
        self.commit(next)?;
        Ok(created)
    }

    /// Deletes one node; folders cascade over their whole subtree.
    ///
    /// Returns the removed ids. A missing id is a no-op returning an empty
    /// set, matching the portal's silent-delete behavior.
    pub fn delete(&mut self, id: &str) -> Result<Vec<NodeId>, DocumentError> {
        let Some(target) = self.node(id) else {
            return Ok(Vec::new());
        };

        let removed: Vec<NodeId> = if target.is_folder() {
            self.collect_subtree_ids(id)
        } else {
            vec![target.id.clone()]
        };

        let doomed: HashSet<&str> = removed.iter().map(String::as_str).collect();
        let next: Vec<Node> = self
            .nodes
            .iter()
            .filter(|node| !doomed.contains(node.id.as_str()))
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(removed)
    }

    /// Reparents one node under an optional destination folder.
    ///
    /// Rejected when the node is missing, dropped onto itself, dropped onto
    /// a non-folder, or dropped into its own subtree. On success only the
    /// moved node's parent link changes.
    pub fn move_node(
        &mut self,
        id: &str,
        new_parent_id: Option<&str>,
    ) -> Result<(), DocumentError> {
        if self.node(id).is_none() {
            return Err(DocumentError::NodeNotFound(id.to_string()));
        }

        if let Some(parent_id) = new_parent_id {
            if parent_id == id {
                return Err(DocumentError::SelfMove(id.to_string()));
            }
            self.ensure_parent_is_folder(parent_id)?;
            if self.would_create_cycle(id, parent_id) {
                return Err(DocumentError::CycleDetected {
                    node_id: id.to_string(),
                    parent_id: parent_id.to_string(),
                });
            }
        }

        let mut next = self.nodes.clone();
        for node in &mut next {
            if node.id == id {
                node.parent_id = new_parent_id.map(str::to_string);
                break;
            }
        }
        self.commit(next)
    }

    fn create_node(
        &mut self,
        kind: NodeKind,
        name: String,
        parent_id: Option<&str>,
    ) -> Result<Node, DocumentError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DocumentError::InvalidName);
        }
        if let Some(parent_id) = parent_id {
            self.ensure_parent_is_folder(parent_id)?;
        }

        let node = Node::new(kind, trimmed, parent_id.map(str::to_string));
        let mut next = self.nodes.clone();
        next.push(node.clone());
        self.commit(next)?;
        Ok(node)
    }

    fn ensure_parent_is_folder(&self, parent_id: &str) -> Result<(), DocumentError> {
        let parent = self
            .node(parent_id)
            .ok_or_else(|| DocumentError::ParentNotFound(parent_id.to_string()))?;
        if !parent.is_folder() {
            return Err(DocumentError::ParentMustBeFolder(parent_id.to_string()));
        }
        Ok(())
    }

    /// Walks upward from the candidate parent; reaching the moved node means
    /// the drop would land inside its own subtree. The visited set guards
    /// against a corrupt persisted cycle.
    fn would_create_cycle(&self, node_id: &str, candidate_parent_id: &str) -> bool {
        let mut visited = HashSet::new();
        let mut cursor = Some(candidate_parent_id.to_string());
        while let Some(current) = cursor {
            if current == node_id {
                return true;
            }
            if !visited.insert(current.clone()) {
                return true;
            }
            cursor = self
                .node(&current)
                .and_then(|node| node.parent_id.clone());
        }
        false
    }

    /// Depth-first ids of one folder plus all of its descendants.
    fn collect_subtree_ids(&self, root_id: &str) -> Vec<NodeId> {
        let mut collected = Vec::new();
        let mut stack = vec![root_id.to_string()];
        while let Some(current) = stack.pop() {
            for node in &self.nodes {
                if node.parent_id.as_deref() == Some(current.as_str()) {
                    stack.push(node.id.clone());
                }
            }
            collected.push(current);
        }
        collected
    }

    /// Persists the candidate collection, then makes it current.
    fn commit(&mut self, next: Vec<Node>) -> Result<(), DocumentError> {
        self.repo.replace(self.space, &next)?;
        self.nodes = next;
        Ok(())
    }
}

//! Case-insensitive name search over one document space.
//!
//! # Responsibility
//! - Match node names by substring across the entire collection, not just
//!   the currently open folder.
//! - Produce a read-only result set; the collection and the navigation
//!   state are never touched.
//!
//! # Invariants
//! - Blank queries return no hits.
//! - Matching is case-insensitive on both sides.

use crate::model::node::{Node, NodeKind};

/// Search options for one name query.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// User query text; matched as a substring.
    pub text: String,
    /// Optional kind filter.
    pub kind: Option<NodeKind>,
    /// Maximum number of hits to return.
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Creates a query with no kind filter and no limit.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: None,
            limit: None,
        }
    }
}

/// Scans the whole collection for name matches, in collection order.
pub fn search_nodes(nodes: &[Node], query: &SearchQuery) -> Vec<Node> {
    let needle = query.text.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for node in nodes {
        if let Some(kind) = query.kind {
            if node.kind != kind {
                continue;
            }
        }
        if node.name.to_lowercase().contains(&needle) {
            hits.push(node.clone());
            if let Some(limit) = query.limit {
                if hits.len() >= limit {
                    break;
                }
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::{search_nodes, SearchQuery};
    use crate::model::node::{Node, NodeKind};

    fn collection() -> Vec<Node> {
        vec![
            Node::with_id("n1", NodeKind::Folder, "A", None),
            Node::with_id("n2", NodeKind::File, "B", None),
            Node::with_id("n3", NodeKind::File, "AA", Some("n1".into())),
        ]
    }

    #[test]
    fn matches_are_case_insensitive_and_cross_folder() {
        let hits = search_nodes(&collection(), &SearchQuery::new("a"));
        let names: Vec<_> = hits.iter().map(|node| node.name.as_str()).collect();
        assert_eq!(names, ["A", "AA"]);
    }

    #[test]
    fn blank_query_returns_nothing() {
        assert!(search_nodes(&collection(), &SearchQuery::new("   ")).is_empty());
    }

    #[test]
    fn kind_filter_narrows_hits() {
        let mut query = SearchQuery::new("a");
        query.kind = Some(NodeKind::File);
        let hits = search_nodes(&collection(), &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "n3");
    }

    #[test]
    fn limit_caps_result_count() {
        let mut query = SearchQuery::new("a");
        query.limit = Some(1);
        let hits = search_nodes(&collection(), &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "n1");
    }
}

//! Explorer session state: breadcrumb navigation, active search, and sort.
//!
//! # Responsibility
//! - Track the open folder as a breadcrumb trail from the root sentinel.
//! - Hold the active search result set and the display sort mode.
//! - Derive the visible listing without ever mutating the document store.
//!
//! # Invariants
//! - The trail always starts with the root entry; its last entry is the
//!   current folder.
//! - Opening any folder (or the root) clears the active search.
//! - Searching never changes the current folder.

use crate::model::node::{Node, NodeId};
use crate::repo::node_repo::NodeRepository;
use crate::search::names::SearchQuery;
use crate::service::document_service::DocumentService;
use crate::service::listing::{sort_listing, SortMode};

/// Label of the breadcrumb root sentinel.
pub const ROOT_LABEL: &str = "Racine";

/// One breadcrumb entry. `id == None` is the root sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub id: Option<NodeId>,
    pub name: String,
}

impl Breadcrumb {
    fn root() -> Self {
        Self {
            id: None,
            name: ROOT_LABEL.to_string(),
        }
    }
}

/// View-side session over one document space.
#[derive(Debug, Clone)]
pub struct Explorer {
    trail: Vec<Breadcrumb>,
    sort_mode: SortMode,
    search_hits: Option<Vec<Node>>,
}

impl Explorer {
    /// Starts at the root with the default sort and no active search.
    pub fn new() -> Self {
        Self {
            trail: vec![Breadcrumb::root()],
            sort_mode: SortMode::default(),
            search_hits: None,
        }
    }

    /// Id of the open folder; `None` at the root level.
    pub fn current_folder(&self) -> Option<&str> {
        self.trail
            .last()
            .and_then(|crumb| crumb.id.as_deref())
    }

    /// Breadcrumb trail from the root to the open folder.
    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.trail
    }

    /// Returns to the root level and clears any active search.
    pub fn open_root(&mut self) {
        self.search_hits = None;
        self.trail.truncate(1);
    }

    /// Opens one folder and clears any active search.
    ///
    /// A folder already present in the trail truncates it back to that entry
    /// (breadcrumb "go up"); any other folder is appended.
    pub fn open_folder(&mut self, id: &str, name: &str) {
        self.search_hits = None;
        if let Some(position) = self
            .trail
            .iter()
            .position(|crumb| crumb.id.as_deref() == Some(id))
        {
            self.trail.truncate(position + 1);
        } else {
            self.trail.push(Breadcrumb {
                id: Some(id.to_string()),
                name: name.to_string(),
            });
        }
    }

    /// Active sort mode for the visible listing.
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Changes the display ordering; storage order is untouched.
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    /// Runs a whole-collection name search and keeps the hits as the
    /// visible set. A blank query clears the search instead.
    ///
    /// The current folder is left untouched.
    pub fn search<R: NodeRepository>(
        &mut self,
        documents: &DocumentService<R>,
        text: &str,
    ) -> &[Node] {
        if text.trim().is_empty() {
            self.search_hits = None;
            return &[];
        }
        let hits = documents.search(&SearchQuery::new(text));
        self.search_hits = Some(hits);
        self.search_hits.as_deref().unwrap_or(&[])
    }

    /// Drops the active search, restoring the folder listing.
    pub fn clear_search(&mut self) {
        self.search_hits = None;
    }

    /// Whether a search result set is currently displayed.
    pub fn is_searching(&self) -> bool {
        self.search_hits.is_some()
    }

    /// The listing to display: active search hits, or the open folder's
    /// children, ordered by the current sort mode.
    pub fn visible<R: NodeRepository>(&self, documents: &DocumentService<R>) -> Vec<Node> {
        let mut listing = match &self.search_hits {
            Some(hits) => hits.clone(),
            None => documents.list_children(self.current_folder()),
        };
        sort_listing(&mut listing, self.sort_mode);
        listing
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}

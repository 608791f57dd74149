//! Core domain logic for the Pyramide client portal.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactValidationError};
pub use model::node::{Node, NodeId, NodeKind};
pub use model::session::{Capability, Role, Session};
pub use repo::directory_repo::{DirectoryKind, DirectoryRepository, KvDirectoryRepository};
pub use repo::node_repo::{DocumentSpace, KvNodeRepository, NodeRepository};
pub use repo::session_repo::{KvSessionRepository, SessionRepository};
pub use repo::{RepoError, RepoResult};
pub use search::names::{search_nodes, SearchQuery};
pub use service::auth_service::{AuthError, AuthService};
pub use service::dashboard_service::{DashboardService, DashboardSummary};
pub use service::directory_service::{DirectoryError, DirectoryService, RemoveMode};
pub use service::document_service::{DocumentError, DocumentService};
pub use service::explorer::{Breadcrumb, Explorer, ROOT_LABEL};
pub use service::listing::{sort_listing, SortDirection, SortKey, SortMode};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

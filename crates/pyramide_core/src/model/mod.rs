//! Domain model for the client portal core.
//!
//! # Responsibility
//! - Define the canonical records shared by repositories and services.
//! - Keep the persisted JSON field layout stable across releases.
//!
//! # Invariants
//! - Every record is identified by a stable string id.
//! - Hierarchy and permission rules are enforced by services; models only
//!   carry state and per-record validation.

pub mod contact;
pub mod node;
pub mod session;

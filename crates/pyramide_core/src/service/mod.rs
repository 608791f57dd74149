//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep view layers decoupled from storage details.

pub mod auth_service;
pub mod dashboard_service;
pub mod directory_service;
pub mod document_service;
pub mod explorer;
pub mod listing;

//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pyramide_core` wiring against
//!   an in-memory store.
//! - Keep output deterministic for quick local sanity checks.

use pyramide_core::db::open_db_in_memory;
use pyramide_core::{
    AuthService, DashboardService, DocumentService, DocumentSpace, Explorer, KvDirectoryRepository,
    KvNodeRepository, KvSessionRepository,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("pyramide_core ping={}", pyramide_core::ping());
    println!("pyramide_core version={}", pyramide_core::core_version());

    let conn = open_db_in_memory()?;

    let auth = AuthService::new(KvSessionRepository::try_new(&conn)?);
    let session = auth.login("admin", "admin")?;
    println!("session role={}", session.role.as_str());

    let dashboard = DashboardService::new(
        KvNodeRepository::try_new(&conn)?,
        KvDirectoryRepository::try_new(&conn)?,
    );
    let summary = dashboard.summary()?;
    println!(
        "dashboard pyramide_documents={} personal_documents={} contacts={} clients={}",
        summary.pyramide_documents, summary.personal_documents, summary.contacts, summary.clients
    );

    let documents =
        DocumentService::try_new(KvNodeRepository::try_new(&conn)?, DocumentSpace::Pyramide)?;
    let explorer = Explorer::new();
    for node in explorer.visible(&documents) {
        println!("root entry name={}", node.name);
    }

    auth.logout()?;
    Ok(())
}

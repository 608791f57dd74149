use pyramide_core::db::open_db_in_memory;
use pyramide_core::{
    DashboardService, DirectoryKind, DirectoryService, DocumentService, DocumentSpace,
    KvDirectoryRepository, KvNodeRepository, RemoveMode,
};
use rusqlite::Connection;

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn dashboard(conn: &Connection) -> DashboardService<KvNodeRepository<'_>, KvDirectoryRepository<'_>> {
    DashboardService::new(
        KvNodeRepository::try_new(conn).unwrap(),
        KvDirectoryRepository::try_new(conn).unwrap(),
    )
}

#[test]
fn summary_counts_files_not_folders() {
    let conn = setup();

    let summary = dashboard(&conn).summary().unwrap();
    assert_eq!(summary.pyramide_documents, 7);
    assert_eq!(summary.personal_documents, 5);
    assert_eq!(summary.contacts, 3);
    assert_eq!(summary.clients, 3);
}

#[test]
fn summary_tracks_mutations() {
    let conn = setup();

    let mut personal = DocumentService::try_new(
        KvNodeRepository::try_new(&conn).unwrap(),
        DocumentSpace::Personal,
    )
    .unwrap();
    personal.import_file("Attestation.pdf", None).unwrap();
    personal.create_folder("Dossier vide", None).unwrap();

    let directory = DirectoryService::new(
        KvDirectoryRepository::try_new(&conn).unwrap(),
        KvNodeRepository::try_new(&conn).unwrap(),
    );
    directory
        .remove(DirectoryKind::Contacts, "1", RemoveMode::KeepDocuments)
        .unwrap();

    let summary = dashboard(&conn).summary().unwrap();
    assert_eq!(summary.personal_documents, 6);
    assert_eq!(summary.pyramide_documents, 7);
    assert_eq!(summary.contacts, 2);
    assert_eq!(summary.clients, 3);
}

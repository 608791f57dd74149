use pyramide_core::db::{open_db_in_memory, write_blob};
use pyramide_core::{
    DocumentError, DocumentService, DocumentSpace, KvNodeRepository, Node, NodeKind,
    NodeRepository, RepoError, RepoResult,
};
use rusqlite::Connection;
use std::collections::HashSet;

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn documents(conn: &Connection, space: DocumentSpace) -> DocumentService<KvNodeRepository<'_>> {
    DocumentService::try_new(KvNodeRepository::try_new(conn).unwrap(), space).unwrap()
}

/// Referential integrity plus acyclicity over the whole collection.
fn assert_forest(nodes: &[Node]) {
    let ids: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    assert_eq!(ids.len(), nodes.len(), "node ids must be unique");

    let folders: HashSet<&str> = nodes
        .iter()
        .filter(|node| node.is_folder())
        .map(|node| node.id.as_str())
        .collect();

    for node in nodes {
        if let Some(parent) = node.parent_id.as_deref() {
            assert!(
                folders.contains(parent),
                "parent of {} must be an existing folder",
                node.id
            );
        }

        let mut visited = HashSet::new();
        let mut cursor = Some(node.id.as_str());
        while let Some(current) = cursor {
            assert!(visited.insert(current), "parent walk revisited {current}");
            cursor = nodes
                .iter()
                .find(|candidate| candidate.id == current)
                .and_then(|candidate| candidate.parent_id.as_deref());
        }
    }
}

#[test]
fn spaces_load_their_seed_collections() {
    let conn = setup();

    let pyramide = documents(&conn, DocumentSpace::Pyramide);
    assert_eq!(pyramide.nodes().len(), 10);
    assert_eq!(pyramide.file_count(), 7);
    assert_forest(pyramide.nodes());

    let personal = documents(&conn, DocumentSpace::Personal);
    assert_eq!(personal.nodes().len(), 7);
    assert_eq!(personal.file_count(), 5);
    assert_forest(personal.nodes());
}

#[test]
fn create_folder_appends_under_parent() {
    let conn = setup();
    let mut service = documents(&conn, DocumentSpace::Pyramide);

    let created = service.create_folder("Archives", Some("folder-1")).unwrap();
    assert_eq!(created.kind, NodeKind::Folder);
    assert_eq!(created.parent_id.as_deref(), Some("folder-1"));

    let children = service.list_children(Some("folder-1"));
    assert!(children.iter().any(|node| node.id == created.id));
    assert_forest(service.nodes());
}

#[test]
fn blank_names_are_rejected_without_mutation() {
    let conn = setup();
    let mut service = documents(&conn, DocumentSpace::Personal);
    let before = service.nodes().to_vec();

    let err = service.create_folder("  ", None).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidName));

    let err = service.import_file("\t", Some("folder-1")).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidName));

    assert_eq!(service.nodes(), before.as_slice());
}

#[test]
fn create_rejects_missing_or_file_parent() {
    let conn = setup();
    let mut service = documents(&conn, DocumentSpace::Pyramide);

    let err = service.create_folder("Orphan", Some("nope")).unwrap_err();
    assert!(matches!(err, DocumentError::ParentNotFound(id) if id == "nope"));

    let err = service.import_file("report.pdf", Some("file-1")).unwrap_err();
    assert!(matches!(err, DocumentError::ParentMustBeFolder(id) if id == "file-1"));
}

#[test]
fn import_files_batch_is_all_or_nothing() {
    let conn = setup();
    let mut service = documents(&conn, DocumentSpace::Personal);
    let before = service.nodes().len();

    let names = vec!["a.pdf".to_string(), "   ".to_string(), "b.pdf".to_string()];
    let err = service.import_files(&names, Some("folder-2")).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidName));
    assert_eq!(service.nodes().len(), before);

    let names = vec!["a.pdf".to_string(), "b.pdf".to_string()];
    let created = service.import_files(&names, Some("folder-2")).unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(service.nodes().len(), before + 2);
    assert!(created
        .iter()
        .all(|node| node.parent_id.as_deref() == Some("folder-2")));
}

#[test]
fn delete_file_removes_exactly_that_node() {
    let conn = setup();
    let mut service = documents(&conn, DocumentSpace::Pyramide);
    let before = service.nodes().len();

    let removed = service.delete("file-2").unwrap();
    assert_eq!(removed, vec!["file-2".to_string()]);
    assert_eq!(service.nodes().len(), before - 1);
    assert!(service.node("file-2").is_none());
    assert_forest(service.nodes());
}

#[test]
fn delete_folder_cascades_over_exact_subtree() {
    let conn = setup();
    let mut service = documents(&conn, DocumentSpace::Pyramide);

    // Deepen the tree so the cascade spans more than one level.
    let nested = service.create_folder("Annexes", Some("folder-1")).unwrap();
    let leaf = service.import_file("annexe.pdf", Some(&nested.id)).unwrap();

    let removed = service.delete("folder-1").unwrap();
    let removed: HashSet<_> = removed.iter().map(String::as_str).collect();
    let expected: HashSet<&str> = ["folder-1", "file-3", "file-4", nested.id.as_str(), leaf.id.as_str()]
        .into_iter()
        .collect();
    assert_eq!(removed, expected);

    for id in &expected {
        assert!(service.node(id).is_none());
    }
    assert!(service.node("folder-2").is_some());
    assert!(service.node("file-1").is_some());
    assert_forest(service.nodes());
}

#[test]
fn delete_missing_id_is_a_noop() {
    let conn = setup();
    let mut service = documents(&conn, DocumentSpace::Personal);
    let before = service.nodes().to_vec();

    let removed = service.delete("ghost").unwrap();
    assert!(removed.is_empty());
    assert_eq!(service.nodes(), before.as_slice());
}

#[test]
fn move_rejects_self_and_descendant_targets() {
    let conn = setup();
    let mut service = documents(&conn, DocumentSpace::Personal);

    let parent = service.create_folder("Outer", None).unwrap();
    let child = service.create_folder("Inner", Some(&parent.id)).unwrap();
    let before = service.nodes().to_vec();

    let err = service.move_node(&parent.id, Some(&parent.id)).unwrap_err();
    assert!(matches!(err, DocumentError::SelfMove(id) if id == parent.id));
    assert_eq!(service.nodes(), before.as_slice());

    let err = service.move_node(&parent.id, Some(&child.id)).unwrap_err();
    assert!(matches!(err, DocumentError::CycleDetected { .. }));
    assert_eq!(service.nodes(), before.as_slice());
}

#[test]
fn move_rejects_file_targets_and_missing_nodes() {
    let conn = setup();
    let mut service = documents(&conn, DocumentSpace::Pyramide);

    let err = service.move_node("file-1", Some("file-2")).unwrap_err();
    assert!(matches!(err, DocumentError::ParentMustBeFolder(id) if id == "file-2"));

    let err = service.move_node("file-1", Some("ghost")).unwrap_err();
    assert!(matches!(err, DocumentError::ParentNotFound(id) if id == "ghost"));

    let err = service.move_node("ghost", None).unwrap_err();
    assert!(matches!(err, DocumentError::NodeNotFound(id) if id == "ghost"));
}

#[test]
fn move_updates_only_the_parent_link() {
    let conn = setup();
    let mut service = documents(&conn, DocumentSpace::Pyramide);
    let before = service.nodes().to_vec();

    service.move_node("file-1", Some("folder-2")).unwrap();

    for node in service.nodes() {
        let old = before.iter().find(|candidate| candidate.id == node.id).unwrap();
        if node.id == "file-1" {
            assert_eq!(node.parent_id.as_deref(), Some("folder-2"));
            assert_eq!(node.name, old.name);
            assert_eq!(node.kind, old.kind);
        } else {
            assert_eq!(node, old);
        }
    }
    assert_forest(service.nodes());

    // Moving back to the root level is a plain reparent to `None`.
    service.move_node("file-1", None).unwrap();
    assert_eq!(service.node("file-1").unwrap().parent_id, None);
}

#[test]
fn mutations_survive_service_reload() {
    let conn = setup();

    let created = {
        let mut service = documents(&conn, DocumentSpace::Personal);
        let created = service.create_folder("Persisté", None).unwrap();
        service.move_node("file-1", Some(&created.id)).unwrap();
        service.delete("file-2").unwrap();
        created
    };

    let reloaded = documents(&conn, DocumentSpace::Personal);
    assert!(reloaded.node(&created.id).is_some());
    assert_eq!(
        reloaded.node("file-1").unwrap().parent_id.as_deref(),
        Some(created.id.as_str())
    );
    assert!(reloaded.node("file-2").is_none());
    assert_forest(reloaded.nodes());
}

#[test]
fn corrupt_blob_is_replaced_by_the_seed() {
    let conn = setup();
    write_blob(&conn, "pyramideFiles", "{not json").unwrap();

    let service = documents(&conn, DocumentSpace::Pyramide);
    assert_eq!(service.nodes(), DocumentSpace::Pyramide.seed().as_slice());
}

#[test]
fn optional_metadata_round_trips_through_storage() {
    let conn = setup();
    let repo = KvNodeRepository::try_new(&conn).unwrap();

    let mut tagged = Node::with_id("file-9", NodeKind::File, "Relevé.pdf", None);
    tagged.date = Some("2023-06-30".to_string());
    tagged.client_id = Some("1".to_string());
    let plain = Node::with_id("file-10", NodeKind::File, "Note.pdf", None);

    repo.replace(DocumentSpace::Personal, &[tagged.clone(), plain.clone()])
        .unwrap();
    let loaded = repo.load(DocumentSpace::Personal).unwrap();
    assert_eq!(loaded, vec![tagged, plain]);
}

struct RefusingRepo {
    nodes: Vec<Node>,
}

impl NodeRepository for RefusingRepo {
    fn load(&self, _space: DocumentSpace) -> RepoResult<Vec<Node>> {
        Ok(self.nodes.clone())
    }

    fn replace(&self, _space: DocumentSpace, _nodes: &[Node]) -> RepoResult<()> {
        Err(RepoError::Encode("write refused".to_string()))
    }
}

#[test]
fn failed_persistence_leaves_previous_collection_observable() {
    let repo = RefusingRepo {
        nodes: DocumentSpace::Personal.seed(),
    };
    let mut service = DocumentService::try_new(repo, DocumentSpace::Personal).unwrap();
    let before = service.nodes().to_vec();

    let err = service.create_folder("Jamais", None).unwrap_err();
    assert!(matches!(err, DocumentError::Repo(_)));
    assert_eq!(service.nodes(), before.as_slice());

    let err = service.delete("file-1").unwrap_err();
    assert!(matches!(err, DocumentError::Repo(_)));
    assert_eq!(service.nodes(), before.as_slice());
}

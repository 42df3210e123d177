use devshelf::resource::{ResourceEntry, ResourceStore};
use devshelf::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, RESOURCE_DATA_KEY};
use chrono::Utc;
use proptest::prelude::*;
use std::sync::Arc;

const CATEGORIES: [&str; 3] = ["frontend", "backend", "design"];
const SUB_CATEGORIES: [&str; 3] = ["tools", "docs", "other"];

#[derive(Clone, Debug)]
enum Operation {
    Add { category_hint: u8, sub_hint: u8 },
    DeleteAt { category_hint: u8, sub_hint: u8, index: u8 },
    DeleteFirstById,
    RemoveCategory { category_hint: u8 },
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (any::<u8>(), any::<u8>()).prop_map(|(category_hint, sub_hint)| Operation::Add {
            category_hint,
            sub_hint,
        }),
        3 => (any::<u8>(), any::<u8>(), 0u8..4).prop_map(|(category_hint, sub_hint, index)| {
            Operation::DeleteAt {
                category_hint,
                sub_hint,
                index,
            }
        }),
        1 => Just(Operation::DeleteFirstById),
        1 => any::<u8>().prop_map(|category_hint| Operation::RemoveCategory { category_hint }),
    ]
}

fn pick<'a>(options: &[&'a str], hint: u8) -> &'a str {
    options[hint as usize % options.len()]
}

proptest! {
    #[test]
    fn random_sequences_never_leave_empty_containers(
        ops in prop::collection::vec(operation_strategy(), 1..48)
    ) {
        let backend = Arc::new(MemoryKeyValueStore::new());
        let mut store = ResourceStore::open(backend.clone());
        let mut added = 0usize;

        for op in ops {
            match op {
                Operation::Add { category_hint, sub_hint } => {
                    let sub = pick(&SUB_CATEGORIES, sub_hint);
                    let entry = ResourceEntry::new(
                        format!("https://example.com/{}", added),
                        format!("Entry {}", added),
                        sub,
                        Utc::now(),
                    );
                    store.add(pick(&CATEGORIES, category_hint), sub, entry).unwrap();
                    added += 1;
                }
                Operation::DeleteAt { category_hint, sub_hint, index } => {
                    let category = pick(&CATEGORIES, category_hint);
                    let sub = pick(&SUB_CATEGORIES, sub_hint);
                    let held = store
                        .document()
                        .entries(category, sub)
                        .map(|e| e.len())
                        .unwrap_or(0);
                    let removed = store.delete(category, sub, index as usize).unwrap();
                    prop_assert_eq!(removed, (index as usize) < held);
                }
                Operation::DeleteFirstById => {
                    let first = store
                        .document()
                        .category_ids()
                        .next()
                        .and_then(|c| store.query(c, None, &[]).into_iter().next());
                    if let Some(entry) = first {
                        prop_assert!(store.delete_by_id(&entry.id).unwrap());
                    }
                }
                Operation::RemoveCategory { category_hint } => {
                    store.remove_category(pick(&CATEGORIES, category_hint)).unwrap();
                }
            }
            prop_assert!(!store.document().has_empty_containers());
        }

        // What was persisted is exactly what is held in memory.
        let reopened = ResourceStore::open(backend);
        prop_assert_eq!(reopened.document(), store.document());
    }
}

#[test]
fn file_backend_survives_reopen() {
    let temp = tempfile::tempdir().unwrap();
    let backend = Arc::new(FileKeyValueStore::new(temp.path()));
    let mut store = ResourceStore::open(backend.clone());
    let entry = ResourceEntry::new("https://vitejs.dev", "Vite", "tools", Utc::now());
    store.add("frontend", "tools", entry.clone()).unwrap();

    assert!(temp.path().join("resourceData.json").exists());
    let reopened = ResourceStore::open(Arc::new(FileKeyValueStore::new(temp.path())));
    assert_eq!(reopened.document().entries("frontend", "tools").unwrap(), &[entry]);
}

#[test]
fn corrupt_document_loads_as_empty() {
    let backend = Arc::new(MemoryKeyValueStore::new());
    backend.set(RESOURCE_DATA_KEY, "{not json").unwrap();
    let store = ResourceStore::open(backend);
    assert!(store.document().is_empty());
}

#[test]
fn rejected_write_is_reported_as_storage_error() {
    let backend = Arc::new(MemoryKeyValueStore::new());
    let mut store = ResourceStore::open(backend.clone());
    backend.set_reject_writes(true);

    let entry = ResourceEntry::new("https://vitejs.dev", "Vite", "tools", Utc::now());
    let err = store.add("frontend", "tools", entry).unwrap_err();
    assert!(matches!(err, devshelf::ShelfError::Storage(_)));
    assert!(err.to_string().starts_with("Operation failed, please retry"));
}

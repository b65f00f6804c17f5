// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::MemoryStore;
use tempfile::tempdir;

#[yare::parameterized(
    csv        = { "books.csv",  true },
    upper_csv  = { "BOOKS.CSV",  true },
    json       = { "books.json", true },
    xlsx       = { "books.xlsx", false },
    no_ext     = { "books",      false },
)]
fn open_by_extension(name: &str, supported: bool) {
    let result = open_store(Path::new(name), ColumnConfig::default());
    assert_eq!(result.is_ok(), supported);
}

#[test]
fn table_store_dispatches_to_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("books.csv");
    std::fs::write(&path, "isbn,result\n111,\n").unwrap();

    let store = open_store(&path, ColumnConfig::default()).unwrap();
    store
        .apply(&[CellUpdate {
            index: 0,
            value: "TP312".to_string(),
        }])
        .unwrap();

    assert_eq!(store.location(), path.display().to_string());
    assert_eq!(
        store.load().unwrap(),
        vec![Record::new(0, "111", Some("TP312"))]
    );
}

#[test]
fn memory_store_rejects_whole_batch_on_bad_index() {
    let store = MemoryStore::from_keys(&["a", "b"]);

    let err = store
        .apply(&[
            CellUpdate {
                index: 0,
                value: "x".to_string(),
            },
            CellUpdate {
                index: 9,
                value: "y".to_string(),
            },
        ])
        .unwrap_err();

    assert!(matches!(err, StoreError::RowOutOfRange { index: 9, len: 2 }));
    assert_eq!(store.values(), vec![None, None]);
    assert!(store.applies().is_empty());
}

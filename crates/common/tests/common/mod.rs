//! Shared test utilities for namespace integration tests
#![allow(dead_code)]

use common::namespace::{EntityKind, Entry, Namespace};

/// Set up a namespace with drive `C` and folder `/C/Documents`
pub fn setup_test_env() -> Namespace {
    let mut namespace = Namespace::new();
    namespace.create("", "drive", "C").unwrap();
    namespace.create("/C", "folder", "Documents").unwrap();
    namespace
}

/// Set up the test namespace plus `/C/OtherFolder` and `/C/Documents/file1.txt`
pub fn setup_with_file() -> Namespace {
    let mut namespace = setup_test_env();
    namespace.create("/C", "folder", "OtherFolder").unwrap();
    namespace
        .create("/C/Documents", "file", "file1.txt")
        .unwrap();
    namespace
}

pub fn file(name: &str) -> Entry {
    Entry {
        name: name.to_string(),
        kind: EntityKind::File,
    }
}

pub fn folder(name: &str) -> Entry {
    Entry {
        name: name.to_string(),
        kind: EntityKind::Folder,
    }
}

//! Integration tests for Namespace create operations

mod common;

use ::common::namespace::{EntityKind, ErrorKind, Namespace, NamespaceError};

#[test]
fn test_create_drive() {
    let mut namespace = Namespace::new();

    let kind = namespace.create("", "drive", "C").unwrap();
    assert_eq!(kind, EntityKind::Drive);
    assert_eq!(namespace.drives(), vec!["C"]);

    // A new drive starts empty
    assert!(namespace.ls("/C").unwrap().is_empty());
}

#[test]
fn test_create_drive_twice() {
    let mut namespace = Namespace::new();
    namespace.create("", "drive", "C").unwrap();

    let err = namespace.create("", "drive", "C").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(err, NamespaceError::DriveAlreadyExists("C".to_string()));
    assert_eq!(namespace.drives(), vec!["C"]);
}

#[test]
fn test_create_drive_off_root_is_invalid() {
    let mut namespace = common::setup_test_env();

    let err = namespace.create("/C/Documents", "drive", "D").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPath);
    assert_eq!(namespace.drives(), vec!["C"]);
}

#[test]
fn test_create_nested_entities() {
    let mut namespace = common::setup_test_env();

    namespace.create("/C/Documents", "folder", "Reports").unwrap();
    namespace
        .create("/C/Documents/Reports/", "file", "q1.txt")
        .unwrap();

    assert_eq!(
        namespace.ls("/C/Documents").unwrap(),
        vec![common::folder("Reports")]
    );
    assert_eq!(
        namespace.ls("/C/Documents/Reports").unwrap(),
        vec![common::file("q1.txt")]
    );

    // New files start with empty content
    assert_eq!(namespace.read("/C/Documents/Reports/q1.txt").unwrap(), "");
}

#[test]
fn test_create_uniqueness_per_parent() {
    let mut namespace = common::setup_test_env();
    namespace.create("/C", "folder", "Other").unwrap();

    namespace.create("/C/Documents", "file", "same").unwrap();
    for kind in ["file", "folder"] {
        let err = namespace.create("/C/Documents", kind, "same").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists, "{kind}");
    }

    // The same name is fine under a different parent
    namespace.create("/C/Other", "file", "same").unwrap();
}

#[test]
fn test_create_under_file_is_not_a_folder() {
    let mut namespace = common::setup_with_file();

    let err = namespace
        .create("/C/Documents/file1.txt", "file", "child.txt")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAFolder);

    let err = namespace
        .create("/C/Documents/file1.txt", "folder", "child")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAFolder);
}

#[test]
fn test_create_in_missing_parent() {
    let mut namespace = common::setup_test_env();

    let err = namespace.create("/D", "folder", "x").unwrap_err();
    assert_eq!(err, NamespaceError::DriveNotFound("D".to_string()));

    let err = namespace.create("/C/Nope", "folder", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_create_invalid_kind() {
    let mut namespace = common::setup_test_env();

    let err = namespace.create("/C", "directory", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidKind);
    assert!(namespace.ls("/C").unwrap().len() == 1);
}

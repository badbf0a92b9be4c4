//! Integration tests for Namespace mv (move) operations

mod common;

use ::common::namespace::{ErrorKind, Namespace, NamespaceError};

/// Snapshot of everything a failed move must leave untouched
fn snapshot(namespace: &Namespace, paths: &[&str]) -> Vec<String> {
    paths
        .iter()
        .map(|path| format!("{:?}", namespace.ls(path)))
        .collect()
}

#[test]
fn test_mv_file() {
    let mut namespace = common::setup_with_file();
    namespace
        .write("/C/Documents/file1.txt", "Hello, World!")
        .unwrap();

    namespace
        .mv("/C/Documents/file1.txt", "/C/OtherFolder")
        .unwrap();

    // Destination now holds the file, under its original name
    assert!(namespace
        .ls("/C/OtherFolder")
        .unwrap()
        .contains(&common::file("file1.txt")));
    assert!(!namespace
        .ls("/C/Documents")
        .unwrap()
        .contains(&common::file("file1.txt")));

    // Content travels with the file
    assert_eq!(
        namespace.read("/C/OtherFolder/file1.txt").unwrap(),
        "Hello, World!"
    );
    let err = namespace.read("/C/Documents/file1.txt").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_mv_directory() {
    let mut namespace = common::setup_with_file();
    namespace.create("/C/Documents", "folder", "nested").unwrap();
    namespace
        .create("/C/Documents/nested", "file", "deep.txt")
        .unwrap();
    namespace
        .write("/C/Documents/nested/deep.txt", "deep data")
        .unwrap();

    namespace.mv("/C/Documents", "/C/OtherFolder").unwrap();

    // The whole subtree moved
    assert_eq!(
        namespace.ls("/C/OtherFolder/Documents").unwrap(),
        vec![common::file("file1.txt"), common::folder("nested")]
    );
    assert_eq!(
        namespace
            .read("/C/OtherFolder/Documents/nested/deep.txt")
            .unwrap(),
        "deep data"
    );
    assert_eq!(
        namespace.ls("/C").unwrap(),
        vec![common::folder("OtherFolder")]
    );
}

#[test]
fn test_mv_across_drives() {
    let mut namespace = common::setup_with_file();
    namespace.create("", "drive", "D").unwrap();

    namespace.mv("/C/Documents/file1.txt", "/D").unwrap();

    assert_eq!(namespace.ls("/D").unwrap(), vec![common::file("file1.txt")]);
    assert!(namespace.ls("/C/Documents").unwrap().is_empty());
}

#[test]
fn test_mv_collision_leaves_tree_unchanged() {
    let mut namespace = common::setup_with_file();
    namespace
        .create("/C/OtherFolder", "file", "file1.txt")
        .unwrap();
    namespace
        .write("/C/Documents/file1.txt", "original")
        .unwrap();
    let before = snapshot(&namespace, &["/C/Documents", "/C/OtherFolder"]);

    let err = namespace
        .mv("/C/Documents/file1.txt", "/C/OtherFolder")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);

    // The source still resolves where it was, with its content
    assert_eq!(namespace.read("/C/Documents/file1.txt").unwrap(), "original");
    assert_eq!(
        snapshot(&namespace, &["/C/Documents", "/C/OtherFolder"]),
        before
    );
}

#[test]
fn test_mv_into_current_parent_is_a_collision() {
    let mut namespace = common::setup_with_file();

    let err = namespace
        .mv("/C/Documents/file1.txt", "/C/Documents")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(
        namespace.ls("/C/Documents").unwrap(),
        vec![common::file("file1.txt")]
    );
}

#[test]
fn test_mv_failures_leave_tree_unchanged() {
    let mut namespace = common::setup_with_file();
    namespace.create("/C/OtherFolder", "file", "plain.txt").unwrap();
    let watched = ["/C", "/C/Documents", "/C/OtherFolder"];
    let before = snapshot(&namespace, &watched);

    let cases = [
        // destination is a file
        (
            "/C/Documents/file1.txt",
            "/C/OtherFolder/plain.txt",
            ErrorKind::NotAFolder,
        ),
        // destination missing
        ("/C/Documents/file1.txt", "/C/Nowhere", ErrorKind::NotFound),
        ("/C/Documents/file1.txt", "/Z", ErrorKind::NotFound),
        // source missing
        ("/C/Documents/nope.txt", "/C/OtherFolder", ErrorKind::NotFound),
        // source has no parent
        ("/C", "/C/OtherFolder", ErrorKind::InvalidPath),
        // destination inside the source
        ("/C/Documents", "/C/Documents", ErrorKind::InvalidPath),
    ];

    for (source, destination, expected) in cases {
        let err = namespace.mv(source, destination).unwrap_err();
        assert_eq!(err.kind(), expected, "{source} -> {destination}: {err}");
        assert_eq!(snapshot(&namespace, &watched), before);
    }

    assert!(namespace.read("/C/Documents/file1.txt").is_ok());
}

#[test]
fn test_mv_into_descendant() {
    let mut namespace = common::setup_with_file();
    namespace.create("/C/Documents", "folder", "sub").unwrap();

    let err = namespace.mv("/C/Documents", "/C/Documents/sub").unwrap_err();
    assert_eq!(
        err,
        NamespaceError::MoveIntoSelf {
            from: "/C/Documents".to_string(),
            to: "/C/Documents/sub".to_string(),
        }
    );
    assert!(namespace.ls("/C/Documents/sub").unwrap().is_empty());
}

#[test]
fn test_mv_appends_to_destination_order() {
    let mut namespace = common::setup_with_file();
    namespace.create("/C/OtherFolder", "file", "b.txt").unwrap();
    namespace.create("/C/OtherFolder", "file", "a.txt").unwrap();

    namespace
        .mv("/C/Documents/file1.txt", "/C/OtherFolder")
        .unwrap();

    let names: Vec<_> = namespace
        .ls("/C/OtherFolder")
        .unwrap()
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["b.txt", "a.txt", "file1.txt"]);
}

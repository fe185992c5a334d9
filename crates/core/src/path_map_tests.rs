// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn mapping() -> PathMapping {
    serde_json::from_value(serde_json::json!({
        "/home/usr1/fs1": ["/usr/local/home/usr1/fs1_0", "/usr/local/home/usr1/fs1_1"],
        "/home/usr1/doc": "/usr/local/home/usr1/documents",
        "/home": "/srv/home"
    }))
    .unwrap()
}

#[test]
fn list_targets_fan_out_and_deepest_prefix_wins() {
    let paths = vec![
        "/home/usr1/fs1/file1.txt".to_string(),
        "/home/usr1/doc/document.pdf".to_string(),
        "/home/other/x".to_string(),
    ];

    let mapped = map_paths(&paths, &mapping()).unwrap();

    assert_eq!(
        mapped,
        vec![
            "/srv/home/other/x",
            "/usr/local/home/usr1/documents/document.pdf",
            "/usr/local/home/usr1/fs1_0/file1.txt",
            "/usr/local/home/usr1/fs1_1/file1.txt",
        ]
    );
}

#[test]
fn duplicates_collapse() {
    let paths = vec!["/home/a".to_string(), "/home/a".to_string()];
    assert_eq!(map_paths(&paths, &mapping()).unwrap(), vec!["/srv/home/a"]);
}

#[test]
fn unmapped_path_is_an_error() {
    let err = map_paths(&["/opt/x".to_string()], &mapping()).unwrap_err();
    assert!(matches!(err, PathMapError::NoMapping(p) if p == "/opt/x"));
}

#[test]
fn path_list_file_is_split_on_whitespace() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("paths.txt");
    std::fs::write(&file, "/home/a\n/home/b  /home/c\n\n").unwrap();
    assert_eq!(
        load_path_list(&file).unwrap(),
        vec!["/home/a", "/home/b", "/home/c"]
    );

    let empty = dir.path().join("empty.txt");
    std::fs::write(&empty, "\n  \n").unwrap();
    assert!(matches!(
        load_path_list(&empty),
        Err(PathMapError::EmptyFile(_))
    ));
}

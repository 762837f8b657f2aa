use dirscan::cli::SizeMode;
use dirscan::{CancelToken, ExtensionLabel, ScanConfig, ScanError, ScanReport, run_scan};
use indicatif::ProgressBar;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::Path;
use tempfile::TempDir;

fn scan(config: &ScanConfig) -> ScanReport {
    run_scan(config, &CancelToken::new(), &ProgressBar::hidden()).expect("Failed to scan directory")
}

fn ext_count(report: &ScanReport, label: &ExtensionLabel) -> u64 {
    report
        .extensions
        .iter()
        .find(|g| &g.extension == label)
        .map(|g| g.file_count)
        .unwrap_or(0)
}

fn suffix(ext: &str) -> ExtensionLabel {
    ExtensionLabel::Suffix(ext.to_string())
}

/// temp/
/// ├── docs/
/// │   ├── a.txt        (10 bytes)
/// │   └── b.txt        (20 bytes)
/// ├── src/
/// │   ├── nested/
/// │   │   └── lib.rs   (100 bytes)
/// │   └── main.rs      (50 bytes)
/// ├── README           (text, 12 bytes)
/// └── tool             (binary, 4 bytes)
fn build_tree(root: &Path) {
    let docs = root.join("docs");
    let nested = root.join("src").join("nested");
    fs::create_dir_all(&docs).expect("Failed to create docs");
    fs::create_dir_all(&nested).expect("Failed to create nested");

    fs::write(docs.join("a.txt"), "a".repeat(10)).expect("Failed to write a.txt");
    fs::write(docs.join("b.txt"), "b".repeat(20)).expect("Failed to write b.txt");
    fs::write(nested.join("lib.rs"), "c".repeat(100)).expect("Failed to write lib.rs");
    fs::write(root.join("src").join("main.rs"), "d".repeat(50)).expect("Failed to write main.rs");
    fs::write(root.join("README"), "hello world\n").expect("Failed to write README");
    fs::write(root.join("tool"), [0x7f, b'E', b'L', b'F']).expect("Failed to write tool");
}

#[test]
fn test_totals_match_groupings() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    build_tree(temp_dir.path());

    let report = scan(&ScanConfig::new(temp_dir.path()).with_workers(4));

    assert_eq!(report.totals.total_files, 6);
    // root, docs, src, src/nested
    assert_eq!(report.totals.total_directories, 4);
    assert_eq!(report.totals.total_capacity, 10 + 20 + 100 + 50 + 12 + 4);
    assert_eq!(report.totals.skipped_entries, 0);
    assert!(
        report.consistency_errors().is_empty(),
        "{:?}",
        report.consistency_errors()
    );

    assert_eq!(ext_count(&report, &suffix(".txt")), 2);
    assert_eq!(ext_count(&report, &suffix(".rs")), 2);
    assert_eq!(ext_count(&report, &ExtensionLabel::Text), 1);
    assert_eq!(ext_count(&report, &ExtensionLabel::Binary), 1);

    // Everything was created by the test user, so there is a single owner.
    assert_eq!(report.users.len(), 1);
    assert_eq!(report.users[0].file_count, 6);
}

#[test]
fn test_groups_sorted_by_descending_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    build_tree(temp_dir.path());

    let report = scan(&ScanConfig::new(temp_dir.path()));
    let sizes: Vec<u64> = report.extensions.iter().map(|g| g.total_size).collect();
    let mut sorted = sizes.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(sizes, sorted);
    assert_eq!(report.extensions[0].extension, suffix(".rs"));
}

#[test]
fn test_symlinks_are_not_counted() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    build_tree(root);

    symlink(root.join("docs"), root.join("docs-link")).expect("Failed to link dir");
    symlink(root.join("docs").join("a.txt"), root.join("a-link.txt"))
        .expect("Failed to link file");
    symlink(root.join("missing"), root.join("dangling")).expect("Failed to link dangling");
    // A cycle back to the root must not be followed.
    symlink(root, root.join("src").join("loop")).expect("Failed to link loop");

    let report = scan(&ScanConfig::new(root));
    assert_eq!(report.totals.total_files, 6);
    assert_eq!(report.totals.total_directories, 4);
    assert!(report.consistency_errors().is_empty());
}

#[test]
fn test_exclude_patterns_with_tempdir() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    // temp/
    // ├── node_modules/
    // │   └── package.json
    // ├── src/
    // │   └── main.rs
    // └── target/
    //     └── debug/
    //         └── app
    fs::create_dir_all(root.join("node_modules")).expect("Failed to create node_modules");
    fs::create_dir_all(root.join("src")).expect("Failed to create src");
    fs::create_dir_all(root.join("target").join("debug")).expect("Failed to create debug");
    fs::write(root.join("node_modules").join("package.json"), "{}").expect("Failed to write");
    fs::write(root.join("src").join("main.rs"), "fn main() {}").expect("Failed to write");
    fs::write(root.join("target").join("debug").join("app"), "binary").expect("Failed to write");

    let config = ScanConfig::new(root)
        .with_excludes(&["node_modules".to_string(), "target".to_string()])
        .expect("Failed to build exclude matcher");
    let report = scan(&config);

    assert_eq!(report.totals.total_files, 1);
    // root and src only
    assert_eq!(report.totals.total_directories, 2);
    assert_eq!(ext_count(&report, &suffix(".json")), 0);
    assert_eq!(ext_count(&report, &suffix(".rs")), 1);
}

#[test]
fn test_exclude_name_on_root_ancestor_is_ignored() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    // temp/build/project/src/main.rs, scanned from project/
    let root = temp_dir.path().join("build").join("project");
    fs::create_dir_all(root.join("src")).expect("Failed to create src");
    fs::write(root.join("src").join("main.rs"), "fn main() {}").expect("Failed to write");

    let config = ScanConfig::new(&root)
        .with_excludes(&["build".to_string()])
        .expect("Failed to build exclude matcher");
    let report = scan(&config);

    assert_eq!(report.totals.total_files, 1);
    assert_eq!(report.totals.total_directories, 2);
    assert_eq!(ext_count(&report, &suffix(".rs")), 1);
}

#[test]
fn test_skipped_prefix_contributes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    build_tree(root);

    let config = ScanConfig::new(root).with_skip_prefix(root.join("src"));
    let report = scan(&config);

    assert_eq!(report.totals.total_files, 4);
    assert_eq!(report.totals.total_directories, 2);
    assert_eq!(ext_count(&report, &suffix(".rs")), 0);
    assert_eq!(report.totals.total_capacity, 10 + 20 + 12 + 4);
}

#[test]
fn test_worker_count_does_not_change_results() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    let exts = ["rs", "txt", "md", "json", "log"];
    for d in 0..10 {
        let dir = root.join(format!("dir_{}", d));
        fs::create_dir_all(&dir).expect("Failed to create dir");
        for i in 0..50 {
            let ext = exts[(d + i) % exts.len()];
            fs::write(dir.join(format!("f_{}.{}", i, ext)), "x".repeat(i * 7 + d))
                .expect("Failed to write file");
        }
    }

    let single = scan(&ScanConfig::new(root).with_workers(1));
    let many = scan(&ScanConfig::new(root).with_workers(8));

    assert_eq!(single.totals.total_files, 500);
    assert_eq!(single.totals.total_files, many.totals.total_files);
    assert_eq!(single.totals.total_capacity, many.totals.total_capacity);
    assert_eq!(single.totals.total_directories, many.totals.total_directories);
    assert_eq!(single.extensions, many.extensions);
    assert_eq!(single.users, many.users);
    assert!(many.consistency_errors().is_empty());
}

#[test]
fn test_empty_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report = scan(&ScanConfig::new(temp_dir.path()));

    assert_eq!(report.totals.total_files, 0);
    assert_eq!(report.totals.total_directories, 1);
    assert_eq!(report.totals.total_capacity, 0);
    assert!(report.extensions.is_empty());
    assert!(report.users.is_empty());
}

#[test]
fn test_allocated_size_mode_counts_blocks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("small.txt"), "x").expect("Failed to write");

    let report = scan(&ScanConfig::new(temp_dir.path()).with_size_mode(SizeMode::Allocated));
    assert_eq!(report.totals.total_files, 1);
    assert_eq!(report.totals.total_capacity % 512, 0);
}

#[test]
fn test_missing_root_fails_before_traversal() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = ScanConfig::new(temp_dir.path().join("nope"));
    let result = run_scan(&config, &CancelToken::new(), &ProgressBar::hidden());
    assert!(matches!(result, Err(ScanError::RootInaccessible { .. })));
}

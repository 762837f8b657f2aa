use dirscan::utils::{
    average_file_size, average_size, build_exclude_matcher, expand_exclude_patterns,
    human_readable_size,
};

#[test]
fn test_human_readable_size_contract() {
    assert_eq!(human_readable_size(0), "0 B");
    assert_eq!(human_readable_size(1023), "1023 B");
    assert_eq!(human_readable_size(1024), "1.0 KiB");
    assert_eq!(human_readable_size(1_048_576), "1.0 MiB");
    assert_eq!(human_readable_size(1536), "1.5 KiB");
}

#[test]
fn test_human_readable_size_large_units() {
    assert_eq!(human_readable_size(1u64 << 40), "1.0 TiB");
    assert_eq!(human_readable_size(1u64 << 50), "1.0 PiB");
    assert_eq!(human_readable_size(1u64 << 60), "1.0 EiB");
}

#[test]
fn test_average_size_never_divides_by_zero() {
    assert_eq!(average_size(123, 0), 0.0);
    assert!(average_size(123, 0).is_finite());
    assert_eq!(average_file_size(0, 0), "0 B");
}

#[test]
fn test_average_file_size_truncates_to_bytes() {
    // 1000 / 3 = 333.33 -> 333 B
    assert_eq!(average_file_size(1000, 3), "333 B");
}

#[test]
fn test_expand_exclude_patterns() {
    let patterns = vec![
        "node_modules".to_string(),
        "*.log".to_string(),
        "temp/".to_string(),
    ];

    let expanded = expand_exclude_patterns(&patterns);

    // Should expand "node_modules" to multiple patterns
    assert!(expanded.contains(&"**/node_modules".to_string()));
    assert!(expanded.contains(&"**/node_modules/**".to_string()));

    // Should keep "*.log" as-is (contains glob)
    assert!(expanded.contains(&"*.log".to_string()));

    // Should keep "temp/" as-is (ends with slash)
    assert!(expanded.contains(&"temp/".to_string()));
}

#[test]
fn test_build_exclude_matcher() {
    let patterns = vec!["*.log".to_string(), "**/node_modules/**".to_string()];

    let matcher = build_exclude_matcher(&patterns).expect("valid patterns");
    assert!(matcher.is_match("debug.log"));
    assert!(matcher.is_match("project/node_modules/package.json"));
    assert!(!matcher.is_match("src/main.rs"));
}

#[test]
fn test_build_exclude_matcher_invalid_pattern() {
    let patterns = vec![
        "[invalid".to_string(), // Invalid glob pattern
    ];

    assert!(build_exclude_matcher(&patterns).is_err());
}

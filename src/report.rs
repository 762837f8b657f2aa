//! Final scan results, ready for rendering.
//!
//! [`ScanReport`] is built once all workers have finished. It owns both
//! groupings sorted by descending size (ties by ascending key, so output is
//! deterministic) together with the [`RunTotals`].

use crate::aggregate::{CounterSnapshot, ExtensionGroup, ExtensionShare, UserGroup, UserShare};
use crate::utils::average_size;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::cmp::Ordering;
use std::path::PathBuf;
use std::time::Duration;

/// Scan-wide totals, independent of either grouping.
#[derive(Debug, Clone, Serialize)]
pub struct RunTotals {
    pub root: PathBuf,
    pub total_files: u64,
    pub total_directories: u64,
    pub total_capacity: u64,
    /// Entries that could not be read and were left out
    pub skipped_entries: u64,
    pub workers: usize,
    pub started_at: DateTime<Local>,
    #[serde(serialize_with = "serialize_millis", rename = "elapsed_ms")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u128(d.as_millis())
}

impl RunTotals {
    /// Files observed per second of wall-clock time.
    pub fn files_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_files as f64 / secs
        } else {
            0.0
        }
    }
}

/// The complete result of one scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub totals: RunTotals,
    pub extensions: Vec<ExtensionGroup>,
    pub users: Vec<UserGroup>,
}

impl ExtensionGroup {
    pub fn average_size(&self) -> f64 {
        average_size(self.total_size, self.file_count)
    }
}

impl UserGroup {
    pub fn average_size(&self) -> f64 {
        average_size(self.total_size, self.file_count)
    }
}

impl UserShare {
    pub fn average_size(&self) -> f64 {
        average_size(self.size, self.count)
    }
}

impl ExtensionShare {
    pub fn average_size(&self) -> f64 {
        average_size(self.size, self.count)
    }
}

/// Descending by size, then ascending by key.
fn by_size_desc(a_size: u64, a_key: &str, b_size: u64, b_key: &str) -> Ordering {
    b_size.cmp(&a_size).then_with(|| a_key.cmp(b_key))
}

/// Sorts extension groups and their per-user shares.
pub fn sort_extension_groups(groups: &mut [ExtensionGroup]) {
    groups.sort_by(|a, b| {
        by_size_desc(a.total_size, a.extension.as_str(), b.total_size, b.extension.as_str())
    });
    for group in groups.iter_mut() {
        group
            .users
            .sort_by(|a, b| by_size_desc(a.size, &a.user, b.size, &b.user));
    }
}

/// Sorts user groups and their per-extension shares.
pub fn sort_user_groups(groups: &mut [UserGroup]) {
    groups.sort_by(|a, b| by_size_desc(a.total_size, &a.user, b.total_size, &b.user));
    for group in groups.iter_mut() {
        group.extensions.sort_by(|a, b| {
            by_size_desc(a.size, a.extension.as_str(), b.size, b.extension.as_str())
        });
    }
}

impl ScanReport {
    /// Assembles a report from the aggregator's output.
    pub fn new(
        root: PathBuf,
        workers: usize,
        mut extensions: Vec<ExtensionGroup>,
        mut users: Vec<UserGroup>,
        counters: CounterSnapshot,
        started_at: DateTime<Local>,
        elapsed: Duration,
    ) -> Self {
        sort_extension_groups(&mut extensions);
        sort_user_groups(&mut users);

        Self {
            totals: RunTotals {
                root,
                total_files: counters.files,
                total_directories: counters.directories,
                total_capacity: counters.bytes,
                skipped_entries: counters.skipped,
                workers,
                started_at,
                elapsed,
            },
            extensions,
            users,
        }
    }

    /// Lists every way the groupings disagree with each other or with the
    /// run totals. Empty for a consistent report.
    pub fn consistency_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let totals = &self.totals;

        let ext_files: u64 = self.extensions.iter().map(|g| g.file_count).sum();
        let ext_bytes: u64 = self.extensions.iter().map(|g| g.total_size).sum();
        let user_files: u64 = self.users.iter().map(|g| g.file_count).sum();
        let user_bytes: u64 = self.users.iter().map(|g| g.total_size).sum();

        if ext_files != totals.total_files || ext_bytes != totals.total_capacity {
            errors.push(format!(
                "extension groups hold {} files / {} bytes, totals say {} / {}",
                ext_files, ext_bytes, totals.total_files, totals.total_capacity
            ));
        }
        if user_files != totals.total_files || user_bytes != totals.total_capacity {
            errors.push(format!(
                "user groups hold {} files / {} bytes, totals say {} / {}",
                user_files, user_bytes, totals.total_files, totals.total_capacity
            ));
        }

        for group in &self.extensions {
            for share in &group.users {
                let mirror = self
                    .users
                    .iter()
                    .find(|u| u.user == share.user)
                    .and_then(|u| u.extensions.iter().find(|e| e.extension == group.extension));
                match mirror {
                    Some(m) if m.size == share.size && m.count == share.count => {}
                    Some(m) => errors.push(format!(
                        "({}, {}): extension side {}/{} vs user side {}/{}",
                        group.extension, share.user, share.count, share.size, m.count, m.size
                    )),
                    None => errors.push(format!(
                        "({}, {}) missing from user grouping",
                        group.extension, share.user
                    )),
                }
            }
        }

        let ext_pairs: usize = self.extensions.iter().map(|g| g.users.len()).sum();
        let user_pairs: usize = self.users.iter().map(|g| g.extensions.len()).sum();
        if ext_pairs != user_pairs {
            errors.push(format!(
                "{} (extension, user) pairs on the extension side, {} on the user side",
                ext_pairs, user_pairs
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ExtensionLabel;

    fn ext_group(ext: &str, size: u64, count: u64, users: Vec<UserShare>) -> ExtensionGroup {
        ExtensionGroup {
            extension: ExtensionLabel::Suffix(ext.to_string()),
            total_size: size,
            file_count: count,
            users,
        }
    }

    #[test]
    fn test_extension_groups_sorted_descending_with_key_tiebreak() {
        let mut groups = vec![
            ext_group(".b", 10, 1, vec![]),
            ext_group(".a", 10, 1, vec![]),
            ext_group(".c", 99, 1, vec![]),
        ];
        sort_extension_groups(&mut groups);
        let order: Vec<_> = groups.iter().map(|g| g.extension.as_str()).collect();
        assert_eq!(order, vec![".c", ".a", ".b"]);
    }

    #[test]
    fn test_nested_shares_sorted() {
        let mut groups = vec![ext_group(
            ".rs",
            30,
            3,
            vec![
                UserShare {
                    user: "small".into(),
                    size: 5,
                    count: 1,
                },
                UserShare {
                    user: "big".into(),
                    size: 25,
                    count: 2,
                },
            ],
        )];
        sort_extension_groups(&mut groups);
        assert_eq!(groups[0].users[0].user, "big");
    }

    #[test]
    fn test_average_size_guards_empty_group() {
        let group = UserGroup {
            user: "nobody".into(),
            total_size: 0,
            file_count: 0,
            extensions: vec![],
        };
        assert_eq!(group.average_size(), 0.0);
    }

    #[test]
    fn test_files_per_second_with_zero_elapsed() {
        let report = ScanReport::new(
            PathBuf::from("/"),
            1,
            vec![],
            vec![],
            CounterSnapshot::default(),
            Local::now(),
            Duration::ZERO,
        );
        assert_eq!(report.totals.files_per_second(), 0.0);
        assert!(report.consistency_errors().is_empty());
    }

    #[test]
    fn test_consistency_detects_mismatch() {
        let report = ScanReport::new(
            PathBuf::from("/"),
            1,
            vec![ext_group(
                ".rs",
                10,
                1,
                vec![UserShare {
                    user: "alice".into(),
                    size: 10,
                    count: 1,
                }],
            )],
            vec![],
            CounterSnapshot {
                files: 1,
                bytes: 10,
                ..Default::default()
            },
            Local::now(),
            Duration::from_secs(1),
        );
        let errors = report.consistency_errors();
        assert!(!errors.is_empty());
    }
}

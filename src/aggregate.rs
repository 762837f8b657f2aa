//! Folding file observations into the two groupings.
//!
//! Every [`FileObservation`] updates one group in each view:
//! - by extension: the group for its label, and inside it the owner's share
//! - by user: the group for its owner, and inside it the label's share
//!
//! Both updates for one observation happen under a single lock, so the
//! per-(extension, user) tallies on either side always agree. Updates are
//! plain additions, so the final state does not depend on the order in
//! which workers deliver observations.

use crate::data::{ExtensionLabel, FileObservation};
use fnv::FnvHashMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running size and file count for one group or breakdown entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub size: u64,
    pub count: u64,
}

impl Tally {
    #[inline]
    fn add(&mut self, size: u64) {
        self.size += size;
        self.count += 1;
    }
}

/// One group plus its breakdown by the other view's key.
#[derive(Debug)]
struct Accumulator<K> {
    total: Tally,
    breakdown: FnvHashMap<K, Tally>,
}

impl<K> Default for Accumulator<K> {
    fn default() -> Self {
        Self {
            total: Tally::default(),
            breakdown: FnvHashMap::default(),
        }
    }
}

#[derive(Debug, Default)]
struct Groupings {
    by_extension: FnvHashMap<ExtensionLabel, Accumulator<String>>,
    by_user: FnvHashMap<String, Accumulator<ExtensionLabel>>,
}

/// Scan-wide counters, readable while the scan is running.
#[derive(Debug, Default)]
pub struct ScanCounters {
    files: AtomicU64,
    directories: AtomicU64,
    bytes: AtomicU64,
    skipped: AtomicU64,
}

/// Point-in-time copy of [`ScanCounters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub files: u64,
    pub directories: u64,
    pub bytes: u64,
    pub skipped: u64,
}

impl ScanCounters {
    pub fn add_directory(&self) {
        self.directories.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an entry that could not be read and was left out.
    pub fn add_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            files: self.files.load(Ordering::Relaxed),
            directories: self.directories.load(Ordering::Relaxed),
            bytes: self.bytes.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

/// An owner's share of an extension group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserShare {
    pub user: String,
    pub size: u64,
    pub count: u64,
}

/// An extension's share of a user group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionShare {
    pub extension: ExtensionLabel,
    pub size: u64,
    pub count: u64,
}

/// All files carrying one extension label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionGroup {
    pub extension: ExtensionLabel,
    pub total_size: u64,
    pub file_count: u64,
    pub users: Vec<UserShare>,
}

/// All files owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserGroup {
    pub user: String,
    pub total_size: u64,
    pub file_count: u64,
    pub extensions: Vec<ExtensionShare>,
}

/// Per-scan aggregation context shared by all workers.
///
/// Create one per scan, hand `&Aggregator` to the workers, and call
/// [`Aggregator::into_groups`] once they have all finished.
#[derive(Debug, Default)]
pub struct Aggregator {
    groups: Mutex<Groupings>,
    counters: ScanCounters,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live counters for progress display.
    pub fn counters(&self) -> &ScanCounters {
        &self.counters
    }

    /// Folds one observation into both groupings.
    pub fn record(&self, observation: FileObservation) {
        let FileObservation {
            size, owner, label, ..
        } = observation;

        let mut groups = self.groups.lock();

        let by_ext = groups.by_extension.entry(label.clone()).or_default();
        by_ext.total.add(size);
        match by_ext.breakdown.get_mut(owner.as_str()) {
            Some(share) => share.add(size),
            None => {
                let mut share = Tally::default();
                share.add(size);
                by_ext.breakdown.insert(owner.clone(), share);
            }
        }

        let by_user = groups.by_user.entry(owner).or_default();
        by_user.total.add(size);
        by_user.breakdown.entry(label).or_default().add(size);

        self.counters.files.fetch_add(1, Ordering::Relaxed);
        self.counters.bytes.fetch_add(size, Ordering::Relaxed);
    }

    /// Consumes the aggregator and returns both groupings, unsorted, with the
    /// final counter values.
    pub fn into_groups(self) -> (Vec<ExtensionGroup>, Vec<UserGroup>, CounterSnapshot) {
        let counters = self.counters.snapshot();
        let groups = self.groups.into_inner();

        let extensions = groups
            .by_extension
            .into_iter()
            .map(|(extension, acc)| ExtensionGroup {
                extension,
                total_size: acc.total.size,
                file_count: acc.total.count,
                users: acc
                    .breakdown
                    .into_iter()
                    .map(|(user, t)| UserShare {
                        user,
                        size: t.size,
                        count: t.count,
                    })
                    .collect(),
            })
            .collect();

        let users = groups
            .by_user
            .into_iter()
            .map(|(user, acc)| UserGroup {
                user,
                total_size: acc.total.size,
                file_count: acc.total.count,
                extensions: acc
                    .breakdown
                    .into_iter()
                    .map(|(extension, t)| ExtensionShare {
                        extension,
                        size: t.size,
                        count: t.count,
                    })
                    .collect(),
            })
            .collect();

        (extensions, users, counters)
    }
}

//! Per-run counts of each document kind.

use std::ops::AddAssign;

use crate::common::detection::DocumentKind;

/// Number of files classified as each [`DocumentKind`].
///
/// Built by folding kinds in one at a time; per-worker values are combined
/// with [`RunStatistics::merge`]. The sum of all counts always equals the
/// number of recorded files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    counts: [u64; DocumentKind::COUNT],
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: DocumentKind) {
        self.counts[kind.index()] += 1;
    }

    pub fn get(&self, kind: DocumentKind) -> u64 {
        self.counts[kind.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn merge(mut self, other: RunStatistics) -> Self {
        self += other;
        self
    }

    /// Every kind with its count, zero counts included, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (DocumentKind, u64)> + '_ {
        DocumentKind::ALL
            .iter()
            .map(move |&kind| (kind, self.get(kind)))
    }
}

impl AddAssign for RunStatistics {
    fn add_assign(&mut self, other: Self) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
            *mine += theirs;
        }
    }
}

impl Extend<DocumentKind> for RunStatistics {
    fn extend<I: IntoIterator<Item = DocumentKind>>(&mut self, iter: I) {
        for kind in iter {
            self.record(kind);
        }
    }
}

impl FromIterator<DocumentKind> for RunStatistics {
    fn from_iter<I: IntoIterator<Item = DocumentKind>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

//! Deduplicated, ordered release catalog

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::debug;

use crate::version::types::Release;

/// Direction the catalog is sorted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first, used for listing from a floor
    Ascending,
    /// Newest first, used for latest lookup and resolution
    Descending,
}

/// Releases with unique canonical versions, sorted by version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    releases: Vec<Release>,
}

impl Catalog {
    /// Build a catalog from fetched releases.
    ///
    /// Releases are keyed by the rendered canonical version, so `go1.21` and
    /// `go1.21.0` collapse into one entry. The first spelling seen is kept.
    pub fn build(releases: impl IntoIterator<Item = Release>, order: SortOrder) -> Self {
        let mut unique: IndexMap<String, Release> = IndexMap::new();
        for release in releases {
            match unique.entry(release.version.to_string()) {
                Entry::Occupied(entry) => {
                    debug!(
                        "Dropping duplicate release '{}' of '{}'",
                        release.display,
                        entry.get().display
                    );
                }
                Entry::Vacant(entry) => {
                    entry.insert(release);
                }
            }
        }

        let mut releases: Vec<Release> = unique.into_values().collect();
        match order {
            SortOrder::Ascending => releases.sort_by(|a, b| a.version.cmp(&b.version)),
            SortOrder::Descending => releases.sort_by(|a, b| b.version.cmp(&a.version)),
        }

        Self { releases }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Release> {
        self.releases.iter()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// First release marked stable, in catalog order
    pub fn first_stable(&self) -> Option<&Release> {
        self.releases.iter().find(|r| r.stable)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Release;
    type IntoIter = std::slice::Iter<'a, Release>;

    fn into_iter(self) -> Self::IntoIter {
        self.releases.iter()
    }
}

use std::time::Duration;

use indexmap::IndexMap;

use crate::resource::{Location, Resource};

/// The immutable, deduplicated, order-preserving set of resources found under
/// a builder's roots.
///
/// Order is root order, then scan order within each root. When two candidates
/// share a name the first one wins. Nothing in the public API mutates an index
/// once it is built, so it can be shared across threads without locking.
#[derive(Debug, Clone)]
pub struct ResourceIndex {
    resources: IndexMap<String, Location>,
    stats:     IndexStats,
}

impl ResourceIndex {
    pub(crate) fn new(resources: IndexMap<String, Location>, stats: IndexStats) -> Self {
        Self { resources, stats }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// `(name, location)` pairs in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Location)> + '_ {
        self.resources.iter().map(|(name, location)| (name.as_str(), location))
    }

    /// Resource names in index order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.resources.keys().map(String::as_str)
    }

    /// Owned copies of every resource, in index order.
    pub fn to_resources(&self) -> Vec<Resource> {
        self.iter()
            .map(|(name, location)| Resource::new(name, location.clone()))
            .collect()
    }

    /// Exact lookup by name.
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.resources.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }

    /// Figures recorded while the index was assembled.
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub(crate) fn raw_iter(&self) -> indexmap::map::Iter<'_, String, Location> {
        self.resources.iter()
    }
}

/// What happened while an index was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of roots scanned.
    pub roots: usize,

    /// Candidates yielded by the scanner, resolvable or not.
    pub candidates: usize,

    /// Candidates dropped because their location could not be resolved.
    pub dropped: usize,

    /// Candidates dropped because an earlier one had the same name.
    pub duplicates: usize,

    /// Resources kept in the index.
    pub resources: usize,

    /// Wall-clock time spent scanning.
    pub duration: Duration,
}

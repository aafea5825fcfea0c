use std::iter::FusedIterator;
use std::sync::Arc;

use crate::error::ReslocError;
use crate::glob::Glob;
use crate::index::ResourceIndex;
use crate::resource::Location;
use crate::traits::{Loader, NameMatcher};

/// Read-only query façade over a built [`ResourceIndex`].
///
/// Cloning is cheap and shares the index. Every query is a fresh, lazy pass
/// over the index in order; nothing is cached between queries.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    index: Arc<ResourceIndex>,
}

impl ResourceLocator {
    pub(crate) fn new(index: ResourceIndex) -> Self {
        Self {
            index: Arc::new(index),
        }
    }

    /// The underlying index.
    pub fn resources(&self) -> &ResourceIndex {
        &self.index
    }

    /// Exact lookup by name.
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.index.get(name)
    }

    /// Locations of every resource whose name matches the glob `pattern`.
    ///
    /// # Errors
    ///
    /// [`ReslocError::Pattern`] if `pattern` does not compile.
    pub fn locate(&self, pattern: &str) -> Result<Locate<'_, Glob>, ReslocError> {
        let glob = Glob::new(pattern)?;
        Ok(self.locate_matching(glob))
    }

    /// Locations of every resource whose name `matcher` accepts.
    pub fn locate_matching<M: NameMatcher>(&self, matcher: M) -> Locate<'_, M> {
        Locate {
            resources: self.index.raw_iter(),
            matcher,
        }
    }

    /// Resources matching the glob `pattern`, decoded by `loader` one at a
    /// time as the iterator is advanced.
    ///
    /// # Errors
    ///
    /// [`ReslocError::Pattern`] if `pattern` does not compile. Load failures
    /// surface later, as items of the returned iterator.
    pub fn fetch<L: Loader>(&self, pattern: &str, loader: L) -> Result<Fetch<'_, Glob, L>, ReslocError> {
        Ok(Fetch::new(self.locate(pattern)?, loader))
    }

    /// Resources accepted by `matcher`, decoded by `loader` on demand.
    pub fn fetch_matching<M: NameMatcher, L: Loader>(&self, matcher: M, loader: L) -> Fetch<'_, M, L> {
        Fetch::new(self.locate_matching(matcher), loader)
    }
}

// ---------------------------------------------------------------------------
// Locate
// ---------------------------------------------------------------------------

/// Lazy iterator over matching locations, in index order.
pub struct Locate<'a, M> {
    resources: indexmap::map::Iter<'a, String, Location>,
    matcher:   M,
}

impl<'a, M: NameMatcher> Locate<'a, M> {
    /// Yield `(name, location)` pairs instead of bare locations.
    pub fn with_names(self) -> impl Iterator<Item = (&'a str, &'a Location)> {
        let Locate { resources, matcher } = self;
        resources
            .filter(move |(name, _)| matcher.is_match(name))
            .map(|(name, location)| (name.as_str(), location))
    }
}

impl<'a, M: NameMatcher> Iterator for Locate<'a, M> {
    type Item = &'a Location;

    fn next(&mut self) -> Option<Self::Item> {
        let matcher = &self.matcher;
        self.resources
            .find(|(name, _)| matcher.is_match(name))
            .map(|(_, location)| location)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.resources.size_hint().1)
    }
}

impl<M: NameMatcher> FusedIterator for Locate<'_, M> {}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Lazy iterator of loaded resources.
///
/// Each matching resource is opened and handed to the loader only when the
/// iterator is advanced, so stopping early skips the remaining loads. The
/// first load failure is yielded as [`ReslocError::Load`] carrying the
/// location and the original cause; the iterator ends after it.
pub struct Fetch<'a, M, L> {
    locate: Locate<'a, M>,
    loader: L,
    failed: bool,
}

impl<'a, M, L> Fetch<'a, M, L> {
    fn new(locate: Locate<'a, M>, loader: L) -> Self {
        Self {
            locate,
            loader,
            failed: false,
        }
    }
}

impl<M: NameMatcher, L: Loader> Iterator for Fetch<'_, M, L> {
    type Item = Result<L::Output, ReslocError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let location = self.locate.next()?;
        let loaded = location
            .open()
            .and_then(|mut reader| self.loader.load(&mut reader));

        match loaded {
            Ok(value) => Some(Ok(value)),
            Err(source) => {
                self.failed = true;
                Some(Err(ReslocError::Load {
                    location: location.clone(),
                    source,
                }))
            }
        }
    }
}

impl<M: NameMatcher, L: Loader> FusedIterator for Fetch<'_, M, L> {}

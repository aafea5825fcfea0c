use std::io::{self, Read};

use crate::error::ReslocError;
use crate::resource::Resource;
use crate::root::Root;
use crate::scanner::ScanConfig;

/// Candidates produced by a [`Scanner`] for one root.
pub type Candidates<'a> = Box<dyn Iterator<Item = Result<Resource, ReslocError>> + 'a>;

/// Enumerates the resources reachable from a root.
///
/// Implement this to feed the index from anything other than the default
/// [`FsScanner`](crate::FsScanner): a virtual filesystem, a package store,
/// an in-memory fixture.
///
/// # Object Safety
///
/// `Scanner` is object-safe. The builder stores it as `Box<dyn Scanner>`, so
/// `scan()` returns a boxed iterator rather than `impl Iterator`.
///
/// # Contract
///
/// - Ordering must be deterministic for a fixed root.
/// - Duplicate names are fine; the index keeps the first one.
/// - Return `Err` from `scan()` itself when the root cannot be opened at all.
///   This fails the whole build.
/// - Yield `Err` items for candidates whose location cannot be resolved.
///   These are dropped silently.
/// - Any handle opened for the root should be owned by the returned iterator
///   so it is released once the iterator is dropped.
///
/// # Example
///
/// ```rust
/// use resloc::{Candidates, Location, Resource, Root, ScanConfig, Scanner, ReslocError};
///
/// struct Fixed(Vec<(&'static str, &'static str)>);
///
/// impl Scanner for Fixed {
///     fn scan<'a>(&'a self, _root: &'a Root, _config: &ScanConfig) -> Result<Candidates<'a>, ReslocError> {
///         let resources = self.0.iter().map(|(name, file)| -> Result<Resource, ReslocError> {
///             Ok(Resource::new(*name, Location::File((*file).into())))
///         });
///         Ok(Box::new(resources))
///     }
/// }
/// ```
pub trait Scanner: Send + Sync {
    /// Enumerate candidate resources under `root`.
    fn scan<'a>(&'a self, root: &'a Root, config: &ScanConfig) -> Result<Candidates<'a>, ReslocError>;
}

/// Decides whether a resource name is wanted.
///
/// [`Glob`](crate::Glob) implements this, and so does any
/// `Fn(&str) -> bool + Send + Sync` closure, which lets callers match with
/// strategies outside the glob grammar.
///
/// # Example
///
/// ```rust
/// use resloc::NameMatcher;
///
/// struct Suffix(&'static str);
///
/// impl NameMatcher for Suffix {
///     fn is_match(&self, name: &str) -> bool {
///         name.ends_with(self.0)
///     }
/// }
///
/// assert!(Suffix(".md").is_match("docs/readme.md"));
/// assert!((|name: &str| name.starts_with("docs/")).is_match("docs/readme.md"));
/// ```
pub trait NameMatcher: Send + Sync {
    /// Returns `true` if a resource called `name` should be included.
    fn is_match(&self, name: &str) -> bool;
}

impl<F> NameMatcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_match(&self, name: &str) -> bool {
        self(name)
    }
}

/// Decodes a resource's bytes into a typed value.
///
/// Failures are plain [`io::Error`]s; the locator wraps them with the
/// location they came from.
pub trait Loader {
    type Output;

    /// Decode one resource from `source`.
    fn load(&self, source: &mut dyn Read) -> io::Result<Self::Output>;
}

impl<F, T> Loader for F
where
    F: Fn(&mut dyn Read) -> io::Result<T>,
{
    type Output = T;

    fn load(&self, source: &mut dyn Read) -> io::Result<T> {
        self(source)
    }
}

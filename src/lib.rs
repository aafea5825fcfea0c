//! # resloc
//!
//! Glob-driven resource locator over directory and archive roots.
//!
//! resloc indexes every resource reachable from a set of roots once, then
//! answers glob queries against resource names lazily. It owns the glob
//! compiler, the index, the query surface and the collaborator contracts
//! ([`Scanner`], [`NameMatcher`], [`Loader`]). How roots are enumerated and
//! how bytes are decoded are pluggable.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use resloc::PropertiesLoader;
//!
//! let mut builder = resloc::locator();
//! builder.add_directory("resources")?;
//! let locator = builder.build()?;
//!
//! for location in locator.locate("books/*.properties")? {
//!     println!("found {location}");
//! }
//!
//! for book in locator.fetch("books/*.properties", PropertiesLoader)? {
//!     println!("{:?}", book?.get("title"));
//! }
//! # Ok::<(), resloc::ReslocError>(())
//! ```
//!
//! # Glob Syntax
//!
//! | Pattern   | Matches                                      |
//! |-----------|----------------------------------------------|
//! | `?`       | one character, never `/`                     |
//! | `*`       | any run of characters within one segment     |
//! | `**`      | any run of characters across segments        |
//! | `{a,b}`   | one of the literal alternatives              |
//! | `\c`      | `c` literally                                |
//!
//! Matching is anchored: the whole name must match.
//!
//! ```rust
//! let glob = resloc::compile("a/*.txt").unwrap();
//! assert!(glob.is_match("a/b.txt"));
//! assert!(!glob.is_match("a/b/c.txt"));
//!
//! let deep = resloc::compile("a/**.txt").unwrap();
//! assert!(deep.is_match("a/b/c.txt"));
//! ```
//!
//! # Custom Matching
//!
//! Anything implementing [`NameMatcher`], closures included, can stand in for
//! a glob:
//!
//! ```rust,no_run
//! # let locator = resloc::locator().add_directory(".")?.build()?;
//! let markdown: Vec<_> = locator
//!     .locate_matching(|name: &str| name.ends_with(".md"))
//!     .collect();
//! # Ok::<(), resloc::ReslocError>(())
//! ```

#![forbid(unsafe_code)]

mod builder;
mod engine;
mod error;
mod glob;
mod index;
mod loader;
mod locator;
mod resource;
mod root;
mod scanner;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::LocatorBuilder;
pub use error::ReslocError;
pub use glob::{compile, glob_to_regex, Glob, PatternError, PatternErrorKind};
pub use index::{IndexStats, ResourceIndex};
pub use loader::{BytesLoader, Properties, PropertiesLoader, StringLoader};
pub use locator::{Fetch, Locate, ResourceLocator};
pub use resource::{Location, Resource};
pub use root::{Root, RootKind};
pub use scanner::{FsScanner, ScanConfig};
pub use traits::{Candidates, Loader, NameMatcher, Scanner};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`LocatorBuilder`] with the default filesystem scanner.
///
/// # Example
///
/// ```rust
/// let dir = std::env::temp_dir();
///
/// let mut builder = resloc::locator();
/// builder.add_directory(&dir).unwrap().max_depth(Some(1));
/// assert_eq!(builder.roots().len(), 1);
///
/// assert!(matches!(resloc::locator().build(), Err(resloc::ReslocError::NoSource)));
/// ```
pub fn locator() -> LocatorBuilder {
    LocatorBuilder::default()
}

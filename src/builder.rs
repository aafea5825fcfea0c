use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use tracing::debug;

use crate::engine::assemble;
use crate::error::ReslocError;
use crate::locator::ResourceLocator;
use crate::root::Root;
use crate::scanner::{FsScanner, ScanConfig};
use crate::traits::Scanner;

// ---------------------------------------------------------------------------
// LocatorBuilder
// ---------------------------------------------------------------------------

/// Accumulates roots, then builds a [`ResourceLocator`].
///
/// Created via [`resloc::locator()`](crate::locator). Roots are validated as
/// they are added; a rejected root leaves the builder untouched and usable.
/// Adding the same root twice is a no-op.
///
/// # Example
///
/// ```rust,no_run
/// let mut builder = resloc::locator();
/// builder
///     .add_directory("assets")?
///     .add_archive("plugins/books.jar")?
///     .max_depth(Some(8));
///
/// let locator = builder.build()?;
/// for location in locator.locate("books/*.properties")? {
///     println!("{location}");
/// }
/// # Ok::<(), resloc::ReslocError>(())
/// ```
pub struct LocatorBuilder {
    roots:   IndexSet<Root>,
    scanner: Box<dyn Scanner>,
    config:  ScanConfig,
}

impl Default for LocatorBuilder {
    fn default() -> Self {
        Self {
            roots:   IndexSet::new(),
            scanner: Box::new(FsScanner),
            config:  ScanConfig::default(),
        }
    }
}

impl LocatorBuilder {
    // ── Roots ─────────────────────────────────────────────────────────────

    /// Add an already validated root.
    pub fn add_root(&mut self, root: Root) -> &mut Self {
        if self.roots.insert(root) {
            if let Some(root) = self.roots.last() {
                debug!(root = %root.path().display(), kind = ?root.kind(), "root added");
            }
        }
        self
    }

    /// Add a directory root.
    ///
    /// # Errors
    ///
    /// [`ReslocError::InvalidRoot`] if `path` is not an existing directory.
    pub fn add_directory(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, ReslocError> {
        let root = Root::directory(path)?;
        Ok(self.add_root(root))
    }

    /// Add a zip archive root (`.zip`, `.jar`, ...).
    ///
    /// # Errors
    ///
    /// [`ReslocError::InvalidRoot`] if `path` is not a readable, well-formed
    /// archive.
    pub fn add_archive(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, ReslocError> {
        let root = Root::archive(path)?;
        Ok(self.add_root(root))
    }

    /// Add every usable entry of an OS search-path string (`PATH` syntax).
    ///
    /// Directories become directory roots, anything else is tried as an
    /// archive. Unusable entries are skipped.
    ///
    /// # Errors
    ///
    /// [`ReslocError::InvalidRoot`] if no entry at all was usable. Nothing is
    /// added in that case.
    pub fn add_search_path(&mut self, value: impl AsRef<OsStr>) -> Result<&mut Self, ReslocError> {
        let value = value.as_ref();

        let usable: Vec<Root> = std::env::split_paths(value)
            .filter(|path| !path.as_os_str().is_empty())
            .filter_map(|path| {
                let root = if path.is_dir() {
                    Root::directory(&path)
                } else {
                    Root::archive(&path)
                };
                root.map_err(|err| debug!(error = %err, "skipping search path entry"))
                    .ok()
            })
            .collect();

        if usable.is_empty() {
            return Err(ReslocError::InvalidRoot {
                path:   PathBuf::from(value),
                reason: "no usable entry in search path".into(),
            });
        }

        for root in usable {
            self.add_root(root);
        }
        Ok(self)
    }

    /// Roots added so far, in insertion order.
    pub fn roots(&self) -> impl ExactSizeIterator<Item = &Root> + '_ {
        self.roots.iter()
    }

    // ── Scanner ───────────────────────────────────────────────────────────

    /// Replace the default [`FsScanner`].
    pub fn scanner(&mut self, s: impl Scanner + 'static) -> &mut Self {
        self.scanner = Box::new(s);
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Follow symbolic links inside directory roots. Off by default.
    pub fn follow_links(&mut self, yes: bool) -> &mut Self {
        self.config.follow_links = yes;
        self
    }

    /// Maximum directory depth. `Some(1)` means files directly under the
    /// root only. Unlimited by default.
    pub fn max_depth(&mut self, depth: Option<usize>) -> &mut Self {
        self.config.max_depth = depth;
        self
    }

    /// Index dot-files and dot-directories. On by default.
    pub fn include_hidden(&mut self, yes: bool) -> &mut Self {
        self.config.include_hidden = yes;
        self
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Scan the roots and return a locator over the resulting index.
    ///
    /// Every call rescans and returns an independent locator.
    ///
    /// # Errors
    ///
    /// [`ReslocError::NoSource`] when no root was added, or whatever the
    /// scanner reports for a root it cannot open. Individual unresolvable
    /// resources are not errors; they are left out of the index.
    pub fn build(&self) -> Result<ResourceLocator, ReslocError> {
        if self.roots.is_empty() {
            return Err(ReslocError::NoSource);
        }

        let index = assemble(&self.roots, self.scanner.as_ref(), &self.config)?;
        Ok(ResourceLocator::new(index))
    }
}

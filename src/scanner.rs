use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use zip::ZipArchive;

use crate::error::ReslocError;
use crate::resource::{Location, Resource};
use crate::root::{Root, RootKind};
use crate::traits::{Candidates, Scanner};

// ---------------------------------------------------------------------------
// ScanConfig
// ---------------------------------------------------------------------------

/// Traversal parameters passed from the builder to the scanner.
///
/// Callers set these through the builder (`.follow_links()`, `.max_depth()`,
/// `.include_hidden()`); custom scanners are free to ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub follow_links:   bool,
    pub max_depth:      Option<usize>,
    pub include_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_links:   false,
            max_depth:      None,
            include_hidden: true,
        }
    }
}

// ---------------------------------------------------------------------------
// FsScanner
// ---------------------------------------------------------------------------

/// The default scanner: walks directory roots and lists archive roots.
///
/// Directory trees are walked in file-name order; archives are listed in
/// central-directory order. Regular files become resources, and so do
/// symlinks to regular files. Symlinked directories are only descended into
/// with `follow_links`. A dangling symlink is yielded as an IO error.
///
/// A root that no longer exists when the scan starts is an error, for both
/// root kinds.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsScanner;

impl Scanner for FsScanner {
    fn scan<'a>(&'a self, root: &'a Root, config: &ScanConfig) -> Result<Candidates<'a>, ReslocError> {
        match root.kind() {
            RootKind::Directory => {
                check_directory(root.path())?;
                Ok(Box::new(walk_directory(root.path(), config)))
            }
            RootKind::Archive   => Ok(Box::new(list_archive(root.path())?)),
        }
    }
}

/// The walker reports an unreadable root as an ordinary item, so check it
/// up front.
fn check_directory(path: &Path) -> Result<(), ReslocError> {
    let meta = fs::metadata(path).map_err(|source| ReslocError::RootUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(ReslocError::InvalidRoot {
            path:   path.to_path_buf(),
            reason: "no longer a directory".into(),
        });
    }
    fs::read_dir(path).map_err(|source| ReslocError::RootUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn walk_directory(root: &Path, config: &ScanConfig) -> impl Iterator<Item = Result<Resource, ReslocError>> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(!config.include_hidden)
        .follow_links(config.follow_links)
        .max_depth(config.max_depth)
        .sort_by_file_name(|a, b| a.cmp(b));

    let base = root.to_path_buf();

    builder.build().filter_map(move |res| {
        let entry = match res {
            Ok(e) => e,
            Err(e) => return Some(Err(map_ignore_error(e))),
        };

        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => return None,
                Err(source) => {
                    return Some(Err(ReslocError::Io {
                        path: entry.path().to_path_buf(),
                        source,
                    }))
                }
            }
        } else if !file_type.is_file() {
            return None;
        }

        let path = entry.into_path();
        Some(relative_name(&base, &path).map(|name| Resource::new(name, Location::File(path))))
    })
}

fn list_archive(path: &Path) -> Result<impl Iterator<Item = Result<Resource, ReslocError>>, ReslocError> {
    let file = File::open(path).map_err(|source| ReslocError::RootUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|source| ReslocError::Archive {
        path: path.to_path_buf(),
        source,
    })?;

    let archive_path = path.to_path_buf();

    // The archive handle lives in this closure and is closed with the iterator.
    Ok((0..archive.len()).filter_map(move |i| {
        let entry = match archive.by_index_raw(i) {
            Ok(e) => e,
            Err(source) => {
                return Some(Err(ReslocError::Archive {
                    path: archive_path.clone(),
                    source,
                }))
            }
        };

        if entry.is_dir() {
            return None;
        }

        let name = entry.name().to_owned();
        if entry.enclosed_name().is_none() {
            return Some(Err(ReslocError::Unresolvable {
                name,
                reason: "entry escapes the archive".into(),
            }));
        }

        Some(Ok(Resource::new(
            name.clone(),
            Location::Archive {
                archive: archive_path.clone(),
                entry:   name,
            },
        )))
    }))
}

/// Turn `path` into a `/`-separated name relative to `base`.
fn relative_name(base: &Path, path: &Path) -> Result<String, ReslocError> {
    let unresolvable = |reason: &str| ReslocError::Unresolvable {
        name:   path.to_string_lossy().into_owned(),
        reason: reason.to_owned(),
    };

    let relative = path
        .strip_prefix(base)
        .map_err(|_| unresolvable("outside of root"))?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                parts.push(part.to_str().ok_or_else(|| unresolvable("name is not valid UTF-8"))?)
            }
            _ => return Err(unresolvable("unexpected path component")),
        }
    }

    if parts.is_empty() {
        return Err(unresolvable("empty name"));
    }
    Ok(parts.join("/"))
}

// ---------------------------------------------------------------------------
// Map ignore::Error to ReslocError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> ReslocError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => {
                if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                    ReslocError::PermissionDenied(path)
                } else {
                    ReslocError::Io { path, source: io_err }
                }
            }
            ignore::Error::Loop { child, .. } => ReslocError::SymlinkLoop(child),
            other => ReslocError::Scan(format!("{}: {}", path.display(), other)),
        },
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err),
        ignore::Error::Loop { child, .. } => ReslocError::SymlinkLoop(child),
        ignore::Error::Io(io_err)         => ReslocError::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => ReslocError::Scan(other.to_string()),
    }
}

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::ReslocError;

/// What kind of container a [`Root`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKind {
    /// A directory tree.
    Directory,

    /// A zip archive (`.zip`, `.jar`, ...).
    Archive,
}

/// A validated resource container.
///
/// Roots can only be built through [`Root::directory`] and [`Root::archive`],
/// which check the container up front and canonicalize its path, so two
/// spellings of the same container compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Root {
    kind: RootKind,
    path: PathBuf,
}

impl Root {
    /// A directory root. Fails unless `path` is an existing directory.
    pub fn directory(path: impl AsRef<Path>) -> Result<Self, ReslocError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(invalid(path, "not a directory".into()));
        }
        Ok(Self {
            kind: RootKind::Directory,
            path: canonical(path)?,
        })
    }

    /// An archive root. Fails unless `path` is a readable, well-formed zip
    /// container.
    pub fn archive(path: impl AsRef<Path>) -> Result<Self, ReslocError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| invalid(path, format!("not readable: {err}")))?;
        ZipArchive::new(BufReader::new(file))
            .map_err(|err| invalid(path, format!("not a valid archive: {err}")))?;
        Ok(Self {
            kind: RootKind::Archive,
            path: canonical(path)?,
        })
    }

    pub fn kind(&self) -> RootKind {
        self.kind
    }

    /// Canonical path of the container.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn canonical(path: &Path) -> Result<PathBuf, ReslocError> {
    path.canonicalize()
        .map_err(|err| invalid(path, format!("cannot resolve path: {err}")))
}

fn invalid(path: &Path, reason: String) -> ReslocError {
    ReslocError::InvalidRoot {
        path: path.to_path_buf(),
        reason,
    }
}

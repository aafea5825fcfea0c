use std::path::PathBuf;
use thiserror::Error;

use crate::glob::PatternError;
use crate::resource::Location;

#[derive(Error, Debug)]
pub enum ReslocError {
    // Pattern
    #[error(transparent)]
    Pattern(#[from] PatternError),

    // Config
    #[error("invalid root {}: {reason}", .path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("no source configured")]
    NoSource,

    #[error("root unavailable")]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Scanning
    #[error("permission denied")]
    PermissionDenied(PathBuf),

    #[error("symlink loop")]
    SymlinkLoop(PathBuf),

    #[error("unresolvable resource {name}: {reason}")]
    Unresolvable { name: String, reason: String },

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid archive")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    // Third-party extensibility
    #[error("scanner error: {0}")]
    Scan(String),

    // Loading
    #[error("failed to load {location}")]
    Load {
        location: Location,
        #[source]
        source: std::io::Error,
    },
}

impl ReslocError {
    /// The filesystem path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::InvalidRoot { path: p, .. }
            | Self::RootUnavailable { path: p, .. }
            | Self::PermissionDenied(p)
            | Self::SymlinkLoop(p)
            | Self::Io { path: p, .. }
            | Self::Archive { path: p, .. } => Some(p),
            Self::Load { location, .. } => Some(location.path()),
            _ => None,
        }
    }

    /// Whether the operation that produced this error can carry on past it.
    ///
    /// Recoverable errors (permission denied, symlink loops, unresolvable
    /// candidates, IO errors below a root) are scanning artifacts: index
    /// assembly drops them and keeps going.
    ///
    /// Everything else (bad patterns, bad or vanished roots, load failures)
    /// stops the operation that raised it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_)
                | Self::SymlinkLoop(_)
                | Self::Unresolvable { .. }
                | Self::Io { .. }
        )
    }
}

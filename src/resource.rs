use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

/// Where a resource's bytes live.
///
/// Produced once by a scanner during index assembly and never re-validated;
/// opening it may still fail later if the underlying file has gone away.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// A regular file on disk.
    File(PathBuf),

    /// An entry inside a zip archive.
    Archive {
        /// Path of the archive on disk.
        archive: PathBuf,
        /// Entry name inside the archive, `/`-separated.
        entry: String,
    },
}

impl Location {
    /// The file on disk backing this location (the archive itself for entries).
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::File(path) => path,
            Self::Archive { archive, .. } => archive,
        }
    }

    /// Open the resource for reading.
    ///
    /// Archive entries are read into memory so the archive handle is closed
    /// before this returns.
    pub fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        match self {
            Self::File(path) => Ok(Box::new(File::open(path)?)),
            Self::Archive { archive, entry } => {
                Ok(Box::new(Cursor::new(read_archive_entry(archive, entry)?)))
            }
        }
    }

    /// Read the whole resource.
    pub fn read_to_vec(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.open()?.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file:{}", path.display()),
            Self::Archive { archive, entry } => write!(f, "zip:{}!/{}", archive.display(), entry),
        }
    }
}

/// A named resource discovered under some root.
///
/// `name` is a `/`-separated virtual path, unique within an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Virtual path relative to the root, e.g. `books/a_game_of_thrones.properties`.
    pub name: String,

    /// How to get at the bytes.
    pub location: Location,
}

impl Resource {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

fn read_archive_entry(archive: &Path, entry: &str) -> io::Result<Vec<u8>> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(BufReader::new(file)).map_err(zip_to_io)?;
    let mut item = zip.by_name(entry).map_err(zip_to_io)?;
    let mut buf = Vec::with_capacity(item.size() as usize);
    item.read_to_end(&mut buf)?;
    Ok(buf)
}

fn zip_to_io(err: ZipError) -> io::Error {
    match err {
        ZipError::Io(err) => err,
        ZipError::FileNotFound => io::Error::new(io::ErrorKind::NotFound, err),
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

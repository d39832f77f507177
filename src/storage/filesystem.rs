//! Filesystem capability used by the backup manager
//!
//! The manager never touches `std::fs` directly for the backup directory;
//! it goes through [`Filesystem`] so the sweep and bundle promotion can be
//! exercised against controlled creation times and failures.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Filesystem operations needed to write, list and expire bundles
pub trait Filesystem: Send + Sync {
    /// Whether `path` names an existing regular file
    fn file_exists(&self, path: &Path) -> bool;

    /// Create a directory and all of its missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Regular files directly inside `dir` (non-recursive)
    ///
    /// Symlinks count when they resolve to a regular file; dangling links
    /// and links to directories are skipped.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// When the file at `path` was created
    fn created(&self, path: &Path) -> io::Result<DateTime<Local>>;

    /// Size of the file at `path` in bytes
    fn size(&self, path: &Path) -> io::Result<u64>;

    /// Move `from` to `to`, replacing `to` if it exists
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Delete the file at `path`
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`Filesystem`] backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            // fs::metadata follows symlinks, DirEntry::file_type does not
            if fs::metadata(&path).map_or(false, |m| m.is_file()) {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn created(&self, path: &Path) -> io::Result<DateTime<Local>> {
        let metadata = fs::metadata(path)?;
        // Not every platform/filesystem records a birth time
        let created = metadata.created().or_else(|_| metadata.modified())?;
        Ok(DateTime::<Local>::from(created))
    }

    fn size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

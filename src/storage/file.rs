//! File-backed storage
//!
//! Each key lives in `<dir>/<key>.json`. Writes are atomic:
//!
//! 1. Write to `<key>.tmp`
//! 2. `sync_all()` to flush to disk
//! 3. Rename over `<key>.json`
//!
//! so a crash leaves either the old or the new value, never a partial one.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{validate_key, DurableStorage};
use crate::error::StorageResult;

/// Storage directory with one JSON file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory.
    /// Leftover temp files from interrupted writes are removed.
    pub fn open<P: AsRef<Path>>(dir: P) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let cleaned = cleanup_temp_files(&dir)?;
        if cleaned > 0 {
            debug!(dir = %dir.display(), cleaned, "removed stale temp files");
        }

        Ok(Self { dir })
    }

    /// Directory the values are stored in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl DurableStorage for FileStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        atomic_write(&self.path_for(key), value)?;
        Ok(())
    }
}

fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    fs::rename(&temp_path, path)
}

fn cleanup_temp_files(dir: &Path) -> io::Result<usize> {
    let mut cleaned = 0;

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map(|e| e == "tmp").unwrap_or(false) {
            fs::remove_file(&path)?;
            cleaned += 1;
        }
    }

    Ok(cleaned)
}

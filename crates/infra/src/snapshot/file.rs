use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{SnapshotError, SnapshotStore};

/// Snapshot kept in a single file.
///
/// Writes go to a temporary sibling that is synced and then renamed over the
/// target, so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self, tag: &str) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot".to_string());
        self.path
            .with_file_name(format!(".{name}.{tag}.{}.tmp", std::process::id()))
    }

    fn ensure_parent(&self) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Write `contents` to a fresh temp file and fsync it.
    fn stage(&self, tag: &str, contents: &str) -> Result<PathBuf, SnapshotError> {
        self.ensure_parent()?;
        let temp = self.temp_path(tag);
        let written = File::create(&temp).and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        });
        discard_on_err(&temp, written)?;
        Ok(temp)
    }
}

/// Pass `result` through, removing the temp file `temp` if it failed.
fn discard_on_err<T>(temp: &Path, result: std::io::Result<T>) -> Result<T, SnapshotError> {
    result.map_err(|e| {
        let _ = fs::remove_file(temp);
        e.into()
    })
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self) -> Result<Option<String>, SnapshotError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &str) -> Result<(), SnapshotError> {
        let temp = self.stage("write", contents)?;
        discard_on_err(&temp, fs::rename(&temp, &self.path))
    }

    fn create_if_absent(&self, contents: &str) -> Result<bool, SnapshotError> {
        let temp = self.stage("seed", contents)?;
        // hard_link refuses to replace an existing target.
        let linked = fs::hard_link(&temp, &self.path);
        let _ = fs::remove_file(&temp);
        match linked {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

//! Whole-document snapshot storage.
//!
//! The stock tree is persisted as a single document that is replaced wholesale
//! on every write. Implementations only move bytes; parsing belongs to the
//! caller.

use std::sync::Arc;

use thiserror::Error;

pub mod file;
pub mod in_memory;

pub use file::FileSnapshotStore;
pub use in_memory::InMemorySnapshotStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SnapshotError {
    fn from(value: std::io::Error) -> Self {
        SnapshotError::Io(value.to_string())
    }
}

pub trait SnapshotStore: Send + Sync {
    /// Current snapshot contents, or `None` if no snapshot exists yet.
    fn read(&self) -> Result<Option<String>, SnapshotError>;

    /// Replace the snapshot. Readers see either the old or the new document,
    /// never a partial one.
    fn write(&self, contents: &str) -> Result<(), SnapshotError>;

    /// Write `contents` only if no snapshot exists. Returns whether it was created.
    fn create_if_absent(&self, contents: &str) -> Result<bool, SnapshotError>;
}

impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn read(&self) -> Result<Option<String>, SnapshotError> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<(), SnapshotError> {
        (**self).write(contents)
    }

    fn create_if_absent(&self, contents: &str) -> Result<bool, SnapshotError> {
        (**self).create_if_absent(contents)
    }
}

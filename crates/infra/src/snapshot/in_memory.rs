use std::sync::RwLock;

use super::{SnapshotError, SnapshotStore};

/// In-memory snapshot slot for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    inner: RwLock<Option<String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing contents (which need not be valid JSON).
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Some(contents.into())),
        }
    }
}

fn poisoned() -> SnapshotError {
    SnapshotError::Io("snapshot lock poisoned".to_string())
}

impl SnapshotStore for InMemorySnapshotStore {
    fn read(&self) -> Result<Option<String>, SnapshotError> {
        let slot = self.inner.read().map_err(|_| poisoned())?;
        Ok(slot.clone())
    }

    fn write(&self, contents: &str) -> Result<(), SnapshotError> {
        let mut slot = self.inner.write().map_err(|_| poisoned())?;
        *slot = Some(contents.to_string());
        Ok(())
    }

    fn create_if_absent(&self, contents: &str) -> Result<bool, SnapshotError> {
        let mut slot = self.inner.write().map_err(|_| poisoned())?;
        if slot.is_some() {
            return Ok(false);
        }
        *slot = Some(contents.to_string());
        Ok(true)
    }
}

//! The inventory store: authoritative access to the stock tree.
//!
//! Every read parses the current snapshot. Every write loads the snapshot,
//! applies one [`StockCommand`] to the loaded copy and writes the whole tree
//! back. A failed command is never written, so the snapshot only changes on
//! success.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use printstock_core::DomainError;
use printstock_inventory::{seed_tree, KitStock, StockCommand, StockTree};

use crate::snapshot::{SnapshotError, SnapshotStore};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// Status outside {green, yellow, red}.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Write path does not resolve to an existing node.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Read path (font/kit) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Snapshot missing, unreadable, unparsable or unwritable.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<DomainError> for StockError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => StockError::Validation(msg),
            DomainError::InvalidPath(msg) => StockError::InvalidPath(msg),
            DomainError::NotFound(msg) => StockError::NotFound(msg),
            DomainError::InvalidId(msg) => StockError::Validation(msg),
        }
    }
}

impl From<SnapshotError> for StockError {
    fn from(value: SnapshotError) -> Self {
        StockError::Storage(value.to_string())
    }
}

/// Stock tree service over a [`SnapshotStore`].
///
/// Writers are serialized by an internal lock so each read-modify-write
/// cycle is atomic within the process. Across processes the last write wins.
pub struct InventoryStore<S> {
    snapshots: S,
    write_lock: Mutex<()>,
}

impl<S: SnapshotStore> InventoryStore<S> {
    pub fn new(snapshots: S) -> Self {
        Self {
            snapshots,
            write_lock: Mutex::new(()),
        }
    }

    /// Persist the all-green seed tree unless a snapshot already exists.
    ///
    /// An existing snapshot is never touched, whatever its contents.
    /// Returns whether a snapshot was created.
    pub fn seed_if_absent(&self) -> Result<bool, StockError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let created = self.snapshots.create_if_absent(&encode(&seed_tree())?)?;
        if created {
            tracing::info!("stock snapshot initialized");
        } else {
            tracing::debug!("stock snapshot already present; seeding skipped");
        }
        Ok(created)
    }

    pub fn load_all(&self) -> Result<StockTree, StockError> {
        let raw = self.snapshots.read().inspect_err(|e| {
            tracing::error!(error = %e, "failed to read stock snapshot");
        })?;
        let raw = raw.ok_or_else(|| {
            tracing::error!("stock snapshot missing");
            StockError::Storage("stock snapshot missing".to_string())
        })?;
        // Keys outside the schema fail here too; they are never dropped and
        // written back.
        serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(error = %e, "stock snapshot is corrupt");
            StockError::Storage(format!("stock snapshot is corrupt: {e}"))
        })
    }

    /// Stock for one (font, kit), addressed by wire names.
    pub fn load_subtree(&self, font: &str, kit: &str) -> Result<KitStock, StockError> {
        let tree = self.load_all()?;
        Ok(tree.kit_by_name(font, kit)?.clone())
    }

    /// Set one existing item's status.
    pub fn set_item(
        &self,
        font: &str,
        kit: &str,
        category: &str,
        size: &str,
        item: &str,
        status: &str,
    ) -> Result<(), StockError> {
        let cmd = StockCommand::set_item(font, kit, category, size, item, status)?;
        self.execute(&cmd).map(|_| ())
    }

    /// Set every item of one existing size group. An empty group is a no-op success.
    pub fn set_size_group(
        &self,
        font: &str,
        kit: &str,
        category: &str,
        size: &str,
        status: &str,
    ) -> Result<(), StockError> {
        let cmd = StockCommand::set_size_group(font, kit, category, size, status)?;
        self.execute(&cmd).map(|_| ())
    }

    /// Apply a command and persist the result. Returns the number of items written.
    pub fn execute(&self, cmd: &StockCommand) -> Result<usize, StockError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut tree = self.load_all()?;
        let written = cmd.apply(&mut tree).inspect_err(|e| {
            tracing::debug!(command = %cmd, error = %e, "stock command rejected");
        })?;
        if written == 0 {
            tracing::debug!(command = %cmd, "stock command matched no items");
            return Ok(0);
        }
        self.snapshots.write(&encode(&tree)?).inspect_err(|e| {
            tracing::error!(command = %cmd, error = %e, "failed to persist stock snapshot");
        })?;

        tracing::info!(command = %cmd, items = written, "stock updated");
        Ok(written)
    }
}

/// Human-readable snapshot encoding (2-space indented JSON).
fn encode(tree: &StockTree) -> Result<String, StockError> {
    serde_json::to_string_pretty(tree)
        .map_err(|e| StockError::Storage(format!("failed to encode stock snapshot: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use printstock_inventory::{Category, Font, Kit, SizeClass, Status};
    use printstock_inventory::schema::size_classes;

    use crate::snapshot::{FileSnapshotStore, InMemorySnapshotStore};

    fn seeded() -> (Arc<InMemorySnapshotStore>, InventoryStore<Arc<InMemorySnapshotStore>>) {
        let snapshots = Arc::new(InMemorySnapshotStore::new());
        let store = InventoryStore::new(snapshots.clone());
        assert!(store.seed_if_absent().unwrap());
        (snapshots, store)
    }

    #[test]
    fn seed_is_idempotent_byte_for_byte() {
        let (snapshots, store) = seeded();
        let first = snapshots.read().unwrap().unwrap();
        assert!(!store.seed_if_absent().unwrap());
        assert_eq!(snapshots.read().unwrap().unwrap(), first);
        assert_eq!(store.load_all().unwrap(), seed_tree());
    }

    #[test]
    fn seed_never_overwrites_a_foreign_snapshot() {
        let foreign = r#"{"prem":{"home":{"letters":{"adult":{"A":"red"}},"numbers":{}}}}"#;
        let snapshots = Arc::new(InMemorySnapshotStore::with_contents(foreign));
        let store = InventoryStore::new(snapshots.clone());

        assert!(!store.seed_if_absent().unwrap());
        assert_eq!(snapshots.read().unwrap().as_deref(), Some(foreign));
    }

    #[test]
    fn load_all_fails_on_missing_or_corrupt_snapshot() {
        let store = InventoryStore::new(InMemorySnapshotStore::new());
        assert!(matches!(store.load_all(), Err(StockError::Storage(_))));

        let store = InventoryStore::new(InMemorySnapshotStore::with_contents("{not json"));
        assert!(matches!(store.load_all(), Err(StockError::Storage(_))));
        // Still failing, still not panicking: nothing was cached from the bad read.
        assert!(matches!(store.load_subtree("prem", "home"), Err(StockError::Storage(_))));
    }

    #[test]
    fn load_subtree_matches_schema_for_every_font_and_kit() {
        let (_, store) = seeded();
        for &font in Font::ALL {
            for &kit in Kit::ALL {
                let ks = store.load_subtree(font.as_str(), kit.as_str()).unwrap();
                for &category in Category::ALL {
                    let sizes: Vec<SizeClass> = ks.category(category).keys().copied().collect();
                    assert_eq!(sizes, size_classes(font, category), "{font}/{kit}/{category}");
                }
            }
        }
    }

    #[test]
    fn load_subtree_reports_unknown_font_or_kit() {
        let (_, store) = seeded();
        assert!(matches!(store.load_subtree("comic", "home"), Err(StockError::NotFound(_))));
        assert!(matches!(store.load_subtree("prem", "retro"), Err(StockError::NotFound(_))));
    }

    #[test]
    fn load_subtree_reports_kit_absent_from_snapshot() {
        let partial = r#"{"wsl":{"home":{"letters":{},"numbers":{}}}}"#;
        let store = InventoryStore::new(InMemorySnapshotStore::with_contents(partial));
        assert!(store.load_subtree("wsl", "home").is_ok());
        assert!(matches!(store.load_subtree("wsl", "away"), Err(StockError::NotFound(_))));
        assert!(matches!(store.load_subtree("prem", "home"), Err(StockError::NotFound(_))));
    }

    #[test]
    fn set_item_updates_one_item_and_persists() {
        let (_, store) = seeded();
        store.set_item("prem", "home", "letters", "adult", "A", "yellow").unwrap();

        let ks = store.load_subtree("prem", "home").unwrap();
        let adult = &ks.letters[&SizeClass::Adult];
        assert_eq!(adult.get("A"), Some(Status::Yellow));
        assert!(adult.iter().filter(|(k, _)| *k != "A").all(|(_, s)| s == Status::Green));
        assert!(ks.letters[&SizeClass::Baby].iter().all(|(_, s)| s == Status::Green));
    }

    #[test]
    fn set_size_group_updates_one_group_only() {
        let (_, store) = seeded();
        store.set_size_group("club", "away", "numbers", "youth", "red").unwrap();

        let tree = store.load_all().unwrap();
        let away = tree.kit(Font::Club, Kit::Away).unwrap();
        assert_eq!(away.numbers[&SizeClass::Youth].len(), 10);
        assert!(away.numbers[&SizeClass::Youth].iter().all(|(_, s)| s == Status::Red));
        assert!(away.numbers[&SizeClass::Adult].iter().all(|(_, s)| s == Status::Green));
        assert!(away.numbers[&SizeClass::Short].iter().all(|(_, s)| s == Status::Green));

        let seed = seed_tree();
        for (font, fs) in tree.fonts() {
            for (kit, ks) in fs.kits() {
                if (font, kit) != (Font::Club, Kit::Away) {
                    assert_eq!(ks, seed.kit(font, kit).unwrap(), "{font}/{kit}");
                }
            }
        }
    }

    #[test]
    fn invalid_status_leaves_snapshot_unchanged() {
        let (snapshots, store) = seeded();
        let before = snapshots.read().unwrap();

        let err = store.set_item("prem", "home", "letters", "adult", "A", "blue").unwrap_err();
        assert!(matches!(err, StockError::Validation(_)));
        let err = store.set_size_group("prem", "home", "letters", "adult", "blue").unwrap_err();
        assert!(matches!(err, StockError::Validation(_)));

        assert_eq!(snapshots.read().unwrap(), before);
    }

    #[test]
    fn invalid_path_leaves_snapshot_unchanged() {
        let (snapshots, store) = seeded();
        let before = snapshots.read().unwrap();

        for (f, k, c, s, i) in [
            ("wsl", "home", "letters", "baby", "A"),
            ("wsl", "home", "numbers", "youth", "1"),
            ("prem", "home", "letters", "adult", "1"),
            ("prem", "home", "numbers", "adult", "10"),
            ("prem", "kids", "letters", "adult", "A"),
        ] {
            let err = store.set_item(f, k, c, s, i, "red").unwrap_err();
            assert!(matches!(err, StockError::InvalidPath(_)), "{f}/{k}/{c}/{s}/{i}: {err:?}");
        }
        let err = store.set_size_group("wsl", "third", "numbers", "short", "red").unwrap_err();
        assert!(matches!(err, StockError::InvalidPath(_)));

        assert_eq!(snapshots.read().unwrap(), before);
    }

    #[test]
    fn empty_size_group_bulk_set_is_a_no_op_success() {
        let snapshot = r#"{"wsl":{"home":{"letters":{"adult":{}},"numbers":{}}}}"#;
        let snapshots = Arc::new(InMemorySnapshotStore::with_contents(snapshot));
        let store = InventoryStore::new(snapshots.clone());
        store.set_size_group("wsl", "home", "letters", "adult", "red").unwrap();
        assert!(store.load_subtree("wsl", "home").unwrap().letters[&SizeClass::Adult].is_empty());
        assert_eq!(snapshots.read().unwrap().as_deref(), Some(snapshot));
    }

    #[test]
    fn snapshot_with_unknown_keys_is_refused_and_kept_verbatim() {
        let snapshot = r#"{"prem":{"retro":{"letters":{},"numbers":{}}}}"#;
        let snapshots = Arc::new(InMemorySnapshotStore::with_contents(snapshot));
        let store = InventoryStore::new(snapshots.clone());

        assert!(matches!(store.load_all(), Err(StockError::Storage(_))));
        assert!(matches!(store.load_subtree("prem", "retro"), Err(StockError::Storage(_))));
        let err = store.set_size_group("prem", "home", "letters", "adult", "red").unwrap_err();
        assert!(matches!(err, StockError::Storage(_)));
        assert!(!store.seed_if_absent().unwrap());
        assert_eq!(snapshots.read().unwrap().as_deref(), Some(snapshot));
    }

    #[test]
    fn writes_on_corrupt_snapshot_fail_with_storage_error() {
        let snapshots = Arc::new(InMemorySnapshotStore::with_contents("garbage"));
        let store = InventoryStore::new(snapshots.clone());
        let err = store.set_item("prem", "home", "letters", "adult", "A", "red").unwrap_err();
        assert!(matches!(err, StockError::Storage(_)));
        assert_eq!(snapshots.read().unwrap().as_deref(), Some("garbage"));
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("stock.json");

        let store = InventoryStore::new(FileSnapshotStore::new(&path));
        assert!(store.seed_if_absent().unwrap());
        store.set_item("wsl", "third", "numbers", "adult", "7", "yellow").unwrap();
        drop(store);

        let reopened = InventoryStore::new(FileSnapshotStore::new(&path));
        assert!(!reopened.seed_if_absent().unwrap());
        let ks = reopened.load_subtree("wsl", "third").unwrap();
        assert_eq!(ks.numbers[&SizeClass::Adult].get("7"), Some(Status::Yellow));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("{\n  \"prem\": {"));
    }
}

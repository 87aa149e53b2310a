//! Infrastructure layer: snapshot storage and the inventory store service.

pub mod inventory_store;
pub mod snapshot;

pub use inventory_store::{InventoryStore, StockError};
pub use snapshot::{FileSnapshotStore, InMemorySnapshotStore, SnapshotError, SnapshotStore};

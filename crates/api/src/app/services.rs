//! Service wiring: inventory store over the snapshot file, access gate over
//! in-memory sessions and configured secrets.

use std::sync::Arc;

use printstock_auth::{AccessGate, InMemorySessionStore, SecretCredentials};
use printstock_infra::{FileSnapshotStore, InventoryStore, StockError};

use crate::config::Config;

pub struct AppServices {
    pub inventory: InventoryStore<FileSnapshotStore>,
    pub gate: AccessGate,
}

/// Build services and make sure a stock snapshot exists.
pub fn build_services(config: &Config) -> Result<AppServices, StockError> {
    let snapshots = FileSnapshotStore::new(config.data_file.clone());
    let inventory = InventoryStore::new(snapshots);
    if inventory.seed_if_absent()? {
        tracing::info!(path = %config.data_file.display(), "seeded new stock snapshot");
    }

    let gate = AccessGate::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(SecretCredentials::new(
            config.staff_password.clone(),
            config.admin_password.clone(),
        )),
        config.session_ttl,
    );

    Ok(AppServices { inventory, gate })
}

//! Cadence terminal front-end
//!
//! Wires the catalog, a storage backend and the playback session together
//! for the `cadence` binary.

pub mod commands;
pub mod config;
pub mod session;

use anyhow::{Context, Result};
use cadence_core::Catalog;
use cadence_playback::SessionManager;
use crate::config::CliConfig;
use tracing::info;

/// Load the configured catalog
pub fn load_catalog(config: &CliConfig) -> Result<Catalog> {
    Catalog::from_path(&config.catalog)
        .with_context(|| format!("Failed to load catalog {}", config.catalog.display()))
}

/// Open the configured store and rehydrate a session from it
pub fn open_session(config: &CliConfig) -> Result<SessionManager> {
    let store = cadence_storage::open_store(&config.storage).with_context(|| {
        format!(
            "Failed to open {:?} storage at {}",
            config.storage.backend,
            config.storage.path.display()
        )
    })?;
    info!("Storage ready ({:?})", config.storage.backend);

    Ok(SessionManager::with_boxed_store(
        store,
        config.session.clone(),
    ))
}

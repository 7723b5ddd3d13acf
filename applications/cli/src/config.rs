/// CLI configuration
use anyhow::{Context, Result};
use cadence_playback::SessionConfig;
use cadence_storage::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

/// Prefix for environment overrides (`CADENCE_STORAGE__BACKEND=redb`)
pub const ENV_PREFIX: &str = "CADENCE";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub storage: StoreConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,
}

fn default_catalog() -> PathBuf {
    PathBuf::from("catalog.json")
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            storage: StoreConfig::default(),
            session: SessionConfig::default(),
            catalog: default_catalog(),
        }
    }
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `cadence.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (CADENCE_SECTION__KEY)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build().context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let volume = self.session.initial_volume;
        if !(0.0..=1.0).contains(&volume) {
            anyhow::bail!("session.initial_volume must be between 0 and 1, got {volume}");
        }

        if self.session.progress_key == self.session.queue_key {
            anyhow::bail!("session.progress_key and session.queue_key must differ");
        }

        Ok(())
    }
}

//! Configuration loaded with figment.
//!
//! Sources, later overriding earlier:
//! 1. Built-in defaults
//! 2. A TOML file (`laneboard.toml` in the working directory, or an explicit path)
//! 3. `LANEBOARD_`-prefixed environment variables (`LANEBOARD_BASE_URL`, ...)

use crate::engine::EngineOptions;
use crate::error::Result;
use crate::plan::PlanStrategy;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "laneboard.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LANEBOARD_";

/// Engine and store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Base endpoint of the remote store
    pub base_url: String,
    /// Path of the card collection under `base_url`
    pub clients_path: String,
    pub request_timeout_secs: u64,
    /// Class marking the draggable region of a rendered card
    pub draggable_class: String,
    pub plan_strategy: PlanStrategy,
    /// Reload from the store even when some updates failed
    pub reload_on_failure: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            clients_path: "/api/v1/clients".to_string(),
            request_timeout_secs: 30,
            draggable_class: "Card".to_string(),
            plan_strategy: PlanStrategy::Full,
            reload_on_failure: false,
        }
    }
}

impl BoardConfig {
    /// Load from defaults, `laneboard.toml` if present, and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    /// Load using an explicit config file path. A missing file is skipped.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading board configuration");
        let config = Self::extract(Self::figment(path))?;
        debug!(base_url = %config.base_url, "loaded board configuration");
        Ok(config)
    }

    /// The figment with every source merged, for callers adding their own
    pub fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Extract a config from any figment
    pub fn extract(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }

    /// Runtime options for the engine
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            plan_strategy: self.plan_strategy,
            reload_on_failure: self.reload_on_failure,
            draggable_class: self.draggable_class.clone(),
        }
    }
}

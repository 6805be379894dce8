//! Startup configuration, read from TOML.
//!
//! ```toml
//! [store]
//! capacity = 10
//! grace_minutes = 5
//! normalize_interval_secs = 30
//!
//! [sessions]
//! idle_ttl_secs = 1800   # 0 keeps drafts forever
//! allowed_users = []     # empty lets everyone in
//!
//! [[catalog]]
//! key = "soups"
//! title = "Супы"
//! items = ["Борщ", "Солянка"]
//! ```
//!
//! Every key is optional. Without `[[catalog]]` entries the built-in menu is used.

use crate::access::{AccessPolicy, AllowAll, AllowList};
use crate::board_actor::{StoreLimits, DEFAULT_CAPACITY, DEFAULT_GRACE_MINUTES, DEFAULT_NORMALIZE_INTERVAL};
use crate::model::{builtin_categories, Catalog, Category};
use crate::session_actor::DEFAULT_IDLE_TTL;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub capacity: usize,
    pub grace_minutes: u32,
    pub normalize_interval_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            grace_minutes: DEFAULT_GRACE_MINUTES,
            normalize_interval_secs: DEFAULT_NORMALIZE_INTERVAL.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub idle_ttl_secs: u64,
    pub allowed_users: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: DEFAULT_IDLE_TTL.as_secs(),
            allowed_users: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub store: StoreConfig,
    pub sessions: SessionConfig,
    pub catalog: Vec<Category>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            sessions: SessionConfig::default(),
            catalog: builtin_categories(),
        }
    }
}

impl BoardConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: BoardConfig = toml::from_str(raw)?;
        if config.catalog.is_empty() {
            config.catalog = builtin_categories();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.capacity == 0 {
            return Err(ConfigError::Invalid("store.capacity must be at least 1".into()));
        }
        if self.store.normalize_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "store.normalize_interval_secs must be at least 1".into(),
            ));
        }

        let mut keys = HashSet::new();
        for category in &self.catalog {
            if !keys.insert(category.key.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate catalog key {:?}",
                    category.key
                )));
            }
            if category.items.iter().any(|item| item.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "catalog {:?} has an empty item name",
                    category.key
                )));
            }
        }
        Ok(())
    }

    pub fn limits(&self) -> StoreLimits {
        StoreLimits::new(self.store.capacity, self.store.grace_minutes)
    }

    pub fn normalize_interval(&self) -> Duration {
        Duration::from_secs(self.store.normalize_interval_secs)
    }

    /// `None` when drafts never expire.
    pub fn idle_ttl(&self) -> Option<Duration> {
        Some(Duration::from_secs(self.sessions.idle_ttl_secs)).filter(|ttl| !ttl.is_zero())
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.catalog.clone())
    }

    pub fn access_policy(&self) -> Arc<dyn AccessPolicy> {
        if self.sessions.allowed_users.is_empty() {
            Arc::new(AllowAll)
        } else {
            Arc::new(AllowList::new(self.sessions.allowed_users.iter().cloned()))
        }
    }
}

//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge compiled defaults + `config.toml` +
//! `config.<env>.toml` + `APP_*` env vars. Provides helpers to expand `~` and
//! `${VAR}` and to resolve relative paths against a known base directory.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::EntityType;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub data: DataConfig,
    pub index: IndexConfig,
    pub search: SearchConfig,
    pub recent: RecentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    pub source_dir: String,
}

/// Which entity types the index builder projects. `None` indexes all of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IndexConfig {
    pub entity_types: Option<Vec<EntityType>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    pub suggestion_limit: usize,
    pub max_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentConfig {
    pub store_path: String,
    pub key: String,
    pub capacity: usize,
}

impl Default for DataConfig {
    fn default() -> Self { Self { source_dir: "./data".to_string() } }
}

impl Default for SearchConfig {
    fn default() -> Self { Self { suggestion_limit: 5, max_results: 50 } }
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            store_path: "~/.nursery/recent.json".to_string(),
            key: "nursery.recent-searches".to_string(),
            capacity: 10,
        }
    }
}

impl Config {
    /// Load from the current directory for the `RUST_ENV` environment.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    pub fn load_from(config_dir: &Path) -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(config_dir, &env_name)
    }

    pub fn load_for_env(config_dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(config_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(config_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(config_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config: Config = figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.suggestion_limit == 0 {
            return Err(Error::InvalidConfig("search.suggestion_limit must be at least 1".to_string()));
        }
        if self.recent.capacity == 0 {
            return Err(Error::InvalidConfig("recent.capacity must be at least 1".to_string()));
        }
        if self.recent.key.trim().is_empty() {
            return Err(Error::InvalidConfig("recent.key must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn source_dir(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.data.source_dir)
    }

    pub fn recent_store_path(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.recent.store_path)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

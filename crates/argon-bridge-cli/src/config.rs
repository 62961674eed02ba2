use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use argon_bridge_core::params::{
    DEFAULT_HASH_LENGTH, DEFAULT_ITERATIONS, DEFAULT_MEMORY_KIB, DEFAULT_PARALLELISM,
};
use argon_bridge_core::pool::DEFAULT_MEMORY_BUDGET_KIB;
use argon_bridge_core::{ArgonVersion, HashingConfig, PoolConfig, Variant};

use crate::constants::{APP_DIR, CONFIG_ENV};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub defaults: DefaultsSection,
    pub pool: PoolSection,
}

/// Hashing parameters used when a flag is not given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsSection {
    pub variant: String,
    pub version: i64,
    pub iterations: u32,
    pub memory: u32,
    pub parallelism: u32,
    pub hash_length: u32,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            variant: Variant::default().to_string(),
            version: ArgonVersion::V13,
            iterations: DEFAULT_ITERATIONS,
            memory: DEFAULT_MEMORY_KIB,
            parallelism: DEFAULT_PARALLELISM,
            hash_length: DEFAULT_HASH_LENGTH,
        }
    }
}

impl DefaultsSection {
    /// Fill every parameter of `config` from this section.
    ///
    /// Callers apply their own overrides afterwards.
    pub fn apply(&self, config: HashingConfig) -> HashingConfig {
        config
            .with_variant_name(self.variant.clone())
            .with_version(self.version)
            .with_iterations(self.iterations)
            .with_memory(self.memory)
            .with_parallelism(self.parallelism)
            .with_hash_length(self.hash_length)
    }
}

/// Sizing for `batch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSection {
    pub memory_budget_kib: u32,
    /// Unset means one worker per available core.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_workers: Option<usize>,
}

impl Default for PoolSection {
    fn default() -> Self {
        Self {
            memory_budget_kib: DEFAULT_MEMORY_BUDGET_KIB,
            max_workers: None,
        }
    }
}

impl PoolSection {
    pub fn to_pool_config(&self) -> PoolConfig {
        let defaults = PoolConfig::default();
        PoolConfig {
            memory_budget_kib: self.memory_budget_kib,
            max_workers: self.max_workers.unwrap_or(defaults.max_workers),
        }
    }
}

/// Resolve the config file path, checking ARGON_BRIDGE_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Load the config file, or the built-in defaults when there is none.
pub fn load_config() -> anyhow::Result<CliConfig> {
    let path = resolve_config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(CliConfig::default());
    }
    tracing::debug!(path = %path.display(), "loading config");
    read_config(&path)
}

pub fn read_config(path: &Path) -> anyhow::Result<CliConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &CliConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents = to_toml(config)?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn to_toml(config: &CliConfig) -> anyhow::Result<String> {
    toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join(APP_DIR));
        }
    }
    Ok(home_dir()?.join(".config").join(APP_DIR))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: CliConfig = toml::from_str("[defaults]\nmemory = 64\n").unwrap();
        assert_eq!(config.defaults.memory, 64);
        assert_eq!(config.defaults.iterations, DEFAULT_ITERATIONS);
        assert_eq!(config.defaults.variant, "argon2id");
        assert_eq!(config.pool, PoolSection::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = CliConfig::default();
        config.defaults.variant = "argon2i".to_string();
        config.pool.max_workers = Some(3);

        write_config(&path, &config).unwrap();
        assert_eq!(read_config(&path).unwrap(), config);
    }

    #[test]
    fn test_apply_sets_every_parameter() {
        let defaults = DefaultsSection {
            variant: "argon2d".to_string(),
            version: ArgonVersion::V10,
            iterations: 1,
            memory: 64,
            parallelism: 2,
            hash_length: 16,
        };
        let config = defaults.apply(HashingConfig::new("pw", "somesalt"));
        let request = argon_bridge_core::resolve(&config).unwrap();
        assert_eq!(request.variant, Variant::Argon2d);
        assert_eq!(request.version.as_u32(), 0x10);
        assert_eq!(request.costs.memory, 64);
        assert_eq!(request.costs.parallelism, 2);
        assert_eq!(request.costs.hash_length, 16);
    }

    #[test]
    fn test_pool_workers_default_to_cores() {
        let pool = PoolSection::default().to_pool_config();
        assert!(pool.max_workers >= 1);
        assert_eq!(pool.memory_budget_kib, DEFAULT_MEMORY_BUDGET_KIB);
    }
}

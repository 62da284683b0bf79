//! Configuration for CaskLite
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a CaskLite session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory under which databases (directories) are created.
    /// Internal structure:
    ///   {root_dir}/
    ///     └── {database}/
    ///           ├── {table}_meta.json   (column definitions)
    ///           └── {table}.kv          (append-only log)
    pub root_dir: PathBuf,

    /// Database selected at startup if none is given on the command line
    pub default_database: String,

    // -------------------------------------------------------------------------
    // Log Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: when to flush log appends to the OS
    pub sync_strategy: SyncStrategy,
}

/// Log flush strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// Flush after every append (safest, slowest)
    EveryWrite,

    /// Flush only when the store is closed or dropped
    OnClose,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            default_database: ".cask".to_string(),
            sync_strategy: SyncStrategy::EveryWrite,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the root directory (databases are created under it)
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Set the database used when none is named at startup
    pub fn default_database(mut self, name: impl Into<String>) -> Self {
        self.config.default_database = name.into();
        self
    }

    /// Set the log sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

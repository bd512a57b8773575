//! Configuration for sfile
//!
//! Centralized store configuration with sensible defaults.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to the base name to locate the header file
pub const DEFAULT_HEADER_SUFFIX: &str = "-Header";

/// Permission bits used when creating either file (before umask)
pub const DEFAULT_FILE_MODE: u32 = 0o666;

/// Configuration for a paired-file store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    // -------------------------------------------------------------------------
    // Naming
    // -------------------------------------------------------------------------
    /// Literal appended to the base name for the header file.
    /// Layout:
    ///   <base>            (data file)
    ///   <base><suffix>    (header file)
    pub header_suffix: String,

    // -------------------------------------------------------------------------
    // File Creation
    // -------------------------------------------------------------------------
    /// Mode bits for newly created files. Only honored on Unix.
    pub file_mode: u32,

    // -------------------------------------------------------------------------
    // Durability
    // -------------------------------------------------------------------------
    /// When to fsync the underlying files
    pub sync_policy: SyncPolicy,
}

/// Sync policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPolicy {
    /// Never fsync; durability is left to the OS write cache
    #[default]
    Never,

    /// fsync each file once, when the store is closed
    OnClose,

    /// fsync after every data write and header save (safest, slowest)
    EveryWrite,
}

impl SyncPolicy {
    pub(crate) fn sync_on_write(self) -> bool {
        matches!(self, SyncPolicy::EveryWrite)
    }

    pub(crate) fn sync_on_close(self) -> bool {
        !matches!(self, SyncPolicy::Never)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            header_suffix: DEFAULT_HEADER_SUFFIX.to_string(),
            file_mode: DEFAULT_FILE_MODE,
            sync_policy: SyncPolicy::Never,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }

    /// Derive the header path for a base name.
    ///
    /// Plain concatenation of the base name and the suffix, with no
    /// separator and no normalization.
    pub fn header_path(&self, base: &Path) -> PathBuf {
        let mut name = OsString::from(base.as_os_str());
        name.push(&self.header_suffix);
        PathBuf::from(name)
    }
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the header file suffix
    pub fn header_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.header_suffix = suffix.into();
        self
    }

    /// Set the creation mode for both files
    pub fn file_mode(mut self, mode: u32) -> Self {
        self.config.file_mode = mode;
        self
    }

    /// Set the sync policy
    pub fn sync_policy(mut self, policy: SyncPolicy) -> Self {
        self.config.sync_policy = policy;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}

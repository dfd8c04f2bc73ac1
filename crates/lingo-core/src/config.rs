//! Configuration structures for the lingo catalog.
//!
//! This module provides configuration types for the provider and watcher:
//!
//! - [`WatchConfig`] - File watcher settings (arming, backup-on-delete)
//! - [`CatalogConfig`] - Root configuration for opening catalogs
//!
//! All configuration types implement [`Default`] with sensible values.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Configuration for external file-change watching.
///
/// # Examples
///
/// ```
/// use lingo_core::WatchConfig;
///
/// let config = WatchConfig::default();
/// assert!(!config.enabled);
/// assert!(config.backup_on_delete);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Whether the watcher is armed when the catalog is opened.
    ///
    /// Watching is inert until explicitly enabled; callers that never
    /// expect external edits pay no watching cost.
    pub enabled: bool,

    /// Whether to snapshot the in-memory catalog to the backup path
    /// before a delete notification is delivered.
    pub backup_on_delete: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            backup_on_delete: true,
        }
    }
}

/// Root configuration for opening a catalog.
///
/// # Examples
///
/// ```
/// use lingo_core::CatalogConfig;
///
/// let config = CatalogConfig::default();
/// assert_eq!(config.root.as_str(), ".");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// The root directory holding `Translations/` and `BackUp/`.
    pub root: Utf8PathBuf,

    /// Watcher settings.
    pub watch: WatchConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            watch: WatchConfig::default(),
        }
    }
}

//! Core types, errors, and configuration for the lingo translation catalog.
//!
//! This crate provides the foundational pieces used across the workspace:
//!
//! - The localized text model ([`Translation`], [`TranslationGroup`])
//! - The backing-file identity object ([`TranslationFile`])
//! - The [`CatalogError`] taxonomy
//! - Configuration structures ([`CatalogConfig`], [`WatchConfig`])
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std for
//!   string keys)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

pub use config::{CatalogConfig, WatchConfig};
pub use error::CatalogError;
pub use hash::{FxBuildHasher, FxHashMap, FxHashSet};
pub use types::{
    ensure_layout, name_key, validate_target, Translation, TranslationFile, TranslationGroup,
    BACKUP_DIR, CATALOG_EXTENSION, TRANSLATIONS_DIR,
};

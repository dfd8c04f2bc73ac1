//! Domain types for the lingo catalog.
//!
//! - [`Translation`] / [`TranslationGroup`] - the localized text model
//! - [`TranslationFile`] - the backing-file identity object

mod file;
mod translation;

pub use file::{
    ensure_layout, validate_target, TranslationFile, BACKUP_DIR, CATALOG_EXTENSION,
    TRANSLATIONS_DIR,
};
pub use translation::{name_key, Translation, TranslationGroup};

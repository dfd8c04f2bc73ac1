//! Error types for the lingo workspace.
//!
//! This module provides the [`CatalogError`] type shared by the store,
//! persistence gateway, and provider façade.

use camino::Utf8PathBuf;

/// Errors that can occur while resolving, reading, or mutating a catalog.
///
/// Validation errors (missing folder or file, bad extension, blank name)
/// are raised *before* any I/O or mutation takes place, so a failed
/// operation never leaves partial state behind. Uniqueness and existence
/// errors on CRUD operations likewise leave the store unchanged.
///
/// # Examples
///
/// ```
/// use lingo_core::CatalogError;
///
/// let error = CatalogError::GroupAlreadyExists("greeting".to_owned());
/// assert!(error.to_string().contains("greeting"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The `Translations` directory does not exist under the given root.
    #[error("translations folder is missing: {0}")]
    FolderMissing(Utf8PathBuf),

    /// The named catalog file does not exist.
    #[error("translation file not found: {0}")]
    FileMissing(String),

    /// The target file does not carry the `.json` extension.
    #[error("invalid translation file extension: '{0}' (expected '.json')")]
    InvalidExtension(String),

    /// No file path was provided, or the provided path is blank.
    #[error("no translation file specified")]
    FileNotSpecified,

    /// The backing file holds a non-empty payload that is not a valid
    /// catalog document.
    #[error("invalid catalog content: {0}")]
    InvalidContent(#[source] serde_json::Error),

    /// A group with the given name already exists in the store.
    #[error("translation group already exists: '{0}'")]
    GroupAlreadyExists(String),

    /// No group with the given name exists in the store.
    #[error("translation group does not exist: '{0}'")]
    GroupNotExist(String),

    /// A reload would discard unsaved in-memory mutations.
    #[error("unsaved changes present; reload with discard to overwrite them")]
    UnsavedChanges,

    /// A blank name or otherwise unusable argument was passed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A mutation was attempted from inside a change-notification handler.
    ///
    /// Handlers run synchronously on the mutating caller's thread;
    /// re-entering the provider from one is a precondition violation.
    #[error("mutation attempted while dispatching change notifications")]
    ReentrantMutation,

    /// An I/O error occurred while reading the backing file.
    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Creates a new [`CatalogError::InvalidArgument`] error.
    #[inline]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// Returns `true` if this error was raised by pre-I/O validation of
    /// the target file (as opposed to store state or I/O failures).
    #[inline]
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::FolderMissing(_)
                | Self::FileMissing(_)
                | Self::InvalidExtension(_)
                | Self::FileNotSpecified
                | Self::InvalidArgument(_)
        )
    }

    /// Returns the group name associated with this error, if any.
    #[must_use]
    pub fn group_name(&self) -> Option<&str> {
        match self {
            Self::GroupAlreadyExists(name) | Self::GroupNotExist(name) => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_missing_display() {
        let err = CatalogError::FolderMissing(Utf8PathBuf::from("/app/Translations"));
        assert!(err.to_string().contains("/app/Translations"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_group_errors_carry_name() {
        let err = CatalogError::GroupNotExist("hello".to_owned());
        assert_eq!(err.group_name(), Some("hello"));
        assert!(!err.is_validation());

        let err = CatalogError::GroupAlreadyExists("hello".to_owned());
        assert_eq!(err.group_name(), Some("hello"));
    }

    #[test]
    fn test_invalid_extension_display() {
        let err = CatalogError::InvalidExtension(".xml".to_owned());
        let msg = err.to_string();
        assert!(msg.contains(".xml"));
        assert!(msg.contains(".json"));
    }

    #[test]
    fn test_unsaved_changes_display() {
        let err = CatalogError::UnsavedChanges;
        assert!(err.to_string().contains("unsaved"));
    }

    #[test]
    fn test_invalid_argument_constructor() {
        let err = CatalogError::invalid_argument("group name is blank");
        assert!(err.to_string().contains("blank"));
        assert!(err.is_validation());
    }
}

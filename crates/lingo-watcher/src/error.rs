//! Error types for the lingo-watcher crate.

use camino::Utf8PathBuf;

/// Errors that can occur while arming or operating a file watch.
///
/// # Examples
///
/// ```
/// use lingo_watcher::WatchError;
/// use camino::Utf8PathBuf;
///
/// let err = WatchError::PathNotFound(Utf8PathBuf::from("/missing.json"));
/// assert!(err.to_string().contains("/missing.json"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Failed to initialize or operate the notify watcher.
    #[error("notify watcher error: {0}")]
    Notify(#[from] notify::Error),

    /// The file to watch does not exist.
    ///
    /// A watch can only be armed against an existing file; deletion is
    /// then reported as a signal, not an arming error.
    #[error("watched file does not exist: {0}")]
    PathNotFound(Utf8PathBuf),

    /// An I/O error occurred during path resolution.
    #[error("I/O error: {0}")]
    Io(std::io::Error),
}

impl WatchError {
    /// Creates a new [`WatchError::PathNotFound`] error.
    #[inline]
    pub fn path_not_found(path: impl Into<Utf8PathBuf>) -> Self {
        Self::PathNotFound(path.into())
    }
}

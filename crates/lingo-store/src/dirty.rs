//! The unsaved-changes guard.
//!
//! A single place owns the dirty bit: every mutation path marks it through
//! [`DirtyState::mark`] and only a successful persist (or completed reload)
//! clears it through [`DirtyState::clear`]. Centralizing the transitions
//! means a mutation path added later cannot bypass the guard.

use lingo_core::CatalogError;

/// Tracks whether unsaved mutations exist since the last successful persist.
///
/// Starts clean at provider construction.
///
/// # Examples
///
/// ```
/// use lingo_store::DirtyState;
///
/// let mut dirty = DirtyState::new();
/// assert!(!dirty.is_dirty());
///
/// dirty.mark();
/// assert!(dirty.guard_reload(false).is_err());
/// assert!(dirty.guard_reload(true).is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyState {
    dirty: bool,
}

impl DirtyState {
    /// Creates a clean state.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { dirty: false }
    }

    /// Marks that an unsaved mutation exists.
    #[inline]
    pub fn mark(&mut self) {
        self.dirty = true;
    }

    /// Clears the flag after a successful persist or reload.
    #[inline]
    pub fn clear(&mut self) {
        self.dirty = false;
    }

    /// Returns `true` if unsaved mutations exist.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Checks whether a destructive reload may proceed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsavedChanges`] if the flag is set and the
    /// caller did not ask to discard. The state itself is not modified.
    pub const fn guard_reload(&self, discard_changes: bool) -> Result<(), CatalogError> {
        if self.dirty && !discard_changes {
            return Err(CatalogError::UnsavedChanges);
        }
        Ok(())
    }
}

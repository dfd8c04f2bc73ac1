//! Structured mutation records.
//!
//! Every successful store mutation yields exactly one [`ChangeRecord`]
//! describing what happened, which the provider delivers synchronously to
//! subscribers after the state transition has committed. Records carry
//! owned snapshots, so subscribers never observe half-mutated state.

use lingo_core::TranslationGroup;

/// The kind of mutation a [`ChangeRecord`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// A group was appended to the store.
    Added,
    /// A group was renamed or replaced in place.
    Updated,
    /// A group was removed.
    Deleted,
    /// The store was emptied (no per-item records).
    Cleared,
    /// The store was wholesale-replaced from disk; everything may have
    /// changed, so no itemized diff is carried.
    Reloaded,
}

/// A structured record of one store mutation.
///
/// `index` is the position the change occurred at; [`ChangeKind::Cleared`]
/// and [`ChangeKind::Reloaded`] carry no index and no snapshots. The
/// rename-only update path intentionally leaves `old` empty — only the
/// name changed, and consumers rely on that distinction.
///
/// # Examples
///
/// ```
/// use lingo_core::TranslationGroup;
/// use lingo_store::{ChangeKind, ChangeRecord};
///
/// let record = ChangeRecord::added(0, TranslationGroup::new("greeting"));
/// assert_eq!(record.kind, ChangeKind::Added);
/// assert_eq!(record.index, Some(0));
/// assert!(record.old.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// What happened.
    pub kind: ChangeKind,

    /// Position of the affected group, when the change is positional.
    pub index: Option<usize>,

    /// Snapshot of the group before the change, when one is captured.
    pub old: Option<TranslationGroup>,

    /// Snapshot of the group after the change, when one exists.
    pub new: Option<TranslationGroup>,
}

impl ChangeRecord {
    /// Record for a group appended at `index`.
    #[must_use]
    pub fn added(index: usize, new: TranslationGroup) -> Self {
        Self {
            kind: ChangeKind::Added,
            index: Some(index),
            old: None,
            new: Some(new),
        }
    }

    /// Record for an in-place rename.
    ///
    /// The old snapshot is intentionally not captured: only the name
    /// changed and the slot identity is unchanged.
    #[must_use]
    pub fn renamed(index: usize, new: TranslationGroup) -> Self {
        Self {
            kind: ChangeKind::Updated,
            index: Some(index),
            old: None,
            new: Some(new),
        }
    }

    /// Record for a slot replaced with a new group value.
    #[must_use]
    pub fn replaced(index: usize, old: TranslationGroup, new: TranslationGroup) -> Self {
        Self {
            kind: ChangeKind::Updated,
            index: Some(index),
            old: Some(old),
            new: Some(new),
        }
    }

    /// Record for a group removed from `index`.
    #[must_use]
    pub fn deleted(index: usize, old: TranslationGroup) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            index: Some(index),
            old: Some(old),
            new: None,
        }
    }

    /// Record for the store being emptied.
    #[must_use]
    pub const fn cleared() -> Self {
        Self {
            kind: ChangeKind::Cleared,
            index: None,
            old: None,
            new: None,
        }
    }

    /// Record for the store being wholesale-replaced from disk.
    #[must_use]
    pub const fn reloaded() -> Self {
        Self {
            kind: ChangeKind::Reloaded,
            index: None,
            old: None,
            new: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_record_has_no_old_snapshot() {
        let record = ChangeRecord::renamed(2, TranslationGroup::new("after"));
        assert_eq!(record.kind, ChangeKind::Updated);
        assert!(record.old.is_none());
        assert_eq!(record.new.as_ref().map(|g| g.name.as_str()), Some("after"));
    }

    #[test]
    fn test_replace_record_carries_both_snapshots() {
        let record = ChangeRecord::replaced(
            1,
            TranslationGroup::new("before"),
            TranslationGroup::new("after"),
        );
        assert!(record.old.is_some());
        assert!(record.new.is_some());
    }

    #[test]
    fn test_cleared_and_reloaded_carry_nothing() {
        for record in [ChangeRecord::cleared(), ChangeRecord::reloaded()] {
            assert!(record.index.is_none());
            assert!(record.old.is_none());
            assert!(record.new.is_none());
        }
    }
}

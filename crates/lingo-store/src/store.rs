//! The ordered, name-keyed collection of translation groups.
//!
//! [`TranslationStore`] owns the uniqueness and ordering invariants:
//! an insertion-ordered `Vec` carries the groups, and an `FxHashMap` from
//! canonical name key to position makes lookups O(1). Names are
//! canonicalized (trimmed, lowercased) exactly once at entry into each
//! operation; the canonical form is the only key the index ever sees.
//!
//! Mutations return [`ChangeRecord`] values instead of invoking
//! subscribers themselves; the provider dispatches the records after the
//! transition has committed. Every successful mutation marks the dirty
//! flag through the central [`DirtyState`] guard.

use lingo_core::{name_key, CatalogError, FxHashMap, TranslationGroup};

use crate::dirty::DirtyState;
use crate::events::ChangeRecord;

/// An ordered sequence of translation groups with case-insensitive
/// name uniqueness.
///
/// # Invariants
///
/// - No two groups share a canonical name key.
/// - A group's index is stable until a preceding element is removed.
/// - The index map always mirrors the backing vector.
///
/// # Examples
///
/// ```
/// use lingo_core::TranslationGroup;
/// use lingo_store::TranslationStore;
///
/// let mut store = TranslationStore::new();
/// store.add(TranslationGroup::new("Greeting")).unwrap();
///
/// assert!(store.find("greeting").is_some());
/// assert!(store.add(TranslationGroup::new("GREETING")).is_err());
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TranslationStore {
    groups: Vec<TranslationGroup>,
    index: FxHashMap<String, usize>,
    dirty: DirtyState,
}

impl TranslationStore {
    /// Creates an empty store with a clean dirty flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from loaded groups, keeping the first occurrence of
    /// any duplicated name.
    ///
    /// Duplicates can only come from a hand-edited backing file; they are
    /// dropped with a warning so the uniqueness invariant holds from the
    /// first moment the store exists. The dirty flag starts clean.
    #[must_use]
    pub fn from_groups(groups: impl IntoIterator<Item = TranslationGroup>) -> Self {
        let mut store = Self::new();
        for group in groups {
            let key = group.key();
            if key.is_empty() {
                tracing::warn!("dropping unnamed group from loaded catalog");
                continue;
            }
            if store.index.contains_key(&key) {
                tracing::warn!(name = %group.name, "dropping duplicate group from loaded catalog");
                continue;
            }
            store.index.insert(key, store.groups.len());
            store.groups.push(group);
        }
        store
    }

    /// Looks up a group by name, case-insensitively.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&TranslationGroup> {
        self.groups.get(*self.index.get(&name_key(name))?)
    }

    /// Iterates over groups matching a predicate, in store order.
    pub fn find_all<P>(&self, predicate: P) -> impl Iterator<Item = &TranslationGroup>
    where
        P: Fn(&TranslationGroup) -> bool,
    {
        self.groups.iter().filter(move |g| predicate(g))
    }

    /// Returns the position of the named group, if present.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(&name_key(name)).copied()
    }

    /// Returns `true` if a group with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name_key(name))
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if the store holds no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the groups as a slice, in store order.
    #[must_use]
    pub fn groups(&self) -> &[TranslationGroup] {
        &self.groups
    }

    /// Appends a group.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidArgument`] if the group's name is blank.
    /// - [`CatalogError::GroupAlreadyExists`] if the name collides.
    pub fn add(&mut self, group: TranslationGroup) -> Result<ChangeRecord, CatalogError> {
        let key = group.key();
        if key.is_empty() {
            return Err(CatalogError::invalid_argument("group name is blank"));
        }
        if self.index.contains_key(&key) {
            return Err(CatalogError::GroupAlreadyExists(group.name));
        }

        let index = self.groups.len();
        self.index.insert(key, index);
        self.groups.push(group.clone());
        self.dirty.mark();
        Ok(ChangeRecord::added(index, group))
    }

    /// Appends each group whose name does not yet exist; colliding or
    /// blank-named elements are skipped silently.
    ///
    /// This best-effort asymmetry with [`TranslationStore::add`] is
    /// deliberate: a bulk import must not abort on partial collisions.
    /// One record is returned per accepted element, and the dirty flag is
    /// marked once per accepted element (so an all-skipped batch leaves a
    /// clean store clean).
    pub fn add_range(
        &mut self,
        groups: impl IntoIterator<Item = TranslationGroup>,
    ) -> Vec<ChangeRecord> {
        let mut records = Vec::new();
        for group in groups {
            let key = group.key();
            if key.is_empty() || self.index.contains_key(&key) {
                tracing::debug!(name = %group.name, "skipping group during bulk add");
                continue;
            }
            let index = self.groups.len();
            self.index.insert(key, index);
            self.groups.push(group.clone());
            self.dirty.mark();
            records.push(ChangeRecord::added(index, group));
        }
        records
    }

    /// Renames a group in place, keeping its slot and payload.
    ///
    /// Renaming a group to a different casing of its own name is legal.
    /// Returns the change record and the renamed group.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidArgument`] if either name is blank.
    /// - [`CatalogError::GroupNotExist`] if `old_name` is absent.
    /// - [`CatalogError::GroupAlreadyExists`] if `new_name` collides with a
    ///   different group.
    pub fn rename(
        &mut self,
        old_name: &str,
        new_name: &str,
    ) -> Result<(ChangeRecord, TranslationGroup), CatalogError> {
        let old_key = name_key(old_name);
        let new_key = name_key(new_name);
        if old_key.is_empty() || new_key.is_empty() {
            return Err(CatalogError::invalid_argument("group name is blank"));
        }

        let Some(&index) = self.index.get(&old_key) else {
            return Err(CatalogError::GroupNotExist(old_name.to_owned()));
        };
        if new_key != old_key && self.index.contains_key(&new_key) {
            return Err(CatalogError::GroupAlreadyExists(new_name.to_owned()));
        }

        let Some(group) = self.groups.get_mut(index) else {
            return Err(CatalogError::GroupNotExist(old_name.to_owned()));
        };
        group.name = new_name.to_owned();
        let renamed = group.clone();

        self.index.remove(&old_key);
        self.index.insert(new_key, index);
        self.dirty.mark();
        Ok((ChangeRecord::renamed(index, renamed.clone()), renamed))
    }

    /// Replaces the slot holding `old` with `new` (new identity).
    ///
    /// `old` is resolved by its *current* name; a stale snapshot whose
    /// group was since removed or renamed fails with
    /// [`CatalogError::GroupNotExist`]. Returns the change record and the
    /// stored group.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidArgument`] if the new name is blank.
    /// - [`CatalogError::GroupNotExist`] if `old` does not resolve.
    /// - [`CatalogError::GroupAlreadyExists`] if `new`'s name collides
    ///   with a different group.
    pub fn replace(
        &mut self,
        old: &TranslationGroup,
        new: TranslationGroup,
    ) -> Result<(ChangeRecord, TranslationGroup), CatalogError> {
        let old_key = old.key();
        let new_key = new.key();
        if new_key.is_empty() {
            return Err(CatalogError::invalid_argument("group name is blank"));
        }

        let Some(&index) = self.index.get(&old_key) else {
            return Err(CatalogError::GroupNotExist(old.name.clone()));
        };
        if new_key != old_key && self.index.contains_key(&new_key) {
            return Err(CatalogError::GroupAlreadyExists(new.name));
        }

        let Some(slot) = self.groups.get_mut(index) else {
            return Err(CatalogError::GroupNotExist(old.name.clone()));
        };
        let previous = std::mem::replace(slot, new.clone());

        self.index.remove(&old_key);
        self.index.insert(new_key, index);
        self.dirty.mark();
        Ok((ChangeRecord::replaced(index, previous, new.clone()), new))
    }

    /// Removes the named group.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidArgument`] if the name is blank.
    /// - [`CatalogError::GroupNotExist`] if the name is absent.
    pub fn remove(&mut self, name: &str) -> Result<ChangeRecord, CatalogError> {
        let key = name_key(name);
        if key.is_empty() {
            return Err(CatalogError::invalid_argument("group name is blank"));
        }
        let Some(index) = self.index.remove(&key) else {
            return Err(CatalogError::GroupNotExist(name.to_owned()));
        };

        let removed = self.groups.remove(index);
        // Positions after the removed slot shift down by one.
        for position in self.index.values_mut() {
            if *position > index {
                *position -= 1;
            }
        }
        self.dirty.mark();
        Ok(ChangeRecord::deleted(index, removed))
    }

    /// Empties the store, yielding a single record (no per-item events).
    pub fn clear(&mut self) -> ChangeRecord {
        self.groups.clear();
        self.index.clear();
        self.dirty.mark();
        ChangeRecord::cleared()
    }

    /// Wholesale-replaces the contents from a fresh load and clears the
    /// dirty flag.
    ///
    /// The store is rebuilt, not patched; the single
    /// [`ChangeKind::Reloaded`](crate::ChangeKind::Reloaded) record
    /// signals "everything may have changed" rather than an itemized diff.
    pub fn replace_all(
        &mut self,
        groups: impl IntoIterator<Item = TranslationGroup>,
    ) -> ChangeRecord {
        *self = Self::from_groups(groups);
        ChangeRecord::reloaded()
    }

    /// Returns `true` if unsaved mutations exist.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    /// Clears the dirty flag after a successful persist.
    #[inline]
    pub fn mark_saved(&mut self) {
        self.dirty.clear();
    }

    /// Checks whether a destructive reload may proceed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsavedChanges`] if dirty and not discarding.
    pub const fn guard_reload(&self, discard_changes: bool) -> Result<(), CatalogError> {
        self.dirty.guard_reload(discard_changes)
    }
}

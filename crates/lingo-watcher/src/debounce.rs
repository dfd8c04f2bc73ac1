//! The two-event debounce state machine.
//!
//! A single logical edit of a file by an external program commonly surfaces
//! as a burst of two raw OS notifications (the data write plus a metadata
//! touch, or a temp-file rename onto the target). The [`Debounce`] machine
//! collapses that burst into exactly one [`FileChange::Updated`]:
//!
//! ```text
//!             Changed/Renamed              Changed/Renamed
//!   ┌──────┐ ────────────────► ┌────────────────┐ ─────────────► emit Updated
//!   │ Idle │                   │ PendingConfirm │                back to Idle
//!   └──────┘ ◄──────────────── └────────────────┘
//!                  Removed: from either state, reset + emit Deleted
//! ```
//!
//! This is a coarse two-event debounce, not a time window. It matches the
//! observed write pattern of a single external save and keeps the collapse
//! behavior auditable and testable independent of OS event timing.

/// A raw OS-level notification about the watched file, before debouncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawSignal {
    /// File content (or metadata) was written.
    Changed,
    /// The file was renamed, or another file was renamed onto it.
    ///
    /// Treated identically to [`RawSignal::Changed`] by the debounce
    /// machine, since editors commonly save via rename.
    Renamed,
    /// The file was removed.
    Removed,
}

/// A classified, debounced change to the watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileChange {
    /// The backing file was modified externally.
    Updated,
    /// The backing file was deleted externally.
    Deleted,
}

/// The debounce machine's current position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DebounceState {
    /// No raw signal pending.
    #[default]
    Idle,
    /// One raw changed/renamed signal seen; waiting for its pair.
    PendingConfirm,
}

/// Collapses raw notification bursts into logical [`FileChange`] events.
///
/// Transitions are pure and synchronous; callers that share a machine
/// across threads serialize access behind their own lock.
///
/// # Examples
///
/// ```
/// use lingo_watcher::{Debounce, FileChange, RawSignal};
///
/// let mut debounce = Debounce::new();
///
/// // One logical edit arrives as two raw signals; only the second emits.
/// assert_eq!(debounce.observe(RawSignal::Changed), None);
/// assert_eq!(
///     debounce.observe(RawSignal::Changed),
///     Some(FileChange::Updated)
/// );
///
/// // Deletion always emits, regardless of pending state.
/// assert_eq!(debounce.observe(RawSignal::Changed), None);
/// assert_eq!(
///     debounce.observe(RawSignal::Removed),
///     Some(FileChange::Deleted)
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debounce {
    state: DebounceState,
}

impl Debounce {
    /// Creates a machine in the [`DebounceState::Idle`] state.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DebounceState::Idle,
        }
    }

    /// Feeds one raw signal through the machine.
    ///
    /// Returns the logical change to deliver, if the signal completes one:
    ///
    /// - `Changed`/`Renamed` in `Idle` arms `PendingConfirm`, emits nothing.
    /// - `Changed`/`Renamed` in `PendingConfirm` resets to `Idle` and emits
    ///   [`FileChange::Updated`].
    /// - `Removed` unconditionally resets to `Idle` and emits
    ///   [`FileChange::Deleted`].
    pub fn observe(&mut self, signal: RawSignal) -> Option<FileChange> {
        match signal {
            RawSignal::Changed | RawSignal::Renamed => match self.state {
                DebounceState::Idle => {
                    self.state = DebounceState::PendingConfirm;
                    None
                }
                DebounceState::PendingConfirm => {
                    self.state = DebounceState::Idle;
                    Some(FileChange::Updated)
                }
            },
            RawSignal::Removed => {
                self.state = DebounceState::Idle;
                Some(FileChange::Deleted)
            }
        }
    }

    /// Drops any pending half-burst and returns to [`DebounceState::Idle`].
    #[inline]
    pub fn reset(&mut self) {
        self.state = DebounceState::Idle;
    }

    /// Returns the machine's current state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> DebounceState {
        self.state
    }
}

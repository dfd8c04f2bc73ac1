//! Arming an OS-level watch on one specific file.
//!
//! [`FileWatch`] registers a `notify` watcher on the *parent directory* of
//! the target file (non-recursively), filters raw events down to the exact
//! target, and classifies them into [`RawSignal`]s delivered to a
//! caller-supplied handler. Watching the directory rather than the file
//! itself keeps signals flowing across editors that save via
//! delete-and-recreate or temp-file rename.
//!
//! The handler runs on the notify callback thread, concurrently with the
//! arming thread; it is the caller's job to serialize shared state (the
//! provider routes every signal through its own mutex before acting).
//!
//! Debouncing is deliberately *not* applied here: raw signals feed the
//! [`Debounce`](crate::Debounce) machine owned by whatever state boundary
//! the caller uses, so the machine's transitions stay under the same lock
//! as the rest of the catalog state.

use camino::{Utf8Path, Utf8PathBuf};
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::debounce::RawSignal;
use crate::error::WatchError;

/// Maps a notify event kind to the raw signal vocabulary, if relevant.
///
/// Access events never matter; create events count as changes because a
/// deleted-and-recreated file is, from the catalog's perspective, a
/// modification of the backing data.
#[must_use]
pub fn classify(kind: &EventKind) -> Option<RawSignal> {
    match kind {
        EventKind::Modify(ModifyKind::Name(_)) => Some(RawSignal::Renamed),
        EventKind::Create(_) | EventKind::Modify(_) => Some(RawSignal::Changed),
        EventKind::Remove(_) => Some(RawSignal::Removed),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
    }
}

/// An armed OS watch on a single file.
///
/// Arming registers the OS callback; [`FileWatch::disarm`] (or dropping
/// the value) deterministically unregisters it. There is no reliance on
/// nondeterministic finalization: once `disarm` returns, no further
/// signals are delivered, and a new watch may be armed on the same path.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use lingo_watcher::{FileWatch, RawSignal};
///
/// let watch = FileWatch::arm(Utf8Path::new("/app/Translations/main.json"), |signal| {
///     println!("raw signal: {signal:?}");
/// })?;
///
/// // ... later ...
/// watch.disarm();
/// # Ok::<(), lingo_watcher::WatchError>(())
/// ```
pub struct FileWatch {
    watcher: RecommendedWatcher,
    watched_dir: Utf8PathBuf,
    target: Utf8PathBuf,
}

impl std::fmt::Debug for FileWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWatch")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl FileWatch {
    /// Arms a watch on the given file, delivering raw signals to `handler`.
    ///
    /// The handler is invoked from the notify callback thread for every
    /// relevant event whose path names the target file.
    ///
    /// # Errors
    ///
    /// - [`WatchError::PathNotFound`] if the file does not exist.
    /// - [`WatchError::Notify`] if the OS watcher fails to initialize.
    /// - [`WatchError::Io`] if the path cannot be canonicalized.
    pub fn arm<H>(path: &Utf8Path, handler: H) -> Result<Self, WatchError>
    where
        H: Fn(RawSignal) + Send + 'static,
    {
        if !path.is_file() {
            return Err(WatchError::path_not_found(path));
        }
        let target = path.canonicalize_utf8().map_err(WatchError::Io)?;
        let watched_dir = target
            .parent()
            .ok_or_else(|| WatchError::path_not_found(&target))?
            .to_owned();

        let file_name = target
            .file_name()
            .ok_or_else(|| WatchError::path_not_found(&target))?
            .to_owned();

        let mut watcher =
            notify::recommended_watcher(move |result: Result<Event, notify::Error>| {
                match result {
                    Ok(event) => {
                        let ours = event
                            .paths
                            .iter()
                            .any(|p| p.file_name().is_some_and(|n| n == file_name.as_str()));
                        if !ours {
                            return;
                        }
                        if let Some(signal) = classify(&event.kind) {
                            tracing::trace!(?signal, kind = ?event.kind, "raw file signal");
                            handler(signal);
                        }
                    }
                    Err(error) => {
                        tracing::warn!(error = %error, "file watch backend error");
                    }
                }
            })?;

        watcher.watch(watched_dir.as_std_path(), RecursiveMode::NonRecursive)?;
        tracing::debug!(target = %target, "file watch armed");

        Ok(Self {
            watcher,
            watched_dir,
            target,
        })
    }

    /// Returns the canonical path of the watched file.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &Utf8Path {
        &self.target
    }

    /// Unregisters the OS callback and consumes the watch.
    ///
    /// Dropping the value has the same effect; `disarm` exists so the
    /// release point reads explicitly at call sites.
    pub fn disarm(mut self) {
        // Unwatch may fail if the directory vanished; dropping the backend
        // below releases the OS registration either way.
        if let Err(error) = self.watcher.unwatch(self.watched_dir.as_std_path()) {
            tracing::debug!(error = %error, "unwatch on disarm failed");
        }
        tracing::debug!(target = %self.target, "file watch disarmed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::fs;
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn wait_for<F: Fn() -> bool>(condition: F) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(25));
        }
        condition()
    }

    #[test]
    fn test_arm_missing_file_fails() {
        let result = FileWatch::arm(Utf8Path::new("/no/such/file.json"), |_| {});
        assert!(matches!(result, Err(WatchError::PathNotFound(_))));
    }

    #[test]
    fn test_classify_event_kinds() {
        use notify::event::{CreateKind, DataChange, RemoveKind, RenameMode};

        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Data(DataChange::Any))),
            Some(RawSignal::Changed)
        );
        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Name(RenameMode::To))),
            Some(RawSignal::Renamed)
        );
        assert_eq!(
            classify(&EventKind::Create(CreateKind::File)),
            Some(RawSignal::Changed)
        );
        assert_eq!(
            classify(&EventKind::Remove(RemoveKind::File)),
            Some(RawSignal::Removed)
        );
        assert_eq!(classify(&EventKind::Any), None);
    }

    #[test]
    fn test_armed_watch_delivers_signals_for_target_only() {
        let tmp = TempDir::new().unwrap();
        let root = Utf8Path::from_path(tmp.path()).unwrap();
        let target = root.join("main.json");
        let other = root.join("other.json");
        fs::write(&target, "[]").unwrap();
        fs::write(&other, "[]").unwrap();

        let seen: Arc<Mutex<Vec<RawSignal>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let watch = FileWatch::arm(&target, move |signal| sink.lock().push(signal)).unwrap();

        fs::write(&other, "[1]").unwrap();
        fs::write(&target, "[2]").unwrap();

        // OS event delivery is best-effort; only assert on what arrived.
        let got_any = wait_for(|| !seen.lock().is_empty());
        watch.disarm();

        if got_any {
            assert!(seen
                .lock()
                .iter()
                .all(|s| matches!(s, RawSignal::Changed | RawSignal::Renamed)));
        }
    }

    #[test]
    fn test_disarm_then_rearm() {
        let tmp = TempDir::new().unwrap();
        let root = Utf8Path::from_path(tmp.path()).unwrap();
        let target = root.join("main.json");
        fs::write(&target, "[]").unwrap();

        let watch = FileWatch::arm(&target, |_| {}).unwrap();
        watch.disarm();

        let watch = FileWatch::arm(&target, |_| {}).unwrap();
        assert!(watch.target().as_str().ends_with("main.json"));
        watch.disarm();
    }
}

//! Single-file change detection with two-event debouncing.
//!
//! This crate watches exactly one file for external edits and distills the
//! noisy OS notification stream into two logical events: the file was
//! *updated*, or the file was *deleted*.
//!
//! # Architecture
//!
//! ```text
//! OS notification (notify crate, parent-directory watch)
//!        │
//!        ▼
//!   path filter + classify            lingo_watcher::watch
//!        │  RawSignal
//!        ▼
//!   two-event debounce machine        lingo_watcher::debounce
//!        │  FileChange
//!        ▼
//!   caller's subscribers
//! ```
//!
//! The pieces are deliberately separable: [`FileWatch`] delivers
//! [`RawSignal`]s from the OS callback thread, while the pure [`Debounce`]
//! machine is owned by the caller so its transitions can live behind the
//! same lock as the rest of the caller's state (and be tested without any
//! filesystem at all).
//!
//! # Usage
//!
//! ```no_run
//! use camino::Utf8Path;
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//! use lingo_watcher::{Debounce, FileChange, FileWatch};
//!
//! let debounce = Arc::new(Mutex::new(Debounce::new()));
//! let machine = Arc::clone(&debounce);
//!
//! let watch = FileWatch::arm(Utf8Path::new("Translations/main.json"), move |signal| {
//!     if let Some(change) = machine.lock().observe(signal) {
//!         match change {
//!             FileChange::Updated => println!("file edited externally"),
//!             FileChange::Deleted => println!("file deleted externally"),
//!         }
//!     }
//! })?;
//!
//! // ... watch.disarm() releases the OS callback deterministically.
//! # Ok::<(), lingo_watcher::WatchError>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod debounce;
pub mod error;
pub mod watch;

pub use debounce::{Debounce, DebounceState, FileChange, RawSignal};
pub use error::WatchError;
pub use watch::{classify, FileWatch};

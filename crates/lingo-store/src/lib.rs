//! File-backed translation catalog: in-memory store, JSON persistence,
//! change notification, and external-change watching.
//!
//! The public entry point is [`Catalog`], a provider bound to one JSON
//! backing file for its whole lifetime. Underneath it:
//!
//! - [`TranslationStore`]: the ordered, name-keyed group collection with
//!   case-insensitive uniqueness and the dirty flag.
//! - [`persistence`]: the load/save gateway (missing-is-empty decode,
//!   temp-then-rename writes, I/O-failure-as-boolean saves).
//! - [`Notifier`]: synchronous multicast delivery of [`ChangeRecord`]
//!   mutation events and [`FileChange`] data-source events.
//! - `lingo-watcher`'s debounced file watch, armed per catalog.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use lingo_core::{Translation, TranslationGroup};
//! use lingo_store::Catalog;
//!
//! let catalog = Catalog::create(Utf8Path::new("/app"), "main")?;
//!
//! let mut greeting = TranslationGroup::new("greeting");
//! greeting.push(Translation::new("en", "Hello"));
//! greeting.push(Translation::new("fr", "Bonjour"));
//! catalog.add(greeting)?;
//!
//! assert!(catalog.save()?);
//! # Ok::<(), lingo_core::CatalogError>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod dirty;
mod events;
mod notifier;
pub mod persistence;
mod provider;
mod store;

pub use dirty::DirtyState;
pub use events::{ChangeKind, ChangeRecord};
pub use notifier::{Notifier, SubscriptionId};
pub use provider::Catalog;
pub use store::TranslationStore;

pub use lingo_watcher::{FileChange, WatchError};

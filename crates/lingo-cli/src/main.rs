//! CLI entry point for the lingo translation catalog.
//!
//! This binary manages JSON-backed translation catalogs laid out as
//! `<root>/Translations/<name>.json`.
//!
//! # Usage
//!
//! ```bash
//! lingo [OPTIONS] <COMMAND>
//!
//! # Create a catalog and add a group
//! lingo init main
//! lingo add main greeting en="Hello" fr="Bonjour"
//!
//! # Inspect
//! lingo list main
//! lingo show main greeting
//!
//! # Follow external edits, reloading as the file changes
//! lingo watch main
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;
use std::sync::mpsc;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use lingo_core::{CatalogConfig, Translation, TranslationGroup, WatchConfig};
use lingo_store::{Catalog, FileChange};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Manages JSON-backed translation catalogs.
///
/// Catalogs live under `<root>/Translations/<name>.json`; every command
/// takes the catalog name and resolves it against the root.
#[derive(Parser)]
#[command(name = "lingo", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Project root holding the `Translations` directory.
    ///
    /// Defaults to the current directory if not specified.
    #[arg(short, long, global = true, env = "LINGO_ROOT", default_value = ".")]
    root: Utf8PathBuf,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Create an empty catalog (and the Translations directory) if absent.
    Init {
        /// Catalog name.
        name: String,
    },

    /// List the groups in a catalog.
    List {
        /// Catalog name.
        name: String,
    },

    /// Show one group with all its translations.
    Show {
        /// Catalog name.
        name: String,
        /// Group name (case-insensitive).
        group: String,
    },

    /// Add a group with translations given as `lang=text` pairs.
    Add {
        /// Catalog name.
        name: String,
        /// Group name.
        group: String,
        /// Translations, e.g. `en="Hello"` `fr="Bonjour"`.
        #[arg(value_parser = parse_translation)]
        translations: Vec<Translation>,
    },

    /// Rename a group, keeping its translations.
    Rename {
        /// Catalog name.
        name: String,
        /// Current group name.
        old: String,
        /// New group name.
        new: String,
    },

    /// Remove a group.
    Remove {
        /// Catalog name.
        name: String,
        /// Group name (case-insensitive).
        group: String,
    },

    /// Remove every group from a catalog.
    Clear {
        /// Catalog name.
        name: String,
    },

    /// Merge groups from another catalog file (collisions are skipped).
    Merge {
        /// Catalog name.
        name: String,
        /// Path to the catalog file to merge from.
        from: Utf8PathBuf,
    },

    /// Export the catalog to another JSON file without rebinding.
    Export {
        /// Catalog name.
        name: String,
        /// Destination path (must end in `.json`).
        output: Utf8PathBuf,
    },

    /// Follow external edits to the backing file, reloading on change.
    Watch {
        /// Catalog name.
        name: String,
        /// Skip the backup snapshot normally written when the file is
        /// deleted externally.
        #[arg(long)]
        no_backup: bool,
    },
}

/// Parses a `lang=text` pair into a [`Translation`].
fn parse_translation(raw: &str) -> Result<Translation, String> {
    let (lang, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected lang=text, got '{raw}'"))?;
    if lang.trim().is_empty() {
        return Err(format!("blank language code in '{raw}'"));
    }
    Ok(Translation::new(lang.trim(), text))
}

// =============================================================================
// INITIALIZATION
// =============================================================================

/// Builds a [`CatalogConfig`] from CLI arguments.
///
/// Watch settings stay at their defaults here; the `watch` command enables
/// them from its own flags before running.
fn build_config(cli: &Cli) -> CatalogConfig {
    CatalogConfig {
        root: cli.root.clone(),
        watch: WatchConfig::default(),
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `warn` level by default so
/// command output stays clean.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(format!("{level},notify=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Creates the catalog file (and layout) if it does not exist yet.
fn run_init(root: &Utf8Path, name: &str) -> color_eyre::Result<()> {
    let catalog = Catalog::create(root, name)?;
    info!(file = %catalog.file(), "catalog ready");

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "Catalog ready: {}", catalog.file().path())?;
    Ok(())
}

/// Lists group names with their translation counts.
fn run_list(root: &Utf8Path, name: &str) -> color_eyre::Result<()> {
    let catalog = Catalog::open(root, name)?;
    let groups = catalog.groups();

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{} ({} groups)", catalog.file(), groups.len())?;
    for group in &groups {
        writeln!(
            handle,
            "  {}  [{} translations]",
            group.name,
            group.translations.len()
        )?;
    }
    Ok(())
}

/// Shows one group with all its translations.
fn run_show(root: &Utf8Path, name: &str, group_name: &str) -> color_eyre::Result<()> {
    let catalog = Catalog::open(root, name)?;
    let Some(group) = catalog.find(group_name) else {
        return Err(color_eyre::eyre::eyre!(
            "group '{group_name}' not found in catalog '{name}'"
        ));
    };

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", group.name)?;
    for translation in &group.translations {
        writeln!(
            handle,
            "  {:>8}  {}",
            translation.language_code, translation.text
        )?;
    }
    Ok(())
}

/// Adds a group and saves the catalog.
fn run_add(
    root: &Utf8Path,
    name: &str,
    group_name: &str,
    translations: Vec<Translation>,
) -> color_eyre::Result<()> {
    let catalog = Catalog::open(root, name)?;
    catalog.add(TranslationGroup::with_translations(
        group_name,
        translations,
    ))?;
    save_or_bail(&catalog)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "Added '{group_name}' to {}", catalog.file())?;
    Ok(())
}

/// Renames a group and saves the catalog.
fn run_rename(root: &Utf8Path, name: &str, old: &str, new: &str) -> color_eyre::Result<()> {
    let catalog = Catalog::open(root, name)?;
    let renamed = catalog.rename(old, new)?;
    save_or_bail(&catalog)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "Renamed '{old}' to '{}'", renamed.name)?;
    Ok(())
}

/// Removes a group and saves the catalog.
fn run_remove(root: &Utf8Path, name: &str, group_name: &str) -> color_eyre::Result<()> {
    let catalog = Catalog::open(root, name)?;
    catalog.remove(group_name)?;
    save_or_bail(&catalog)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "Removed '{group_name}'")?;
    Ok(())
}

/// Empties the catalog and saves it.
fn run_clear(root: &Utf8Path, name: &str) -> color_eyre::Result<()> {
    let catalog = Catalog::open(root, name)?;
    let count = catalog.len();
    catalog.clear()?;
    save_or_bail(&catalog)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "Cleared {count} groups from {}", catalog.file())?;
    Ok(())
}

/// Merges another catalog file into this one and saves.
fn run_merge(root: &Utf8Path, name: &str, from: &Utf8Path) -> color_eyre::Result<()> {
    let catalog = Catalog::open(root, name)?;
    let added = catalog.load_merge(from)?;
    if added > 0 {
        save_or_bail(&catalog)?;
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "Merged {added} groups from {from}")?;
    Ok(())
}

/// Exports the catalog to another file without rebinding.
fn run_export(root: &Utf8Path, name: &str, output: &Utf8Path) -> color_eyre::Result<()> {
    let catalog = Catalog::open(root, name)?;
    if !catalog.save_as(output)? {
        return Err(color_eyre::eyre::eyre!("could not write {output}"));
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "Exported {} groups to {output}", catalog.len())?;
    Ok(())
}

/// Follows external edits until stdin closes (or Enter is pressed).
///
/// An external update reloads the catalog in place; an external delete is
/// reported along with the backup snapshot location when one was written.
fn run_watch(config: &CatalogConfig, name: &str) -> color_eyre::Result<()> {
    let mut catalog = Catalog::open(&config.root, name)?;
    let backup_path = catalog.file().backup_path();

    let (sender, receiver) = mpsc::channel::<FileChange>();
    catalog.subscribe_source(move |change| {
        // The watch thread only forwards; all printing and reloading
        // happens off the notify callback.
        let _ = sender.send(*change);
    });
    if config.watch.enabled {
        catalog.watch(config.watch.backup_on_delete)?;
    }

    let stdout = std::io::stdout();
    {
        let mut handle = stdout.lock();
        writeln!(handle, "Watching {} (press Enter to stop)", catalog.file())?;
    }

    let catalog = Arc::new(catalog);
    let worker = Arc::clone(&catalog);
    std::thread::spawn(move || {
        while let Ok(change) = receiver.recv() {
            match change {
                FileChange::Updated => match worker.reload(true) {
                    Ok(()) => info!(groups = worker.len(), "reloaded after external update"),
                    Err(error) => tracing::warn!(%error, "reload after external update failed"),
                },
                FileChange::Deleted => {
                    tracing::warn!("backing file was deleted externally");
                }
            }
        }
    });

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    let mut handle = stdout.lock();
    if config.watch.backup_on_delete && backup_path.is_file() {
        writeln!(handle, "Last backup snapshot: {backup_path}")?;
    }
    writeln!(handle, "Stopped watching")?;
    Ok(())
}

/// Saves the catalog, turning the boolean I/O outcome into a hard error
/// for CLI purposes.
fn save_or_bail(catalog: &Catalog) -> color_eyre::Result<()> {
    if !catalog.save()? {
        return Err(color_eyre::eyre::eyre!(
            "could not write {}",
            catalog.file().path()
        ));
    }
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // Install color-eyre first (before any potential panics)
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);
    let mut config = build_config(&cli);

    match cli.command {
        Commands::Init { name } => run_init(&config.root, &name),
        Commands::List { name } => run_list(&config.root, &name),
        Commands::Show { name, group } => run_show(&config.root, &name, &group),
        Commands::Add {
            name,
            group,
            translations,
        } => run_add(&config.root, &name, &group, translations),
        Commands::Rename { name, old, new } => run_rename(&config.root, &name, &old, &new),
        Commands::Remove { name, group } => run_remove(&config.root, &name, &group),
        Commands::Clear { name } => run_clear(&config.root, &name),
        Commands::Merge { name, from } => run_merge(&config.root, &name, &from),
        Commands::Export { name, output } => run_export(&config.root, &name, &output),
        Commands::Watch { name, no_backup } => {
            config.watch.enabled = true;
            config.watch.backup_on_delete = !no_backup;
            run_watch(&config, &name)
        }
    }
}

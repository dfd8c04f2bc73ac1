//! Build automation tasks for the lingo workspace.
//!
//! Run with: `cargo xt <command>`
//!
//! # Available Commands
//!
//! - `check`: Run all checks (fmt, clippy, test)
//! - `fmt`: Format code with rustfmt
//! - `lint`: Run clippy with all targets
//! - `test`: Run all tests
//! - `build`: Build release binary
//! - `clean`: Clean build artifacts
//! - `doc`: Generate documentation

// xtask is a build tool - printing to stderr is expected
#![allow(clippy::print_stderr)]

use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

/// Build automation for lingo
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for lingo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks (fmt --check, clippy, test)
    Check,
    /// Format code with rustfmt
    Fmt {
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
    },
    /// Run clippy lints
    Lint {
        /// Automatically fix lint warnings
        #[arg(long)]
        fix: bool,
    },
    /// Run all tests
    Test {
        /// Run tests with release optimizations
        #[arg(long)]
        release: bool,
    },
    /// Build release binary
    Build {
        /// Build in debug mode
        #[arg(long)]
        debug: bool,
    },
    /// Clean build artifacts
    Clean,
    /// Generate documentation
    Doc {
        /// Open in browser after building
        #[arg(long)]
        open: bool,
    },
}

/// Expands a command into the cargo invocations it runs, in order.
///
/// Kept separate from execution so the mapping is testable without
/// spawning processes.
fn plan(command: &Commands) -> Vec<Vec<String>> {
    match command {
        Commands::Check => vec![
            cargo_args(&["fmt", "--all", "--check"]),
            cargo_args(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]),
            cargo_args(&["test", "--workspace"]),
        ],
        Commands::Fmt { check } => {
            let mut args = cargo_args(&["fmt", "--all"]);
            if *check {
                args.push("--check".to_owned());
            }
            vec![args]
        }
        Commands::Lint { fix } => {
            let mut args = cargo_args(&["clippy", "--workspace", "--all-targets"]);
            if *fix {
                args.push("--fix".to_owned());
                args.push("--allow-dirty".to_owned());
            }
            args.extend(cargo_args(&["--", "-D", "warnings"]));
            vec![args]
        }
        Commands::Test { release } => {
            let mut args = cargo_args(&["test", "--workspace"]);
            if *release {
                args.push("--release".to_owned());
            }
            vec![args]
        }
        Commands::Build { debug } => {
            let mut args = cargo_args(&["build", "--workspace"]);
            if !debug {
                args.push("--release".to_owned());
            }
            vec![args]
        }
        Commands::Clean => vec![cargo_args(&["clean"])],
        Commands::Doc { open } => {
            let mut args = cargo_args(&["doc", "--workspace", "--no-deps"]);
            if *open {
                args.push("--open".to_owned());
            }
            vec![args]
        }
    }
}

fn cargo_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| (*a).to_owned()).collect()
}

/// Runs one cargo invocation, failing on a non-zero exit status.
fn run_cargo(args: &[String]) -> Result<()> {
    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_owned());
    eprintln!("xtask: {} {}", cargo, args.join(" "));

    let status = Command::new(&cargo)
        .args(args)
        .status()
        .with_context(|| format!("failed to spawn {cargo}"))?;
    if !status.success() {
        bail!("cargo {} exited with {status}", args[0]);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    for invocation in plan(&cli.command) {
        run_cargo(&invocation)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_plans_fmt_clippy_test_in_order() {
        let invocations = plan(&Commands::Check);
        let first: Vec<&str> = invocations.iter().map(|i| i[0].as_str()).collect();
        assert_eq!(first, vec!["fmt", "clippy", "test"]);
    }

    #[test]
    fn test_fmt_check_flag_appended() {
        let invocations = plan(&Commands::Fmt { check: true });
        assert_eq!(invocations.len(), 1);
        assert!(invocations[0].contains(&"--check".to_owned()));

        let invocations = plan(&Commands::Fmt { check: false });
        assert!(!invocations[0].contains(&"--check".to_owned()));
    }

    #[test]
    fn test_lint_fix_keeps_deny_warnings_last() {
        let invocations = plan(&Commands::Lint { fix: true });
        let args = &invocations[0];
        assert!(args.contains(&"--fix".to_owned()));
        assert_eq!(args.last().map(String::as_str), Some("warnings"));
    }

    #[test]
    fn test_build_defaults_to_release() {
        let invocations = plan(&Commands::Build { debug: false });
        assert!(invocations[0].contains(&"--release".to_owned()));

        let invocations = plan(&Commands::Build { debug: true });
        assert!(!invocations[0].contains(&"--release".to_owned()));
    }
}

//! jsdoc-defaults: sync `@default` tags in declaration files with runtime defaults.
//!
//! Three commands:
//!
//! - `inject`: write missing or stale `@default` tags (in place, or `--dry-run`)
//! - `check`: report every stale tag and exit non-zero if any exist
//! - `preview`: print one declaration, with its doc comment
//!
//! Targets come from flags (`--file`, `--interface`, `--defaults`) or from a
//! `jsdoc-defaults.toml` found by walking up from the working directory.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use jsdoc_defaults::config::{self, Overrides, Settings, Target};
use jsdoc_defaults::{check, defaults, extract_block, inject, locate, DefaultTag};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsdoc-defaults",
    about = "Keep @default annotations in declaration files in sync with runtime defaults"
)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file. Defaults to the nearest jsdoc-defaults.toml upward.
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct TargetArgs {
    /// Declaration file or glob pattern (repeatable)
    #[arg(short = 'f', long = "file")]
    files: Vec<String>,

    /// Interface whose members get annotated
    #[arg(short = 'i', long)]
    interface: Option<String>,

    /// JSON or TOML file holding the defaults
    #[arg(short = 'd', long)]
    defaults: Option<PathBuf>,

    /// Dotted path to the defaults object inside the defaults file
    #[arg(short = 'e', long)]
    export: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Write @default tags into the declaration files
    Inject {
        #[command(flatten)]
        target: TargetArgs,

        /// Tag to write: default or defaultValue
        #[arg(short = 't', long)]
        tag: Option<DefaultTag>,

        /// Print the updated declarations instead of writing files
        #[arg(long)]
        dry_run: bool,

        /// Fail when a default has no matching property or interface
        #[arg(long)]
        strict: bool,
    },

    /// Verify @default tags without modifying anything
    Check {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print a declaration block
    Preview {
        /// Declaration file
        #[arg(short = 'f', long)]
        file: PathBuf,

        /// Interface or type alias name (a dotted prefix is ignored)
        #[arg(short = 't', long = "type")]
        type_name: String,

        /// Leave out the leading doc comment
        #[arg(long)]
        no_jsdoc: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Inject {
            target,
            tag,
            dry_run,
            strict,
        } => {
            let settings = settings(cli.config.as_deref(), target, tag)?;
            inject_mode(&settings, dry_run, strict)
        }
        Command::Check { target } => {
            let settings = settings(cli.config.as_deref(), target, None)?;
            check_mode(&settings)
        }
        Command::Preview {
            file,
            type_name,
            no_jsdoc,
        } => preview_mode(&file, &type_name, !no_jsdoc),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Merge flags with the config file (explicit, or discovered upward).
fn settings(
    config_path: Option<&Path>,
    args: TargetArgs,
    tag: Option<DefaultTag>,
) -> Result<Settings> {
    let path = match config_path {
        Some(p) => Some(p.to_path_buf()),
        None => {
            let cwd = std::env::current_dir().context("failed to read working directory")?;
            config::discover(&cwd)
        }
    };
    let config = match path {
        Some(p) => {
            tracing::info!(config = %p.display(), "using config");
            Some(config::load(&p)?)
        }
        None => None,
    };
    let overrides = Overrides {
        files: args.files,
        interface: args.interface,
        defaults: args.defaults,
        export: args.export,
        tag,
    };
    Ok(config::resolve(config, overrides)?)
}

/// A declaration file and its contents.
struct Source {
    path: PathBuf,
    text: String,
}

/// Read every file of a target that declares its interface.
fn target_sources(target: &Target) -> Result<Vec<Source>> {
    let mut sources = Vec::new();
    for path in resolve_files(&target.files)? {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if locate::find_interface_body(&text, &target.interface).is_some() {
            sources.push(Source { path, text });
        } else {
            tracing::debug!(file = %path.display(), interface = %target.interface, "interface not declared here");
        }
    }
    Ok(sources)
}

fn inject_mode(settings: &Settings, dry_run: bool, strict: bool) -> Result<()> {
    let mut problems = 0;

    for target in &settings.targets {
        let defaults = defaults::load(&target.defaults, target.export.as_deref())?;
        let sources = target_sources(target)?;
        if sources.is_empty() {
            eprintln!(
                "warning: interface {} not found in {}",
                target.interface,
                target.files.join(", ")
            );
            problems += 1;
            continue;
        }

        for source in sources {
            let report = inject(&source.text, &target.interface, &defaults, settings.tag);
            for missing in &report.missing {
                eprintln!(
                    "warning: {}: {}.{} is not a property of the interface",
                    source.path.display(),
                    missing.interface,
                    missing.property
                );
                problems += 1;
            }

            if report.updated == 0 {
                tracing::info!(file = %source.path.display(), "up to date");
                continue;
            }

            let noun = if report.updated == 1 { "property" } else { "properties" };
            if dry_run {
                println!(
                    "would update {}: {} {}",
                    source.path.display(),
                    report.updated,
                    noun
                );
                if let Some(block) = extract_block(&report.text, &target.interface, true) {
                    println!("{}", block);
                }
            } else {
                fs::write(&source.path, &report.text)
                    .with_context(|| format!("failed to write {}", source.path.display()))?;
                println!("updated {}: {} {}", source.path.display(), report.updated, noun);
            }
        }
    }

    if strict && problems > 0 {
        bail!("{} default(s) could not be placed", problems);
    }
    Ok(())
}

fn check_mode(settings: &Settings) -> Result<()> {
    let mut mismatches = 0;

    for target in &settings.targets {
        let defaults = defaults::load(&target.defaults, target.export.as_deref())?;
        let sources = target_sources(target)?;
        if sources.is_empty() {
            // Every requested key counts as a mismatch.
            for outcome in check("", &target.interface, &defaults).mismatches {
                eprintln!("{}: interface not found", outcome);
                mismatches += 1;
            }
            continue;
        }

        for source in &sources {
            let report = check(&source.text, &target.interface, &defaults);
            for outcome in &report.mismatches {
                eprintln!("{}: {}", source.path.display(), outcome);
            }
            mismatches += report.mismatches.len();
            if report.ok() {
                tracing::info!(file = %source.path.display(), "defaults documented");
            }
        }
    }

    if mismatches > 0 {
        bail!("{} default mismatch(es)", mismatches);
    }
    println!("all defaults documented");
    Ok(())
}

fn preview_mode(file: &Path, type_name: &str, include_doc: bool) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let Some(block) = extract_block(&text, type_name, include_doc) else {
        bail!("declaration {} not found in {}", type_name, file.display());
    };
    println!("{}", block);
    Ok(())
}

/// File suffixes picked up when a target names a directory.
const DECLARATION_SUFFIXES: &[&str] = &[".d.ts", ".d.mts", ".d.cts", ".ts"];

fn is_declaration_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| DECLARATION_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

/// Resolve a target's `files` entries: plain paths, directories (their
/// declaration files, one level deep) and glob patterns.
fn resolve_files(entries: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for entry in entries {
        let path = Path::new(entry);
        if path.is_file() {
            files.insert(path.to_path_buf());
            continue;
        }
        let (pattern, declarations_only) = if path.is_dir() {
            (path.join("*").to_string_lossy().into_owned(), true)
        } else {
            (entry.clone(), false)
        };
        let hits: Vec<PathBuf> = glob::glob(&pattern)
            .with_context(|| format!("invalid file pattern: {}", entry))?
            .filter_map(|hit| hit.ok())
            .filter(|p| p.is_file() && (!declarations_only || is_declaration_file(p)))
            .collect();
        if hits.is_empty() {
            tracing::warn!(entry = %entry, "no declaration files matched");
        }
        files.extend(hits);
    }
    Ok(files.into_iter().collect())
}

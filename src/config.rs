//! Configuration: `jsdoc-defaults.toml` plus command-line overrides.
//!
//! The file lists targets (declaration files, interface, defaults source).
//! Flags on the command line describe a single ad-hoc target and win over
//! the file.

use crate::doc::DefaultTag;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "jsdoc-defaults.toml";

/// Contents of a configuration file.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tag written on injection.
    pub tag: Option<DefaultTag>,
    #[serde(rename = "target")]
    pub targets: Vec<Target>,
}

/// One interface to keep in sync with one defaults object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Target {
    /// Declaration files: plain paths or glob patterns.
    pub files: Vec<String>,
    pub interface: String,
    /// JSON or TOML document holding the defaults.
    pub defaults: PathBuf,
    /// Dotted path to the defaults object inside that document.
    #[serde(default)]
    pub export: Option<String>,
}

impl Target {
    /// Make relative file patterns and the defaults path relative to `base`.
    fn rebase(mut self, base: &Path) -> Target {
        self.files = self
            .files
            .into_iter()
            .map(|f| {
                if Path::new(&f).is_absolute() {
                    f
                } else {
                    base.join(f).to_string_lossy().into_owned()
                }
            })
            .collect();
        if self.defaults.is_relative() {
            self.defaults = base.join(&self.defaults);
        }
        self
    }
}

/// Target-related command-line flags.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub files: Vec<String>,
    pub interface: Option<String>,
    pub defaults: Option<PathBuf>,
    pub export: Option<String>,
    pub tag: Option<DefaultTag>,
}

impl Overrides {
    fn describes_target(&self) -> bool {
        !self.files.is_empty() || self.interface.is_some() || self.defaults.is_some()
    }
}

/// What a run works on once config and flags are merged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub tag: DefaultTag,
    pub targets: Vec<Target>,
}

/// Walk up from `start` looking for [`CONFIG_FILENAME`].
pub fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}

/// Load a configuration file; relative paths inside it are resolved
/// against the file's directory.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(Config {
        tag: config.tag,
        targets: config.targets.into_iter().map(|t| t.rebase(base)).collect(),
    })
}

/// Merge flags over an optional config file.
pub fn resolve(config: Option<Config>, overrides: Overrides) -> Result<Settings, ConfigError> {
    let config = config.unwrap_or_default();
    let tag = overrides.tag.or(config.tag).unwrap_or_default();

    if overrides.describes_target() {
        if overrides.files.is_empty() {
            return Err(ConfigError::IncompleteTarget("--file"));
        }
        let interface = overrides
            .interface
            .ok_or(ConfigError::IncompleteTarget("--interface"))?;
        let defaults = overrides
            .defaults
            .ok_or(ConfigError::IncompleteTarget("--defaults"))?;
        return Ok(Settings {
            tag,
            targets: vec![Target {
                files: overrides.files,
                interface,
                defaults,
                export: overrides.export,
            }],
        });
    }

    if config.targets.is_empty() {
        return Err(ConfigError::NoTargets);
    }
    let targets = match overrides.export {
        Some(export) => config
            .targets
            .into_iter()
            .map(|t| Target {
                export: Some(export.clone()),
                ..t
            })
            .collect(),
        None => config.targets,
    };
    Ok(Settings { tag, targets })
}

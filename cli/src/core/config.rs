//! # PackRS Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates PackRS configuration. Settings
//! cover which codec new archives use and how `packrs extract` behaves by
//! default.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. The file named by the `PACKRS_CONFIG` environment variable, if set
//!    (used on its own, no merging)
//! 2. Project-specific `.packrs.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! Paths are tilde-expanded and the result is validated before use.
//!
//! ## Examples
//!
//! ```toml
//! [archive]
//! codec = "rle"
//!
//! [extract]
//! directory = "~/unpacked"
//! overwrite = false
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let codec = cfg.codec_kind()?;
//! let out_dir = PathBuf::from(&cfg.extract.directory);
//! ```
//!
use crate::common::codec::CodecKind;
use crate::core::error::{PackError, PackResult, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// Settings for `packrs create`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Codec name, resolved through `CodecKind::from_str`.
    #[serde(default = "default_codec")]
    pub codec: String,
}

/// Settings for `packrs extract`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// Output directory when `-o` is not given (can use ~).
    #[serde(default = "default_extract_dir")]
    pub directory: String,
    /// Replace existing files without `--force`. Unset means `false`.
    #[serde(default)]
    pub overwrite: Option<bool>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            codec: default_codec(),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            directory: default_extract_dir(),
            overwrite: None,
        }
    }
}

impl Config {
    /// The configured codec.
    pub fn codec_kind(&self) -> PackResult<CodecKind> {
        self.archive.codec.parse()
    }

    /// Whether `packrs extract` replaces existing files by default.
    pub fn overwrite(&self) -> bool {
        self.extract.overwrite.unwrap_or(false)
    }
}

fn default_codec() -> String {
    CodecKind::default().name().to_string()
}
fn default_extract_dir() -> String {
    ".".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".packrs.toml";
const CONFIG_ENV_VAR: &str = "PACKRS_CONFIG";

pub fn load_config() -> Result<Config> {
    let mut config = match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => {
            let path = PathBuf::from(path);
            info!(
                "Loading configuration from {}: {}",
                CONFIG_ENV_VAR,
                path.display()
            );
            load_config_from_path(&path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "PackRS", "packrs") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.packrs.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.archive.codec = if project.archive.codec != default_codec() {
        project.archive.codec
    } else {
        user.archive.codec
    };
    merged.extract.directory = if project.extract.directory != default_extract_dir() {
        project.extract.directory
    } else {
        user.extract.directory
    };
    merged.extract.overwrite = project.extract.overwrite.or(user.extract.overwrite);
    merged
}

fn expand_config_paths(config: &mut Config) {
    config.extract.directory = shellexpand::tilde(&config.extract.directory).into_owned();
    debug!("Expanded extract directory: {}", config.extract.directory);
}

fn validate_config(config: &Config) -> Result<()> {
    config.codec_kind()?;
    let out_dir = PathBuf::from(&config.extract.directory);
    if out_dir.exists() && !out_dir.is_dir() {
        return Err(anyhow!(PackError::Config(format!(
            "Configured extract path '{}' exists but is not a directory.",
            out_dir.display()
        ))));
    }
    Ok(())
}

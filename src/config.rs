//! Tool configuration from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`PLAYTINT_TINT`, `PLAYTINT_PREFS`, `PLAYTINT_LOG`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./playtint.toml in the current directory
//! 4. $XDG_CONFIG_HOME/playtint/playtint.toml (or ~/.config/playtint/...)
//! 5. Built-in defaults
//!
//! This covers the tool's own knobs only; the host's persisted preference
//! state lives in the host store and is never read from here.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::color::Rgba;
use crate::error::ConfigError;

/// Default override color applied when nothing else is configured.
pub const DEFAULT_TINT: Rgba = Rgba::new(0.949_191_4, 0.863_207_6, 1.0, 1.0);

const DEFAULT_CONFIG_TEMPLATE: &str = r##"# playtint configuration.

[tint]
# Default override color: #rrggbb / #rrggbbaa hex, or 3-4 floats in 0..1.
default = "#f2dcff"

[host]
# Path to the host preference store the CLI operates on.
# Defaults to ~/.config/playtint/hostprefs.
#prefs = "/path/to/hostprefs"

[log]
# tracing env-filter, e.g. "info" or "playtint=debug".
filter = "info"
"##;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Resolved tool configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default override color applied by `apply` and on initialize.
    pub default_tint: Rgba,
    /// Host store path; `None` falls back to the per-user default.
    pub prefs_path: Option<PathBuf>,
    /// tracing env-filter directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tint: DEFAULT_TINT,
            prefs_path: None,
            log_filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    tint: TintSection,
    #[serde(default)]
    host: HostSection,
    #[serde(default)]
    log: LogSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TintSection {
    #[serde(default)]
    default: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HostSection {
    #[serde(default)]
    prefs: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LogSection {
    #[serde(default)]
    filter: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from the --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let config_text = read_config_text(path_override, &read_file, &config_root)?;
    let parsed: FileConfig = toml::from_str(&config_text)?;

    let mut config = Config::default();
    if let Some(value) = normalized_string(&parsed.tint.default) {
        config.default_tint = Rgba::parse(&value)
            .map_err(|e| ConfigError::Invalid(format!("tint.default: {e}")))?;
    }
    if let Some(value) = normalized_string(&parsed.host.prefs) {
        config.prefs_path = Some(PathBuf::from(value));
    }
    if let Some(value) = normalized_string(&parsed.log.filter) {
        config.log_filter = value;
    }

    if let Some(value) = env_lookup("PLAYTINT_TINT") {
        config.default_tint = Rgba::parse(&value)
            .map_err(|e| ConfigError::Invalid(format!("PLAYTINT_TINT: {e}")))?;
    }
    if let Some(value) = env_lookup("PLAYTINT_PREFS").as_deref().and_then(normalized_string) {
        config.prefs_path = Some(PathBuf::from(value));
    }
    if let Some(value) = env_lookup("PLAYTINT_LOG").as_deref().and_then(normalized_string) {
        config.log_filter = value;
    }

    Ok(config)
}

fn read_config_text<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<String, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(p) = path_override {
        return Ok(read_file(Path::new(p))?);
    }
    if let Ok(text) = read_file(Path::new("playtint.toml")) {
        return Ok(text);
    }
    if let Some(dir) = config_root() {
        let global = dir.join("playtint").join("playtint.toml");
        if let Ok(text) = read_file(&global) {
            return Ok(text);
        }
    }
    Ok(String::new())
}

fn normalized_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Paths and global template
// ---------------------------------------------------------------------------

/// Return the default per-user config path (`~/.config/playtint/playtint.toml`).
pub fn default_global_config_path() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join("playtint").join("playtint.toml"))
}

/// Return the default per-user host store path (`~/.config/playtint/hostprefs`).
pub fn default_prefs_path() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join("playtint").join("hostprefs"))
}

/// Ensure the default global config file exists.
///
/// Returns the global config path when available on this platform.
pub fn ensure_default_global_config() -> Result<Option<PathBuf>, ConfigError> {
    let Some(path) = default_global_config_path() else {
        return Ok(None);
    };
    ensure_default_global_config_at_path(&path)?;
    Ok(Some(path))
}

fn ensure_default_global_config_at_path(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // create_new avoids clobbering an existing file if another process won the race.
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(DEFAULT_CONFIG_TEMPLATE.as_bytes())?;
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(ConfigError::Io(e)),
    }
}

pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

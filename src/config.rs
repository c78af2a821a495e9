//! User settings and their JSON-file store.
//!
//! The engine reads settings at session start and never writes them back;
//! the store seeds each missing value with its default exactly once and
//! leaves present values alone, so user edits survive upgrades that add new
//! keys.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{KeyhintError, KeyhintResult};
use crate::labels::LabelOrder;

/// Default hint alphabet: the home row.
pub const DEFAULT_ALPHABET: &str = "ASDFGHJKL";

/// Default key that starts a hint session.
pub const DEFAULT_MAGIC_KEY: &str = "Space";

/// Default overlay style payload handed to the surface. The engine treats
/// this as opaque text.
pub const DEFAULT_STYLE: &str = "\
.keyhint-overlay { background-color: gray; opacity: 0.2; }
.keyhint-active-overlay { background-color: red; border: 1px solid white; opacity: 0.1; }
.keyhint-hint { padding: 3px; background-color: #333; color: white; border: white solid 1px; font-family: monospace; }
.keyhint-hint.disabled { opacity: 0.6; }
.keyhint-hint.candidate { background-color: yellow; color: black; border: black solid 1px; }
.keyhint-hint.hit { background-color: #c00; color: white; border: black solid 1px; font-weight: bold; }
";

/// Everything the engine reads from the configuration store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    /// Hint alphabet, an ordered sequence of distinct characters.
    pub alphabet: String,
    /// Key that opens a session.
    pub magic_key: String,
    /// Key that cancels a session / blurs the active element. `None`
    /// disables the dedicated blur key (Escape still cancels).
    pub blur_key: Option<String>,
    /// Which targets receive the shorter labels.
    pub label_order: LabelOrder,
    /// Overlay style payload, passed through to the surface.
    pub style: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            magic_key: DEFAULT_MAGIC_KEY.to_string(),
            blur_key: None,
            label_order: LabelOrder::default(),
            style: DEFAULT_STYLE.to_string(),
        }
    }
}

/// JSON-file-backed settings store.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the platform configuration directory
    /// (`<config-dir>/keyhint/settings.json`).
    pub fn new() -> KeyhintResult<Self> {
        let base = dirs::config_dir().ok_or(KeyhintError::ConfigDirUnavailable)?;
        Ok(Self {
            path: base.join("keyhint").join("settings.json"),
        })
    }

    /// Store at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, seeding any missing value with its default.
    ///
    /// A missing file is written out whole; a file missing some keys gets
    /// exactly those keys appended. Values already present are never
    /// overwritten.
    pub fn load_or_seed(&self) -> KeyhintResult<Settings> {
        if !self.path.exists() {
            let defaults = Settings::default();
            self.save(&defaults)?;
            info!(path = %self.path.display(), "seeded default settings");
            return Ok(defaults);
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| KeyhintError::SettingsIo {
            path: self.path.clone(),
            source,
        })?;
        let mut stored: Value = serde_json::from_str(&raw)?;
        let defaults = serde_json::to_value(Settings::default())?;

        let mut seeded = false;
        if let (Value::Object(stored), Value::Object(defaults)) = (&mut stored, defaults) {
            for (key, default_value) in defaults {
                if !stored.contains_key(&key) {
                    debug!(key = %key, "seeding missing setting");
                    stored.insert(key, default_value);
                    seeded = true;
                }
            }
        }

        let settings: Settings = serde_json::from_value(stored)?;
        if seeded {
            self.save(&settings)?;
        }
        Ok(settings)
    }

    /// Write `settings` as pretty JSON, creating parent directories.
    pub fn save(&self, settings: &Settings) -> KeyhintResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| KeyhintError::SettingsIo {
                path: self.path.clone(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json).map_err(|source| KeyhintError::SettingsIo {
            path: self.path.clone(),
            source,
        })
    }
}

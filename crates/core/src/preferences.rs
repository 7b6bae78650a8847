//! The one value that survives a restart: the light/dark theme.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, ScriptflowError};

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Used when nothing has been saved yet. This is the studio's own default;
    /// the OS appearance setting is not consulted.
    pub fn studio_default() -> Self {
        Theme::default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ScriptflowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ScriptflowError::InvalidConfig {
                reason: format!("unknown theme '{other}' (expected light or dark)"),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Preferences {
    theme: Theme,
}

/// Reads and writes `preferences.json` in a config directory.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scriptflow")
}

impl ThemeStore {
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join(PREFERENCES_FILE) }
    }

    pub fn in_config_dir() -> Self {
        Self::new(&get_config_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved theme, or the studio default when nothing usable is stored.
    pub fn load(&self) -> Theme {
        self.saved().unwrap_or_else(Theme::studio_default)
    }

    pub fn saved(&self) -> Option<Theme> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Preferences>(&content) {
            Ok(prefs) => Some(prefs.theme),
            Err(err) => {
                warn!(path = %self.path.display(), "ignoring unreadable preferences: {err}");
                None
            }
        }
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&Preferences { theme })?;
        std::fs::write(&self.path, json).map_err(|source| ScriptflowError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        debug!(%theme, "theme saved");
        Ok(())
    }
}

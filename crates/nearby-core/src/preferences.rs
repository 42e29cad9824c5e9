//! Display preference flags (color theme, contrast mode).
//!
//! Values are kept in a small key-value store: read once at startup and
//! written back whenever a flag is toggled.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::ConfigError;

const THEME_KEY: &str = "theme";
const CONTRAST_KEY: &str = "contrast";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Contrast {
    #[default]
    Normal,
    High,
}

impl Contrast {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Contrast::Normal => "normal",
            Contrast::High => "high",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Contrast::Normal => Contrast::High,
            Contrast::High => Contrast::Normal,
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "normal" => Some(Contrast::Normal),
            "high" => Some(Contrast::High),
            _ => None,
        }
    }
}

/// String key-value persistence surface for preference flags.
pub trait PreferenceStore {
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;

    /// # Errors
    ///
    /// Returns [`ConfigError`] when the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub theme: Theme,
    pub contrast: Contrast,
}

impl Preferences {
    /// Read both flags, falling back to the defaults for absent or
    /// unrecognised values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the store cannot be read.
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Result<Self, ConfigError> {
        let theme = match store.get(THEME_KEY)? {
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "ignoring unrecognised theme preference");
                Theme::default()
            }),
            None => Theme::default(),
        };
        let contrast = match store.get(CONTRAST_KEY)? {
            Some(raw) => Contrast::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "ignoring unrecognised contrast preference");
                Contrast::default()
            }),
            None => Contrast::default(),
        };
        Ok(Self { theme, contrast })
    }

    /// Flip the theme and persist the new value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the store cannot be written.
    pub fn toggle_theme<S: PreferenceStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<Theme, ConfigError> {
        let next = self.theme.toggled();
        store.set(THEME_KEY, next.as_str())?;
        self.theme = next;
        Ok(next)
    }

    /// Flip the contrast mode and persist the new value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the store cannot be written.
    pub fn toggle_contrast<S: PreferenceStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<Contrast, ConfigError> {
        let next = self.contrast.toggled();
        store.set(CONTRAST_KEY, next.as_str())?;
        self.contrast = next;
        Ok(next)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preference store backed by a flat YAML mapping on disk. A missing file
/// reads as empty; the file is created on first write.
#[derive(Debug, Clone)]
pub struct YamlPreferenceStore {
    path: PathBuf,
}

impl YamlPreferenceStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(ConfigError::PreferencesIo {
                    path: self.path.display().to_string(),
                    source: e,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_yaml::from_str(&content).map_err(ConfigError::PreferencesParse)
    }
}

impl PreferenceStore for YamlPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        let content = serde_yaml::to_string(&values).map_err(ConfigError::PreferencesSerialize)?;
        std::fs::write(&self.path, content).map_err(|e| ConfigError::PreferencesIo {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

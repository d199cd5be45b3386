//! User preferences and their persistence.

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::application::recent_files::RecentFiles;
use crate::config::PlayerConfig;
use crate::core::traits::KeyValueStore;
use crate::utils::{RECENT_FILES_KEY, SETTINGS_KEY};

const MIN_SKIP_SECONDS: u32 = 1;
const MAX_SKIP_SECONDS: u32 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// 0.0 - 1.0
    pub volume: f32,
    /// Seconds moved by skip forward/backward
    pub skip_duration: u32,
    pub autoplay_next: bool,
    pub show_notifications: bool,
    pub remember_volume: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}

impl Settings {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            volume: config.default_volume,
            skip_duration: config.default_skip_duration,
            autoplay_next: false,
            show_notifications: true,
            remember_volume: true,
        }
    }

    /// Bring numeric fields back into range. Non-finite volume falls back to
    /// `default_volume`.
    pub fn clamp(&mut self, default_volume: f32) {
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            default_volume
        };
        self.skip_duration = self.skip_duration.clamp(MIN_SKIP_SECONDS, MAX_SKIP_SECONDS);
    }

    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(v) = patch.volume {
            self.volume = v;
        }
        if let Some(v) = patch.skip_duration {
            self.skip_duration = v;
        }
        if let Some(v) = patch.autoplay_next {
            self.autoplay_next = v;
        }
        if let Some(v) = patch.show_notifications {
            self.show_notifications = v;
        }
        if let Some(v) = patch.remember_volume {
            self.remember_volume = v;
        }
    }
}

/// Partial settings update, as produced by the settings dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub volume: Option<f32>,
    pub skip_duration: Option<u32>,
    pub autoplay_next: Option<bool>,
    pub show_notifications: Option<bool>,
    pub remember_volume: Option<bool>,
}

impl SettingsPatch {
    pub fn volume(volume: f32) -> Self {
        Self {
            volume: Some(volume),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Reads and writes the settings record and the recent-files list.
pub struct SettingsStore {
    storage: Box<dyn KeyValueStore>,
    defaults: Settings,
}

impl SettingsStore {
    pub fn new(storage: Box<dyn KeyValueStore>, defaults: Settings) -> Self {
        Self { storage, defaults }
    }

    /// Stored settings, clamped. Missing or corrupt data yields the defaults.
    pub fn load(&self) -> Settings {
        let stored = match self.storage.get(SETTINGS_KEY) {
            Ok(Some(value)) => serde_json::from_value::<Settings>(value)
                .map_err(|e| debug!("Stored settings unreadable, using defaults: {}", e))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                debug!("Settings storage unavailable, using defaults: {}", e);
                None
            }
        };

        let mut settings = stored.unwrap_or_else(|| self.defaults.clone());
        settings.clamp(self.defaults.volume);
        settings
    }

    /// Merge `patch` into the stored record and write it back.
    pub fn save(&mut self, patch: &SettingsPatch) -> Result<Settings> {
        let mut settings = self.load();
        settings.apply(patch);
        settings.clamp(self.defaults.volume);

        let value = serde_json::to_value(&settings)?;
        self.storage
            .set(SETTINGS_KEY, value)
            .context("Failed to save settings")?;
        Ok(settings)
    }

    pub fn load_recent(&self, limit: usize) -> RecentFiles {
        match self.storage.get(RECENT_FILES_KEY) {
            Ok(Some(value)) => RecentFiles::from_value(value, limit),
            Ok(None) => RecentFiles::new(limit),
            Err(e) => {
                warn!("Recent files unavailable: {}", e);
                RecentFiles::new(limit)
            }
        }
    }

    pub fn save_recent(&mut self, recent: &RecentFiles) -> Result<()> {
        let value = serde_json::to_value(recent.entries())?;
        self.storage
            .set(RECENT_FILES_KEY, value)
            .context("Failed to save recent files")
    }
}

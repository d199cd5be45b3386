//! Static player tunables.
//!
//! These are the knobs a deployment may want to change without touching user
//! preferences: speed bounds, timer periods, supported formats. They are read
//! once from an optional TOML file; every field falls back to its default so a
//! partial file is fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::{APP_NAME, file_extension};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "STREAMFLOW_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub default_volume: f32,
    /// Seconds.
    pub default_skip_duration: u32,
    pub default_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub speed_step: f32,
    pub volume_step: f32,

    pub toast_duration_ms: u64,
    pub toast_fade_ms: u64,
    pub progress_update_interval_ms: u64,
    pub visualization_update_interval_ms: u64,
    /// `None` waits for the embedded player forever.
    pub remote_ready_timeout_ms: Option<u64>,

    pub supported_video_formats: Vec<String>,
    pub supported_audio_formats: Vec<String>,
    pub recent_files_limit: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_volume: 0.7,
            default_skip_duration: 10,
            default_speed: 1.0,
            min_speed: 0.25,
            max_speed: 2.0,
            speed_step: 0.25,
            volume_step: 0.1,
            toast_duration_ms: 2000,
            toast_fade_ms: 300,
            progress_update_interval_ms: 500,
            visualization_update_interval_ms: 150,
            remote_ready_timeout_ms: Some(20_000),
            supported_video_formats: ["mp4", "mkv", "avi", "webm", "mov", "flv", "ogv"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            supported_audio_formats: ["mp3", "wav", "ogg", "m4a", "flac", "aac"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            recent_files_limit: 10,
        }
    }
}

impl PlayerConfig {
    /// Load from `STREAMFLOW_CONFIG_PATH` or the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match resolve_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: PlayerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_speed <= 0.0 || self.min_speed > self.max_speed {
            anyhow::bail!(
                "speed bounds are inconsistent: min {} max {}",
                self.min_speed,
                self.max_speed
            );
        }
        if self.speed_step <= 0.0 || self.volume_step <= 0.0 {
            anyhow::bail!("speed_step and volume_step must be positive");
        }
        if self.progress_update_interval_ms == 0 || self.visualization_update_interval_ms == 0 {
            anyhow::bail!("timer periods must be at least 1ms");
        }
        Ok(())
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_update_interval_ms)
    }

    pub fn visualization_interval(&self) -> Duration {
        Duration::from_millis(self.visualization_update_interval_ms)
    }

    pub fn remote_ready_timeout(&self) -> Option<Duration> {
        self.remote_ready_timeout_ms.map(Duration::from_millis)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn toast_fade(&self) -> Duration {
        Duration::from_millis(self.toast_fade_ms)
    }

    pub fn is_video_name(&self, name: &str) -> bool {
        file_extension(name)
            .map(|ext| self.supported_video_formats.contains(&ext))
            .unwrap_or(false)
    }

    pub fn is_audio_name(&self, name: &str) -> bool {
        file_extension(name)
            .map(|ext| self.supported_audio_formats.contains(&ext))
            .unwrap_or(false)
    }

    pub fn is_media_name(&self, name: &str) -> bool {
        self.is_video_name(name) || self.is_audio_name(name)
    }
}

/// Resolve the config path from `STREAMFLOW_CONFIG_PATH`, falling back to
/// `<config_dir>/streamflow/config.toml`.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(p));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME).join("config.toml"))
}

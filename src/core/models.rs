use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PlayerConfig;

/// Which playback engine a track needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    Local,
    Remote,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Local => write!(f, "Local media"),
            BackendKind::Remote => write!(f, "YouTube"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Video,
    Audio,
}

/// A file the user picked, before it has been registered with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFile {
    pub name: String,
    pub path: Option<PathBuf>,
    pub media_type: MediaType,
    pub size: u64,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            name: name.into(),
            path: None,
            media_type,
            size: 0,
        }
    }

    /// Build from a path on disk. Returns `None` for unsupported extensions.
    pub fn from_path(path: &Path, config: &PlayerConfig) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        let media_type = if config.is_video_name(&name) {
            MediaType::Video
        } else if config.is_audio_name(&name) {
            MediaType::Audio
        } else {
            return None;
        };
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Some(Self {
            name,
            path: Some(path.to_path_buf()),
            media_type,
            size,
        })
    }
}

/// Opaque host token for a registered local file (an object URL in a browser).
///
/// Handles must be revoked once no playlist entry or backend refers to them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaHandle(String);

impl MediaHandle {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Backend-specific address of a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Local {
        handle: MediaHandle,
        media_type: MediaType,
    },
    RemoteVideo {
        video_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub locator: Locator,
}

impl Track {
    pub fn local(name: impl Into<String>, handle: MediaHandle, media_type: MediaType) -> Self {
        Self {
            name: name.into(),
            locator: Locator::Local { handle, media_type },
        }
    }

    pub fn remote(video_id: impl Into<String>) -> Self {
        let video_id = video_id.into();
        Self {
            name: video_id.clone(),
            locator: Locator::RemoteVideo { video_id },
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self.locator {
            Locator::Local { .. } => BackendKind::Local,
            Locator::RemoteVideo { .. } => BackendKind::Remote,
        }
    }

    /// Local tracks are identified by display name, remote ones by video id.
    pub fn identity(&self) -> &str {
        match &self.locator {
            Locator::Local { .. } => &self.name,
            Locator::RemoteVideo { video_id } => video_id,
        }
    }

    pub fn handle(&self) -> Option<&MediaHandle> {
        match &self.locator {
            Locator::Local { handle, .. } => Some(handle),
            Locator::RemoteVideo { .. } => None,
        }
    }

    pub fn video_id(&self) -> Option<&str> {
        match &self.locator {
            Locator::RemoteVideo { video_id } => Some(video_id),
            Locator::Local { .. } => None,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.locator {
            Locator::Local { media_type, .. } => {
                let tag = match media_type {
                    MediaType::Video => "video",
                    MediaType::Audio => "audio",
                };
                write!(f, "{} [{}]", self.name, tag)
            }
            Locator::RemoteVideo { video_id } => write!(f, "{} [youtube:{}]", self.name, video_id),
        }
    }
}

/// Coordinator state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Mode {
    #[default]
    Empty,
    LocalActive,
    RemoteActive,
}

impl Mode {
    pub fn for_kind(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Local => Mode::LocalActive,
            BackendKind::Remote => Mode::RemoteActive,
        }
    }

    pub fn backend_kind(&self) -> Option<BackendKind> {
        match self {
            Mode::Empty => None,
            Mode::LocalActive => Some(BackendKind::Local),
            Mode::RemoteActive => Some(BackendKind::Remote),
        }
    }
}

/// Snapshot of everything the transport controls display.
///
/// The active backend is the source of truth for `is_playing`, `current_time`
/// and `duration`; the coordinator mirrors them here on every backend event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    pub mode: Mode,
    pub is_playing: bool,
    pub current_time: f64,
    /// `None` while the backend cannot tell yet.
    pub duration: Option<f64>,
    pub volume: f32,
    pub speed: f32,
    pub is_looping: bool,
    pub is_muted: bool,
    pub previous_volume: f32,
    pub is_shuffled: bool,
    pub audio_only: bool,
}

impl PlaybackState {
    pub fn new(volume: f32, speed: f32) -> Self {
        Self {
            mode: Mode::Empty,
            is_playing: false,
            current_time: 0.0,
            duration: None,
            volume,
            speed,
            is_looping: false,
            is_muted: false,
            previous_volume: volume,
            is_shuffled: false,
            audio_only: false,
        }
    }

    /// Volume the backend should actually output.
    pub fn effective_volume(&self) -> f32 {
        if self.is_muted { 0.0 } else { self.volume }
    }

    pub(crate) fn reset_position(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
        self.duration = None;
    }
}

use anyhow::Result;

use crate::core::error::{BackendError, EngineError, TeardownError};
use crate::core::events::{BackendEvent, EmbedEvent, MediaElementEvent, NoticeKind};
use crate::core::models::{BackendKind, LocalFile, MediaHandle, MediaType, Track};

/// Whether a freshly loaded backend can take commands yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Ready,
    /// Wait for a `BackendEvent::Ready`
    Pending,
}

/// Abstraction over a playback engine bound to one track at a time.
///
/// The coordinator talks only to this trait; which variant serves a track is
/// decided once, from the track kind, at load time.
pub trait PlaybackBackend: Send {
    fn kind(&self) -> BackendKind;

    /// Bind to a track, tearing down whatever this instance was bound to.
    fn load(&mut self, track: &Track) -> Result<LoadState, BackendError>;

    /// Request playback. A refusal arrives later as
    /// `BackendEvent::PlayRejected`, never as a panic.
    fn play(&mut self);

    fn pause(&mut self);

    /// Seek to an absolute position in seconds
    fn seek(&mut self, time: f64);

    /// Set volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);

    /// Set playback rate (0.25 - 2.0)
    fn set_speed(&mut self, speed: f32);

    fn set_loop(&mut self, looping: bool);

    /// Hide or show the visual surface without touching the decode pipeline
    fn set_audio_only(&mut self, audio_only: bool);

    /// `None` when the engine cannot tell yet
    fn current_time(&self) -> Option<f64>;

    /// `None` when the engine cannot tell yet
    fn duration(&self) -> Option<f64>;

    fn is_playing(&self) -> bool;

    fn is_ready(&self) -> bool;

    /// Title of the bound media, when the engine knows one
    fn title(&self) -> Option<String> {
        None
    }

    /// Drain pending events (non-blocking)
    fn poll_events(&mut self) -> Vec<BackendEvent>;

    /// Release everything. Best effort: every step runs even if one fails.
    /// The backend ignores all commands afterwards until the next `load`.
    fn teardown(&mut self) -> Result<(), TeardownError>;
}

/// Native media element capability provided by the host.
pub trait MediaElement: Send {
    fn attach(&mut self, handle: &MediaHandle, media_type: MediaType) -> Result<(), EngineError>;

    fn detach(&mut self) -> Result<(), EngineError>;

    fn play(&mut self);

    fn pause(&mut self);

    fn set_current_time(&mut self, time: f64);

    fn current_time(&self) -> f64;

    /// NaN or infinite while unknown
    fn duration(&self) -> f64;

    fn set_volume(&mut self, volume: f64);

    fn volume(&self) -> f64;

    fn set_playback_rate(&mut self, rate: f64);

    fn set_loop(&mut self, looping: bool);

    fn set_video_visible(&mut self, visible: bool);

    fn is_paused(&self) -> bool;

    fn drain_events(&mut self) -> Vec<MediaElementEvent>;
}

/// Embedded video player capability provided by the host.
///
/// Creation is asynchronous: the player only accepts playback commands after
/// it emitted `EmbedEvent::Ready`.
pub trait EmbedPlayer: Send {
    fn create(&mut self, video_id: &str, autoplay: bool) -> Result<(), EngineError>;

    fn destroy(&mut self) -> Result<(), EngineError>;

    fn play_video(&mut self);

    fn pause_video(&mut self);

    fn seek_to(&mut self, seconds: f64);

    /// 0 - 100
    fn set_volume(&mut self, volume: u8);

    fn mute(&mut self);

    fn un_mute(&mut self);

    fn set_playback_rate(&mut self, rate: f64);

    fn current_time(&self) -> f64;

    fn duration(&self) -> f64;

    fn player_state(&self) -> i32;

    fn set_visible(&mut self, visible: bool);

    fn video_title(&self) -> Option<String>;

    fn drain_events(&mut self) -> Vec<EmbedEvent>;
}

/// Host facility that turns picked files into playable handles.
pub trait MediaHandles: Send {
    fn create(&mut self, file: &LocalFile) -> Result<MediaHandle, EngineError>;

    fn revoke(&mut self, handle: &MediaHandle);
}

/// Abstraction for persistent key-value storage
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Fire-and-forget user notifications
pub trait Notifier: Send {
    fn notify(&mut self, message: &str, kind: NoticeKind);
}

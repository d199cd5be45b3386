use std::path::PathBuf;

use crate::application::settings::SettingsPatch;
use crate::core::error::BackendErrorKind;
use crate::core::models::{BackendKind, LocalFile, Mode};
use crate::modules::playback::playback_progress::PlaybackProgress;

/// Unified event stream of a playback backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// Player is bound and accepts commands
    Ready,

    /// Playback position changed (seconds)
    TimeUpdate(f64),

    /// Duration became known or changed (seconds)
    DurationChange(f64),

    Play,

    Pause,

    /// Track reached its end (never emitted while looping)
    Ended,

    Error(BackendErrorKind),

    /// Output volume changed (0.0 - 1.0)
    VolumeChange(f32),

    /// `play()` was refused, typically by an autoplay policy
    PlayRejected { reason: String },
}

/// Events of the native media element capability.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaElementEvent {
    LoadedMetadata,
    TimeUpdate,
    Play,
    Pause,
    Ended,
    /// Native media error code (1 aborted, 2 network, 3 decode, 4 unsupported)
    Error(u16),
    VolumeChange,
    PlayRejected(String),
}

/// Events of the embedded video player capability.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbedEvent {
    Ready,
    /// -1 unstarted, 0 ended, 1 playing, 2 paused, 3 buffering, 5 cued
    StateChange(i32),
    /// Numeric error code (2, 5, 100, 101, 150, ...)
    Error(i32),
}

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Everything the coordinator tells the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinatorEvent {
    ModeChanged { mode: Mode },

    /// A track was bound to a backend
    TrackLoaded { index: Option<usize>, name: String, kind: BackendKind },

    /// Title reported by the backend once it knows it
    NowPlaying { title: String },

    Progress { source: BackendKind, progress: PlaybackProgress },

    PlayingChanged { playing: bool },

    VolumeChanged { volume: f32, muted: bool },

    SpeedChanged { speed: f32 },

    LoopChanged { looping: bool },

    ShuffleChanged { enabled: bool },

    AudioOnlyChanged { enabled: bool },

    /// Playlist contents or the current index changed
    PlaylistChanged { len: usize, current_index: Option<usize> },

    /// Load or playback failure; `external_link` is set when opening the
    /// video on the external site is worth offering
    PlaybackFailed {
        kind: BackendErrorKind,
        message: String,
        video_id: Option<String>,
        external_link: Option<String>,
    },

    /// Cosmetic audio-only visualizer frame, bar heights in percent
    Visualizer { bars: [u8; 8] },
}

/// User intent coming from the UI layer. Each variant maps to one coordinator
/// operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadLocal(LocalFile),
    LoadFiles(Vec<LocalFile>),
    LoadFolder(PathBuf),
    LoadRemote(String),
    PlayIndex(usize),
    Unload,

    TogglePlayPause,
    Play,
    Pause,

    SeekRelative(f64),
    SeekAbsolute(f64),
    /// 0.0 - 1.0 of the duration
    SeekPercent(f64),
    SkipForward,
    SkipBackward,

    SetVolume(f32),
    VolumeUp,
    VolumeDown,
    ToggleMute,

    SetSpeed(f32),
    SpeedUp,
    SpeedDown,

    ToggleLoop,
    ToggleShuffle,
    ToggleAudioOnly,

    Next,
    Previous,

    RemoveAt(usize),
    ClearPlaylist,
    SortPlaylist,

    UpdateSettings(SettingsPatch),
    SaveSettings,
    CommitVolume,
}

/// Type alias for coordinator event sender
pub type EventSender = crossbeam_channel::Sender<CoordinatorEvent>;

/// Type alias for coordinator event receiver
pub type EventReceiver = crossbeam_channel::Receiver<CoordinatorEvent>;

/// Type alias for command sender
pub type CommandSender = crossbeam_channel::Sender<Command>;

/// Type alias for command receiver
pub type CommandReceiver = crossbeam_channel::Receiver<Command>;

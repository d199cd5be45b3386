//! Playback state coordinator for a media player that plays local files
//! through a native media element and YouTube videos through an embedded
//! player.
//!
//! The host supplies the engines as trait objects (see [`core::traits`]),
//! drives [`Coordinator::tick`] from its loop and renders the
//! [`CoordinatorEvent`]s it receives.

pub mod application;
pub mod config;
pub mod core;
pub mod library;
pub mod modules;
pub mod utils;

pub use application::coordinator::Coordinator;
pub use application::recent_files::{RecentFile, RecentFiles};
pub use application::settings::{Settings, SettingsPatch, SettingsStore};
pub use application::shortcuts::Shortcut;
pub use config::PlayerConfig;
pub use core::error::{BackendError, BackendErrorKind, PlayerError};
pub use core::events::{BackendEvent, Command, CoordinatorEvent, NoticeKind};
pub use core::models::{BackendKind, LocalFile, MediaHandle, MediaType, Mode, PlaybackState, Track};
pub use library::playlist::Playlist;
pub use utils::{extract_video_id, watch_url};

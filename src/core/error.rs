//! Error taxonomy for the playback core.

use thiserror::Error;

use crate::core::models::BackendKind;

/// Why a backend could not load or keep playing a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendErrorKind {
    InvalidSource,
    PlaybackNotFound,
    EmbeddingRestricted,
    DecodeFailure,
    Unknown,
}

impl BackendErrorKind {
    /// Map a numeric error code from the embedded video player.
    pub fn from_embed_code(code: i32) -> Self {
        match code {
            2 => Self::InvalidSource,
            5 => Self::DecodeFailure,
            100 => Self::PlaybackNotFound,
            101 | 150 => Self::EmbeddingRestricted,
            _ => Self::Unknown,
        }
    }

    /// Map a native media element error code (1 aborted, 2 network, 3 decode,
    /// 4 source not supported).
    pub fn from_media_code(code: u16) -> Self {
        match code {
            3 => Self::DecodeFailure,
            4 => Self::InvalidSource,
            _ => Self::Unknown,
        }
    }

    /// Whether the user should be offered to open the video on the external
    /// site. There is nothing to link to for a bad id or a missing video.
    pub fn offers_external_link(&self) -> bool {
        !matches!(self, Self::InvalidSource | Self::PlaybackNotFound)
    }

    /// Message shown to the user for a failure on the given backend.
    pub fn user_message(&self, backend: BackendKind) -> &'static str {
        match (backend, self) {
            (BackendKind::Remote, Self::InvalidSource) => "Invalid video ID",
            (BackendKind::Remote, Self::DecodeFailure) => "HTML5 player error",
            (BackendKind::Remote, Self::PlaybackNotFound) => "Video not found",
            (BackendKind::Remote, Self::EmbeddingRestricted) => "Video cannot be embedded",
            (BackendKind::Remote, Self::Unknown) => "Unable to play video",
            (BackendKind::Local, Self::DecodeFailure) => "Could not decode media file",
            (BackendKind::Local, Self::InvalidSource) => "Unsupported media file",
            (BackendKind::Local, _) => "Error loading media file",
        }
    }
}

/// Failure reported by a backend, either from `load` or as an `error` event.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Failure of a single call into an external engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EngineError(pub String);

/// Cleanup that could not be completed. Every step was still attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("teardown incomplete: {}", failures.join("; "))]
pub struct TeardownError {
    pub failures: Vec<String>,
}

/// Errors surfaced at the coordinator boundary.
///
/// By the time one of these is returned the user has already been notified;
/// callers may ignore it.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("No media files selected")]
    NoFilesSelected,

    #[error("Load a file first")]
    NothingLoaded,

    #[error("Playlist is empty")]
    EmptyPlaylist,

    #[error("Playlist index {index} out of range ({len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{0} playback is not available")]
    BackendUnavailable(BackendKind),

    #[error("Cannot read folder: {0}")]
    FolderScan(anyhow::Error),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl PlayerError {
    /// Bad input from the user rather than a playback or storage failure.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_) | Self::NoFilesSelected | Self::IndexOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_codes_map_to_kinds() {
        assert_eq!(BackendErrorKind::from_embed_code(2), BackendErrorKind::InvalidSource);
        assert_eq!(BackendErrorKind::from_embed_code(5), BackendErrorKind::DecodeFailure);
        assert_eq!(BackendErrorKind::from_embed_code(100), BackendErrorKind::PlaybackNotFound);
        assert_eq!(BackendErrorKind::from_embed_code(101), BackendErrorKind::EmbeddingRestricted);
        assert_eq!(BackendErrorKind::from_embed_code(150), BackendErrorKind::EmbeddingRestricted);
        assert_eq!(BackendErrorKind::from_embed_code(7), BackendErrorKind::Unknown);
    }

    #[test]
    fn external_link_only_when_there_is_something_to_open() {
        assert!(BackendErrorKind::EmbeddingRestricted.offers_external_link());
        assert!(BackendErrorKind::DecodeFailure.offers_external_link());
        assert!(BackendErrorKind::Unknown.offers_external_link());
        assert!(!BackendErrorKind::InvalidSource.offers_external_link());
        assert!(!BackendErrorKind::PlaybackNotFound.offers_external_link());
    }

    #[test]
    fn media_codes_map_to_kinds() {
        assert_eq!(BackendErrorKind::from_media_code(3), BackendErrorKind::DecodeFailure);
        assert_eq!(BackendErrorKind::from_media_code(4), BackendErrorKind::InvalidSource);
        assert_eq!(BackendErrorKind::from_media_code(1), BackendErrorKind::Unknown);
    }

    #[test]
    fn teardown_error_lists_every_failure() {
        let e = TeardownError {
            failures: vec!["detach: busy".into(), "destroy: gone".into()],
        };
        assert_eq!(e.to_string(), "teardown incomplete: detach: busy; destroy: gone");
    }

    #[test]
    fn user_input_classification() {
        assert!(PlayerError::InvalidUrl("x".into()).is_user_input());
        assert!(PlayerError::NoFilesSelected.is_user_input());
        assert!(!PlayerError::NothingLoaded.is_user_input());
    }
}

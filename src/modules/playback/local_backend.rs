use log::{debug, warn};

use crate::core::error::{BackendError, BackendErrorKind, TeardownError};
use crate::core::events::{BackendEvent, MediaElementEvent};
use crate::core::models::{BackendKind, Locator, MediaHandle, MediaType, Track};
use crate::core::traits::{LoadState, MediaElement, PlaybackBackend};

/// Plays local files through the host's native media element.
pub struct LocalMediaBackend {
    element: Box<dyn MediaElement>,

    /// Handle currently attached; `None` before the first load and after teardown
    bound: Option<MediaHandle>,
    media_type: Option<MediaType>,
    audio_only: bool,
    volume: f32,
}

impl LocalMediaBackend {
    pub fn new(element: Box<dyn MediaElement>) -> Self {
        Self {
            element,
            bound: None,
            media_type: None,
            audio_only: false,
            volume: 1.0,
        }
    }

    /// Handle of the file the element is attached to
    pub fn bound_handle(&self) -> Option<&MediaHandle> {
        self.bound.as_ref()
    }

    fn apply_visibility(&mut self) {
        if self.media_type == Some(MediaType::Video) {
            self.element.set_video_visible(!self.audio_only);
        }
    }

    fn translate(&self, event: MediaElementEvent) -> Option<BackendEvent> {
        match event {
            MediaElementEvent::LoadedMetadata => {
                let duration = self.element.duration();
                (duration.is_finite() && duration > 0.0).then_some(BackendEvent::DurationChange(duration))
            }
            MediaElementEvent::TimeUpdate => {
                let time = self.element.current_time();
                time.is_finite().then_some(BackendEvent::TimeUpdate(time))
            }
            MediaElementEvent::Play => Some(BackendEvent::Play),
            MediaElementEvent::Pause => Some(BackendEvent::Pause),
            MediaElementEvent::Ended => Some(BackendEvent::Ended),
            MediaElementEvent::Error(code) => Some(BackendEvent::Error(BackendErrorKind::from_media_code(code))),
            MediaElementEvent::VolumeChange => {
                let volume = self.element.volume() as f32;
                Some(BackendEvent::VolumeChange(volume.clamp(0.0, 1.0)))
            }
            MediaElementEvent::PlayRejected(reason) => Some(BackendEvent::PlayRejected { reason }),
        }
    }
}

impl PlaybackBackend for LocalMediaBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn load(&mut self, track: &Track) -> Result<LoadState, BackendError> {
        let (handle, media_type) = match &track.locator {
            Locator::Local { handle, media_type } => (handle.clone(), *media_type),
            Locator::RemoteVideo { .. } => {
                return Err(BackendError::new(
                    BackendErrorKind::InvalidSource,
                    format!("{} is not a local file", track.name),
                ));
            }
        };

        if self.bound.is_some() {
            if let Err(e) = self.teardown() {
                warn!("Previous local media not fully released: {}", e);
            }
        }

        self.element.attach(&handle, media_type).map_err(|e| {
            BackendError::new(
                BackendErrorKind::InvalidSource,
                format!("Failed to open {}: {}", track.name, e),
            )
        })?;

        debug!("Local media attached: {} ({:?})", track.name, media_type);
        self.bound = Some(handle);
        self.media_type = Some(media_type);
        self.apply_visibility();

        Ok(LoadState::Ready)
    }

    fn play(&mut self) {
        if self.bound.is_some() {
            self.element.play();
        }
    }

    fn pause(&mut self) {
        if self.bound.is_some() {
            self.element.pause();
        }
    }

    fn seek(&mut self, time: f64) {
        if self.bound.is_some() {
            self.element.set_current_time(time.max(0.0));
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if self.bound.is_some() {
            self.element.set_volume(self.volume as f64);
        }
    }

    fn set_speed(&mut self, speed: f32) {
        if self.bound.is_some() {
            self.element.set_playback_rate(speed as f64);
        }
    }

    fn set_loop(&mut self, looping: bool) {
        if self.bound.is_some() {
            self.element.set_loop(looping);
        }
    }

    fn set_audio_only(&mut self, audio_only: bool) {
        self.audio_only = audio_only;
        if self.bound.is_some() {
            self.apply_visibility();
        }
    }

    fn current_time(&self) -> Option<f64> {
        self.bound.as_ref()?;
        let time = self.element.current_time();
        time.is_finite().then_some(time)
    }

    fn duration(&self) -> Option<f64> {
        self.bound.as_ref()?;
        let duration = self.element.duration();
        (duration.is_finite() && duration > 0.0).then_some(duration)
    }

    /// Read from the element, so a `play()` issued since the last poll counts
    fn is_playing(&self) -> bool {
        self.bound.is_some() && !self.element.is_paused()
    }

    fn is_ready(&self) -> bool {
        self.bound.is_some()
    }

    fn poll_events(&mut self) -> Vec<BackendEvent> {
        let raw = self.element.drain_events();
        if self.bound.is_none() {
            return Vec::new();
        }
        raw.into_iter().filter_map(|e| self.translate(e)).collect()
    }

    fn teardown(&mut self) -> Result<(), TeardownError> {
        let mut failures = Vec::new();

        if self.bound.is_some() {
            self.element.pause();
            if let Err(e) = self.element.detach() {
                failures.push(format!("detach: {}", e));
            }
            if self.media_type == Some(MediaType::Video) {
                self.element.set_video_visible(true);
            }
        }

        // Whatever the element queued belongs to the released media.
        let _ = self.element.drain_events();

        self.bound = None;
        self.media_type = None;

        if failures.is_empty() {
            Ok(())
        } else {
            Err(TeardownError { failures })
        }
    }
}

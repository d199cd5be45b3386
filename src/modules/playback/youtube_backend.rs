use log::{debug, warn};

use crate::core::error::{BackendError, BackendErrorKind, TeardownError};
use crate::core::events::{BackendEvent, EmbedEvent};
use crate::core::models::{BackendKind, Locator, Track};
use crate::core::traits::{EmbedPlayer, LoadState, PlaybackBackend};

const STATE_ENDED: i32 = 0;
const STATE_PLAYING: i32 = 1;
const STATE_PAUSED: i32 = 2;

/// Plays YouTube videos through the host's embedded player.
///
/// The embedded player is created asynchronously. Until it reports ready,
/// transport intents are recorded instead of forwarded:
/// - play/pause collapse into the last requested state
/// - only the last seek is kept
/// - volume, speed and loop are stored and applied on ready
///
/// The embed has no native loop, so an ended state while looping is turned
/// into a seek to zero followed by play.
pub struct YoutubeBackend {
    player: Box<dyn EmbedPlayer>,

    /// Video currently bound; `None` before the first load and after teardown
    video_id: Option<String>,
    ready: bool,
    duration_reported: bool,

    wants_playing: bool,
    pending_seek: Option<f64>,

    volume: f32,
    speed: f32,
    looping: bool,
    audio_only: bool,
}

impl YoutubeBackend {
    pub fn new(player: Box<dyn EmbedPlayer>) -> Self {
        Self {
            player,
            video_id: None,
            ready: false,
            duration_reported: false,
            wants_playing: true,
            pending_seek: None,
            volume: 1.0,
            speed: 1.0,
            looping: false,
            audio_only: false,
        }
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    fn apply_volume(&mut self) {
        if self.volume <= 0.0 {
            self.player.mute();
        } else {
            self.player.un_mute();
            self.player.set_volume((self.volume * 100.0).round().clamp(0.0, 100.0) as u8);
        }
    }

    /// Duration as reported by the embed; zero means it does not know yet.
    fn known_duration(&self) -> Option<f64> {
        let duration = self.player.duration();
        (duration.is_finite() && duration > 0.0).then_some(duration)
    }

    fn on_ready(&mut self, out: &mut Vec<BackendEvent>) {
        self.ready = true;
        debug!("YouTube player ready: {:?}", self.video_id);

        self.apply_volume();
        self.player.set_playback_rate(self.speed as f64);
        if let Some(time) = self.pending_seek.take() {
            self.player.seek_to(time);
        }
        if self.wants_playing {
            self.player.play_video();
        } else {
            self.player.pause_video();
        }

        out.push(BackendEvent::Ready);
        self.report_duration(out);
    }

    fn report_duration(&mut self, out: &mut Vec<BackendEvent>) {
        if self.duration_reported {
            return;
        }
        if let Some(duration) = self.known_duration() {
            self.duration_reported = true;
            out.push(BackendEvent::DurationChange(duration));
        }
    }

    fn on_state_change(&mut self, state: i32, out: &mut Vec<BackendEvent>) {
        match state {
            STATE_PLAYING => {
                out.push(BackendEvent::Play);
                self.report_duration(out);
            }
            STATE_PAUSED => out.push(BackendEvent::Pause),
            STATE_ENDED if self.looping => {
                self.player.seek_to(0.0);
                self.player.play_video();
            }
            STATE_ENDED => out.push(BackendEvent::Ended),
            // unstarted, buffering, cued
            _ => {}
        }
    }
}

impl PlaybackBackend for YoutubeBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    fn load(&mut self, track: &Track) -> Result<LoadState, BackendError> {
        let video_id = match &track.locator {
            Locator::RemoteVideo { video_id } => video_id.clone(),
            Locator::Local { .. } => {
                return Err(BackendError::new(
                    BackendErrorKind::InvalidSource,
                    format!("{} is not a YouTube video", track.name),
                ));
            }
        };

        if self.video_id.is_some() {
            if let Err(e) = self.teardown() {
                warn!("Previous YouTube player not fully released: {}", e);
            }
        }

        self.player.create(&video_id, true).map_err(|e| {
            BackendError::new(
                BackendErrorKind::Unknown,
                format!("Failed to create YouTube player: {}", e),
            )
        })?;

        debug!("YouTube player created for {}", video_id);
        self.video_id = Some(video_id);
        self.ready = false;
        self.duration_reported = false;
        self.wants_playing = true;
        self.pending_seek = None;
        self.player.set_visible(!self.audio_only);

        Ok(LoadState::Pending)
    }

    fn play(&mut self) {
        if self.video_id.is_none() {
            return;
        }
        if self.ready {
            self.player.play_video();
        } else {
            self.wants_playing = true;
        }
    }

    fn pause(&mut self) {
        if self.video_id.is_none() {
            return;
        }
        if self.ready {
            self.player.pause_video();
        } else {
            self.wants_playing = false;
        }
    }

    fn seek(&mut self, time: f64) {
        if self.video_id.is_none() {
            return;
        }
        let time = time.max(0.0);
        if self.ready {
            self.player.seek_to(time);
        } else {
            self.pending_seek = Some(time);
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if self.ready {
            self.apply_volume();
        }
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        if self.ready {
            self.player.set_playback_rate(speed as f64);
        }
    }

    fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_audio_only(&mut self, audio_only: bool) {
        self.audio_only = audio_only;
        if self.video_id.is_some() {
            self.player.set_visible(!audio_only);
        }
    }

    fn current_time(&self) -> Option<f64> {
        if !self.ready {
            return None;
        }
        let time = self.player.current_time();
        (time.is_finite() && time >= 0.0).then_some(time)
    }

    fn duration(&self) -> Option<f64> {
        if !self.ready {
            return None;
        }
        self.known_duration()
    }

    /// Before ready this is the requested state; afterwards the embed's own
    fn is_playing(&self) -> bool {
        if self.video_id.is_none() {
            return false;
        }
        if self.ready {
            self.player.player_state() == STATE_PLAYING
        } else {
            self.wants_playing
        }
    }

    fn is_ready(&self) -> bool {
        self.video_id.is_some() && self.ready
    }

    fn title(&self) -> Option<String> {
        if !self.ready {
            return None;
        }
        self.player.video_title().filter(|t| !t.is_empty())
    }

    fn poll_events(&mut self) -> Vec<BackendEvent> {
        let raw = self.player.drain_events();
        if self.video_id.is_none() {
            return Vec::new();
        }

        let mut out = Vec::new();
        for event in raw {
            match event {
                EmbedEvent::Ready => self.on_ready(&mut out),
                EmbedEvent::StateChange(state) => self.on_state_change(state, &mut out),
                EmbedEvent::Error(code) => {
                    out.push(BackendEvent::Error(BackendErrorKind::from_embed_code(code)))
                }
            }
        }
        out
    }

    fn teardown(&mut self) -> Result<(), TeardownError> {
        let mut failures = Vec::new();

        if self.video_id.is_some() {
            if let Err(e) = self.player.destroy() {
                failures.push(format!("destroy: {}", e));
            }
            self.player.set_visible(false);
        }

        let _ = self.player.drain_events();

        self.video_id = None;
        self.ready = false;
        self.duration_reported = false;
        self.pending_seek = None;

        if failures.is_empty() {
            Ok(())
        } else {
            Err(TeardownError { failures })
        }
    }
}

use std::time::Instant;

use crossbeam_channel::unbounded;
use log::{debug, info, warn};
use rand::Rng;

use crate::application::recent_files::RecentFiles;
use crate::application::settings::{Settings, SettingsStore};
use crate::config::PlayerConfig;
use crate::core::error::{BackendErrorKind, PlayerError};
use crate::core::events::*;
use crate::core::models::{BackendKind, MediaHandle, Mode, PlaybackState, Track};
use crate::core::traits::{LoadState, MediaHandles, Notifier, PlaybackBackend};
use crate::library::playlist::Playlist;
use crate::modules::playback::playback_progress::PlaybackProgress;
use crate::modules::playback::timers::{Deadline, IntervalTimer};
use crate::utils::watch_url;

const VISUALIZER_BARS: usize = 8;
const VISUALIZER_MIN: u8 = 20;
const VISUALIZER_MAX: u8 = 100;

pub(crate) type OpResult = Result<(), PlayerError>;

/// Playback state coordinator.
///
/// Owns the playlist, the playback state and at most one active backend.
/// Transport commands arrive either as direct method calls or as [`Command`]s
/// on the command channel; everything the UI should render leaves as
/// [`CoordinatorEvent`]s. Nothing runs in the background: the host calls
/// [`Coordinator::tick`] from its loop, which drains commands, pumps the
/// active backend and fires timers.
///
/// The operations themselves live in `application::handlers`, one file per
/// concern.
pub struct Coordinator {
    pub(super) config: PlayerConfig,
    pub(super) settings: Settings,
    pub(super) state: PlaybackState,
    pub(super) playlist: Playlist,
    pub(super) recent: RecentFiles,

    pub(super) event_tx: EventSender,
    pub(super) event_rx: EventReceiver,
    pub(super) command_tx: CommandSender,
    pub(super) command_rx: CommandReceiver,

    // Module references
    pub(super) local_backend: Option<Box<dyn PlaybackBackend>>,
    pub(super) remote_backend: Option<Box<dyn PlaybackBackend>>,
    pub(super) media_handles: Option<Box<dyn MediaHandles>>,
    pub(super) settings_store: Option<SettingsStore>,
    pub(super) notifier: Option<Box<dyn Notifier>>,

    /// Track the active backend is bound to
    pub(super) bound_track: Option<Track>,
    /// Handles of removed entries still held by the active backend
    pub(super) deferred_revokes: Vec<MediaHandle>,
    pub(super) title_reported: bool,

    /// Bumped on every load and unload; stale backend events are dropped
    pub(super) generation: u64,
    pub(super) clock: Instant,
    pub(super) ready_deadline: Option<Deadline>,
    pub(super) progress_timer: Option<IntervalTimer>,
    pub(super) visualizer_timer: Option<IntervalTimer>,
}

impl Coordinator {
    pub fn new(config: PlayerConfig) -> Self {
        let (event_tx, event_rx) = unbounded();
        let (command_tx, command_rx) = unbounded();
        let settings = Settings::from_config(&config);

        Self {
            state: PlaybackState::new(settings.volume, config.default_speed),
            recent: RecentFiles::new(config.recent_files_limit),
            settings,
            config,
            playlist: Playlist::new(),
            event_tx,
            event_rx,
            command_tx,
            command_rx,
            local_backend: None,
            remote_backend: None,
            media_handles: None,
            settings_store: None,
            notifier: None,
            bound_track: None,
            deferred_revokes: Vec::new(),
            title_reported: false,
            generation: 0,
            clock: Instant::now(),
            ready_deadline: None,
            progress_timer: None,
            visualizer_timer: None,
        }
    }

    /// Set the backend serving local files
    pub fn with_local_backend(mut self, backend: Box<dyn PlaybackBackend>) -> Self {
        self.local_backend = Some(backend);
        self
    }

    /// Set the backend serving YouTube videos
    pub fn with_remote_backend(mut self, backend: Box<dyn PlaybackBackend>) -> Self {
        self.remote_backend = Some(backend);
        self
    }

    pub fn with_media_handles(mut self, handles: Box<dyn MediaHandles>) -> Self {
        self.media_handles = Some(handles);
        self
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set the settings store and apply what it holds.
    ///
    /// The stored volume is only used when `remember_volume` is on.
    pub fn with_settings_store(mut self, store: SettingsStore) -> Self {
        self.settings = store.load();
        if self.settings.remember_volume {
            self.state.volume = self.settings.volume;
            self.state.previous_volume = self.settings.volume;
        }
        self.recent = store.load_recent(self.config.recent_files_limit);
        self.settings_store = Some(store);
        self
    }

    /// Receiver of everything the UI should render
    pub fn events(&self) -> EventReceiver {
        self.event_rx.clone()
    }

    /// Sender for UI commands, processed on the next tick
    pub fn command_sender(&self) -> CommandSender {
        self.command_tx.clone()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn recent_files(&self) -> &RecentFiles {
        &self.recent
    }

    /// Track the active backend is bound to
    pub fn now_playing(&self) -> Option<&Track> {
        self.bound_track.as_ref()
    }

    // ── main loop ─────────────────────────────────────────────────────────────

    /// Advance the coordinator to `now`.
    ///
    /// Order: queued commands, events of the active backend, the remote ready
    /// timeout, then due timers. A `Ready` already queued wins over an expired
    /// deadline.
    pub fn tick(&mut self, now: Instant) {
        if now > self.clock {
            self.clock = now;
        }

        self.process_commands();
        self.pump_backend_events();
        self.check_ready_deadline(now);
        self.fire_timers(now);
    }

    fn process_commands(&mut self) {
        while let Ok(command) = self.command_rx.try_recv() {
            if let Err(e) = self.handle_command(command) {
                debug!("Command failed: {}", e);
            }
        }
    }

    /// Run a single command. Errors have already been reported to the user.
    pub fn handle_command(&mut self, command: Command) -> OpResult {
        match command {
            Command::LoadLocal(file) => self.load_local(file),
            Command::LoadFiles(files) => self.load_files(files),
            Command::LoadFolder(dir) => self.load_folder(&dir),
            Command::LoadRemote(input) => self.load_remote(&input),
            Command::PlayIndex(index) => self.play_from_playlist(index),
            Command::Unload => {
                self.unload();
                Ok(())
            }
            Command::TogglePlayPause => self.toggle_play_pause(),
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::SeekRelative(delta) => self.seek_relative(delta),
            Command::SeekAbsolute(time) => self.seek_absolute(time),
            Command::SeekPercent(fraction) => self.seek_percent(fraction),
            Command::SkipForward => self.skip_forward(),
            Command::SkipBackward => self.skip_backward(),
            Command::SetVolume(volume) => {
                self.set_volume(volume);
                Ok(())
            }
            Command::VolumeUp => {
                self.step_volume(self.config.volume_step);
                Ok(())
            }
            Command::VolumeDown => {
                self.step_volume(-self.config.volume_step);
                Ok(())
            }
            Command::ToggleMute => {
                self.toggle_mute();
                Ok(())
            }
            Command::SetSpeed(speed) => {
                self.set_speed(speed);
                Ok(())
            }
            Command::SpeedUp => {
                self.increase_speed();
                Ok(())
            }
            Command::SpeedDown => {
                self.decrease_speed();
                Ok(())
            }
            Command::ToggleLoop => {
                self.toggle_loop();
                Ok(())
            }
            Command::ToggleShuffle => {
                self.toggle_shuffle();
                Ok(())
            }
            Command::ToggleAudioOnly => {
                self.toggle_audio_only();
                Ok(())
            }
            Command::Next => self.play_next(),
            Command::Previous => self.play_previous(),
            Command::RemoveAt(index) => self.remove_at(index),
            Command::ClearPlaylist => {
                self.clear_playlist();
                Ok(())
            }
            Command::SortPlaylist => {
                self.sort_playlist();
                Ok(())
            }
            Command::UpdateSettings(patch) => {
                self.update_settings(&patch);
                Ok(())
            }
            Command::SaveSettings => self.save_settings(),
            Command::CommitVolume => self.commit_volume(),
        }
    }

    /// Bind `track` to the backend its kind calls for, tearing down whatever
    /// was active first.
    pub(super) fn bind(&mut self, track: Track, index: Option<usize>) -> OpResult {
        let kind = track.kind();
        if self.backend_mut(kind).is_none() {
            return self.reject(PlayerError::BackendUnavailable(kind));
        }

        let previous_mode = self.state.mode;
        self.generation += 1;
        self.unbind_active();

        let effective_volume = self.state.effective_volume();
        let speed = self.state.speed;
        let looping = self.state.is_looping;
        let audio_only = self.state.audio_only;

        let Some(backend) = self.backend_mut(kind) else {
            return self.reject(PlayerError::BackendUnavailable(kind));
        };

        let load_state = match backend.load(&track) {
            Ok(load_state) => {
                backend.set_volume(effective_volume);
                backend.set_speed(speed);
                backend.set_loop(looping);
                backend.set_audio_only(audio_only);
                backend.play();
                load_state
            }
            Err(e) => {
                warn!("{} load failed for {}: {}", kind, track.name, e);
                if previous_mode != Mode::Empty {
                    self.emit(CoordinatorEvent::ModeChanged { mode: Mode::Empty });
                    self.emit(CoordinatorEvent::PlayingChanged { playing: false });
                }
                self.report_failure(kind, e.kind, track.video_id());
                return Err(PlayerError::Backend(e));
            }
        };

        let mode = Mode::for_kind(kind);
        self.state.mode = mode;
        if mode != previous_mode {
            info!("Mode switch: {:?} -> {:?}", previous_mode, mode);
            self.emit(CoordinatorEvent::ModeChanged { mode });
        }

        debug!("Bound {} to {} backend", track, kind);
        self.emit(CoordinatorEvent::TrackLoaded {
            index,
            name: track.name.clone(),
            kind,
        });
        if kind == BackendKind::Local {
            self.title_reported = true;
            self.emit(CoordinatorEvent::NowPlaying {
                title: track.name.clone(),
            });
        }
        self.bound_track = Some(track);

        match load_state {
            LoadState::Ready => self.on_backend_ready(kind),
            LoadState::Pending => {
                self.ready_deadline = self
                    .config
                    .remote_ready_timeout()
                    .map(|timeout| Deadline::after(timeout, self.clock));
            }
        }
        Ok(())
    }

    /// Cancel timers, tear down the active backend and release what it held.
    /// Leaves the mode at `Empty`; callers emit the mode change.
    pub(super) fn unbind_active(&mut self) {
        self.stop_remote_timers();
        self.ready_deadline = None;

        if let Some(kind) = self.state.mode.backend_kind() {
            if let Some(backend) = self.backend_mut(kind) {
                if let Err(e) = backend.teardown() {
                    warn!("{} teardown: {}", kind, e);
                }
            }
        }

        self.bound_track = None;
        self.title_reported = false;
        self.release_deferred();
        self.state.reset_position();
        self.state.mode = Mode::Empty;
    }

    fn backend_mut(&mut self, kind: BackendKind) -> Option<&mut (dyn PlaybackBackend + 'static)> {
        match kind {
            BackendKind::Local => self.local_backend.as_deref_mut(),
            BackendKind::Remote => self.remote_backend.as_deref_mut(),
        }
    }

    pub(super) fn active_backend_mut(&mut self) -> Option<&mut (dyn PlaybackBackend + 'static)> {
        let kind = self.state.mode.backend_kind()?;
        self.backend_mut(kind)
    }

    // ── media handles ─────────────────────────────────────────────────────────

    pub(super) fn release_tracks(&mut self, tracks: Vec<Track>) {
        for track in tracks {
            self.release_track(&track);
        }
    }

    /// Revoke a removed entry's handle, or park it while the active backend
    /// still plays from it.
    pub(super) fn release_track(&mut self, track: &Track) {
        let Some(handle) = track.handle() else {
            return;
        };

        let in_use = self
            .bound_track
            .as_ref()
            .and_then(|t| t.handle())
            .is_some_and(|h| h == handle);

        if in_use {
            debug!("Deferring release of {}", handle.as_str());
            self.deferred_revokes.push(handle.clone());
        } else if let Some(handles) = self.media_handles.as_mut() {
            handles.revoke(handle);
        }
    }

    fn release_deferred(&mut self) {
        let pending = std::mem::take(&mut self.deferred_revokes);
        if let Some(handles) = self.media_handles.as_mut() {
            for handle in &pending {
                handles.revoke(handle);
            }
        }
    }

    // ── backend events ────────────────────────────────────────────────────────

    fn pump_backend_events(&mut self) {
        let Some(kind) = self.state.mode.backend_kind() else {
            return;
        };
        let generation = self.generation;
        let events = match self.backend_mut(kind) {
            Some(backend) => backend.poll_events(),
            None => return,
        };

        for event in events {
            if self.generation != generation {
                debug!("Dropping stale {} events", kind);
                break;
            }
            self.handle_backend_event(kind, event);
        }
    }

    fn handle_backend_event(&mut self, kind: BackendKind, event: BackendEvent) {
        match event {
            BackendEvent::Ready => self.on_backend_ready(kind),
            BackendEvent::TimeUpdate(time) => {
                self.state.current_time = time;
                self.emit_progress();
            }
            BackendEvent::DurationChange(duration) => {
                self.state.duration = Some(duration);
                self.emit_progress();
            }
            BackendEvent::Play => self.set_playing(true),
            BackendEvent::Pause => self.set_playing(false),
            BackendEvent::Ended => self.on_ended(),
            BackendEvent::Error(error) => self.on_backend_error(kind, error),
            BackendEvent::VolumeChange(volume) => {
                if !self.state.is_muted && (volume - self.state.volume).abs() > f32::EPSILON {
                    self.state.volume = volume;
                    self.emit(CoordinatorEvent::VolumeChanged {
                        volume,
                        muted: false,
                    });
                }
            }
            BackendEvent::PlayRejected { reason } => {
                debug!("Play rejected: {}", reason);
                self.set_playing(false);
                self.notify("Click to play - autoplay blocked", NoticeKind::Warning);
            }
        }
    }

    fn on_backend_ready(&mut self, kind: BackendKind) {
        self.ready_deadline = None;
        if kind == BackendKind::Remote {
            debug!("Starting progress poll");
            self.progress_timer = Some(IntervalTimer::start(self.config.progress_interval(), self.clock));
            self.report_title();
            self.notify("YouTube video loaded", NoticeKind::Success);
        }

        let duration = self.backend_mut(kind).and_then(|b| b.duration());
        if duration.is_some() {
            self.state.duration = duration;
        }
        self.update_visualizer();
    }

    fn set_playing(&mut self, playing: bool) {
        if self.state.is_playing != playing {
            self.state.is_playing = playing;
            self.emit(CoordinatorEvent::PlayingChanged { playing });
        }
        self.update_visualizer();
    }

    /// End of track: a looping backend restarts by itself; otherwise advance
    /// when autoplay is on or there is somewhere to go.
    fn on_ended(&mut self) {
        if self.state.is_looping {
            return;
        }

        let advance = !self.playlist.is_empty()
            && (self.settings.autoplay_next || self.playlist.len() > 1);
        if advance {
            if let Err(e) = self.play_next() {
                debug!("Advance after end failed: {}", e);
            }
        } else {
            self.set_playing(false);
        }
    }

    fn on_backend_error(&mut self, kind: BackendKind, error: BackendErrorKind) {
        warn!("{} playback error: {:?}", kind, error);
        self.stop_remote_timers();
        self.ready_deadline = None;
        self.set_playing(false);

        let video_id = self
            .bound_track
            .as_ref()
            .and_then(|t| t.video_id())
            .map(str::to_string);
        self.report_failure(kind, error, video_id.as_deref());
    }

    fn report_failure(&mut self, kind: BackendKind, error: BackendErrorKind, video_id: Option<&str>) {
        let message = error.user_message(kind);
        self.notify(message, NoticeKind::Error);

        let external_link = video_id
            .filter(|_| error.offers_external_link())
            .map(watch_url);
        self.emit(CoordinatorEvent::PlaybackFailed {
            kind: error,
            message: message.to_string(),
            video_id: video_id.map(str::to_string),
            external_link,
        });
    }

    fn check_ready_deadline(&mut self, now: Instant) {
        let expired = self.ready_deadline.is_some_and(|d| d.expired(now));
        if !expired {
            return;
        }

        self.ready_deadline = None;
        if self.remote_backend.as_deref().is_some_and(|b| b.is_ready()) {
            return;
        }
        warn!("YouTube player did not become ready in time");
        let video_id = self
            .bound_track
            .as_ref()
            .and_then(|t| t.video_id())
            .map(str::to_string);
        let message = "YouTube player did not respond";
        self.notify(message, NoticeKind::Error);
        self.emit(CoordinatorEvent::PlaybackFailed {
            kind: BackendErrorKind::Unknown,
            message: message.to_string(),
            external_link: video_id.as_deref().map(watch_url),
            video_id,
        });
    }

    // ── timers ────────────────────────────────────────────────────────────────

    fn fire_timers(&mut self, now: Instant) {
        if self.progress_timer.as_mut().is_some_and(|t| t.poll(now)) {
            self.poll_remote_progress();
        }
        if self.visualizer_timer.as_mut().is_some_and(|t| t.poll(now)) {
            self.emit_visualizer_frame();
        }
    }

    fn poll_remote_progress(&mut self) {
        let Some(backend) = self.remote_backend.as_deref() else {
            return;
        };
        let time = backend.current_time();
        let duration = backend.duration();

        if let Some(time) = time {
            self.state.current_time = time;
        }
        if duration.is_some() {
            self.state.duration = duration;
        }
        self.report_title();
        self.emit_progress();
    }

    fn report_title(&mut self) {
        if self.title_reported {
            return;
        }
        let title = self.remote_backend.as_deref().and_then(|b| b.title());
        if let Some(title) = title {
            self.title_reported = true;
            self.emit(CoordinatorEvent::NowPlaying { title });
        }
    }

    /// Start or stop the audio-only visualizer to match the current state
    pub(super) fn update_visualizer(&mut self) {
        let should_run = self.state.mode == Mode::RemoteActive
            && self.state.audio_only
            && self.state.is_playing;

        match (should_run, self.visualizer_timer.is_some()) {
            (true, false) => {
                debug!("Starting visualizer");
                self.visualizer_timer =
                    Some(IntervalTimer::start(self.config.visualization_interval(), self.clock));
            }
            (false, true) => {
                debug!("Stopping visualizer");
                self.visualizer_timer = None;
            }
            _ => {}
        }
    }

    fn emit_visualizer_frame(&mut self) {
        let mut rng = rand::rng();
        let mut bars = [0u8; VISUALIZER_BARS];
        for bar in bars.iter_mut() {
            *bar = rng.random_range(VISUALIZER_MIN..=VISUALIZER_MAX);
        }
        self.emit(CoordinatorEvent::Visualizer { bars });
    }

    fn stop_remote_timers(&mut self) {
        if self.progress_timer.take().is_some() {
            debug!("Progress poll stopped");
        }
        self.visualizer_timer = None;
    }

    // ── output ────────────────────────────────────────────────────────────────

    pub(super) fn emit(&self, event: CoordinatorEvent) {
        // The receiver lives in `self`, so the channel is never disconnected.
        let _ = self.event_tx.send(event);
    }

    pub(super) fn emit_progress(&self) {
        let Some(source) = self.state.mode.backend_kind() else {
            return;
        };
        self.emit(CoordinatorEvent::Progress {
            source,
            progress: PlaybackProgress::new(self.state.current_time, self.state.duration),
        });
    }

    pub(super) fn emit_playlist_changed(&self) {
        self.emit(CoordinatorEvent::PlaylistChanged {
            len: self.playlist.len(),
            current_index: self.playlist.current_index(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::*;
    use serde_json::json;

    // ── mode switches ─────────────────────────────────────────────────────────

    #[test]
    fn switching_to_local_cancels_remote_progress_poll() {
        let mut h = harness();
        load_ready_remote(&mut h);
        h.tick(500);
        assert!(h.remote_progress_count() > 0, "poll runs while remote is active");

        h.coordinator.load_local(file("a.mp4")).unwrap();
        assert_eq!(h.embed.state().destroy_calls, 1);
        h.drain();

        h.tick(1000);
        h.tick(1500);
        h.tick(2000);
        assert_eq!(h.remote_progress_count(), 0);
        assert_eq!(h.coordinator.mode(), Mode::LocalActive);
    }

    #[test]
    fn switching_to_remote_releases_local_media() {
        let mut h = harness();
        h.coordinator.load_local(file("a.mp4")).unwrap();
        h.coordinator.load_remote(VIDEO).unwrap();

        let s = h.element.state();
        assert_eq!(s.detach_calls, 1);
        assert!(s.attached.is_none());
    }

    #[test]
    fn unload_returns_to_empty_and_ignores_commands() {
        let mut h = harness();
        load_ready_remote(&mut h);
        h.coordinator.unload();

        assert_eq!(h.coordinator.mode(), Mode::Empty);
        assert!(matches!(h.coordinator.toggle_play_pause(), Err(PlayerError::NothingLoaded)));
        h.tick(5000);
        assert_eq!(h.remote_progress_count(), 0);
    }

    #[test]
    fn stale_events_are_dropped_after_a_load() {
        let mut h = harness();
        h.coordinator.load_files(files(&["a.mp4", "b.mp4"])).unwrap();
        h.tick(0);

        h.element.state().current_time = 99.0;
        h.element.push(MediaElementEvent::Ended);
        h.element.push(MediaElementEvent::TimeUpdate);
        h.tick(100);

        assert_eq!(h.coordinator.playlist().current_index(), Some(1));
        assert_eq!(h.coordinator.state().current_time, 0.0);
    }

    // ── backend events ────────────────────────────────────────────────────────

    #[test]
    fn autoplay_rejection_downgrades_to_paused() {
        let mut h = harness();
        h.element.state().reject_play = true;
        h.coordinator.load_local(file("a.mp4")).unwrap();
        h.tick(0);

        assert!(!h.coordinator.state().is_playing);
        assert_eq!(h.coordinator.mode(), Mode::LocalActive);
        assert_eq!(
            h.notifier.last(),
            Some(("Click to play - autoplay blocked".to_string(), NoticeKind::Warning))
        );
    }

    // ── end of track ──────────────────────────────────────────────────────────

    #[test]
    fn ended_advances_in_multi_entry_playlist() {
        let mut h = harness();
        h.coordinator.load_files(files(&["a.mp3", "b.mp3"])).unwrap();
        h.tick(0);

        h.element.push(MediaElementEvent::Ended);
        h.tick(10);
        assert_eq!(h.coordinator.playlist().current_index(), Some(1));
    }

    #[test]
    fn ended_while_looping_stays_put() {
        let mut h = harness();
        h.coordinator.load_files(files(&["a.mp3", "b.mp3"])).unwrap();
        h.coordinator.toggle_loop();
        h.tick(0);

        h.element.push(MediaElementEvent::Ended);
        h.tick(10);
        assert_eq!(h.coordinator.playlist().current_index(), Some(0));
    }

    #[test]
    fn ended_single_entry_without_autoplay_stops() {
        let mut h = harness();
        h.coordinator.load_local(file("a.mp4")).unwrap();
        h.tick(0);
        assert!(h.coordinator.state().is_playing);

        h.element.push(MediaElementEvent::Ended);
        h.tick(10);
        assert!(!h.coordinator.state().is_playing);
    }

    #[test]
    fn ended_single_entry_with_autoplay_restarts() {
        let mut h = harness_with(PlayerConfig::default(), Some(json!({ "autoplayNext": true })));
        h.coordinator.load_local(file("a.mp4")).unwrap();
        h.tick(0);
        h.element.state().current_time = 120.0;

        h.element.push(MediaElementEvent::Ended);
        h.tick(10);
        assert_eq!(h.element.state().current_time, 0.0);
        assert_eq!(h.coordinator.playlist().current_index(), Some(0));
    }

    // ── remote failures ───────────────────────────────────────────────────────

    #[test]
    fn embedding_restricted_offers_external_link() {
        let mut h = harness();
        h.coordinator.load_remote(VIDEO).unwrap();
        h.embed.push(EmbedEvent::Error(150));
        h.tick(0);

        assert_eq!(
            h.last_failure(),
            Some(CoordinatorEvent::PlaybackFailed {
                kind: BackendErrorKind::EmbeddingRestricted,
                message: "Video cannot be embedded".into(),
                video_id: Some(VIDEO.into()),
                external_link: Some(watch_url(VIDEO)),
            })
        );
        assert_eq!(h.coordinator.mode(), Mode::RemoteActive);
    }

    #[test]
    fn not_found_has_no_external_link() {
        let mut h = harness();
        h.coordinator.load_remote(VIDEO).unwrap();
        h.embed.push(EmbedEvent::Error(100));
        h.tick(0);

        assert_eq!(
            h.last_failure(),
            Some(CoordinatorEvent::PlaybackFailed {
                kind: BackendErrorKind::PlaybackNotFound,
                message: "Video not found".into(),
                video_id: Some(VIDEO.into()),
                external_link: None,
            })
        );
        assert_eq!(h.notifier.last(), Some(("Video not found".to_string(), NoticeKind::Error)));
    }

    #[test]
    fn remote_error_stops_progress_poll() {
        let mut h = harness();
        load_ready_remote(&mut h);
        h.embed.push(EmbedEvent::Error(5));
        h.tick(100);
        h.drain();

        h.tick(600);
        h.tick(1100);
        assert_eq!(h.remote_progress_count(), 0);
    }

    #[test]
    fn ready_timeout_reports_failure_once() {
        let mut h = harness();
        h.coordinator.load_remote(VIDEO).unwrap();
        h.tick(19_000);
        assert!(h.last_failure().is_none());

        h.tick(20_000);
        assert!(matches!(
            h.last_failure(),
            Some(CoordinatorEvent::PlaybackFailed { kind: BackendErrorKind::Unknown, .. })
        ));
        assert_eq!(h.coordinator.mode(), Mode::RemoteActive);

        h.tick(40_000);
        assert!(h.last_failure().is_none());
    }

    #[test]
    fn ready_timeout_can_be_disabled() {
        let config = PlayerConfig {
            remote_ready_timeout_ms: None,
            ..PlayerConfig::default()
        };
        let mut h = harness_with(config, None);
        h.coordinator.load_remote(VIDEO).unwrap();
        h.tick(600_000);
        assert!(h.last_failure().is_none());
    }

    #[test]
    fn queued_ready_beats_an_expired_deadline() {
        let mut h = harness();
        h.coordinator.load_remote(VIDEO).unwrap();
        h.embed.push(EmbedEvent::Ready);
        h.tick(25_000);

        assert!(h.last_failure().is_none());
        assert_eq!(h.coordinator.mode(), Mode::RemoteActive);
        assert!(!h.notifier.contains("YouTube player did not respond"));

        h.tick(25_010);
        assert!(h.coordinator.state().is_playing);
        assert!(h.last_failure().is_none());
    }


    #[test]
    fn remote_title_is_reported_once_known() {
        let mut h = harness();
        h.embed.state().title = Some("Never Gonna Give You Up".into());
        load_ready_remote(&mut h);

        assert!(h.drain().contains(&CoordinatorEvent::NowPlaying {
            title: "Never Gonna Give You Up".into()
        }));
    }

    // ── audio only ────────────────────────────────────────────────────────────

    #[test]
    fn local_audio_only_does_not_reload() {
        let mut h = harness();
        h.coordinator.load_local(file("a.mp4")).unwrap();
        h.element.state().current_time = 33.0;

        h.coordinator.toggle_audio_only();

        let s = h.element.state();
        assert!(!s.video_visible);
        assert_eq!(s.attach_calls, 1);
        assert_eq!(s.current_time, 33.0);
    }

    #[test]
    fn visualizer_runs_only_while_remote_audio_only_plays() {
        let mut h = harness();
        h.coordinator.toggle_audio_only();
        load_ready_remote(&mut h);
        h.tick(10);
        assert!(h.coordinator.state().is_playing);
        h.drain();

        h.tick(200);
        let frames: Vec<_> = h
            .drain()
            .into_iter()
            .filter_map(|e| match e {
                CoordinatorEvent::Visualizer { bars } => Some(bars),
                _ => None,
            })
            .collect();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].iter().all(|b| (20..=100).contains(b)));

        h.coordinator.pause().unwrap();
        h.tick(210);
        h.drain();
        h.tick(1000);
        assert!(!h.drain().iter().any(|e| matches!(e, CoordinatorEvent::Visualizer { .. })));
    }

    // ── command channel ───────────────────────────────────────────────────────

    #[test]
    fn commands_are_processed_on_tick() {
        let mut h = harness();
        let tx = h.coordinator.command_sender();
        tx.send(Command::LoadRemote(format!("https://www.youtube.com/embed/{}", VIDEO)))
            .unwrap();
        tx.send(Command::ToggleLoop).unwrap();
        assert_eq!(h.coordinator.mode(), Mode::Empty);

        h.tick(0);
        assert_eq!(h.coordinator.mode(), Mode::RemoteActive);
        assert!(h.coordinator.state().is_looping);
    }
}

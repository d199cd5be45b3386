//! In-memory stand-ins for the host capabilities.
//!
//! Each fake keeps its state behind an `Arc<Mutex<_>>` so a test can hand a
//! boxed clone to a backend and keep another clone to inspect calls and
//! inject events.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::error::EngineError;
use crate::core::events::{EmbedEvent, MediaElementEvent, NoticeKind};
use crate::core::models::{LocalFile, MediaHandle, MediaType};
use crate::core::traits::{EmbedPlayer, MediaElement, MediaHandles, Notifier};

// ── media element ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ElementState {
    pub attached: Option<MediaHandle>,
    pub media_type: Option<MediaType>,
    pub paused: bool,
    pub current_time: f64,
    pub duration: f64,
    /// Duration the next attached media reports
    pub next_duration: f64,
    pub volume: f64,
    pub rate: f64,
    pub looping: bool,
    pub video_visible: bool,
    pub attach_calls: usize,
    pub detach_calls: usize,
    pub fail_attach: Option<String>,
    pub fail_detach: Option<String>,
    pub reject_play: bool,
    pub events: Vec<MediaElementEvent>,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            attached: None,
            media_type: None,
            paused: true,
            current_time: 0.0,
            duration: f64::NAN,
            next_duration: 120.0,
            volume: 1.0,
            rate: 1.0,
            looping: false,
            video_visible: true,
            attach_calls: 0,
            detach_calls: 0,
            fail_attach: None,
            fail_detach: None,
            reject_play: false,
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeMediaElement {
    inner: Arc<Mutex<ElementState>>,
}

impl FakeMediaElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, ElementState> {
        self.inner.lock().unwrap()
    }

    /// Queue an event and move `paused` the way a real element does
    pub fn push(&self, event: MediaElementEvent) {
        let mut s = self.state();
        match event {
            MediaElementEvent::Play => s.paused = false,
            MediaElementEvent::Pause | MediaElementEvent::Ended => s.paused = true,
            _ => {}
        }
        s.events.push(event);
    }
}

impl MediaElement for FakeMediaElement {
    fn attach(&mut self, handle: &MediaHandle, media_type: MediaType) -> Result<(), EngineError> {
        let mut s = self.state();
        s.attach_calls += 1;
        if let Some(reason) = s.fail_attach.clone() {
            return Err(EngineError(reason));
        }
        s.attached = Some(handle.clone());
        s.media_type = Some(media_type);
        s.paused = true;
        s.current_time = 0.0;
        s.duration = s.next_duration;
        s.events.push(MediaElementEvent::LoadedMetadata);
        Ok(())
    }

    fn detach(&mut self) -> Result<(), EngineError> {
        let mut s = self.state();
        s.detach_calls += 1;
        s.attached = None;
        s.duration = f64::NAN;
        match s.fail_detach.clone() {
            Some(reason) => Err(EngineError(reason)),
            None => Ok(()),
        }
    }

    fn play(&mut self) {
        let mut s = self.state();
        if s.reject_play {
            s.events.push(MediaElementEvent::PlayRejected("NotAllowedError".into()));
            return;
        }
        if s.paused {
            s.paused = false;
            s.events.push(MediaElementEvent::Play);
        }
    }

    fn pause(&mut self) {
        let mut s = self.state();
        if !s.paused {
            s.paused = true;
            s.events.push(MediaElementEvent::Pause);
        }
    }

    fn set_current_time(&mut self, time: f64) {
        self.state().current_time = time;
    }

    fn current_time(&self) -> f64 {
        self.state().current_time
    }

    fn duration(&self) -> f64 {
        self.state().duration
    }

    fn set_volume(&mut self, volume: f64) {
        let mut s = self.state();
        s.volume = volume;
        s.events.push(MediaElementEvent::VolumeChange);
    }

    fn volume(&self) -> f64 {
        self.state().volume
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.state().rate = rate;
    }

    fn set_loop(&mut self, looping: bool) {
        self.state().looping = looping;
    }

    fn set_video_visible(&mut self, visible: bool) {
        self.state().video_visible = visible;
    }

    fn is_paused(&self) -> bool {
        self.state().paused
    }

    fn drain_events(&mut self) -> Vec<MediaElementEvent> {
        std::mem::take(&mut self.state().events)
    }
}

// ── embedded player ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct EmbedState {
    pub created: Option<String>,
    pub autoplay: bool,
    pub create_calls: usize,
    pub destroy_calls: usize,
    pub fail_create: Option<String>,
    pub fail_destroy: Option<String>,
    pub player_state: i32,
    pub current_time: f64,
    pub duration: f64,
    pub volume: u8,
    pub muted: bool,
    pub rate: f64,
    pub visible: bool,
    pub title: Option<String>,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub seeks: Vec<f64>,
    pub events: Vec<EmbedEvent>,
}

impl Default for EmbedState {
    fn default() -> Self {
        Self {
            created: None,
            autoplay: false,
            create_calls: 0,
            destroy_calls: 0,
            fail_create: None,
            fail_destroy: None,
            player_state: -1,
            current_time: 0.0,
            duration: 212.0,
            volume: 100,
            muted: false,
            rate: 1.0,
            visible: false,
            title: None,
            play_calls: 0,
            pause_calls: 0,
            seeks: Vec::new(),
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeEmbedPlayer {
    inner: Arc<Mutex<EmbedState>>,
}

impl FakeEmbedPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, EmbedState> {
        self.inner.lock().unwrap()
    }

    /// Queue an event; state changes also update `player_state`
    pub fn push(&self, event: EmbedEvent) {
        let mut s = self.state();
        if let EmbedEvent::StateChange(state) = event {
            s.player_state = state;
        }
        s.events.push(event);
    }
}

impl EmbedPlayer for FakeEmbedPlayer {
    fn create(&mut self, video_id: &str, autoplay: bool) -> Result<(), EngineError> {
        let mut s = self.state();
        s.create_calls += 1;
        if let Some(reason) = s.fail_create.clone() {
            return Err(EngineError(reason));
        }
        s.created = Some(video_id.to_string());
        s.autoplay = autoplay;
        s.player_state = -1;
        s.current_time = 0.0;
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), EngineError> {
        let mut s = self.state();
        s.destroy_calls += 1;
        s.created = None;
        match s.fail_destroy.clone() {
            Some(reason) => Err(EngineError(reason)),
            None => Ok(()),
        }
    }

    fn play_video(&mut self) {
        let mut s = self.state();
        s.play_calls += 1;
        s.player_state = 1;
        s.events.push(EmbedEvent::StateChange(1));
    }

    fn pause_video(&mut self) {
        let mut s = self.state();
        s.pause_calls += 1;
        s.player_state = 2;
        s.events.push(EmbedEvent::StateChange(2));
    }

    fn seek_to(&mut self, seconds: f64) {
        let mut s = self.state();
        s.seeks.push(seconds);
        s.current_time = seconds;
    }

    fn set_volume(&mut self, volume: u8) {
        self.state().volume = volume;
    }

    fn mute(&mut self) {
        self.state().muted = true;
    }

    fn un_mute(&mut self) {
        self.state().muted = false;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.state().rate = rate;
    }

    fn current_time(&self) -> f64 {
        self.state().current_time
    }

    fn duration(&self) -> f64 {
        self.state().duration
    }

    fn player_state(&self) -> i32 {
        self.state().player_state
    }

    fn set_visible(&mut self, visible: bool) {
        self.state().visible = visible;
    }

    fn video_title(&self) -> Option<String> {
        self.state().title.clone()
    }

    fn drain_events(&mut self) -> Vec<EmbedEvent> {
        std::mem::take(&mut self.state().events)
    }
}

// ── media handles ─────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct HandleState {
    pub created: usize,
    pub live: BTreeSet<String>,
    pub revoked: Vec<String>,
    /// File names whose registration fails
    pub fail_for: BTreeSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeHandles {
    inner: Arc<Mutex<HandleState>>,
}

impl FakeHandles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, HandleState> {
        self.inner.lock().unwrap()
    }

    pub fn live_count(&self) -> usize {
        self.state().live.len()
    }
}

impl MediaHandles for FakeHandles {
    fn create(&mut self, file: &LocalFile) -> Result<MediaHandle, EngineError> {
        let mut s = self.state();
        if s.fail_for.contains(&file.name) {
            return Err(EngineError(format!("cannot read {}", file.name)));
        }
        s.created += 1;
        let token = format!("blob:{}-{}", s.created, file.name);
        s.live.insert(token.clone());
        Ok(MediaHandle::new(token))
    }

    fn revoke(&mut self, handle: &MediaHandle) {
        let mut s = self.state();
        s.live.remove(handle.as_str());
        s.revoked.push(handle.as_str().to_string());
    }
}

// ── notifier ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    inner: Arc<Mutex<Vec<(String, NoticeKind)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(String, NoticeKind)> {
        self.inner.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(String, NoticeKind)> {
        self.inner.lock().unwrap().last().cloned()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.inner.lock().unwrap().iter().any(|(m, _)| m == message)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        self.inner.lock().unwrap().push((message.to_string(), kind));
    }
}

//! Coordinator wired to fake engines, shared by the coordinator and handler tests.

use std::time::{Duration, Instant};

use crate::application::coordinator::Coordinator;
use crate::application::settings::{Settings, SettingsStore};
use crate::config::PlayerConfig;
use crate::core::events::{CoordinatorEvent, EmbedEvent, EventReceiver};
use crate::core::models::{BackendKind, LocalFile, MediaType};
use crate::core::traits::KeyValueStore;
use crate::modules::playback::fakes::{FakeEmbedPlayer, FakeHandles, FakeMediaElement, RecordingNotifier};
use crate::modules::playback::local_backend::LocalMediaBackend;
use crate::modules::playback::youtube_backend::YoutubeBackend;
use crate::modules::storage::memory_backend::MemoryStorageBackend;
use crate::utils::SETTINGS_KEY;

pub const VIDEO: &str = "dQw4w9WgXcQ";

pub struct Harness {
    pub coordinator: Coordinator,
    pub element: FakeMediaElement,
    pub embed: FakeEmbedPlayer,
    pub handles: FakeHandles,
    pub notifier: RecordingNotifier,
    pub storage: MemoryStorageBackend,
    pub events: EventReceiver,
    pub t0: Instant,
}

impl Harness {
    /// Tick at `ms` milliseconds after the harness was built
    pub fn tick(&mut self, ms: u64) {
        self.coordinator.tick(self.t0 + Duration::from_millis(ms));
    }

    pub fn drain(&self) -> Vec<CoordinatorEvent> {
        self.events.try_iter().collect()
    }

    pub fn remote_progress_count(&self) -> usize {
        self.drain()
            .iter()
            .filter(|e| matches!(e, CoordinatorEvent::Progress { source: BackendKind::Remote, .. }))
            .count()
    }

    pub fn last_failure(&self) -> Option<CoordinatorEvent> {
        self.drain()
            .into_iter()
            .filter(|e| matches!(e, CoordinatorEvent::PlaybackFailed { .. }))
            .last()
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn harness() -> Harness {
    harness_with(PlayerConfig::default(), None)
}

pub fn harness_with(config: PlayerConfig, stored_settings: Option<serde_json::Value>) -> Harness {
    init_logger();

    let element = FakeMediaElement::new();
    let embed = FakeEmbedPlayer::new();
    let handles = FakeHandles::new();
    let notifier = RecordingNotifier::new();
    let mut storage = MemoryStorageBackend::new();
    if let Some(value) = stored_settings {
        storage.set(SETTINGS_KEY, value).unwrap();
    }

    let settings_store = SettingsStore::new(Box::new(storage.clone()), Settings::from_config(&config));
    let coordinator = Coordinator::new(config)
        .with_local_backend(Box::new(LocalMediaBackend::new(Box::new(element.clone()))))
        .with_remote_backend(Box::new(YoutubeBackend::new(Box::new(embed.clone()))))
        .with_media_handles(Box::new(handles.clone()))
        .with_notifier(Box::new(notifier.clone()))
        .with_settings_store(settings_store);
    let events = coordinator.events();

    Harness {
        coordinator,
        element,
        embed,
        handles,
        notifier,
        storage,
        events,
        t0: Instant::now(),
    }
}

pub fn file(name: &str) -> LocalFile {
    let media_type = if name.ends_with(".mp3") {
        MediaType::Audio
    } else {
        MediaType::Video
    };
    LocalFile::new(name, media_type)
}

pub fn files(names: &[&str]) -> Vec<LocalFile> {
    names.iter().map(|n| file(n)).collect()
}

pub fn load_ready_remote(h: &mut Harness) {
    h.coordinator
        .load_remote(&format!("https://www.youtube.com/watch?v={}", VIDEO))
        .unwrap();
    h.embed.push(EmbedEvent::Ready);
    h.tick(0);
}

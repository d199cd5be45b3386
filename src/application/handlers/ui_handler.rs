use log::debug;

use crate::application::coordinator::{Coordinator, OpResult};
use crate::application::settings::SettingsPatch;
use crate::core::error::PlayerError;
use crate::core::events::NoticeKind;

impl Coordinator {
    // ── settings ──────────────────────────────────────────────────────────────

    /// Apply a settings change in memory. Persisted by `save_settings`.
    pub fn update_settings(&mut self, patch: &SettingsPatch) {
        self.settings.apply(patch);
        self.settings.clamp(self.config.default_volume);
    }

    /// Persist the current settings snapshot
    pub fn save_settings(&mut self) -> OpResult {
        let patch = SettingsPatch {
            volume: Some(self.settings.volume),
            skip_duration: Some(self.settings.skip_duration),
            autoplay_next: Some(self.settings.autoplay_next),
            show_notifications: Some(self.settings.show_notifications),
            remember_volume: Some(self.settings.remember_volume),
        };
        self.persist(&patch)?;
        self.notify("Settings saved", NoticeKind::Success);
        Ok(())
    }

    /// Persist the current volume once the slider is released
    pub fn commit_volume(&mut self) -> OpResult {
        if !self.settings.remember_volume {
            return Ok(());
        }
        self.settings.volume = self.state.volume;
        self.persist(&SettingsPatch::volume(self.state.volume))
    }

    fn persist(&mut self, patch: &SettingsPatch) -> OpResult {
        let Some(store) = self.settings_store.as_mut() else {
            return Ok(());
        };
        match store.save(patch) {
            Ok(saved) => {
                debug!("Settings saved: {:?}", saved);
                Ok(())
            }
            Err(e) => self.reject(PlayerError::Storage(e)),
        }
    }

    // ── notifications ─────────────────────────────────────────────────────────

    /// Info and Success notices respect `show_notifications`; warnings and
    /// errors are always shown.
    pub(crate) fn notify(&mut self, message: &str, kind: NoticeKind) {
        let gated = matches!(kind, NoticeKind::Info | NoticeKind::Success);
        if gated && !self.settings.show_notifications {
            debug!("Notice suppressed: {}", message);
            return;
        }
        if let Some(notifier) = self.notifier.as_mut() {
            notifier.notify(message, kind);
        }
    }

    /// Report `error` to the user and return it
    pub(crate) fn reject<T>(&mut self, error: PlayerError) -> Result<T, PlayerError> {
        let kind = match error {
            PlayerError::InvalidUrl(_)
            | PlayerError::NoFilesSelected
            | PlayerError::NothingLoaded
            | PlayerError::EmptyPlaylist
            | PlayerError::IndexOutOfRange { .. } => NoticeKind::Warning,
            _ => NoticeKind::Error,
        };
        self.notify(&error.to_string(), kind);
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::*;
    use crate::config::PlayerConfig;
    use crate::core::traits::KeyValueStore;
    use crate::utils::SETTINGS_KEY;
    use serde_json::json;

    // ── settings / notifications ──────────────────────────────────────────────

    #[test]
    fn remembered_volume_is_applied_at_startup() {
        let h = harness_with(PlayerConfig::default(), Some(json!({ "volume": 0.3 })));
        assert_eq!(h.coordinator.state().volume, 0.3);

        let h = harness_with(
            PlayerConfig::default(),
            Some(json!({ "volume": 0.3, "rememberVolume": false })),
        );
        assert_eq!(h.coordinator.state().volume, 0.7);
    }

    #[test]
    fn commit_volume_persists_current_volume() {
        let mut h = harness();
        h.coordinator.set_volume(0.45);
        h.coordinator.commit_volume().unwrap();

        let stored = h.storage.get(SETTINGS_KEY).unwrap().unwrap();
        assert_eq!(stored["volume"], json!(0.45f32));
    }

    #[test]
    fn save_settings_writes_snapshot() {
        let mut h = harness();
        h.coordinator.update_settings(&SettingsPatch {
            skip_duration: Some(15),
            autoplay_next: Some(true),
            ..SettingsPatch::default()
        });
        h.coordinator.save_settings().unwrap();

        let stored = h.storage.get(SETTINGS_KEY).unwrap().unwrap();
        assert_eq!(stored["skipDuration"], json!(15));
        assert_eq!(stored["autoplayNext"], json!(true));
        assert!(h.notifier.contains("Settings saved"));
    }

    #[test]
    fn disabled_notifications_keep_warnings() {
        let mut h = harness();
        h.coordinator.update_settings(&SettingsPatch {
            show_notifications: Some(false),
            ..SettingsPatch::default()
        });

        h.coordinator.toggle_loop();
        assert!(h.notifier.notices().is_empty());

        let _ = h.coordinator.toggle_play_pause();
        assert_eq!(h.notifier.notices().len(), 1);
    }
}

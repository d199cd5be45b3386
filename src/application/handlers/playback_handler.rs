use log::debug;

use crate::application::coordinator::{Coordinator, OpResult};
use crate::application::handlers::NavTarget;
use crate::core::error::PlayerError;
use crate::core::events::{CoordinatorEvent, NoticeKind};
use crate::core::models::Mode;
use crate::modules::ui::progress_formatter::format_percent;
use crate::utils::snap_to_step;

/// Transport, volume, speed, the playback flags and playlist navigation.
///
/// All of these act on the active backend when there is one. Flags and
/// volume are coordinator state as well, so a backend bound later starts
/// with them.
impl Coordinator {
    // ── transport ─────────────────────────────────────────────────────────────

    pub fn toggle_play_pause(&mut self) -> OpResult {
        let Some(backend) = self.active_backend_mut() else {
            return self.reject(PlayerError::NothingLoaded);
        };

        if backend.is_playing() {
            backend.pause();
            self.notify("Paused", NoticeKind::Info);
        } else {
            backend.play();
            self.notify("Playing", NoticeKind::Info);
        }
        Ok(())
    }

    pub fn play(&mut self) -> OpResult {
        match self.active_backend_mut() {
            Some(backend) => {
                backend.play();
                Ok(())
            }
            None => self.reject(PlayerError::NothingLoaded),
        }
    }

    pub fn pause(&mut self) -> OpResult {
        match self.active_backend_mut() {
            Some(backend) => {
                backend.pause();
                Ok(())
            }
            None => self.reject(PlayerError::NothingLoaded),
        }
    }

    /// Seek to `time` seconds, clamped to `[0, duration]`. With an unknown
    /// duration only the lower bound applies.
    pub fn seek_absolute(&mut self, time: f64) -> OpResult {
        if !time.is_finite() {
            return Ok(());
        }
        let state_duration = self.state.duration;
        let Some(backend) = self.active_backend_mut() else {
            return self.reject(PlayerError::NothingLoaded);
        };

        let duration = backend.duration().or(state_duration);
        let target = match duration {
            Some(total) => time.clamp(0.0, total),
            None => time.max(0.0),
        };
        backend.seek(target);

        self.state.current_time = target;
        self.emit_progress();
        Ok(())
    }

    pub fn seek_relative(&mut self, delta: f64) -> OpResult {
        let fallback = self.state.current_time;
        let Some(backend) = self.active_backend_mut() else {
            return self.reject(PlayerError::NothingLoaded);
        };
        let current = backend.current_time().unwrap_or(fallback);
        self.seek_absolute(current + delta)
    }

    /// Seek to a fraction (0.0 - 1.0) of the duration. No-op while the
    /// duration is unknown.
    pub fn seek_percent(&mut self, fraction: f64) -> OpResult {
        let state_duration = self.state.duration;
        let Some(backend) = self.active_backend_mut() else {
            return self.reject(PlayerError::NothingLoaded);
        };
        let Some(duration) = backend.duration().or(state_duration) else {
            debug!("Seek to {} ignored: duration unknown", format_percent(fraction));
            return Ok(());
        };
        self.seek_absolute(fraction.clamp(0.0, 1.0) * duration)
    }

    pub fn skip_forward(&mut self) -> OpResult {
        let skip = self.settings.skip_duration;
        self.seek_relative(skip as f64)?;
        self.notify(&format!("⏩ +{}s", skip), NoticeKind::Info);
        Ok(())
    }

    pub fn skip_backward(&mut self) -> OpResult {
        let skip = self.settings.skip_duration;
        self.seek_relative(-(skip as f64))?;
        self.notify(&format!("⏪ -{}s", skip), NoticeKind::Info);
        Ok(())
    }

    // ── volume / speed / flags ────────────────────────────────────────────────

    /// Set volume (0.0 - 1.0). A positive volume while muted unmutes.
    pub fn set_volume(&mut self, volume: f32) {
        if !volume.is_finite() {
            return;
        }
        self.state.volume = volume.clamp(0.0, 1.0);
        if self.state.is_muted && self.state.volume > 0.0 {
            self.state.is_muted = false;
        }
        self.apply_volume();
    }

    pub fn step_volume(&mut self, delta: f32) {
        let target = snap_to_step(self.state.volume + delta, 0.01, 0.0, 1.0);
        self.set_volume(target);
        let label = format_percent(self.state.volume as f64);
        self.notify(&format!("Volume: {}", label), NoticeKind::Info);
    }

    /// Mute keeps `volume` and sends silence; unmute restores
    /// `previous_volume`.
    pub fn toggle_mute(&mut self) {
        if self.state.is_muted {
            self.state.is_muted = false;
            self.state.volume = self.state.previous_volume;
        } else {
            self.state.previous_volume = self.state.volume;
            self.state.is_muted = true;
        }
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        let effective = self.state.effective_volume();
        if let Some(backend) = self.active_backend_mut() {
            backend.set_volume(effective);
        }
        self.emit(CoordinatorEvent::VolumeChanged {
            volume: self.state.volume,
            muted: self.state.is_muted,
        });
    }

    /// Set speed, clamped to the configured bounds and snapped to the step
    pub fn set_speed(&mut self, speed: f32) {
        if !speed.is_finite() {
            return;
        }
        let speed = snap_to_step(
            speed,
            self.config.speed_step,
            self.config.min_speed,
            self.config.max_speed,
        );
        self.state.speed = speed;
        if let Some(backend) = self.active_backend_mut() {
            backend.set_speed(speed);
        }
        self.emit(CoordinatorEvent::SpeedChanged { speed });
        self.notify(&format!("Speed: {}x", speed), NoticeKind::Info);
    }

    pub fn increase_speed(&mut self) {
        self.set_speed(self.state.speed + self.config.speed_step);
    }

    pub fn decrease_speed(&mut self) {
        self.set_speed(self.state.speed - self.config.speed_step);
    }

    pub fn toggle_loop(&mut self) {
        let looping = !self.state.is_looping;
        self.state.is_looping = looping;
        if let Some(backend) = self.active_backend_mut() {
            backend.set_loop(looping);
        }
        self.emit(CoordinatorEvent::LoopChanged { looping });
        self.notify(if looping { "Repeat: ON" } else { "Repeat: OFF" }, NoticeKind::Info);
    }

    pub fn toggle_shuffle(&mut self) {
        let enabled = self.playlist.toggle_shuffle();
        self.state.is_shuffled = enabled;
        self.emit(CoordinatorEvent::ShuffleChanged { enabled });
        self.notify(if enabled { "Shuffle: ON" } else { "Shuffle: OFF" }, NoticeKind::Info);
    }

    /// Hide or show the video surface. The track keeps playing where it is.
    pub fn toggle_audio_only(&mut self) {
        let enabled = !self.state.audio_only;
        self.state.audio_only = enabled;
        if let Some(backend) = self.active_backend_mut() {
            backend.set_audio_only(enabled);
        }
        self.update_visualizer();
        self.emit(CoordinatorEvent::AudioOnlyChanged { enabled });
        self.notify(
            if enabled { "Audio Only: ON" } else { "Audio Only: OFF" },
            NoticeKind::Info,
        );
    }

    // ── playlist navigation ───────────────────────────────────────────────────

    pub fn play_next(&mut self) -> OpResult {
        self.navigate(true)
    }

    pub fn play_previous(&mut self) -> OpResult {
        self.navigate(false)
    }

    fn navigate(&mut self, forward: bool) -> OpResult {
        let target = match self.playlist.len() {
            0 => return self.reject(PlayerError::EmptyPlaylist),
            1 => NavTarget::Restart,
            _ => {
                let next = if forward {
                    self.playlist.next_index()
                } else {
                    self.playlist.previous_index()
                };
                match next {
                    Some(index) => NavTarget::Go(index),
                    None => return self.reject(PlayerError::EmptyPlaylist),
                }
            }
        };

        match target {
            NavTarget::Go(index) => self.load_index(index),
            NavTarget::Restart => self.restart_single(),
        }
    }

    /// Replay the only playlist entry from the start, without reloading it
    /// when it is already bound.
    fn restart_single(&mut self) -> OpResult {
        let already_bound = self.state.mode != Mode::Empty
            && self.bound_track.is_some()
            && self.bound_track.as_ref() == self.playlist.get(0);

        if !already_bound {
            return self.load_index(0);
        }

        if let Some(backend) = self.active_backend_mut() {
            backend.seek(0.0);
            backend.play();
        }
        self.state.current_time = 0.0;
        self.emit_progress();
        Ok(())
    }
}

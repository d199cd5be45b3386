use std::path::Path;

use chrono::Utc;
use log::{info, warn};

use crate::application::coordinator::{Coordinator, OpResult};
use crate::core::error::{BackendError, BackendErrorKind, PlayerError};
use crate::core::events::{CoordinatorEvent, NoticeKind};
use crate::core::models::{BackendKind, LocalFile, Mode, Track};
use crate::modules::library::scanner::scan_media_files;
use crate::utils::extract_video_id;

/// Loading sources into the playlist and editing it.
///
/// Every entry point that adds a track ends in `load_index`, which binds it
/// to the backend its kind calls for. Removed local entries give their media
/// handle back, deferred while the active backend still plays from it.
impl Coordinator {
    // ── loading ───────────────────────────────────────────────────────────────

    /// Load a picked file. A file whose name is already in the playlist reuses
    /// that entry instead of adding a duplicate.
    pub fn load_local(&mut self, file: LocalFile) -> OpResult {
        let index = match self.local_position(&file.name) {
            Some(index) => index,
            None => {
                let track = self.register_file(&file)?;
                let index = self.playlist.append(track);
                self.emit_playlist_changed();
                index
            }
        };

        self.load_index(index)?;
        self.record_recent(&file);
        self.notify("Media loaded successfully", NoticeKind::Success);
        Ok(())
    }

    /// Replace the playlist with `files` and start the first one.
    pub fn load_files(&mut self, files: Vec<LocalFile>) -> OpResult {
        if files.is_empty() {
            return self.reject(PlayerError::NoFilesSelected);
        }
        if self.media_handles.is_none() {
            return self.reject(PlayerError::BackendUnavailable(BackendKind::Local));
        }

        let mut tracks = Vec::with_capacity(files.len());
        for file in &files {
            match self.register_file(file) {
                Ok(track) => tracks.push(track),
                Err(e) => warn!("Skipping {}: {}", file.name, e),
            }
        }
        if tracks.is_empty() {
            return self.reject(PlayerError::NoFilesSelected);
        }

        let count = tracks.len();
        let old = self.playlist.replace_all(tracks);
        self.release_tracks(old);
        self.emit_playlist_changed();
        info!("Playlist replaced with {} files", count);
        self.notify(&format!("Loaded {} files", count), NoticeKind::Success);

        self.load_index(0)?;
        if let Some(first) = files.iter().find(|f| self.local_position(&f.name) == Some(0)) {
            let first = first.clone();
            self.record_recent(&first);
        }
        Ok(())
    }

    /// Scan `dir` recursively and load every supported file in name order.
    pub fn load_folder(&mut self, dir: &Path) -> OpResult {
        let files = match scan_media_files(dir, &self.config) {
            Ok(files) => files,
            Err(e) => return self.reject(PlayerError::FolderScan(e)),
        };

        if files.is_empty() {
            self.notify("No media files found in folder", NoticeKind::Warning);
            return Err(PlayerError::NoFilesSelected);
        }

        self.load_files(files)
    }

    /// Load a YouTube video from a URL or a bare video id.
    pub fn load_remote(&mut self, input: &str) -> OpResult {
        let input = input.trim();
        if input.is_empty() {
            self.notify("Please enter a YouTube URL", NoticeKind::Warning);
            return Err(PlayerError::InvalidUrl(String::new()));
        }

        let Some(video_id) = extract_video_id(input) else {
            self.notify("Invalid YouTube URL", NoticeKind::Warning);
            return Err(PlayerError::InvalidUrl(input.to_string()));
        };

        let index = match self.remote_position(&video_id) {
            Some(index) => index,
            None => {
                let index = self.playlist.append(Track::remote(video_id));
                self.emit_playlist_changed();
                index
            }
        };

        self.load_index(index)
    }

    /// Select a playlist entry and load it
    pub fn play_from_playlist(&mut self, index: usize) -> OpResult {
        if index >= self.playlist.len() {
            let len = self.playlist.len();
            return self.reject(PlayerError::IndexOutOfRange { index, len });
        }
        self.load_index(index)
    }

    /// Release the active backend and return to `Empty`
    pub fn unload(&mut self) {
        if self.state.mode == Mode::Empty {
            return;
        }
        self.generation += 1;
        self.unbind_active();
        info!("Playback unloaded");
        self.emit(CoordinatorEvent::ModeChanged { mode: Mode::Empty });
        self.emit(CoordinatorEvent::PlayingChanged { playing: false });
    }

    fn local_position(&self, name: &str) -> Option<usize> {
        self.playlist
            .position_of(name)
            .filter(|&i| self.playlist.get(i).is_some_and(|t| t.kind() == BackendKind::Local))
    }

    fn remote_position(&self, video_id: &str) -> Option<usize> {
        self.playlist
            .position_of(video_id)
            .filter(|&i| self.playlist.get(i).is_some_and(|t| t.kind() == BackendKind::Remote))
    }

    fn register_file(&mut self, file: &LocalFile) -> Result<Track, PlayerError> {
        let Some(handles) = self.media_handles.as_mut() else {
            return self.reject(PlayerError::BackendUnavailable(BackendKind::Local));
        };

        match handles.create(file) {
            Ok(handle) => Ok(Track::local(file.name.clone(), handle, file.media_type)),
            Err(e) => {
                let error = BackendError::new(
                    BackendErrorKind::InvalidSource,
                    format!("Cannot open {}: {}", file.name, e),
                );
                self.notify("Error loading media file", NoticeKind::Error);
                Err(PlayerError::Backend(error))
            }
        }
    }

    fn record_recent(&mut self, file: &LocalFile) {
        self.recent.record(file, Utc::now());
        if let Some(store) = self.settings_store.as_mut() {
            if let Err(e) = store.save_recent(&self.recent) {
                warn!("Could not save recent files: {}", e);
            }
        }
    }

    pub fn clear_recent_files(&mut self) -> OpResult {
        self.recent.clear();
        if let Some(store) = self.settings_store.as_mut() {
            if let Err(e) = store.save_recent(&self.recent) {
                return self.reject(PlayerError::Storage(e));
            }
        }
        Ok(())
    }

    pub(crate) fn load_index(&mut self, index: usize) -> OpResult {
        let Some(track) = self.playlist.get(index).cloned() else {
            let len = self.playlist.len();
            return self.reject(PlayerError::IndexOutOfRange { index, len });
        };

        self.playlist.set_current_index(index);
        self.emit_playlist_changed();
        self.bind(track, Some(index))
    }

    // ── playlist editing ──────────────────────────────────────────────────────

    pub fn remove_at(&mut self, index: usize) -> OpResult {
        let Some(removed) = self.playlist.remove_at(index) else {
            let len = self.playlist.len();
            return self.reject(PlayerError::IndexOutOfRange { index, len });
        };

        self.release_track(&removed);
        self.emit_playlist_changed();
        self.notify("Removed from playlist", NoticeKind::Info);
        Ok(())
    }

    pub fn clear_playlist(&mut self) {
        let old = self.playlist.clear();
        self.release_tracks(old);
        self.emit_playlist_changed();
        self.notify("Playlist cleared", NoticeKind::Info);
    }

    pub fn sort_playlist(&mut self) {
        self.playlist.sort_by_name();
        self.emit_playlist_changed();
        self.notify("Playlist sorted", NoticeKind::Info);
    }
}

pub mod local_backend;
pub mod playback_progress;
pub mod shuffle_manager;
pub mod timers;
pub mod youtube_backend;

#[cfg(test)]
pub(crate) mod fakes;

pub use local_backend::LocalMediaBackend;
pub use youtube_backend::YoutubeBackend;

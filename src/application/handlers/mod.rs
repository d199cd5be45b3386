//! Operations of the [`Coordinator`](crate::application::coordinator::Coordinator),
//! grouped by concern. Each file adds an `impl Coordinator` block; the state
//! machine core, backend events and timers stay in `coordinator.rs`.

pub mod library_handler;
pub mod playback_handler;
pub mod ui_handler;

/// What `navigate` should do once the playlist has been consulted.
pub enum NavTarget {
    /// Load the entry at this index.
    Go(usize),
    /// Replay the single entry from the beginning.
    Restart,
}

use crate::core::models::Track;
use crate::modules::playback::shuffle_manager::ShuffleManager;

/// Ordered tracks plus the current-entry pointer and the shuffle order.
///
/// `current_index` is always `None` or a valid index. Every structural change
/// redraws the shuffle order when shuffle is on.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current_index: Option<usize>,
    shuffle: ShuffleManager,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.tracks.get(i))
    }

    /// Point at `index`. Out-of-range indices are refused.
    pub fn set_current_index(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current_index = Some(index);
            true
        } else {
            false
        }
    }

    /// Position of the entry with the given identity (name for local files,
    /// video id for remote ones)
    pub fn position_of(&self, identity: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.identity() == identity)
    }

    /// Append and return the new entry's index
    pub fn append(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.recompute_shuffle_order();
        self.tracks.len() - 1
    }

    /// Remove the entry at `index`.
    ///
    /// When the removed index is at or before the current one and the current
    /// one is not the first, the pointer moves back by one so it keeps a valid
    /// neighbour. An emptied playlist has no current entry.
    pub fn remove_at(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }

        let removed = self.tracks.remove(index);

        if self.tracks.is_empty() {
            self.current_index = None;
        } else if let Some(current) = self.current_index {
            if index <= current && current > 0 {
                self.current_index = Some(current - 1);
            }
        }

        self.recompute_shuffle_order();
        Some(removed)
    }

    /// Remove everything and hand the old entries back
    pub fn clear(&mut self) -> Vec<Track> {
        self.current_index = None;
        let old = std::mem::take(&mut self.tracks);
        self.recompute_shuffle_order();
        old
    }

    /// Swap in a new list with nothing selected; returns the old entries
    pub fn replace_all(&mut self, tracks: Vec<Track>) -> Vec<Track> {
        self.current_index = None;
        let old = std::mem::replace(&mut self.tracks, tracks);
        self.recompute_shuffle_order();
        old
    }

    /// Stable sort by display name. The current pointer follows its track.
    pub fn sort_by_name(&mut self) {
        let current = self.current_index;
        let mut entries: Vec<(usize, Track)> = std::mem::take(&mut self.tracks)
            .into_iter()
            .enumerate()
            .collect();
        entries.sort_by(|(_, a), (_, b)| a.name.cmp(&b.name));

        self.current_index = current.and_then(|old| entries.iter().position(|(i, _)| *i == old));
        self.tracks = entries.into_iter().map(|(_, t)| t).collect();
        self.recompute_shuffle_order();
    }

    /// Draw a fresh shuffle order for the current contents
    pub fn recompute_shuffle_order(&mut self) {
        self.shuffle.initialize(self.tracks.len(), self.current_index);
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle.is_enabled()
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle.toggle(self.tracks.len(), self.current_index)
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle.set_enabled(enabled, self.tracks.len(), self.current_index);
    }

    /// Shuffle permutation (empty while shuffle is off)
    pub fn shuffle_order(&self) -> &[usize] {
        self.shuffle.order()
    }

    /// Index after the current one, wrapping; follows the shuffle order when on
    pub fn next_index(&mut self) -> Option<usize> {
        self.shuffle.next_index(self.current_index, self.tracks.len())
    }

    /// Index before the current one, wrapping; follows the shuffle order when on
    pub fn previous_index(&mut self) -> Option<usize> {
        self.shuffle.previous_index(self.current_index, self.tracks.len())
    }
}

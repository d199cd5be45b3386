use rand::seq::SliceRandom;

/// Manages shuffle state as a permutation of playlist indices
///
/// Uses a "shuffle order" approach:
/// - Holds a randomized permutation of every playlist index
/// - Next/previous walk the permutation cyclically, so every entry is visited
///   exactly once per lap and navigation never stops at the ends
/// - Any structural playlist change discards the permutation and draws a new
///   one; it is never patched in place
#[derive(Debug, Clone, Default)]
pub struct ShuffleManager {
    /// Whether shuffle is currently enabled
    enabled: bool,

    /// Permutation of `0..playlist_size`; empty while disabled
    order: Vec<usize>,
}

impl ShuffleManager {
    /// Create a new shuffle manager
    pub fn new() -> Self {
        Self {
            enabled: false,
            order: Vec::new(),
        }
    }

    /// Toggle shuffle on/off
    pub fn toggle(&mut self, playlist_size: usize, current_index: Option<usize>) -> bool {
        self.set_enabled(!self.enabled, playlist_size, current_index);
        self.enabled
    }

    /// Set shuffle state explicitly
    pub fn set_enabled(&mut self, enabled: bool, playlist_size: usize, current_index: Option<usize>) {
        if self.enabled == enabled {
            return;
        }

        self.enabled = enabled;
        if self.enabled {
            self.initialize(playlist_size, current_index);
        } else {
            self.order.clear();
        }
    }

    /// Check if shuffle is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Draw a fresh permutation for a playlist of `playlist_size` entries
    ///
    /// Call this when:
    /// - Shuffle is toggled on
    /// - The playlist is modified in any way that moves indices
    ///
    /// The current entry, if any, is placed first so the next lap starts
    /// from what is already playing.
    pub fn initialize(&mut self, playlist_size: usize, current_index: Option<usize>) {
        if !self.enabled {
            return;
        }

        let mut indices: Vec<usize> = (0..playlist_size).collect();
        let mut rng = rand::rng();
        indices.shuffle(&mut rng);

        if let Some(first) = current_index {
            if let Some(pos) = indices.iter().position(|&i| i == first) {
                indices.swap(0, pos);
            }
        }

        self.order = indices;
    }

    /// Get the next index to play, wrapping around at the end
    ///
    /// # Returns
    /// * `Some(usize)` - Next index to play
    /// * `None` - Playlist is empty
    pub fn next_index(&mut self, current_index: Option<usize>, playlist_size: usize) -> Option<usize> {
        if playlist_size == 0 {
            return None;
        }

        if !self.enabled {
            return Some(match current_index {
                Some(idx) => (idx + 1) % playlist_size,
                None => 0,
            });
        }

        self.ensure_consistent(playlist_size, current_index);
        let next = match self.position_of(current_index) {
            Some(pos) => self.order[(pos + 1) % playlist_size],
            None => self.order[0],
        };
        Some(next)
    }

    /// Get the previous index to play, wrapping around at the start
    ///
    /// # Returns
    /// * `Some(usize)` - Previous index to play
    /// * `None` - Playlist is empty
    pub fn previous_index(&mut self, current_index: Option<usize>, playlist_size: usize) -> Option<usize> {
        if playlist_size == 0 {
            return None;
        }

        if !self.enabled {
            return Some(match current_index {
                Some(idx) => (idx + playlist_size - 1) % playlist_size,
                None => playlist_size - 1,
            });
        }

        self.ensure_consistent(playlist_size, current_index);
        let prev = match self.position_of(current_index) {
            Some(pos) => self.order[(pos + playlist_size - 1) % playlist_size],
            None => self.order[playlist_size - 1],
        };
        Some(prev)
    }

    /// Current permutation (empty while disabled)
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    fn position_of(&self, index: Option<usize>) -> Option<usize> {
        index.and_then(|idx| self.order.iter().position(|&i| i == idx))
    }

    fn ensure_consistent(&mut self, playlist_size: usize, current_index: Option<usize>) {
        if self.order.len() != playlist_size {
            self.initialize(playlist_size, current_index);
        }
    }
}

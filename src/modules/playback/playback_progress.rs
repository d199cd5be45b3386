use crate::modules::ui::progress_formatter::format_progress_label;

/// Represents the current state of playback progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackProgress {
    elapsed: f64,
    duration: Option<f64>,
}

impl PlaybackProgress {
    /// Creates a new PlaybackProgress instance
    ///
    /// # Arguments
    /// * `elapsed` - The current position in seconds
    /// * `duration` - The total duration in seconds, `None` while unknown
    ///
    /// Elapsed is clamped to `[0, duration]` when the duration is known.
    /// Non-positive or non-finite durations are treated as unknown.
    pub fn new(elapsed: f64, duration: Option<f64>) -> Self {
        let duration = duration.filter(|d| d.is_finite() && *d > 0.0);
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        let elapsed = match duration {
            Some(total) => elapsed.min(total),
            None => elapsed,
        };

        Self { elapsed, duration }
    }

    /// Returns the ratio of progress (0.0 to 1.0), `None` while the duration
    /// is unknown
    pub fn ratio(&self) -> Option<f64> {
        self.duration.map(|total| (self.elapsed / total).clamp(0.0, 1.0))
    }

    /// Returns the elapsed seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Returns the total seconds, if known
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// "0:34 / 3:10"
    pub fn label(&self) -> String {
        format_progress_label(self.elapsed, self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_clamped_to_duration() {
        let p = PlaybackProgress::new(250.0, Some(200.0));
        assert_eq!(p.elapsed(), 200.0);
        assert_eq!(p.ratio(), Some(1.0));
    }

    #[test]
    fn unknown_duration_has_no_ratio() {
        let p = PlaybackProgress::new(12.0, None);
        assert_eq!(p.ratio(), None);
        assert_eq!(p.elapsed(), 12.0);

        let p = PlaybackProgress::new(12.0, Some(0.0));
        assert_eq!(p.duration(), None);
    }

    #[test]
    fn label_uses_time_format() {
        assert_eq!(PlaybackProgress::new(34.0, Some(190.0)).label(), "0:34 / 3:10");
    }
}

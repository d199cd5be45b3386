use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::PlayerConfig;
use crate::core::events::NoticeKind;
use crate::core::traits::Notifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: NoticeKind,
}

impl Toast {
    /// Message with its kind marker, as displayed
    pub fn text(&self) -> String {
        let prefix = match self.kind {
            NoticeKind::Success => "✓",
            NoticeKind::Error => "✗",
            NoticeKind::Info => "ℹ",
            NoticeKind::Warning => "⚠",
        };
        format!("{} {}", prefix, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Showing,
    Fading,
}

/// Serial toast display: one toast at a time, in arrival order.
///
/// Each toast is shown for the configured duration, then fades before the
/// next one takes its place. The host calls [`ToastQueue::advance`] from its
/// render loop.
#[derive(Debug)]
pub struct ToastQueue {
    pending: VecDeque<Toast>,
    current: Option<(Toast, Instant)>,
    enabled: bool,
    duration: Duration,
    fade: Duration,
}

impl ToastQueue {
    pub fn new(duration: Duration, fade: Duration) -> Self {
        Self {
            pending: VecDeque::new(),
            current: None,
            enabled: true,
            duration,
            fade,
        }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(config.toast_duration(), config.toast_fade())
    }

    /// Stop accepting new toasts. Queued ones are kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Drop everything that has not been shown yet
    pub fn clear_queue(&mut self) {
        self.pending.clear();
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Retire the visible toast once its time is up and promote the next one.
    ///
    /// Returns the toast visible at `now`, if any.
    pub fn advance(&mut self, now: Instant) -> Option<(&Toast, ToastPhase)> {
        let lifetime = self.duration + self.fade;
        if self
            .current
            .as_ref()
            .is_some_and(|(_, shown_at)| now >= *shown_at + lifetime)
        {
            self.current = None;
        }

        if self.current.is_none() {
            if let Some(next) = self.pending.pop_front() {
                self.current = Some((next, now));
            }
        }

        let duration = self.duration;
        self.current.as_ref().map(|(toast, shown_at)| {
            let phase = if now >= *shown_at + duration {
                ToastPhase::Fading
            } else {
                ToastPhase::Showing
            };
            (toast, phase)
        })
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        if !self.enabled {
            debug!("Toast dropped: {}", message);
            return;
        }
        self.pending.push_back(Toast {
            message: message.to_string(),
            kind,
        });
    }
}

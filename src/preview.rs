//! Linear walk through a flow's screens in list order.

use crate::flow::{FlowData, Screen};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreviewSession {
    index: usize,
    playing: bool,
    /// When the current screen was shown, in seconds
    shown_at: f64,
}

impl PreviewSession {
    pub fn new(now: f64) -> Self {
        Self {
            index: 0,
            playing: false,
            shown_at: now,
        }
    }

    /// Current position, pulled back in range if screens were removed.
    pub fn index(&self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }

    pub fn current_screen<'a>(&self, flow: &'a FlowData) -> Option<&'a Screen> {
        flow.screens.get(self.index(flow.screens.len()))
    }

    pub fn can_go_next(&self, len: usize) -> bool {
        len > 0 && self.index(len) < len - 1
    }

    pub fn can_go_previous(&self, len: usize) -> bool {
        self.index(len) > 0
    }

    /// Advances one screen. Refuses to move past the last screen.
    pub fn next(&mut self, len: usize, now: f64) -> bool {
        if !self.can_go_next(len) {
            return false;
        }
        self.index = self.index(len) + 1;
        self.shown_at = now;
        true
    }

    /// Steps back one screen. Refuses to move before the first screen.
    pub fn previous(&mut self, len: usize, now: f64) -> bool {
        if !self.can_go_previous(len) {
            return false;
        }
        self.index = self.index(len) - 1;
        self.shown_at = now;
        true
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle_play(&mut self, now: f64) {
        self.playing = !self.playing;
        self.shown_at = now;
    }

    /// While playing, advances once `interval` seconds have passed on the
    /// current screen. Playback stops at the last screen.
    pub fn tick(&mut self, len: usize, now: f64, interval: f64) -> bool {
        if !self.playing || now - self.shown_at < interval {
            return false;
        }
        let advanced = self.next(len, now);
        if !self.can_go_next(len) {
            self.playing = false;
        }
        advanced
    }

    /// "k of N", one-based.
    pub fn progress_label(&self, len: usize) -> String {
        if len == 0 {
            return "0 of 0".to_owned();
        }
        format!("{} of {}", self.index(len) + 1, len)
    }
}

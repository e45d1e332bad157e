// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::{Duration, Instant};

pub const LOADING_FRAMES: [&str; 6] = ["🎓", "🧑", "📘", "💻", "✨", "🤖"];
pub const DEFAULT_FRAME_PERIOD: Duration = Duration::from_secs(1);

/// Cycles through a fixed set of frames while a turn is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingIndicator {
    frames: &'static [&'static str],
    period: Duration,
    started: Option<Instant>,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self {
            frames: &LOADING_FRAMES,
            period: DEFAULT_FRAME_PERIOD,
            started: None,
        }
    }
}

impl LoadingIndicator {
    pub fn with_period(mut self, period: Duration) -> Self {
        if !period.is_zero() {
            self.period = period;
        }
        self
    }

    pub fn start(&mut self, now: Instant) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.started = None;
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn frame_at(&self, now: Instant) -> Option<&'static str> {
        let started = self.started?;
        if self.frames.is_empty() {
            return None;
        }
        let elapsed = now.saturating_duration_since(started);
        let ticks = elapsed.as_millis() / self.period.as_millis().max(1);
        let index = (ticks % self.frames.len() as u128) as usize;
        Some(self.frames[index])
    }
}

#[cfg(test)]
mod tests {
    use super::{LOADING_FRAMES, LoadingIndicator};
    use std::time::{Duration, Instant};

    #[test]
    fn stopped_indicator_has_no_frame() {
        let indicator = LoadingIndicator::default();
        assert!(!indicator.is_running());
        assert_eq!(indicator.frame_at(Instant::now()), None);
    }

    #[test]
    fn frames_advance_once_per_period_and_wrap() {
        let start = Instant::now();
        let mut indicator = LoadingIndicator::default().with_period(Duration::from_millis(100));
        indicator.start(start);

        assert_eq!(indicator.frame_at(start), Some(LOADING_FRAMES[0]));
        assert_eq!(
            indicator.frame_at(start + Duration::from_millis(250)),
            Some(LOADING_FRAMES[2])
        );
        assert_eq!(
            indicator.frame_at(start + Duration::from_millis(600)),
            Some(LOADING_FRAMES[0])
        );
    }

    #[test]
    fn restarting_keeps_original_start_until_stopped() {
        let start = Instant::now();
        let mut indicator = LoadingIndicator::default().with_period(Duration::from_millis(100));
        indicator.start(start);
        indicator.start(start + Duration::from_millis(100));
        assert_eq!(
            indicator.frame_at(start + Duration::from_millis(100)),
            Some(LOADING_FRAMES[1])
        );

        indicator.stop();
        assert!(!indicator.is_running());
    }
}

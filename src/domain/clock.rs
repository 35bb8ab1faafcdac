use std::time::Duration;

/// Tracks active play time: wall time since the first frame minus every paused interval.
///
/// Timestamps are offsets from an arbitrary monotonic epoch chosen by the caller, which keeps
/// the clock a pure function of its stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayClock {
    game_start: Option<Duration>,
    pause_start: Option<Duration>,
    total_paused: Duration,
}

impl PlayClock {
    /// Records the start timestamp unless one is already set. Returns true when it was set now.
    pub fn start_if_unset(&mut self, now: Duration) -> bool {
        if self.game_start.is_some() {
            return false;
        }
        self.game_start = Some(now);
        true
    }

    pub fn is_started(&self) -> bool {
        self.game_start.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.pause_start.is_some()
    }

    /// Active play time at `now`. Zero before start; frozen while paused.
    pub fn elapsed(&self, now: Duration) -> Duration {
        let Some(start) = self.game_start else {
            return Duration::ZERO;
        };
        let reference = self.pause_start.unwrap_or(now);
        reference
            .saturating_sub(start)
            .saturating_sub(self.total_paused)
    }

    pub fn pause(&mut self, now: Duration) {
        if self.pause_start.is_none() {
            self.pause_start = Some(now);
        }
    }

    /// Folds the pause that just ended into the accumulator and returns its length.
    pub fn resume(&mut self, now: Duration) -> Duration {
        let Some(paused_at) = self.pause_start.take() else {
            return Duration::ZERO;
        };
        let paused_for = now.saturating_sub(paused_at);
        self.total_paused += paused_for;
        paused_for
    }

    pub fn total_paused(&self) -> Duration {
        self.total_paused
    }
}

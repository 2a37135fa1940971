//! Listen tracking
//!
//! Decides when a play counts as a "listen" for statistics: after
//! `min(30s, 25% of duration)` of the current activation, at most once
//! per activation.

use crate::types::PlaybackConfig;
use std::time::Duration;

/// Threshold rule for counting a listen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListenPolicy {
    /// Absolute threshold
    pub min_time: Duration,
    /// Relative threshold (fraction of duration)
    pub ratio: f64,
}

impl Default for ListenPolicy {
    fn default() -> Self {
        Self {
            min_time: Duration::from_secs(30),
            ratio: 0.25,
        }
    }
}

impl ListenPolicy {
    /// Policy from playback configuration
    pub fn from_config(config: &PlaybackConfig) -> Self {
        let ratio = config.listen_threshold_ratio;
        Self {
            min_time: Duration::from_secs(config.listen_threshold_secs),
            // A zero ratio would count every activation on its first tick
            ratio: if ratio > 0.0 && ratio <= 1.0 {
                ratio
            } else {
                Self::default().ratio
            },
        }
    }

    /// Playback position at which a track of `duration` counts
    pub fn threshold(&self, duration: Duration) -> Duration {
        self.min_time.min(duration.mul_f64(self.ratio))
    }

    /// Pure decision rule
    ///
    /// `true` when the listen has not been counted yet, the duration is
    /// known and `current_time` has reached the threshold.
    pub fn should_track_listen(
        &self,
        already_tracked: bool,
        current_time: Duration,
        duration: Duration,
    ) -> bool {
        !already_tracked && !duration.is_zero() && current_time >= self.threshold(duration)
    }
}

/// Per-activation listen state
///
/// Reset on every track activation; fires at most once in between.
#[derive(Debug, Clone, Default)]
pub struct ListenTracker {
    policy: ListenPolicy,
    tracked: bool,
}

impl ListenTracker {
    /// Create a tracker with `policy`
    pub fn new(policy: ListenPolicy) -> Self {
        Self {
            policy,
            tracked: false,
        }
    }

    /// Check a progress tick
    ///
    /// Returns true exactly once per activation, the first time the
    /// threshold is crossed. The flag is set before returning so the next
    /// tick cannot fire again.
    pub fn update(&mut self, current_time: Duration, duration: Duration) -> bool {
        if self
            .policy
            .should_track_listen(self.tracked, current_time, duration)
        {
            self.tracked = true;
            return true;
        }
        false
    }

    /// Forget the current activation
    pub fn reset(&mut self) {
        self.tracked = false;
    }

    /// Whether the current activation was already counted
    pub fn is_tracked(&self) -> bool {
        self.tracked
    }

    /// Active policy
    pub fn policy(&self) -> &ListenPolicy {
        &self.policy
    }
}

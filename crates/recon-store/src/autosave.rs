//! Debounced persistence scheduling.
//!
//! All timing queries take an explicit `Instant` so debounce behavior
//! can be tested against a virtual clock.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Persistence cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistConfig {
    pub enabled: bool,
    /// Quiet period after the last mutation before persisting.
    /// Further mutations reset the timer.
    pub debounce_ms: u64,
    /// Upper bound on how long continuous editing can defer a save,
    /// measured from the first unsaved mutation.
    pub max_delay_ms: u64,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 2000,
            max_delay_ms: 30_000,
        }
    }
}

impl PersistConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    fn should_save(&self, since_last_ms: u64, since_first_ms: u64) -> bool {
        if !self.enabled {
            return false;
        }
        since_last_ms >= self.debounce_ms || since_first_ms >= self.max_delay_ms
    }
}

/// Tracks unsaved mutations and decides when to persist.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty: bool,
    last_change: Option<Instant>,
    /// Reset on successful save.
    first_unsaved_change: Option<Instant>,
    saving: bool,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Records a mutation at `now`.
    pub fn mark_dirty_at(&mut self, now: Instant) {
        self.dirty = true;
        self.last_change = Some(now);
        if self.first_unsaved_change.is_none() {
            self.first_unsaved_change = Some(now);
        }
    }

    pub fn start_save(&mut self) {
        self.saving = true;
    }

    pub fn save_complete(&mut self) {
        self.dirty = false;
        self.saving = false;
        self.first_unsaved_change = None;
    }

    /// Leaves the tracker dirty; the next mutation or poll retries.
    pub fn save_failed(&mut self) {
        self.saving = false;
    }

    /// Whether a save should run at `now` given `config`.
    pub fn should_persist(&self, config: &PersistConfig, now: Instant) -> bool {
        if !self.dirty || self.saving {
            return false;
        }
        match (self.last_change, self.first_unsaved_change) {
            (Some(last), Some(first)) => {
                let since_last = now.saturating_duration_since(last).as_millis() as u64;
                let since_first = now.saturating_duration_since(first).as_millis() as u64;
                config.should_save(since_last, since_first)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clean_tracker_never_persists() {
        let tracker = DirtyTracker::new();
        assert!(!tracker.should_persist(&PersistConfig::default(), Instant::now()));
    }

    #[test]
    fn debounce_window_defers_then_fires() {
        let config = PersistConfig::default();
        let mut tracker = DirtyTracker::new();
        let t0 = Instant::now();

        tracker.mark_dirty_at(t0);
        assert!(!tracker.should_persist(&config, t0));
        assert!(!tracker.should_persist(&config, t0 + Duration::from_millis(1999)));
        assert!(tracker.should_persist(&config, t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn further_mutations_reset_debounce() {
        let config = PersistConfig::default();
        let mut tracker = DirtyTracker::new();
        let t0 = Instant::now();

        tracker.mark_dirty_at(t0);
        tracker.mark_dirty_at(t0 + Duration::from_millis(1500));
        assert!(!tracker.should_persist(&config, t0 + Duration::from_millis(2500)));
        assert!(tracker.should_persist(&config, t0 + Duration::from_millis(3500)));
    }

    #[test]
    fn max_delay_forces_save_under_continuous_editing() {
        let config = PersistConfig::default();
        let mut tracker = DirtyTracker::new();
        let t0 = Instant::now();

        // A mutation every second keeps resetting the debounce.
        let mut t = t0;
        for _ in 0..35 {
            tracker.mark_dirty_at(t);
            t += Duration::from_secs(1);
        }
        // Last mutation was under the debounce window ago, but the
        // first unsaved change is past max_delay.
        assert!(tracker.should_persist(&config, t - Duration::from_millis(500)));
    }

    #[test]
    fn failed_save_stays_dirty() {
        let config = PersistConfig::default();
        let mut tracker = DirtyTracker::new();
        let t0 = Instant::now();

        tracker.mark_dirty_at(t0);
        tracker.start_save();
        assert!(!tracker.should_persist(&config, t0 + Duration::from_secs(5)));
        tracker.save_failed();
        assert!(tracker.is_dirty());
        assert!(tracker.should_persist(&config, t0 + Duration::from_secs(5)));
    }

    #[test]
    fn disabled_config_never_fires() {
        let mut tracker = DirtyTracker::new();
        let t0 = Instant::now();
        tracker.mark_dirty_at(t0);
        assert!(!tracker.should_persist(&PersistConfig::disabled(), t0 + Duration::from_secs(60)));
    }
}

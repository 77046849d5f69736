//! Bounded change history.

use std::collections::VecDeque;

use recon_model::ChangeEvent;

/// Maximum number of change events retained.
pub const CHANGE_LOG_CAPACITY: usize = 50;

/// Ring buffer of the most recent change events, oldest first.
///
/// Pushing beyond capacity evicts the oldest event. The log is history
/// for context, not an event-sourcing journal: store state never
/// depends on replaying it.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    events: VecDeque<ChangeEvent>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a log from persisted events, keeping only the newest
    /// `CHANGE_LOG_CAPACITY` entries.
    pub fn from_events(events: Vec<ChangeEvent>) -> Self {
        let skip = events.len().saturating_sub(CHANGE_LOG_CAPACITY);
        Self {
            events: events.into_iter().skip(skip).collect(),
        }
    }

    pub fn push(&mut self, event: ChangeEvent) {
        if self.events.len() == CHANGE_LOG_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeEvent> {
        self.events.iter()
    }

    /// All retained events, oldest first.
    pub fn to_vec(&self) -> Vec<ChangeEvent> {
        self.events.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use recon_model::RecordId;

    fn event(tag: usize) -> ChangeEvent {
        ChangeEvent::new(
            RecordId::derive(&["log"]),
            "notes",
            "",
            tag.to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn capacity_is_enforced_fifo() {
        let mut log = ChangeLog::new();
        for tag in 0..60 {
            log.push(event(tag));
        }
        assert_eq!(log.len(), CHANGE_LOG_CAPACITY);
        // Events 0..10 were evicted.
        assert_eq!(log.iter().next().map(|e| e.new_value.as_str()), Some("10"));
        assert_eq!(log.to_vec().last().map(|e| e.new_value.clone()), Some("59".to_string()));
    }

    #[test]
    fn from_events_truncates_to_capacity() {
        let events: Vec<ChangeEvent> = (0..70).map(event).collect();
        let log = ChangeLog::from_events(events);
        assert_eq!(log.len(), CHANGE_LOG_CAPACITY);
        assert_eq!(log.iter().next().map(|e| e.new_value.as_str()), Some("20"));
    }
}

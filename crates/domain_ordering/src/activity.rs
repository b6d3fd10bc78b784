//! Recent activity feed shown on the staff dashboard

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ActivityId;

/// Feed length kept unless configured otherwise
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 50;

/// What an activity event is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Bill,
    Cleaning,
    CheckIn,
    CheckOut,
    Order,
    System,
}

/// A single entry in the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: ActivityId,
    pub message: String,
    pub kind: ActivityKind,
    pub timestamp: DateTime<Utc>,
}

/// Bounded feed, newest event first
#[derive(Debug, Clone)]
pub struct ActivityFeed {
    events: VecDeque<ActivityEvent>,
    capacity: usize,
}

impl ActivityFeed {
    /// Creates a feed holding at most `capacity` events (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records an event, evicting the oldest once full
    pub fn record(&mut self, message: impl Into<String>, kind: ActivityKind) -> &ActivityEvent {
        if self.events.len() == self.capacity {
            self.events.pop_back();
        }
        self.events.push_front(ActivityEvent {
            id: ActivityId::new(),
            message: message.into(),
            kind,
            timestamp: Utc::now(),
        });
        &self.events[0]
    }

    /// Events, newest first
    pub fn iter(&self) -> impl Iterator<Item = &ActivityEvent> {
        self.events.iter()
    }

    /// Most recent events of one kind, newest first
    pub fn of_kind(&self, kind: ActivityKind) -> impl Iterator<Item = &ActivityEvent> {
        self.events.iter().filter(move |event| event.kind == kind)
    }

    pub fn latest(&self) -> Option<&ActivityEvent> {
        self.events.front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ACTIVITY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut feed = ActivityFeed::default();
        feed.record("Table 2 marked as occupied", ActivityKind::Bill);
        feed.record("Room 101 checked out", ActivityKind::CheckOut);

        let messages: Vec<_> = feed.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["Room 101 checked out", "Table 2 marked as occupied"]);
        assert_eq!(feed.latest().unwrap().kind, ActivityKind::CheckOut);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut feed = ActivityFeed::with_capacity(3);
        for n in 0..5 {
            feed.record(format!("event {n}"), ActivityKind::System);
        }

        assert_eq!(feed.len(), 3);
        let messages: Vec<_> = feed.iter().map(|e| e.message.clone()).collect();
        assert_eq!(messages, vec!["event 4", "event 3", "event 2"]);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut feed = ActivityFeed::with_capacity(0);
        feed.record("a", ActivityKind::System);
        feed.record("b", ActivityKind::System);
        assert_eq!(feed.capacity(), 1);
        assert_eq!(feed.latest().unwrap().message, "b");
    }

    #[test]
    fn test_of_kind_filters() {
        let mut feed = ActivityFeed::default();
        feed.record("bill", ActivityKind::Bill);
        feed.record("order", ActivityKind::Order);
        feed.record("bill 2", ActivityKind::Bill);

        assert_eq!(feed.of_kind(ActivityKind::Bill).count(), 2);
        assert_eq!(feed.of_kind(ActivityKind::Cleaning).count(), 0);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ActivityKind::CheckIn).unwrap(), "\"check_in\"");
    }
}

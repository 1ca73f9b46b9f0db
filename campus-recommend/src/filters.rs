//! Stateless catalog filters backing the detail and discovery panels.

use chrono::{DateTime, Utc};

use campus_core::types::Event;

pub const DEFAULT_SIMILAR_LIMIT: usize = 2;
pub const DEFAULT_POPULAR_LIMIT: usize = 5;
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Events sharing `current`'s category, excluding `current` itself.
/// Input order is preserved.
pub fn similar_events(current: &Event, all: &[Event], limit: usize) -> Vec<Event> {
    all.iter()
        .filter(|event| event.id != current.id && event.category == current.category)
        .take(limit)
        .cloned()
        .collect()
}

/// The `limit` most-registered events, busiest first.
pub fn popular_events(events: &[Event], limit: usize) -> Vec<Event> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| b.registration_count.cmp(&a.registration_count));
    sorted.truncate(limit);
    sorted
}

/// Events strictly after `now`, soonest first.
pub fn upcoming_events(events: &[Event], now: DateTime<Utc>, limit: usize) -> Vec<Event> {
    let mut coming: Vec<Event> = events.iter().filter(|event| event.time > now).cloned().collect();
    coming.sort_by_key(|event| event.time);
    coming.truncate(limit);
    coming
}

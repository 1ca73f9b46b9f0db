//! Built-in sample catalog.
//!
//! The event catalog is owned by an external provider; this static list
//! stands in for it so the runner can exercise the data core end to end.

use chrono::{TimeZone, Utc};

use campus_core::types::{Event, EventCategory};

pub fn sample_events() -> Vec<Event> {
    vec![
        Event {
            id: "1".to_string(),
            name: "Tech Innovation Workshop".to_string(),
            time: Utc.with_ymd_and_hms(2026, 9, 15, 10, 0, 0).unwrap(),
            venue: "Computer Lab A".to_string(),
            category: EventCategory::Tech,
            description: "Hands-on sessions on modern development practices and emerging technologies.".to_string(),
            capacity: 50,
            registration_count: 45,
        },
        Event {
            id: "2".to_string(),
            name: "Campus Sports Day".to_string(),
            time: Utc.with_ymd_and_hms(2026, 9, 20, 9, 0, 0).unwrap(),
            venue: "Sports Ground".to_string(),
            category: EventCategory::Sports,
            description: "Annual inter-department competition: football, basketball, cricket, athletics.".to_string(),
            capacity: 200,
            registration_count: 120,
        },
        Event {
            id: "3".to_string(),
            name: "Career Guidance Seminar".to_string(),
            time: Utc.with_ymd_and_hms(2026, 9, 18, 14, 0, 0).unwrap(),
            venue: "Main Auditorium".to_string(),
            category: EventCategory::Seminar,
            description: "Industry experts on career opportunities and skill development.".to_string(),
            capacity: 100,
            registration_count: 80,
        },
        Event {
            id: "4".to_string(),
            name: "Cultural Night".to_string(),
            time: Utc.with_ymd_and_hms(2026, 9, 25, 18, 0, 0).unwrap(),
            venue: "Open Air Theater".to_string(),
            category: EventCategory::Cultural,
            description: "Music, dance, drama, and poetry from across campus.".to_string(),
            capacity: 300,
            registration_count: 150,
        },
        Event {
            id: "5".to_string(),
            name: "Research Poster Exhibition".to_string(),
            time: Utc.with_ymd_and_hms(2026, 10, 2, 11, 0, 0).unwrap(),
            venue: "Library Hall".to_string(),
            category: EventCategory::Academic,
            description: "Final-year students present their research posters.".to_string(),
            capacity: 80,
            registration_count: 25,
        },
        Event {
            id: "6".to_string(),
            name: "Charcoal Sketching Workshop".to_string(),
            time: Utc.with_ymd_and_hms(2026, 10, 9, 15, 0, 0).unwrap(),
            venue: "Arts Studio".to_string(),
            category: EventCategory::Art,
            description: "Beginner-friendly sketching session, materials provided.".to_string(),
            capacity: 30,
            registration_count: 12,
        },
    ]
}

use tracing;

use campus_core::types::{Event, UserPreferences};
use campus_repository::Repository;

use crate::filters::popular_events;

pub const DEFAULT_TOP_N: usize = 3;

// Weighted scoring: preference 60%, popularity 25%, availability 15%.
const CATEGORY_WEIGHT: f64 = 0.6;
const POPULARITY_WEIGHT: f64 = 0.25;
const AVAILABILITY_WEIGHT: f64 = 0.15;

/// Registration counts are normalized against a fixed reference crowd size,
/// not the catalog at hand.
const POPULARITY_NORMALIZER: f64 = 100.0;

/// Ranks a candidate event list against the stored preference history.
#[derive(Clone)]
pub struct RecommendationEngine {
    repo: Repository,
}

impl RecommendationEngine {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// The `top_n` best matches for the current user, best first.
    ///
    /// Best-effort by construction: a failed or empty preference read ranks
    /// by popularity alone, so this never blocks or errors out of the UI.
    pub async fn recommend(&self, events: &[Event], top_n: usize) -> Vec<Event> {
        let preferences = self.repo.get_user_preferences().await;
        if !preferences.has_history() {
            tracing::debug!("no preference history, ranking by popularity");
        }
        rank(events, &preferences, top_n)
    }
}

/// Deterministic ranking of `events` under `preferences`.
///
/// Without preference history this is the pure popularity fallback. The sort
/// is stable, so equally scored events keep their input order.
pub fn rank(events: &[Event], preferences: &UserPreferences, top_n: usize) -> Vec<Event> {
    if !preferences.has_history() {
        return popular_events(events, top_n);
    }

    let mut scored: Vec<(f64, &Event)> = events
        .iter()
        .map(|event| (relevance_score(event, preferences), event))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    scored
        .into_iter()
        .take(top_n)
        .map(|(_, event)| event.clone())
        .collect()
}

fn relevance_score(event: &Event, preferences: &UserPreferences) -> f64 {
    let category_score = f64::from(preferences.affinity(event.category));
    let popularity_score = f64::from(event.registration_count) / POPULARITY_NORMALIZER;
    let availability_score = if event.capacity == 0 {
        0.0
    } else {
        (f64::from(event.capacity) - f64::from(event.registration_count))
            / f64::from(event.capacity)
    };

    CATEGORY_WEIGHT * category_score
        + POPULARITY_WEIGHT * popularity_score
        + AVAILABILITY_WEIGHT * availability_score
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use campus_core::config::{Config, RecommendConfig, StorageConfig};
    use campus_core::types::{Event, EventCategory, UserPreferences};
    use campus_core::CampusContext;
    use campus_repository::Repository;

    use super::*;

    fn event(id: &str, category: EventCategory, registration_count: u32, capacity: u32) -> Event {
        Event {
            id: id.to_string(),
            name: format!("Event {id}"),
            time: Utc.with_ymd_and_hms(2026, 10, 1, 10, 0, 0).unwrap(),
            venue: "Main Auditorium".to_string(),
            category,
            description: String::new(),
            capacity,
            registration_count,
        }
    }

    fn tech_heavy_preferences() -> UserPreferences {
        let mut prefs = UserPreferences::default();
        for _ in 0..3 {
            prefs.record_registration(EventCategory::Tech);
        }
        prefs
    }

    #[test]
    fn scores_match_the_documented_weighting() {
        let prefs = tech_heavy_preferences();

        // 0.6*3 + 0.25*0.45 + 0.15*0.1
        let tech = event("1", EventCategory::Tech, 45, 50);
        assert!((relevance_score(&tech, &prefs) - 1.9125).abs() < 1e-9);

        // 0.6*0 + 0.25*1.2 + 0.15*0.4
        let sports = event("2", EventCategory::Sports, 120, 200);
        assert!((relevance_score(&sports, &prefs) - 0.36).abs() < 1e-9);
    }

    #[test]
    fn preferred_category_outranks_raw_popularity() {
        let prefs = tech_heavy_preferences();
        let events = vec![
            event("2", EventCategory::Sports, 120, 200),
            event("1", EventCategory::Tech, 45, 50),
        ];

        let ranked = rank(&events, &prefs, 3);
        let ids: Vec<&str> = ranked.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn cold_start_falls_back_to_popularity() {
        let events = vec![
            event("1", EventCategory::Tech, 45, 50),
            event("2", EventCategory::Sports, 120, 200),
            event("3", EventCategory::Seminar, 80, 100),
            event("4", EventCategory::Cultural, 150, 300),
        ];

        let ranked = rank(&events, &UserPreferences::default(), 3);
        let ids: Vec<&str> = ranked.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["4", "2", "3"]);
    }

    #[test]
    fn ranking_is_deterministic() {
        let prefs = tech_heavy_preferences();
        let events = vec![
            event("1", EventCategory::Tech, 45, 50),
            event("2", EventCategory::Sports, 120, 200),
            event("3", EventCategory::Tech, 10, 40),
        ];

        let first = rank(&events, &prefs, 3);
        let second = rank(&events, &prefs, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn equally_scored_events_keep_input_order() {
        let prefs = tech_heavy_preferences();
        let events = vec![
            event("a", EventCategory::Sports, 50, 100),
            event("b", EventCategory::Sports, 50, 100),
        ];

        let ranked = rank(&events, &prefs, 2);
        let ids: Vec<&str> = ranked.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn zero_capacity_contributes_no_availability() {
        let prefs = tech_heavy_preferences();
        let stale = event("1", EventCategory::Tech, 0, 0);

        // 0.6*3 + 0.25*0 + 0.15*0
        assert!((relevance_score(&stale, &prefs) - 1.8).abs() < 1e-9);
    }

    #[test]
    fn overbooked_events_score_negative_availability() {
        let packed = event("1", EventCategory::Sports, 60, 50);

        // 0.25*0.6 + 0.15*(-0.2)
        let score = relevance_score(&packed, &tech_heavy_preferences());
        assert!((score - (0.25 * 0.6 + 0.15 * -0.2)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn engine_reads_history_through_the_repository() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            storage: StorageConfig {
                path: dir.path().join("db"),
            },
            recommend: RecommendConfig { top_n: 3 },
        };
        let ctx = CampusContext::new(config).await.unwrap();
        let repo = Repository::new(ctx);
        let engine = RecommendationEngine::new(repo.clone());

        let events = vec![
            event("2", EventCategory::Sports, 120, 200),
            event("1", EventCategory::Tech, 45, 50),
        ];

        // Cold start: most popular first.
        let ranked = engine.recommend(&events, 3).await;
        assert_eq!(ranked[0].id, "2");

        for _ in 0..3 {
            repo.update_preferences_from_registration(EventCategory::Tech)
                .await
                .unwrap();
        }

        let ranked = engine.recommend(&events, 3).await;
        assert_eq!(ranked[0].id, "1");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Fixed set of event categories used by the campus catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EventCategory {
    Academic,
    Art,
    Cultural,
    Seminar,
    Sports,
    Tech,
    Workshop,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventCategory::Academic => "Academic",
            EventCategory::Art => "Art",
            EventCategory::Cultural => "Cultural",
            EventCategory::Seminar => "Seminar",
            EventCategory::Sports => "Sports",
            EventCategory::Tech => "Tech",
            EventCategory::Workshop => "Workshop",
        };
        f.write_str(name)
    }
}

/// A campus activity, owned by the external catalog collaborator and
/// read-only to this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub time: DateTime<Utc>,
    pub venue: String,
    pub category: EventCategory,
    pub description: String,
    pub capacity: u32,
    pub registration_count: u32,
}

/// Canonical user shape at the repository boundary.
///
/// Historical callers stored the same fields under two spellings; the serde
/// aliases accept either so records written by older app versions still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "userId")]
    pub id: String,
    #[serde(rename = "fullName", alias = "userName")]
    pub full_name: String,
    #[serde(alias = "userEmail")]
    pub email: String,
}

/// A user's enrollment record for an event, bearing the check-in credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub event_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub registered_at: DateTime<Utc>,
    pub qr_code: String,
    #[serde(default)]
    pub checked_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Love,
    Laugh,
}

/// Per-comment reaction counters. No per-user ledger is kept, so repeat
/// reactions from the same user each count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    #[serde(default)]
    pub like: u32,
    #[serde(default)]
    pub love: u32,
    #[serde(default)]
    pub laugh: u32,
}

impl Reactions {
    pub fn bump(&mut self, kind: ReactionKind) {
        match kind {
            ReactionKind::Like => self.like += 1,
            ReactionKind::Love => self.love += 1,
            ReactionKind::Laugh => self.laugh += 1,
        }
    }

    pub fn count(&self, kind: ReactionKind) -> u32 {
        match kind {
            ReactionKind::Like => self.like,
            ReactionKind::Love => self.love,
            ReactionKind::Laugh => self.laugh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub reactions: Reactions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub event_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    /// 1 through 5 inclusive, validated before persistence.
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Per-device preference history feeding the recommendation engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub categories: BTreeSet<EventCategory>,
    #[serde(default)]
    pub category_count: BTreeMap<EventCategory, u32>,
}

impl UserPreferences {
    /// Fold one successful registration in `category` into the history.
    pub fn record_registration(&mut self, category: EventCategory) {
        self.categories.insert(category);
        *self.category_count.entry(category).or_insert(0) += 1;
    }

    /// How often the user has registered in `category`.
    pub fn affinity(&self, category: EventCategory) -> u32 {
        self.category_count.get(&category).copied().unwrap_or(0)
    }

    /// False in the cold-start state, before any registration history exists.
    pub fn has_history(&self) -> bool {
        !self.category_count.is_empty()
    }
}

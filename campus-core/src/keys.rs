//! Storage key constants.
//!
//! These strings identify persisted records across app versions. Changing
//! one silently orphans whatever users already have on their device, so
//! they are frozen here and referenced everywhere else.

pub const REGISTRATIONS: &str = "user_registrations";
pub const PREFERENCES: &str = "user_preferences";
pub const COMMENTS: &str = "event_comments";
pub const FEEDBACKS: &str = "event_feedbacks";

/// Active session, owned by the auth service.
pub const AUTH_SESSION: &str = "user_auth";
/// Account records keyed by e-mail, owned by the auth service.
pub const REGISTERED_USERS: &str = "registered_users";

/// Owned by the UI theming layer; listed so no other component claims it.
pub const THEME: &str = "theme_preference";

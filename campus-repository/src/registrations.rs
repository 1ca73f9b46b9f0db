use chrono::Utc;
use tracing;

use campus_core::keys;
use campus_core::types::{Registration, User};

use crate::{Repository, RepositoryError};

impl Repository {
    /// Create a registration for `event_id` and persist it.
    ///
    /// Registration is a two-step protocol: after this succeeds the caller
    /// must also invoke [`Repository::update_preferences_from_registration`]
    /// with the event's category. The two writes touch different keys and
    /// are deliberately not chained here.
    pub async fn save_registration(
        &self,
        event_id: &str,
        user: &User,
    ) -> Result<Registration, RepositoryError> {
        let _guard = self.store().lock_key(keys::REGISTRATIONS).await;

        let mut registrations: Vec<Registration> =
            self.read_for_write(keys::REGISTRATIONS).await?;
        if registrations
            .iter()
            .any(|reg| reg.event_id == event_id && reg.user_id == user.id)
        {
            return Err(RepositoryError::AlreadyRegistered {
                user_id: user.id.clone(),
                event_id: event_id.to_string(),
            });
        }

        let now = Utc::now();
        let registration = Registration {
            event_id: event_id.to_string(),
            user_id: user.id.clone(),
            user_name: user.full_name.clone(),
            user_email: user.email.clone(),
            registered_at: now,
            qr_code: format!(
                "event_{}_user_{}_{}",
                event_id,
                user.id,
                now.timestamp_millis()
            ),
            checked_in: false,
            checked_in_at: None,
        };

        registrations.push(registration.clone());
        self.store().set(keys::REGISTRATIONS, &registrations).await?;

        tracing::info!(event = event_id, user = %user.id, "saved registration");
        Ok(registration)
    }

    /// All stored registrations, oldest first.
    pub async fn get_registrations(&self) -> Vec<Registration> {
        self.read_or_default(keys::REGISTRATIONS).await
    }

    /// Whether `user_id` holds a registration for `event_id`.
    pub async fn is_registered(&self, event_id: &str, user_id: &str) -> bool {
        self.get_registrations()
            .await
            .iter()
            .any(|reg| reg.event_id == event_id && reg.user_id == user_id)
    }

    /// Mark the user's registration for `event_id` as attended.
    ///
    /// Returns `Ok(true)` when a not-yet-checked-in registration was
    /// updated, `Ok(false)` when none matched. `checked_in_at` is written
    /// once and never overwritten by a repeat check-in.
    pub async fn check_in_to_event(
        &self,
        event_id: &str,
        user_id: &str,
    ) -> Result<bool, RepositoryError> {
        let now = Utc::now();
        let mut updated = false;

        self.store()
            .update(keys::REGISTRATIONS, |registrations: Option<Vec<Registration>>| {
                let mut registrations = registrations.unwrap_or_default();
                for reg in registrations.iter_mut() {
                    if reg.event_id == event_id && reg.user_id == user_id && !reg.checked_in {
                        reg.checked_in = true;
                        reg.checked_in_at = Some(now);
                        updated = true;
                    }
                }
                registrations
            })
            .await?;

        if updated {
            tracing::info!(event = event_id, user = user_id, "checked in");
        } else {
            tracing::debug!(event = event_id, user = user_id, "check-in matched no registration");
        }
        Ok(updated)
    }
}

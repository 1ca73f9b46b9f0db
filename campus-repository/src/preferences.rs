use tracing;

use campus_core::keys;
use campus_core::types::{EventCategory, UserPreferences};

use crate::{Repository, RepositoryError};

impl Repository {
    /// Stored preference history, or the empty default when none exists.
    pub async fn get_user_preferences(&self) -> UserPreferences {
        self.read_or_default(keys::PREFERENCES).await
    }

    /// Replace the stored preference history wholesale.
    pub async fn save_user_preferences(
        &self,
        preferences: &UserPreferences,
    ) -> Result<(), RepositoryError> {
        self.store().set(keys::PREFERENCES, preferences).await?;
        Ok(())
    }

    /// Fold one successful registration in `category` into the stored
    /// history. Second step of the registration protocol; see
    /// [`Repository::save_registration`].
    pub async fn update_preferences_from_registration(
        &self,
        category: EventCategory,
    ) -> Result<(), RepositoryError> {
        let written = self
            .store()
            .update(keys::PREFERENCES, |prefs: Option<UserPreferences>| {
                let mut prefs = prefs.unwrap_or_default();
                prefs.record_registration(category);
                prefs
            })
            .await?;

        tracing::debug!(
            category = %category,
            count = written.affinity(category),
            "updated preference history"
        );
        Ok(())
    }
}

use chrono::Utc;
use tracing;

use campus_core::keys;
use campus_core::types::{Feedback, User};

use crate::{Repository, RepositoryError};

impl Repository {
    /// Append a feedback record for `event_id`.
    ///
    /// The rating must already be a selected value between 1 and 5; anything
    /// else is a caller contract violation and is rejected before storage.
    pub async fn save_feedback(
        &self,
        event_id: &str,
        rating: u8,
        comment: Option<String>,
        user: &User,
    ) -> Result<Feedback, RepositoryError> {
        if !(1..=5).contains(&rating) {
            return Err(RepositoryError::RatingOutOfRange(rating));
        }

        let _guard = self.store().lock_key(keys::FEEDBACKS).await;

        let mut feedbacks: Vec<Feedback> = self.read_for_write(keys::FEEDBACKS).await?;
        if feedbacks
            .iter()
            .any(|fb| fb.event_id == event_id && fb.user_id == user.id)
        {
            return Err(RepositoryError::FeedbackAlreadySubmitted {
                user_id: user.id.clone(),
                event_id: event_id.to_string(),
            });
        }

        let feedback = Feedback {
            event_id: event_id.to_string(),
            user_id: user.id.clone(),
            user_name: user.full_name.clone(),
            user_email: user.email.clone(),
            rating,
            comment,
            submitted_at: Utc::now(),
        };

        feedbacks.push(feedback.clone());
        self.store().set(keys::FEEDBACKS, &feedbacks).await?;

        tracing::info!(event = event_id, user = %user.id, rating, "saved feedback");
        Ok(feedback)
    }

    /// All stored feedback, oldest first.
    pub async fn get_feedbacks(&self) -> Vec<Feedback> {
        self.read_or_default(keys::FEEDBACKS).await
    }
}

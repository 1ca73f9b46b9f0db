use std::collections::BTreeMap;

use chrono::Utc;
use tracing;
use uuid::Uuid;

use campus_core::keys;
use campus_core::types::{Comment, ReactionKind, Reactions, User};

use crate::{Repository, RepositoryError};

/// Stored shape under the comments key: event id to its ordered thread.
pub type CommentMap = BTreeMap<String, Vec<Comment>>;

/// Bucket for general social-feed posts not attached to any event.
pub const SOCIAL_FEED_EVENT_ID: &str = "social";

pub const MAX_COMMENT_LEN: usize = 500;

impl Repository {
    /// Append a comment to the `event_id` thread.
    ///
    /// The text is trimmed first; empty or over-long text is rejected before
    /// any storage call. Reactions start at zero.
    pub async fn save_comment(
        &self,
        event_id: &str,
        text: &str,
        user: &User,
    ) -> Result<Comment, RepositoryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RepositoryError::EmptyCommentText);
        }
        if text.chars().count() > MAX_COMMENT_LEN {
            return Err(RepositoryError::CommentTooLong);
        }

        let now = Utc::now();
        let suffix = Uuid::new_v4().simple().to_string();
        let comment = Comment {
            id: format!("c_{}_{}", now.timestamp_millis(), &suffix[..8]),
            event_id: event_id.to_string(),
            user_id: user.id.clone(),
            user_name: user.full_name.clone(),
            user_email: user.email.clone(),
            text: text.to_string(),
            timestamp: now,
            reactions: Reactions::default(),
        };

        let stored = comment.clone();
        self.store()
            .update(keys::COMMENTS, move |map: Option<CommentMap>| {
                let mut map = map.unwrap_or_default();
                map.entry(stored.event_id.clone()).or_default().push(stored);
                map
            })
            .await?;

        tracing::info!(event = event_id, user = %user.id, "saved comment");
        Ok(comment)
    }

    /// Full stored mapping of event id to comment thread.
    pub async fn get_comments(&self) -> CommentMap {
        self.read_or_default(keys::COMMENTS).await
    }

    /// Increment one reaction counter on the comment with `comment_id`,
    /// wherever it lives. An unknown id changes nothing.
    pub async fn update_reaction(
        &self,
        comment_id: &str,
        kind: ReactionKind,
        user_id: &str,
    ) -> Result<(), RepositoryError> {
        self.store()
            .update(keys::COMMENTS, |map: Option<CommentMap>| {
                let mut map = map.unwrap_or_default();
                for thread in map.values_mut() {
                    for comment in thread.iter_mut() {
                        if comment.id == comment_id {
                            comment.reactions.bump(kind);
                        }
                    }
                }
                map
            })
            .await?;

        tracing::debug!(comment = comment_id, user = user_id, reaction = ?kind, "updated reaction");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use campus_core::types::ReactionKind;

    use crate::testutil::{repository, user};
    use crate::{RepositoryError, MAX_COMMENT_LEN, SOCIAL_FEED_EVENT_ID};

    #[tokio::test]
    async fn saving_a_comment_appends_to_the_event_thread() {
        let (_dir, repo) = repository().await;
        let ayesha = user("u1");

        let before = repo.get_comments().await;
        assert!(before.get("1").is_none());

        let comment = repo.save_comment("1", "  Great lineup!  ", &ayesha).await.unwrap();
        assert_eq!(comment.text, "Great lineup!");
        assert_eq!(comment.reactions.like, 0);
        assert_eq!(comment.reactions.love, 0);
        assert_eq!(comment.reactions.laugh, 0);

        let after = repo.get_comments().await;
        assert_eq!(after.get("1").unwrap().len(), 1);
        assert_eq!(after.get("1").unwrap()[0], comment);
    }

    #[tokio::test]
    async fn social_feed_posts_land_in_their_own_bucket() {
        let (_dir, repo) = repository().await;

        repo.save_comment(SOCIAL_FEED_EVENT_ID, "Anyone going tonight?", &user("u1"))
            .await
            .unwrap();

        let comments = repo.get_comments().await;
        assert_eq!(comments.get(SOCIAL_FEED_EVENT_ID).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn whitespace_only_text_is_rejected() {
        let (_dir, repo) = repository().await;

        let result = repo.save_comment("1", "   \n\t ", &user("u1")).await;
        assert!(matches!(result, Err(RepositoryError::EmptyCommentText)));
        assert!(repo.get_comments().await.is_empty());
    }

    #[tokio::test]
    async fn over_long_text_is_rejected() {
        let (_dir, repo) = repository().await;

        let text = "x".repeat(MAX_COMMENT_LEN + 1);
        let result = repo.save_comment("1", &text, &user("u1")).await;
        assert!(matches!(result, Err(RepositoryError::CommentTooLong)));
    }

    #[tokio::test]
    async fn comment_ids_are_unique() {
        let (_dir, repo) = repository().await;
        let ayesha = user("u1");

        let first = repo.save_comment("1", "first", &ayesha).await.unwrap();
        let second = repo.save_comment("1", "second", &ayesha).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn reaction_increments_only_the_targeted_counter() {
        let (_dir, repo) = repository().await;
        let ayesha = user("u1");

        let comment = repo.save_comment("1", "Great lineup!", &ayesha).await.unwrap();
        let other = repo.save_comment("1", "Can't wait.", &ayesha).await.unwrap();

        repo.update_reaction(&comment.id, ReactionKind::Love, "u2")
            .await
            .unwrap();

        let comments = repo.get_comments().await;
        let thread = comments.get("1").unwrap();
        let reacted = thread.iter().find(|c| c.id == comment.id).unwrap();
        let untouched = thread.iter().find(|c| c.id == other.id).unwrap();

        assert_eq!(reacted.reactions.love, 1);
        assert_eq!(reacted.reactions.like, 0);
        assert_eq!(reacted.reactions.laugh, 0);
        assert_eq!(untouched.reactions.love, 0);
    }

    #[tokio::test]
    async fn reaction_on_unknown_comment_changes_nothing() {
        let (_dir, repo) = repository().await;

        repo.save_comment("1", "Great lineup!", &user("u1")).await.unwrap();
        repo.update_reaction("c_missing", ReactionKind::Like, "u2")
            .await
            .unwrap();

        let comments = repo.get_comments().await;
        assert_eq!(comments.get("1").unwrap()[0].reactions.like, 0);
    }
}

use thiserror::Error;

use campus_core::StoreError;

use crate::comments::MAX_COMMENT_LEN;

#[derive(Debug, Error)]
pub enum RepositoryError {
    // Caller contract violations, rejected before any storage call.
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    #[error("comment text must not be empty")]
    EmptyCommentText,

    #[error("comment text exceeds {MAX_COMMENT_LEN} characters")]
    CommentTooLong,

    #[error("user '{user_id}' is already registered for event '{event_id}'")]
    AlreadyRegistered { user_id: String, event_id: String },

    #[error("user '{user_id}' already submitted feedback for event '{event_id}'")]
    FeedbackAlreadySubmitted { user_id: String, event_id: String },

    // Write failures surface to the caller so the UI can show a retry prompt.
    #[error(transparent)]
    Store(#[from] StoreError),
}

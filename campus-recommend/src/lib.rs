//! Event ranking for the campus app.
//!
//! [`RecommendationEngine`] scores a supplied candidate catalog against the
//! user's stored preference history; the [`filters`] module holds the
//! stateless catalog filters (similar, popular, upcoming).

pub mod engine;
pub mod filters;

pub use engine::{rank, RecommendationEngine, DEFAULT_TOP_N};
pub use filters::{
    popular_events, similar_events, upcoming_events, DEFAULT_POPULAR_LIMIT,
    DEFAULT_SIMILAR_LIMIT, DEFAULT_UPCOMING_LIMIT,
};

/// Recommendation service abstraction
///
/// The controller only depends on this trait, so the HTTP backend can be
/// swapped for a mock in tests.
use crate::{
    error::AppResult,
    models::{Candidate, RecommendQuery, RecommendResponse},
};

pub mod http;

pub use http::HttpRecommendationProvider;

/// Trait for recommendation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Resolve a title or movie id into recommendations or a match list
    ///
    /// Exactly one round trip; no retries.
    async fn fetch_recommendations(&self, query: &RecommendQuery) -> AppResult<RecommendResponse>;

    /// List every movie whose title contains `title`, without resolving it
    async fn search_titles(&self, title: &str) -> AppResult<Vec<Candidate>>;

    /// Greeting message of the backend root, used as a liveness probe
    async fn health_check(&self) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

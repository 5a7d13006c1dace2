use serde::Deserialize;
use std::fmt::Display;

use crate::error::AppError;

/// Backend identifier of a movie, as disclosed in a match list
pub type MovieId = i64;

/// A recommended movie title
pub type Recommendation = String;

/// Lookup key for the `/recommend` endpoint
///
/// The two modes are mutually exclusive: the backend resolves either free
/// text or an identifier it handed out earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendQuery {
    /// Free-text title as typed by the user
    Title(String),
    /// Identifier of a previously shown candidate
    MovieId(MovieId),
}

impl RecommendQuery {
    /// Query-string pair for this lookup
    pub fn as_param(&self) -> (&'static str, String) {
        match self {
            RecommendQuery::Title(title) => ("title", title.clone()),
            RecommendQuery::MovieId(id) => ("movie_id", id.to_string()),
        }
    }
}

impl Display for RecommendQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendQuery::Title(title) => write!(f, "title={}", title),
            RecommendQuery::MovieId(id) => write!(f, "movie_id={}", id),
        }
    }
}

/// One of several movies matching an ambiguous title
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Resolved outcome of a `/recommend` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendResponse {
    /// The query resolved to a single movie
    Recommendations(Vec<Recommendation>),
    /// The title matched several movies; the user has to pick one
    Matches {
        message: Option<String>,
        results: Vec<Candidate>,
    },
}

// ============================================================================
// Recommendation API Types
// ============================================================================

/// Raw body of `/recommend`
///
/// Exactly one of `recommendations` and `results` is expected. A non-empty
/// `recommendations` list takes precedence over `results`; an empty one only
/// counts when no `results` come with it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRecommendResponse {
    #[serde(default)]
    pub recommendations: Option<Vec<Recommendation>>,
    #[serde(default)]
    pub results: Option<Vec<Candidate>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TryFrom<ApiRecommendResponse> for RecommendResponse {
    type Error = AppError;

    fn try_from(body: ApiRecommendResponse) -> Result<Self, Self::Error> {
        match (body.recommendations, body.results) {
            (Some(recommendations), _) if !recommendations.is_empty() => {
                Ok(RecommendResponse::Recommendations(recommendations))
            }
            (_, Some(results)) => Ok(RecommendResponse::Matches {
                message: body.message,
                results,
            }),
            (Some(recommendations), None) => Ok(RecommendResponse::Recommendations(recommendations)),
            (None, None) => Err(AppError::UnexpectedResponse(
                "body has neither `recommendations` nor `results`".to_string(),
            )),
        }
    }
}

/// Raw body of `/search`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSearchResponse {
    pub results: Vec<Candidate>,
}

/// Raw body of the service root
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRootResponse {
    pub message: String,
}

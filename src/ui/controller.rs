use std::sync::Arc;

use crate::{
    error::{AppResult, ResolutionError},
    models::{MovieId, RecommendQuery, RecommendResponse},
    services::providers::RecommendationProvider,
    ui::state::{Phase, UiState},
};

/// Search-and-disambiguate controller
///
/// Owns the [`UiState`] and resolves a typed title into either a
/// recommendation list or a list of matches to choose from. Each operation
/// awaits exactly one backend call and then applies exactly one state update.
pub struct SearchController {
    provider: Arc<dyn RecommendationProvider>,
    state: UiState,
}

impl SearchController {
    pub fn new(provider: Arc<dyn RecommendationProvider>) -> Self {
        Self {
            provider,
            state: UiState::new(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Resolve free text through `/recommend?title=`
    pub async fn search(&mut self, title: &str) -> Phase {
        self.state.set_query(title);
        let query = RecommendQuery::Title(title.to_string());

        match self.provider.fetch_recommendations(&query).await {
            Ok(RecommendResponse::Recommendations(titles)) if !titles.is_empty() => {
                self.state.show_recommendations(titles);
            }
            Ok(RecommendResponse::Matches { message, results }) => {
                tracing::debug!(
                    query = %query,
                    matches = results.len(),
                    backend_message = message.as_deref().unwrap_or_default(),
                    "Search needs disambiguation"
                );
                self.state.show_candidates(results);
            }
            Ok(RecommendResponse::Recommendations(_)) => {
                tracing::error!(query = %query, "Search returned an empty recommendation list");
                self.state.show_failure(ResolutionError::NotFoundOrAmbiguous);
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    query = %query,
                    provider = self.provider.name(),
                    "Search failed"
                );
                self.state.show_failure(ResolutionError::NotFoundOrAmbiguous);
            }
        }

        self.state.phase()
    }

    /// Resolve a previously shown candidate through `/recommend?movie_id=`
    ///
    /// A second ambiguous answer is not handled: the state is left as it was.
    pub async fn select_candidate(&mut self, candidate_id: MovieId) -> Phase {
        let query = RecommendQuery::MovieId(candidate_id);

        match self.provider.fetch_recommendations(&query).await {
            Ok(RecommendResponse::Recommendations(titles)) => {
                self.state.show_recommendations(titles);
            }
            Ok(RecommendResponse::Matches { results, .. }) => {
                tracing::warn!(
                    query = %query,
                    matches = results.len(),
                    "Selection returned another match list; ignoring it"
                );
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    query = %query,
                    provider = self.provider.name(),
                    "Selection failed"
                );
                self.state.show_failure(ResolutionError::Selection);
            }
        }

        self.state.phase()
    }

    /// List every match for `title` through `/search`, even a single one
    pub async fn lookup(&mut self, title: &str) -> Phase {
        self.state.set_query(title);

        match self.provider.search_titles(title).await {
            Ok(results) => self.state.show_candidates(results),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    title = %title,
                    provider = self.provider.name(),
                    "Lookup failed"
                );
                self.state.show_failure(ResolutionError::NotFoundOrAmbiguous);
            }
        }

        self.state.phase()
    }

    /// Ping the backend; leaves the state untouched
    pub async fn check_backend(&self) -> AppResult<String> {
        self.provider.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::{ApiRecommendResponse, Candidate},
        services::providers::MockRecommendationProvider,
    };

    const SEARCH_FAILURE: &str = "no recommendations found or movie does not exist";
    const SELECTION_FAILURE: &str = "error fetching recommendations";

    fn avatar_matches() -> Vec<Candidate> {
        vec![
            Candidate {
                id: 1,
                title: "Avatar".to_string(),
                release_date: "2009-12-18".to_string(),
                vote_count: 5000,
                overview: None,
                genre: None,
            },
            Candidate {
                id: 2,
                title: "Avatar: The Way of Water".to_string(),
                release_date: "2022-12-16".to_string(),
                vote_count: 3000,
                overview: None,
                genre: None,
            },
        ]
    }

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn controller(mock: MockRecommendationProvider) -> SearchController {
        SearchController::new(Arc::new(mock))
    }

    fn base_mock() -> MockRecommendationProvider {
        let mut mock = MockRecommendationProvider::new();
        mock.expect_name().return_const("mock");
        mock
    }

    #[tokio::test]
    async fn test_search_resolves_to_recommendations() {
        let mut mock = base_mock();
        mock.expect_fetch_recommendations()
            .withf(|q| matches!(q, RecommendQuery::Title(t) if t == "Inception"))
            .times(1)
            .returning(|_| {
                Ok(RecommendResponse::Recommendations(titles(&[
                    "Interstellar",
                    "Tenet",
                ])))
            });

        let mut controller = controller(mock);
        let phase = controller.search("Inception").await;

        assert_eq!(phase, Phase::Resolved);
        let state = controller.state();
        assert_eq!(state.query(), "Inception");
        assert_eq!(state.recommendations(), titles(&["Interstellar", "Tenet"]).as_slice());
        assert!(state.candidates().is_empty());
        assert_eq!(state.error_message(), None);
    }

    #[tokio::test]
    async fn test_search_with_several_matches_shows_candidates() {
        let mut mock = base_mock();
        mock.expect_fetch_recommendations()
            .times(1)
            .returning(|_| {
                Ok(RecommendResponse::Matches {
                    message: Some("Multiple matches".to_string()),
                    results: avatar_matches(),
                })
            });

        let mut controller = controller(mock);
        let phase = controller.search("Avatar").await;

        assert_eq!(phase, Phase::Ambiguous);
        assert_eq!(controller.state().candidates(), avatar_matches().as_slice());
        assert!(controller.state().recommendations().is_empty());
        assert_eq!(controller.state().error_message(), None);
    }

    #[tokio::test]
    async fn test_select_candidate_replaces_matches() {
        let mut mock = base_mock();
        mock.expect_fetch_recommendations()
            .withf(|q| matches!(q, RecommendQuery::Title(_)))
            .times(1)
            .returning(|_| {
                Ok(RecommendResponse::Matches {
                    message: None,
                    results: avatar_matches(),
                })
            });
        mock.expect_fetch_recommendations()
            .withf(|q| matches!(q, RecommendQuery::MovieId(2)))
            .times(1)
            .returning(|_| Ok(RecommendResponse::Recommendations(titles(&["Titanic"]))));

        let mut controller = controller(mock);
        controller.search("Avatar").await;
        let phase = controller.select_candidate(2).await;

        assert_eq!(phase, Phase::Resolved);
        assert_eq!(controller.state().recommendations(), titles(&["Titanic"]).as_slice());
        assert!(controller.state().candidates().is_empty());
        assert_eq!(controller.state().error_message(), None);
    }

    #[tokio::test]
    async fn test_search_not_found_sets_fixed_message() {
        let mut mock = base_mock();
        mock.expect_fetch_recommendations()
            .times(1)
            .returning(|_| Err(AppError::NotFound("Movie not found".to_string())));

        let mut controller = controller(mock);
        let phase = controller.search("Nonexistent Movie XYZ").await;

        assert_eq!(phase, Phase::Failed);
        assert!(controller.state().recommendations().is_empty());
        assert!(controller.state().candidates().is_empty());
        assert_eq!(controller.state().error_message(), Some(SEARCH_FAILURE));
    }

    #[tokio::test]
    async fn test_search_failure_clears_previous_results() {
        let mut mock = base_mock();
        let mut calls = 0;
        mock.expect_fetch_recommendations()
            .times(2)
            .returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Ok(RecommendResponse::Recommendations(titles(&["Tenet"])))
                } else {
                    Err(AppError::ExternalApi("API returned status 500".to_string()))
                }
            });

        let mut controller = controller(mock);
        controller.search("Inception").await;
        controller.search("Inception").await;

        assert!(controller.state().recommendations().is_empty());
        assert_eq!(controller.state().error_message(), Some(SEARCH_FAILURE));
    }

    #[tokio::test]
    async fn test_search_with_empty_recommendations_is_a_failure() {
        let mut mock = base_mock();
        mock.expect_fetch_recommendations()
            .times(1)
            .returning(|_| Ok(RecommendResponse::Recommendations(vec![])));

        let mut controller = controller(mock);
        let phase = controller.search("Inception").await;

        assert_eq!(phase, Phase::Failed);
        assert_eq!(controller.state().error_message(), Some(SEARCH_FAILURE));
    }

    #[tokio::test]
    async fn test_search_with_empty_recommendations_and_matches_shows_candidates() {
        let body: ApiRecommendResponse = serde_json::from_str(
            r#"{"recommendations": [], "results": [
                {"id": 1, "title": "Avatar", "release_date": "2009-12-18", "vote_count": 5000}
            ]}"#,
        )
        .unwrap();
        let decoded = RecommendResponse::try_from(body).unwrap();

        let mut mock = base_mock();
        mock.expect_fetch_recommendations()
            .times(1)
            .return_once(move |_| Ok(decoded));

        let mut controller = controller(mock);
        let phase = controller.search("Avatar").await;

        assert_eq!(phase, Phase::Ambiguous);
        assert_eq!(controller.state().candidates().len(), 1);
        assert_eq!(controller.state().candidates()[0].id, 1);
        assert!(controller.state().recommendations().is_empty());
        assert_eq!(controller.state().error_message(), None);
    }

    #[tokio::test]
    async fn test_search_with_unexpected_body_is_a_failure() {
        let mut mock = base_mock();
        mock.expect_fetch_recommendations()
            .times(1)
            .returning(|_| Err(AppError::UnexpectedResponse("no known field".to_string())));

        let mut controller = controller(mock);
        assert_eq!(controller.search("Inception").await, Phase::Failed);
        assert_eq!(controller.state().error_message(), Some(SEARCH_FAILURE));
    }

    #[tokio::test]
    async fn test_selection_failure_sets_selection_message() {
        let mut mock = base_mock();
        mock.expect_fetch_recommendations()
            .withf(|q| matches!(q, RecommendQuery::Title(_)))
            .returning(|_| {
                Ok(RecommendResponse::Matches {
                    message: None,
                    results: avatar_matches(),
                })
            });
        mock.expect_fetch_recommendations()
            .withf(|q| matches!(q, RecommendQuery::MovieId(_)))
            .returning(|_| Err(AppError::NotFound("movie_id not found".to_string())));

        let mut controller = controller(mock);
        controller.search("Avatar").await;
        let phase = controller.select_candidate(99).await;

        assert_eq!(phase, Phase::Failed);
        assert!(controller.state().recommendations().is_empty());
        assert!(controller.state().candidates().is_empty());
        assert_eq!(controller.state().error_message(), Some(SELECTION_FAILURE));
    }

    #[tokio::test]
    async fn test_ambiguous_selection_leaves_state_unchanged() {
        let mut mock = base_mock();
        mock.expect_fetch_recommendations()
            .times(2)
            .returning(|_| {
                Ok(RecommendResponse::Matches {
                    message: None,
                    results: avatar_matches(),
                })
            });

        let mut controller = controller(mock);
        controller.search("Avatar").await;
        let before = controller.state().clone();

        let phase = controller.select_candidate(1).await;

        assert_eq!(phase, Phase::Ambiguous);
        assert_eq!(controller.state(), &before);
    }

    #[tokio::test]
    async fn test_selection_with_empty_recommendations_clears_matches() {
        let mut mock = base_mock();
        mock.expect_fetch_recommendations()
            .withf(|q| matches!(q, RecommendQuery::Title(_)))
            .returning(|_| {
                Ok(RecommendResponse::Matches {
                    message: None,
                    results: avatar_matches(),
                })
            });
        mock.expect_fetch_recommendations()
            .withf(|q| matches!(q, RecommendQuery::MovieId(1)))
            .returning(|_| Ok(RecommendResponse::Recommendations(vec![])));

        let mut controller = controller(mock);
        controller.search("Avatar").await;
        let phase = controller.select_candidate(1).await;

        assert_eq!(phase, Phase::Idle);
        assert!(controller.state().candidates().is_empty());
        assert_eq!(controller.state().error_message(), None);
    }

    #[tokio::test]
    async fn test_lookup_lists_matches() {
        let mut mock = base_mock();
        mock.expect_search_titles()
            .withf(|t| t == "Avatar")
            .times(1)
            .returning(|_| Ok(avatar_matches()));

        let mut controller = controller(mock);
        let phase = controller.lookup("Avatar").await;

        assert_eq!(phase, Phase::Ambiguous);
        assert_eq!(controller.state().candidates().len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_failure_uses_search_message() {
        let mut mock = base_mock();
        mock.expect_search_titles()
            .returning(|_| Err(AppError::NotFound("no titles".to_string())));

        let mut controller = controller(mock);
        assert_eq!(controller.lookup("Zzz").await, Phase::Failed);
        assert_eq!(controller.state().error_message(), Some(SEARCH_FAILURE));
    }

    #[tokio::test]
    async fn test_check_backend_does_not_touch_state() {
        let mut mock = base_mock();
        mock.expect_health_check()
            .times(1)
            .returning(|| Ok("Welcome".to_string()));

        let controller = controller(mock);
        assert_eq!(controller.check_backend().await.unwrap(), "Welcome");
        assert_eq!(controller.state(), &UiState::new());
    }
}

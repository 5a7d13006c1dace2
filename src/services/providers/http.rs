/// Recommendation service over plain HTTP
///
/// Talks to the `/recommend`, `/search` and `/` endpoints of the movie
/// recommendation API with GET requests and JSON bodies.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        ApiRecommendResponse, ApiRootResponse, ApiSearchResponse, Candidate, RecommendQuery,
        RecommendResponse,
    },
    request_id::{make_span_with_request_id, RequestId, REQUEST_ID_HEADER},
    services::providers::RecommendationProvider,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use tracing::Instrument;

const PROVIDER_NAME: &str = "http";

#[derive(Clone)]
pub struct HttpRecommendationProvider {
    http_client: HttpClient,
    api_url: String,
}

impl HttpRecommendationProvider {
    pub fn new(config: &Config) -> AppResult<Self> {
        let api_url = config.recommender_url.trim_end_matches('/').to_string();
        if api_url.is_empty() {
            return Err(AppError::Config(
                "recommender URL cannot be empty".to_string(),
            ));
        }

        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http_client,
            api_url,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// GET `path` with `params` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let request_id = RequestId::new();
        let span = make_span_with_request_id(path, &request_id);

        async move {
            let url = format!("{}{}", self.api_url, path);
            let response = self
                .http_client
                .get(&url)
                .header(REQUEST_ID_HEADER, request_id.as_str())
                .query(params)
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::NotFound(body));
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::ExternalApi(format!(
                    "API returned status {}: {}",
                    status, body
                )));
            }

            Ok(response.json::<T>().await?)
        }
        .instrument(span)
        .await
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for HttpRecommendationProvider {
    async fn fetch_recommendations(&self, query: &RecommendQuery) -> AppResult<RecommendResponse> {
        let body: ApiRecommendResponse = self.get_json("/recommend", &[query.as_param()]).await?;
        let response = RecommendResponse::try_from(body)?;

        match &response {
            RecommendResponse::Recommendations(titles) => tracing::info!(
                query = %query,
                recommendations = titles.len(),
                provider = PROVIDER_NAME,
                "Recommendations fetched"
            ),
            RecommendResponse::Matches { results, .. } => tracing::info!(
                query = %query,
                matches = results.len(),
                provider = PROVIDER_NAME,
                "Query is ambiguous"
            ),
        }

        Ok(response)
    }

    async fn search_titles(&self, title: &str) -> AppResult<Vec<Candidate>> {
        let body: ApiSearchResponse = self
            .get_json("/search", &[("title", title.to_string())])
            .await?;

        tracing::info!(
            title = %title,
            results = body.results.len(),
            provider = PROVIDER_NAME,
            "Title search completed"
        );

        Ok(body.results)
    }

    async fn health_check(&self) -> AppResult<String> {
        let body: ApiRootResponse = self.get_json("/", &[]).await?;
        Ok(body.message)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Errors raised while talking to the recommendation service
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// User-facing failure of a controller operation.
///
/// Every underlying [`AppError`] collapses into one of these two fixed
/// messages; the detail only reaches the diagnostic log.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionError {
    /// A title search failed: unknown title, unreachable backend or bad body
    #[error("no recommendations found or movie does not exist")]
    NotFoundOrAmbiguous,

    /// Fetching recommendations for a chosen candidate failed
    #[error("error fetching recommendations")]
    Selection,
}

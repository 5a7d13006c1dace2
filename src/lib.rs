pub mod config;
pub mod error;
pub mod models;
pub mod request_id;
pub mod services;
pub mod ui;

pub use config::Config;
pub use error::{AppError, AppResult, ResolutionError};
pub use services::{HttpRecommendationProvider, RecommendationProvider};
pub use ui::{Phase, SearchController, UiState};

pub mod providers;

pub use providers::{HttpRecommendationProvider, RecommendationProvider};

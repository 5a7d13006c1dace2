//! Terminal front-end: interaction state, the search-and-disambiguate
//! controller, and the text rendering of both.

pub mod controller;
pub mod input;
pub mod render;
pub mod state;

pub use controller::SearchController;
pub use input::Command;
pub use render::render;
pub use state::{Phase, UiState};

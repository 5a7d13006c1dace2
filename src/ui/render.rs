use crate::ui::state::UiState;

/// Render `state` as terminal text
///
/// Empty state renders as an empty string.
pub fn render(state: &UiState) -> String {
    let mut out = String::new();

    if let Some(error) = state.error_message() {
        out.push_str(&format!("error: {}\n", error));
    }

    if !state.candidates().is_empty() {
        out.push_str("Several matches found:\n");
        for (index, movie) in state.candidates().iter().enumerate() {
            out.push_str(&format!(
                "  [{}] {} ({}) - votes: {}\n",
                index + 1,
                movie.title,
                movie.release_date,
                movie.vote_count
            ));
        }
        out.push_str("Pick one with /select <number>\n");
    }

    if !state.recommendations().is_empty() {
        out.push_str("Recommendations:\n");
        for title in state.recommendations() {
            out.push_str(&format!("  - {}\n", title));
        }
    }

    out
}

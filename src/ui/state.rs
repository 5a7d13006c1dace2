use crate::{
    error::ResolutionError,
    models::{Candidate, Recommendation},
};

/// Where the interaction currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing to show yet
    Idle,
    /// A recommendation list is shown
    Resolved,
    /// Several matches are waiting for a selection
    Ambiguous,
    /// The last operation failed
    Failed,
}

/// Complete observable state of the interaction
///
/// At most one of `recommendations` and `candidates` is non-empty. The only
/// mutators are the `show_*` methods, which keep that invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    query: String,
    recommendations: Vec<Recommendation>,
    candidates: Vec<Candidate>,
    error_message: Option<String>,
}

impl UiState {
    /// Creates an empty state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Replace the shown list with `recommendations`
    pub fn show_recommendations(&mut self, recommendations: Vec<Recommendation>) {
        self.recommendations = recommendations;
        self.candidates.clear();
        self.error_message = None;
    }

    /// Replace the shown list with `candidates`
    pub fn show_candidates(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.recommendations.clear();
        self.error_message = None;
    }

    /// Clear both lists and surface the fixed message of `error`
    pub fn show_failure(&mut self, error: ResolutionError) {
        self.recommendations.clear();
        self.candidates.clear();
        self.error_message = Some(error.to_string());
    }

    pub fn phase(&self) -> Phase {
        if self.error_message.is_some() {
            Phase::Failed
        } else if !self.recommendations.is_empty() {
            Phase::Resolved
        } else if !self.candidates.is_empty() {
            Phase::Ambiguous
        } else {
            Phase::Idle
        }
    }

    /// Candidate at 1-based `position` in the shown match list
    pub fn candidate_at(&self, position: usize) -> Option<&Candidate> {
        position
            .checked_sub(1)
            .and_then(|index| self.candidates.get(index))
    }
}

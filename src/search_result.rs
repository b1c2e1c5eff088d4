use serde::Serialize;

use crate::catalog::Track;

/// Outcome of an artist track search.
///
/// `success` holds exactly when both `tracks` and `matched_artists` are
/// non-empty; the constructors keep that true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    success: bool,
    tracks: Vec<Track>,
    matched_artists: Vec<String>,
}

impl SearchResult {
    /// The canonical failure result
    pub fn failure() -> Self {
        Self {
            success: false,
            tracks: Vec::new(),
            matched_artists: Vec::new(),
        }
    }

    /// Build a result from what a strategy found; collapses to a failure
    /// if either side is empty
    pub fn found(tracks: Vec<Track>, matched_artists: Vec<String>) -> Self {
        if tracks.is_empty() || matched_artists.is_empty() {
            return Self::failure();
        }
        Self {
            success: true,
            tracks,
            matched_artists,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn matched_artists(&self) -> &[String] {
        &self.matched_artists
    }

    pub fn into_parts(self) -> (Vec<Track>, Vec<String>) {
        (self.tracks, self.matched_artists)
    }
}

impl Default for SearchResult {
    fn default() -> Self {
        Self::failure()
    }
}

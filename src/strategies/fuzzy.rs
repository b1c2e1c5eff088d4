use async_trait::async_trait;
use tracing::debug;

use crate::catalog::{CatalogSection, TrackQuery};
use crate::error::CatalogResult;
use crate::normalize::artist_names_match;
use crate::search_result::SearchResult;
use crate::strategies::{suppress_catalog_misses, ArtistSearchStrategy};

/// Title text search with the artist string as probe, filtered down to
/// tracks actually attributed to that artist.
///
/// "Fuzzy" refers to the loose catalog-side query, not to edit distance.
#[derive(Debug, Default, Clone, Copy)]
pub struct FuzzySearchStrategy;

impl FuzzySearchStrategy {
    pub fn new() -> Self {
        Self
    }

    async fn run(
        &self,
        section: &dyn CatalogSection,
        artist: &str,
        limit: usize,
    ) -> CatalogResult<SearchResult> {
        let tracks = section
            .search_tracks(&TrackQuery::Title(artist.to_string()), limit)
            .await?;
        let probed = tracks.len();

        let mut matched_artists: Vec<String> = Vec::new();
        let matching: Vec<_> = tracks
            .into_iter()
            .filter(|track| {
                let Some(track_artist) = track.artist.as_deref() else {
                    return false;
                };
                if track_artist.is_empty() || !artist_names_match(track_artist, artist) {
                    return false;
                }
                if !matched_artists.iter().any(|a| a == track_artist) {
                    matched_artists.push(track_artist.to_string());
                }
                true
            })
            .collect();

        debug!(
            "{}: {} of {} probed tracks attributed to '{}'",
            self.name(),
            matching.len(),
            probed,
            artist
        );
        Ok(SearchResult::found(matching, matched_artists))
    }
}

#[async_trait]
impl ArtistSearchStrategy for FuzzySearchStrategy {
    fn name(&self) -> &'static str {
        "FuzzySearchStrategy"
    }

    async fn search_tracks(
        &self,
        section: &dyn CatalogSection,
        artist: &str,
        limit: usize,
    ) -> CatalogResult<SearchResult> {
        suppress_catalog_misses(self.name(), self.run(section, artist, limit).await)
    }
}

use async_trait::async_trait;
use tracing::debug;

use crate::catalog::{CatalogSection, TrackQuery};
use crate::error::CatalogResult;
use crate::normalize::normalize_artist_name;
use crate::search_result::SearchResult;
use crate::strategies::{suppress_catalog_misses, ArtistSearchStrategy};

/// Exact artist match on the normalized form of the query
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalizedMatchStrategy;

impl NormalizedMatchStrategy {
    pub fn new() -> Self {
        Self
    }

    async fn run(
        &self,
        section: &dyn CatalogSection,
        artist: &str,
        limit: usize,
    ) -> CatalogResult<SearchResult> {
        let normalized = normalize_artist_name(artist);
        if normalized == artist {
            // Same query the exact strategy already issued
            debug!("{}: '{}' is already normalized", self.name(), artist);
            return Ok(SearchResult::failure());
        }

        let tracks = section
            .search_tracks(&TrackQuery::ArtistTitle(normalized.clone()), limit)
            .await?;
        Ok(SearchResult::found(tracks, vec![normalized]))
    }
}

#[async_trait]
impl ArtistSearchStrategy for NormalizedMatchStrategy {
    fn name(&self) -> &'static str {
        "NormalizedMatchStrategy"
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

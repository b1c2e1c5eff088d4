use async_trait::async_trait;

use crate::catalog::{CatalogSection, TrackQuery};
use crate::error::CatalogResult;
use crate::search_result::SearchResult;
use crate::strategies::{suppress_catalog_misses, ArtistSearchStrategy};

/// Tracks whose artist attribute equals the query verbatim
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactMatchStrategy;

impl ExactMatchStrategy {
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
            .search_tracks(&TrackQuery::ArtistTitle(artist.to_string()), limit)
            .await?;
        // Reports the query string, not a catalog-confirmed name
        Ok(SearchResult::found(tracks, vec![artist.to_string()]))
    }
}

#[async_trait]
impl ArtistSearchStrategy for ExactMatchStrategy {
    fn name(&self) -> &'static str {
        "ExactMatchStrategy"
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

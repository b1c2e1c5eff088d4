use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::catalog::{CatalogSection, CatalogServer, TrackQuery};
use crate::error::CatalogResult;
use crate::normalize::artist_names_match;
use crate::search_result::SearchResult;
use crate::strategies::{suppress_catalog_misses, ArtistSearchStrategy};

/// Candidate cap for the broad search, independent of the caller's limit
pub const GLOBAL_SEARCH_LIMIT: usize = 50;

/// Finds the artist through an unscoped server search, then lists tracks
/// under the catalog's own spelling of the name
pub struct GlobalSearchStrategy {
    server: Arc<dyn CatalogServer>,
}

impl GlobalSearchStrategy {
    pub fn new(server: Arc<dyn CatalogServer>) -> Self {
        Self { server }
    }

    /// Both catalog calls share one suppression scope in `search_tracks`
    async fn run(
        &self,
        section: &dyn CatalogSection,
        artist: &str,
        limit: usize,
    ) -> CatalogResult<SearchResult> {
        let entries = self.server.search(artist, GLOBAL_SEARCH_LIMIT).await?;

        let candidate = entries.into_iter().find_map(|entry| {
            if !entry.is_artist() {
                return None;
            }
            entry
                .title
                .filter(|title| !title.is_empty() && artist_names_match(title, artist))
        });

        let Some(artist_name) = candidate else {
            debug!("{}: no artist entry matched '{}'", self.name(), artist);
            return Ok(SearchResult::failure());
        };

        debug!("{}: '{}' resolved to '{}'", self.name(), artist, artist_name);
        let tracks = section
            .search_tracks(&TrackQuery::ArtistTitle(artist_name.clone()), limit)
            .await?;
        Ok(SearchResult::found(tracks, vec![artist_name]))
    }
}

#[async_trait]
impl ArtistSearchStrategy for GlobalSearchStrategy {
    fn name(&self) -> &'static str {
        "GlobalSearchStrategy"
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

//! Artist Search Context
//!
//! Runs the matching strategies in a fixed order and returns the first hit.

use std::sync::Arc;
use tracing::{debug, info};

use crate::catalog::{CatalogSection, CatalogServer};
use crate::error::{CatalogError, CatalogResult};
use crate::search_result::SearchResult;
use crate::strategies::{
    ArtistSearchStrategy, ExactMatchStrategy, FuzzySearchStrategy, GlobalSearchStrategy,
    NormalizedMatchStrategy,
};

/// Fallback chain over the artist search strategies.
///
/// The order runs from the cheapest and most precise query to the broadest:
/// exact, normalized, global search, fuzzy. It is fixed at construction.
pub struct ArtistSearchContext {
    strategies: Vec<Box<dyn ArtistSearchStrategy>>,
}

impl ArtistSearchContext {
    pub fn new(server: Arc<dyn CatalogServer>) -> Self {
        let strategies: Vec<Box<dyn ArtistSearchStrategy>> = vec![
            Box::new(ExactMatchStrategy::new()),
            Box::new(NormalizedMatchStrategy::new()),
            Box::new(GlobalSearchStrategy::new(server)),
            Box::new(FuzzySearchStrategy::new()),
        ];
        Self { strategies }
    }

    /// Strategy names in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Search for tracks by `artist`, trying each strategy in turn.
    ///
    /// Returns the first successful result, or [`SearchResult::failure`] once
    /// every strategy has failed. Errors other than catalog misses stop the
    /// chain and are returned to the caller.
    pub async fn search_tracks_by_artist(
        &self,
        section: &dyn CatalogSection,
        artist: &str,
        limit: usize,
    ) -> CatalogResult<SearchResult> {
        if limit == 0 {
            return Err(CatalogError::InvalidArgument(
                "limit must be greater than zero".to_string(),
            ));
        }

        for strategy in &self.strategies {
            debug!("Trying {} for '{}'", strategy.name(), artist);
            let result = strategy.search_tracks(section, artist, limit).await?;
            if result.is_success() {
                info!(
                    "🎵 {} matched '{}' as {:?} ({} tracks)",
                    strategy.name(),
                    artist,
                    result.matched_artists(),
                    result.tracks().len()
                );
                return Ok(result);
            }
        }

        debug!("All strategies exhausted for '{}'", artist);
        Ok(SearchResult::failure())
    }
}

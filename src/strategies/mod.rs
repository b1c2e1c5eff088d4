use async_trait::async_trait;
use tracing::debug;

use crate::catalog::CatalogSection;
use crate::error::CatalogResult;
use crate::search_result::SearchResult;

/// One heuristic for finding an artist's tracks in a catalog section
#[async_trait]
pub trait ArtistSearchStrategy: Send + Sync {
    /// Strategy name for logging and diagnostics
    fn name(&self) -> &'static str;

    /// Search for up to `limit` tracks by `artist`.
    ///
    /// Catalog misses come back as a failed [`SearchResult`]; any other
    /// catalog error is returned as `Err`.
    async fn search_tracks(
        &self,
        section: &dyn CatalogSection,
        artist: &str,
        limit: usize,
    ) -> CatalogResult<SearchResult>;
}

/// Turn a `BadRequest`/`NotFound` from a strategy body into a failed result
pub fn suppress_catalog_misses(
    strategy: &str,
    result: CatalogResult<SearchResult>,
) -> CatalogResult<SearchResult> {
    match result {
        Err(e) if e.is_catalog_miss() => {
            debug!("{}: catalog miss ({})", strategy, e);
            Ok(SearchResult::failure())
        }
        other => other,
    }
}

pub mod exact;
pub mod fuzzy;
pub mod global;
pub mod normalized;

pub use exact::ExactMatchStrategy;
pub use fuzzy::FuzzySearchStrategy;
pub use global::GlobalSearchStrategy;
pub use normalized::NormalizedMatchStrategy;

//! Artist Search Library
//!
//! Locates tracks in a music catalog by artist name through a fallback chain
//! of matching strategies that tolerates dash, space, and case differences.

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod normalize;
pub mod search_result;
pub mod strategies;

pub use context::ArtistSearchContext;
pub use error::{CatalogError, CatalogResult};
pub use normalize::normalize_artist_name;
pub use search_result::SearchResult;

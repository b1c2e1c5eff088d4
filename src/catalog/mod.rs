use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CatalogResult;

/// A track as returned by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog identity of the track
    pub id: i64,
    pub title: String,
    /// Direct artist attribution
    pub artist: Option<String>,
    pub album: Option<String>,
    pub path: String,
}

/// Track lookup understood by a [`CatalogSection`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackQuery {
    /// Tracks whose artist attribute equals the value byte-for-byte
    ArtistTitle(String),
    /// Loose text search on the track title
    Title(String),
}

/// Type tag carried by a broad search entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Artist,
    Album,
    Track,
    Playlist,
}

/// One hit from an unscoped catalog search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub entry_type: Option<EntryType>,
    pub title: Option<String>,
}

impl CatalogEntry {
    pub fn artist(title: impl Into<String>) -> Self {
        Self {
            entry_type: Some(EntryType::Artist),
            title: Some(title.into()),
        }
    }

    pub fn is_artist(&self) -> bool {
        self.entry_type == Some(EntryType::Artist)
    }
}

/// A music section of the catalog that can list tracks
#[async_trait]
pub trait CatalogSection: Send + Sync {
    /// Return at most `limit` tracks matching `query`, in catalog order
    async fn search_tracks(&self, query: &TrackQuery, limit: usize) -> CatalogResult<Vec<Track>>;
}

/// The catalog server or session, able to search across every section
#[async_trait]
pub trait CatalogServer: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> CatalogResult<Vec<CatalogEntry>>;
}

pub mod local;

//! Mock catalog collaborators for testing
//!
//! Both mocks answer from scripted replies and record every call.

#![allow(dead_code)]

use artist_search::catalog::{CatalogEntry, CatalogSection, CatalogServer, Track, TrackQuery};
use artist_search::error::{CatalogErrorKind, CatalogResult};
use artist_search::CatalogError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn track(id: i64, title: &str, artist: &str) -> Track {
    Track {
        id,
        title: title.to_string(),
        artist: Some(artist.to_string()),
        album: None,
        path: format!("/music/{}.flac", id),
    }
}

pub fn artist_query(artist: &str) -> TrackQuery {
    TrackQuery::ArtistTitle(artist.to_string())
}

pub fn title_query(title: &str) -> TrackQuery {
    TrackQuery::Title(title.to_string())
}

fn error_for(kind: CatalogErrorKind) -> CatalogError {
    let message = "scripted failure".to_string();
    match kind {
        CatalogErrorKind::BadRequest => CatalogError::BadRequest(message),
        CatalogErrorKind::NotFound => CatalogError::NotFound(message),
        CatalogErrorKind::InvalidArgument => CatalogError::InvalidArgument(message),
        CatalogErrorKind::Connection => CatalogError::Connection(message),
        CatalogErrorKind::Database => CatalogError::Database(rusqlite_error()),
        CatalogErrorKind::Io => CatalogError::Io(std::io::Error::other(message)),
    }
}

fn rusqlite_error() -> rusqlite::Error {
    rusqlite::Error::InvalidQuery
}

/// Scripted answer to a catalog call
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(Vec<T>),
    Fail(CatalogErrorKind),
}

impl<T: Clone> Reply<T> {
    fn resolve(&self) -> CatalogResult<Vec<T>> {
        match self {
            Reply::Ok(items) => Ok(items.clone()),
            Reply::Fail(kind) => Err(error_for(*kind)),
        }
    }
}

/// Mock music section; unscripted queries return no tracks
#[derive(Debug, Default)]
pub struct MockSection {
    replies: HashMap<TrackQuery, Reply<Track>>,
    /// Every (query, limit) received, in order
    pub calls: Arc<Mutex<Vec<(TrackQuery, usize)>>>,
}

impl MockSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, query: TrackQuery, reply: Reply<Track>) -> Self {
        self.replies.insert(query, reply);
        self
    }

    pub fn get_calls(&self) -> Vec<(TrackQuery, usize)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<TrackQuery> {
        self.get_calls().into_iter().map(|(q, _)| q).collect()
    }
}

#[async_trait]
impl CatalogSection for MockSection {
    async fn search_tracks(&self, query: &TrackQuery, limit: usize) -> CatalogResult<Vec<Track>> {
        self.calls.lock().unwrap().push((query.clone(), limit));
        match self.replies.get(query) {
            Some(reply) => reply.resolve(),
            None => Ok(Vec::new()),
        }
    }
}

/// Mock catalog server answering every broad search with the same reply
#[derive(Debug)]
pub struct MockServer {
    reply: Reply<CatalogEntry>,
    /// Every (query, limit) received, in order
    pub calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockServer {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            reply: Reply::Ok(entries),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing(kind: CatalogErrorKind) -> Self {
        Self {
            reply: Reply::Fail(kind),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogServer for MockServer {
    async fn search(&self, query: &str, limit: usize) -> CatalogResult<Vec<CatalogEntry>> {
        self.calls.lock().unwrap().push((query.to_string(), limit));
        self.reply.resolve()
    }
}

use async_trait::async_trait;
use lofty::prelude::*;
use lofty::probe::Probe;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::catalog::{CatalogEntry, CatalogSection, CatalogServer, EntryType, Track, TrackQuery};
use crate::error::{CatalogError, CatalogResult};
use crate::normalize::normalize_artist_name;

const AUDIO_EXTS: [&str; 6] = ["mp3", "flac", "ogg", "m4a", "wav", "opus"];

const TRACK_COLUMNS: &str = "id, title, artist, album, path";

/// SQLite-backed music catalog, acting as both section and server
pub struct LocalCatalog {
    conn: Mutex<Connection>,
}

/// A track to be written into the catalog
#[derive(Debug, Clone, Default)]
pub struct NewTrack {
    pub path: String,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track_number: u32,
}

impl LocalCatalog {
    pub fn open(db_path: &Path) -> CatalogResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(db_path)?)
    }

    pub fn open_in_memory() -> CatalogResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> CatalogResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tracks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                path TEXT UNIQUE,
                title TEXT NOT NULL,
                artist TEXT,
                artist_key TEXT,
                album TEXT,
                track_number INTEGER NOT NULL DEFAULT 0
            );
            CREATE INDEX IF NOT EXISTS idx_tracks_artist ON tracks(artist);",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn insert_track(&self, track: &NewTrack) -> CatalogResult<i64> {
        let conn = self.conn.lock()?;
        insert(&conn, track)
    }

    pub fn clear(&self) -> CatalogResult<()> {
        let conn = self.conn.lock()?;
        conn.execute("DELETE FROM tracks", [])?;
        Ok(())
    }

    /// Replace the catalog contents with the audio files found under `root`
    pub fn index_directory(&self, root: &Path) -> CatalogResult<usize> {
        if !root.is_dir() {
            return Err(CatalogError::InvalidArgument(format!(
                "not a directory: {}",
                root.display()
            )));
        }

        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM tracks", [])?;

        let mut indexed = 0;
        for entry in WalkDir::new(root).into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            if !AUDIO_EXTS.contains(&ext.as_str()) {
                continue;
            }

            let track = read_track(path);
            insert(&tx, &track)?;
            indexed += 1;
        }

        tx.commit()?;
        info!("📚 Indexed {} tracks from {}", indexed, root.display());
        Ok(indexed)
    }

    fn query_tracks(&self, query: &TrackQuery, limit: i64) -> CatalogResult<Vec<Track>> {
        let conn = self.conn.lock()?;
        let (sql, value) = match query {
            TrackQuery::ArtistTitle(artist) => (
                format!(
                    "SELECT {} FROM tracks WHERE artist = ?1
                     ORDER BY album, track_number, title LIMIT ?2",
                    TRACK_COLUMNS
                ),
                artist.clone(),
            ),
            TrackQuery::Title(title) => (
                format!(
                    "SELECT {} FROM tracks WHERE title LIKE ?1 ESCAPE '\\'
                     ORDER BY album, track_number, title LIMIT ?2",
                    TRACK_COLUMNS
                ),
                like_pattern(title),
            ),
        };

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![value, limit], |row| {
            Ok(Track {
                id: row.get(0)?,
                title: row.get(1)?,
                artist: row.get(2)?,
                album: row.get(3)?,
                path: row.get(4)?,
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    fn query_entries(&self, query: &str, limit: i64) -> CatalogResult<Vec<CatalogEntry>> {
        let conn = self.conn.lock()?;
        let pattern = like_pattern(query);
        let key_pattern = like_pattern(&normalize_artist_name(query).to_lowercase());

        let mut entries = Vec::new();

        let mut stmt = conn.prepare(
            "SELECT DISTINCT artist FROM tracks
             WHERE artist IS NOT NULL
               AND (artist LIKE ?1 ESCAPE '\\' OR artist_key LIKE ?2 ESCAPE '\\')
             ORDER BY artist LIMIT ?3",
        )?;
        let rows = stmt.query_map(params![pattern, key_pattern, limit], |row| {
            row.get::<_, String>(0)
        })?;
        for row in rows {
            entries.push(CatalogEntry {
                entry_type: Some(EntryType::Artist),
                title: Some(row?),
            });
        }

        let mut stmt = conn.prepare(
            "SELECT DISTINCT album FROM tracks
             WHERE album LIKE ?1 ESCAPE '\\'
             ORDER BY album LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![pattern, limit], |row| row.get::<_, String>(0))?;
        for row in rows {
            entries.push(CatalogEntry {
                entry_type: Some(EntryType::Album),
                title: Some(row?),
            });
        }

        let mut stmt = conn.prepare(
            "SELECT title FROM tracks
             WHERE title LIKE ?1 ESCAPE '\\'
             ORDER BY title LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![pattern, limit], |row| row.get::<_, String>(0))?;
        for row in rows {
            entries.push(CatalogEntry {
                entry_type: Some(EntryType::Track),
                title: Some(row?),
            });
        }

        entries.truncate(limit as usize);
        Ok(entries)
    }
}

#[async_trait]
impl CatalogSection for LocalCatalog {
    async fn search_tracks(&self, query: &TrackQuery, limit: usize) -> CatalogResult<Vec<Track>> {
        let probe = match query {
            TrackQuery::ArtistTitle(value) | TrackQuery::Title(value) => value,
        };
        if probe.trim().is_empty() {
            return Err(CatalogError::BadRequest("empty track query".to_string()));
        }
        let limit = sql_limit(limit)?;
        debug!("Local catalog track query: {:?} (limit {})", query, limit);
        self.query_tracks(query, limit)
    }
}

#[async_trait]
impl CatalogServer for LocalCatalog {
    async fn search(&self, query: &str, limit: usize) -> CatalogResult<Vec<CatalogEntry>> {
        if query.trim().is_empty() {
            return Err(CatalogError::BadRequest("empty search query".to_string()));
        }
        let limit = sql_limit(limit)?;
        debug!("Local catalog search: '{}' (limit {})", query, limit);
        self.query_entries(query, limit)
    }
}

fn insert(conn: &Connection, track: &NewTrack) -> CatalogResult<i64> {
    let artist_key = track
        .artist
        .as_deref()
        .map(|a| normalize_artist_name(a).to_lowercase());
    conn.execute(
        "INSERT OR REPLACE INTO tracks (path, title, artist, artist_key, album, track_number)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            track.path,
            track.title,
            track.artist,
            artist_key,
            track.album,
            track.track_number
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn read_track(path: &Path) -> NewTrack {
    let mut track = NewTrack {
        path: path.to_string_lossy().to_string(),
        ..NewTrack::default()
    };

    match Probe::open(path).and_then(|p| p.read()) {
        Ok(tagged_file) => {
            if let Some(tag) = tagged_file
                .primary_tag()
                .or_else(|| tagged_file.first_tag())
            {
                track.title = tag
                    .get_string(&lofty::tag::ItemKey::TrackTitle)
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                track.artist = tag
                    .get_string(&lofty::tag::ItemKey::TrackArtist)
                    .map(|s| s.to_string());
                track.album = tag
                    .get_string(&lofty::tag::ItemKey::AlbumTitle)
                    .map(|s| s.to_string());
                track.track_number = tag.track().unwrap_or(0);
            }
        }
        Err(e) => warn!("Could not read tags from {}: {}", path.display(), e),
    }

    if track.title.is_empty() {
        track.title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string();
    }
    track
}

fn sql_limit(limit: usize) -> CatalogResult<i64> {
    if limit == 0 {
        return Err(CatalogError::InvalidArgument(
            "limit must be greater than zero".to_string(),
        ));
    }
    i64::try_from(limit).map_err(|_| CatalogError::InvalidArgument(format!("limit too large: {}", limit)))
}

/// `%value%` with LIKE wildcards escaped by `\`
fn like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogErrorKind;

    fn track(path: &str, title: &str, artist: &str, album: &str, number: u32) -> NewTrack {
        NewTrack {
            path: path.to_string(),
            title: title.to_string(),
            artist: Some(artist.to_string()),
            album: Some(album.to_string()),
            track_number: number,
        }
    }

    fn seeded() -> LocalCatalog {
        let catalog = LocalCatalog::open_in_memory().expect("in-memory catalog");
        for t in [
            track("/m/1.flac", "Push It", "Static‐X", "Wisconsin Death Trip", 2),
            track("/m/2.flac", "I'm with Stupid", "Static‐X", "Wisconsin Death Trip", 3),
            track("/m/3.flac", "Bohemian Rhapsody", "Queen", "A Night at the Opera", 11),
            track("/m/4.flac", "Queen of Hearts", "Other Artist", "Cards", 1),
            track("/m/5.flac", "100% Pure", "Percent", "Odds", 1),
        ] {
            catalog.insert_track(&t).expect("insert");
        }
        catalog
    }

    #[tokio::test]
    async fn test_artist_filter_is_exact() {
        let catalog = seeded();

        let tracks = catalog
            .search_tracks(&TrackQuery::ArtistTitle("Static‐X".into()), 10)
            .await
            .unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "Push It");

        let tracks = catalog
            .search_tracks(&TrackQuery::ArtistTitle("static‐x".into()), 10)
            .await
            .unwrap();
        assert!(tracks.is_empty());

        let tracks = catalog
            .search_tracks(&TrackQuery::ArtistTitle("Static-X".into()), 10)
            .await
            .unwrap();
        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn test_limit_caps_results() {
        let catalog = seeded();
        let tracks = catalog
            .search_tracks(&TrackQuery::ArtistTitle("Static‐X".into()), 1)
            .await
            .unwrap();
        assert_eq!(tracks.len(), 1);

        let err = catalog
            .search_tracks(&TrackQuery::ArtistTitle("Queen".into()), 0)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), CatalogErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_title_search_is_loose() {
        let catalog = seeded();
        let tracks = catalog
            .search_tracks(&TrackQuery::Title("queen".into()), 10)
            .await
            .unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].artist.as_deref(), Some("Other Artist"));

        // wildcards in the probe are literal
        let tracks = catalog
            .search_tracks(&TrackQuery::Title("%".into()), 10)
            .await
            .unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "100% Pure");
    }

    #[tokio::test]
    async fn test_empty_probe_is_bad_request() {
        let catalog = seeded();
        let err = catalog
            .search_tracks(&TrackQuery::Title("  ".into()), 10)
            .await
            .unwrap_err();
        assert!(err.is_catalog_miss());

        let err = catalog.search("", 10).await.unwrap_err();
        assert_eq!(err.kind(), CatalogErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_server_search_matches_normalized_artist() {
        let catalog = seeded();
        let entries = catalog.search("static-x", 50).await.unwrap();
        assert_eq!(entries[0], CatalogEntry::artist("Static‐X"));
        assert!(entries.iter().all(|e| e.title.as_deref() != Some("Queen")));
    }

    #[tokio::test]
    async fn test_server_search_orders_artists_first() {
        let catalog = seeded();
        let entries = catalog.search("queen", 50).await.unwrap();
        assert_eq!(entries[0], CatalogEntry::artist("Queen"));
        assert_eq!(entries[1].entry_type, Some(EntryType::Track));
        assert_eq!(entries[1].title.as_deref(), Some("Queen of Hearts"));

        let entries = catalog.search("queen", 1).await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_index_directory_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("Untagged Song.mp3"), b"not really audio").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"skip me").unwrap();

        let catalog = seeded();
        let count = catalog.index_directory(dir.path()).unwrap();
        assert_eq!(count, 1);

        let conn = catalog.conn.lock().unwrap();
        let (title, artist): (String, Option<String>) = conn
            .query_row("SELECT title, artist FROM tracks", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(title, "Untagged Song");
        assert_eq!(artist, None);
    }

    #[test]
    fn test_index_directory_rejects_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("a.mp3");
        std::fs::write(&file, b"").unwrap();
        let catalog = LocalCatalog::open_in_memory().unwrap();
        let err = catalog.index_directory(&file).unwrap_err();
        assert_eq!(err.kind(), CatalogErrorKind::InvalidArgument);
    }
}

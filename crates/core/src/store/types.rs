//! Types for the movie document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A movie record as persisted in the document store.
///
/// Torrent data comes in two shapes: newer records carry a `torrents`
/// array, older ones a single `magnet` (plus `quality`) inline. The two
/// are resolved once via [`StoredMovie::torrent_source`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMovie {
    pub id: i64,
    pub title: String,
    /// Secondary (original-language) title.
    pub title2: String,
    pub year: i32,
    /// Comma-separated genre names as stored.
    pub genres: String,
    pub rating: f64,
    pub description: String,
    /// Runtime in minutes.
    pub duration: i64,
    pub trailer: String,
    /// Insertion timestamp; sort key for `date_added` and for every
    /// unrecognized sort field.
    pub created: DateTime<Utc>,
    /// Pre-existing image reference, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Embedded cover image payload, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_image: Option<StoredImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torrents: Option<Vec<StoredTorrent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

/// A torrent sub-record: magnet link and optional quality label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTorrent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

/// Embedded binary image with its content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredImage {
    pub content_type: String,
    /// Raw image bytes; base64 in the stored JSON document.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Shape of the torrent data on a stored record.
#[derive(Debug, Clone)]
pub enum TorrentSource {
    /// Record carries an array of torrent descriptors (possibly empty).
    Multiple(Vec<StoredTorrent>),
    /// Record carries a single magnet inline.
    Single(StoredTorrent),
    /// No torrent data at all.
    None,
}

impl StoredMovie {
    /// Resolve the two persisted torrent shapes into one variant. An
    /// existing `torrents` array wins over an inline magnet.
    pub fn torrent_source(&self) -> TorrentSource {
        if let Some(torrents) = &self.torrents {
            TorrentSource::Multiple(torrents.clone())
        } else if self.magnet.is_some() {
            TorrentSource::Single(StoredTorrent {
                magnet: self.magnet.clone(),
                quality: self.quality.clone(),
            })
        } else {
            TorrentSource::None
        }
    }
}

/// Errors for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Malformed stored record: {0}")]
    Corrupt(String),

    #[error("Invalid query: {0}")]
    Query(String),

    #[error("Seed error: {0}")]
    Seed(String),
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_torrent_source_prefers_torrents_array() {
        let mut movie = fixtures::movie(1, "Брат");
        movie.magnet = Some("magnet:?xt=urn:btih:ffff&dn=x".to_string());
        assert!(matches!(movie.torrent_source(), TorrentSource::Multiple(_)));
    }

    #[test]
    fn test_torrent_source_empty_array_stays_multiple() {
        let mut movie = fixtures::movie(1, "Брат");
        movie.torrents = Some(Vec::new());
        match movie.torrent_source() {
            TorrentSource::Multiple(torrents) => assert!(torrents.is_empty()),
            other => panic!("expected Multiple, got {:?}", other),
        }
    }

    #[test]
    fn test_torrent_source_single_picks_up_quality() {
        let movie = fixtures::single_magnet_movie(1, "Брат");
        match movie.torrent_source() {
            TorrentSource::Single(torrent) => {
                assert!(torrent.magnet.is_some());
                assert_eq!(torrent.quality.as_deref(), Some("1080p"));
            }
            other => panic!("expected Single, got {:?}", other),
        }
    }

    #[test]
    fn test_torrent_source_none_without_torrent_data() {
        let mut movie = fixtures::movie(1, "Брат");
        movie.torrents = None;
        assert!(matches!(movie.torrent_source(), TorrentSource::None));
    }

    #[test]
    fn test_stored_movie_json_round_trip() {
        let movie = fixtures::movie_with_image(7, "Сталкер");
        let doc = serde_json::to_string(&movie).unwrap();
        let parsed: StoredMovie = serde_json::from_str(&doc).unwrap();
        assert_eq!(parsed.id, 7);
        assert_eq!(parsed.title, "Сталкер");
        assert_eq!(
            parsed.stored_image.as_ref().unwrap().data,
            movie.stored_image.as_ref().unwrap().data
        );
    }

    #[test]
    fn test_stored_image_is_base64_in_document() {
        let movie = fixtures::movie_with_image(7, "Сталкер");
        let doc = serde_json::to_value(&movie).unwrap();
        let data = doc["stored_image"]["data"].as_str().unwrap();
        assert_eq!(data, "/9j/4A==");
    }

    #[test]
    fn test_record_without_genres_is_rejected() {
        // Stored documents must carry a genres string; a record missing it
        // fails deserialization instead of failing later during splitting.
        let doc = r#"{
            "id": 1, "title": "x", "title2": "y", "year": 2000,
            "rating": 5.0, "description": "", "duration": 90,
            "trailer": "", "created": "2024-01-01T00:00:00Z"
        }"#;
        let result: Result<StoredMovie, _> = serde_json::from_str(doc);
        assert!(result.is_err());
    }
}

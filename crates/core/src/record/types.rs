//! Response-only record shapes.

use serde::Serialize;

/// Torrent projection exposed to clients. `url` and `hash` are null for a
/// descriptor without a magnet link; `quality` is omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TorrentRecord {
    pub url: Option<String>,
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

/// The `torrents` field of an external record: a bare array for records
/// with a torrent list, a single object for records with one inline
/// magnet. Callers must handle both shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TorrentsField {
    Many(Vec<TorrentRecord>),
    One(TorrentRecord),
}

/// A movie record in its external shape, constructed per request.
#[derive(Debug, Clone, Serialize)]
pub struct MovieRecord {
    pub id: i64,
    /// Same identifier under the name legacy clients expect.
    pub imdb_code: i64,
    pub title: String,
    /// `title(title2)`
    pub title_long: String,
    pub year: i32,
    pub genres: Vec<String>,
    pub rating: f64,
    pub synopsis: String,
    pub runtime: i64,
    pub trailer: String,
    pub state: &'static str,
    pub torrents: TorrentsField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_cover_image: Option<String>,
}

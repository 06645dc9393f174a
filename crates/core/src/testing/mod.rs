//! Testing utilities: a mock store and record fixtures.
//!
//! Used by the server integration tests to drive the API without a real
//! database and to inject storage failures.

mod mock_store;

pub use mock_store::MockMovieStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{Duration, TimeZone, Utc};

    use crate::store::{StoredImage, StoredMovie, StoredTorrent};

    /// A stored movie with a one-entry torrents array and stable defaults.
    /// `created` is spaced by id so sorting by insertion time is testable.
    pub fn movie(id: i64, title: &str) -> StoredMovie {
        StoredMovie {
            id,
            title: title.to_string(),
            title2: format!("{} Intl", title),
            year: 2004,
            genres: "драма,комедия".to_string(),
            rating: 7.2,
            description: format!("Фильм «{}».", title),
            duration: 112,
            trailer: format!("https://video.example/{}.mp4", id),
            created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(id),
            image: None,
            stored_image: None,
            torrents: Some(vec![torrent(&format!("{:040x}", id), Some("720p"))]),
            magnet: None,
            quality: None,
        }
    }

    /// A torrent sub-record with the given info hash.
    pub fn torrent(info_hash: &str, quality: Option<&str>) -> StoredTorrent {
        StoredTorrent {
            magnet: Some(format!("magnet:?xt=urn:btih:{}&dn=x", info_hash)),
            quality: quality.map(str::to_string),
        }
    }

    /// A stored movie carrying a single inline magnet instead of a
    /// torrents array.
    pub fn single_magnet_movie(id: i64, title: &str) -> StoredMovie {
        let mut movie = movie(id, title);
        movie.torrents = None;
        movie.magnet = Some(format!("magnet:?xt=urn:btih:{:040x}&dn=x", id));
        movie.quality = Some("1080p".to_string());
        movie
    }

    /// A stored movie with an embedded cover image (a JPEG header stub).
    pub fn movie_with_image(id: i64, title: &str) -> StoredMovie {
        let mut movie = movie(id, title);
        movie.stored_image = Some(StoredImage {
            content_type: "image/jpeg".to_string(),
            data: vec![0xFF, 0xD8, 0xFF, 0xE0],
        });
        movie
    }
}

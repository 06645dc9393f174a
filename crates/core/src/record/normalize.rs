//! Normalization of stored records into the external schema.

use base64::{engine::general_purpose::STANDARD, Engine};

use super::{MovieRecord, TorrentRecord, TorrentsField};
use crate::store::{StoredMovie, StoredTorrent, TorrentSource};

/// Extract the BitTorrent info hash from a magnet link: the `btih:`
/// segment up to the next `&`. Returns None when the segment is missing
/// or unterminated.
pub fn info_hash(magnet: &str) -> Option<String> {
    let start = magnet.find("btih:")? + "btih:".len();
    let rest = &magnet[start..];
    let end = rest.find('&')?;
    Some(rest[..end].to_string())
}

/// Project a torrent sub-record into its external `{url, hash, quality?}`
/// shape.
pub fn project_torrent(torrent: &StoredTorrent) -> TorrentRecord {
    TorrentRecord {
        url: torrent.magnet.clone(),
        hash: torrent.magnet.as_deref().and_then(info_hash),
        quality: torrent.quality.clone(),
    }
}

/// Normalize a stored record into the external response shape.
///
/// With `with_image` set, an embedded image is rendered as a data URI and
/// duplicated into both cover fields, falling back to the stored image
/// reference; without it the cover fields are omitted entirely.
pub fn normalize(movie: &StoredMovie, with_image: bool) -> MovieRecord {
    let torrents = match movie.torrent_source() {
        TorrentSource::Multiple(list) => {
            TorrentsField::Many(list.iter().map(project_torrent).collect())
        }
        TorrentSource::Single(torrent) => TorrentsField::One(project_torrent(&torrent)),
        TorrentSource::None => TorrentsField::Many(Vec::new()),
    };

    let cover = with_image.then(|| cover_image(movie)).flatten();

    MovieRecord {
        id: movie.id,
        imdb_code: movie.id,
        title: movie.title.clone(),
        title_long: format!("{}({})", movie.title, movie.title2),
        year: movie.year,
        genres: movie.genres.split(',').map(str::to_string).collect(),
        rating: movie.rating,
        synopsis: movie.description.clone(),
        runtime: movie.duration,
        trailer: movie.trailer.clone(),
        state: "ok",
        torrents,
        medium_cover_image: cover.clone(),
        small_cover_image: cover,
    }
}

fn cover_image(movie: &StoredMovie) -> Option<String> {
    match &movie.stored_image {
        Some(image) => Some(format!(
            "data:{};base64,{}",
            image.content_type,
            STANDARD.encode(&image.data)
        )),
        None => movie.image.clone(),
    }
}

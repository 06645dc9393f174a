//! External record shaping - stored records to the stable response schema.

mod normalize;
mod types;

pub use normalize::{info_hash, normalize, project_torrent};
pub use types::{MovieRecord, TorrentRecord, TorrentsField};

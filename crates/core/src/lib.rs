pub mod config;
pub mod query;
pub mod record;
pub mod store;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    ServerConfig,
};
pub use query::{
    GenreFilter, GenreResolver, KeywordFilter, ListParams, MovieFilter, QueryError, QuerySpec,
    RawListParams, SortField, SortOrder, SortSpec,
};
pub use record::{info_hash, normalize, MovieRecord, TorrentRecord, TorrentsField};
pub use store::{
    seed_from_file, MovieStore, SqliteMovieStore, StoreError, StoredImage, StoredMovie,
    StoredTorrent, TorrentSource,
};

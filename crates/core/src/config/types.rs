use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Genre label -> pattern source, matched against the stored genre
    /// string. The label "All" is reserved and means "no filter".
    #[serde(default = "default_genres")]
    pub genres: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            genres: default_genres(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    /// JSON file of movie records loaded into an empty store at startup.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            seed_path: None,
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("filmoteka.db")
}

/// Built-in genre table. The stored genre strings are Russian, the labels
/// exposed to clients are English.
fn default_genres() -> BTreeMap<String, String> {
    [
        ("Action", "боевик"),
        ("Adventure", "приключени"),
        ("Comedy", "комеди"),
        ("Crime", "криминал"),
        ("Documentary", "документальн"),
        ("Drama", "драм"),
        ("Horror", "ужас"),
        ("Romance", "мелодрам"),
        ("Sci-Fi", "фантастик"),
        ("Thriller", "триллер"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label.to_string(), pattern.to_string()))
    .collect()
}

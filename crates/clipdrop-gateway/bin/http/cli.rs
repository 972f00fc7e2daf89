use clap::{Parser, ValueEnum};
use clipdrop_core::Settings;
use std::fmt::{Display, Formatter};
use std::num::NonZeroUsize;
use std::path::PathBuf;

pub const PORT_ENV: &str = "PORT";
pub const HOST_ENV: &str = "CLIPDROP_HOST";
pub const DOWNLOAD_DIR_ENV: &str = "CLIPDROP_DOWNLOAD_DIR";
pub const CACHE_DIR_ENV: &str = "CLIPDROP_CACHE_DIR";
pub const WORKERS_ENV: &str = "CLIPDROP_WORKERS";
pub const YT_DLP_ENV: &str = "CLIPDROP_YT_DLP";
pub const NO_CACHE_FAILURES_ENV: &str = "CLIPDROP_NO_CACHE_FAILURES";
pub const CACHE_BACKEND_ENV: &str = "CLIPDROP_CACHE_BACKEND";
pub const CACHE_CAPACITY_ENV: &str = "CLIPDROP_CACHE_CAPACITY";

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";
pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_WORKERS: &str = "4";
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheBackendArg {
    #[value(name = "file")]
    File,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for CacheBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackendArg::File => write!(f, "file"),
            CacheBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "clipdrop")]
pub struct CLI {
    #[arg(long, env = PORT_ENV, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = HOST_ENV, default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = DOWNLOAD_DIR_ENV, default_value = DEFAULT_DOWNLOAD_DIR)]
    pub download_dir: PathBuf,

    #[arg(long, env = CACHE_DIR_ENV, default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Number of runtime worker threads serving requests.
    #[arg(long, env = WORKERS_ENV, default_value = DEFAULT_WORKERS)]
    pub workers: NonZeroUsize,

    /// Path or name of the yt-dlp executable.
    #[arg(long = "yt-dlp", env = YT_DLP_ENV, default_value = clipdrop_downloader::ytdlp::DEFAULT_PROGRAM)]
    pub yt_dlp: PathBuf,

    #[arg(
        long,
        env = CACHE_BACKEND_ENV,
        value_enum,
        default_value_t = CacheBackendArg::File
    )]
    pub cache: CacheBackendArg,

    /// Maximum number of entries held by the in-memory cache.
    #[arg(long, env = CACHE_CAPACITY_ENV, default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: u64,

    /// Do not cache failed extractions.
    #[arg(long, env = NO_CACHE_FAILURES_ENV)]
    pub no_cache_failures: bool,
}

impl CLI {
    pub fn settings(&self) -> Settings {
        Settings::builder()
            .download_dir(self.download_dir.clone())
            .cache_dir(self.cache_dir.clone())
            .cache_failures(!self.no_cache_failures)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_cache_is_the_default_backend() {
        let cli = CLI::try_parse_from(["clipdrop"]).unwrap();

        assert_eq!(cli.cache, CacheBackendArg::File);
        assert_eq!(cli.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn in_memory_backend_can_be_selected() {
        let cli =
            CLI::try_parse_from(["clipdrop", "--cache", "in-memory", "--cache-capacity", "64"])
                .unwrap();

        assert_eq!(cli.cache, CacheBackendArg::InMemory);
        assert_eq!(cli.cache.to_string(), "in-memory");
        assert_eq!(cli.cache_capacity, 64);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(CLI::try_parse_from(["clipdrop", "--cache", "redis"]).is_err());
    }
}

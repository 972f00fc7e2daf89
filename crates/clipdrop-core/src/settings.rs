use std::path::{Path, PathBuf};
use std::time::Duration;
use typed_builder::TypedBuilder;

/// How long a cached result stays valid.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(1800);
/// Age after which a downloaded file is reaped.
pub const DEFAULT_FILE_MAX_AGE: Duration = Duration::from_secs(3600);
/// How long a request waits for its extraction before giving up.
pub const DEFAULT_DISPATCH_DEADLINE: Duration = Duration::from_secs(25);

/// Runtime settings, constructed once at startup and shared by reference.
#[derive(Debug, Clone, TypedBuilder)]
pub struct Settings {
    /// Directory holding downloaded media files.
    #[builder(setter(into))]
    pub download_dir: PathBuf,
    /// Directory holding one JSON file per cached URL.
    #[builder(setter(into))]
    pub cache_dir: PathBuf,
    #[builder(default = DEFAULT_CACHE_TTL)]
    pub cache_ttl: Duration,
    #[builder(default = DEFAULT_FILE_MAX_AGE)]
    pub file_max_age: Duration,
    #[builder(default = DEFAULT_DISPATCH_DEADLINE)]
    pub dispatch_deadline: Duration,
    /// Whether failed extractions are cached alongside successful ones.
    #[builder(default = true)]
    pub cache_failures: bool,
}

impl Settings {
    /// Creates the download and cache directories if they are missing.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.download_dir).await?;
        tokio::fs::create_dir_all(&self.cache_dir).await?;
        Ok(())
    }

    /// Path of a downloaded file inside the download directory.
    pub fn download_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.download_dir.join(file)
    }
}

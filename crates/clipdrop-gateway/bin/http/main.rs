mod cli;

use std::sync::Arc;

use clap::Parser;
use clipdrop_cache::{FileResponseCache, MokaResponseCache};
use clipdrop_core::{ResponseCache, Settings};
use clipdrop_downloader::{BoundedDispatcher, DownloadService, Downloader, Reaper, YtDlpExtractor};
use clipdrop_gateway::{App, AppState};
use tracing::info;

use crate::cli::{CacheBackendArg, CLI};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.workers.get())
        .enable_all()
        .build()?
        .block_on(run(config))
}

async fn run(config: CLI) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Arc::new(config.settings());
    settings.ensure_dirs().await?;

    let extractor = YtDlpExtractor::new(&config.yt_dlp);
    let downloader = match config.cache {
        CacheBackendArg::File => dispatcher(
            extractor,
            FileResponseCache::new(&settings.cache_dir, settings.cache_ttl),
            &settings,
        ),
        CacheBackendArg::InMemory => {
            let cache: MokaResponseCache = MokaResponseCache::builder()
                .max_capacity(config.cache_capacity)
                .ttl(settings.cache_ttl)
                .build()
                .into();
            dispatcher(extractor, cache, &settings)
        }
    };
    let state = AppState::new(downloader, Arc::clone(&settings));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        listen_addr = %listener.local_addr()?,
        download_dir = %settings.download_dir.display(),
        cache_dir = %settings.cache_dir.display(),
        workers = config.workers.get(),
        cache_backend = %config.cache,
        extractor = %config.yt_dlp.display(),
        "starting clipdrop server"
    );

    axum::serve(listener, App::router(state)).await?;

    Ok(())
}

fn dispatcher<C: ResponseCache>(
    extractor: YtDlpExtractor,
    cache: C,
    settings: &Arc<Settings>,
) -> Arc<dyn Downloader> {
    let reaper = Reaper::new(&settings.download_dir, settings.file_max_age);
    let service = DownloadService::new(extractor, cache, reaper, Arc::clone(settings));
    Arc::new(BoundedDispatcher::new(service, settings.dispatch_deadline))
}

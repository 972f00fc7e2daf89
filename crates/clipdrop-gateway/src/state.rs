use std::sync::Arc;

use clipdrop_core::Settings;
use clipdrop_downloader::Downloader;

#[derive(Clone)]
pub struct AppState {
    downloader: Arc<dyn Downloader>,
    settings: Arc<Settings>,
}

impl AppState {
    pub fn new(downloader: Arc<dyn Downloader>, settings: Arc<Settings>) -> Self {
        Self {
            downloader,
            settings,
        }
    }

    pub fn downloader(&self) -> &dyn Downloader {
        self.downloader.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

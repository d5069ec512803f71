//! Scoped ownership of a launched browser
//!
//! `BrowserHandle` owns the browser process, its CDP handler task and the
//! temp profile directory. Cleanup runs on explicit `close()` and again as
//! a fallback in `Drop`, so the browser is released on success and error
//! paths alike, including a panic mid-crawl.

use anyhow::{Context, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct BrowserHandle {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserHandle {
    pub(crate) fn new(browser: Browser, handler: JoinHandle<()>, user_data_dir: PathBuf) -> Self {
        Self {
            browser,
            handler,
            user_data_dir: Some(user_data_dir),
        }
    }

    /// Open a blank page for the crawl to reuse across navigations.
    pub async fn new_page(&self) -> Result<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .context("Failed to create page")
    }

    /// Close the browser gracefully and remove its temp profile.
    ///
    /// Safe to skip: `Drop` performs the same cleanup best-effort. Calling
    /// this explicitly gives the process a chance to exit before the profile
    /// directory is removed, which matters on platforms that refuse to
    /// delete files Chrome still has open.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        self.handler.abort();
        self.cleanup_profile_dir();
    }

    fn cleanup_profile_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            info!("Removing browser profile directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to remove profile directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for BrowserHandle {
    fn drop(&mut self) {
        self.handler.abort();
        // Browser::drop kills the Chrome process; profile removal may race
        // with process exit here, which close() avoids
        if self.user_data_dir.is_some() {
            warn!("BrowserHandle dropped without explicit close - removing profile dir in Drop");
            self.cleanup_profile_dir();
        }
    }
}

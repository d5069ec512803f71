//! Browser resource provider
//!
//! Acquires a fresh headless browser per audit request. Backend selection is
//! environment-aware: constrained/deployed environments go straight to the
//! managed Chromium download, local environments probe for a system binary
//! first and fall back to the download. Each acquisition yields a
//! [`BrowserHandle`] with process-level isolation; the handle guarantees
//! release of the browser and its temp profile on every exit path.

pub mod handle;
pub mod setup;

pub use handle::BrowserHandle;
pub use setup::{download_managed_browser, find_browser_executable, launch_browser};

use thiserror::Error;
use tracing::info;

/// No viable browser backend in the current environment.
#[derive(Debug, Error)]
#[error("No viable browser backend available: {0}")]
pub struct LaunchError(String);

/// Environment signals that mean "no system browser, use the managed build".
///
/// Deployed serverless runtimes ship no Chrome and no package manager; the
/// only option there is the downloaded slim build. `SITELENS_MANAGED_BROWSER`
/// forces the same path locally.
fn prefers_managed_backend() -> bool {
    std::env::var_os("SITELENS_MANAGED_BROWSER").is_some()
        || std::env::var_os("AWS_LAMBDA_FUNCTION_NAME").is_some()
        || std::env::var_os("VERCEL").is_some()
}

/// Launches browsers appropriate to the execution environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserProvider {
    headless: bool,
}

impl BrowserProvider {
    #[must_use]
    pub fn new(headless: bool) -> Self {
        Self { headless }
    }

    /// Acquire a fresh browser instance.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError`] when neither a system binary nor the managed
    /// download can produce a running browser.
    pub async fn acquire(&self) -> Result<BrowserHandle, LaunchError> {
        let chrome_path = if prefers_managed_backend() {
            info!("Constrained environment detected, using managed browser build");
            download_managed_browser()
                .await
                .map_err(|e| LaunchError(format!("{e:#}")))?
        } else {
            match find_browser_executable() {
                Ok(path) => path,
                Err(_) => download_managed_browser()
                    .await
                    .map_err(|e| LaunchError(format!("{e:#}")))?,
            }
        };

        let (browser, handler, user_data_dir) = launch_browser(chrome_path, self.headless)
            .await
            .map_err(|e| LaunchError(format!("{e:#}")))?;

        Ok(BrowserHandle::new(browser, handler, user_data_dir))
    }
}

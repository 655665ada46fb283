use super::config::BrowserConfig;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;

/// Owns the Chrome process for the duration of a scraping run. The process
/// is released when the manager drops, on every exit path, including an
/// error propagating out of mid-run navigation.
pub struct BrowserManager {
    browser: Browser,
    config: BrowserConfig,
}

impl BrowserManager {
    pub fn new(config: BrowserConfig) -> Result<Self, BrowserError> {
        let launch_options = Self::build_launch_options(&config)?;

        let browser = Browser::new(launch_options)
            .map_err(|e| BrowserError::InitializationError(e.to_string()))?;

        Ok(Self { browser, config })
    }

    fn build_launch_options(config: &BrowserConfig) -> Result<LaunchOptions<'_>, BrowserError> {
        // Owned strings first; LaunchOptions borrows the args.
        let mut args: Vec<&OsStr> = vec![
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new("--no-sandbox"),
        ];

        if config.disable_images {
            args.push(OsStr::new("--blink-settings=imagesEnabled=false"));
        }

        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some(config.window_size))
            .args(args)
            .build()
            .map_err(|e| BrowserError::ConfigurationError(e.to_string()))?;

        Ok(options)
    }

    /// Open a fresh tab for the portal session
    pub fn new_tab(&self) -> Result<Arc<Tab>, BrowserError> {
        self.browser
            .new_tab()
            .map_err(|e| BrowserError::TabCreationError(e.to_string()))
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }
}

impl Drop for BrowserManager {
    fn drop(&mut self) {
        log::debug!("browser session released");
    }
}

/// Errors that can occur while driving the portal
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Failed to initialize browser: {0}")]
    InitializationError(String),

    #[error("Invalid browser configuration: {0}")]
    ConfigurationError(String),

    #[error("Failed to create tab: {0}")]
    TabCreationError(String),

    #[error("Navigation failed: {0}")]
    NavigationError(String),

    #[error("JavaScript execution failed: {0}")]
    JavaScriptError(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timed out: {0}")]
    Timeout(String),
}

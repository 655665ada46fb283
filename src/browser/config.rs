use crate::config::ScrapeConfig;
use std::time::Duration;

/// Runtime configuration for the browser session.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// Disable image loading for performance
    pub disable_images: bool,

    /// Ceiling for the page-idle wait
    pub idle_timeout: Duration,

    /// Ceiling for element-presence waits
    pub element_timeout: Duration,

    /// Fixed delay before idle polling starts
    pub settle_delay: Duration,

    /// Attempt ceiling for tab clicks blocked by a transient overlay
    pub tab_retry_limit: usize,

    /// Delay between tab click attempts
    pub tab_retry_delay: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            disable_images: true,
            idle_timeout: Duration::from_secs(30),
            element_timeout: Duration::from_secs(30),
            settle_delay: Duration::from_millis(500),
            tab_retry_limit: 150,
            tab_retry_delay: Duration::from_millis(200),
        }
    }
}

impl BrowserConfig {
    /// Create a configuration for debugging (non-headless, visible browser)
    pub fn debug_mode() -> Self {
        let mut config = Self::default();
        config.headless = false;
        config.disable_images = false;
        config
    }
}

impl From<&ScrapeConfig> for BrowserConfig {
    fn from(cfg: &ScrapeConfig) -> Self {
        Self {
            headless: cfg.headless,
            window_size: (cfg.window_width, cfg.window_height),
            disable_images: cfg.disable_images,
            idle_timeout: Duration::from_secs(cfg.idle_timeout_secs),
            element_timeout: Duration::from_secs(cfg.element_timeout_secs),
            settle_delay: Duration::from_millis(cfg.settle_delay_ms),
            tab_retry_limit: cfg.tab_retry_limit,
            tab_retry_delay: Duration::from_millis(cfg.tab_retry_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert_eq!(config.window_size, (1920, 1080));
        assert_eq!(config.idle_timeout, Duration::from_secs(30));
        assert_eq!(config.tab_retry_limit, 150);
    }

    #[test]
    fn test_debug_mode() {
        let config = BrowserConfig::debug_mode();
        assert!(!config.headless);
        assert!(!config.disable_images);
    }

    #[test]
    fn test_from_scrape_config() {
        let mut scrape = ScrapeConfig::default();
        scrape.idle_timeout_secs = 10;
        scrape.settle_delay_ms = 250;
        let config = BrowserConfig::from(&scrape);
        assert_eq!(config.idle_timeout, Duration::from_secs(10));
        assert_eq!(config.settle_delay, Duration::from_millis(250));
    }
}

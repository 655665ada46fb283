use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Career-selection page of the JupiterWeb portal.
pub const PORTAL_URL: &str = "https://uspdigital.usp.br/jupiterweb/jupCarreira.jsp?codmnu=8275";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// How many units to scrape; 0 means all of them.
    #[serde(default)]
    pub max_units: usize,

    #[serde(default = "default_portal_url")]
    pub portal_url: String,

    #[serde(default)]
    pub browser: ScrapeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScrapeConfig {
    /// Run Chrome in headless mode
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Browser window size
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Disable image loading for faster navigation
    #[serde(default = "default_true")]
    pub disable_images: bool,

    /// Ceiling for the page-idle wait, in seconds
    #[serde(default = "default_timeout")]
    pub idle_timeout_secs: u64,

    /// Ceiling for element-presence waits, in seconds
    #[serde(default = "default_timeout")]
    pub element_timeout_secs: u64,

    /// Settle delay before idle polling starts, in milliseconds. The
    /// request counter can momentarily read zero between an action and
    /// the overlay's appearance.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// How many times a tab click is retried while an overlay covers it
    #[serde(default = "default_tab_retry_limit")]
    pub tab_retry_limit: usize,

    /// Delay between tab click retries, in milliseconds
    #[serde(default = "default_tab_retry_delay")]
    pub tab_retry_delay_ms: u64,
}

fn default_true() -> bool {
    true
}
fn default_portal_url() -> String {
    PORTAL_URL.to_string()
}
fn default_window_width() -> u32 {
    1920
}
fn default_window_height() -> u32 {
    1080
}
fn default_timeout() -> u64 {
    30
}
fn default_settle_delay() -> u64 {
    500
}
fn default_tab_retry_limit() -> usize {
    150
}
fn default_tab_retry_delay() -> u64 {
    200
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            disable_images: true,
            idle_timeout_secs: 30,
            element_timeout_secs: 30,
            settle_delay_ms: 500,
            tab_retry_limit: 150,
            tab_retry_delay_ms: 200,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_units: 0,
            portal_url: PORTAL_URL.to_string(),
            browser: ScrapeConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                match toml::from_str::<Config>(&content) {
                    Ok(cfg) => return cfg,
                    Err(e) => log::warn!("config.toml ignored: {}", e),
                }
            }
        }
        Self::default()
    }
}

//! Browser automation for the JupiterWeb career portal.
//!
//! The portal is a JavaScript-driven multi-step form with no API: a real
//! browser has to be driven through cascading dropdowns and tabbed result
//! panels, and the rendered HTML parsed after each step. This module wraps
//! headless Chrome with the page-level primitives that flow needs:
//!
//! - [`BrowserManager`] launches Chrome and opens the portal tab
//! - [`CareerPage`] drives one live tab: idle waits, dropdown selection,
//!   tab switching, error-popup detection
//!
//! # Example
//!
//! ```no_run
//! use jupiter_scraper::browser::{BrowserConfig, BrowserManager, CareerPage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = BrowserManager::new(BrowserConfig::default())?;
//! let page = CareerPage::new(manager.new_tab()?, BrowserConfig::default());
//! page.navigate("https://uspdigital.usp.br/jupiterweb/jupCarreira.jsp?codmnu=8275")?;
//! page.wait_for_selector("#comboUnidade option:nth-child(2)")?;
//! let html = page.html()?;
//! println!("{} bytes of rendered HTML", html.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod page;

pub use config::BrowserConfig;
pub use manager::{BrowserError, BrowserManager};
pub use page::CareerPage;

use super::config::BrowserConfig;
use super::manager::BrowserError;
use headless_chrome::Tab;
use serde_json::Value;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Element ids of the career page markup. Selector stability is imposed by
/// the portal, not chosen here.
pub const UNIT_COMBO: &str = "comboUnidade";
pub const PROGRAM_COMBO: &str = "comboCurso";
pub const SUBMIT_BUTTON: &str = "enviar";
pub const SEARCH_TAB: &str = "step1-tab";
pub const INFO_TAB: &str = "step2-tab";
pub const CURRICULUM_TAB: &str = "step4-tab";

const ERROR_POPUP: &str = "err";
const ERROR_DISMISS: &str = "div.ui-dialog-buttonset button";
const OVERLAY: &str = "div.blockUI";

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Drives one live tab of the career portal: idle waits, cascading
/// dropdown selection, tab switching and error-popup recovery. Reads of
/// rendered HTML must be gated behind [`CareerPage::wait_until_idle`];
/// the page updates asynchronously after every action.
pub struct CareerPage {
    tab: Arc<Tab>,
    config: BrowserConfig,
}

impl CareerPage {
    pub fn new(tab: Arc<Tab>, config: BrowserConfig) -> Self {
        Self { tab, config }
    }

    /// Navigate to a URL and wait for the initial page load
    pub fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationError(format!("Navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    /// Block until the page's pending-request counter is zero and no
    /// blocking overlay is visible. The settle delay runs first: the
    /// counter can momentarily read zero between an action and the
    /// overlay's appearance. Expiry of the ceiling is fatal for the run.
    pub fn wait_until_idle(&self) -> Result<(), BrowserError> {
        thread::sleep(self.config.settle_delay);

        let script = format!(
            r#"(function() {{
                if (window.jQuery && jQuery.active > 0) {{ return false; }}
                var overlay = document.querySelector('{}');
                return overlay === null || overlay.offsetParent === null;
            }})()"#,
            OVERLAY
        );

        let start = Instant::now();
        loop {
            if let Ok(true) = self.eval_bool(&script) {
                return Ok(());
            }
            if start.elapsed() > self.config.idle_timeout {
                return Err(BrowserError::Timeout(
                    "page did not reach idle state".to_string(),
                ));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Wait for an element matching the given CSS selector to appear
    pub fn wait_for_selector(&self, selector: &str) -> Result<(), BrowserError> {
        let script = format!(
            r#"document.querySelector('{}') !== null"#,
            selector.replace('\'', "\\'")
        );

        let start = Instant::now();
        loop {
            if let Ok(true) = self.eval_bool(&script) {
                return Ok(());
            }
            if start.elapsed() > self.config.element_timeout {
                return Err(BrowserError::Timeout(format!(
                    "Waiting for selector: {}",
                    selector
                )));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Open a dropdown and choose the option at 1-based `ordinal`. The
    /// first option is always the empty placeholder; orchestration only
    /// passes ordinals from 2 up. Downstream effects are not awaited here;
    /// callers follow with an idle or element wait.
    pub fn select_nth_option(&self, combo_id: &str, ordinal: usize) -> Result<(), BrowserError> {
        debug_assert!(ordinal >= 1, "ordinals are 1-based");
        let script = format!(
            r#"(function() {{
                var combo = document.getElementById('{id}');
                if (combo === null || combo.options.length < {len}) {{ return false; }}
                combo.click();
                combo.selectedIndex = {index};
                combo.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#,
            id = combo_id,
            len = ordinal,
            index = ordinal - 1
        );

        if self.eval_bool(&script)? {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound(format!(
                "#{} option {}",
                combo_id, ordinal
            )))
        }
    }

    /// Click the search form's submit control
    pub fn submit(&self) -> Result<(), BrowserError> {
        self.click_by_id(SUBMIT_BUTTON)
    }

    /// Switch to a result tab, retrying while a transient overlay covers
    /// it. The overlay is guaranteed transient by the page itself, but the
    /// retry is still bounded so a stuck page surfaces as a timeout
    /// instead of a hang. Re-activating the active tab is a no-op.
    pub fn activate_tab(&self, tab_id: &str) -> Result<(), BrowserError> {
        let probe = format!(
            r#"(function() {{
                var el = document.getElementById('{id}');
                if (el === null || el.offsetParent === null) {{ return false; }}
                var r = el.getBoundingClientRect();
                var hit = document.elementFromPoint(r.left + r.width / 2, r.top + r.height / 2);
                return hit !== null && (hit === el || el.contains(hit) || hit.contains(el));
            }})()"#,
            id = tab_id
        );

        for attempt in 0..self.config.tab_retry_limit {
            if let Ok(true) = self.eval_bool(&probe) {
                if attempt > 0 {
                    log::debug!("tab #{} clickable after {} retries", tab_id, attempt);
                }
                return self.click_by_id(tab_id);
            }
            thread::sleep(self.config.tab_retry_delay);
        }

        Err(BrowserError::Timeout(format!(
            "tab #{} stayed covered by an overlay",
            tab_id
        )))
    }

    /// After a submit, check for the portal's "no results" popup. When
    /// present it is dismissed and `true` is returned: the selection
    /// failed and the caller records a placeholder entry. Absence means
    /// the selection succeeded.
    pub fn check_and_dismiss_error(&self) -> Result<bool, BrowserError> {
        let visible = format!(
            r#"(function() {{
                var err = document.getElementById('{}');
                return err !== null && err.offsetParent !== null;
            }})()"#,
            ERROR_POPUP
        );

        if !self.eval_bool(&visible)? {
            return Ok(false);
        }

        log::debug!("no-results popup detected, dismissing");
        let dismiss = format!(
            r#"(function() {{
                var btn = document.querySelector('{}');
                if (btn === null) {{ return false; }}
                btn.click();
                return true;
            }})()"#,
            ERROR_DISMISS
        );

        if !self.eval_bool(&dismiss)? {
            return Err(BrowserError::ElementNotFound(ERROR_DISMISS.to_string()));
        }

        self.wait_until_idle()?;
        Ok(true)
    }

    /// Get the HTML content of the page
    pub fn html(&self) -> Result<String, BrowserError> {
        self.tab
            .get_content()
            .map_err(|e| BrowserError::JavaScriptError(e.to_string()))
    }

    fn click_by_id(&self, id: &str) -> Result<(), BrowserError> {
        let script = format!(
            r#"(function() {{
                var el = document.getElementById('{id}');
                if (el === null) {{ return false; }}
                el.click();
                return true;
            }})()"#,
            id = id
        );

        if self.eval_bool(&script)? {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound(format!("#{}", id)))
        }
    }

    fn eval_bool(&self, script: &str) -> Result<bool, BrowserError> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| BrowserError::JavaScriptError(e.to_string()))?;

        Ok(matches!(result.value, Some(Value::Bool(true))))
    }
}

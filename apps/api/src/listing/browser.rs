//! Headless Chrome page renderer.
//!
//! Many job boards populate their content client-side, so a plain HTTP GET sees
//! an empty shell. This renderer drives a real browser, waits for navigation to
//! settle, and serialises the resulting DOM.
//!
//! # Session lifetime
//! Each call launches exactly one browser and owns it through a [`BrowserSession`].
//! The guard closes its tab on drop and dropping the `Browser` kills the Chrome
//! process, so the session is released on every exit path. Sessions are never
//! pooled or shared.

use std::sync::Arc;
use std::time::{Duration, Instant};

use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::{debug, info, warn};

use crate::config::FetchConfig;
use crate::listing::{FetchError, PageRenderer};

/// Renders pages through a freshly launched headless Chrome.
pub struct HeadlessRenderer {
    config: FetchConfig,
}

impl HeadlessRenderer {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }
}

impl PageRenderer for HeadlessRenderer {
    fn render(&self, url: &str) -> Result<String, FetchError> {
        let deadline = Deadline::start(self.config.timeout);

        let result = BrowserSession::open(&self.config, &deadline, url)
            .and_then(|session| session.capture(url, &deadline));
        let elapsed = deadline.elapsed();

        let html = settle(result, elapsed, deadline.ceiling, url)?;
        info!(
            "Rendered {} ({} bytes) in {}ms",
            url,
            html.len(),
            elapsed.as_millis()
        );
        Ok(html)
    }
}

/// A navigation that fails or finishes after the ceiling counts as a timeout.
fn settle(
    result: Result<String, FetchError>,
    elapsed: Duration,
    ceiling: Duration,
    url: &str,
) -> Result<String, FetchError> {
    match result {
        Ok(_) | Err(FetchError::Navigation { .. }) if elapsed >= ceiling => {
            Err(timeout_error(url, ceiling))
        }
        other => other,
    }
}

fn timeout_error(url: &str, ceiling: Duration) -> FetchError {
    FetchError::Timeout {
        url: url.to_string(),
        secs: ceiling.as_secs(),
    }
}

/// The single time budget shared by every step of one render.
struct Deadline {
    started: Instant,
    ceiling: Duration,
}

impl Deadline {
    fn start(ceiling: Duration) -> Self {
        Self {
            started: Instant::now(),
            ceiling,
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left for the next step, or a timeout once the budget is spent.
    fn remaining(&self, url: &str) -> Result<Duration, FetchError> {
        remaining_budget(self.ceiling, self.elapsed())
            .ok_or_else(|| timeout_error(url, self.ceiling))
    }
}

fn remaining_budget(ceiling: Duration, elapsed: Duration) -> Option<Duration> {
    ceiling.checked_sub(elapsed).filter(|left| !left.is_zero())
}

/// One browser plus the single tab used for a render. Released on drop.
struct BrowserSession {
    // Field order matters: the tab must be dropped before the browser.
    tab: Arc<Tab>,
    _browser: Browser,
}

impl BrowserSession {
    fn open(config: &FetchConfig, deadline: &Deadline, url: &str) -> Result<Self, FetchError> {
        let options = LaunchOptions {
            headless: true,
            sandbox: config.sandbox,
            path: config.chrome_path.clone(),
            idle_browser_timeout: idle_timeout(config.timeout),
            ..LaunchOptions::default()
        };

        let browser = Browser::new(options).map_err(|e| FetchError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| FetchError::Launch(e.to_string()))?;
        let session = Self {
            tab,
            _browser: browser,
        };
        // Launch time counts against the ceiling.
        deadline.remaining(url)?;
        debug!("Browser session opened in {}ms", deadline.elapsed().as_millis());
        Ok(session)
    }

    /// Navigates, waits for the load signal, and returns the serialised DOM.
    /// Each wait is bounded by whatever is left of the deadline.
    fn capture(&self, url: &str, deadline: &Deadline) -> Result<String, FetchError> {
        let navigation_error = |e: anyhow::Error| FetchError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        };

        self.tab.set_default_timeout(deadline.remaining(url)?);
        self.tab.navigate_to(url).map_err(navigation_error)?;

        self.tab.set_default_timeout(deadline.remaining(url)?);
        self.tab.wait_until_navigated().map_err(navigation_error)?;

        self.tab.set_default_timeout(deadline.remaining(url)?);
        self.tab.get_content().map_err(navigation_error)
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(e) = self.tab.close(false) {
            warn!("Failed to close browser tab cleanly: {e}");
        }
        debug!("Browser session released");
    }
}

/// The websocket idle timeout must outlive the slowest allowed wait.
fn idle_timeout(ceiling: Duration) -> Duration {
    ceiling + Duration::from_secs(5)
}

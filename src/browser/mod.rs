// src/browser/mod.rs
use crate::error::AnalyzerError;
use crate::utils::random_pause;
use fantoccini::ClientBuilder;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};
use webdriver::capabilities::Capabilities;

pub mod extractor;
pub mod heuristic;

pub use extractor::{FieldExtractor, FieldSelectors};
pub use heuristic::LoginWallHeuristic;

/// Snapshot of one loaded page: the URL the browser settled on and the
/// rendered HTML source.
#[derive(Debug, Clone)]
pub struct PageHandle {
    pub url: String,
    pub html: String,
}

/// WebDriver session bound to a persistent on-disk profile directory, so a
/// completed login survives process restarts.
pub struct Navigator {
    client: fantoccini::Client,
    headless: bool,
    heuristic: LoginWallHeuristic,
}

impl Navigator {
    /// Connect to a running WebDriver service (Chromedriver by default) and
    /// start a browser session using `session_dir` as the user data dir.
    pub async fn connect(
        webdriver_url: &str,
        session_dir: &Path,
        headless: bool,
        heuristic: LoginWallHeuristic,
    ) -> Result<Self, AnalyzerError> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();

        let mut args = vec![
            format!("--user-data-dir={}", session_dir.display()),
            "--no-first-run".to_string(),
            "--disable-extensions".to_string(),
            "--window-size=1280,900".to_string(),
        ];
        if headless {
            args.push("--headless=new".to_string());
            args.push("--disable-gpu".to_string());
        }

        chrome_opts.insert("args".to_string(), json!(args));
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await
            .map_err(|e| AnalyzerError::navigation(webdriver_url, e))?;

        info!(
            "Browser session started (headless: {}, session dir: {})",
            headless,
            session_dir.display()
        );

        Ok(Self {
            client,
            headless,
            heuristic,
        })
    }

    /// Navigate to a profile URL and return a page snapshot.
    ///
    /// If the page looks like a login wall: in headless mode this fails fast
    /// with `AuthenticationRequired`; in headful mode it polls without a
    /// timeout until a human finishes signing in, then reloads the profile.
    pub async fn open(&mut self, url: &str) -> Result<PageHandle, AnalyzerError> {
        self.goto(url).await?;
        let mut html = self.page_source(url).await?;

        if self.heuristic.is_login_wall(&html) {
            if self.headless {
                return Err(AnalyzerError::AuthenticationRequired(url.to_string()));
            }

            warn!("Login wall detected at {}; waiting for manual sign-in", url);
            loop {
                random_pause(3000, 6000).await;
                html = self.page_source(url).await?;
                if !self.heuristic.is_login_wall(&html) {
                    break;
                }
            }
            info!("Sign-in completed, reloading profile");

            // The post-login redirect often lands on the feed, not the profile.
            self.goto(url).await?;
            html = self.page_source(url).await?;
        }

        let settled_url = self
            .client
            .current_url()
            .await
            .map(|u| u.to_string())
            .unwrap_or_else(|_| url.to_string());

        Ok(PageHandle {
            url: settled_url,
            html,
        })
    }

    /// End the browser session. The profile directory stays on disk.
    pub async fn close(self) {
        if let Err(e) = self.client.close().await {
            warn!("Failed to close browser session cleanly: {}", e);
        }
    }

    async fn goto(&mut self, url: &str) -> Result<(), AnalyzerError> {
        self.client
            .goto(url)
            .await
            .map_err(|e| AnalyzerError::navigation(url, e))?;
        // Let client-side rendering settle before reading the source.
        random_pause(2000, 4000).await;
        Ok(())
    }

    async fn page_source(&mut self, url: &str) -> Result<String, AnalyzerError> {
        self.client
            .source()
            .await
            .map_err(|e| AnalyzerError::navigation(url, e))
    }
}

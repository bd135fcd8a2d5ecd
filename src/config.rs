// src/config.rs
//! Unified configuration management - env vars plus an optional TOML overlay

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Supplied once at process start, immutable afterwards.
    pub api_key: String,
    pub model: String,
    pub webdriver_url: String,
    /// Persistent browser profile directory; survives restarts so login does.
    pub session_dir: PathBuf,
    pub output_dir: PathBuf,
    pub headless: bool,
    pub port: u16,
    pub selectors: SelectorOverlay,
}

/// Selector lists loadable from `linkscope.toml`. Anything absent falls back
/// to the built-in defaults in the browser module.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectorOverlay {
    #[serde(default)]
    pub login_wall: LoginWallOverlay,
    #[serde(default)]
    pub fields: FieldSelectorOverlay,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginWallOverlay {
    pub login_markers: Option<Vec<String>>,
    pub profile_markers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldSelectorOverlay {
    pub name: Option<Vec<String>>,
    pub headline: Option<Vec<String>>,
    pub about: Option<Vec<String>>,
    pub experience: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    pub education: Option<Vec<String>>,
}

impl AppConfig {
    /// Load configuration from the environment and, when present,
    /// `linkscope.toml` in the working directory.
    pub fn load() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY environment variable not set")?;

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let webdriver_url = std::env::var("WEBDRIVER_URL")
            .unwrap_or_else(|_| DEFAULT_WEBDRIVER_URL.to_string());

        let base_dir = std::env::current_dir().context("Failed to get current directory")?;

        let session_dir = std::env::var("SESSION_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| base_dir.join("session"));

        let output_dir = std::env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| base_dir.join("out"));

        let headless = std::env::var("HEADLESS")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let port = match std::env::var("ROCKET_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .context("ROCKET_PORT must be a valid port number")?,
            Err(_) => DEFAULT_PORT,
        };

        let selectors = Self::load_selector_overlay(&base_dir.join("linkscope.toml"))?;

        Ok(Self {
            api_key,
            model,
            webdriver_url,
            session_dir,
            output_dir,
            headless,
            port,
            selectors,
        })
    }

    fn load_selector_overlay(path: &PathBuf) -> Result<SelectorOverlay> {
        if !path.exists() {
            return Ok(SelectorOverlay::default());
        }

        info!("Loading selector overrides from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Ensure all required directories exist.
    pub async fn ensure_directories(&self) -> Result<()> {
        crate::utils::ensure_dir_exists(&self.session_dir).await?;
        crate::utils::ensure_dir_exists(&self.output_dir).await?;
        Ok(())
    }
}

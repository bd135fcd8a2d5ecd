// src/browser/heuristic.rs
use crate::config::LoginWallOverlay;
use scraper::{Html, Selector};

const DEFAULT_LOGIN_MARKERS: [&str; 3] = [
    "form.login__form",
    "input[name='session_key']",
    ".sign-in-form",
];

const DEFAULT_PROFILE_MARKERS: [&str; 4] = [
    "h1.text-heading-xlarge",
    "main .pv-top-card",
    ".top-card-layout",
    "section[data-section='summary']",
];

/// Decides whether a fetched page is a login wall rather than a profile.
///
/// The exact signal LinkedIn emits for "logged out" changes over time, so the
/// two marker lists are configurable: login markers whose presence confirms a
/// wall, and profile markers whose absence suggests one.
#[derive(Debug, Clone)]
pub struct LoginWallHeuristic {
    login_markers: Vec<String>,
    profile_markers: Vec<String>,
}

impl Default for LoginWallHeuristic {
    fn default() -> Self {
        Self {
            login_markers: DEFAULT_LOGIN_MARKERS.iter().map(|s| s.to_string()).collect(),
            profile_markers: DEFAULT_PROFILE_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl LoginWallHeuristic {
    pub fn from_overlay(overlay: &LoginWallOverlay) -> Self {
        let defaults = Self::default();
        Self {
            login_markers: overlay
                .login_markers
                .clone()
                .unwrap_or(defaults.login_markers),
            profile_markers: overlay
                .profile_markers
                .clone()
                .unwrap_or(defaults.profile_markers),
        }
    }

    pub fn is_login_wall(&self, html: &str) -> bool {
        let document = Html::parse_document(html);

        if self
            .login_markers
            .iter()
            .any(|marker| matches_selector(&document, marker))
        {
            return true;
        }

        !self
            .profile_markers
            .iter()
            .any(|marker| matches_selector(&document, marker))
    }
}

fn matches_selector(document: &Html, selector_str: &str) -> bool {
    match Selector::parse(selector_str) {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(_) => false,
    }
}

// src/utils.rs
use anyhow::{Context, Result};
use rand::Rng;
use std::path::Path;
use url::Url;

/// Loose check that a string points at a LinkedIn profile page. This is
/// "looks like a profile URL", nothing stronger.
pub fn is_linkedin_profile_url(raw: &str) -> bool {
    let parsed = match Url::parse(raw.trim()) {
        Ok(url) => url,
        Err(_) => return false,
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    let host_ok = parsed
        .host_str()
        .map(|h| h == "linkedin.com" || h.ends_with(".linkedin.com"))
        .unwrap_or(false);

    host_ok && parsed.path().starts_with("/in/")
}

/// Timestamp suffix used for output artifacts.
pub fn file_timestamp() -> String {
    chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Sleep for a random interval, roughly the cadence of a human paging
/// through profiles.
pub async fn random_pause(min_ms: u64, max_ms: u64) {
    let wait = {
        let mut rng = rand::thread_rng();
        rng.gen_range(min_ms..=max_ms)
    };
    tokio::time::sleep(std::time::Duration::from_millis(wait)).await;
}

pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_profile_urls() {
        assert!(is_linkedin_profile_url(
            "https://www.linkedin.com/in/jane-doe/"
        ));
        assert!(is_linkedin_profile_url("https://linkedin.com/in/jdoe"));
        assert!(is_linkedin_profile_url(
            " https://www.linkedin.com/in/jdoe-12345 "
        ));
    }

    #[test]
    fn rejects_non_profile_urls() {
        assert!(!is_linkedin_profile_url("not a url"));
        assert!(!is_linkedin_profile_url("https://example.com/in/jdoe"));
        assert!(!is_linkedin_profile_url(
            "https://www.linkedin.com/jobs/view/1234"
        ));
        assert!(!is_linkedin_profile_url("ftp://linkedin.com/in/jdoe"));
        assert!(!is_linkedin_profile_url(""));
    }
}

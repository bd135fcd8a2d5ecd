// src/profile.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six fixed sections read from a profile page. Always fully populated:
/// a section the extractor could not find is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub name: String,
    pub headline: String,
    pub about: String,
    pub experience: String,
    pub skills: String,
    pub education: String,
}

impl ProfileFields {
    pub const COLUMNS: [&'static str; 6] = [
        "name",
        "headline",
        "about",
        "experience",
        "skills",
        "education",
    ];

    /// Column values in the same order as [`Self::COLUMNS`].
    pub fn values(&self) -> [&str; 6] {
        [
            &self.name,
            &self.headline,
            &self.about,
            &self.experience,
            &self.skills,
            &self.education,
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|v| v.trim().is_empty())
    }
}

/// Sections read off the page before the empty-string collapse, so tests can
/// distinguish "absent" from "present but empty".
#[derive(Debug, Clone, Default)]
pub struct RawProfile {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
    pub education: Option<String>,
}

impl RawProfile {
    /// Collapse absent sections to empty strings. This is the only place the
    /// Option-ness is dropped.
    pub fn into_fields(self) -> ProfileFields {
        ProfileFields {
            name: self.name.unwrap_or_default(),
            headline: self.headline.unwrap_or_default(),
            about: self.about.unwrap_or_default(),
            experience: self.experience.unwrap_or_default(),
            skills: self.skills.unwrap_or_default(),
            education: self.education.unwrap_or_default(),
        }
    }
}

/// Which prompt template the summarizer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Bio,
    Summary,
    Analysis,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 3] = [
        AnalysisKind::Bio,
        AnalysisKind::Summary,
        AnalysisKind::Analysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Bio => "bio",
            AnalysisKind::Summary => "summary",
            AnalysisKind::Analysis => "analysis",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bio" => Ok(AnalysisKind::Bio),
            "summary" => Ok(AnalysisKind::Summary),
            "analysis" => Ok(AnalysisKind::Analysis),
            other => Err(format!(
                "unknown analysis kind '{}', expected bio, summary or analysis",
                other
            )),
        }
    }
}

/// Terminal outcome of one successful analysis. Written to the UI or a CSV
/// row, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub profile_url: String,
    pub fields: ProfileFields,
    pub kind: AnalysisKind,
    pub summary: String,
    pub generated_at: DateTime<Utc>,
}

// src/analyzer.rs
use crate::browser::{FieldExtractor, Navigator};
use crate::error::AnalyzerError;
use crate::profile::{AnalysisKind, AnalysisResult, ProfileFields};
use crate::summarizer::Summarize;
use async_trait::async_trait;
use tracing::info;

/// Source of extracted profile fields for a URL. The browser-backed
/// implementation is the real one; tests substitute their own.
#[async_trait]
pub trait ProfileSource: Send {
    async fn fetch(&mut self, url: &str) -> Result<ProfileFields, AnalyzerError>;
}

/// Navigator + extractor glued into one fetch step. One instance per browser
/// session; a batch run reuses it across every row.
pub struct BrowserProfileSource {
    navigator: Navigator,
    extractor: FieldExtractor,
}

impl BrowserProfileSource {
    pub fn new(navigator: Navigator, extractor: FieldExtractor) -> Self {
        Self {
            navigator,
            extractor,
        }
    }

    pub async fn close(self) {
        self.navigator.close().await;
    }
}

#[async_trait]
impl ProfileSource for BrowserProfileSource {
    async fn fetch(&mut self, url: &str) -> Result<ProfileFields, AnalyzerError> {
        let page = self.navigator.open(url).await?;
        self.extractor.extract(&page)
    }
}

/// The full chain for one URL: fetch fields, generate the summary, assemble
/// the terminal result. Shared by the console, web, and batch entry points.
pub async fn analyze_profile(
    source: &mut dyn ProfileSource,
    summarizer: &dyn Summarize,
    url: &str,
    kind: AnalysisKind,
) -> Result<AnalysisResult, AnalyzerError> {
    info!("Analyzing profile: {}", url);

    let fields = source.fetch(url).await?;
    let summary = summarizer.summarize(&fields, kind).await?;

    Ok(AnalysisResult {
        profile_url: url.to_string(),
        fields,
        kind,
        summary,
        generated_at: chrono::Utc::now(),
    })
}

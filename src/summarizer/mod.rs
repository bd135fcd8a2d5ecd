// src/summarizer/mod.rs
use crate::error::AnalyzerError;
use crate::profile::{AnalysisKind, ProfileFields};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

pub mod prompts;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Turns extracted profile text into generated prose. The one
/// non-deterministic stage in the pipeline; everything else is pure given the
/// same page content.
#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(
        &self,
        fields: &ProfileFields,
        kind: AnalysisKind,
    ) -> Result<String, AnalyzerError>;
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: String,
}

/// Gemini `generateContent` client. The API key is handed in once at
/// construction and never changes for the process lifetime.
pub struct GeminiSummarizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiSummarizer {
    pub fn new(api_key: String, model: String) -> Result<Self, AnalyzerError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| AnalyzerError::Summarizer(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Summarize for GeminiSummarizer {
    async fn summarize(
        &self,
        fields: &ProfileFields,
        kind: AnalysisKind,
    ) -> Result<String, AnalyzerError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompts::build_prompt(fields, kind),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: Some(0.6),
                max_output_tokens: Some(1024),
            }),
            system_instruction: Some(GeminiSystemInstruction {
                parts: vec![GeminiPart {
                    text: prompts::SYSTEM_PROMPT.to_string(),
                }],
            }),
        };

        debug!("Sending {} request to {}", kind, url);

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalyzerError::Summarizer(format!("request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                429 => AnalyzerError::Summarizer("quota exhausted".to_string()),
                401 | 403 => AnalyzerError::Summarizer("API key rejected".to_string()),
                _ => AnalyzerError::Summarizer(format!("API error ({}): {}", status, error_text)),
            });
        }

        let response: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| AnalyzerError::Summarizer(format!("malformed response: {}", e)))?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AnalyzerError::Summarizer("no candidates returned".to_string()))?;

        if let Some(reason) = &candidate.finish_reason {
            if reason == "SAFETY" {
                return Err(AnalyzerError::Summarizer(
                    "content blocked by safety filters".to_string(),
                ));
            }
        }

        let text = candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<String>();

        if text.trim().is_empty() {
            return Err(AnalyzerError::Summarizer("empty response".to_string()));
        }

        info!("Generated {} text ({} chars)", kind, text.len());
        Ok(text)
    }
}

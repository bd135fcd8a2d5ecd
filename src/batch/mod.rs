// src/batch/mod.rs
use crate::analyzer::{analyze_profile, ProfileSource};
use crate::error::AnalyzerError;
use crate::profile::{AnalysisKind, AnalysisResult};
use crate::summarizer::Summarize;
use crate::utils::{file_timestamp, is_linkedin_profile_url, random_pause};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info};

pub mod csv_io;

use csv_io::{BatchInput, ErrorsWriter, ResultsWriter};

/// What a finished batch run left on disk, plus the counters for display.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub results_path: PathBuf,
    pub errors_path: PathBuf,
    pub summary_path: PathBuf,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Sequential per-row driver over a CSV of profile URLs.
///
/// Rows are processed in file order with no parallelism and no deduplication;
/// every input row ends as exactly one results row or one errors row. Output
/// is streamed per row, so killing the process mid-batch leaves files that
/// reflect all fully completed rows.
pub struct BatchRunner {
    kind: AnalysisKind,
    url_column: String,
    output_dir: PathBuf,
    row_delay_ms: Option<(u64, u64)>,
}

impl BatchRunner {
    pub fn new(kind: AnalysisKind, url_column: String, output_dir: PathBuf) -> Self {
        Self {
            kind,
            url_column,
            output_dir,
            row_delay_ms: None,
        }
    }

    /// Pause for a random interval in this range between rows. Keeps a live
    /// batch from hammering profile pages back to back.
    pub fn with_row_delay(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.row_delay_ms = Some((min_ms, max_ms));
        self
    }

    pub async fn run(
        &self,
        source: &mut dyn ProfileSource,
        summarizer: &dyn Summarize,
        csv_content: &str,
    ) -> Result<BatchReport> {
        let input = BatchInput::parse(csv_content, &self.url_column)?;
        let total = input.rows().len();
        info!("Starting batch of {} rows (kind: {})", total, self.kind);

        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.output_dir.display()
            )
        })?;

        let timestamp = file_timestamp();
        let results_path = self
            .output_dir
            .join(format!("batch_results_{}_{}.csv", self.kind, timestamp));
        let errors_path = self
            .output_dir
            .join(format!("batch_errors_{}.csv", timestamp));
        let summary_path = self
            .output_dir
            .join(format!("batch_summary_{}.txt", timestamp));

        let mut results = ResultsWriter::create(&results_path, input.headers())?;
        let mut errors = ErrorsWriter::create(&errors_path)?;

        let mut succeeded_profiles: Vec<(String, String)> = Vec::new();
        let mut failed_profiles: Vec<(String, String)> = Vec::new();

        for (i, row) in input.rows().iter().enumerate() {
            let url = input.url_of(row);

            match self.process_row(source, summarizer, &url).await {
                Ok(result) => {
                    results.write_row(row, &result.fields, self.kind, &result.summary)?;
                    succeeded_profiles.push((result.fields.name.clone(), url.clone()));
                }
                Err(e) => {
                    error!("Row {} of {} failed ({}): {}", i + 1, total, url, e);
                    errors.write_row(&url, &e.to_string())?;
                    failed_profiles.push((url.clone(), e.to_string()));
                }
            }

            info!("row {} of {} complete", i + 1, total);

            if let Some((min_ms, max_ms)) = self.row_delay_ms {
                if i + 1 < total {
                    random_pause(min_ms, max_ms).await;
                }
            }
        }

        let report = BatchReport {
            results_path,
            errors_path,
            summary_path,
            total,
            succeeded: succeeded_profiles.len(),
            failed: failed_profiles.len(),
        };

        self.write_summary_report(&report, &succeeded_profiles, &failed_profiles)?;

        info!(
            "Batch complete: {} succeeded, {} failed out of {}",
            report.succeeded, report.failed, report.total
        );
        Ok(report)
    }

    async fn process_row(
        &self,
        source: &mut dyn ProfileSource,
        summarizer: &dyn Summarize,
        url: &str,
    ) -> Result<AnalysisResult, AnalyzerError> {
        if !is_linkedin_profile_url(url) {
            return Err(AnalyzerError::navigation(
                url,
                "not a LinkedIn profile URL",
            ));
        }

        analyze_profile(source, summarizer, url, self.kind).await
    }

    fn write_summary_report(
        &self,
        report: &BatchReport,
        succeeded: &[(String, String)],
        failed: &[(String, String)],
    ) -> Result<()> {
        let mut out = String::new();
        out.push_str("LinkedIn Profile Analyzer - Batch Summary\n");
        out.push_str(&format!(
            "Generated: {}\n",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out.push_str(&format!("Analysis kind: {}\n", self.kind));
        out.push_str(&format!("Total rows: {}\n", report.total));
        out.push_str(&format!("Succeeded: {}\n", report.succeeded));
        out.push_str(&format!("Failed: {}\n", report.failed));
        if report.total > 0 {
            out.push_str(&format!(
                "Success rate: {:.1}%\n",
                report.succeeded as f64 / report.total as f64 * 100.0
            ));
        }

        if !succeeded.is_empty() {
            out.push_str("\nProcessed profiles:\n");
            for (name, url) in succeeded {
                let display = if name.is_empty() { "(no name)" } else { name };
                out.push_str(&format!("- {} ({})\n", display, url));
            }
        }

        if !failed.is_empty() {
            out.push_str("\nFailed profiles:\n");
            for (url, message) in failed {
                out.push_str(&format!("- {}: {}\n", url, message));
            }
        }

        std::fs::write(&report.summary_path, out).with_context(|| {
            format!(
                "Failed to write summary report: {}",
                report.summary_path.display()
            )
        })
    }
}

// src/batch/csv_io.rs
use crate::error::AnalyzerError;
use crate::profile::{AnalysisKind, ProfileFields};
use anyhow::{Context, Result};
use csv::StringRecord;
use std::fs::File;
use std::path::Path;

/// Parsed batch input: the header row, the index of the URL column, and every
/// data row in file order. Extra columns ride along untouched.
#[derive(Debug)]
pub struct BatchInput {
    headers: StringRecord,
    url_index: usize,
    rows: Vec<StringRecord>,
}

impl BatchInput {
    pub fn parse(content: &str, url_column: &str) -> Result<Self, AnalyzerError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AnalyzerError::CsvFormat(format!("unreadable CSV: {}", e)))?
            .clone();

        let url_index = headers
            .iter()
            .position(|h| h.trim() == url_column)
            .ok_or_else(|| {
                AnalyzerError::CsvFormat(format!(
                    "column '{}' not found; available columns: {}",
                    url_column,
                    headers.iter().collect::<Vec<_>>().join(", ")
                ))
            })?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| AnalyzerError::CsvFormat(format!("unreadable CSV: {}", e)))?;
            rows.push(record);
        }

        Ok(Self {
            headers,
            url_index,
            rows,
        })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// URL cell of one row, trimmed. Ragged rows yield an empty string.
    pub fn url_of(&self, row: &StringRecord) -> String {
        row.get(self.url_index).unwrap_or("").trim().to_string()
    }
}

/// Results CSV, written one row at a time so an aborted run keeps every
/// completed row on disk.
pub struct ResultsWriter {
    writer: csv::Writer<File>,
}

impl ResultsWriter {
    pub fn create(path: &Path, input_headers: &StringRecord) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create results file: {}", path.display()))?;
        let mut writer = csv::Writer::from_writer(file);

        let mut headers: Vec<String> = input_headers.iter().map(|h| h.to_string()).collect();
        headers.extend(ProfileFields::COLUMNS.iter().map(|c| c.to_string()));
        headers.push("analysis_kind".to_string());
        headers.push("summary".to_string());

        writer
            .write_record(&headers)
            .context("Failed to write results header")?;
        writer.flush().context("Failed to flush results header")?;

        Ok(Self { writer })
    }

    pub fn write_row(
        &mut self,
        input_row: &StringRecord,
        fields: &ProfileFields,
        kind: AnalysisKind,
        summary: &str,
    ) -> Result<()> {
        let mut record: Vec<String> = input_row.iter().map(|c| c.to_string()).collect();
        record.extend(fields.values().iter().map(|v| v.to_string()));
        record.push(kind.to_string());
        record.push(summary.to_string());

        self.writer
            .write_record(&record)
            .context("Failed to write results row")?;
        self.writer.flush().context("Failed to flush results row")
    }
}

/// Errors CSV: {profile_url, error_message}, also streamed per row.
pub struct ErrorsWriter {
    writer: csv::Writer<File>,
}

impl ErrorsWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create errors file: {}", path.display()))?;
        let mut writer = csv::Writer::from_writer(file);

        writer
            .write_record(["profile_url", "error_message"])
            .context("Failed to write errors header")?;
        writer.flush().context("Failed to flush errors header")?;

        Ok(Self { writer })
    }

    pub fn write_row(&mut self, url: &str, message: &str) -> Result<()> {
        self.writer
            .write_record([url, message])
            .context("Failed to write error row")?;
        self.writer.flush().context("Failed to flush error row")
    }
}

// src/web/types.rs
use crate::error::AnalyzerError;
use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::http::ContentType;
use rocket::response::{self, Responder};
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct AnalyzeRequest {
    pub profile_url: String,
    pub analysis_kind: Option<String>,
    /// Run the summarizer against canned fields without opening a browser.
    pub use_sample: Option<bool>,
}

#[derive(FromForm)]
pub struct BatchUploadForm<'f> {
    pub csv_file: TempFile<'f>,
    pub url_column: Option<String>,
    pub analysis_kind: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    pub success: bool,
    pub message: String,
}

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            success: false,
            error,
            error_code,
            suggestions,
        }
    }

    pub fn from_analyzer_error(e: &AnalyzerError) -> Self {
        let (code, suggestions) = match e {
            AnalyzerError::Navigation { .. } => (
                "NAVIGATION_FAILED",
                vec![
                    "Check the profile URL".to_string(),
                    "Verify the WebDriver service is running".to_string(),
                ],
            ),
            AnalyzerError::AuthenticationRequired(_) => (
                "AUTH_REQUIRED",
                vec![
                    "Run once with a visible browser window and sign in".to_string(),
                    "The session directory keeps the login for later runs".to_string(),
                ],
            ),
            AnalyzerError::InvalidPage(_) => (
                "INVALID_PAGE",
                vec!["The page did not render a readable profile".to_string()],
            ),
            AnalyzerError::Summarizer(_) => (
                "SUMMARIZER_FAILED",
                vec!["Check your Gemini API key and quota".to_string()],
            ),
            AnalyzerError::CsvFormat(_) => (
                "CSV_FORMAT",
                vec!["Check the uploaded file and the URL column name".to_string()],
            ),
        };

        Self::new(e.to_string(), code.to_string(), suggestions)
    }
}

/// CSV file download with an attachment filename.
pub struct CsvResponse {
    pub data: Vec<u8>,
    pub filename: Option<String>,
}

impl CsvResponse {
    pub fn with_filename(data: Vec<u8>, filename: String) -> Self {
        Self {
            data,
            filename: Some(filename),
        }
    }
}

impl<'r> Responder<'r, 'static> for CsvResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let mut binding = Response::build();
        let mut response = binding
            .header(ContentType::CSV)
            .sized_body(self.data.len(), std::io::Cursor::new(self.data));

        if let Some(filename) = self.filename {
            response = response.raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", filename),
            );
        }

        response.ok()
    }
}

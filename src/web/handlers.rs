// src/web/handlers.rs
use super::types::*;
use super::ServerState;
use crate::analyzer::{BrowserProfileSource, ProfileSource};
use crate::batch::BatchRunner;
use crate::browser::{FieldExtractor, FieldSelectors, LoginWallHeuristic, Navigator};
use crate::config::AppConfig;
use crate::error::AnalyzerError;
use crate::profile::{AnalysisKind, AnalysisResult, ProfileFields};
use crate::utils::{file_timestamp, is_linkedin_profile_url};
use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn analyze_handler(
    request: Json<AnalyzeRequest>,
    state: &State<ServerState>,
) -> Result<Json<DataResponse<AnalysisResult>>, Json<StandardErrorResponse>> {
    let kind = parse_kind(request.analysis_kind.as_deref())?;
    let use_sample = request.use_sample.unwrap_or(false);
    let url = request.profile_url.trim().to_string();

    let (profile_url, fields) = if use_sample {
        info!("Serving sample profile data");
        let url = if url.is_empty() {
            "https://www.linkedin.com/in/sample-profile/".to_string()
        } else {
            url
        };
        (url, sample_fields())
    } else {
        if !is_linkedin_profile_url(&url) {
            return Err(Json(StandardErrorResponse::new(
                "Please provide a valid LinkedIn profile URL".to_string(),
                "INVALID_URL".to_string(),
                vec!["Profile URLs look like https://www.linkedin.com/in/<handle>".to_string()],
            )));
        }

        info!("Analyzing profile via web request: {}", url);
        match scrape_profile(&state.config, &url).await {
            Ok(fields) => (url, fields),
            Err(e) => {
                error!("Scrape failed for {}: {}", url, e);
                return Err(Json(StandardErrorResponse::from_analyzer_error(&e)));
            }
        }
    };

    match state.summarizer.summarize(&fields, kind).await {
        Ok(summary) => Ok(Json(DataResponse::success(
            format!("Generated {} for {}", kind, profile_url),
            AnalysisResult {
                profile_url,
                fields,
                kind,
                summary,
                generated_at: chrono::Utc::now(),
            },
        ))),
        Err(e) => {
            error!("Summarizer failed for {}: {}", profile_url, e);
            Err(Json(StandardErrorResponse::from_analyzer_error(&e)))
        }
    }
}

pub async fn batch_analyze_handler(
    mut upload: Form<BatchUploadForm<'_>>,
    state: &State<ServerState>,
) -> Result<CsvResponse, Json<StandardErrorResponse>> {
    let kind = parse_kind(upload.analysis_kind.as_deref())?;
    let url_column = upload
        .url_column
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| "profile_url".to_string());

    // Stash the upload next to the other artifacts, then read it back.
    let upload_dir = state.config.output_dir.join("uploads");
    if let Err(e) = tokio::fs::create_dir_all(&upload_dir).await {
        error!("Failed to create upload directory: {}", e);
        return Err(Json(internal_upload_error()));
    }

    let upload_path = upload_dir.join(format!("batch_{}.csv", file_timestamp()));
    if let Err(e) = upload.csv_file.persist_to(&upload_path).await {
        error!("Failed to persist uploaded CSV: {}", e);
        return Err(Json(internal_upload_error()));
    }

    let csv_content = match tokio::fs::read_to_string(&upload_path).await {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to read uploaded CSV: {}", e);
            return Err(Json(internal_upload_error()));
        }
    };

    info!(
        "Batch upload received ({} bytes, url column '{}', kind {})",
        csv_content.len(),
        url_column,
        kind
    );

    // One browser session for the whole batch, as a human operator would
    // log in once and then walk the list.
    let mut source = match browser_source(&state.config).await {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to start browser session: {}", e);
            return Err(Json(StandardErrorResponse::from_analyzer_error(&e)));
        }
    };

    let runner = BatchRunner::new(kind, url_column, state.config.output_dir.clone())
        .with_row_delay(3000, 6000);
    let report = match runner
        .run(&mut source, state.summarizer.as_ref(), &csv_content)
        .await
    {
        Ok(report) => {
            source.close().await;
            report
        }
        Err(e) => {
            source.close().await;
            error!("Batch run failed: {}", e);
            let message = e.to_string();
            return Err(Json(match e.downcast_ref::<AnalyzerError>() {
                Some(analyzer_error) => StandardErrorResponse::from_analyzer_error(analyzer_error),
                None => StandardErrorResponse::new(
                    message,
                    "BATCH_FAILED".to_string(),
                    vec!["Try again in a few moments".to_string()],
                ),
            }));
        }
    };

    info!(
        "Batch artifacts written: {} / {} / {}",
        report.results_path.display(),
        report.errors_path.display(),
        report.summary_path.display()
    );

    let data = match tokio::fs::read(&report.results_path).await {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read results file: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "Batch completed but the results file could not be read".to_string(),
                "RESULTS_UNREADABLE".to_string(),
                vec![format!("See {}", report.results_path.display())],
            )));
        }
    };

    let filename = report
        .results_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "batch_results.csv".to_string());

    Ok(CsvResponse::with_filename(data, filename))
}

pub async fn health_handler() -> Json<TextResponse> {
    Json(TextResponse::success("OK".to_string()))
}

fn parse_kind(raw: Option<&str>) -> Result<AnalysisKind, Json<StandardErrorResponse>> {
    raw.unwrap_or("bio").parse::<AnalysisKind>().map_err(|e| {
        Json(StandardErrorResponse::new(
            e,
            "INVALID_KIND".to_string(),
            vec!["Use bio, summary or analysis".to_string()],
        ))
    })
}

async fn browser_source(config: &AppConfig) -> Result<BrowserProfileSource, AnalyzerError> {
    let heuristic = LoginWallHeuristic::from_overlay(&config.selectors.login_wall);
    let navigator = Navigator::connect(
        &config.webdriver_url,
        &config.session_dir,
        config.headless,
        heuristic,
    )
    .await?;
    let extractor = FieldExtractor::new(FieldSelectors::from_overlay(&config.selectors.fields));
    Ok(BrowserProfileSource::new(navigator, extractor))
}

async fn scrape_profile(
    config: &AppConfig,
    url: &str,
) -> Result<ProfileFields, AnalyzerError> {
    let mut source = browser_source(config).await?;
    let result = source.fetch(url).await;
    source.close().await;
    result
}

fn internal_upload_error() -> StandardErrorResponse {
    StandardErrorResponse::new(
        "Failed to store the uploaded CSV".to_string(),
        "UPLOAD_FAILED".to_string(),
        vec!["Try the upload again".to_string()],
    )
}

fn sample_fields() -> ProfileFields {
    ProfileFields {
        name: "John Doe".to_string(),
        headline: "Senior Software Engineer at Tech Company".to_string(),
        about: "Passionate software engineer with 5+ years of experience in full-stack \
development, specializing in cloud technologies. I love building scalable applications \
and mentoring junior developers."
            .to_string(),
        experience: "Senior Software Engineer at Tech Corp; Software Engineer at Startup Inc; \
Junior Developer at Web Solutions"
            .to_string(),
        skills: "Python; JavaScript; React; Node.js; AWS; Docker; Git; SQL".to_string(),
        education: "BSc Computer Science, State University".to_string(),
    }
}

// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use types::*;

use crate::config::AppConfig;
use crate::summarizer::{GeminiSummarizer, Summarize};
use anyhow::{Context, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use std::sync::Arc;
use tracing::info;

pub struct ServerState {
    pub config: AppConfig,
    pub summarizer: Arc<dyn Summarize>,
}

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/")]
pub async fn index() -> RawHtml<&'static str> {
    RawHtml(INDEX_HTML)
}

#[post("/analyze", data = "<request>")]
pub async fn analyze(
    request: Json<AnalyzeRequest>,
    state: &State<ServerState>,
) -> Result<Json<DataResponse<crate::profile::AnalysisResult>>, Json<StandardErrorResponse>> {
    handlers::analyze_handler(request, state).await
}

#[post("/batch", data = "<upload>")]
pub async fn batch_analyze(
    upload: Form<BatchUploadForm<'_>>,
    state: &State<ServerState>,
) -> Result<CsvResponse, Json<StandardErrorResponse>> {
    handlers::batch_analyze_handler(upload, state).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
    ))
}

/// Assemble the rocket with all routes, catchers and state attached.
pub fn build_rocket(state: ServerState) -> rocket::Rocket<rocket::Build> {
    rocket::build()
        .attach(Cors)
        .manage(state)
        .register("/api", catchers![bad_request, internal_error])
        .mount("/", routes![index])
        .mount("/api", routes![analyze, batch_analyze, health, all_options])
}

/// Serve the local web UI and JSON API until the process is terminated.
pub async fn start_web_server(config: AppConfig) -> Result<()> {
    config.ensure_directories().await?;

    let summarizer: Arc<dyn Summarize> = Arc::new(GeminiSummarizer::new(
        config.api_key.clone(),
        config.model.clone(),
    )?);

    info!("Starting LinkedIn Profile Analyzer web server");
    info!("Server: http://127.0.0.1:{}", config.port);

    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("address", "127.0.0.1"));

    let state = ServerState {
        config,
        summarizer,
    };

    build_rocket(state)
        .configure(figment)
        .launch()
        .await
        .context("Web server failed")?;

    Ok(())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>LinkedIn Profile Analyzer</title>
  <style>
    body { font-family: sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
    fieldset { margin-bottom: 2rem; }
    label { display: block; margin-top: 0.75rem; }
    input[type=text], select { width: 100%; padding: 0.4rem; }
    pre { background: #f4f4f4; padding: 1rem; white-space: pre-wrap; }
    button { margin-top: 1rem; padding: 0.5rem 1.5rem; }
  </style>
</head>
<body>
  <h1>LinkedIn Profile Analyzer</h1>

  <fieldset>
    <legend>Analyze one profile</legend>
    <label>Profile URL
      <input type="text" id="profile_url" placeholder="https://www.linkedin.com/in/...">
    </label>
    <label>Analysis kind
      <select id="analysis_kind">
        <option value="bio">Bio</option>
        <option value="summary">Summary</option>
        <option value="analysis">Analysis</option>
      </select>
    </label>
    <label><input type="checkbox" id="use_sample"> Use sample data (no browser)</label>
    <button onclick="analyze()">Analyze</button>
    <pre id="result" hidden></pre>
  </fieldset>

  <fieldset>
    <legend>Batch analyze a CSV</legend>
    <form method="post" action="/api/batch" enctype="multipart/form-data">
      <label>CSV file <input type="file" name="csv_file" accept=".csv" required></label>
      <label>URL column <input type="text" name="url_column" value="profile_url"></label>
      <label>Analysis kind
        <select name="analysis_kind">
          <option value="bio">Bio</option>
          <option value="summary">Summary</option>
          <option value="analysis">Analysis</option>
        </select>
      </label>
      <button type="submit">Run batch</button>
    </form>
  </fieldset>

  <script>
    async function analyze() {
      const result = document.getElementById('result');
      result.hidden = false;
      result.textContent = 'Working... (a browser window may open for login)';
      const response = await fetch('/api/analyze', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({
          profile_url: document.getElementById('profile_url').value,
          analysis_kind: document.getElementById('analysis_kind').value,
          use_sample: document.getElementById('use_sample').checked,
        }),
      });
      const body = await response.json();
      result.textContent = body.success ? body.data.summary : (body.error || 'Request failed');
    }
  </script>
</body>
</html>
"#;

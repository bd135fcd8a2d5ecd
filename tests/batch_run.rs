use async_trait::async_trait;
use profile_analyzer::{
    AnalysisKind, AnalyzerError, BatchRunner, ProfileFields, ProfileSource, Summarize,
};

/// Deterministic stand-in for the browser: the URL decides the outcome.
struct CannedSource;

#[async_trait]
impl ProfileSource for CannedSource {
    async fn fetch(&mut self, url: &str) -> Result<ProfileFields, AnalyzerError> {
        if url.contains("walled") {
            Err(AnalyzerError::AuthenticationRequired(url.to_string()))
        } else if url.contains("broken") {
            Err(AnalyzerError::navigation(url, "page failed to load"))
        } else {
            let handle = url.rsplit('/').find(|s| !s.is_empty()).unwrap_or("unknown");
            Ok(ProfileFields {
                name: format!("Person {}", handle),
                headline: "Engineer".to_string(),
                ..Default::default()
            })
        }
    }
}

struct CannedSummarizer;

#[async_trait]
impl Summarize for CannedSummarizer {
    async fn summarize(
        &self,
        fields: &ProfileFields,
        kind: AnalysisKind,
    ) -> Result<String, AnalyzerError> {
        Ok(format!("{} for {}", kind, fields.name))
    }
}

fn read_data_rows(path: &std::path::Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.records().map(|r| r.unwrap()).collect()
}

#[tokio::test]
async fn every_row_has_exactly_one_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let runner = BatchRunner::new(
        AnalysisKind::Bio,
        "profile_url".to_string(),
        dir.path().to_path_buf(),
    );

    let csv_content = "profile_url\n\
        https://www.linkedin.com/in/alice/\n\
        https://www.linkedin.com/in/bob/\n\
        https://www.linkedin.com/in/carol/\n\
        not-a-url\n";

    let report = runner
        .run(&mut CannedSource, &CannedSummarizer, csv_content)
        .await
        .unwrap();

    assert_eq!(report.total, 4);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed, 1);

    let results = read_data_rows(&report.results_path);
    let errors = read_data_rows(&report.errors_path);
    assert_eq!(results.len(), 3);
    assert_eq!(errors.len(), 1);
    assert_eq!(results.len() + errors.len(), report.total);

    assert_eq!(errors[0].get(0), Some("not-a-url"));
    assert!(errors[0].get(1).unwrap().contains("not a LinkedIn profile URL"));
}

#[tokio::test]
async fn login_wall_row_fails_and_batch_continues() {
    let dir = tempfile::tempdir().unwrap();
    let runner = BatchRunner::new(
        AnalysisKind::Summary,
        "profile_url".to_string(),
        dir.path().to_path_buf(),
    );

    let csv_content = "profile_url\n\
        https://www.linkedin.com/in/alice/\n\
        https://www.linkedin.com/in/walled-user/\n\
        https://www.linkedin.com/in/carol/\n";

    let report = runner
        .run(&mut CannedSource, &CannedSummarizer, csv_content)
        .await
        .unwrap();

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);

    let errors = read_data_rows(&report.errors_path);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].get(0).unwrap().contains("walled-user"));
    assert!(errors[0].get(1).unwrap().contains("login required"));

    // Rows after the failure were still processed, in input order.
    let results = read_data_rows(&report.results_path);
    assert!(results[0].get(0).unwrap().contains("alice"));
    assert!(results[1].get(0).unwrap().contains("carol"));
}

#[tokio::test]
async fn metadata_columns_pass_through_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let runner = BatchRunner::new(
        AnalysisKind::Bio,
        "profile_url".to_string(),
        dir.path().to_path_buf(),
    );

    let csv_content = "owner,profile_url,priority\n\
        sales,https://www.linkedin.com/in/alice/,high\n";

    let report = runner
        .run(&mut CannedSource, &CannedSummarizer, csv_content)
        .await
        .unwrap();

    let mut reader = csv::Reader::from_path(&report.results_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "owner",
            "profile_url",
            "priority",
            "name",
            "headline",
            "about",
            "experience",
            "skills",
            "education",
            "analysis_kind",
            "summary",
        ]
    );

    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(row.get(0), Some("sales"));
    assert_eq!(row.get(2), Some("high"));
    assert_eq!(row.get(3), Some("Person alice"));
    assert_eq!(row.get(9), Some("bio"));
    assert_eq!(row.get(10), Some("bio for Person alice"));
}

#[tokio::test]
async fn missing_url_column_fails_the_whole_batch() {
    let dir = tempfile::tempdir().unwrap();
    let runner = BatchRunner::new(
        AnalysisKind::Bio,
        "profile_url".to_string(),
        dir.path().to_path_buf(),
    );

    let err = runner
        .run(&mut CannedSource, &CannedSummarizer, "name,link\nalice,x\n")
        .await
        .unwrap_err();

    match err.downcast_ref::<AnalyzerError>() {
        Some(AnalyzerError::CsvFormat(msg)) => assert!(msg.contains("profile_url")),
        other => panic!("expected CsvFormat, got {:?}", other),
    }
}

#[tokio::test]
async fn summary_report_counts_match_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let runner = BatchRunner::new(
        AnalysisKind::Analysis,
        "profile_url".to_string(),
        dir.path().to_path_buf(),
    );

    let csv_content = "profile_url\n\
        https://www.linkedin.com/in/alice/\n\
        https://www.linkedin.com/in/broken-page/\n";

    let report = runner
        .run(&mut CannedSource, &CannedSummarizer, csv_content)
        .await
        .unwrap();

    let summary = std::fs::read_to_string(&report.summary_path).unwrap();
    assert!(summary.contains("Total rows: 2"));
    assert!(summary.contains("Succeeded: 1"));
    assert!(summary.contains("Failed: 1"));
    assert!(summary.contains("Person alice"));
    assert!(summary.contains("broken-page"));
}

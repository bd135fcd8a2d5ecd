// src/console.rs
use crate::analyzer::{BrowserProfileSource, ProfileSource};
use crate::browser::{FieldExtractor, FieldSelectors, LoginWallHeuristic, Navigator};
use crate::config::AppConfig;
use crate::profile::AnalysisKind;
use crate::summarizer::{GeminiSummarizer, Summarize};
use crate::utils::{ensure_dir_exists, file_timestamp, is_linkedin_profile_url};
use anyhow::{Context, Result};
use std::io::{self, Write};

/// Single-shot interactive run against stdin/stdout: one URL, one scrape,
/// one or more generated analyses.
pub async fn run_console_mode(config: &AppConfig) -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("LinkedIn Profile Analyzer - Console Mode");
    println!("{}", "=".repeat(60));

    let url = prompt("\nEnter LinkedIn profile URL: ")?;
    if url.is_empty() {
        println!("No profile URL provided");
        return Ok(());
    }
    if !is_linkedin_profile_url(&url) {
        println!("Invalid LinkedIn profile URL. Please provide a valid profile URL.");
        return Ok(());
    }

    println!("\nScraping profile: {}", url);
    if !config.headless {
        println!("If a login page appears, sign in to LinkedIn in the browser window.");
    }

    let heuristic = LoginWallHeuristic::from_overlay(&config.selectors.login_wall);
    let navigator = Navigator::connect(
        &config.webdriver_url,
        &config.session_dir,
        config.headless,
        heuristic,
    )
    .await?;
    let extractor = FieldExtractor::new(FieldSelectors::from_overlay(&config.selectors.fields));
    let mut source = BrowserProfileSource::new(navigator, extractor);

    let fields = match source.fetch(&url).await {
        Ok(fields) => {
            source.close().await;
            fields
        }
        Err(e) => {
            source.close().await;
            return Err(e.into());
        }
    };

    println!("\n✓ Profile data scraped\n");
    println!("Name: {}", fields.name);
    println!("Headline: {}", fields.headline);
    println!("About: {}", fields.about);
    println!("Experience: {}", fields.experience);
    println!("Skills: {}", fields.skills);
    println!("Education: {}", fields.education);

    println!("\nAvailable analysis modes:");
    println!("1. Bio - a first-person LinkedIn bio");
    println!("2. Summary - a networking summary for recruiters");
    println!("3. Analysis - strengths, gaps and suggestions");

    let kinds: Vec<AnalysisKind> = loop {
        let choice = prompt("\nSelect analysis mode (1-3) or 'all': ")?.to_lowercase();
        match choice.as_str() {
            "1" | "bio" => break vec![AnalysisKind::Bio],
            "2" | "summary" => break vec![AnalysisKind::Summary],
            "3" | "analysis" => break vec![AnalysisKind::Analysis],
            "all" => break AnalysisKind::ALL.to_vec(),
            _ => println!("Invalid choice. Please select 1, 2, 3, or 'all'"),
        }
    };

    let summarizer = GeminiSummarizer::new(config.api_key.clone(), config.model.clone())?;

    let mut generated: Vec<(AnalysisKind, String)> = Vec::new();
    for kind in &kinds {
        println!("\nGenerating {}...", kind);
        match summarizer.summarize(&fields, *kind).await {
            Ok(text) => {
                println!("\n{}", "=".repeat(60));
                println!("{}", kind.as_str().to_uppercase());
                println!("{}", "=".repeat(60));
                println!("{}", text);
                println!("{}", "=".repeat(60));
                generated.push((*kind, text));
            }
            Err(e) => println!("Failed to generate {}: {}", kind, e),
        }
    }

    if !generated.is_empty() {
        let save = prompt("\nSave the result to a file? (y/n): ")?.to_lowercase();
        if save == "y" {
            ensure_dir_exists(&config.output_dir).await?;
            let timestamp = file_timestamp();
            for (kind, text) in &generated {
                let path = config
                    .output_dir
                    .join(format!("analysis_{}_{}.txt", kind, timestamp));
                let content = format!("Profile: {}\nKind: {}\n\n{}\n", url, kind, text);
                tokio::fs::write(&path, content)
                    .await
                    .with_context(|| format!("Failed to save result: {}", path.display()))?;
                println!("✓ Saved {} to {}", kind, path.display());
            }
        }
    }

    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read stdin")?;
    Ok(line.trim().to_string())
}

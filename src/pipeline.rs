use anyhow::{Context, Result};

use crate::artifacts;
use crate::client::DiagnosisClient;
use crate::config::Config;
use crate::extract;
use crate::models::RunReport;
use crate::persist;
use crate::prompt;
use crate::report;

/// Analyze the most recent failed test, end to end.
///
/// This is the only entry point and it always returns normally: every outcome
/// is signaled through console messages and the two output files, never
/// through a propagated error or a non-zero exit.
pub async fn analyze_test_failure(config: &Config, client: &dyn DiagnosisClient) {
    if let Err(e) = run(config, client).await {
        eprintln!("test-failure analysis failed: {:#}", e);
    }
}

async fn run(config: &Config, client: &dyn DiagnosisClient) -> Result<()> {
    let mut debug = DebugLog::open();
    debug.log(&format!(
        "config: report={} results={} output={} model={} base_url={}",
        config.report_path.display(),
        config.results_dir.display(),
        config.output_dir.display(),
        config.model,
        config.base_url,
    ));

    if !config.report_path.exists() {
        eprintln!("report file not found: {}", config.report_path.display());
        return Ok(());
    }

    let raw = tokio::fs::read_to_string(&config.report_path)
        .await
        .with_context(|| format!("failed to read {}", config.report_path.display()))?;

    let Some(payload) = report::extract_payload(&raw) else {
        eprintln!(
            "no structured payload found in {}",
            config.report_path.display()
        );
        return Ok(());
    };
    debug.log(&format!("payload: {} bytes", payload.len()));

    let parsed: RunReport =
        serde_json::from_str(payload).context("report payload is not valid JSON")?;

    let Some(failure) = extract::first_failure(&parsed) else {
        println!("no failed tests found");
        return Ok(());
    };
    debug.log(&format!("first failure: {}", failure.title));

    let screenshot = match artifacts::find_screenshot(&config.results_dir) {
        Some(path) => {
            debug.log(&format!("screenshot: {}", path.display()));
            artifacts::encode_capped(&path).await
        }
        None => prompt::NO_SCREENSHOT.to_string(),
    };
    let trace = match artifacts::find_trace(&config.results_dir) {
        Some(path) => {
            debug.log(&format!("trace: {}", path.display()));
            artifacts::encode_capped(&path).await
        }
        None => prompt::NO_TRACE.to_string(),
    };

    let rendered = prompt::build(&failure, &screenshot, &trace);

    // The prompt goes to disk before the model call so it survives a failed
    // exchange.
    let prompt_path = persist::write_prompt(&config.output_dir, &rendered).await?;
    println!("prompt written to {}", prompt_path.display());
    println!("sending prompt to {}...", config.model);

    let analysis = client.diagnose(&rendered).await?;
    println!("{}", analysis);

    let analysis_path = persist::write_analysis(&config.output_dir, &analysis).await?;
    println!("analysis written to {}", analysis_path.display());

    Ok(())
}

/// Debug log file, enabled by setting `TRIAGE_DEBUG` to a path.
struct DebugLog {
    file: Option<std::fs::File>,
}

impl DebugLog {
    fn open() -> Self {
        let file = std::env::var("TRIAGE_DEBUG").ok().and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .ok()
        });
        Self { file }
    }

    fn log(&mut self, msg: &str) {
        use std::io::Write;
        if let Some(ref mut f) = self.file {
            let _ = writeln!(f, "{}", msg);
        }
    }
}

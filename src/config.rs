use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_REPORT_PATH: &str = "reports/html/test-results.log";
const DEFAULT_RESULTS_DIR: &str = "test-results";
const DEFAULT_OUTPUT_DIR: &str = "reports/html";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com/v1/";

/// Resolved settings for one pipeline invocation.
///
/// Built once in `main` from `triage.toml` plus environment overrides and
/// passed down; nothing else reads the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Run-report log to analyze.
    pub report_path: PathBuf,
    /// Root directory searched for screenshots and traces.
    pub results_dir: PathBuf,
    /// Directory receiving `last-prompt.txt` and `last-analysis.txt`.
    pub output_dir: PathBuf,
    /// `OPENAI_API_KEY`. A missing key fails at request time, not at load.
    pub api_key: Option<String>,
    /// `OPENAI_MODEL`, falling back to the `[model]` section, then the default.
    pub model: String,
    /// `BASE_URL` for the browser flows; carried here so the whole suite
    /// shares one config surface.
    pub base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    paths: PathsConfig,
    #[serde(default)]
    model: ModelConfig,
}

/// Overrides for the report/artifact/output locations, all workspace-relative.
#[derive(Debug, Default, Deserialize)]
struct PathsConfig {
    report: Option<PathBuf>,
    results: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ModelConfig {
    name: Option<String>,
}

impl Config {
    /// Load `triage.toml` from the workspace root, falling back to defaults if
    /// absent or invalid, then apply environment overrides.
    pub fn load(workspace: &Path) -> Self {
        let file = load_file(&workspace.join("triage.toml"));

        Self {
            report_path: workspace.join(
                file.paths
                    .report
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH)),
            ),
            results_dir: workspace.join(
                file.paths
                    .results
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR)),
            ),
            output_dir: workspace.join(
                file.paths
                    .output
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            ),
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            model: std::env::var("OPENAI_MODEL")
                .ok()
                .or(file.model.name)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }
}

fn load_file(path: &Path) -> FileConfig {
    let Ok(content) = std::fs::read_to_string(path) else {
        return FileConfig::default();
    };
    toml::from_str(&content).unwrap_or_default()
}

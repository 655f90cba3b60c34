use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const PROMPT_FILE: &str = "last-prompt.txt";
pub const ANALYSIS_FILE: &str = "last-analysis.txt";

/// Write the rendered prompt under the output directory, creating the
/// directory if needed. Returns the path written.
pub async fn write_prompt(output_dir: &Path, prompt: &str) -> Result<PathBuf> {
    write_output(output_dir, PROMPT_FILE, prompt).await
}

/// Write the model's diagnosis next to the prompt. Only called after a
/// successful model response, so a failed run leaves the previous analysis
/// untouched while the fresh prompt is already on disk.
pub async fn write_analysis(output_dir: &Path, analysis: &str) -> Result<PathBuf> {
    write_output(output_dir, ANALYSIS_FILE, analysis).await
}

async fn write_output(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let path = dir.join(name);
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_output_dir_and_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports/html");

        let prompt_path = write_prompt(&out, "the prompt").await.unwrap();
        let analysis_path = write_analysis(&out, "the analysis").await.unwrap();

        assert_eq!(std::fs::read_to_string(prompt_path).unwrap(), "the prompt");
        assert_eq!(std::fs::read_to_string(analysis_path).unwrap(), "the analysis");
    }

    #[tokio::test]
    async fn rewrites_overwrite_prior_contents() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_path_buf();

        write_prompt(&out, "first, and quite a bit longer").await.unwrap();
        let path = write_prompt(&out, "second").await.unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }
}

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Cap applied to encoded artifacts before they are embedded in a prompt.
pub const ENCODED_CAP: usize = 20_000;

/// Inline substitute for an artifact whose bytes could not be read.
pub const READ_ERROR_PLACEHOLDER: &str = "(error reading file)";

const SCREENSHOT_MARKER: &str = "test-failed";

/// First `*.png` under the results root whose name carries the failure marker.
///
/// Matches are taken in listing order with no recency ranking, so artifacts
/// lingering from earlier runs can win; clear the results directory between
/// runs to avoid that.
pub fn find_screenshot(results_dir: &Path) -> Option<PathBuf> {
    find_artifact(results_dir, "*.png", |name| name.contains(SCREENSHOT_MARKER))
}

/// First `*trace.zip` under the results root. Same listing-order caveat as
/// `find_screenshot`.
pub fn find_trace(results_dir: &Path) -> Option<PathBuf> {
    find_artifact(results_dir, "*trace.zip", |_| true)
}

fn find_artifact(
    results_dir: &Path,
    name_glob: &str,
    keep: impl Fn(&str) -> bool,
) -> Option<PathBuf> {
    // A missing results directory just means no artifacts for this run.
    let pattern = results_dir
        .join("**/")
        .join(name_glob)
        .to_string_lossy()
        .to_string();
    glob::glob(&pattern).ok()?.flatten().find(|path| {
        path.file_name()
            .map(|name| keep(&name.to_string_lossy()))
            .unwrap_or(false)
    })
}

/// Read an artifact and base64-encode it, capped at [`ENCODED_CAP`] characters.
///
/// A read failure (permissions, deleted mid-run) becomes the inline
/// placeholder instead of aborting the pipeline.
pub async fn encode_capped(path: &Path) -> String {
    let encoded = match tokio::fs::read(path).await {
        Ok(bytes) => STANDARD.encode(bytes),
        Err(_) => READ_ERROR_PLACEHOLDER.to_string(),
    };
    truncate(encoded, ENCODED_CAP)
}

/// Cap `data` at `max` characters, appending a marker stating the exact number
/// of characters dropped. At-or-under-cap input passes through unchanged.
pub fn truncate(data: String, max: usize) -> String {
    if data.len() > max {
        format!("{}... [truncated {} chars]", &data[..max], data.len() - max)
    } else {
        data
    }
}

/// Slice the embedded JSON payload out of a run-report log.
///
/// Runner logs legitimately interleave banner and console noise around the
/// JSON document, so this is a first-`{`-to-last-`}` heuristic scan, not a
/// parser. Malformed content inside the braces surfaces later as a serde
/// error; `None` means no structured payload was present at all.
pub fn extract_payload(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&trimmed[start..=end])
}

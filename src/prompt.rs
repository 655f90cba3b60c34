use crate::models::FailureRecord;

/// Placeholder embedded when no failure screenshot was found.
pub const NO_SCREENSHOT: &str = "(no screenshot found)";

/// Placeholder embedded when no trace archive was found.
pub const NO_TRACE: &str = "(no trace found)";

/// Render the diagnostic prompt sent to the model.
///
/// Pure: identical inputs yield byte-identical output. Dynamic values are
/// inserted verbatim with no escaping, so embedded error text may itself
/// contain code fences; the consumer must tolerate that.
pub fn build(failure: &FailureRecord, screenshot: &str, trace: &str) -> String {
    let (file, line) = match &failure.location {
        Some(location) => (
            location.file.clone().unwrap_or_else(|| "?".to_string()),
            location
                .line
                .map(|line| line.to_string())
                .unwrap_or_else(|| "?".to_string()),
        ),
        None => ("?".to_string(), "?".to_string()),
    };

    let stderr = match &failure.stderr {
        Some(lines) => lines.join("\n"),
        None => "(empty)".to_string(),
    };

    let message = failure
        .error
        .as_ref()
        .and_then(|error| error.message.as_deref())
        .unwrap_or("(no message)");
    let stack = failure
        .error
        .as_ref()
        .and_then(|error| error.stack.as_deref())
        .unwrap_or("(no stacktrace available)");

    format!(
        "# Instructions

- Following Playwright test failed.
- Explain why, be concise, respect Playwright best practices.
- Provide a snippet of code with the fix, if possible.

# Test info

- Name: >> {title}
- Location: {file}:{line}

# Stderr
```
{stderr}
```

# Error details
```
{message}
```

# Stacktrace
```
{stack}
```

# Screenshot (Base64)
```
{screenshot}
```

# Trace file (Base64)
```
{trace}
```",
        title = failure.title,
        file = file,
        line = line,
        stderr = stderr,
        message = message,
        stack = stack,
        screenshot = screenshot,
        trace = trace,
    )
}

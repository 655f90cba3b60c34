use crate::models::FailureRecord;
use crate::models::report::{FlatEntry, RunReport, StderrLine, Title};

const UNNAMED_TEST: &str = "Unnamed test";

/// Find the first failed test in the report.
///
/// The nested suite tree is scanned first, in document order. If it has no
/// failure (or no `suites` container at all), the flat containers are tried as
/// fallbacks: `entries`, then `tests`. The order matters on malformed
/// mixed-shape input, so keep it fixed.
///
/// Returns `None` when every shape is exhausted without a match — the normal
/// all-tests-passed outcome, not an error.
pub fn first_failure(report: &RunReport) -> Option<FailureRecord> {
    if let Some(suites) = &report.suites {
        for suite in suites {
            for spec in &suite.specs {
                for test in &spec.tests {
                    for result in &test.results {
                        if result.status == "failed" {
                            return Some(FailureRecord {
                                title: spec.title.clone(),
                                location: spec.location.clone(),
                                error: result.error.clone().map(|e| e.normalize()),
                                stderr: result.stderr.as_deref().map(collect_lines),
                            });
                        }
                    }
                }
            }
        }
    }

    for container in [report.entries.as_ref(), report.tests.as_ref()]
        .into_iter()
        .flatten()
    {
        for entry in container {
            if entry.status == "failed" || !entry.errors.is_empty() {
                return Some(flat_failure(entry));
            }
        }
    }

    None
}

fn flat_failure(entry: &FlatEntry) -> FailureRecord {
    let title = entry
        .title
        .as_ref()
        .map(Title::join)
        .unwrap_or_else(|| UNNAMED_TEST.to_string());

    // First of the error list wins; the singular field is a fallback.
    let error = entry.errors.first().cloned().or_else(|| entry.error.clone());

    FailureRecord {
        title,
        location: entry.location.clone(),
        error: error.map(|e| e.normalize()),
        stderr: entry.stderr.as_deref().map(collect_lines),
    }
}

fn collect_lines(lines: &[StderrLine]) -> Vec<String> {
    lines.iter().map(|line| line.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RunReport {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn all_passed_returns_none() {
        let nested = parse(
            r#"{ "suites": [{ "specs": [{ "title": "t", "tests": [{ "results": [{ "status": "passed" }] }] }] }] }"#,
        );
        assert_eq!(first_failure(&nested), None);

        let flat = parse(r#"{ "entries": [{ "status": "passed" }], "tests": [{ "status": "skipped" }] }"#);
        assert_eq!(first_failure(&flat), None);
    }

    #[test]
    fn nested_failure_carries_spec_title_and_location() {
        let report = parse(
            r#"{
                "suites": [
                    { "specs": [{ "title": "first", "tests": [{ "results": [{ "status": "passed" }] }] }] },
                    { "specs": [
                        { "title": "second", "tests": [] },
                        {
                            "title": "cart total",
                            "location": { "file": "cart.spec.ts", "line": 42 },
                            "tests": [
                                { "results": [{ "status": "passed" }] },
                                { "results": [
                                    { "status": "timedOut" },
                                    { "status": "failed", "error": { "message": "expected 3", "stack": "at cart" } }
                                ] }
                            ]
                        }
                    ] }
                ]
            }"#,
        );

        let failure = first_failure(&report).unwrap();
        assert_eq!(failure.title, "cart total");
        let location = failure.location.unwrap();
        assert_eq!(location.file.as_deref(), Some("cart.spec.ts"));
        assert_eq!(location.line, Some(42));
        assert_eq!(failure.error.unwrap().message.as_deref(), Some("expected 3"));
    }

    #[test]
    fn first_failure_in_traversal_order_wins() {
        let report = parse(
            r#"{
                "suites": [{ "specs": [
                    { "title": "early", "tests": [{ "results": [{ "status": "failed" }] }] },
                    { "title": "late", "tests": [{ "results": [{ "status": "failed" }] }] }
                ] }]
            }"#,
        );
        assert_eq!(first_failure(&report).unwrap().title, "early");
    }

    #[test]
    fn flat_entry_with_joined_title_and_string_error() {
        let report = parse(
            r#"{ "entries": [
                { "status": "passed" },
                { "status": "failed", "title": ["A", "B"], "errors": ["e1"] }
            ] }"#,
        );

        let failure = first_failure(&report).unwrap();
        assert_eq!(failure.title, "A B");
        assert_eq!(failure.error.unwrap().message.as_deref(), Some("e1"));
    }

    #[test]
    fn flat_entry_matches_on_errors_even_without_failed_status() {
        let report = parse(
            r#"{ "tests": [{ "title": "flaky", "errors": [{ "message": "boom" }] }] }"#,
        );

        let failure = first_failure(&report).unwrap();
        assert_eq!(failure.title, "flaky");
        assert_eq!(failure.error.unwrap().message.as_deref(), Some("boom"));
    }

    #[test]
    fn entries_container_beats_tests_container() {
        let report = parse(
            r#"{
                "entries": [{ "title": "from entries", "status": "failed" }],
                "tests": [{ "title": "from tests", "status": "failed" }]
            }"#,
        );
        assert_eq!(first_failure(&report).unwrap().title, "from entries");
    }

    #[test]
    fn flat_entry_without_title_gets_default() {
        let report = parse(r#"{ "tests": [{ "status": "failed" }] }"#);
        assert_eq!(first_failure(&report).unwrap().title, "Unnamed test");
    }

    #[test]
    fn nested_shape_shadows_flat_containers() {
        let report = parse(
            r#"{
                "suites": [{ "specs": [{ "title": "nested fail", "tests": [{ "results": [{ "status": "failed" }] }] }] }],
                "entries": [{ "title": "flat fail", "status": "failed" }]
            }"#,
        );
        assert_eq!(first_failure(&report).unwrap().title, "nested fail");
    }

    #[test]
    fn singular_error_field_is_a_fallback() {
        let report = parse(
            r#"{ "entries": [{ "status": "failed", "title": "solo", "error": { "message": "only one" } }] }"#,
        );
        let failure = first_failure(&report).unwrap();
        assert_eq!(failure.error.unwrap().message.as_deref(), Some("only one"));
    }

    #[test]
    fn stderr_lines_are_collected_in_order() {
        let report = parse(
            r#"{ "suites": [{ "specs": [{ "title": "t", "tests": [{ "results": [
                { "status": "failed", "stderr": ["one", { "text": "two" }] }
            ] }] }] }] }"#,
        );
        let failure = first_failure(&report).unwrap();
        assert_eq!(failure.stderr.unwrap(), ["one", "two"]);
    }
}

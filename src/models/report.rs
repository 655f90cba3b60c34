use serde::Deserialize;

/// Parsed run report.
///
/// Runners emit one of two shapes: a nested tree (suites holding specs holding
/// tests holding results), or a flat `entries`/`tests` list. Exactly one shape
/// is present per report, but extraction must not assume which, so all
/// containers are optional here.
#[derive(Debug, Default, Deserialize)]
pub struct RunReport {
    pub suites: Option<Vec<Suite>>,
    pub entries: Option<Vec<FlatEntry>>,
    pub tests: Option<Vec<FlatEntry>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Suite {
    #[serde(default)]
    pub specs: Vec<Spec>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Spec {
    #[serde(default)]
    pub title: String,
    pub location: Option<Location>,
    #[serde(default)]
    pub tests: Vec<TestCase>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub results: Vec<CaseResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CaseResult {
    #[serde(default)]
    pub status: String,
    pub error: Option<RawError>,
    pub stderr: Option<Vec<StderrLine>>,
}

/// Flat-shape item, as found in the `entries` or `tests` containers.
#[derive(Debug, Default, Deserialize)]
pub struct FlatEntry {
    pub title: Option<Title>,
    pub location: Option<Location>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub errors: Vec<RawError>,
    pub error: Option<RawError>,
    pub stderr: Option<Vec<StderrLine>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub file: Option<String>,
    pub line: Option<u64>,
}

/// A flat entry's title is either a path of segments to join or a single
/// string, depending on runner version.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Title {
    Parts(Vec<String>),
    Single(String),
}

impl Title {
    pub fn join(&self) -> String {
        match self {
            Title::Parts(parts) => parts.join(" "),
            Title::Single(title) => title.clone(),
        }
    }
}

/// Error values arrive either as bare strings or as structured objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawError {
    Message(String),
    Detail(ErrorDetail),
}

impl RawError {
    /// Normalize to the structured form; a bare string becomes the message.
    pub fn normalize(self) -> ErrorDetail {
        match self {
            RawError::Message(message) => ErrorDetail {
                message: Some(message),
                stack: None,
            },
            RawError::Detail(detail) => detail,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorDetail {
    pub message: Option<String>,
    pub stack: Option<String>,
}

/// Stderr entries appear either as bare strings or as `{ "text": ... }`
/// objects, depending on runner version.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StderrLine {
    Text(String),
    Entry { text: String },
}

impl StderrLine {
    pub fn as_str(&self) -> &str {
        match self {
            StderrLine::Text(text) => text,
            StderrLine::Entry { text } => text,
        }
    }
}

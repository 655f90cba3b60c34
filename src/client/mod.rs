pub mod openai;

use anyhow::Result;
use async_trait::async_trait;

/// Seam between the pipeline and the language-model service.
///
/// The pipeline takes `&dyn DiagnosisClient`, so tests substitute a canned
/// responder without touching the process environment or the network.
#[async_trait]
pub trait DiagnosisClient: Send + Sync {
    /// Send one rendered prompt and return the model's diagnosis text.
    ///
    /// Transport and auth failures are not retried here; the pipeline's
    /// top-level handler logs them.
    async fn diagnose(&self, prompt: &str) -> Result<String>;
}

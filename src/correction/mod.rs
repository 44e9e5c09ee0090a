//! Self-correction of documents that fail structural validation.

mod orchestrator;
mod prompt;

#[cfg(test)]
mod tests;

use std::future::Future;
use std::pin::Pin;

pub use orchestrator::{CorrectionOrchestrator, CorrectionOutcome, CorrectionState};
pub use prompt::build_correction_prompt;

use crate::document::StructuredLegalOutput;

/// The generative model behind the repair loop: prompt in, JSON-shaped
/// text out. Async closures returning `anyhow::Result<String>` implement
/// it directly.
pub trait CompletionFn: Send + Sync {
    fn complete<'a>(
        &'a self,
        prompt: String,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
}

impl<F, Fut> CompletionFn for F
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<String>> + Send + 'static,
{
    fn complete<'a>(
        &'a self,
        prompt: String,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(self(prompt))
    }
}

/// Repairs `candidate` with default validation thresholds.
pub async fn correct(
    candidate: &StructuredLegalOutput,
    errors: &[String],
    completion: &dyn CompletionFn,
    max_attempts: u32,
) -> CorrectionOutcome {
    CorrectionOrchestrator::default()
        .with_max_attempts(max_attempts)
        .correct(candidate, errors, completion)
        .await
}

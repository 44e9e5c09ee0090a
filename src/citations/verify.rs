//! External citation verification as a bounded, order-preserving pool with
//! per-item retry.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use futures_util::StreamExt;
use futures_util::stream;
use serde::Serialize;

use crate::config::VerificationConfig;
use crate::error::VerificationError;
use crate::redaction::sanitize_error_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOutcome {
    pub found: bool,
    pub hits: u64,
}

/// A source that can say whether a citation exists.
pub trait CitationLookup: Send + Sync {
    fn name(&self) -> &str;

    fn lookup<'a>(
        &'a self,
        citation: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<LookupOutcome>> + Send + 'a>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationOptions {
    pub concurrency: usize,
    pub max_retries: u32,
    pub base_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for VerificationOptions {
    fn default() -> Self {
        Self::from(&VerificationConfig::default())
    }
}

impl From<&VerificationConfig> for VerificationOptions {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            max_retries: config.max_retries,
            base_backoff_ms: config.base_backoff_ms,
            max_backoff_ms: config.max_backoff_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationCheck {
    pub citation: String,
    pub verified: bool,
    pub hits: u64,
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Check if an error is non-retryable (client errors that won't resolve with retries).
fn is_non_retryable(err: &anyhow::Error) -> bool {
    if let Some(verification) = err.downcast_ref::<VerificationError>() {
        return !verification.is_retryable();
    }

    if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>()
        && let Some(status) = reqwest_err.status()
    {
        let code = status.as_u16();
        return status.is_client_error() && code != 429 && code != 408;
    }
    false
}

async fn verify_one(
    lookup: &dyn CitationLookup,
    citation: &str,
    options: &VerificationOptions,
) -> CitationCheck {
    let mut backoff_ms = options.base_backoff_ms.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;
        match lookup.lookup(citation).await {
            Ok(outcome) => {
                if attempts > 1 {
                    tracing::info!(
                        lookup = lookup.name(),
                        attempts,
                        "Citation lookup recovered after retries"
                    );
                }
                return CitationCheck {
                    citation: citation.to_string(),
                    verified: outcome.found,
                    hits: outcome.hits,
                    attempts,
                    error: None,
                };
            }
            Err(e) => {
                let message = sanitize_error_text(&format!("{e:#}"));
                if is_non_retryable(&e) || attempts > options.max_retries {
                    tracing::warn!(
                        lookup = lookup.name(),
                        attempts,
                        error = message.as_str(),
                        "Citation lookup failed"
                    );
                    return CitationCheck {
                        citation: citation.to_string(),
                        verified: false,
                        hits: 0,
                        attempts,
                        error: Some(message),
                    };
                }

                tracing::warn!(
                    lookup = lookup.name(),
                    attempt = attempts,
                    max_retries = options.max_retries,
                    "Citation lookup failed, retrying"
                );
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms = backoff_ms.saturating_mul(2).min(options.max_backoff_ms.max(1));
            }
        }
    }
}

/// Verifies every citation, at most `options.concurrency` at a time.
/// Results come back in input order.
pub async fn verify_citations(
    lookup: &dyn CitationLookup,
    citations: &[String],
    options: &VerificationOptions,
) -> Vec<CitationCheck> {
    stream::iter(citations)
        .map(|citation| verify_one(lookup, citation, options))
        .buffered(options.concurrency.max(1))
        .collect()
        .await
}

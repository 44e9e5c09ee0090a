use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use super::verify::{CitationLookup, LookupOutcome};
use crate::config::VerificationConfig;
use crate::error::VerificationError;
use crate::redaction::sanitize_error_text;

const SERVICE: &str = "CourtListener";

/// Opinion search against the `CourtListener` REST API. A citation counts as
/// found when the search returns at least one result.
pub struct CourtListenerLookup {
    client: Client,
    base_url: String,
    cached_auth_header: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    count: u64,
}

fn build_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|_| Client::new())
}

impl CourtListenerLookup {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.courtlistener.com/api/rest/v3";

    pub fn new(api_key: Option<&str>) -> Self {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL, 10)
    }

    pub fn with_base_url(api_key: Option<&str>, base_url: &str, timeout_secs: u64) -> Self {
        Self {
            client: build_client(timeout_secs),
            base_url: base_url.trim_end_matches('/').to_string(),
            cached_auth_header: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| format!("Token {k}")),
        }
    }

    pub fn from_config(config: &VerificationConfig) -> Self {
        Self::with_base_url(
            config.courtlistener_api_key.as_deref(),
            &config.courtlistener_base_url,
            config.request_timeout_secs,
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.cached_auth_header.is_some()
    }

    async fn search(&self, citation: &str) -> anyhow::Result<LookupOutcome> {
        let Some(auth_header) = self.cached_auth_header.as_deref() else {
            tracing::warn!("COURTLISTENER_API_KEY not set; skipping citation lookup");
            return Err(VerificationError::MissingApiKey {
                service: SERVICE.to_string(),
            }
            .into());
        };

        let response = self
            .client
            .get(format!("{}/search/", self.base_url))
            .query(&[("q", citation), ("type", "o")])
            .header("Authorization", auth_header)
            .send()
            .await
            .map_err(|e| VerificationError::Request {
                service: SERVICE.to_string(),
                message: sanitize_error_text(&e.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            return Err(VerificationError::Status {
                service: SERVICE.to_string(),
                status: status.as_u16(),
                body: sanitize_error_text(&body),
            }
            .into());
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(LookupOutcome {
            found: parsed.count > 0,
            hits: parsed.count,
        })
    }
}

impl CitationLookup for CourtListenerLookup {
    fn name(&self) -> &str {
        SERVICE
    }

    fn lookup<'a>(
        &'a self,
        citation: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<LookupOutcome>> + Send + 'a>> {
        Box::pin(self.search(citation))
    }
}

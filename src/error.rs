use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `lawsage-guard`.
///
/// Only configuration loading, document parsing and citation lookups surface
/// errors. Validation failures and placeholder content are data, carried in
/// verdicts and outcomes rather than in this type.
#[derive(Debug, Error)]
pub enum GuardError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Document ────────────────────────────────────────────────────────
    #[error("document: {0}")]
    Document(#[from] DocumentError),

    // ── Citation verification ───────────────────────────────────────────
    #[error("verification: {0}")]
    Verification(#[from] VerificationError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Document errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("malformed document: {0}")]
    Malformed(String),
}

// ─── Verification errors ────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("API key missing for {service}")]
    MissingApiKey { service: String },

    #[error("{service} API error ({status}): {body}")]
    Status {
        service: String,
        status: u16,
        body: String,
    },

    #[error("{service} request failed: {message}")]
    Request { service: String, message: String },
}

impl VerificationError {
    /// Whether retrying the same lookup could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::MissingApiKey { .. } => false,
            Self::Status { status, .. } => {
                !(400..500).contains(status) || *status == 408 || *status == 429
            }
            Self::Request { .. } => true,
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, GuardError>;

mod env_overrides;
mod loader;
mod schema;

pub use schema::{
    CorrectionConfig, CritiqueConfig, GuardConfig, LocalRulesConfig, RedactionConfig,
    ValidationConfig, VerificationConfig,
};

use std::io::Read as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use lawsage_guard::citations::{CourtListenerLookup, VerificationOptions, citation_report};
use lawsage_guard::critique::CritiqueVerifier;
use lawsage_guard::redaction::{TracingSink, redact};
use lawsage_guard::safety::red_team_audit;
use lawsage_guard::validation::StructuralValidator;
use lawsage_guard::{AuditRequest, GuardConfig, GuardPipeline};
use serde::Serialize;

use super::Commands;

pub async fn run(command: Commands, config: &GuardConfig) -> Result<()> {
    match command {
        Commands::Redact {
            input,
            no_contextual,
        } => {
            let text = read_input(input.as_deref())?;
            let contextual = config.redaction.enable_contextual_pass && !no_contextual;
            print_json(&redact(&text, contextual))
        }
        Commands::Citations { input } => {
            let text = read_input(input.as_deref())?;
            print_json(&citation_report(&text))
        }
        Commands::Validate { input } => {
            let raw = read_input(input.as_deref())?;
            let validator = StructuralValidator::new(config.validation.clone());
            print_json(&validator.validate_json(&raw))
        }
        Commands::Audit {
            input,
            jurisdiction,
            context,
            lookup,
        } => {
            let text = read_input(input.as_deref())?;
            let research_context = read_optional(context.as_deref())?;
            let verifier = CritiqueVerifier::new(config.critique.clone());
            let result = if lookup {
                let courtlistener = CourtListenerLookup::from_config(&config.verification);
                let options = VerificationOptions::from(&config.verification);
                verifier
                    .audit_with_lookup(&text, &jurisdiction, &research_context, &courtlistener, &options)
                    .await
            } else {
                verifier.audit(&text, &jurisdiction, &research_context)
            };
            print_json(&result)
        }
        Commands::Check {
            input,
            jurisdiction,
            context,
            county,
        } => {
            let raw = read_input(input.as_deref())?;
            let research_context = read_optional(context.as_deref())?;
            let pipeline = GuardPipeline::new(config.clone(), Arc::new(TracingSink));
            let request = AuditRequest {
                jurisdiction: &jurisdiction,
                research_context: &research_context,
                county: county.as_deref(),
                ..AuditRequest::default()
            };
            let report = pipeline.process(&raw, request, None).await;
            print_json(&report)
        }
        Commands::Screen {
            input,
            jurisdiction,
        } => {
            let text = read_input(input.as_deref())?;
            print_json(&red_team_audit(&text, &jurisdiction))
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn read_optional(path: Option<&Path>) -> Result<String> {
    path.map_or_else(|| Ok(String::new()), |path| read_input(Some(path)))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

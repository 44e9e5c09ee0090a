use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod handlers;

/// `lawsage-guard` - integrity checks for AI-generated legal analyses.
#[derive(Parser, Debug)]
#[command(name = "lawsage-guard")]
#[command(version)]
#[command(about = "Redact, validate and audit AI-generated legal analyses.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.lawsage/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redact PII from text
    Redact {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Skip the contextual pass regardless of config
        #[arg(long)]
        no_contextual: bool,
    },

    /// Extract citations and report format validity
    Citations {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Validate a structured legal-analysis document (JSON)
    Validate {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Audit an output against a research context
    Audit {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Jurisdiction the output was written for (e.g. California)
        #[arg(short, long)]
        jurisdiction: String,

        /// File holding the research context
        #[arg(long)]
        context: Option<PathBuf>,

        /// Confirm unsupported citations against CourtListener
        #[arg(long)]
        lookup: bool,
    },

    /// Run the full guard pipeline (validate, audit, release decision)
    Check {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Jurisdiction the output was written for (e.g. California)
        #[arg(short, long)]
        jurisdiction: String,

        /// File holding the research context
        #[arg(long)]
        context: Option<PathBuf>,

        /// County whose local rules join the research context
        #[arg(long)]
        county: Option<String>,
    },

    /// Run the pre-generation safety audit on a user request
    Screen {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Requested jurisdiction
        #[arg(short, long)]
        jurisdiction: String,
    },
}

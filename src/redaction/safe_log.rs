use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use strum::Display;

use super::redact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Destination for already-redacted log lines.
pub trait LogSink: Send + Sync {
    fn write(&self, level: LogLevel, line: &str);
}

/// Forwards lines to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "lawsage_guard::safe_log", "{line}"),
            LogLevel::Info => tracing::info!(target: "lawsage_guard::safe_log", "{line}"),
            LogLevel::Warn => tracing::warn!(target: "lawsage_guard::safe_log", "{line}"),
            LogLevel::Error => tracing::error!(target: "lawsage_guard::safe_log", "{line}"),
        }
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct CapturingSink {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn joined(&self) -> String {
        self.lines()
            .into_iter()
            .map(|(_, line)| line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl LogSink for CapturingSink {
    fn write(&self, level: LogLevel, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, line.to_string()));
    }
}

/// Extra values attached to a log line.
pub enum LogExtra<'a> {
    Text(&'a str),
    Error(&'a (dyn std::error::Error + 'static)),
    Anyhow(&'a anyhow::Error),
    Json(&'a serde_json::Value),
}

fn redact_text(text: &str) -> String {
    redact(text, true).redacted_text
}

fn redact_json(value: &serde_json::Value) -> serde_json::Value {
    use serde_json::Value;
    match value {
        Value::String(s) => Value::String(redact_text(s)),
        Value::Array(items) => Value::Array(items.iter().map(redact_json).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (redact_text(k), redact_json(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn render_error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = redact_text(&err.to_string());
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": caused by: ");
        rendered.push_str(&redact_text(&cause.to_string()));
        source = cause.source();
    }
    rendered
}

fn render_extra(extra: &LogExtra<'_>) -> String {
    match extra {
        LogExtra::Text(text) => redact_text(text),
        LogExtra::Error(err) => render_error_chain(*err),
        LogExtra::Anyhow(err) => err
            .chain()
            .map(|cause| redact_text(&cause.to_string()))
            .collect::<Vec<_>>()
            .join(": caused by: "),
        LogExtra::Json(value) => redact_json(value).to_string(),
    }
}

/// Redacts the message and every extra, then writes one line to `sink`.
pub fn safe_log(sink: &dyn LogSink, level: LogLevel, message: &str, extras: &[LogExtra<'_>]) {
    let mut line = redact_text(message);
    for extra in extras {
        line.push_str(" | ");
        line.push_str(&render_extra(extra));
    }
    sink.write(level, &line);
}

/// A cloneable handle bundling a sink with the `safe_log` contract.
#[derive(Clone)]
pub struct SafeLogger {
    sink: Arc<dyn LogSink>,
}

impl SafeLogger {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    pub fn log(&self, level: LogLevel, message: &str, extras: &[LogExtra<'_>]) {
        safe_log(self.sink.as_ref(), level, message, extras);
    }

    pub fn debug(&self, message: &str, extras: &[LogExtra<'_>]) {
        self.log(LogLevel::Debug, message, extras);
    }

    pub fn info(&self, message: &str, extras: &[LogExtra<'_>]) {
        self.log(LogLevel::Info, message, extras);
    }

    pub fn warn(&self, message: &str, extras: &[LogExtra<'_>]) {
        self.log(LogLevel::Warn, message, extras);
    }

    pub fn error(&self, message: &str, extras: &[LogExtra<'_>]) {
        self.log(LogLevel::Error, message, extras);
    }
}

impl std::fmt::Debug for SafeLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeLogger").finish_non_exhaustive()
    }
}

//! Diagnostics sink and user-facing message summaries.
//!
//! The platform layer never owns a logger. Callers may attach a
//! [`DiagnosticsSink`] when constructing a host; every component checks for
//! sink presence and skips emission when absent, with no difference to the
//! returned result either way.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Verbosity level of a sink message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
  Trace,
  Debug,
  Info,
  Warn,
  Error,
}

/// Receives leveled diagnostic text from the platform layer.
pub trait DiagnosticsSink: Send + Sync {
  fn emit(&self, level: LogLevel, message: &str);
}

/// Runs `message` and forwards the result only when a sink is attached.
pub(crate) fn emit_with(sink: Option<&dyn DiagnosticsSink>, level: LogLevel, message: impl FnOnce() -> String) {
  if let Some(sink) = sink {
    sink.emit(level, &message());
  }
}

/// Sink adapter that forwards to the `tracing` macros.
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
  fn emit(&self, level: LogLevel, message: &str) {
    match level {
      LogLevel::Trace => tracing::trace!("{message}"),
      LogLevel::Debug => tracing::debug!("{message}"),
      LogLevel::Info => tracing::info!("{message}"),
      LogLevel::Warn => tracing::warn!("{message}"),
      LogLevel::Error => tracing::error!("{message}"),
    }
  }
}

/// Sink that collects messages in memory. Useful for tests and for callers
/// that assemble a report after the fact.
#[derive(Default)]
pub struct MemorySink {
  messages: Mutex<Vec<(LogLevel, String)>>,
}

impl MemorySink {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn messages(&self) -> Vec<(LogLevel, String)> {
    self.messages.lock().expect("sink mutex poisoned").clone()
  }
}

impl DiagnosticsSink for MemorySink {
  fn emit(&self, level: LogLevel, message: &str) {
    self
      .messages
      .lock()
      .expect("sink mutex poisoned")
      .push((level, message.to_string()));
  }
}

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Note,
  Warning,
  Error,
}

impl Severity {
  /// Maps the message-type strings used by upstream metadata lists.
  ///
  /// `"say"` and `"warn"` map to [`Severity::Note`] and [`Severity::Warning`];
  /// anything unrecognised is treated as an error.
  pub fn from_metadata(kind: &str) -> Self {
    match kind {
      "say" => Severity::Note,
      "warn" => Severity::Warning,
      _ => Severity::Error,
    }
  }

  fn summary_prefix(self) -> &'static str {
    match self {
      Severity::Note => "Note",
      Severity::Warning => "Warning",
      Severity::Error => "Error",
    }
  }
}

/// A message destined for a user-facing summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
  pub text: String,
  pub severity: Severity,
}

impl DiagnosticMessage {
  pub fn new(severity: Severity, text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      severity,
    }
  }
}

/// Renders messages as a Markdown bullet list under a `## Messages` heading.
///
/// An empty slice yields an empty string.
pub fn messages_as_markdown(messages: &[DiagnosticMessage]) -> String {
  if messages.is_empty() {
    return String::new();
  }

  let mut content = String::from("## Messages\n\n");

  for message in messages {
    content.push_str("- ");
    content.push_str(message.severity.summary_prefix());
    content.push_str(": ");
    content.push_str(&message.text);
    content.push('\n');
  }

  content
}

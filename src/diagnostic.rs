//! Structured fatal diagnostics.
//!
//! A [`Diagnostic`] is the single record printed when a run ends in failure.
//! It is rendered as a label followed by pretty JSON:
//!
//! ```text
//! [FAIL] {
//!   "ts": "2026-01-01T00:00:00Z",
//!   "actor": "alice@host",
//!   "termination": "fail",
//!   "code": "COMMAND_NOT_FOUND",
//!   "message": "command `bulid` not found",
//!   "context": { "cmd": "bulid", "suggest": [] }
//! }
//! ```

use crate::error::{CliError, Termination};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::error::Error as _;

/// The record reported for a fatal outcome.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// When the failure was reported.
    pub ts: DateTime<Utc>,

    /// Who ran the command (`user@HOST`).
    pub actor: String,

    pub termination: Termination,

    pub code: &'static str,

    pub message: String,

    #[serde(skip_serializing_if = "Value::is_null")]
    pub context: Value,

    /// Messages of the underlying causes, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl Diagnostic {
    pub fn from_error(err: &CliError) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            ts: Utc::now(),
            actor: actor_string(),
            termination: err.termination(),
            code: err.code(),
            message: err.to_string(),
            context: err.context(),
            causes,
        }
    }

    /// Label plus pretty JSON, ready for stderr.
    pub fn render(&self) -> String {
        match serde_json::to_string_pretty(self) {
            Ok(json) => format!("{} {}", self.termination.label(), json),
            Err(_) => format!("{} {}: {}", self.termination.label(), self.code, self.message),
        }
    }
}

fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

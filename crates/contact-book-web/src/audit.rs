// crates/contact-book-web/src/audit.rs
// ============================================================================
// Module: HTTP Audit Logging
// Description: Structured audit events for contact book request handling.
// Purpose: Emit one JSON line per request without a logging framework.
// Dependencies: axum, serde, serde_json
// ============================================================================

//! ## Overview
//! Every request handled by the server produces one [`HttpAuditEvent`]. Sinks
//! serialize the event as a single JSON line; failures to write are ignored so
//! logging never changes a response.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use axum::http::StatusCode;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Coarse request outcome derived from the response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HttpOutcome {
    /// 1xx and 2xx responses.
    Ok,
    /// 3xx responses.
    Redirect,
    /// 4xx responses.
    ClientError,
    /// 5xx responses.
    ServerError,
}

impl HttpOutcome {
    /// Classifies a response status.
    #[must_use]
    pub const fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            300..=399 => Self::Redirect,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Ok,
        }
    }
}

/// HTTP request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct HttpAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// HTTP method.
    pub method: String,
    /// Request path without the query string.
    pub path: String,
    /// Response status code.
    pub status: u16,
    /// Rendered response shape when a handler labelled it.
    pub shape: Option<&'static str>,
    /// Normalized error kind label for failed requests.
    pub error_kind: Option<&'static str>,
    /// Handling latency in milliseconds.
    pub latency_ms: u128,
    /// Request outcome.
    pub outcome: HttpOutcome,
}

/// Inputs for constructing an HTTP audit event.
pub struct HttpAuditEventParams {
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Response status.
    pub status: StatusCode,
    /// Rendered response shape.
    pub shape: Option<&'static str>,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Handling latency in milliseconds.
    pub latency_ms: u128,
}

impl HttpAuditEvent {
    /// Builds a new request audit event.
    #[must_use]
    pub fn new(params: HttpAuditEventParams) -> Self {
        Self {
            event: "http_request",
            timestamp_ms: now_ms(),
            method: params.method,
            path: params.path,
            status: params.status.as_u16(),
            shape: params.shape,
            error_kind: params.error_kind,
            latency_ms: params.latency_ms,
            outcome: HttpOutcome::from_status(params.status),
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for request events.
pub trait HttpAuditSink: Send + Sync {
    /// Records an audit event.
    fn record(&self, event: &HttpAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl HttpAuditSink for StderrAuditSink {
    fn record(&self, event: &HttpAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// Append-only log file.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens a file-backed audit sink, creating the file when missing.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be opened for append.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl HttpAuditSink for FileAuditSink {
    fn record(&self, event: &HttpAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl HttpAuditSink for NoopAuditSink {
    fn record(&self, _event: &HttpAuditEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current time in milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use super::*;

    #[test]
    fn outcome_follows_status_class() {
        assert_eq!(HttpOutcome::from_status(StatusCode::OK), HttpOutcome::Ok);
        assert_eq!(HttpOutcome::from_status(StatusCode::SEE_OTHER), HttpOutcome::Redirect);
        assert_eq!(HttpOutcome::from_status(StatusCode::NOT_FOUND), HttpOutcome::ClientError);
        assert_eq!(
            HttpOutcome::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            HttpOutcome::ServerError
        );
    }

    #[test]
    fn file_sink_appends_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let sink = FileAuditSink::new(&path).unwrap();
        for status in [StatusCode::OK, StatusCode::SEE_OTHER] {
            sink.record(&HttpAuditEvent::new(HttpAuditEventParams {
                method: "GET".to_string(),
                path: "/contacts".to_string(),
                status,
                shape: Some("full_page"),
                error_kind: None,
                latency_ms: 1,
            }));
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "http_request");
        assert_eq!(first["status"], 200);
        assert_eq!(first["shape"], "full_page");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["outcome"], "redirect");
    }
}

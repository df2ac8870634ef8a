//! Observability for aerodb-paginate
//!
//! Lifecycle and planning events are emitted through `tracing` with the
//! event name and a flat list of key/value fields. The binary installs
//! `env_logger`; library users attach whatever subscriber they like.
//!
//! # Usage
//!
//! ```ignore
//! use aerodb_paginate::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::PlanCompiled, &[("model", "users"), ("filters", "2")]);
//! ```

mod events;

pub use events::Event;

use std::fmt;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-parameter and per-query detail
    Debug,
    /// Normal operations
    Info,
    /// Request rejected
    Warn,
    /// Operation failures
    Error,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Renders fields as `key=value` pairs sorted by key.
pub fn render_fields(fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let rendered = render_fields(fields);
    let name = event.as_str();

    match event.severity() {
        Severity::Debug => tracing::debug!(event = name, "{}", rendered),
        Severity::Info => tracing::info!(event = name, "{}", rendered),
        Severity::Warn => tracing::warn!(event = name, "{}", rendered),
        Severity::Error => tracing::error!(event = name, "{}", rendered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_render_fields_sorted() {
        let rendered = render_fields(&[("total", "25"), ("model", "users")]);
        assert_eq!(rendered, "model=users total=25");
    }

    #[test]
    fn test_render_no_fields() {
        assert_eq!(render_fields(&[]), "");
    }

    #[test]
    fn test_log_event() {
        // No subscriber installed; verifies no panic
        log_event(Event::SchemasLoaded);
        log_event_with_fields(Event::ParamDropped, &[("key", "secret_eq")]);
    }
}

//! Dropped-parameter diagnostics
//!
//! Malformed or disallowed parameters are never errors. Parsers record why
//! they discarded a parameter here so callers can log or expose it.

use std::fmt;

use serde::Serialize;

/// Why a parameter was discarded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum DropReason {
    /// Key suffix is not a known operator token
    UnknownOperator(String),
    /// Field is not in the allow-list
    UnknownField(String),
    /// Key was present without any value
    EmptyValue,
    /// `page` or `size` could not be used; the default applies
    InvalidPagination(String),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::UnknownOperator(op) => write!(f, "unknown operator '{}'", op),
            DropReason::UnknownField(field) => write!(f, "unknown field '{}'", field),
            DropReason::EmptyValue => write!(f, "no value"),
            DropReason::InvalidPagination(raw) => write!(f, "invalid value '{}'", raw),
        }
    }
}

/// A discarded parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedParam {
    pub key: String,
    #[serde(flatten)]
    pub reason: DropReason,
}

/// Collected drops for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    dropped: Vec<DroppedParam>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a dropped parameter
    pub fn drop_param(&mut self, key: impl Into<String>, reason: DropReason) {
        self.dropped.push(DroppedParam {
            key: key.into(),
            reason,
        });
    }

    pub fn dropped(&self) -> &[DroppedParam] {
        &self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.dropped.is_empty()
    }

    /// Keys that were dropped, in the order they were seen
    pub fn dropped_keys(&self) -> Vec<&str> {
        self.dropped.iter().map(|d| d.key.as_str()).collect()
    }
}

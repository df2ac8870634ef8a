//! Observable events for aerodb-paginate
//!
//! Every log line emitted by the crate names one of these events.
//! Events are explicit and typed.

use std::fmt;

use super::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Model schemas loaded
    SchemasLoaded,
    /// HTTP server bound and serving
    Serving,

    // Planning
    /// Valid field set derived for a model
    FieldsResolved,
    /// A query parameter was discarded during parsing
    ParamDropped,
    /// Query plan built
    PlanCompiled,

    // Execution
    /// Count query executed
    CountExecuted,
    /// Data query executed
    QueryExecuted,
    /// Records inserted into the in-memory store
    RecordsInserted,

    // Failures
    /// Model could not be introspected
    SchemaRejected,
    /// Executor failed a count or data query
    ExecutorFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::Serving => "PAGINATE_SERVING",

            Event::FieldsResolved => "FIELDS_RESOLVED",
            Event::ParamDropped => "PARAM_DROPPED",
            Event::PlanCompiled => "PLAN_COMPILED",

            Event::CountExecuted => "COUNT_EXECUTED",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::RecordsInserted => "RECORDS_INSERTED",

            Event::SchemaRejected => "SCHEMA_REJECTED",
            Event::ExecutorFailed => "EXECUTOR_FAILED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ParamDropped | Event::FieldsResolved => Severity::Debug,
            Event::CountExecuted | Event::QueryExecuted => Severity::Debug,
            Event::SchemaRejected => Severity::Warn,
            Event::ExecutorFailed => Severity::Error,
            _ => Severity::Info,
        }
    }

    /// Failure events
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::SchemaRejected | Event::ExecutorFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

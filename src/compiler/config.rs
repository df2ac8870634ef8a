//! Compiler configuration

use serde::{Deserialize, Serialize};

/// What the total-row count of a page result covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountPolicy {
    /// Every row of the model, ignoring filters. `total` and
    /// `total_pages` can then overstate the filtered result set.
    #[default]
    Unfiltered,
    /// Only rows matching the request's filters
    Filtered,
}

/// Compiler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompileConfig {
    /// Count policy (default: unfiltered)
    #[serde(default)]
    pub count_policy: CountPolicy,

    /// Attach dropped parameters to each page result (default: false)
    #[serde(default)]
    pub report_dropped: bool,
}

impl CompileConfig {
    /// Config counting only matching rows
    pub fn filtered_count() -> Self {
        Self {
            count_policy: CountPolicy::Filtered,
            ..Default::default()
        }
    }

    /// Returns this config with dropped-parameter reporting switched on
    pub fn reporting_dropped(self) -> Self {
        Self {
            report_dropped: true,
            ..self
        }
    }
}

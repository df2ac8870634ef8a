//! # Order Parser
//!
//! Parses `order_by=field,field desc,-field` into sort directives.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::diagnostics::{Diagnostics, DropReason};
use crate::schema::FieldSet;

/// Key carrying the sort specification
pub const ORDER_BY_KEY: &str = "order_by";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field plus direction. Only constructible for allowed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortDirective {
    field: String,
    direction: SortDirection,
}

impl SortDirective {
    pub fn try_new(field: &str, direction: SortDirection, allowed: &FieldSet) -> Option<Self> {
        allowed.contains(field).then(|| Self {
            field: field.to_string(),
            direction,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}

/// Resolves a single `order_by` segment to `(field, direction)`.
///
/// A leading `-` wins over any trailing token; otherwise a second token
/// equal to `desc` (any case) sorts descending.
fn resolve_segment(segment: &str) -> Option<(&str, SortDirection)> {
    let mut tokens = segment.split_whitespace();
    let field = tokens.next()?;

    if let Some(stripped) = field.strip_prefix('-') {
        return Some((stripped, SortDirection::Desc));
    }

    let direction = match tokens.next() {
        Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
        _ => SortDirection::Asc,
    };

    Some((field, direction))
}

/// Parses sort directives, silently dropping unknown fields.
pub fn parse_order_by(raw: &str, allowed: &FieldSet) -> Vec<SortDirective> {
    parse_order_by_with_diagnostics(raw, allowed, &mut Diagnostics::new())
}

/// Parses sort directives, recording dropped fields under the `order_by` key.
///
/// Directives keep their order: the first one is the primary sort key.
pub fn parse_order_by_with_diagnostics(
    raw: &str,
    allowed: &FieldSet,
    diagnostics: &mut Diagnostics,
) -> Vec<SortDirective> {
    let mut orders = Vec::new();

    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let Some((field, direction)) = resolve_segment(part) else {
            continue;
        };

        match SortDirective::try_new(field, direction, allowed) {
            Some(directive) => orders.push(directive),
            None => diagnostics.drop_param(ORDER_BY_KEY, DropReason::UnknownField(field.to_string())),
        }
    }

    orders
}

//! # Filter Parser
//!
//! Turns `field[_operator]=value` query parameters into filter predicates.
//!
//! The key is split on its **last** underscore: the suffix must be one of
//! the operator tokens below, and the remaining field must be in the
//! model's allow-list. Anything else is dropped, never reported as an
//! error. A key without an underscore is an equality filter on the whole
//! key.
//!
//! | token     | operator   |
//! |-----------|------------|
//! | `eq`      | `=`        |
//! | `ne`      | `!=`       |
//! | `gt`      | `>`        |
//! | `gte`     | `>=`       |
//! | `lt`      | `<`        |
//! | `lte`     | `<=`       |
//! | `like`    | `LIKE`     |
//! | `notlike` | `NOT LIKE` |
//! | `is`      | `IS`       |
//! | `isnot`   | `IS NOT`   |
//! | `in`      | `IN (...)` |

use std::fmt;

use serde::{Deserialize, Serialize};

use super::diagnostics::{Diagnostics, DropReason};
use super::params::RawParams;
use crate::schema::FieldSet;

/// Keys that never become filters
pub const RESERVED_KEYS: [&str; 3] = ["page", "size", "order_by"];

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    Is,
    IsNot,
    In,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 11] = [
        FilterOperator::Eq,
        FilterOperator::Ne,
        FilterOperator::Gt,
        FilterOperator::Gte,
        FilterOperator::Lt,
        FilterOperator::Lte,
        FilterOperator::Like,
        FilterOperator::NotLike,
        FilterOperator::Is,
        FilterOperator::IsNot,
        FilterOperator::In,
    ];

    /// Looks up an operator by its key-suffix token
    pub fn from_suffix(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == token)
    }

    /// Key-suffix token
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "ne",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::Like => "like",
            FilterOperator::NotLike => "notlike",
            FilterOperator::Is => "is",
            FilterOperator::IsNot => "isnot",
            FilterOperator::In => "in",
        }
    }

    /// Comparison symbol as a store would spell it
    pub fn symbol(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Ne => "!=",
            FilterOperator::Gt => ">",
            FilterOperator::Gte => ">=",
            FilterOperator::Lt => "<",
            FilterOperator::Lte => "<=",
            FilterOperator::Like => "LIKE",
            FilterOperator::NotLike => "NOT LIKE",
            FilterOperator::Is => "IS",
            FilterOperator::IsNot => "IS NOT",
            FilterOperator::In => "IN",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Value side of a predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    /// Only produced for `in`
    List(Vec<String>),
}

impl FilterValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FilterValue::Scalar(s) => Some(s),
            FilterValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FilterValue::Scalar(_) => None,
            FilterValue::List(items) => Some(items),
        }
    }
}

/// A single `field operator value` condition.
///
/// Only constructible for fields in the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterPredicate {
    field: String,
    operator: FilterOperator,
    value: FilterValue,
}

impl FilterPredicate {
    /// Builds a predicate from a raw value, or `None` if `field` is not
    /// allowed. For `in` the value is split on commas, untrimmed, keeping
    /// empty segments.
    pub fn try_new(
        field: &str,
        operator: FilterOperator,
        raw_value: &str,
        allowed: &FieldSet,
    ) -> Option<Self> {
        if !allowed.contains(field) {
            return None;
        }

        let value = match operator {
            FilterOperator::In => {
                FilterValue::List(raw_value.split(',').map(str::to_string).collect())
            }
            _ => FilterValue::Scalar(raw_value.to_string()),
        };

        Some(Self {
            field: field.to_string(),
            operator,
            value,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            FilterValue::Scalar(v) => write!(f, "{} {} {:?}", self.field, self.operator, v),
            FilterValue::List(items) => write!(f, "{} {} {:?}", self.field, self.operator, items),
        }
    }
}

/// Splits a key into `(field, operator token)` on its last underscore.
///
/// A key with no underscore is an `eq` filter on the whole key.
pub fn split_key(key: &str) -> (&str, &str) {
    match key.rfind('_') {
        Some(idx) => (&key[..idx], &key[idx + 1..]),
        None => (key, FilterOperator::Eq.as_str()),
    }
}

/// Parses filter predicates, silently dropping anything invalid.
pub fn parse_filters(params: &RawParams, allowed: &FieldSet) -> Vec<FilterPredicate> {
    parse_filters_with_diagnostics(params, allowed, &mut Diagnostics::new())
}

/// Parses filter predicates, recording each dropped key in `diagnostics`.
///
/// Only the first value of a key is used. Predicates follow the key order
/// of `params`.
pub fn parse_filters_with_diagnostics(
    params: &RawParams,
    allowed: &FieldSet,
    diagnostics: &mut Diagnostics,
) -> Vec<FilterPredicate> {
    let mut filters = Vec::new();

    for (key, values) in params.iter() {
        if RESERVED_KEYS.contains(&key) {
            continue;
        }

        let Some(value) = values.first() else {
            diagnostics.drop_param(key, DropReason::EmptyValue);
            continue;
        };

        let (field, token) = split_key(key);

        let Some(operator) = FilterOperator::from_suffix(token) else {
            diagnostics.drop_param(key, DropReason::UnknownOperator(token.to_string()));
            continue;
        };

        match FilterPredicate::try_new(field, operator, value, allowed) {
            Some(predicate) => filters.push(predicate),
            None => diagnostics.drop_param(key, DropReason::UnknownField(field.to_string())),
        }
    }

    filters
}
